use std::fmt;

/// ミラー同期の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// ミラーが存在しなかったため新規にクローンした
    ClonedFresh,
    /// pullにより新しいコミットを取り込んだ（fast-forwardまたはマージ）
    PulledWithChanges,
    /// pullしたが既に最新だった
    PulledNoChanges,
}

impl SyncOutcome {
    /// 新しい内容がミラーに届いたか
    pub fn has_changes(self) -> bool {
        !matches!(self, SyncOutcome::PulledNoChanges)
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SyncOutcome::ClonedFresh => "cloned",
            SyncOutcome::PulledWithChanges => "pulled with changes",
            SyncOutcome::PulledNoChanges => "already up to date",
        };
        f.write_str(text)
    }
}
