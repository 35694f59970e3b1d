use std::path::{Path, PathBuf};

use tracing::info;

use crate::application::services::workspace_resolver::WorkspaceResolver;
use crate::common::result::GitGetResult;
use crate::domain::entities::config::GitGetConfig;
use crate::domain::value_objects::sync_outcome::SyncOutcome;
use crate::infrastructure::filesystem::tree_copier::{CopyReport, TreeCopier};
use crate::infrastructure::git::mirror_sync::MirrorSync;

/// 実行結果
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSubtreeReport {
    pub outcome: SyncOutcome,

    pub mirror_path: PathBuf,

    pub destination: PathBuf,

    /// コピーを省略した場合はNone
    pub copy: Option<CopyReport>,
}

impl FetchSubtreeReport {
    pub fn copied(&self) -> bool {
        self.copy.is_some()
    }
}

/// ミラーを同期し、変更があればサブツリーをプロジェクトへコピーする
pub struct FetchSubtreeUseCase<S: MirrorSync> {
    config: GitGetConfig,
    synchronizer: S,
    copier: TreeCopier,
}

impl<S: MirrorSync> FetchSubtreeUseCase<S> {
    pub fn new(config: GitGetConfig, synchronizer: S) -> Self {
        Self {
            config,
            synchronizer,
            copier: TreeCopier::new(true),
        }
    }

    /// 同期とコピーを実行する
    ///
    /// コピーは同期で変更があった場合か、コピー先がまだ存在しない場合のみ
    /// 行う。途中で失敗した場合、コピー先には手を付けない。
    pub fn execute(&self, working_dir: &Path) -> GitGetResult<FetchSubtreeReport> {
        let workspace = WorkspaceResolver::new(&self.config).resolve(working_dir)?;

        // 同期前に判定する
        let destination_missing = !workspace.destination.exists();

        let outcome = self
            .synchronizer
            .sync(&workspace.git_url, &workspace.mirror_path)?;
        info!("Mirror {}: {}", workspace.mirror_path.display(), outcome);

        let copy = if outcome.has_changes() || destination_missing {
            info!(
                "Copying {} into {}",
                workspace.source.display(),
                workspace.destination.display()
            );
            Some(self.copier.copy(&workspace.source, &workspace.destination)?)
        } else {
            info!("No changes, skipping copy");
            None
        };

        Ok(FetchSubtreeReport {
            outcome,
            mirror_path: workspace.mirror_path,
            destination: workspace.destination,
            copy,
        })
    }
}
