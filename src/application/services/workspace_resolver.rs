use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::common::error::GitGetError;
use crate::common::result::{GitGetResult, IoResultExt};
use crate::domain::entities::config::GitGetConfig;
use crate::domain::value_objects::git_url::GitUrl;

/// 1回の実行で扱うパス一式
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWorkspace {
    /// プロジェクトルート
    pub working_dir: PathBuf,

    /// コピー先 (`working_dir/destination`)
    pub destination: PathBuf,

    /// コピー元 (`mirror_path/source`)
    pub source: PathBuf,

    /// キャッシュ内のミラー
    pub mirror_path: PathBuf,

    pub git_url: GitUrl,
}

/// 作業ディレクトリとキャッシュの位置を決定する
#[derive(Debug, Clone)]
pub struct WorkspaceResolver<'a> {
    config: &'a GitGetConfig,
}

impl<'a> WorkspaceResolver<'a> {
    pub fn new(config: &'a GitGetConfig) -> Self {
        Self { config }
    }

    /// マーカーディレクトリが作業ディレクトリ直下にあるか確認する
    pub fn check_marker(&self, working_dir: &Path) -> GitGetResult<()> {
        if self.config.skip_marker_check {
            warn!("Skipping the '{}' marker check", self.config.marker);
            return Ok(());
        }

        if working_dir.join(&self.config.marker).is_dir() {
            Ok(())
        } else {
            Err(GitGetError::wrong_working_directory(
                &self.config.marker,
                working_dir,
            ))
        }
    }

    /// 共有キャッシュルートを作成し、ミラーのパスを返す
    pub fn prepare_cache_root(&self, git_url: &GitUrl) -> GitGetResult<PathBuf> {
        let cache_root = &self.config.cache_root;
        if !cache_root.is_dir() {
            debug!("Creating cache root {}", cache_root.display());
            std::fs::create_dir_all(cache_root)
                .with_path("Failed to create cache root", cache_root)?;
        }

        Ok(cache_root.join(git_url.cache_id()))
    }

    pub fn resolve(&self, working_dir: &Path) -> GitGetResult<ResolvedWorkspace> {
        self.check_marker(working_dir)?;

        let git_url = self.config.git_url()?;
        let mirror_path = self.prepare_cache_root(&git_url)?;

        let resolved = ResolvedWorkspace {
            working_dir: working_dir.to_path_buf(),
            destination: working_dir.join(&self.config.destination),
            source: mirror_path.join(&self.config.source),
            mirror_path,
            git_url,
        };

        info!(
            "Mirror for {} is {}",
            resolved.git_url,
            resolved.mirror_path.display()
        );
        Ok(resolved)
    }
}
