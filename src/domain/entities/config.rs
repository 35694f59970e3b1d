use crate::common::error::GitGetError;
use crate::common::result::GitGetResult;
use crate::domain::value_objects::git_url::GitUrl;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};
use validator::Validate;

/// デフォルトのリモートリポジトリ
pub const DEFAULT_REMOTE_URL: &str = "https://github.com/Microsoft/MixedRealityToolkit-Unity.git";

/// ミラー内でコピー元となるサブツリー
pub const DEFAULT_SOURCE: &str = "Assets/HoloToolkit";

/// プロジェクト内のコピー先
pub const DEFAULT_DESTINATION: &str = "Assets";

/// プロジェクトルートであることを示すディレクトリ
pub const DEFAULT_MARKER: &str = "Assets";

/// システム一時ディレクトリ配下の共有キャッシュディレクトリ名
pub const CACHE_DIR_NAME: &str = "GitGets";

/// 1回の実行に必要な設定
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct GitGetConfig {
    /// ミラー対象のリモートURL
    #[validate(length(min = 1))]
    pub url: String,

    /// ミラールートからの相対パス
    #[validate(length(min = 1))]
    pub source: String,

    /// 作業ディレクトリからの相対パス
    #[validate(length(min = 1))]
    pub destination: String,

    /// 作業ディレクトリに存在すべきディレクトリ
    #[validate(length(min = 1))]
    pub marker: String,

    /// ミラーを置くディレクトリ
    pub cache_root: PathBuf,

    /// マーカーディレクトリの確認を省略するか
    pub skip_marker_check: bool,
}

impl Default for GitGetConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REMOTE_URL.to_string(),
            source: DEFAULT_SOURCE.to_string(),
            destination: DEFAULT_DESTINATION.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            cache_root: Self::default_cache_root(),
            skip_marker_check: false,
        }
    }
}

/// 設定ファイルやCLIから与えられる部分的な設定
///
/// 未指定の項目は下位の設定をそのまま残す。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub destination: Option<String>,

    #[serde(default)]
    pub marker: Option<String>,

    #[serde(default)]
    pub cache_root: Option<PathBuf>,

    #[serde(default)]
    pub skip_marker_check: Option<bool>,
}

impl GitGetConfig {
    pub fn default_cache_root() -> PathBuf {
        std::env::temp_dir().join(CACHE_DIR_NAME)
    }

    /// 上書き設定を適用する
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(url) = overrides.url {
            self.url = url;
        }
        if let Some(source) = overrides.source {
            self.source = source;
        }
        if let Some(destination) = overrides.destination {
            self.destination = destination;
        }
        if let Some(marker) = overrides.marker {
            self.marker = marker;
        }
        if let Some(cache_root) = overrides.cache_root {
            self.cache_root = cache_root;
        }
        if let Some(skip) = overrides.skip_marker_check {
            self.skip_marker_check = skip;
        }
        self
    }

    /// 設定値を検証する
    pub fn validated(self) -> GitGetResult<Self> {
        self.validate()
            .map_err(|e| GitGetError::config_error_with_source("Invalid configuration", e))?;

        for (field, value) in [
            ("source", &self.source),
            ("destination", &self.destination),
            ("marker", &self.marker),
        ] {
            Self::ensure_relative(field, value)?;
        }

        self.git_url()?;
        Ok(self)
    }

    pub fn git_url(&self) -> GitGetResult<GitUrl> {
        GitUrl::new(&self.url).map_err(|e| {
            GitGetError::validation_error("url", e.to_string(), Some(self.url.clone()))
        })
    }

    fn ensure_relative(field: &str, value: &str) -> GitGetResult<()> {
        let path = Path::new(value);
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));

        if path.is_absolute() || escapes {
            return Err(GitGetError::validation_error(
                field,
                "must be a relative path without '..' components",
                Some(value.to_string()),
            ));
        }
        Ok(())
    }
}
