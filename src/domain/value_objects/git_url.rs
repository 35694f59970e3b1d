use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use url::Url;

/// GitURL関連のエラー
#[derive(Debug, Error, PartialEq)]
pub enum GitUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Missing repository path")]
    MissingRepoPath,

    #[error("Invalid characters in URL: {0}")]
    InvalidCharacters(String),
}

/// GitHubのURLプレフィックス。キャッシュIDでは組織名とリポジトリ名だけを残す
const GITHUB_PREFIXES: [&str; 3] = ["https://github.com", "http://github.com", "git@github.com:"];

/// リモートリポジトリを指すURLの値オブジェクト
///
/// libgit2にはそのまま渡すため、入力文字列は正規化しない（前後の空白のみ除去）。
/// 生成時にlibgit2が扱える形式かどうかを検証する。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GitUrl {
    /// 入力されたURL文字列
    url: String,
}

impl GitUrl {
    /// 新しいGitUrlインスタンスを作成
    pub fn new(url: &str) -> Result<Self, GitUrlError> {
        let trimmed = url.trim();

        if trimmed.is_empty() {
            return Err(GitUrlError::InvalidFormat("Empty URL".to_string()));
        }

        if let Some(ch) = trimmed.chars().find(|ch| ch.is_control()) {
            return Err(GitUrlError::InvalidCharacters(format!(
                "Control character detected: {:?}",
                ch
            )));
        }

        Self::validate(trimmed)?;

        Ok(Self {
            url: trimmed.to_string(),
        })
    }

    /// スキーム、ホスト、リポジトリパスを検証
    fn validate(url: &str) -> Result<(), GitUrlError> {
        // ローカルのリポジトリ（絶対パス）
        if Path::new(url).is_absolute() {
            return Ok(());
        }

        // SCP形式（git@host:path）
        if let Some(captures) = scp_like_pattern().captures(url) {
            if captures[2].trim_start_matches('/').is_empty() {
                return Err(GitUrlError::MissingRepoPath);
            }
            return Ok(());
        }

        let parsed = Url::parse(url).map_err(|_| GitUrlError::InvalidFormat(url.to_string()))?;
        let scheme = parsed.scheme().to_string();

        if !matches!(scheme.as_str(), "https" | "http" | "git" | "ssh" | "file") {
            return Err(GitUrlError::UnsupportedScheme(scheme));
        }

        if parsed.host_str().unwrap_or_default().is_empty() && scheme != "file" {
            return Err(GitUrlError::MissingHost);
        }

        if parsed.path().trim_matches('/').is_empty() {
            return Err(GitUrlError::MissingRepoPath);
        }

        Ok(())
    }

    /// 元のURL文字列を取得
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// ミラーのディレクトリ名として使うキャッシュIDを取得
    pub fn cache_id(&self) -> String {
        sanitize(&self.url)
    }
}

/// URLからキャッシュディレクトリ名を導出する
///
/// `.git`サフィックス、スキーム（GitHubの場合はホストも）、パス区切りを取り除く。
/// 同じ入力に対して常に同じ結果を返す。
///
/// ```
/// use gitget::domain::value_objects::git_url::sanitize;
///
/// assert_eq!(sanitize("https://github.com/Org/Repo.git"), "OrgRepo");
/// ```
pub fn sanitize(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    let without_suffix = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    let without_prefix = GITHUB_PREFIXES
        .iter()
        .find_map(|prefix| without_suffix.strip_prefix(prefix))
        .or_else(|| {
            without_suffix
                .find("://")
                .map(|index| &without_suffix[index + 3..])
        })
        .unwrap_or(without_suffix);

    let id: String = without_prefix
        .chars()
        .filter(|ch| !matches!(ch, '/' | '\\' | ':'))
        .collect();

    if id.chars().all(|ch| ch == '.') {
        "_".repeat(id.len().max(1))
    } else {
        id
    }
}

fn scp_like_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._-]+@([^:/]+):(.+)$").expect("scp-like URL pattern is valid")
    })
}

impl fmt::Display for GitUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl TryFrom<&str> for GitUrl {
    type Error = GitUrlError;

    fn try_from(url: &str) -> Result<Self, Self::Error> {
        GitUrl::new(url)
    }
}

impl TryFrom<String> for GitUrl {
    type Error = GitUrlError;

    fn try_from(url: String) -> Result<Self, Self::Error> {
        GitUrl::new(&url)
    }
}
