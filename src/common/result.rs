use crate::common::error::GitGetError;

/// gitget全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use gitget::common::result::GitGetResult;
/// use gitget::common::error::GitGetError;
///
/// fn example_with_error() -> GitGetResult<()> {
///     Err(GitGetError::git_error("Something went wrong"))
/// }
/// assert!(example_with_error().is_err());
/// ```
pub type GitGetResult<T> = Result<T, GitGetError>;

/// Optionのエラー変換ヘルパー
pub trait OptionExt<T> {
    /// Noneの場合はGitErrorに変換する
    ///
    /// # Examples
    ///
    /// ```
    /// use gitget::common::result::{GitGetResult, OptionExt};
    ///
    /// let none_value: Option<&str> = None;
    /// let result: GitGetResult<&str> = none_value.ok_or_git_error("HEAD is detached");
    /// assert!(result.is_err());
    /// ```
    fn ok_or_git_error(self, message: impl Into<String>) -> GitGetResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_git_error(self, message: impl Into<String>) -> GitGetResult<T> {
        self.ok_or_else(|| GitGetError::git_error(message))
    }
}

/// 標準のResultにエラーメッセージとパスを付与するヘルパー
pub trait IoResultExt<T> {
    /// io::ErrorをFileSystemErrorに変換し、対象パスを記録する
    fn with_path(self, message: impl Into<String>, path: &std::path::Path) -> GitGetResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, message: impl Into<String>, path: &std::path::Path) -> GitGetResult<T> {
        self.map_err(|e| {
            GitGetError::filesystem_error_with_source(message, Some(path.to_path_buf()), e)
        })
    }
}
