use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitGetError {
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(
        "There were merge conflicts while pulling into {}; resolve them manually and run again",
        mirror.display()
    )]
    MergeConflict {
        mirror: PathBuf,
        conflicted_paths: Vec<String>,
    },

    #[error("Source directory does not exist or could not be found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Git operation failed: {message}")]
    GitError {
        message: String,
        #[source]
        source: Option<git2::Error>,
    },

    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Serialization error: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {field} - {message}")]
    ValidationError {
        field: String,
        message: String,
        value: Option<String>,
    },
}

impl GitGetError {
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The marker directory is missing, so we are not inside the target project.
    pub fn wrong_working_directory(marker: &str, working_dir: impl Into<PathBuf>) -> Self {
        let working_dir = working_dir.into();
        Self::config_error(format!(
            "wrong working directory: '{}' not found in {}. Run gitget from the root of the target project",
            marker,
            working_dir.display()
        ))
    }

    pub fn merge_conflict(mirror: impl Into<PathBuf>, conflicted_paths: Vec<String>) -> Self {
        Self::MergeConflict {
            mirror: mirror.into(),
            conflicted_paths,
        }
    }

    pub fn source_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    pub fn git_error(message: impl Into<String>) -> Self {
        Self::GitError {
            message: message.into(),
            source: None,
        }
    }

    pub fn git_error_with_source(message: impl Into<String>, source: git2::Error) -> Self {
        Self::GitError {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn filesystem_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn serialization_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn validation_error(
        field: impl Into<String>,
        message: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
            value,
        }
    }
}

impl From<git2::Error> for GitGetError {
    fn from(error: git2::Error) -> Self {
        Self::git_error_with_source("Git operation failed", error)
    }
}

impl From<std::io::Error> for GitGetError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}

impl From<serde_yaml::Error> for GitGetError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::serialization_error_with_source("YAML deserialization failed", error)
    }
}

impl From<walkdir::Error> for GitGetError {
    fn from(error: walkdir::Error) -> Self {
        let path = error.path().map(|p| p.to_path_buf());
        match error.into_io_error() {
            Some(io_error) => {
                Self::filesystem_error_with_source("Directory traversal failed", path, io_error)
            }
            None => Self::filesystem_error("Directory traversal hit a symlink loop", path),
        }
    }
}
