use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::common::error::GitGetError;
use crate::common::result::{GitGetResult, IoResultExt};

/// Summary of a copy run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Number of files written to the destination
    pub files_copied: usize,

    /// Number of directories that had to be created
    pub directories_created: usize,
}

/// Copies a directory tree over another, overwriting files of the same name.
///
/// Only content and hierarchy are copied. Symlinks are followed, permissions
/// and timestamps are not preserved, and nothing is rolled back if a copy
/// fails halfway.
#[derive(Debug, Clone)]
pub struct TreeCopier {
    recursive: bool,
}

impl Default for TreeCopier {
    fn default() -> Self {
        Self { recursive: true }
    }
}

impl TreeCopier {
    pub fn new(recursive: bool) -> Self {
        Self { recursive }
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    pub fn copy(&self, source: &Path, destination: &Path) -> GitGetResult<CopyReport> {
        if !source.is_dir() {
            return Err(GitGetError::source_not_found(source));
        }

        let mut report = CopyReport::default();

        if !destination.is_dir() {
            std::fs::create_dir_all(destination)
                .with_path("Failed to create destination directory", destination)?;
            report.directories_created += 1;
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(source)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_name() != ".git");

        for entry in walker {
            let entry = entry?;
            let relative = entry.path().strip_prefix(source).map_err(|_| {
                GitGetError::filesystem_error(
                    "Walked outside of the source directory",
                    Some(entry.path().to_path_buf()),
                )
            })?;
            let target = destination.join(relative);

            if entry.file_type().is_dir() {
                if !self.recursive {
                    continue;
                }
                if !target.is_dir() {
                    std::fs::create_dir_all(&target)
                        .with_path("Failed to create directory", &target)?;
                    report.directories_created += 1;
                }
                continue;
            }

            std::fs::copy(entry.path(), &target).with_path("Failed to copy file", entry.path())?;
            debug!("Copied {}", relative.display());
            report.files_copied += 1;
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_is_recursive() {
        assert!(TreeCopier::default().is_recursive());
        assert!(!TreeCopier::new(false).is_recursive());
    }

    #[test]
    fn test_file_as_source_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        let result = TreeCopier::default().copy(&file, &temp_dir.path().join("out"));
        assert!(matches!(result, Err(GitGetError::SourceNotFound { .. })));
    }

    #[test]
    fn test_empty_source_creates_destination() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        std::fs::create_dir(&source).unwrap();
        let destination = temp_dir.path().join("a").join("b");

        let report = TreeCopier::default().copy(&source, &destination).unwrap();
        assert!(destination.is_dir());
        assert_eq!(report.files_copied, 0);
        assert_eq!(report.directories_created, 1);
    }
}
