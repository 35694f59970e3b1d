use crate::common::result::GitGetResult;
use crate::domain::value_objects::{GitUrl, SyncOutcome};
use std::path::Path;

/// Keeps a local mirror of a remote repository up to date
#[cfg_attr(test, mockall::automock)]
pub trait MirrorSync {
    /// Clone `url` into `mirror_path`, or pull if a valid repository is already there
    fn sync(&self, url: &GitUrl, mirror_path: &Path) -> GitGetResult<SyncOutcome>;
}
