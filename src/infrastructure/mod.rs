/// Infrastructure layer modules
///
/// Concrete implementations for external system interactions:
/// - Git operations (clone, pull, progress reporting)
/// - File system operations (config files, subtree copy)
pub mod filesystem;
pub mod git;

pub use filesystem::{ConfigStore, CopyReport, TreeCopier};
pub use git::{GitMirror, MirrorSync, ProgressMode};
