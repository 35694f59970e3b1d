//! Git access through libgit2.

pub mod mirror;
pub mod mirror_sync;
pub mod progress;

// Re-export main types for convenience
pub use mirror::{GitMirror, ProgressMode};
pub use mirror_sync::MirrorSync;
pub use progress::{Clock, ProgressReporter, SystemClock};
