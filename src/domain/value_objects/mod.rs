pub mod git_url;
pub mod sync_outcome;

pub use git_url::{GitUrl, GitUrlError};
pub use sync_outcome::SyncOutcome;
