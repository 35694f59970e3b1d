//! # gitget - Subtree fetcher for project assets
//!
//! `gitget` keeps a cached mirror of a remote git repository and copies one
//! subdirectory of it into the current project. It is meant to be run from
//! the root of the consuming project, which is recognised by a marker
//! directory (`Assets` by default).
//!
//! ## Flow
//!
//! 1. Check that the marker directory exists in the working directory.
//! 2. Clone the remote into `<cache root>/<cache id>`, or pull if the mirror
//!    already exists.
//! 3. If the pull brought changes, or the destination does not exist yet,
//!    copy `<mirror>/<source>` over `<working dir>/<destination>`.
//!
//! ## Configuration
//!
//! Built-in defaults can be overridden by a `gitget.yml` in the working
//! directory, and both by command line flags or `GITGET_*` variables:
//!
//! ```yaml
//! url: https://github.com/Org/Tools.git
//! source: Assets/Tools
//! destination: Assets/Tools
//! ```
//!
//! ## Architecture
//!
//! - [`domain`]: Configuration and value objects
//! - [`application`]: Workspace resolution and the fetch pipeline
//! - [`infrastructure`]: libgit2 access, progress output and file copying
//! - [`presentation`]: CLI interface and user interaction
//! - [`common`]: Shared error handling
//!
//! ## Using the Library
//!
//! ```rust,no_run
//! use gitget::application::use_cases::fetch_subtree::FetchSubtreeUseCase;
//! use gitget::domain::entities::config::GitGetConfig;
//! use gitget::infrastructure::git::mirror::GitMirror;
//! use std::path::Path;
//!
//! # fn example() -> gitget::Result<()> {
//! let config = GitGetConfig::default().validated()?;
//! let use_case = FetchSubtreeUseCase::new(config, GitMirror::default());
//! let report = use_case.execute(Path::new("."))?;
//!
//! println!("{} (copied: {})", report.outcome, report.copied());
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::GitGetError;
pub use crate::common::result::GitGetResult as Result;
