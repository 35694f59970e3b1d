pub mod fetch_subtree;

pub use fetch_subtree::{FetchSubtreeReport, FetchSubtreeUseCase};
