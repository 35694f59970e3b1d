//! Local filesystem access: config files and the subtree copy.

pub mod config_store;
pub mod tree_copier;

pub use config_store::ConfigStore;
pub use tree_copier::{CopyReport, TreeCopier};
