pub mod workspace_resolver;

pub use workspace_resolver::{ResolvedWorkspace, WorkspaceResolver};
