/// Application layer
///
/// Resolves where things live and drives the sync then copy pipeline.
pub mod services;
pub mod use_cases;
