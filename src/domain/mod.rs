//! Domain layer: configuration and value objects shared by every step of a run.

pub mod entities;
pub mod value_objects;
