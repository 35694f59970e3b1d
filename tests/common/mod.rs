//! Common test utilities and helpers
//!
//! Shared fixtures that build real local git repositories, plus assertion
//! macros for checking copied files.

#![allow(dead_code)]

pub mod assertion_helpers;
pub mod test_fixtures;
