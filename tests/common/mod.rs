//! Shared test utilities for tabfill integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod builders;
pub mod fake_completion_api;

pub use builders::*;
pub use fake_completion_api::*;
