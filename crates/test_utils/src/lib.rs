//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claim validation test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built claims, provider identifiers and evaluation instants
//! - `builders`: Builder patterns for test claims and service lines
//! - `assertions`: Assertion helpers for rule results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
