//! Core Kernel - Foundational types shared by the claim validation crates
//!
//! This crate provides the building blocks used by the domain and interface crates:
//! - Strongly-typed identifiers for claims and validation runs
//! - Calendar-day arithmetic in a configurable timezone
//! - The kernel error type

pub mod temporal;
pub mod identifiers;
pub mod error;

pub use temporal::{Timezone, TemporalError, days_between, elapsed_days};
pub use identifiers::{ClaimId, ValidationRunId};
pub use error::CoreError;
