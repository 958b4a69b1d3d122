//! Domain model for the recognition directory.
//!
//! # Responsibility
//! - Define the records shared by the directory, engines and persistence.
//! - Keep serialized field names compatible with stored camelCase JSON.
//!
//! # Invariants
//! - Kudos counters are unsigned; no record can hold a negative balance.
//! - Records are replaced whole on mutation, never patched in place by callers.

pub mod badge;
pub mod employee;
pub mod kudo;
pub mod project;
pub mod reward;
pub mod task;

/// Unit of recognition points.
pub type Kudos = u64;
