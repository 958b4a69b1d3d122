//! Persistence contracts for EmployeeHub state.
//!
//! # Responsibility
//! - Define the string-keyed store every durable collection is written to.
//! - Isolate SQLite details and JSON encoding from service orchestration.
//!
//! # Invariants
//! - Stores give read-modify-write semantics per key; nothing spans keys.
//! - Persisted values that cannot be decoded are reported, never masked.

pub mod json_store;
pub mod kv_repo;
