//! Typed JSON encoding over a `KeyValueStore`.
//!
//! # Invariants
//! - A missing key decodes to `None`; a present but malformed value is an
//!   error, not a silent fallback to seed data.

use crate::repo::kv_repo::{KeyValueStore, RepoError, RepoResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage key for the employee collection.
pub const EMPLOYEES_KEY: &str = "employeehub_employees";
/// Storage key for the project collection.
pub const PROJECTS_KEY: &str = "employeehub_projects";
/// Storage key for the role catalog.
pub const ROLES_KEY: &str = "employeehub_roles";
/// Storage key for personal tasks.
pub const TASKS_KEY: &str = "employeehub_tasks";

/// Reads and decodes one JSON value.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> RepoResult<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| RepoError::InvalidData {
            key: key.to_string(),
            message: err.to_string(),
        })
}

/// Encodes and writes one JSON value, replacing any previous value.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> RepoResult<()> {
    let encoded = serde_json::to_string(value).map_err(|err| RepoError::Encode {
        key: key.to_string(),
        message: err.to_string(),
    })?;
    store.set(key, &encoded)
}
