//! SQLite bootstrap for the durable key-value backing store.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - Connections are handed out only after every pending migration applied.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Migration `version` failed; the transaction was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
}

impl DbError {
    /// Stable code for `error_code=` log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "store_sqlite_failed",
            Self::Migration { .. } => "store_migration_failed",
            Self::UnsupportedSchemaVersion { .. } => "store_version_unsupported",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::Migration { version, source } => {
                write!(f, "store migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "store schema version {found} is newer than supported {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use std::error::Error;

    #[test]
    fn migration_failure_names_the_step_and_keeps_its_cause() {
        let err = DbError::Migration {
            version: 2,
            source: rusqlite::Error::InvalidQuery,
        };
        assert_eq!(err.code(), "store_migration_failed");
        assert!(err.to_string().starts_with("store migration 2 failed"));
        assert!(err.source().is_some());
    }

    #[test]
    fn newer_schema_has_no_underlying_cause() {
        let err = DbError::UnsupportedSchemaVersion {
            found: 3,
            supported: 1,
        };
        assert_eq!(err.code(), "store_version_unsupported");
        assert!(err.source().is_none());
    }
}
