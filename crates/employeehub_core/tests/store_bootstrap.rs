use employeehub_core::db::migrations::latest_version;
use employeehub_core::db::{open_db, open_db_in_memory, DbError};
use employeehub_core::{KeyValueStore, SqliteKeyValueStore};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn reopening_same_file_is_idempotent_and_keeps_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employeehub.db");

    let store = SqliteKeyValueStore::open(&path).unwrap();
    store.set("employeehub_theme", "dark").unwrap();
    drop(store);

    let reopened = SqliteKeyValueStore::open(&path).unwrap();
    assert_eq!(
        reopened.get("employeehub_theme").unwrap().as_deref(),
        Some("dark")
    );
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sqlite_store_upserts_and_removes() {
    let store = SqliteKeyValueStore::open_in_memory().unwrap();
    store.set("b", "1").unwrap();
    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();

    assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);

    store.remove("b").unwrap();
    store.remove("b").unwrap();
    assert!(store.get("b").unwrap().is_none());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
