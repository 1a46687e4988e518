use projboard_core::db::migrations::latest_version;
use projboard_core::db::{open_db, open_db_in_memory, open_db_with, DbError, StoreConfig};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "project");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projboard.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "project");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let config = StoreConfig {
        erase_on_schema_mismatch: false,
        ..StoreConfig::default()
    };
    let err = open_db_with(&path, &config).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn schema_mismatch_erases_and_recreates_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stale.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE leftover (id INTEGER PRIMARY KEY);
         PRAGMA user_version = 999;",
    )
    .unwrap();
    drop(conn);

    let config = StoreConfig {
        erase_on_schema_mismatch: true,
        ..StoreConfig::default()
    };
    let conn = open_db_with(&path, &config).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "project");

    let leftover_exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'leftover'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(leftover_exists, 0, "stale database content must be gone");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
