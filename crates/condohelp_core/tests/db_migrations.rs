use condohelp_core::db::migrations::{apply_migrations, latest_version, pending_versions};
use condohelp_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "help_faqs");
    assert_table_exists(&conn, "help_articles");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("condohelp.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO help_faqs (question, answer) VALUES ('Q', 'A');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM help_faqs;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn partially_migrated_database_is_brought_up_to_date() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(include_str!("../src/db/migrations/0001_help_faqs.sql"))
        .unwrap();
    conn.execute_batch("PRAGMA user_version = 1;").unwrap();
    assert_eq!(pending_versions(&conn).unwrap(), vec![2]);

    apply_migrations(&mut conn).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert!(pending_versions(&conn).unwrap().is_empty());
    assert_table_exists(&conn, "help_articles");
}

#[test]
fn failing_migration_is_named_and_rolled_back() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(include_str!("../src/db/migrations/0001_help_faqs.sql"))
        .unwrap();
    // A legacy articles table without `section_key` breaks the v2 index.
    conn.execute_batch(
        "CREATE TABLE help_articles (id INTEGER PRIMARY KEY, title TEXT NOT NULL);
         PRAGMA user_version = 1;",
    )
    .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    match err {
        DbError::Migration { version, name, .. } => {
            assert_eq!(version, 2);
            assert_eq!(name, "help_articles");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(schema_version(&conn), 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
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
