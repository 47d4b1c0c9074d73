use rusqlite::{params, Connection};
use tagnote_core::db::migrations::{latest_version, schema_version};
use tagnote_core::db::{open_db, open_db_in_memory, DbError};
use tagnote_core::{DurableSlot, SqliteSlot};

// 2020-09-13, well before any test run.
const EPOCH_MS_FLOOR: i64 = 1_600_000_000_000;

fn slot_row(conn: &Connection, name: &str) -> (String, i64, String) {
    conn.query_row(
        "SELECT value, updated_at, typeof(updated_at) FROM slots WHERE name = ?1;",
        [name],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )
    .unwrap()
}

fn insert_raw(conn: &Connection, name: &str, value: &str) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO slots (name, value) VALUES (?1, ?2);",
        params![name, value],
    )
}

#[test]
fn newer_schema_version_is_rejected_without_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
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

    let conn = Connection::open(&path).unwrap();
    let slot_tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE name = 'slots';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(slot_tables, 0);
}

#[test]
fn reopening_a_file_keeps_slot_values_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tagnote.sqlite3");
    {
        let conn = open_db(&path).unwrap();
        let mut slot = SqliteSlot::try_new(&conn, "TAGS").unwrap();
        slot.write("[]").unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_eq!(slot_row(&conn, "TAGS").0, "[]");
}

#[test]
fn slot_name_is_unique_outside_the_upsert() {
    let conn = open_db_in_memory().unwrap();
    insert_raw(&conn, "NOTES", "[]").unwrap();

    assert!(insert_raw(&conn, "NOTES", "[1]").is_err());
    assert_eq!(slot_row(&conn, "NOTES").0, "[]");
}

#[test]
fn slot_value_is_required() {
    let conn = open_db_in_memory().unwrap();
    let missing_value = conn.execute("INSERT INTO slots (name) VALUES ('NOTES');", []);
    assert!(missing_value.is_err());
}

#[test]
fn slot_write_stamps_integer_epoch_millis() {
    let conn = open_db_in_memory().unwrap();
    let mut slot = SqliteSlot::try_new(&conn, "NOTES").unwrap();
    slot.write("[]").unwrap();

    let (_, updated_at, kind) = slot_row(&conn, "NOTES");
    assert_eq!(kind, "integer");
    assert!(updated_at > EPOCH_MS_FLOOR, "not epoch ms: {updated_at}");
}

#[test]
fn rewriting_a_slot_replaces_value_and_advances_timestamp() {
    let conn = open_db_in_memory().unwrap();
    let mut slot = SqliteSlot::try_new(&conn, "TAGS").unwrap();
    slot.write("[1]").unwrap();
    // Pin the first stamp in the past so the second write must move it.
    conn.execute(
        "UPDATE slots SET updated_at = ?1 WHERE name = 'TAGS';",
        [EPOCH_MS_FLOOR],
    )
    .unwrap();

    slot.write("[2]").unwrap();

    let (value, updated_at, _) = slot_row(&conn, "TAGS");
    assert_eq!(value, "[2]");
    assert!(updated_at > EPOCH_MS_FLOOR);
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM slots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}
