//! SQLite-backed slot over the `slots` table.
//!
//! # Invariants
//! - One row per slot name; `write` is a single upsert statement.
//! - The connection must be migrated (see `db::open_db`) before use.

use super::{DurableSlot, SlotError, SlotResult};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};

const SLOTS_TABLE: &str = "slots";

/// Slot stored as one row of the `slots` table.
///
/// Several slots can share one connection; each borrows it immutably.
pub struct SqliteSlot<'conn> {
    conn: &'conn Connection,
    name: String,
}

impl<'conn> SqliteSlot<'conn> {
    /// Binds a slot name to a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when the `slots` table does not exist.
    pub fn try_new(conn: &'conn Connection, name: impl Into<String>) -> SlotResult<Self> {
        if !table_exists(conn, SLOTS_TABLE)? {
            return Err(SlotError::MissingRequiredTable(SLOTS_TABLE));
        }
        Ok(Self {
            conn,
            name: name.into(),
        })
    }
}

impl DurableSlot for SqliteSlot<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> SlotResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE name = ?1;",
                [self.name.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, value: &str) -> SlotResult<()> {
        let result = self.conn.execute(
            "INSERT INTO slots (name, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(name) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.name.as_str(), value],
        );

        match result {
            Ok(_) => {
                debug!(
                    "event=slot_write module=slot status=ok slot={} bytes={}",
                    self.name,
                    value.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=slot_write module=slot status=error slot={} error_code=slot_write_failed error={}",
                    self.name,
                    err
                );
                Err(err.into())
            }
        }
    }
}

fn table_exists(conn: &Connection, table: &str) -> SlotResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
