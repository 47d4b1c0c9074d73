//! Schema steps for the slot store.
//!
//! Each step is a SQL batch keyed by the `user_version` it produces. Steps
//! newer than the stored version run in order inside one transaction, and
//! `user_version` is bumped after each step so a failure rolls back the
//! whole batch.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, Transaction};

/// `(resulting user_version, sql)`, strictly increasing by version.
const STEPS: &[(u32, &str)] = &[(1, include_str!("0001_slots.sql"))];

/// Highest schema version this build can produce.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |(version, _)| *version)
}

/// Reads the schema version stored in `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Runs every step newer than the stored schema version.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the store is ahead of this build.
/// - `MigrationFailed` naming the first step that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::UnsupportedSchemaVersion { found, supported });
    }

    let pending: Vec<(u32, &str)> = STEPS
        .iter()
        .copied()
        .filter(|(version, _)| *version > found)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in pending {
        if let Err(source) = run_step(&tx, version, sql) {
            error!("event=db_migrate module=db status=error version={version} error={source}");
            return Err(DbError::MigrationFailed { version, source });
        }
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={found} to_version={supported}");
    Ok(())
}

fn run_step(tx: &Transaction<'_>, version: u32, sql: &str) -> rusqlite::Result<()> {
    tx.execute_batch(sql)?;
    tx.pragma_update(None, "user_version", version)
}
