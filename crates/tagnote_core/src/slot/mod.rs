//! Durable slot abstraction and implementations.
//!
//! # Responsibility
//! - Define the storage contract repositories persist their collection to.
//! - Provide in-memory and SQLite-backed slots.
//!
//! # Invariants
//! - A slot holds at most one serialized value.
//! - `write` replaces the whole value; partial writes are never observable.
//! - An absent value is reported as `Ok(None)`, never as an error.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemorySlot;
pub use sqlite::SqliteSlot;

pub type SlotResult<T> = Result<T, SlotError>;

/// Storage failure raised by a slot implementation.
#[derive(Debug)]
pub enum SlotError {
    Sqlite(rusqlite::Error),
    /// The backing store lacks a table the slot needs.
    MissingRequiredTable(&'static str),
    /// The slot cannot be reached, e.g. quota exceeded or storage offline.
    Unavailable(String),
}

impl Display for SlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "slot store is missing required table `{table}`")
            }
            Self::Unavailable(message) => write!(f, "slot unavailable: {message}"),
        }
    }
}

impl Error for SlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for SlotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Named persistent container holding one serialized value.
///
/// Implementations only move opaque text; encoding is owned by the
/// repository layer.
pub trait DurableSlot {
    /// Slot name, used for diagnostics and as the storage key.
    fn name(&self) -> &str;
    /// Reads the whole stored value, or `None` when nothing was written yet.
    fn read(&self) -> SlotResult<Option<String>>;
    /// Replaces the whole stored value.
    fn write(&mut self, value: &str) -> SlotResult<()>;
}
