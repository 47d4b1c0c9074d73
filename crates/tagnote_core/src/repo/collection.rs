//! Copy-on-write collection bound to a durable slot.
//!
//! # Invariants
//! - The snapshot only changes after the slot write succeeded.
//! - `revision` increases by one per committed replace.

use crate::model::note::NoteValidationError;
use crate::slot::{DurableSlot, SlotError};
use log::{error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for collection load and persistence.
#[derive(Debug)]
pub enum RepoError {
    /// The slot could not be read or written.
    Persistence { slot: String, source: SlotError },
    /// Stored content does not decode as the expected collection.
    CorruptState {
        slot: String,
        source: serde_json::Error,
    },
    /// The new collection could not be encoded.
    Encode {
        slot: String,
        source: serde_json::Error,
    },
    Validation(NoteValidationError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persistence { slot, source } => {
                write!(f, "persistence failure on slot `{slot}`: {source}")
            }
            Self::CorruptState { slot, source } => {
                write!(f, "corrupt state in slot `{slot}`: {source}")
            }
            Self::Encode { slot, source } => {
                write!(f, "failed to encode collection for slot `{slot}`: {source}")
            }
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence { source, .. } => Some(source),
            Self::CorruptState { source, .. } | Self::Encode { source, .. } => Some(source),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for RepoError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Ordered collection of `T` persisted as one JSON array in a slot.
pub struct SlotCollection<T, S> {
    slot: S,
    items: Vec<T>,
    revision: u64,
}

impl<T, S> SlotCollection<T, S>
where
    T: Serialize + DeserializeOwned,
    S: DurableSlot,
{
    /// Reads and decodes the slot. An absent value yields an empty collection.
    ///
    /// # Errors
    /// - `Persistence` when the slot read fails.
    /// - `CorruptState` when the stored text is not a valid collection.
    pub fn load(slot: S) -> RepoResult<Self> {
        let started_at = Instant::now();
        let raw = slot.read().map_err(|source| {
            error!(
                "event=slot_load module=repo status=error slot={} error_code=slot_read_failed error={}",
                slot.name(),
                source
            );
            RepoError::Persistence {
                slot: slot.name().to_string(),
                source,
            }
        })?;

        let items = match raw {
            None => Vec::new(),
            Some(text) => serde_json::from_str::<Vec<T>>(&text).map_err(|source| {
                error!(
                    "event=slot_load module=repo status=error slot={} error_code=slot_corrupt error={}",
                    slot.name(),
                    source
                );
                RepoError::CorruptState {
                    slot: slot.name().to_string(),
                    source,
                }
            })?,
        };

        info!(
            "event=slot_load module=repo status=ok slot={} items={} duration_ms={}",
            slot.name(),
            items.len(),
            started_at.elapsed().as_millis()
        );
        Ok(Self {
            slot,
            items,
            revision: 0,
        })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Persists `next` as the whole collection, then makes it the snapshot.
    ///
    /// On error the previous snapshot stays in place.
    pub fn commit(&mut self, next: Vec<T>) -> RepoResult<()> {
        let encoded = serde_json::to_string(&next).map_err(|source| RepoError::Encode {
            slot: self.slot.name().to_string(),
            source,
        })?;

        if let Err(source) = self.slot.write(&encoded) {
            error!(
                "event=slot_commit module=repo status=error slot={} error_code=slot_write_failed error={}",
                self.slot.name(),
                source
            );
            return Err(RepoError::Persistence {
                slot: self.slot.name().to_string(),
                source,
            });
        }

        self.items = next;
        self.revision += 1;
        Ok(())
    }

    pub fn into_slot(self) -> S {
        self.slot
    }
}
