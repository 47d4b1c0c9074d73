//! Repositories owning the tag and note collections.
//!
//! # Responsibility
//! - Keep one in-memory snapshot per collection, loaded from its slot.
//! - Apply every mutation as a whole-collection replace persisted to the
//!   slot before the snapshot changes.
//!
//! # Invariants
//! - Operations on an unknown id are no-ops reported as `false`.
//! - Slot failures surface as `RepoError::Persistence`; malformed stored
//!   content surfaces as `RepoError::CorruptState`.
//! - Repositories never touch each other's collection.

pub mod collection;
pub mod note_repo;
pub mod tag_repo;
