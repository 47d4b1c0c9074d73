//! Core data layer for TagNote.
//! This crate owns the note/tag model, its persistence and derived views.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod slot;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::id::{NoteId, TagId};
pub use model::note::{Note, NotePatch, NoteValidationError, ResolvedNote};
pub use model::tag::Tag;
pub use repo::collection::{RepoError, RepoResult};
pub use repo::note_repo::NoteRepository;
pub use repo::tag_repo::TagRepository;
pub use service::notebook::{Notebook, NotebookConfig, TagDeletePolicy, NOTES_SLOT, TAGS_SLOT};
pub use slot::{DurableSlot, MemorySlot, SlotError, SlotResult, SqliteSlot};
pub use view::composer::{filter, resolve, resolve_note, NoteFilter};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
