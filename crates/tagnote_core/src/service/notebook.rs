//! Notebook facade over the tag and note repositories.
//!
//! # Responsibility
//! - Expose the note/tag operations presentation code calls.
//! - Compose the resolved note view from the latest snapshots.
//! - Decide whether tag deletion cascades into note references.
//!
//! # Invariants
//! - One notebook owns exactly one tag and one note repository.
//! - Each repository write is atomic on its own; a cascading tag delete is
//!   two independent writes with no combined rollback.

use crate::model::id::{NoteId, TagId};
use crate::model::note::{Note, NotePatch, ResolvedNote};
use crate::model::tag::Tag;
use crate::repo::collection::{RepoError, RepoResult};
use crate::repo::note_repo::NoteRepository;
use crate::repo::tag_repo::TagRepository;
use crate::slot::{DurableSlot, MemorySlot, SqliteSlot};
use crate::view::composer::{self, NoteFilter};
use log::info;
use rusqlite::Connection;

/// Slot name holding the note collection.
pub const NOTES_SLOT: &str = "NOTES";
/// Slot name holding the tag collection.
pub const TAGS_SLOT: &str = "TAGS";

/// What happens to note references when a tag is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagDeletePolicy {
    /// Notes keep the dangling id; the resolved view hides it.
    #[default]
    RetainReferences,
    /// The id is also removed from every note that references it.
    DetachFromNotes,
}

impl TagDeletePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RetainReferences => "retain_references",
            Self::DetachFromNotes => "detach_from_notes",
        }
    }
}

/// Notebook-level settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotebookConfig {
    pub tag_delete_policy: TagDeletePolicy,
}

/// Owner of the note and tag collections.
pub struct Notebook<S: DurableSlot> {
    notes: NoteRepository<S>,
    tags: TagRepository<S>,
    config: NotebookConfig,
}

impl<'conn> Notebook<SqliteSlot<'conn>> {
    /// Opens the `NOTES` and `TAGS` slots on a migrated connection.
    pub fn open(conn: &'conn Connection, config: NotebookConfig) -> RepoResult<Self> {
        let notes_slot = sqlite_slot(conn, NOTES_SLOT)?;
        let tags_slot = sqlite_slot(conn, TAGS_SLOT)?;
        Self::from_slots(notes_slot, tags_slot, config)
    }
}

impl Notebook<MemorySlot> {
    /// Creates an empty notebook that lives only in memory.
    pub fn in_memory(config: NotebookConfig) -> RepoResult<Self> {
        Self::from_slots(
            MemorySlot::new(NOTES_SLOT),
            MemorySlot::new(TAGS_SLOT),
            config,
        )
    }
}

impl<S: DurableSlot> Notebook<S> {
    /// Loads both collections from their slots.
    ///
    /// # Errors
    /// - `Persistence` when a slot cannot be read.
    /// - `CorruptState` when a slot holds malformed content.
    pub fn from_slots(notes_slot: S, tags_slot: S, config: NotebookConfig) -> RepoResult<Self> {
        let tags = TagRepository::load(tags_slot)?;
        let notes = NoteRepository::load(notes_slot)?;
        info!(
            "event=notebook_open module=service status=ok notes={} tags={} tag_delete_policy={}",
            notes.list().len(),
            tags.list().len(),
            config.tag_delete_policy.as_str()
        );
        Ok(Self {
            notes,
            tags,
            config,
        })
    }

    pub fn create_note(&mut self, patch: &NotePatch) -> RepoResult<Note> {
        self.notes.create(patch)
    }

    /// Fully replaces title, body and tags. Returns `false` for unknown ids.
    pub fn update_note(&mut self, id: &NoteId, patch: &NotePatch) -> RepoResult<bool> {
        self.notes.update(id, patch)
    }

    pub fn delete_note(&mut self, id: &NoteId) -> RepoResult<bool> {
        self.notes.delete(id)
    }

    /// Returns one note with its tags resolved against the current tags.
    pub fn get_note(&self, id: &NoteId) -> Option<ResolvedNote> {
        self.notes
            .get(id)
            .map(|note| composer::resolve_note(note, self.tags.list()))
    }

    pub fn create_tag(&mut self, label: impl Into<String>) -> RepoResult<Tag> {
        self.tags.create(label)
    }

    /// Stores a tag whose id was generated by the caller.
    pub fn add_tag(&mut self, tag: Tag) -> RepoResult<bool> {
        self.tags.insert(tag)
    }

    pub fn rename_tag(&mut self, id: &TagId, label: impl Into<String>) -> RepoResult<bool> {
        self.tags.rename(id, label)
    }

    /// Deletes a tag and applies the configured cascade policy.
    ///
    /// With `DetachFromNotes`, stale references to `id` are removed from
    /// notes even when the tag itself was already gone.
    pub fn delete_tag(&mut self, id: &TagId) -> RepoResult<bool> {
        let deleted = self.tags.delete(id)?;
        if self.config.tag_delete_policy == TagDeletePolicy::DetachFromNotes {
            self.notes.detach_tag(id)?;
        }
        Ok(deleted)
    }

    pub fn tags(&self) -> &[Tag] {
        self.tags.list()
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.list()
    }

    /// Joins every note with the current tags, in note order.
    pub fn list_resolved_notes(&self) -> Vec<ResolvedNote> {
        composer::resolve(self.notes.list(), self.tags.list())
    }

    pub fn filter_resolved_notes(&self, filter: &NoteFilter) -> Vec<ResolvedNote> {
        composer::filter(self.list_resolved_notes(), filter)
    }

    /// Pair of repository revisions; changes whenever either collection does.
    pub fn revision(&self) -> (u64, u64) {
        (self.notes.revision(), self.tags.revision())
    }

    pub fn tag_repository(&self) -> &TagRepository<S> {
        &self.tags
    }

    /// Releases `(notes_slot, tags_slot)`.
    pub fn into_slots(self) -> (S, S) {
        (self.notes.into_slot(), self.tags.into_slot())
    }
}

fn sqlite_slot<'conn>(conn: &'conn Connection, name: &str) -> RepoResult<SqliteSlot<'conn>> {
    SqliteSlot::try_new(conn, name).map_err(|source| RepoError::Persistence {
        slot: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{Notebook, NotebookConfig, TagDeletePolicy};
    use crate::model::note::NotePatch;

    #[test]
    fn default_policy_retains_references() {
        assert_eq!(
            NotebookConfig::default().tag_delete_policy,
            TagDeletePolicy::RetainReferences
        );
    }

    #[test]
    fn revision_moves_when_either_collection_changes() {
        let mut notebook = Notebook::in_memory(NotebookConfig::default()).unwrap();
        let start = notebook.revision();

        let tag = notebook.create_tag("work").unwrap();
        let after_tag = notebook.revision();
        assert_ne!(after_tag, start);

        notebook
            .create_note(&NotePatch::new("Plan", "").with_tags(vec![tag]))
            .unwrap();
        assert_ne!(notebook.revision(), after_tag);
    }
}
