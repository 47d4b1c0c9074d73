//! Note repository over a durable slot.
//!
//! # Responsibility
//! - Own the note collection: create, full-replace update, delete.
//! - Provide the tag-detach write used by the cascade policy point.
//!
//! # Invariants
//! - Every write validates the patch before touching the slot.
//! - Update preserves id and position; other notes are untouched.
//! - Tag ids are stored as given; existence is not checked here.

use crate::model::id::{NoteId, TagId};
use crate::model::note::{Note, NotePatch};
use crate::repo::collection::{RepoResult, SlotCollection};
use crate::slot::DurableSlot;
use log::{debug, info};

/// Repository owning the note collection and its slot.
pub struct NoteRepository<S: DurableSlot> {
    notes: SlotCollection<Note, S>,
}

impl<S: DurableSlot> NoteRepository<S> {
    /// Loads the note collection from `slot`.
    pub fn load(slot: S) -> RepoResult<Self> {
        Ok(Self {
            notes: SlotCollection::load(slot)?,
        })
    }

    /// Stores a new note built from `patch` and returns it.
    ///
    /// # Errors
    /// - `Validation` when the patch title is blank.
    /// - `Persistence` when the slot write fails.
    pub fn create(&mut self, patch: &NotePatch) -> RepoResult<Note> {
        patch.validate()?;
        let note = Note::from_patch(patch);

        let mut next = Vec::with_capacity(self.notes.items().len() + 1);
        next.extend_from_slice(self.notes.items());
        next.push(note.clone());
        self.notes.commit(next)?;

        info!(
            "event=note_create module=repo status=ok note_id={} tag_count={}",
            note.id,
            note.tag_ids.len()
        );
        Ok(note)
    }

    /// Replaces `title`, `body` and tag ids of the note with `id`.
    ///
    /// Returns `false` without writing when no such note exists.
    pub fn update(&mut self, id: &NoteId, patch: &NotePatch) -> RepoResult<bool> {
        patch.validate()?;
        if !self.contains(id) {
            debug!("event=note_update module=repo status=noop note_id={id}");
            return Ok(false);
        }

        let next = self
            .notes
            .items()
            .iter()
            .map(|note| {
                if &note.id == id {
                    note.patched(patch)
                } else {
                    note.clone()
                }
            })
            .collect();
        self.notes.commit(next)?;
        info!("event=note_update module=repo status=ok note_id={id}");
        Ok(true)
    }

    /// Removes the note with `id`. Returns `false` when it was absent.
    pub fn delete(&mut self, id: &NoteId) -> RepoResult<bool> {
        if !self.contains(id) {
            debug!("event=note_delete module=repo status=noop note_id={id}");
            return Ok(false);
        }

        let next = self
            .notes
            .items()
            .iter()
            .filter(|note| &note.id != id)
            .cloned()
            .collect();
        self.notes.commit(next)?;
        info!("event=note_delete module=repo status=ok note_id={id}");
        Ok(true)
    }

    /// Drops `tag_id` from every note referencing it, in one write.
    ///
    /// Returns how many notes changed; nothing is written when none did.
    pub fn detach_tag(&mut self, tag_id: &TagId) -> RepoResult<usize> {
        let affected = self
            .notes
            .items()
            .iter()
            .filter(|note| note.references_tag(tag_id))
            .count();
        if affected == 0 {
            return Ok(0);
        }

        let next = self
            .notes
            .items()
            .iter()
            .map(|note| {
                let mut note = note.clone();
                note.tag_ids.retain(|id| id != tag_id);
                note
            })
            .collect();
        self.notes.commit(next)?;
        info!("event=note_detach_tag module=repo status=ok tag_id={tag_id} affected={affected}");
        Ok(affected)
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.items().iter().find(|note| &note.id == id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.get(id).is_some()
    }

    /// Current note snapshot in insertion order.
    pub fn list(&self) -> &[Note] {
        self.notes.items()
    }

    /// Number of committed mutations since load.
    pub fn revision(&self) -> u64 {
        self.notes.revision()
    }

    pub fn into_slot(self) -> S {
        self.notes.into_slot()
    }
}
