//! Note domain model and note-derived projections.
//!
//! # Responsibility
//! - Define the persisted `Note` record and its wire naming.
//! - Define `NotePatch`, the only input shape for note create/update.
//! - Define `ResolvedNote`, the read-only note view with full tag objects.
//!
//! # Invariants
//! - `id` is fixed for the lifetime of a note.
//! - `title` must be non-blank for every note written by core.
//! - `tag_ids` produced from a patch keep first occurrence order and never
//!   contain duplicates.

use crate::model::id::{NoteId, TagId};
use crate::model::tag::Tag;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Persisted note record.
///
/// Wire shape: `{"id", "title", "markdown", "tagIds"}`. The body field is
/// stored under `markdown` to stay compatible with existing note slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    #[serde(rename = "markdown")]
    pub body: String,
    /// Referenced tag ids. Entries may dangle after a tag deletion.
    #[serde(rename = "tagIds")]
    pub tag_ids: Vec<TagId>,
}

impl Note {
    /// Builds a new note record with a freshly generated id.
    pub fn from_patch(patch: &NotePatch) -> Self {
        Self {
            id: NoteId::generate(),
            title: patch.title.clone(),
            body: patch.body.clone(),
            tag_ids: patch.tag_ids(),
        }
    }

    /// Returns a copy of this note with `title`, `body` and `tag_ids` fully
    /// replaced by `patch`. The id is preserved.
    pub fn patched(&self, patch: &NotePatch) -> Self {
        Self {
            id: self.id.clone(),
            title: patch.title.clone(),
            body: patch.body.clone(),
            tag_ids: patch.tag_ids(),
        }
    }

    pub fn references_tag(&self, tag_id: &TagId) -> bool {
        self.tag_ids.contains(tag_id)
    }
}

/// Validation failures for note input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title is empty after trimming whitespace.
    EmptyTitle,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be blank"),
        }
    }
}

impl Error for NoteValidationError {}

/// Replacement payload for note create and update.
///
/// Carries exactly the user-editable fields. Applying a patch replaces all
/// three as a bundle; there is no field-by-field merge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotePatch {
    pub title: String,
    pub body: String,
    /// Selected tags. Only their ids are persisted.
    pub tags: Vec<Tag>,
}

impl NotePatch {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Checks the patch against the note model.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is blank.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Returns the selected tag ids, deduplicated in first-seen order.
    pub fn tag_ids(&self) -> Vec<TagId> {
        let mut seen = HashSet::new();
        let mut ids = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            if seen.insert(&tag.id) {
                ids.push(tag.id.clone());
            }
        }
        ids
    }
}

/// Read-only note view with tag ids replaced by current tag objects.
///
/// Never persisted. Tags missing from the tag collection are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedNote {
    pub id: NoteId,
    pub title: String,
    #[serde(rename = "markdown")]
    pub body: String,
    pub tags: Vec<Tag>,
}

impl ResolvedNote {
    pub fn has_tag(&self, tag_id: &TagId) -> bool {
        self.tags.iter().any(|tag| &tag.id == tag_id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NotePatch, NoteValidationError};
    use crate::model::tag::Tag;

    #[test]
    fn patch_tag_ids_drop_duplicates_and_keep_first_order() {
        let work = Tag::with_id("t1", "work");
        let home = Tag::with_id("t2", "home");
        let tags = vec![home.clone(), work.clone(), home.clone()];
        let patch = NotePatch::new("Plan", "...").with_tags(tags);

        let ids = patch.tag_ids();
        assert_eq!(ids, vec![home.id, work.id]);
    }

    #[test]
    fn validate_rejects_blank_title() {
        let patch = NotePatch::new("   ", "body");
        assert_eq!(patch.validate(), Err(NoteValidationError::EmptyTitle));
        assert!(NotePatch::new("ok", "").validate().is_ok());
    }

    #[test]
    fn patched_replaces_fields_and_keeps_id() {
        let original = Note::from_patch(
            &NotePatch::new("Old", "old body").with_tags(vec![Tag::with_id("t1", "work")]),
        );
        let updated = original.patched(&NotePatch::new("New", "body"));

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.title, "New");
        assert_eq!(updated.body, "body");
        assert!(updated.tag_ids.is_empty());
    }

    #[test]
    fn note_serializes_with_stored_field_names() {
        let note = Note::from_patch(
            &NotePatch::new("Plan", "# body").with_tags(vec![Tag::with_id("t1", "work")]),
        );
        let json = serde_json::to_value(&note).unwrap();

        assert_eq!(json["id"], note.id.as_str());
        assert_eq!(json["title"], "Plan");
        assert_eq!(json["markdown"], "# body");
        assert_eq!(json["tagIds"], serde_json::json!(["t1"]));
        assert!(json.get("body").is_none());
    }
}
