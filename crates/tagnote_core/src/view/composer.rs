//! Note/tag join and list filtering.
//!
//! # Responsibility
//! - Resolve note tag ids into full tag objects.
//! - Filter resolved notes by title containment and required tags.
//!
//! # Invariants
//! - Pure functions: no persistence, no caching, same input same output.
//! - Output notes keep input note order; output tags keep tag collection
//!   order, not `tag_ids` order.
//! - Tag ids with no matching tag are skipped, never reported as errors.

use crate::model::id::TagId;
use crate::model::note::{Note, ResolvedNote};
use crate::model::tag::Tag;
use std::collections::HashSet;

/// Resolves every note against `tags`, one output per input note.
pub fn resolve(notes: &[Note], tags: &[Tag]) -> Vec<ResolvedNote> {
    notes.iter().map(|note| resolve_note(note, tags)).collect()
}

/// Resolves a single note against `tags`.
pub fn resolve_note(note: &Note, tags: &[Tag]) -> ResolvedNote {
    // Each wanted id is removed on first match, so neither duplicate
    // `tag_ids` nor duplicate tag records can repeat a tag in the output.
    let mut wanted: HashSet<&TagId> = note.tag_ids.iter().collect();
    let resolved = tags
        .iter()
        .filter(|tag| wanted.remove(&tag.id))
        .cloned()
        .collect();

    ResolvedNote {
        id: note.id.clone(),
        title: note.title.clone(),
        body: note.body.clone(),
        tags: resolved,
    }
}

/// Containment filter for resolved note lists.
///
/// An empty filter matches every note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Case-insensitive substring the note title must contain.
    pub title: String,
    /// Tags that must all be present on the note.
    pub tag_ids: Vec<TagId>,
}

impl NoteFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_tag(mut self, tag_id: impl Into<TagId>) -> Self {
        self.tag_ids.push(tag_id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.tag_ids.is_empty()
    }

    pub fn matches(&self, note: &ResolvedNote) -> bool {
        let title_matches = self.title.is_empty()
            || note
                .title
                .to_lowercase()
                .contains(&self.title.to_lowercase());
        title_matches && self.tag_ids.iter().all(|tag_id| note.has_tag(tag_id))
    }
}

/// Keeps the notes matched by `filter`, preserving order.
pub fn filter(mut notes: Vec<ResolvedNote>, filter: &NoteFilter) -> Vec<ResolvedNote> {
    if !filter.is_empty() {
        notes.retain(|note| filter.matches(note));
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::{filter, resolve, resolve_note, NoteFilter};
    use crate::model::id::{NoteId, TagId};
    use crate::model::note::Note;
    use crate::model::tag::Tag;

    fn note(id: &str, title: &str, tag_ids: &[&str]) -> Note {
        Note {
            id: NoteId::from(id),
            title: title.to_string(),
            body: String::new(),
            tag_ids: tag_ids.iter().map(|id| TagId::from(*id)).collect(),
        }
    }

    fn tags() -> Vec<Tag> {
        vec![
            Tag::with_id("t1", "work"),
            Tag::with_id("t2", "home"),
            Tag::with_id("t3", "ideas"),
        ]
    }

    #[test]
    fn resolved_tags_follow_tag_collection_order() {
        let resolved = resolve_note(&note("n1", "Plan", &["t3", "t1"]), &tags());
        let labels: Vec<&str> = resolved
            .tags
            .iter()
            .map(|tag| tag.label.as_str())
            .collect();
        assert_eq!(labels, vec!["work", "ideas"]);
    }

    #[test]
    fn duplicate_and_stale_ids_are_collapsed_and_skipped() {
        let resolved = resolve_note(&note("n1", "Plan", &["t2", "gone", "t2"]), &tags());
        assert_eq!(resolved.tags, vec![Tag::with_id("t2", "home")]);
    }

    #[test]
    fn resolve_keeps_note_order_and_is_idempotent() {
        let notes = vec![note("n2", "B", &[]), note("n1", "A", &["t1"])];
        let first = resolve(&notes, &tags());
        let second = resolve(&notes, &tags());

        assert_eq!(first, second);
        assert_eq!(first[0].id, NoteId::from("n2"));
        assert_eq!(first[1].id, NoteId::from("n1"));
    }

    #[test]
    fn filter_matches_title_substring_case_insensitively() {
        let notes = resolve(
            &[note("n1", "Weekly Plan", &[]), note("n2", "Groceries", &[])],
            &tags(),
        );
        let kept = filter(notes, &NoteFilter::new().with_title("plan"));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, NoteId::from("n1"));
    }

    #[test]
    fn filter_requires_every_selected_tag() {
        let notes = resolve(
            &[
                note("n1", "A", &["t1", "t2"]),
                note("n2", "B", &["t1"]),
                note("n3", "C", &["t1", "t2", "gone"]),
            ],
            &tags(),
        );
        let kept = filter(notes, &NoteFilter::new().with_tag("t1").with_tag("t2"));
        let ids: Vec<&str> = kept.iter().map(|note| note.id.as_str()).collect();
        assert_eq!(ids, vec!["n1", "n3"]);
    }

    #[test]
    fn filter_on_deleted_tag_matches_nothing() {
        let notes = resolve(&[note("n1", "A", &["gone"])], &tags());
        assert!(filter(notes, &NoteFilter::new().with_tag("gone")).is_empty());
    }
}
