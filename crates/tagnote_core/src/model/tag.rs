//! Tag domain model.
//!
//! # Invariants
//! - `id` is fixed for the lifetime of a tag; only `label` changes.
//! - Labels are free-form and need not be unique or non-empty.

use crate::model::id::TagId;
use serde::{Deserialize, Serialize};

/// Reusable label that notes reference by id.
///
/// Wire shape: `{"id": string, "label": string}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub label: String,
}

impl Tag {
    /// Creates a tag with a freshly generated id.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_id(TagId::generate(), label)
    }

    /// Creates a tag with a caller-provided id.
    ///
    /// Used when the id was generated outside core, e.g. by a form that
    /// creates a tag and selects it before the tag is stored.
    pub fn with_id(id: impl Into<TagId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Returns a copy of this tag carrying `label`.
    pub fn relabeled(&self, label: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            label: label.into(),
        }
    }
}
