//! Tag repository over a durable slot.
//!
//! # Responsibility
//! - Own the tag collection: create, insert, rename, delete.
//!
//! # Invariants
//! - No two tags share an id.
//! - Rename keeps both id and position.
//! - Delete never touches note references; cascading is decided by the
//!   caller (see `TagDeletePolicy`).

use crate::model::id::TagId;
use crate::model::tag::Tag;
use crate::repo::collection::{RepoResult, SlotCollection};
use crate::slot::DurableSlot;
use log::{debug, info};

/// Repository owning the tag collection and its slot.
pub struct TagRepository<S: DurableSlot> {
    tags: SlotCollection<Tag, S>,
}

impl<S: DurableSlot> TagRepository<S> {
    /// Loads the tag collection from `slot`.
    pub fn load(slot: S) -> RepoResult<Self> {
        Ok(Self {
            tags: SlotCollection::load(slot)?,
        })
    }

    /// Creates a tag with a fresh id, appends it and persists.
    pub fn create(&mut self, label: impl Into<String>) -> RepoResult<Tag> {
        let tag = Tag::new(label);
        self.append(tag.clone())?;
        info!("event=tag_create module=repo status=ok tag_id={}", tag.id);
        Ok(tag)
    }

    /// Appends a tag built by the caller.
    ///
    /// Returns `false` and leaves the collection unchanged when a tag with
    /// the same id already exists.
    pub fn insert(&mut self, tag: Tag) -> RepoResult<bool> {
        if self.contains(&tag.id) {
            debug!(
                "event=tag_insert module=repo status=noop reason=duplicate_id tag_id={}",
                tag.id
            );
            return Ok(false);
        }
        let tag_id = tag.id.clone();
        self.append(tag)?;
        info!("event=tag_insert module=repo status=ok tag_id={tag_id}");
        Ok(true)
    }

    /// Replaces the label of the tag with `id`.
    ///
    /// Returns `false` without writing when no such tag exists.
    pub fn rename(&mut self, id: &TagId, label: impl Into<String>) -> RepoResult<bool> {
        if !self.contains(id) {
            debug!("event=tag_rename module=repo status=noop tag_id={id}");
            return Ok(false);
        }

        let label = label.into();
        let next = self
            .tags
            .items()
            .iter()
            .map(|tag| {
                if &tag.id == id {
                    tag.relabeled(label.as_str())
                } else {
                    tag.clone()
                }
            })
            .collect();
        self.tags.commit(next)?;
        info!("event=tag_rename module=repo status=ok tag_id={id}");
        Ok(true)
    }

    /// Removes the tag with `id`.
    ///
    /// Returns `false` without writing when no such tag exists. Notes that
    /// reference the tag keep the dangling id.
    pub fn delete(&mut self, id: &TagId) -> RepoResult<bool> {
        if !self.contains(id) {
            debug!("event=tag_delete module=repo status=noop tag_id={id}");
            return Ok(false);
        }

        let next = self
            .tags
            .items()
            .iter()
            .filter(|tag| &tag.id != id)
            .cloned()
            .collect();
        self.tags.commit(next)?;
        info!("event=tag_delete module=repo status=ok tag_id={id}");
        Ok(true)
    }

    pub fn get(&self, id: &TagId) -> Option<&Tag> {
        self.tags.items().iter().find(|tag| &tag.id == id)
    }

    pub fn contains(&self, id: &TagId) -> bool {
        self.get(id).is_some()
    }

    /// Current tag snapshot in insertion order.
    pub fn list(&self) -> &[Tag] {
        self.tags.items()
    }

    /// Number of committed mutations since load.
    pub fn revision(&self) -> u64 {
        self.tags.revision()
    }

    /// Releases the slot, e.g. to reload it in another repository.
    pub fn into_slot(self) -> S {
        self.tags.into_slot()
    }

    fn append(&mut self, tag: Tag) -> RepoResult<()> {
        let mut next = Vec::with_capacity(self.tags.items().len() + 1);
        next.extend_from_slice(self.tags.items());
        next.push(tag);
        self.tags.commit(next)
    }
}
