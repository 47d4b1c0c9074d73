//! Domain model for notes, tags and the resolved note view.
//!
//! # Responsibility
//! - Define the persisted `Note` and `Tag` records and their identifiers.
//! - Define the `NotePatch` input object and the derived `ResolvedNote`.
//!
//! # Invariants
//! - Identifiers are opaque strings, never reinterpreted by core logic.
//! - `Note::tag_ids` written by core never contains duplicates.

pub mod id;
pub mod note;
pub mod tag;
