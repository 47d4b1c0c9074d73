//! Collaborator-facing services.
//!
//! # Responsibility
//! - Combine both repositories behind one owner constructed at startup.
//! - Hold cross-collection policy (tag deletion cascade).

pub mod notebook;
