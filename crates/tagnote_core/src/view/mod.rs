//! Derived, read-only views over the note and tag collections.

pub mod composer;
