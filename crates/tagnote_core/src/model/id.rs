//! Opaque identifiers shared by tags and notes.
//!
//! Fresh identifiers are random UUID v4 values rendered as hyphenated
//! lowercase strings. Identifiers loaded from storage or supplied by a caller
//! are kept verbatim; core code only compares them for equality.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh identifier that is practically unique across
            /// process restarts.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Stable identifier of a [`Tag`](crate::model::tag::Tag).
    TagId
);

opaque_id!(
    /// Stable identifier of a [`Note`](crate::model::note::Note).
    NoteId
);

#[cfg(test)]
mod tests {
    use super::{NoteId, TagId};
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_hyphenated_uuid_strings() {
        let id = TagId::generate();
        assert_eq!(id.as_str().len(), 36);
        assert_eq!(id.as_str().matches('-').count(), 4);
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn generated_ids_do_not_repeat() {
        let ids: HashSet<NoteId> = (0..500).map(|_| NoteId::generate()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn caller_supplied_ids_are_kept_verbatim() {
        let id = TagId::from("t1");
        assert_eq!(id.to_string(), "t1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"t1\"");
    }
}
