//! Typed IDs for type-safe entity references.
//!
//! Identifiers come from the document store as opaque strings (auth UIDs,
//! document keys), so the wrappers hold a `String` rather than a UUID. Using
//! typed IDs prevents accidentally passing an `ExpenseId` where a `UserId` is
//! expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new random ID from a UUID v7 (time-ordered).
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Returns the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user.");
typed_id!(ExpenseId, "Unique identifier for an expense.");
typed_id!(EventId, "Unique identifier for an event.");
typed_id!(GroupId, "Unique identifier for a group.");
typed_id!(SettlementId, "Unique identifier for a settlement.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = SettlementId::generate();
        let b = SettlementId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_typed_id_display() {
        let id = UserId::from("user1");
        assert_eq!(id.to_string(), "user1");
        assert_eq!(id.into_inner(), "user1");
    }

    #[test]
    fn test_typed_id_serializes_transparently() {
        let id = ExpenseId::from("exp-42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"exp-42\"");

        let parsed: ExpenseId = serde_json::from_str("\"exp-42\"").unwrap();
        assert_eq!(parsed, id);
    }
}
