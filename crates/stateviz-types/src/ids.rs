//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Entries and logs each get a strongly-typed ID so a cursor can never be
//! confused with a log identity. All IDs use UUID v7 (time-ordered), which
//! keeps freshly ingested entries sortable in ingestion order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an entry (one recorded location) in an event log.
    ///
    /// Cursors are expressed as entry IDs, so inserting or removing other
    /// entries never shifts what an existing cursor points at.
    EntryId
}

define_id! {
    /// Identity of one built event log.
    ///
    /// Every call that builds a log assigns a fresh `LogId`; caches key on it
    /// to notice that the log they were filled from has been replaced.
    LogId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let entry = EntryId::new();
        let log = LogId::new();
        // These are different types -- the compiler enforces no mixing.
        assert_ne!(entry.into_inner(), Uuid::nil());
        assert_ne!(log.into_inner(), Uuid::nil());
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = EntryId::new();
        let b = EntryId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = EntryId::new();
        let json = serde_json::to_string(&original).ok();
        assert!(json.is_some());
        let restored: Result<EntryId, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(original));
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = EntryId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }
}
