//! Event log, mutation validation and cursor navigation for StateViz.
//!
//! A log is an ordered list of entries, one per recorded execution point
//! ("location"), each carrying the mutations applied there. Logs are built
//! once and never edited; replay reads them front to back.
//!
//! # Architecture
//!
//! - [`raw`] -- Untrusted wire records ([`RawEntry`], [`RawMutation`]).
//! - [`validate`] -- Field checks turning raw records into typed mutations.
//! - [`log`] -- The [`EventLog`] and its [`Entry`] values.
//! - [`cursor`] -- Clamped next/previous navigation over entry ids.
//! - [`example`] -- The built-in example log shown before a user loads one.
//!
//! # Validation
//!
//! Every mutation kind has a fixed set of required fields:
//!
//! | Kind | Required fields |
//! |------|-----------------|
//! | `SET_ADD`, `SET_DELETE` | name, key |
//! | `DICT_SET` | name, key, value |
//! | `DICT_DELETE` | name, key |
//! | `ARRAY_PUSH` | name, value (number) |
//! | `ARRAY_POP`, `VAR_DELETE` | name |
//! | `VAR_SET` | name, value |
//!
//! A record that violates its row is rejected with
//! [`LogError::MalformedMutation`] when the log is built. Replay never sees
//! a malformed mutation.
//!
//! # Usage
//!
//! ```
//! use stateviz_log::{EventLog, cursor};
//! use stateviz_types::Mutation;
//!
//! let log = EventLog::from_entries([
//!     ("a.py:1", vec![Mutation::set_add("seen", "a")]),
//!     ("a.py:2", vec![Mutation::set_delete("seen", "a")]),
//! ]);
//!
//! let first = cursor::next(&log, None);
//! assert_eq!(first, log.first().map(|e| e.id()));
//! assert_eq!(log.container_names(), vec!["seen"]);
//! ```

pub mod cursor;
pub mod example;
pub mod log;
pub mod raw;
pub mod validate;

// Re-export primary types at crate root.
pub use log::{Entry, EventLog};
pub use raw::{RawEntry, RawMutation};
pub use validate::MutationFault;

use stateviz_types::EntryId;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when building an event log.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// A mutation's fields do not satisfy its declared kind.
    #[error("malformed mutation {mutation} in entry {entry}: {fault}")]
    MalformedMutation {
        /// Zero-based position of the entry in the input.
        entry: usize,
        /// Zero-based position of the mutation inside the entry.
        mutation: usize,
        /// What is wrong with it.
        fault: MutationFault,
    },

    /// Two entries handed to the log share an id.
    #[error("duplicate entry id {id}")]
    DuplicateEntryId {
        /// The repeated id.
        id: EntryId,
    },
}
