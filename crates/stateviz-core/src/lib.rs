//! Mutation replay and state reconstruction for StateViz.
//!
//! Given an event log and a cursor, this crate derives the value of any
//! named container at that point, together with the entry that last wrote
//! each piece of it. Every projection is a full, deterministic replay of the
//! log prefix ending at the cursor.
//!
//! # Modules
//!
//! - [`projector`] -- [`project`], the pure fold over a log prefix.
//! - [`cache`] -- [`ProjectionCache`], optional memoization per log identity.
//! - [`session`] -- [`Session`], the caller-owned viewer state (log source,
//!   cursor, container selection).
//! - [`config`] -- Configuration loading from `stateviz.yaml`.
//!
//! # Usage
//!
//! ```
//! use stateviz_core::project;
//! use stateviz_log::EventLog;
//! use stateviz_types::{ContainerValue, Mutation};
//!
//! let log = EventLog::from_entries([
//!     ("a.py:1", vec![Mutation::array_push("arr", 1.0)]),
//!     ("a.py:2", vec![Mutation::array_push("arr", 2.0)]),
//!     ("a.py:3", vec![Mutation::array_pop("arr")]),
//! ]);
//! let cursor = log.last().map(|e| e.id()).unwrap_or_default();
//!
//! let projection = project(&log, "arr", cursor);
//! assert_eq!(
//!     projection.ok().map(|p| p.value),
//!     Some(ContainerValue::Array(vec![1.0]))
//! );
//! ```
//!
//! [`ProjectionCache`]: cache::ProjectionCache
//! [`Session`]: session::Session

pub mod cache;
pub mod config;
pub mod projector;
pub mod session;

pub use cache::ProjectionCache;
pub use projector::{project, replay};
pub use session::{ContainerSelection, ContainerView, LogSource, Session};

use stateviz_types::EntryId;

/// Errors that can occur when replaying a log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectionError {
    /// The cursor names no entry of the log.
    #[error("unknown cursor {cursor}: no such entry in the log")]
    UnknownCursor {
        /// The cursor that was requested.
        cursor: EntryId,
    },
}
