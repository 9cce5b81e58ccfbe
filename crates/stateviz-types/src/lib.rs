//! Shared type definitions for the StateViz replay engine.
//!
//! This crate is the single source of truth for the types that flow between
//! the event log, the projector and any front end. Types defined here flow
//! downstream to `TypeScript` via `ts-rs` for a browser viewer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entry and log identifiers
//! - [`enums`] -- Mutation event kinds and container kinds
//! - [`mutation`] -- The [`Mutation`] record
//! - [`container`] -- Reconstructed values, provenance and projections

pub mod container;
pub mod enums;
pub mod ids;
pub mod mutation;

// Re-export all public types at crate root for convenience.
pub use container::{ContainerValue, Projection, Provenance, ProvenanceKey};
pub use enums::{ContainerKind, MutationKind};
pub use ids::{EntryId, LogId};
pub use mutation::Mutation;
