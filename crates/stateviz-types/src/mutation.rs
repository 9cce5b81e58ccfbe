//! The [`Mutation`] record: one atomic, typed change to one named container.
//!
//! A `Mutation` value is valid by construction: every variant carries exactly
//! the fields its kind requires. Raw, untrusted records are checked on the
//! way in by `stateviz-log`, which is where `MalformedMutation` is raised.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ContainerKind, MutationKind};

/// One atomic change to the container called `name`.
///
/// Mutations carry no timestamp; their position inside an entry, and the
/// entry's position in the log, define their logical time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum Mutation {
    /// Add `key` to the set `name`.
    SetAdd {
        /// Container name.
        name: String,
        /// Member to add.
        key: String,
    },
    /// Remove `key` from the set `name`.
    SetDelete {
        /// Container name.
        name: String,
        /// Member to remove.
        key: String,
    },
    /// Set `name[key] = value`.
    DictSet {
        /// Container name.
        name: String,
        /// Dict key.
        key: String,
        /// New value.
        value: String,
    },
    /// Remove `key` from the dict `name`.
    DictDelete {
        /// Container name.
        name: String,
        /// Dict key.
        key: String,
    },
    /// Append `value` to the array `name`.
    ArrayPush {
        /// Container name.
        name: String,
        /// Number to append.
        value: f64,
    },
    /// Drop the last element of the array `name`.
    ArrayPop {
        /// Container name.
        name: String,
    },
    /// Assign the scalar `name`.
    VarSet {
        /// Container name.
        name: String,
        /// New value.
        value: String,
    },
    /// Clear the scalar `name`.
    VarDelete {
        /// Container name.
        name: String,
    },
}

impl Mutation {
    /// Build a `SET_ADD`.
    pub fn set_add(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self::SetAdd {
            name: name.into(),
            key: key.into(),
        }
    }

    /// Build a `SET_DELETE`.
    pub fn set_delete(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self::SetDelete {
            name: name.into(),
            key: key.into(),
        }
    }

    /// Build a `DICT_SET`.
    pub fn dict_set(
        name: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::DictSet {
            name: name.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// Build a `DICT_DELETE`.
    pub fn dict_delete(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self::DictDelete {
            name: name.into(),
            key: key.into(),
        }
    }

    /// Build an `ARRAY_PUSH`.
    pub fn array_push(name: impl Into<String>, value: f64) -> Self {
        Self::ArrayPush {
            name: name.into(),
            value,
        }
    }

    /// Build an `ARRAY_POP`.
    pub fn array_pop(name: impl Into<String>) -> Self {
        Self::ArrayPop { name: name.into() }
    }

    /// Build a `VAR_SET`.
    pub fn var_set(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::VarSet {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Build a `VAR_DELETE`.
    pub fn var_delete(name: impl Into<String>) -> Self {
        Self::VarDelete { name: name.into() }
    }

    /// The container this mutation targets.
    pub fn name(&self) -> &str {
        match self {
            Self::SetAdd { name, .. }
            | Self::SetDelete { name, .. }
            | Self::DictSet { name, .. }
            | Self::DictDelete { name, .. }
            | Self::ArrayPush { name, .. }
            | Self::ArrayPop { name }
            | Self::VarSet { name, .. }
            | Self::VarDelete { name } => name,
        }
    }

    /// The event tag of this mutation.
    pub const fn kind(&self) -> MutationKind {
        match self {
            Self::SetAdd { .. } => MutationKind::SetAdd,
            Self::SetDelete { .. } => MutationKind::SetDelete,
            Self::DictSet { .. } => MutationKind::DictSet,
            Self::DictDelete { .. } => MutationKind::DictDelete,
            Self::ArrayPush { .. } => MutationKind::ArrayPush,
            Self::ArrayPop { .. } => MutationKind::ArrayPop,
            Self::VarSet { .. } => MutationKind::VarSet,
            Self::VarDelete { .. } => MutationKind::VarDelete,
        }
    }

    /// The container kind this mutation requires.
    pub const fn container_kind(&self) -> ContainerKind {
        self.kind().container_kind()
    }
}
