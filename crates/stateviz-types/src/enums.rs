//! Enumeration types for the StateViz replay engine.
//!
//! Two small vocabularies: the eight mutation event kinds that may appear in
//! a log, and the four container kinds a replay can establish.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Container kinds
// ---------------------------------------------------------------------------

/// The shape of a reconstructed container.
///
/// A container's kind is fixed by the first mutation a replay encounters
/// for its name; every later mutation must require the same kind or it is
/// skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ContainerKind {
    /// A set of string members.
    Set,
    /// A mapping from string keys to string values.
    Dict,
    /// An ordered sequence of numbers.
    Array,
    /// A single optional string.
    Scalar,
}

impl ContainerKind {
    /// Lowercase name used in logs and text output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Dict => "dict",
            Self::Array => "array",
            Self::Scalar => "scalar",
        }
    }
}

impl core::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Mutation kinds
// ---------------------------------------------------------------------------

/// The event tag of a mutation, as it appears on the wire (`"SET_ADD"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum MutationKind {
    /// Add a member to a set.
    SetAdd,
    /// Remove a member from a set.
    SetDelete,
    /// Insert or overwrite a dict key.
    DictSet,
    /// Remove a dict key.
    DictDelete,
    /// Append a number to an array.
    ArrayPush,
    /// Remove the last element of an array.
    ArrayPop,
    /// Assign a scalar.
    VarSet,
    /// Clear a scalar.
    VarDelete,
}

impl MutationKind {
    /// Every mutation kind, in table order.
    pub const ALL: [Self; 8] = [
        Self::SetAdd,
        Self::SetDelete,
        Self::DictSet,
        Self::DictDelete,
        Self::ArrayPush,
        Self::ArrayPop,
        Self::VarSet,
        Self::VarDelete,
    ];

    /// The wire tag for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SetAdd => "SET_ADD",
            Self::SetDelete => "SET_DELETE",
            Self::DictSet => "DICT_SET",
            Self::DictDelete => "DICT_DELETE",
            Self::ArrayPush => "ARRAY_PUSH",
            Self::ArrayPop => "ARRAY_POP",
            Self::VarSet => "VAR_SET",
            Self::VarDelete => "VAR_DELETE",
        }
    }

    /// Parse a wire tag. Matching is exact; `"set_add"` is not accepted.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// The container kind this mutation applies to.
    pub const fn container_kind(self) -> ContainerKind {
        match self {
            Self::SetAdd | Self::SetDelete => ContainerKind::Set,
            Self::DictSet | Self::DictDelete => ContainerKind::Dict,
            Self::ArrayPush | Self::ArrayPop => ContainerKind::Array,
            Self::VarSet | Self::VarDelete => ContainerKind::Scalar,
        }
    }
}

impl core::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
