//! Reconstructed container values and their provenance.
//!
//! A replay produces a [`Projection`]: the container's value at the cursor
//! plus a [`Provenance`] map from each sub-element to the entry that last
//! wrote it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Serializer};
use ts_rs::TS;

use crate::enums::ContainerKind;
use crate::ids::EntryId;

// ---------------------------------------------------------------------------
// Container value
// ---------------------------------------------------------------------------

/// The materialized value of a named container.
///
/// `Unset` means no mutation for the name has been replayed yet, so no kind
/// has been established. Callers render it as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ContainerValue {
    /// No kind established.
    #[default]
    Unset,
    /// Set of string members.
    Set(BTreeSet<String>),
    /// Mapping from key to value, last write wins.
    Dict(BTreeMap<String, String>),
    /// Ordered sequence of numbers.
    Array(Vec<f64>),
    /// A single optional string. `None` after a `VAR_DELETE`.
    Scalar(Option<String>),
}

impl ContainerValue {
    /// An empty container of the given kind.
    pub const fn empty(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Set => Self::Set(BTreeSet::new()),
            ContainerKind::Dict => Self::Dict(BTreeMap::new()),
            ContainerKind::Array => Self::Array(Vec::new()),
            ContainerKind::Scalar => Self::Scalar(None),
        }
    }

    /// The established kind, or `None` for [`ContainerValue::Unset`].
    pub const fn kind(&self) -> Option<ContainerKind> {
        match self {
            Self::Unset => None,
            Self::Set(_) => Some(ContainerKind::Set),
            Self::Dict(_) => Some(ContainerKind::Dict),
            Self::Array(_) => Some(ContainerKind::Array),
            Self::Scalar(_) => Some(ContainerKind::Scalar),
        }
    }

    /// Whether the container holds nothing displayable.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Unset => true,
            Self::Set(members) => members.is_empty(),
            Self::Dict(entries) => entries.is_empty(),
            Self::Array(items) => items.is_empty(),
            Self::Scalar(value) => value.is_none(),
        }
    }
}

// ---------------------------------------------------------------------------
// Provenance
// ---------------------------------------------------------------------------

/// Addresses one sub-element of a container.
///
/// Set members and dict keys use [`ProvenanceKey::Key`], array positions use
/// [`ProvenanceKey::Index`], and a scalar has the single key
/// [`ProvenanceKey::Value`] (rendered as `"value"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProvenanceKey {
    /// Array position.
    Index(usize),
    /// Set member or dict key.
    Key(String),
    /// The scalar slot.
    Value,
}

impl ProvenanceKey {
    /// Key for a set member or dict key.
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }
}

impl core::fmt::Display for ProvenanceKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Key(key) => f.write_str(key),
            Self::Value => f.write_str("value"),
        }
    }
}

// Serialized as a plain string so provenance maps become JSON objects.
impl Serialize for ProvenanceKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Map from sub-element to the entry that most recently wrote it.
///
/// Removing an element removes its provenance; nothing ever points back to
/// an earlier writer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Provenance {
    writers: BTreeMap<ProvenanceKey, EntryId>,
}

impl Provenance {
    /// An empty provenance map.
    pub const fn new() -> Self {
        Self {
            writers: BTreeMap::new(),
        }
    }

    /// Record `entry` as the latest writer of `key`.
    pub fn record(&mut self, key: ProvenanceKey, entry: EntryId) {
        self.writers.insert(key, entry);
    }

    /// Forget the writer of `key`, if any.
    pub fn remove(&mut self, key: &ProvenanceKey) -> Option<EntryId> {
        self.writers.remove(key)
    }

    /// The latest writer of `key`.
    pub fn get(&self, key: &ProvenanceKey) -> Option<EntryId> {
        self.writers.get(key).copied()
    }

    /// Number of tracked sub-elements.
    pub fn len(&self) -> usize {
        self.writers.len()
    }

    /// Whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }

    /// Iterate `(key, writer)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProvenanceKey, EntryId)> {
        self.writers.iter().map(|(key, entry)| (key, *entry))
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// The result of replaying one container up to a cursor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Projection {
    /// Reconstructed value.
    pub value: ContainerValue,
    /// Latest writer of each sub-element.
    pub provenance: Provenance,
    /// Mutations skipped because their kind did not match the established
    /// container kind.
    pub skipped: usize,
}

impl Projection {
    /// Sub-elements whose latest writer is `entry`, in key order.
    ///
    /// Viewers use this to highlight what the entry under the cursor wrote.
    pub fn written_by(&self, entry: EntryId) -> Vec<&ProvenanceKey> {
        self.provenance
            .iter()
            .filter(|(_, writer)| *writer == entry)
            .map(|(key, _)| key)
            .collect()
    }

    /// The entry that last wrote `key`.
    pub fn origin(&self, key: &ProvenanceKey) -> Option<EntryId> {
        self.provenance.get(key)
    }
}
