//! The event log: an ordered, immutable list of entries.
//!
//! [`EventLog`] owns its [`Entry`] values and an index from entry id to
//! position so cursors resolve in constant time.
//!
//! # Design
//!
//! - **Immutable**: no append or remove; a changed log is a new log with a
//!   new [`LogId`].
//! - **Stable ids**: entry ids never change, so a cursor keeps meaning the
//!   same location when a caller rebuilds a log around existing entries.
//! - **Validated**: every mutation was checked when the log was built.

use std::collections::{BTreeSet, HashMap};

use tracing::info;

use stateviz_types::{EntryId, LogId, Mutation};

use crate::LogError;
use crate::raw::RawEntry;
use crate::validate::validate_mutation;

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// One recorded location and the mutations applied there.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    id: EntryId,
    loc: String,
    mutations: Vec<Mutation>,
}

impl Entry {
    /// Create an entry with a fresh id.
    pub fn new(loc: impl Into<String>, mutations: Vec<Mutation>) -> Self {
        Self {
            id: EntryId::new(),
            loc: loc.into(),
            mutations,
        }
    }

    /// The entry's stable id.
    pub const fn id(&self) -> EntryId {
        self.id
    }

    /// Location label.
    pub fn loc(&self) -> &str {
        &self.loc
    }

    /// Mutations in application order.
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }
}

// ---------------------------------------------------------------------------
// EventLog
// ---------------------------------------------------------------------------

/// An ordered sequence of entries; the unit of replay.
///
/// Entry ids are unique within a log.
#[derive(Debug, Clone)]
pub struct EventLog {
    id: LogId,
    entries: Vec<Entry>,
    positions: HashMap<EntryId, usize>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::from_entries(core::iter::empty::<(String, Vec<Mutation>)>())
    }
}

impl EventLog {
    /// Build a log from raw records, validating every mutation.
    ///
    /// Each entry gets a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::MalformedMutation`] for the first mutation whose
    /// fields do not satisfy its kind.
    pub fn build(raw_entries: Vec<RawEntry>) -> Result<Self, LogError> {
        let mut entries = Vec::with_capacity(raw_entries.len());

        for (entry_index, raw) in raw_entries.into_iter().enumerate() {
            let mutations = raw
                .mutations
                .iter()
                .enumerate()
                .map(|(mutation_index, m)| {
                    validate_mutation(m).map_err(|fault| LogError::MalformedMutation {
                        entry: entry_index,
                        mutation: mutation_index,
                        fault,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            entries.push(Entry::new(raw.loc, mutations));
        }

        let log = Self::index(entries);
        info!(
            log_id = %log.id,
            entries = log.len(),
            mutations = log.mutation_count(),
            "event log built"
        );
        Ok(log)
    }

    /// Build a log from already-typed `(loc, mutations)` pairs.
    pub fn from_entries<L, I>(entries: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, Vec<Mutation>)>,
    {
        Self::index(
            entries
                .into_iter()
                .map(|(loc, mutations)| Entry::new(loc, mutations))
                .collect(),
        )
    }

    /// Build a log around existing entries, keeping their ids.
    ///
    /// This is how a caller derives an edited log without invalidating
    /// cursors that point at surviving entries.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::DuplicateEntryId`] if two entries share an id.
    pub fn try_from_entries(entries: Vec<Entry>) -> Result<Self, LogError> {
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if !seen.insert(entry.id) {
                return Err(LogError::DuplicateEntryId { id: entry.id });
            }
        }
        Ok(Self::index(entries))
    }

    /// Assign a log identity and index entry positions.
    fn index(entries: Vec<Entry>) -> Self {
        let positions = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.id, position))
            .collect();
        Self {
            id: LogId::new(),
            entries,
            positions,
        }
    }

    /// This log's identity.
    pub const fn id(&self) -> LogId {
        self.id
    }

    /// Number of entries.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log has no entries.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of mutations across all entries.
    pub fn mutation_count(&self) -> usize {
        self.entries.iter().map(|e| e.mutations.len()).sum()
    }

    /// All entries in log order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Iterate entries in log order.
    pub fn iter(&self) -> core::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// The entry at `position`.
    pub fn get(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }

    /// The first entry.
    pub fn first(&self) -> Option<&Entry> {
        self.entries.first()
    }

    /// The last entry.
    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Position of the entry with `id`.
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Whether an entry with `id` exists.
    pub fn contains(&self, id: EntryId) -> bool {
        self.positions.contains_key(&id)
    }

    /// The entry with `id`.
    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.position(id).and_then(|position| self.entries.get(position))
    }

    /// The first entry whose location label equals `loc`.
    pub fn find_loc(&self, loc: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.loc == loc)
    }

    /// Entries from the start of the log through `id`, inclusive.
    pub fn prefix(&self, id: EntryId) -> Option<&[Entry]> {
        let position = self.position(id)?;
        self.entries.get(..=position)
    }

    /// Every container name in the log, each once, in order of first
    /// appearance.
    pub fn container_names(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.entries
            .iter()
            .flat_map(|e| e.mutations.iter())
            .map(Mutation::name)
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Entry;
    type IntoIter = core::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validate::MutationFault;

    fn raw_entries(lines: &[serde_json::Value]) -> Vec<RawEntry> {
        lines
            .iter()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect()
    }

    #[test]
    fn build_assigns_unique_ids_in_order() {
        let raw = raw_entries(&[
            json!({"loc": "a.py:1", "mutations": [{"event": "SET_ADD", "name": "s", "key": "a"}]}),
            json!({"loc": "a.py:2", "mutations": []}),
            json!({"loc": "a.py:3", "mutations": [{"event": "VAR_DELETE", "name": "x"}]}),
        ]);
        let log = EventLog::build(raw);
        assert!(log.is_ok());
        let Ok(log) = log else { return };

        assert_eq!(log.len(), 3);
        assert_eq!(log.mutation_count(), 2);
        let locs: Vec<&str> = log.iter().map(Entry::loc).collect();
        assert_eq!(locs, vec!["a.py:1", "a.py:2", "a.py:3"]);

        let ids: BTreeSet<EntryId> = log.iter().map(Entry::id).collect();
        assert_eq!(ids.len(), 3);
        for (position, entry) in log.iter().enumerate() {
            assert_eq!(log.position(entry.id()), Some(position));
        }
    }

    #[test]
    fn build_reports_malformed_mutation_position() {
        let raw = raw_entries(&[
            json!({"loc": "a.py:1", "mutations": []}),
            json!({"loc": "a.py:2", "mutations": [
                {"event": "ARRAY_POP", "name": "arr"},
                {"event": "ARRAY_PUSH", "name": "arr"},
            ]}),
        ]);
        let result = EventLog::build(raw);
        assert!(matches!(
            result,
            Err(LogError::MalformedMutation {
                entry: 1,
                mutation: 1,
                fault: MutationFault::MissingField { field: "value", .. },
            })
        ));
    }

    #[test]
    fn container_names_are_distinct_in_first_appearance_order() {
        let log = EventLog::from_entries([
            ("l1", vec![Mutation::var_set("z", "1"), Mutation::set_add("a", "k")]),
            ("l2", vec![Mutation::var_set("z", "2"), Mutation::array_pop("m")]),
        ]);
        assert_eq!(log.container_names(), vec!["z", "a", "m"]);
    }

    #[test]
    fn prefix_is_inclusive() {
        let log = EventLog::from_entries([
            ("l1", Vec::new()),
            ("l2", Vec::new()),
            ("l3", Vec::new()),
        ]);
        let second = log.get(1).map(Entry::id);
        let prefix = second.and_then(|id| log.prefix(id));
        assert_eq!(prefix.map(<[Entry]>::len), Some(2));
        assert!(log.prefix(EntryId::new()).is_none());
    }

    #[test]
    fn lookup_by_id_and_loc() {
        let log = EventLog::from_entries([("model.py:23", Vec::new()), ("model.py:45", Vec::new())]);
        let found = log.find_loc("model.py:45").map(Entry::id);
        assert_eq!(found, log.last().map(Entry::id));
        assert!(found.is_some_and(|id| log.contains(id)));
        assert!(log.find_loc("model.py:99").is_none());
        assert!(log.entry(EntryId::new()).is_none());
    }

    #[test]
    fn try_from_entries_keeps_ids_and_rejects_duplicates() {
        let original = EventLog::from_entries([("l1", Vec::new()), ("l2", Vec::new())]);
        let kept: Vec<Entry> = original.entries().to_vec();
        let rebuilt = EventLog::try_from_entries(kept.clone());
        assert!(rebuilt.is_ok());
        if let Ok(rebuilt) = rebuilt {
            assert_ne!(rebuilt.id(), original.id());
            assert_eq!(rebuilt.entries(), original.entries());
        }

        let mut doubled = kept.clone();
        doubled.extend(kept);
        assert!(matches!(
            EventLog::try_from_entries(doubled),
            Err(LogError::DuplicateEntryId { .. })
        ));
    }

    #[test]
    fn default_log_is_empty() {
        let log = EventLog::default();
        assert!(log.is_empty());
        assert!(log.first().is_none());
        assert!(log.container_names().is_empty());
    }
}
