//! Memoized projections for callers that replay many nearby cursors.
//!
//! Entries are keyed by (container name, cursor position) for a single log
//! identity. Presenting a log with a different [`LogId`] drops everything,
//! which is the only invalidation needed because logs are immutable.

use std::collections::HashMap;
use std::collections::hash_map::Entry as Slot;

use tracing::debug;

use stateviz_log::EventLog;
use stateviz_types::{EntryId, LogId, Projection};

use crate::ProjectionError;
use crate::projector::project;

/// A bounded projection cache for one log at a time.
#[derive(Debug)]
pub struct ProjectionCache {
    log_id: Option<LogId>,
    max_entries: usize,
    entries: HashMap<(String, usize), Projection>,
    hits: u64,
    misses: u64,
}

impl ProjectionCache {
    /// Create a cache holding at most `max_entries` projections.
    ///
    /// When full, the cache is cleared before the next insert.
    pub fn new(max_entries: usize) -> Self {
        Self {
            log_id: None,
            max_entries,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached projection, replaying on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::UnknownCursor`] if `cursor` names no entry
    /// of `log`.
    pub fn get_or_project(
        &mut self,
        log: &EventLog,
        container: &str,
        cursor: EntryId,
    ) -> Result<&Projection, ProjectionError> {
        let position = log
            .position(cursor)
            .ok_or(ProjectionError::UnknownCursor { cursor })?;

        if self.log_id != Some(log.id()) {
            if self.log_id.is_some() {
                debug!(log_id = %log.id(), dropped = self.entries.len(), "log changed, cache cleared");
            }
            self.entries.clear();
            self.log_id = Some(log.id());
        }

        let key = (container.to_owned(), position);
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            debug!(max_entries = self.max_entries, "projection cache full, cleared");
            self.entries.clear();
        }

        match self.entries.entry(key) {
            Slot::Occupied(slot) => {
                self.hits = self.hits.saturating_add(1);
                Ok(slot.into_mut())
            }
            Slot::Vacant(slot) => {
                self.misses = self.misses.saturating_add(1);
                let projection = project(log, container, cursor)?;
                Ok(slot.insert(projection))
            }
        }
    }

    /// Drop every cached projection.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.log_id = None;
    }

    /// Number of cached projections.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the cache.
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that required a replay.
    pub const fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use stateviz_log::Entry;
    use stateviz_types::{ContainerValue, Mutation};

    use super::*;

    fn log() -> EventLog {
        EventLog::from_entries([
            ("l1", vec![Mutation::var_set("x", "1")]),
            ("l2", vec![Mutation::var_set("x", "2")]),
        ])
    }

    #[test]
    fn second_lookup_hits() {
        let log = log();
        let mut cache = ProjectionCache::new(8);
        let cursor = log.last().map(Entry::id).unwrap_or_default();

        let first = cache.get_or_project(&log, "x", cursor).map(|p| p.value.clone());
        let second = cache.get_or_project(&log, "x", cursor).map(|p| p.value.clone());
        assert_eq!(first.ok(), Some(ContainerValue::Scalar(Some("2".to_owned()))));
        assert_eq!(second.ok(), Some(ContainerValue::Scalar(Some("2".to_owned()))));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn cached_result_matches_direct_projection() {
        let log = log();
        let mut cache = ProjectionCache::new(8);
        for entry in &log {
            let cached = cache.get_or_project(&log, "x", entry.id()).cloned().ok();
            let direct = project(&log, "x", entry.id()).ok();
            assert_eq!(cached, direct);
        }
    }

    #[test]
    fn new_log_identity_clears_cache() {
        let first = log();
        let second = log();
        let mut cache = ProjectionCache::new(8);

        let a = first.first().map(Entry::id).unwrap_or_default();
        let b = second.first().map(Entry::id).unwrap_or_default();
        assert!(cache.get_or_project(&first, "x", a).is_ok());
        assert_eq!(cache.len(), 1);
        assert!(cache.get_or_project(&second, "x", b).is_ok());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn full_cache_is_cleared_before_insert() {
        let log = log();
        let mut cache = ProjectionCache::new(1);
        let a = log.first().map(Entry::id).unwrap_or_default();
        let b = log.last().map(Entry::id).unwrap_or_default();
        assert!(cache.get_or_project(&log, "x", a).is_ok());
        assert!(cache.get_or_project(&log, "x", b).is_ok());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn unknown_cursor_is_not_cached() {
        let log = log();
        let mut cache = ProjectionCache::new(8);
        let result = cache.get_or_project(&log, "x", EntryId::new());
        assert!(matches!(result, Err(ProjectionError::UnknownCursor { .. })));
        assert!(cache.is_empty());
    }
}
