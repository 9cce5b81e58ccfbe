//! Cursor navigation over an event log.
//!
//! A cursor is an optional [`EntryId`]; `None` means nothing is selected.
//! These functions are total: they never fail and never wrap around.
//! Moving past either end leaves the cursor where it is. A cursor that does
//! not name an entry of the log is left unchanged by [`next`] and [`prev`];
//! [`clamp`] is the way to pull such a cursor back onto the log.

use stateviz_types::EntryId;

use crate::log::{Entry, EventLog};

/// Move one entry forward.
///
/// With no current cursor, resolves to the first entry.
pub fn next(log: &EventLog, current: Option<EntryId>) -> Option<EntryId> {
    step(log, current, |position| position.checked_add(1))
}

/// Move one entry backward.
///
/// With no current cursor, resolves to the first entry.
pub fn prev(log: &EventLog, current: Option<EntryId>) -> Option<EntryId> {
    step(log, current, |position| position.checked_sub(1))
}

/// Map a possibly stale cursor onto `log`.
///
/// Keeps `current` if the log contains it, otherwise falls back to the first
/// entry. Returns `None` only for an empty log.
pub fn clamp(log: &EventLog, current: Option<EntryId>) -> Option<EntryId> {
    match current {
        Some(id) if log.contains(id) => Some(id),
        _ => first(log),
    }
}

fn first(log: &EventLog) -> Option<EntryId> {
    log.first().map(Entry::id)
}

fn step(
    log: &EventLog,
    current: Option<EntryId>,
    advance: impl FnOnce(usize) -> Option<usize>,
) -> Option<EntryId> {
    let Some(id) = current else {
        return first(log);
    };
    let Some(position) = log.position(id) else {
        return Some(id);
    };
    advance(position)
        .and_then(|target| log.get(target))
        .map_or(Some(id), |entry| Some(entry.id()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_entry_log() -> (EventLog, Vec<EntryId>) {
        let log = EventLog::from_entries([("l1", Vec::new()), ("l2", Vec::new()), ("l3", Vec::new())]);
        let ids = log.iter().map(Entry::id).collect();
        (log, ids)
    }

    #[test]
    fn next_and_prev_move_one_position() {
        let (log, ids) = three_entry_log();
        assert_eq!(next(&log, ids.first().copied()), ids.get(1).copied());
        assert_eq!(prev(&log, ids.get(2).copied()), ids.get(1).copied());
    }

    #[test]
    fn movement_clamps_at_boundaries() {
        let (log, ids) = three_entry_log();
        assert_eq!(prev(&log, ids.first().copied()), ids.first().copied());
        assert_eq!(next(&log, ids.last().copied()), ids.last().copied());
    }

    #[test]
    fn unset_cursor_resolves_to_first_entry() {
        let (log, ids) = three_entry_log();
        assert_eq!(next(&log, None), ids.first().copied());
        assert_eq!(prev(&log, None), ids.first().copied());
    }

    #[test]
    fn empty_log_has_no_cursor() {
        let log = EventLog::default();
        assert_eq!(next(&log, None), None);
        assert_eq!(prev(&log, None), None);
        assert_eq!(clamp(&log, Some(EntryId::new())), None);
    }

    #[test]
    fn foreign_cursor_is_left_alone_by_steps_and_clamped_to_first() {
        let (log, ids) = three_entry_log();
        let foreign = EntryId::new();
        assert_eq!(next(&log, Some(foreign)), Some(foreign));
        assert_eq!(prev(&log, Some(foreign)), Some(foreign));
        assert_eq!(clamp(&log, Some(foreign)), ids.first().copied());
        assert_eq!(clamp(&log, ids.get(2).copied()), ids.get(2).copied());
    }

    #[test]
    fn walking_forward_visits_every_entry_once() {
        let (log, ids) = three_entry_log();
        let mut visited = Vec::new();
        let mut cursor = next(&log, None);
        while let Some(id) = cursor {
            visited.push(id);
            let moved = next(&log, Some(id));
            cursor = moved.filter(|m| *m != id);
        }
        assert_eq!(visited, ids);
    }
}
