//! The state projector: replay a log prefix into one container's value.
//!
//! [`project`] is a pure left fold. It takes the entries from the start of
//! the log through the cursor, keeps the mutations that target the requested
//! container (remembering which entry owns each one), and folds them into a
//! [`Projection`].
//!
//! # Fold rules
//!
//! - The first mutation seen for the container fixes its kind.
//! - A later mutation requiring a different kind is skipped: no value
//!   change, no provenance change. Skips are counted on the result.
//! - Deleting an absent key or popping an empty array changes nothing in
//!   the value; any provenance recorded for that key is dropped.
//! - A write records its entry as the key's provenance, replacing any
//!   earlier writer.

use tracing::debug;

use stateviz_log::{Entry, EventLog};
use stateviz_types::{ContainerValue, EntryId, Mutation, Projection, Provenance, ProvenanceKey};

use crate::ProjectionError;

/// Replay `container` from the start of `log` through `cursor`, inclusive.
///
/// A container name that never appears yields an unset, empty projection.
///
/// # Errors
///
/// Returns [`ProjectionError::UnknownCursor`] if `cursor` names no entry of
/// `log`.
pub fn project(
    log: &EventLog,
    container: &str,
    cursor: EntryId,
) -> Result<Projection, ProjectionError> {
    let prefix = log
        .prefix(cursor)
        .ok_or(ProjectionError::UnknownCursor { cursor })?;
    Ok(replay(prefix, container))
}

/// Fold every mutation of `container` in `entries` into a projection.
pub fn replay(entries: &[Entry], container: &str) -> Projection {
    let mut fold = Fold::default();

    let relevant = entries
        .iter()
        .flat_map(|entry| entry.mutations().iter().map(move |m| (entry.id(), m)))
        .filter(|(_, m)| m.name() == container);

    for (writer, mutation) in relevant {
        fold.apply(mutation, writer);
    }

    fold.finish()
}

/// Accumulator threaded through the replay.
#[derive(Debug, Default)]
struct Fold {
    value: ContainerValue,
    provenance: Provenance,
    skipped: usize,
}

impl Fold {
    fn apply(&mut self, mutation: &Mutation, writer: EntryId) {
        if self.value.kind().is_none() {
            let kind = mutation.container_kind();
            debug!(
                container = mutation.name(),
                kind = %kind,
                entry = %writer,
                "container kind established"
            );
            self.value = ContainerValue::empty(kind);
        }

        let provenance = &mut self.provenance;
        match (&mut self.value, mutation) {
            (ContainerValue::Set(members), Mutation::SetAdd { key, .. }) => {
                members.insert(key.clone());
                provenance.record(ProvenanceKey::key(key.as_str()), writer);
            }
            (ContainerValue::Set(members), Mutation::SetDelete { key, .. }) => {
                members.remove(key);
                provenance.remove(&ProvenanceKey::key(key.as_str()));
            }
            (ContainerValue::Dict(entries), Mutation::DictSet { key, value, .. }) => {
                entries.insert(key.clone(), value.clone());
                provenance.record(ProvenanceKey::key(key.as_str()), writer);
            }
            (ContainerValue::Dict(entries), Mutation::DictDelete { key, .. }) => {
                entries.remove(key);
                provenance.remove(&ProvenanceKey::key(key.as_str()));
            }
            (ContainerValue::Array(items), Mutation::ArrayPush { value, .. }) => {
                let index = items.len();
                items.push(*value);
                provenance.record(ProvenanceKey::Index(index), writer);
            }
            (ContainerValue::Array(items), Mutation::ArrayPop { .. }) => {
                items.pop();
                // After the pop, `len` is the position that fell off the end.
                provenance.remove(&ProvenanceKey::Index(items.len()));
            }
            (ContainerValue::Scalar(slot), Mutation::VarSet { value, .. }) => {
                *slot = Some(value.clone());
                provenance.record(ProvenanceKey::Value, writer);
            }
            (ContainerValue::Scalar(slot), Mutation::VarDelete { .. }) => {
                *slot = None;
                provenance.remove(&ProvenanceKey::Value);
            }
            (established, _) => {
                debug!(
                    container = mutation.name(),
                    established = ?established.kind(),
                    event = %mutation.kind(),
                    entry = %writer,
                    "mutation kind does not match container, skipped"
                );
                self.skipped = self.skipped.saturating_add(1);
            }
        }
    }

    fn finish(self) -> Projection {
        Projection {
            value: self.value,
            provenance: self.provenance,
            skipped: self.skipped,
        }
    }
}
