//! Plain-text rendering of container views.
//!
//! Each container prints as a header line followed by one line per element.
//! An element written by the cursor entry is marked with `*`, and every
//! element with a recorded writer is suffixed with that entry's location.

use stateviz_core::ContainerView;
use stateviz_log::EventLog;
use stateviz_types::{ContainerValue, EntryId, Projection, ProvenanceKey};

/// Render one container at `cursor`.
pub fn render_view(log: &EventLog, view: &ContainerView, cursor: EntryId) -> String {
    let projection = &view.projection;
    let header = match projection.value.kind() {
        Some(kind) => format!("{} ({kind})", view.name),
        None => view.name.clone(),
    };

    let mut lines = vec![header];
    let elements = elements(&projection.value);
    if elements.is_empty() {
        lines.push(format!("    {}", empty_marker(&projection.value)));
    }
    for (key, text) in elements {
        lines.push(element_line(log, projection, cursor, &key, &text));
    }
    lines.join("\n")
}

/// Render every view, separated by blank lines.
pub fn render_views(log: &EventLog, views: &[ContainerView], cursor: EntryId) -> String {
    views
        .iter()
        .map(|view| render_view(log, view, cursor))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn element_line(
    log: &EventLog,
    projection: &Projection,
    cursor: EntryId,
    key: &ProvenanceKey,
    text: &str,
) -> String {
    let writer = projection.origin(key);
    let mark = if writer == Some(cursor) { '*' } else { ' ' };
    match writer.and_then(|id| log.entry(id)) {
        Some(entry) => format!("  {mark} {text}  <- {}", entry.loc()),
        None => format!("  {mark} {text}"),
    }
}

/// Displayable elements with their provenance keys, in container order.
fn elements(value: &ContainerValue) -> Vec<(ProvenanceKey, String)> {
    match value {
        ContainerValue::Unset | ContainerValue::Scalar(None) => Vec::new(),
        ContainerValue::Set(members) => members
            .iter()
            .map(|member| (ProvenanceKey::key(member.as_str()), member.clone()))
            .collect(),
        ContainerValue::Dict(map) => map
            .iter()
            .map(|(key, value)| (ProvenanceKey::key(key.as_str()), format!("{key}: {value}")))
            .collect(),
        ContainerValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| (ProvenanceKey::Index(index), format!("[{index}] {item}")))
            .collect(),
        ContainerValue::Scalar(Some(text)) => vec![(ProvenanceKey::Value, text.clone())],
    }
}

const fn empty_marker(value: &ContainerValue) -> &'static str {
    match value {
        ContainerValue::Unset => "(no mutations yet)",
        ContainerValue::Scalar(None) => "(unset)",
        _ => "(empty)",
    }
}
