//! Validation of raw mutation records.
//!
//! [`validate_mutation`] enforces the field contract of each mutation kind
//! and produces a typed [`Mutation`]. Text fields accept JSON strings, and
//! also numbers and booleans (stored as their JSON text), because producers
//! commonly emit `"value": 1` for a scalar.

use serde_json::Value;

use stateviz_types::{Mutation, MutationKind};

use crate::raw::RawMutation;

/// Why a raw mutation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationFault {
    /// The record has no `event` tag.
    #[error("missing event tag")]
    MissingEvent,

    /// The `event` tag names no known mutation kind.
    #[error("unknown event {0:?}")]
    UnknownEvent(String),

    /// A field required by the kind is absent or null.
    #[error("{kind} requires field `{field}`")]
    MissingField {
        /// The declared kind.
        kind: MutationKind,
        /// The missing field.
        field: &'static str,
    },

    /// A field has the wrong JSON type.
    #[error("{kind} field `{field}` must be {expected}")]
    WrongType {
        /// The declared kind.
        kind: MutationKind,
        /// The offending field.
        field: &'static str,
        /// What was expected.
        expected: &'static str,
    },

    /// The container name is the empty string.
    #[error("{kind} has an empty container name")]
    EmptyName {
        /// The declared kind.
        kind: MutationKind,
    },
}

/// Check a raw record against its kind's field contract.
///
/// # Errors
///
/// Returns a [`MutationFault`] describing the first violated rule.
pub fn validate_mutation(raw: &RawMutation) -> Result<Mutation, MutationFault> {
    let kind = parse_kind(raw.event.as_ref())?;
    let name = text_field(kind, "name", raw.name.as_ref())?;
    if name.is_empty() {
        return Err(MutationFault::EmptyName { kind });
    }

    let mutation = match kind {
        MutationKind::SetAdd => Mutation::SetAdd {
            name,
            key: text_field(kind, "key", raw.key.as_ref())?,
        },
        MutationKind::SetDelete => Mutation::SetDelete {
            name,
            key: text_field(kind, "key", raw.key.as_ref())?,
        },
        MutationKind::DictSet => Mutation::DictSet {
            name,
            key: text_field(kind, "key", raw.key.as_ref())?,
            value: text_field(kind, "value", raw.value.as_ref())?,
        },
        MutationKind::DictDelete => Mutation::DictDelete {
            name,
            key: text_field(kind, "key", raw.key.as_ref())?,
        },
        MutationKind::ArrayPush => Mutation::ArrayPush {
            name,
            value: number_field(kind, "value", raw.value.as_ref())?,
        },
        MutationKind::ArrayPop => Mutation::ArrayPop { name },
        MutationKind::VarSet => Mutation::VarSet {
            name,
            value: text_field(kind, "value", raw.value.as_ref())?,
        },
        MutationKind::VarDelete => Mutation::VarDelete { name },
    };

    Ok(mutation)
}

/// Resolve the `event` tag.
fn parse_kind(event: Option<&Value>) -> Result<MutationKind, MutationFault> {
    match event {
        None | Some(Value::Null) => Err(MutationFault::MissingEvent),
        Some(Value::String(tag)) => {
            MutationKind::from_tag(tag).ok_or_else(|| MutationFault::UnknownEvent(tag.clone()))
        }
        Some(other) => Err(MutationFault::UnknownEvent(other.to_string())),
    }
}

/// Read a text field, accepting strings, numbers and booleans.
fn text_field(
    kind: MutationKind,
    field: &'static str,
    value: Option<&Value>,
) -> Result<String, MutationFault> {
    match value {
        None | Some(Value::Null) => Err(MutationFault::MissingField { kind, field }),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(scalar @ (Value::Number(_) | Value::Bool(_))) => Ok(scalar.to_string()),
        Some(Value::Array(_) | Value::Object(_)) => Err(MutationFault::WrongType {
            kind,
            field,
            expected: "a string",
        }),
    }
}

/// Read a numeric field. Numeric strings are not accepted.
///
/// An explicit `null` deserializes to `None` and reads as missing. A `Null`
/// that does get here came from a non-finite literal such as JSON5
/// `Infinity` or `NaN`.
fn number_field(
    kind: MutationKind,
    field: &'static str,
    value: Option<&Value>,
) -> Result<f64, MutationFault> {
    let non_finite = || MutationFault::WrongType {
        kind,
        field,
        expected: "a finite number",
    };
    match value {
        None => Err(MutationFault::MissingField { kind, field }),
        Some(Value::Null) => Err(non_finite()),
        Some(Value::Number(number)) => number.as_f64().ok_or_else(non_finite),
        Some(_) => Err(MutationFault::WrongType {
            kind,
            field,
            expected: "a number",
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(value: Value) -> RawMutation {
        serde_json::from_value(value).unwrap_or_default()
    }

    #[test]
    fn valid_records_become_typed_mutations() {
        let cases = [
            (
                json!({"event": "SET_ADD", "name": "s", "key": "a"}),
                Mutation::set_add("s", "a"),
            ),
            (
                json!({"event": "DICT_SET", "name": "d", "key": "k", "value": "v"}),
                Mutation::dict_set("d", "k", "v"),
            ),
            (
                json!({"event": "ARRAY_PUSH", "name": "arr", "value": 2}),
                Mutation::array_push("arr", 2.0),
            ),
            (json!({"event": "ARRAY_POP", "name": "arr"}), Mutation::array_pop("arr")),
            (
                json!({"event": "VAR_SET", "name": "x", "value": "ready"}),
                Mutation::var_set("x", "ready"),
            ),
            (json!({"event": "VAR_DELETE", "name": "x"}), Mutation::var_delete("x")),
        ];

        for (input, expected) in cases {
            assert_eq!(validate_mutation(&raw(input)), Ok(expected));
        }
    }

    #[test]
    fn array_push_without_number_is_rejected() {
        let missing = validate_mutation(&raw(json!({"event": "ARRAY_PUSH", "name": "arr"})));
        assert_eq!(
            missing,
            Err(MutationFault::MissingField {
                kind: MutationKind::ArrayPush,
                field: "value",
            })
        );

        let textual =
            validate_mutation(&raw(json!({"event": "ARRAY_PUSH", "name": "arr", "value": "1"})));
        assert!(matches!(textual, Err(MutationFault::WrongType { field: "value", .. })));
    }

    #[test]
    fn non_finite_push_is_not_reported_missing() {
        let infinite = RawMutation {
            event: Some(json!("ARRAY_PUSH")),
            name: Some(json!("arr")),
            key: None,
            value: Some(Value::Null),
        };
        assert_eq!(
            validate_mutation(&infinite),
            Err(MutationFault::WrongType {
                kind: MutationKind::ArrayPush,
                field: "value",
                expected: "a finite number",
            })
        );

        let explicit_null =
            validate_mutation(&raw(json!({"event": "ARRAY_PUSH", "name": "arr", "value": null})));
        assert!(matches!(explicit_null, Err(MutationFault::MissingField { field: "value", .. })));
    }

    #[test]
    fn dict_set_requires_value() {
        let result = validate_mutation(&raw(json!({"event": "DICT_SET", "name": "d", "key": "k"})));
        assert!(matches!(result, Err(MutationFault::MissingField { field: "value", .. })));
    }

    #[test]
    fn set_add_requires_key() {
        let result = validate_mutation(&raw(json!({"event": "SET_ADD", "name": "s"})));
        assert!(matches!(result, Err(MutationFault::MissingField { field: "key", .. })));
    }

    #[test]
    fn unknown_and_missing_events_are_rejected() {
        assert_eq!(
            validate_mutation(&raw(json!({"event": "LIST_APPEND", "name": "l"}))),
            Err(MutationFault::UnknownEvent("LIST_APPEND".to_owned()))
        );
        assert_eq!(
            validate_mutation(&raw(json!({"name": "l"}))),
            Err(MutationFault::MissingEvent)
        );
    }

    #[test]
    fn empty_or_missing_name_is_rejected() {
        assert!(matches!(
            validate_mutation(&raw(json!({"event": "ARRAY_POP", "name": ""}))),
            Err(MutationFault::EmptyName { .. })
        ));
        assert!(matches!(
            validate_mutation(&raw(json!({"event": "ARRAY_POP"}))),
            Err(MutationFault::MissingField { field: "name", .. })
        ));
    }

    #[test]
    fn numeric_scalar_values_keep_their_json_text() {
        let result = validate_mutation(&raw(json!({"event": "VAR_SET", "name": "x", "value": 1})));
        assert_eq!(result, Ok(Mutation::var_set("x", "1")));

        let flag = validate_mutation(&raw(json!({"event": "VAR_SET", "name": "x", "value": true})));
        assert_eq!(flag, Ok(Mutation::var_set("x", "true")));
    }

    #[test]
    fn structured_values_are_rejected() {
        let result =
            validate_mutation(&raw(json!({"event": "VAR_SET", "name": "x", "value": [1, 2]})));
        assert!(matches!(result, Err(MutationFault::WrongType { field: "value", .. })));
    }
}
