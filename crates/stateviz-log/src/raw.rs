//! Untrusted wire records.
//!
//! One [`RawEntry`] per line of an external log. Every mutation field is
//! optional and loosely typed here so that a structurally odd record still
//! deserializes and can be rejected with a precise
//! [`MutationFault`](crate::MutationFault) instead of a generic parse error.

use serde::Deserialize;
use serde_json::Value;

/// One recorded location as it arrives from outside.
///
/// Any `id` field present on the wire is ignored; the log assigns fresh
/// ids when it is built.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawEntry {
    /// Human-readable location label, e.g. `model.py:23`.
    pub loc: String,
    /// Mutations applied at this location, in order.
    pub mutations: Vec<RawMutation>,
}

/// One mutation as it arrives from outside.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMutation {
    /// Event tag, e.g. `"SET_ADD"`.
    #[serde(default)]
    pub event: Option<Value>,
    /// Target container name.
    #[serde(default)]
    pub name: Option<Value>,
    /// Set member or dict key.
    #[serde(default)]
    pub key: Option<Value>,
    /// Dict value, scalar value or array element.
    #[serde(default)]
    pub value: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference_line() {
        let line = r#"{"loc":"a.py:3","mutations":[{"event":"DICT_SET","name":"my_dict","key":"k","value":"v"}]}"#;
        let entry: Result<RawEntry, _> = serde_json::from_str(line);
        assert!(entry.is_ok());
        if let Ok(e) = entry {
            assert_eq!(e.loc, "a.py:3");
            assert_eq!(e.mutations.len(), 1);
            assert_eq!(e.mutations.first().and_then(|m| m.key.clone()), Some(Value::from("k")));
        }
    }

    #[test]
    fn ignores_wire_id_and_unknown_fields() {
        let line = r#"{"id":"abc","loc":"a.py:1","extra":1,"mutations":[]}"#;
        let entry: Result<RawEntry, _> = serde_json::from_str(line);
        assert_eq!(
            entry.ok(),
            Some(RawEntry {
                loc: "a.py:1".to_owned(),
                mutations: Vec::new(),
            })
        );
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let m: Result<RawMutation, _> = serde_json::from_str(r#"{"event":"ARRAY_POP"}"#);
        assert!(m.is_ok());
        if let Ok(m) = m {
            assert!(m.name.is_none());
            assert!(m.value.is_none());
        }
    }
}
