//! Field values and the equality semantics used by the change-set
//! builder.
//!
//! Two rules distinguish diff equality from plain `==`:
//!
//! - Lists compare as order-independent multisets. Reordering alone is
//!   never a change.
//! - An absent value and empty text are mutually equal, so a form never
//!   reports "changed from empty to empty".

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A single field's value.
///
/// Serializes untagged so values embed directly into backend JSON
/// payloads (`"text"`, `3.5`, `["a","b"]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text, choice, URL, and document fields.
    Text(String),
    /// Numeric fields.
    Number(f64),
    /// List fields (unordered).
    List(Vec<String>),
}

impl FieldValue {
    /// Whether this value counts as empty for diff purposes.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Number(_) => false,
            Self::List(items) => items.is_empty(),
        }
    }

    /// Whether the value is textual and looks like an HTTP(S) URL.
    ///
    /// Used by the pending-value indicator to render proposed URLs as
    /// inspectable links instead of raw text.
    pub fn looks_like_url(&self) -> bool {
        match self {
            Self::Text(s) => s.starts_with("http://") || s.starts_with("https://"),
            _ => false,
        }
    }

    /// Convert a backend JSON value into a field value.
    ///
    /// `null` maps to `None`. Arrays must contain only strings.
    pub fn from_json(value: &serde_json::Value) -> Result<Option<Self>, CoreError> {
        match value {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::String(s) => Ok(Some(Self::Text(s.clone()))),
            serde_json::Value::Number(n) => {
                let n = n.as_f64().ok_or_else(|| {
                    CoreError::Validation(format!("Number {n} is not representable"))
                })?;
                Ok(Some(Self::Number(n)))
            }
            serde_json::Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        serde_json::Value::String(s) => out.push(s.clone()),
                        other => {
                            return Err(CoreError::Validation(format!(
                                "List fields must contain strings, got {other}"
                            )))
                        }
                    }
                }
                Ok(Some(Self::List(out)))
            }
            other => Err(CoreError::Validation(format!(
                "Unsupported field value: {other}"
            ))),
        }
    }

    /// Convert into a backend JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Number(n) => serde_json::json!(n),
            Self::List(items) => serde_json::json!(items),
        }
    }
}

/// Diff equality over optional values.
///
/// Absent and empty values are mutually equal; lists are compared as
/// sorted copies; everything else uses plain equality.
pub fn effectively_equal(a: Option<&FieldValue>, b: Option<&FieldValue>) -> bool {
    let a_empty = a.is_none_or(FieldValue::is_empty);
    let b_empty = b.is_none_or(FieldValue::is_empty);
    if a_empty && b_empty {
        return true;
    }
    match (a, b) {
        (Some(FieldValue::List(left)), Some(FieldValue::List(right))) => {
            let mut left = left.clone();
            let mut right = right.clone();
            left.sort();
            right.sort();
            left == right
        }
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_text_equals_absent() {
        assert!(effectively_equal(Some(&FieldValue::Text(String::new())), None));
        assert!(effectively_equal(None, None));
        assert!(effectively_equal(
            Some(&FieldValue::Text(String::new())),
            Some(&FieldValue::Text(String::new()))
        ));
    }

    #[test]
    fn empty_list_equals_absent() {
        assert!(effectively_equal(Some(&FieldValue::List(vec![])), None));
    }

    #[test]
    fn reordered_lists_are_equal() {
        let a = FieldValue::List(vec!["Colombo".into(), "Galle".into()]);
        let b = FieldValue::List(vec!["Galle".into(), "Colombo".into()]);
        assert!(effectively_equal(Some(&a), Some(&b)));
    }

    #[test]
    fn list_membership_change_is_detected() {
        let a = FieldValue::List(vec!["Colombo".into(), "Galle".into()]);
        let b = FieldValue::List(vec!["Colombo".into(), "Kandy".into()]);
        assert!(!effectively_equal(Some(&a), Some(&b)));
    }

    #[test]
    fn duplicate_list_entries_are_significant() {
        let a = FieldValue::List(vec!["Galle".into(), "Galle".into()]);
        let b = FieldValue::List(vec!["Galle".into()]);
        assert!(!effectively_equal(Some(&a), Some(&b)));
    }

    #[test]
    fn text_change_is_detected() {
        let a = FieldValue::Text("Old Co".into());
        let b = FieldValue::Text("New Co".into());
        assert!(!effectively_equal(Some(&a), Some(&b)));
        assert!(effectively_equal(Some(&a), Some(&a.clone())));
    }

    #[test]
    fn empty_vs_nonempty_is_a_change() {
        let a = FieldValue::Text(String::new());
        let b = FieldValue::Text("something".into());
        assert!(!effectively_equal(Some(&a), Some(&b)));
        assert!(!effectively_equal(None, Some(&b)));
    }

    #[test]
    fn url_detection() {
        assert!(FieldValue::Text("https://example.com/cert.pdf".into()).looks_like_url());
        assert!(FieldValue::Text("http://example.com".into()).looks_like_url());
        assert!(!FieldValue::Text("example.com".into()).looks_like_url());
        assert!(!FieldValue::Number(1.0).looks_like_url());
    }

    #[test]
    fn from_json_maps_shapes() {
        assert_eq!(
            FieldValue::from_json(&json!("hi")).unwrap(),
            Some(FieldValue::Text("hi".into()))
        );
        assert_eq!(
            FieldValue::from_json(&json!(2.5)).unwrap(),
            Some(FieldValue::Number(2.5))
        );
        assert_eq!(
            FieldValue::from_json(&json!(["a", "b"])).unwrap(),
            Some(FieldValue::List(vec!["a".into(), "b".into()]))
        );
        assert_eq!(FieldValue::from_json(&json!(null)).unwrap(), None);
    }

    #[test]
    fn from_json_rejects_mixed_arrays_and_objects() {
        assert!(FieldValue::from_json(&json!([1, "a"])).is_err());
        assert!(FieldValue::from_json(&json!({"k": "v"})).is_err());
    }

    #[test]
    fn json_roundtrip() {
        for value in [
            FieldValue::Text("x".into()),
            FieldValue::Number(7.0),
            FieldValue::List(vec!["a".into()]),
        ] {
            let json = value.to_json();
            assert_eq!(FieldValue::from_json(&json).unwrap(), Some(value));
        }
    }
}
