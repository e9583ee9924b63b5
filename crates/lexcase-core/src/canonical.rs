//! # Canonical Serialization
//!
//! `CanonicalBytes` is the only input accepted by the digest functions.
//! Callers that cache resolutions key the cache on a digest of the snapshot,
//! so two snapshots carrying the same facts must produce the same bytes
//! regardless of struct field order, map insertion order, or whitespace.
//!
//! ## Rules
//!
//! 1. Floats are rejected. Snapshot content is flags, counts, strings and
//!    timestamps; a float indicates an assembly defect.
//! 2. Object keys are sorted and separators are compact (RFC 8785 via
//!    `serde_jcs`).
//! 3. Timestamps are already normalized by [`crate::Timestamp`].

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization.
///
/// The inner buffer is private; [`CanonicalBytes::new()`] is the only
/// constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains a
    /// non-integer number, and `SerializationFailed` if serde fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_f64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(())
        }
        Value::Array(items) => items.iter().try_for_each(reject_floats),
        Value::Object(map) => map.values().try_for_each(reject_floats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical_str(value: &Value) -> String {
        let cb = CanonicalBytes::new(value).expect("should canonicalize");
        String::from_utf8(cb.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn test_keys_sorted_and_compact() {
        let data = serde_json::json!({"is_assigned": true, "case_id": "c-1", "count": 2});
        assert_eq!(
            canonical_str(&data),
            r#"{"case_id":"c-1","count":2,"is_assigned":true}"#
        );
    }

    #[test]
    fn test_nested_objects_sorted() {
        let data = serde_json::json!({
            "latest_opinion_version": {"submitted_at": null, "is_draft": true},
            "audit_events": [{"timestamp": "2026-01-01T00:00:00Z", "action": "opinion_viewed"}]
        });
        assert_eq!(
            canonical_str(&data),
            r#"{"audit_events":[{"action":"opinion_viewed","timestamp":"2026-01-01T00:00:00Z"}],"latest_opinion_version":{"is_draft":true,"submitted_at":null}}"#
        );
    }

    #[test]
    fn test_float_rejected() {
        let data = serde_json::json!({"open_clarification_count": 1.5});
        match CanonicalBytes::new(&data) {
            Err(CanonicalizationError::FloatRejected(f)) => assert_eq!(f, 1.5),
            other => panic!("expected FloatRejected, got: {other:?}"),
        }
    }

    #[test]
    fn test_deeply_nested_float_rejected() {
        let data = serde_json::json!({"audit_events": [{"details": {"score": 0.25}}]});
        assert!(CanonicalBytes::new(&data).is_err());
    }

    #[test]
    fn test_integers_accepted() {
        let data = serde_json::json!({"a": -3, "b": 9_999_999_999i64});
        assert_eq!(canonical_str(&data), r#"{"a":-3,"b":9999999999}"#);
    }

    #[test]
    fn test_empty_object() {
        let cb = CanonicalBytes::new(&serde_json::json!({})).unwrap();
        assert_eq!(cb.as_bytes(), b"{}");
        assert!(!cb.is_empty());
        assert_eq!(cb.len(), 2);
    }
}
