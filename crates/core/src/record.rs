//! Confirmed-value snapshots of editable records.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::diff::ChangeSet;
use crate::error::CoreError;
use crate::fields::FieldSchema;
use crate::types::RecordId;
use crate::value::FieldValue;

/// The authoritative backend snapshot of an editable record.
///
/// Holds the last backend-acknowledged value for every field. The
/// snapshot only changes when the backend confirms a change (direct
/// apply or an approved update request followed by a refresh).
#[derive(Debug, Clone)]
pub struct RecordSnapshot<S: FieldSchema> {
    record_id: RecordId,
    values: HashMap<S, FieldValue>,
    loaded_at: DateTime<Utc>,
}

impl<S: FieldSchema> RecordSnapshot<S> {
    /// Build a snapshot from already-typed values.
    pub fn new(record_id: RecordId, values: HashMap<S, FieldValue>) -> Self {
        Self {
            record_id,
            values,
            loaded_at: Utc::now(),
        }
    }

    /// Build a snapshot from a backend JSON object keyed by backend
    /// field names.
    ///
    /// Unknown keys are ignored (the backend record carries bookkeeping
    /// columns the form never edits); `null` values are treated as
    /// absent; malformed values are an error.
    pub fn from_api_object(
        record_id: RecordId,
        object: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, CoreError> {
        let mut values = HashMap::new();
        for (key, raw) in object {
            let Some(field) = S::from_api_name(key) else {
                continue;
            };
            if let Some(value) = FieldValue::from_json(raw)? {
                values.insert(field, value);
            }
        }
        Ok(Self::new(record_id, values))
    }

    /// Identifier of the record this snapshot describes.
    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    /// When this snapshot was taken.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Confirmed value for a field, if any.
    pub fn get(&self, field: S) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    /// Merge an applied change-set into the confirmed values.
    ///
    /// Used after a direct-apply submission or an approved update
    /// request so the local snapshot matches the backend without a
    /// full re-fetch.
    pub fn apply_changes(&mut self, changes: &ChangeSet<S>) {
        for (field, value) in changes.entries() {
            self.values.insert(*field, value.clone());
        }
        self.loaded_at = Utc::now();
    }
}
