//! Change-set computation: the minimal set of fields whose draft value
//! differs from the confirmed snapshot.
//!
//! Only fields in the change-set are ever submitted. Submitting the
//! full record would overwrite fields the user never touched and
//! produce false positives in the approval queue.

use std::collections::HashMap;

use crate::fields::FieldSchema;
use crate::record::RecordSnapshot;
use crate::value::{effectively_equal, FieldValue};

/// An ordered set of changed fields with their new values.
///
/// Order follows the schema's declaration order, so error messages and
/// review screens list fields consistently.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet<S: FieldSchema> {
    entries: Vec<(S, FieldValue)>,
}

impl<S: FieldSchema> ChangeSet<S> {
    /// The changed fields and their new values, in schema order.
    pub fn entries(&self) -> &[(S, FieldValue)] {
        &self.entries
    }

    /// Number of changed fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing changed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// New value for a field, if it is part of the change-set.
    pub fn get(&self, field: S) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v)
    }

    /// UI field names of the changed fields.
    pub fn ui_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(f, _)| f.ui_name()).collect()
    }

    /// Project the change-set to a backend JSON object keyed by
    /// backend field names. This is the submission payload.
    pub fn to_api_object(&self) -> serde_json::Map<String, serde_json::Value> {
        self.entries
            .iter()
            .map(|(f, v)| (f.api_name().to_string(), v.to_json()))
            .collect()
    }
}

/// Result of diffing a form against its confirmed snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffOutcome<S: FieldSchema> {
    /// The form matches the snapshot; nothing to submit.
    NoChanges,
    /// At least one field changed.
    Changes(ChangeSet<S>),
}

/// Compute the change-set between draft values and the confirmed
/// snapshot.
///
/// Fields absent from the draft map are untouched and never diffed. A
/// draft that clears a previously-set field produces an entry with the
/// (empty) draft value so the backend sees an explicit clear.
pub fn build_change_set<S: FieldSchema>(
    drafts: &HashMap<S, FieldValue>,
    snapshot: &RecordSnapshot<S>,
) -> DiffOutcome<S> {
    let mut entries = Vec::new();
    for field in S::all() {
        let Some(draft) = drafts.get(field) else {
            continue;
        };
        if !effectively_equal(Some(draft), snapshot.get(*field)) {
            entries.push((*field, draft.clone()));
        }
    }

    if entries.is_empty() {
        DiffOutcome::NoChanges
    } else {
        DiffOutcome::Changes(ChangeSet { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::ProfileField;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    fn snapshot(values: &[(ProfileField, FieldValue)]) -> RecordSnapshot<ProfileField> {
        RecordSnapshot::new(Uuid::new_v4(), values.iter().cloned().collect())
    }

    #[test]
    fn identical_drafts_produce_no_changes() {
        let snap = snapshot(&[
            (ProfileField::BusinessName, FieldValue::Text("Old Co".into())),
            (
                ProfileField::Districts,
                FieldValue::List(vec!["Colombo".into(), "Galle".into()]),
            ),
        ]);
        let mut drafts = HashMap::new();
        drafts.insert(ProfileField::BusinessName, FieldValue::Text("Old Co".into()));
        drafts.insert(
            ProfileField::Districts,
            FieldValue::List(vec!["Galle".into(), "Colombo".into()]),
        );

        assert_matches!(build_change_set(&drafts, &snap), DiffOutcome::NoChanges);
    }

    #[test]
    fn changed_text_is_collected() {
        let snap = snapshot(&[(ProfileField::BusinessName, FieldValue::Text("Old Co".into()))]);
        let mut drafts = HashMap::new();
        drafts.insert(ProfileField::BusinessName, FieldValue::Text("New Co".into()));

        let DiffOutcome::Changes(changes) = build_change_set(&drafts, &snap) else {
            panic!("expected changes");
        };
        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes.get(ProfileField::BusinessName),
            Some(&FieldValue::Text("New Co".into()))
        );
        assert_eq!(changes.ui_names(), vec!["businessName"]);
    }

    #[test]
    fn empty_to_empty_is_not_a_change() {
        let snap = snapshot(&[]);
        let mut drafts = HashMap::new();
        drafts.insert(ProfileField::Description, FieldValue::Text(String::new()));

        assert_matches!(build_change_set(&drafts, &snap), DiffOutcome::NoChanges);
    }

    #[test]
    fn clearing_a_field_is_a_change() {
        let snap = snapshot(&[(ProfileField::Description, FieldValue::Text("old".into()))]);
        let mut drafts = HashMap::new();
        drafts.insert(ProfileField::Description, FieldValue::Text(String::new()));

        let DiffOutcome::Changes(changes) = build_change_set(&drafts, &snap) else {
            panic!("expected changes");
        };
        assert_eq!(
            changes.get(ProfileField::Description),
            Some(&FieldValue::Text(String::new()))
        );
    }

    #[test]
    fn untouched_fields_never_appear() {
        let snap = snapshot(&[
            (ProfileField::BusinessName, FieldValue::Text("Old Co".into())),
            (ProfileField::Address, FieldValue::Text("1 Sea Rd".into())),
        ]);
        let mut drafts = HashMap::new();
        drafts.insert(ProfileField::BusinessName, FieldValue::Text("New Co".into()));

        let DiffOutcome::Changes(changes) = build_change_set(&drafts, &snap) else {
            panic!("expected changes");
        };
        assert_eq!(changes.get(ProfileField::Address), None);
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn api_projection_uses_backend_names() {
        let snap = snapshot(&[]);
        let mut drafts = HashMap::new();
        drafts.insert(ProfileField::BusinessName, FieldValue::Text("New Co".into()));
        drafts.insert(ProfileField::YearsInOperation, FieldValue::Number(3.0));

        let DiffOutcome::Changes(changes) = build_change_set(&drafts, &snap) else {
            panic!("expected changes");
        };
        let obj = changes.to_api_object();
        assert_eq!(obj["business_name"], serde_json::json!("New Co"));
        assert_eq!(obj["years_in_operation"], serde_json::json!(3.0));
    }

    #[test]
    fn entries_follow_schema_order() {
        let snap = snapshot(&[]);
        let mut drafts = HashMap::new();
        drafts.insert(ProfileField::PhoneNumber, FieldValue::Text("0112".into()));
        drafts.insert(ProfileField::BusinessName, FieldValue::Text("Co".into()));

        let DiffOutcome::Changes(changes) = build_change_set(&drafts, &snap) else {
            panic!("expected changes");
        };
        assert_eq!(changes.ui_names(), vec!["businessName", "phoneNumber"]);
    }
}
