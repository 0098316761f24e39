//! Derived index of pending values per field.
//!
//! The index is a pure function of the currently-known update requests:
//! for each backend field name, the proposed value from the newest
//! `pending` request touching that field. Older overlapping proposals
//! are not surfaced; if the newest request is later rejected, rebuilding
//! the index surfaces the older proposal again.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::types::RequestId;
use crate::update_request::UpdateRequest;
use crate::value::FieldValue;

/// A pending value prepared for display next to a field's input.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingIndicator {
    /// The proposed value awaiting approval.
    pub value: FieldValue,
    /// The request that proposed it.
    pub request_id: RequestId,
    /// When the proposal was submitted.
    pub submitted_at: DateTime<Utc>,
    /// Render as an inspectable link rather than raw text.
    pub render_as_link: bool,
}

/// Read-only view answering "does field X have a pending proposal?".
#[derive(Debug, Default)]
pub struct PendingValueIndex {
    newest: HashMap<String, PendingIndicator>,
}

impl PendingValueIndex {
    /// Build the index from the currently-known requests.
    ///
    /// Non-pending requests are skipped. When several pending requests
    /// touch the same field, the one with the greatest creation
    /// timestamp wins; ties break on request id so the result is
    /// deterministic.
    pub fn build(requests: &[UpdateRequest]) -> Self {
        let mut newest: HashMap<String, PendingIndicator> = HashMap::new();

        for request in requests.iter().filter(|r| r.is_pending()) {
            for (api_name, value) in &request.requested {
                let candidate = PendingIndicator {
                    value: value.clone(),
                    request_id: request.id,
                    submitted_at: request.created_at,
                    render_as_link: value.looks_like_url(),
                };
                match newest.get(api_name) {
                    Some(current)
                        if (current.submitted_at, current.request_id)
                            >= (candidate.submitted_at, candidate.request_id) => {}
                    _ => {
                        newest.insert(api_name.clone(), candidate);
                    }
                }
            }
        }

        Self { newest }
    }

    /// The pending proposal for a backend field name, if any.
    pub fn get(&self, api_name: &str) -> Option<&PendingIndicator> {
        self.newest.get(api_name)
    }

    /// The pending proposed value for a backend field name, if any.
    pub fn pending_value(&self, api_name: &str) -> Option<&FieldValue> {
        self.newest.get(api_name).map(|i| &i.value)
    }

    /// Backend names of all fields with a pending proposal, sorted.
    pub fn pending_fields(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.newest.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// True when no field has a pending proposal.
    pub fn is_empty(&self) -> bool {
        self.newest.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update_request::RequestStatus;
    use chrono::Duration;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn request(
        created_at: DateTime<Utc>,
        status: RequestStatus,
        fields: &[(&str, FieldValue)],
    ) -> UpdateRequest {
        UpdateRequest {
            id: Uuid::new_v4(),
            record_id: Uuid::new_v4(),
            submitted_by: Uuid::new_v4(),
            requested: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            previous: BTreeMap::new(),
            status,
            created_at,
            resolved_at: None,
            rejection_reason: None,
        }
    }

    #[test]
    fn newest_pending_wins_per_field() {
        let t0 = Utc::now();
        let older = request(
            t0,
            RequestStatus::Pending,
            &[("business_name", FieldValue::Text("First".into()))],
        );
        let newer = request(
            t0 + Duration::seconds(30),
            RequestStatus::Pending,
            &[("business_name", FieldValue::Text("Second".into()))],
        );

        // Input order must not matter.
        for requests in [vec![older.clone(), newer.clone()], vec![newer, older]] {
            let index = PendingValueIndex::build(&requests);
            assert_eq!(
                index.pending_value("business_name"),
                Some(&FieldValue::Text("Second".into()))
            );
        }
    }

    #[test]
    fn resolved_requests_are_invisible() {
        let t0 = Utc::now();
        let approved = request(
            t0,
            RequestStatus::Approved,
            &[("business_name", FieldValue::Text("Done".into()))],
        );
        let rejected = request(
            t0,
            RequestStatus::Rejected,
            &[("description", FieldValue::Text("Nope".into()))],
        );

        let index = PendingValueIndex::build(&[approved, rejected]);
        assert!(index.is_empty());
        assert_eq!(index.pending_value("business_name"), None);
    }

    #[test]
    fn rejecting_the_newest_resurfaces_the_older_proposal() {
        let t0 = Utc::now();
        let older = request(
            t0,
            RequestStatus::Pending,
            &[("business_name", FieldValue::Text("First".into()))],
        );
        let mut newer = request(
            t0 + Duration::seconds(30),
            RequestStatus::Pending,
            &[("business_name", FieldValue::Text("Second".into()))],
        );

        newer.reject("superseded", Utc::now()).unwrap();
        let index = PendingValueIndex::build(&[older, newer]);
        assert_eq!(
            index.pending_value("business_name"),
            Some(&FieldValue::Text("First".into()))
        );
    }

    #[test]
    fn fields_from_overlapping_requests_are_merged() {
        let t0 = Utc::now();
        let a = request(
            t0,
            RequestStatus::Pending,
            &[
                ("business_name", FieldValue::Text("A".into())),
                ("description", FieldValue::Text("about us".into())),
            ],
        );
        let b = request(
            t0 + Duration::seconds(5),
            RequestStatus::Pending,
            &[("business_name", FieldValue::Text("B".into()))],
        );

        let index = PendingValueIndex::build(&[a, b]);
        assert_eq!(index.pending_fields(), vec!["business_name", "description"]);
        assert_eq!(
            index.pending_value("business_name"),
            Some(&FieldValue::Text("B".into()))
        );
        assert_eq!(
            index.pending_value("description"),
            Some(&FieldValue::Text("about us".into()))
        );
    }

    #[test]
    fn url_values_render_as_links() {
        let t0 = Utc::now();
        let req = request(
            t0,
            RequestStatus::Pending,
            &[
                (
                    "registration_certificate_url",
                    FieldValue::Text("https://cdn.example.com/cert.pdf".into()),
                ),
                ("business_name", FieldValue::Text("New Co".into())),
            ],
        );

        let index = PendingValueIndex::build(&[req]);
        assert!(index.get("registration_certificate_url").unwrap().render_as_link);
        assert!(!index.get("business_name").unwrap().render_as_link);
    }

    #[test]
    fn equal_timestamps_break_ties_deterministically() {
        let t0 = Utc::now();
        let mut a = request(
            t0,
            RequestStatus::Pending,
            &[("business_name", FieldValue::Text("A".into()))],
        );
        let mut b = request(
            t0,
            RequestStatus::Pending,
            &[("business_name", FieldValue::Text("B".into()))],
        );
        // Force a known id ordering.
        a.id = Uuid::from_u128(1);
        b.id = Uuid::from_u128(2);

        for requests in [vec![a.clone(), b.clone()], vec![b, a]] {
            let index = PendingValueIndex::build(&requests);
            assert_eq!(
                index.pending_value("business_name"),
                Some(&FieldValue::Text("B".into()))
            );
        }
    }
}
