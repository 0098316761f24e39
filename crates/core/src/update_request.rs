//! Update requests: proposed batches of field changes awaiting
//! back-office review.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{RecordId, RequestId, UserId};
use crate::value::FieldValue;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of an update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting a reviewer decision.
    Pending,
    /// Approved; the requested values became the confirmed record.
    Approved,
    /// Rejected; the requested values were discarded.
    Rejected,
}

impl RequestStatus {
    /// Parse a status string as stored by the backend.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(CoreError::Validation(format!(
                "Invalid request status '{s}'. Must be one of: pending, approved, rejected"
            ))),
        }
    }

    /// Backend-compatible string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

// ---------------------------------------------------------------------------
// Update request
// ---------------------------------------------------------------------------

/// One proposed batch of field changes for an editable record.
///
/// `requested` and `previous` are keyed by backend field name. Once a
/// request leaves `pending` it is immutable; resolving it a second time
/// is a conflict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub id: RequestId,
    /// The record (vendor profile or service) this request targets.
    pub record_id: RecordId,
    pub submitted_by: UserId,
    /// Proposed new values, keyed by backend field name.
    pub requested: BTreeMap<String, FieldValue>,
    /// Confirmed values at submission time, for reviewer context.
    pub previous: BTreeMap<String, FieldValue>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

impl UpdateRequest {
    /// Whether this request still awaits review.
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Approve the request.
    pub fn approve(&mut self, at: DateTime<Utc>) -> Result<(), CoreError> {
        self.ensure_pending()?;
        self.status = RequestStatus::Approved;
        self.resolved_at = Some(at);
        Ok(())
    }

    /// Reject the request with a reviewer-supplied reason.
    ///
    /// A blank reason is rejected: vendors need to know what to fix
    /// before resubmitting.
    pub fn reject(&mut self, reason: &str, at: DateTime<Utc>) -> Result<(), CoreError> {
        self.ensure_pending()?;
        if reason.trim().is_empty() {
            return Err(CoreError::Validation(
                "A rejection must include a non-empty reason".to_string(),
            ));
        }
        self.status = RequestStatus::Rejected;
        self.resolved_at = Some(at);
        self.rejection_reason = Some(reason.trim().to_string());
        Ok(())
    }

    fn ensure_pending(&self) -> Result<(), CoreError> {
        if self.status != RequestStatus::Pending {
            return Err(CoreError::Conflict(format!(
                "Update request {} is already {}",
                self.id,
                self.status.as_str()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    fn pending_request() -> UpdateRequest {
        UpdateRequest {
            id: Uuid::new_v4(),
            record_id: Uuid::new_v4(),
            submitted_by: Uuid::new_v4(),
            requested: BTreeMap::from([(
                "business_name".to_string(),
                FieldValue::Text("New Co".into()),
            )]),
            previous: BTreeMap::from([(
                "business_name".to_string(),
                FieldValue::Text("Old Co".into()),
            )]),
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            resolved_at: None,
            rejection_reason: None,
        }
    }

    #[test]
    fn status_roundtrip() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            assert_eq!(RequestStatus::from_str_db(status.as_str()).unwrap(), status);
        }
        assert!(RequestStatus::from_str_db("unknown").is_err());
    }

    #[test]
    fn approve_resolves_once() {
        let mut request = pending_request();
        let now = Utc::now();
        request.approve(now).unwrap();
        assert_eq!(request.status, RequestStatus::Approved);
        assert_eq!(request.resolved_at, Some(now));

        assert_matches!(request.approve(Utc::now()), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn reject_requires_reason() {
        let mut request = pending_request();
        assert_matches!(
            request.reject("   ", Utc::now()),
            Err(CoreError::Validation(_))
        );
        assert!(request.is_pending());

        request.reject("Certificate is illegible", Utc::now()).unwrap();
        assert_eq!(request.status, RequestStatus::Rejected);
        assert_eq!(
            request.rejection_reason.as_deref(),
            Some("Certificate is illegible")
        );
    }

    #[test]
    fn resolved_requests_are_terminal() {
        let mut request = pending_request();
        request.reject("reason", Utc::now()).unwrap();
        assert_matches!(request.approve(Utc::now()), Err(CoreError::Conflict(_)));
        assert_matches!(
            request.reject("again", Utc::now()),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn serde_uses_snake_case_status() {
        let request = pending_request();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["requested"]["business_name"], "New Co");
    }
}
