//! Wire shapes exchanged with the backend, plus validated request
//! payloads.

use serde::{Deserialize, Serialize};
use serendib_core::types::VendorId;
use validator::Validate;

/// Raw response from a change-set submission.
///
/// The backend either applies the change directly or parks it as an
/// update request; `pending_approval` distinguishes the two.
#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub pending_approval: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub changed_fields: Vec<String>,
    /// Present on direct apply when the backend echoes the updated
    /// record.
    #[serde(default)]
    pub record: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Interpreted result of a change-set submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The backend applied the changes immediately.
    Applied {
        /// The updated record, if the backend returned it.
        record: Option<serde_json::Map<String, serde_json::Value>>,
    },
    /// The backend created an update request; the confirmed record is
    /// unchanged until a reviewer approves it.
    PendingApproval {
        message: Option<String>,
        /// UI field names now awaiting review.
        changed_fields: Vec<String>,
    },
}

impl From<SubmitResponse> for SubmitOutcome {
    fn from(response: SubmitResponse) -> Self {
        if response.pending_approval {
            Self::PendingApproval {
                message: response.message,
                changed_fields: response.changed_fields,
            }
        } else {
            Self::Applied {
                record: response.record,
            }
        }
    }
}

/// Response from a document upload.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    /// Public URL of the stored file.
    pub url: String,
}

/// A vendor row in the back-office review queue.
#[derive(Debug, Clone, Deserialize)]
pub struct VendorSummary {
    pub vendor_id: VendorId,
    pub business_name: String,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Account details captured in step 1 of the registration wizard.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct AccountDetails {
    #[validate(email(message = "Contact email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 7, max = 20, message = "Phone number must be 7-20 characters"))]
    pub phone: String,
    #[validate(length(min = 2, max = 120, message = "Business name must be 2-120 characters"))]
    pub business_name: String,
}

/// Payload for sending a support message.
///
/// The body is checked against [`serendib_core::chat::validate_message_body`]
/// by [`crate::VendorApi::send_message`] before any request is made.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessagePayload {
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn direct_apply_response_maps_to_applied() {
        let response: SubmitResponse = serde_json::from_value(json!({
            "success": true,
            "record": { "business_name": "New Co" },
        }))
        .unwrap();
        assert_matches!(
            SubmitOutcome::from(response),
            SubmitOutcome::Applied { record: Some(_) }
        );
    }

    #[test]
    fn pending_response_maps_to_pending_approval() {
        let response: SubmitResponse = serde_json::from_value(json!({
            "success": true,
            "pending_approval": true,
            "message": "Changes submitted for review",
            "changed_fields": ["businessName"],
        }))
        .unwrap();
        let outcome = SubmitOutcome::from(response);
        assert_matches!(
            outcome,
            SubmitOutcome::PendingApproval { ref changed_fields, .. }
                if changed_fields == &["businessName".to_string()]
        );
    }

    #[test]
    fn minimal_success_response_is_applied() {
        let response: SubmitResponse = serde_json::from_value(json!({ "success": true })).unwrap();
        assert_matches!(
            SubmitOutcome::from(response),
            SubmitOutcome::Applied { record: None }
        );
    }

    #[test]
    fn account_details_are_validated() {
        let good = AccountDetails {
            email: "owner@lankatours.lk".into(),
            phone: "+94112223344".into(),
            business_name: "Lanka Tours".into(),
        };
        assert!(good.validate().is_ok());

        let bad = AccountDetails {
            email: "not-an-email".into(),
            phone: "123".into(),
            business_name: "L".into(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("phone"));
        assert!(errors.field_errors().contains_key("business_name"));
    }
}
