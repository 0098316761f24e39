//! Registration wizard step machine for new vendors.
//!
//! Defines the wizard step definitions, status enumeration, and
//! validation helpers used by the client and portal layers for the
//! multi-step vendor registration flow.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Registration status
// ---------------------------------------------------------------------------

/// Status values for a registration session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    InProgress,
    Submitted,
    Abandoned,
}

impl RegistrationStatus {
    /// Parse a status string from the backend.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "submitted" => Ok(Self::Submitted),
            "abandoned" => Ok(Self::Abandoned),
            _ => Err(CoreError::Validation(format!(
                "Invalid registration status '{s}'. Must be one of: in_progress, submitted, abandoned"
            ))),
        }
    }

    /// Backend-compatible string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Submitted => "submitted",
            Self::Abandoned => "abandoned",
        }
    }
}

// ---------------------------------------------------------------------------
// Wizard steps
// ---------------------------------------------------------------------------

/// The five steps of the vendor registration wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Account,
    BusinessDetails,
    Documents,
    Services,
    Review,
}

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 5;

impl WizardStep {
    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Account),
            2 => Ok(Self::BusinessDetails),
            3 => Ok(Self::Documents),
            4 => Ok(Self::Services),
            5 => Ok(Self::Review),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::Account => 1,
            Self::BusinessDetails => 2,
            Self::Documents => 3,
            Self::Services => 4,
            Self::Review => 5,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::Account => "Account",
            Self::BusinessDetails => "Business Details",
            Self::Documents => "Documents",
            Self::Services => "Services",
            Self::Review => "Review",
        }
    }
}

// ---------------------------------------------------------------------------
// Step data key names
// ---------------------------------------------------------------------------

/// JSON key for account credentials in step 1 data.
pub const STEP_DATA_KEY_ACCOUNT: &str = "account";

/// JSON key for business profile fields in step 2 data.
pub const STEP_DATA_KEY_BUSINESS: &str = "business";

/// JSON key for uploaded document URLs in step 3 data.
pub const STEP_DATA_KEY_DOCUMENTS: &str = "documents";

/// JSON key for initial service listings in step 4 data.
pub const STEP_DATA_KEY_SERVICES: &str = "services";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a step transition.
///
/// A transition is valid if the next step is exactly one step forward
/// or one step backward from the current step.
pub fn validate_step_transition(current: u8, next: u8) -> Result<(), CoreError> {
    validate_step_number(current)?;
    validate_step_number(next)?;

    let diff = (next as i16) - (current as i16);
    if diff != 1 && diff != -1 {
        return Err(CoreError::Validation(format!(
            "Cannot transition from step {current} to step {next}. \
             Must advance or go back exactly one step."
        )));
    }

    Ok(())
}

/// Validate that step data contains the required keys for a given step.
///
/// Structural validation only (presence and non-emptiness of required
/// keys); field-level validation of the values belongs to the payload
/// types in the client layer.
pub fn validate_step_data(step: u8, data: &serde_json::Value) -> Result<(), CoreError> {
    let step_enum = WizardStep::from_number(step)?;
    let obj = data
        .as_object()
        .ok_or_else(|| CoreError::Validation("Step data must be a JSON object".to_string()))?;

    match step_enum {
        WizardStep::Account => {
            if !obj.contains_key(STEP_DATA_KEY_ACCOUNT) {
                return Err(CoreError::Validation(
                    "Step 1 (Account) requires 'account' data".to_string(),
                ));
            }
        }
        WizardStep::BusinessDetails => {
            if !obj.contains_key(STEP_DATA_KEY_BUSINESS) {
                return Err(CoreError::Validation(
                    "Step 2 (Business Details) requires 'business' data".to_string(),
                ));
            }
        }
        WizardStep::Documents => {
            let has_documents = obj
                .get(STEP_DATA_KEY_DOCUMENTS)
                .and_then(|v| v.as_array())
                .is_some_and(|a| !a.is_empty());
            if !has_documents {
                return Err(CoreError::Validation(
                    "Step 3 (Documents) requires at least one uploaded document".to_string(),
                ));
            }
        }
        WizardStep::Services => {
            let has_services = obj
                .get(STEP_DATA_KEY_SERVICES)
                .and_then(|v| v.as_array())
                .is_some_and(|a| !a.is_empty());
            if !has_services {
                return Err(CoreError::Validation(
                    "Step 4 (Services) requires at least one service listing".to_string(),
                ));
            }
        }
        WizardStep::Review => {
            // Final step; nothing required before submission.
        }
    }

    Ok(())
}

/// Check whether the current step can be advanced based on step data.
pub fn can_advance_step(step: u8, step_data: &serde_json::Value) -> bool {
    validate_step_data(step, step_data).is_ok()
}

/// Validate that a step number is within the valid range.
pub fn validate_step_number(step: u8) -> Result<(), CoreError> {
    if step < MIN_STEP || step > MAX_STEP {
        return Err(CoreError::Validation(format!(
            "Step {step} is out of range ({MIN_STEP}..{MAX_STEP})"
        )));
    }
    Ok(())
}

/// Check if a registration can be submitted (must be on the Review step).
pub fn can_submit_registration(current_step: u8) -> Result<(), CoreError> {
    if current_step != MAX_STEP {
        return Err(CoreError::Validation(format!(
            "Cannot submit registration: must be on step {MAX_STEP} (Review), \
             currently on step {current_step}"
        )));
    }
    Ok(())
}

/// Check if a registration can be abandoned (must be in progress).
pub fn can_abandon_registration(status: &str) -> Result<(), CoreError> {
    if status != RegistrationStatus::InProgress.as_str() {
        return Err(CoreError::Validation(format!(
            "Cannot abandon registration with status '{status}'. \
             Only 'in_progress' registrations can be abandoned."
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_roundtrip() {
        for status in [
            RegistrationStatus::InProgress,
            RegistrationStatus::Submitted,
            RegistrationStatus::Abandoned,
        ] {
            assert_eq!(
                RegistrationStatus::from_str_db(status.as_str()).unwrap(),
                status
            );
        }
        assert!(RegistrationStatus::from_str_db("invalid").is_err());
    }

    #[test]
    fn step_number_roundtrip() {
        for n in MIN_STEP..=MAX_STEP {
            let step = WizardStep::from_number(n).unwrap();
            assert_eq!(step.to_number(), n);
            assert!(!step.label().is_empty());
        }
        assert!(WizardStep::from_number(0).is_err());
        assert!(WizardStep::from_number(6).is_err());
    }

    #[test]
    fn transition_by_one_step_is_valid() {
        for current in MIN_STEP..MAX_STEP {
            assert!(validate_step_transition(current, current + 1).is_ok());
            assert!(validate_step_transition(current + 1, current).is_ok());
        }
    }

    #[test]
    fn transition_skip_or_stay_is_invalid() {
        assert!(validate_step_transition(1, 3).is_err());
        assert!(validate_step_transition(5, 3).is_err());
        for step in MIN_STEP..=MAX_STEP {
            assert!(validate_step_transition(step, step).is_err());
        }
    }

    #[test]
    fn transition_out_of_range_is_invalid() {
        assert!(validate_step_transition(0, 1).is_err());
        assert!(validate_step_transition(5, 6).is_err());
    }

    #[test]
    fn step1_requires_account() {
        assert!(validate_step_data(1, &json!({ "account": {"email": "a@b.lk"} })).is_ok());
        assert!(validate_step_data(1, &json!({})).is_err());
    }

    #[test]
    fn step2_requires_business() {
        assert!(validate_step_data(2, &json!({ "business": {"businessName": "Co"} })).is_ok());
        assert!(validate_step_data(2, &json!({})).is_err());
    }

    #[test]
    fn step3_requires_nonempty_documents() {
        assert!(validate_step_data(3, &json!({ "documents": ["https://x/cert.pdf"] })).is_ok());
        assert!(validate_step_data(3, &json!({ "documents": [] })).is_err());
        assert!(validate_step_data(3, &json!({})).is_err());
    }

    #[test]
    fn step4_requires_nonempty_services() {
        assert!(validate_step_data(4, &json!({ "services": [{"serviceName": "Tour"}] })).is_ok());
        assert!(validate_step_data(4, &json!({ "services": [] })).is_err());
    }

    #[test]
    fn step5_has_no_required_keys() {
        assert!(validate_step_data(5, &json!({})).is_ok());
    }

    #[test]
    fn step_data_rejects_non_object() {
        assert!(validate_step_data(1, &json!("nope")).is_err());
        assert!(validate_step_data(1, &json!(null)).is_err());
    }

    #[test]
    fn can_advance_mirrors_validation() {
        assert!(can_advance_step(1, &json!({ "account": {} })));
        assert!(!can_advance_step(1, &json!({})));
    }

    #[test]
    fn submit_only_from_review_step() {
        assert!(can_submit_registration(5).is_ok());
        for step in MIN_STEP..MAX_STEP {
            assert!(can_submit_registration(step).is_err());
        }
    }

    #[test]
    fn abandon_only_in_progress() {
        assert!(can_abandon_registration("in_progress").is_ok());
        assert!(can_abandon_registration("submitted").is_err());
        assert!(can_abandon_registration("abandoned").is_err());
    }
}
