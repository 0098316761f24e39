//! Support-chat message model and validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::{UserId, VendorId};

/// Maximum length for a support message body, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 4_000;

/// One message in a vendor's support conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportMessage {
    pub id: uuid::Uuid,
    /// The vendor whose conversation this message belongs to.
    pub vendor_id: VendorId,
    pub sender_id: UserId,
    pub sender_role: Role,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Validate a message body before sending.
pub fn validate_message_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation(
            "Message body must not be empty".to_string(),
        ));
    }
    if body.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Message body exceeds {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// The timestamp of the newest message, used as the `since` cursor for
/// the next poll.
pub fn latest_timestamp(messages: &[SupportMessage]) -> Option<DateTime<Utc>> {
    messages.iter().map(|m| m.created_at).max()
}
