//! User roles and role-based capability checks.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A tourism vendor managing their own profile and services.
    Vendor,
    /// A back-office manager reviewing vendor submissions.
    Manager,
    /// A platform administrator.
    Admin,
}

impl Role {
    /// Parse a role string as stored by the backend.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "vendor" => Ok(Self::Vendor),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(CoreError::Validation(format!(
                "Invalid role '{s}'. Must be one of: vendor, manager, admin"
            ))),
        }
    }

    /// Backend-compatible string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vendor => "vendor",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Whether this role may approve or reject update requests.
    pub fn can_resolve_requests(&self) -> bool {
        matches!(self, Self::Manager | Self::Admin)
    }
}
