//! Explicit session context for an authenticated user.
//!
//! The context is created once after login and passed down to every
//! component that needs to know who is acting; nothing reads ambient
//! global state. Logout consumes the context.

use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::{UserId, VendorId};

/// Who is using this session, established at login.
#[derive(Debug, Clone)]
pub struct SessionContext {
    user_id: UserId,
    role: Role,
    /// Present for vendor users; back-office users act across vendors.
    vendor_id: Option<VendorId>,
    started_at: DateTime<Utc>,
}

impl SessionContext {
    /// Initialize a session after the backend has authenticated the
    /// user.
    ///
    /// Vendor sessions must carry the vendor id they act for.
    pub fn init(user_id: UserId, role: Role, vendor_id: Option<VendorId>) -> Result<Self, CoreError> {
        if role == Role::Vendor && vendor_id.is_none() {
            return Err(CoreError::Validation(
                "A vendor session requires a vendor id".to_string(),
            ));
        }
        Ok(Self {
            user_id,
            role,
            vendor_id,
            started_at: Utc::now(),
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn vendor_id(&self) -> Option<VendorId> {
        self.vendor_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Ensure the session may approve or reject update requests.
    pub fn require_reviewer(&self) -> Result<(), CoreError> {
        if self.role.can_resolve_requests() {
            Ok(())
        } else {
            Err(CoreError::Forbidden(format!(
                "Role '{}' cannot resolve update requests",
                self.role.as_str()
            )))
        }
    }

    /// Tear the session down on logout, consuming it.
    pub fn teardown(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    #[test]
    fn vendor_session_requires_vendor_id() {
        assert_matches!(
            SessionContext::init(Uuid::new_v4(), Role::Vendor, None),
            Err(CoreError::Validation(_))
        );
        assert!(SessionContext::init(Uuid::new_v4(), Role::Vendor, Some(Uuid::new_v4())).is_ok());
    }

    #[test]
    fn back_office_sessions_need_no_vendor_id() {
        assert!(SessionContext::init(Uuid::new_v4(), Role::Manager, None).is_ok());
        assert!(SessionContext::init(Uuid::new_v4(), Role::Admin, None).is_ok());
    }

    #[test]
    fn only_reviewers_may_resolve() {
        let vendor =
            SessionContext::init(Uuid::new_v4(), Role::Vendor, Some(Uuid::new_v4())).unwrap();
        assert_matches!(vendor.require_reviewer(), Err(CoreError::Forbidden(_)));

        let manager = SessionContext::init(Uuid::new_v4(), Role::Manager, None).unwrap();
        assert!(manager.require_reviewer().is_ok());
    }
}
