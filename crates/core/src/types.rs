//! Shared identifier aliases.

/// Vendor account identifier.
pub type VendorId = uuid::Uuid;
/// Service listing identifier.
pub type ServiceId = uuid::Uuid;
/// Update request identifier.
pub type RequestId = uuid::Uuid;
/// In-progress registration session identifier.
pub type RegistrationId = uuid::Uuid;
/// Authenticated user identifier.
pub type UserId = uuid::Uuid;
/// Generic editable-record identifier (vendor profile or service).
pub type RecordId = uuid::Uuid;
