//! Typed field schemas for editable records.
//!
//! Every editable record kind (vendor profile, service listing) has a
//! field enum implementing [`FieldSchema`].  The enum is the single
//! source of truth for the bidirectional mapping between UI field names
//! (camelCase) and backend field names (snake_case).  A mismatch here
//! silently breaks diffing and pending-value indicators, so
//! [`validate_schema`] is run at startup and fails fast on any
//! duplicate, empty, or mis-cased name.

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Field kinds
// ---------------------------------------------------------------------------

/// Semantic type of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form text.
    Text,
    /// One of a fixed set of backend-defined choices.
    Choice,
    /// An unordered list of strings.
    List,
    /// A numeric value.
    Number,
    /// A URL (rendered as a link, never raw text).
    Url,
    /// An uploaded document/media URL, settable via the upload
    /// side-channel as well as direct edit.
    Document,
}

// ---------------------------------------------------------------------------
// Schema trait
// ---------------------------------------------------------------------------

/// A record kind's field enumeration.
pub trait FieldSchema: Debug + Copy + Eq + Hash + 'static {
    /// Entity label used in errors and logs, e.g. `"vendor profile"`.
    const RECORD_KIND: &'static str;

    /// Every field of the record, in display order.
    fn all() -> &'static [Self];

    /// Field name as the UI knows it (camelCase).
    fn ui_name(self) -> &'static str;

    /// Field name as the backend knows it (snake_case).
    fn api_name(self) -> &'static str;

    /// Semantic type of the field.
    fn kind(self) -> FieldKind;

    /// Resolve a UI field name to a field, if known.
    fn from_ui_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.ui_name() == name)
    }

    /// Resolve a backend field name to a field, if known.
    fn from_api_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.api_name() == name)
    }
}

/// Validate a schema's name mapping at startup.
///
/// Checks that every UI name is non-empty camelCase (no underscores,
/// lowercase first letter), every backend name is non-empty snake_case
/// (ASCII lowercase and underscores), and that both namespaces are
/// free of duplicates.
pub fn validate_schema<S: FieldSchema>() -> Result<(), CoreError> {
    let mut ui_seen = std::collections::HashSet::new();
    let mut api_seen = std::collections::HashSet::new();

    for field in S::all() {
        let ui = field.ui_name();
        let api = field.api_name();

        if ui.is_empty() || api.is_empty() {
            return Err(CoreError::Internal(format!(
                "{} schema: field {field:?} has an empty name",
                S::RECORD_KIND
            )));
        }
        if ui.contains('_') || !ui.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
            return Err(CoreError::Internal(format!(
                "{} schema: UI name '{ui}' is not camelCase",
                S::RECORD_KIND
            )));
        }
        if !api
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(CoreError::Internal(format!(
                "{} schema: backend name '{api}' is not snake_case",
                S::RECORD_KIND
            )));
        }
        if !ui_seen.insert(ui) {
            return Err(CoreError::Internal(format!(
                "{} schema: duplicate UI name '{ui}'",
                S::RECORD_KIND
            )));
        }
        if !api_seen.insert(api) {
            return Err(CoreError::Internal(format!(
                "{} schema: duplicate backend name '{api}'",
                S::RECORD_KIND
            )));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Vendor profile schema
// ---------------------------------------------------------------------------

/// Fields of a vendor profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    BusinessName,
    BusinessType,
    Description,
    ContactEmail,
    PhoneNumber,
    WebsiteUrl,
    Address,
    Districts,
    Languages,
    YearsInOperation,
    RegistrationCertificate,
    BusinessLogo,
}

impl FieldSchema for ProfileField {
    const RECORD_KIND: &'static str = "vendor profile";

    fn all() -> &'static [Self] {
        &[
            Self::BusinessName,
            Self::BusinessType,
            Self::Description,
            Self::ContactEmail,
            Self::PhoneNumber,
            Self::WebsiteUrl,
            Self::Address,
            Self::Districts,
            Self::Languages,
            Self::YearsInOperation,
            Self::RegistrationCertificate,
            Self::BusinessLogo,
        ]
    }

    fn ui_name(self) -> &'static str {
        match self {
            Self::BusinessName => "businessName",
            Self::BusinessType => "businessType",
            Self::Description => "description",
            Self::ContactEmail => "contactEmail",
            Self::PhoneNumber => "phoneNumber",
            Self::WebsiteUrl => "websiteUrl",
            Self::Address => "address",
            Self::Districts => "districts",
            Self::Languages => "languages",
            Self::YearsInOperation => "yearsInOperation",
            Self::RegistrationCertificate => "registrationCertificate",
            Self::BusinessLogo => "businessLogo",
        }
    }

    fn api_name(self) -> &'static str {
        match self {
            Self::BusinessName => "business_name",
            Self::BusinessType => "business_type",
            Self::Description => "description",
            Self::ContactEmail => "contact_email",
            Self::PhoneNumber => "phone_number",
            Self::WebsiteUrl => "website_url",
            Self::Address => "address",
            Self::Districts => "districts",
            Self::Languages => "languages",
            Self::YearsInOperation => "years_in_operation",
            Self::RegistrationCertificate => "registration_certificate_url",
            Self::BusinessLogo => "business_logo_url",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            Self::BusinessName | Self::Description | Self::Address | Self::PhoneNumber => {
                FieldKind::Text
            }
            Self::BusinessType => FieldKind::Choice,
            Self::ContactEmail => FieldKind::Text,
            Self::WebsiteUrl => FieldKind::Url,
            Self::Districts | Self::Languages => FieldKind::List,
            Self::YearsInOperation => FieldKind::Number,
            Self::RegistrationCertificate | Self::BusinessLogo => FieldKind::Document,
        }
    }
}

// ---------------------------------------------------------------------------
// Service listing schema
// ---------------------------------------------------------------------------

/// Fields of a service listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceField {
    ServiceName,
    Category,
    Description,
    PriceAmount,
    Currency,
    DurationHours,
    Locations,
    Inclusions,
    CoverPhoto,
}

impl FieldSchema for ServiceField {
    const RECORD_KIND: &'static str = "service listing";

    fn all() -> &'static [Self] {
        &[
            Self::ServiceName,
            Self::Category,
            Self::Description,
            Self::PriceAmount,
            Self::Currency,
            Self::DurationHours,
            Self::Locations,
            Self::Inclusions,
            Self::CoverPhoto,
        ]
    }

    fn ui_name(self) -> &'static str {
        match self {
            Self::ServiceName => "serviceName",
            Self::Category => "category",
            Self::Description => "description",
            Self::PriceAmount => "priceAmount",
            Self::Currency => "currency",
            Self::DurationHours => "durationHours",
            Self::Locations => "locations",
            Self::Inclusions => "inclusions",
            Self::CoverPhoto => "coverPhoto",
        }
    }

    fn api_name(self) -> &'static str {
        match self {
            Self::ServiceName => "service_name",
            Self::Category => "category",
            Self::Description => "description",
            Self::PriceAmount => "price_amount",
            Self::Currency => "currency",
            Self::DurationHours => "duration_hours",
            Self::Locations => "locations",
            Self::Inclusions => "inclusions",
            Self::CoverPhoto => "cover_photo_url",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            Self::ServiceName | Self::Description => FieldKind::Text,
            Self::Category | Self::Currency => FieldKind::Choice,
            Self::PriceAmount | Self::DurationHours => FieldKind::Number,
            Self::Locations | Self::Inclusions => FieldKind::List,
            Self::CoverPhoto => FieldKind::Document,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
