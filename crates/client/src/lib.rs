//! HTTP client for the Serendib vendor platform backend.

pub mod api;
pub mod dto;
pub mod error;

pub use api::VendorApi;
pub use dto::{
    AccountDetails, SendMessagePayload, SubmitOutcome, SubmitResponse, UploadResponse,
    VendorSummary,
};
pub use error::{ApiError, ApiResult};
