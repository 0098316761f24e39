//! Errors from the backend REST client.

use serendib_core::CoreError;

/// Errors surfaced by [`VendorApi`](crate::api::VendorApi) calls.
///
/// Every variant is recoverable: the caller keeps its local state and
/// lets the user retry the same action.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response decoded but failed a domain check.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience alias for client results.
pub type ApiResult<T> = Result<T, ApiError>;
