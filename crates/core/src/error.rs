//! Domain-level error type shared across the workspace.

/// Domain error produced by the core model.
///
/// Higher layers (HTTP client, sync engine, binaries) wrap this type
/// rather than defining their own validation/conflict semantics.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity kind, e.g. `"update request"`.
        entity: &'static str,
        /// Identifier that failed to resolve.
        id: String,
    },

    /// Input failed a domain validation rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with current state (e.g. resolving an
    /// already-resolved update request).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience alias for core results.
pub type CoreResult<T> = Result<T, CoreError>;
