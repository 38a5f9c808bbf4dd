//! Admin console error type.

use daisy_client::{ApiError, StorageError};

/// Errors produced by admin console operations.
///
/// The `Display` form of every variant is user-facing notification text.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// The backend rejected the request or was unreachable.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Persisting the session failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Input rejected before any network call.
    #[error("{0}")]
    Validation(String),

    /// A request payload could not be serialized.
    #[error("Request failed")]
    Payload(#[from] serde_json::Error),

    /// An operation that needs an admin session was called without one.
    #[error("No admin token found")]
    NotAuthenticated,
}
