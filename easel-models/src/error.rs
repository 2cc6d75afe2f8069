//! Error types for model and provider operations.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during model and generation operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No validated profile is active; nothing can be generated.
    #[error("no validated profile is active: {0}")]
    Configuration(String),

    /// Model not found in the merged registry for the active profile.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// Network or timeout failure for a single request.
    #[error("transport error: {0}")]
    Transport(String),

    /// Provider returned a non-success response.
    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    /// Profile credential check failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Named profile does not exist in the store.
    #[error("profile not found: {0}")]
    ProfileNotFound(String),

    /// The last remaining profile cannot be deleted.
    #[error("cannot delete the last remaining profile")]
    LastProfile,

    /// Request violates an invariant (empty prompt, bad size, batch bounds).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
