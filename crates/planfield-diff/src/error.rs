//! Error types for the diff crate.

/// Errors that can occur while loading or validating a diff.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A diff key is malformed.
    #[error("invalid diff key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
