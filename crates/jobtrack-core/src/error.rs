//! Error types for the JobTrack crates.

use thiserror::Error;

/// A shared error type for the entire JobTrack application.
///
/// This provides typed, structured error variants so the mutation layer can
/// report failures through an explicit interface instead of ad-hoc strings.
#[derive(Error, Debug, Clone)]
pub enum JobTrackError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Data access error (document store layer)
    #[error("Store error: {0}")]
    Store(String),

    /// A stored document carried a value the domain model cannot represent
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl JobTrackError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Creates an InvalidData error
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A type alias for `Result<T, JobTrackError>`.
pub type Result<T> = std::result::Result<T, JobTrackError>;
