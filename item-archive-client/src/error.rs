//! Error types for archive operations.

use crate::status::{ErrorCode, Status};
use thiserror::Error;

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors surfaced by [`Archive`](crate::Archive) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArchiveError {
    /// No entry at the addressed path, or a required ancestor is missing.
    #[error("not found: {0}")]
    NotFound(String),

    /// The target path is already occupied.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The store could not be reached or did not answer.
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered with a message that breaks the contract.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Any other fault the store reported.
    #[error("store error ({code}): {message}")]
    Remote { code: ErrorCode, message: String },

    /// The client was configured with unusable settings.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ArchiveError {
    /// Returns true if repeating the operation may succeed.
    ///
    /// `NotFound` and `AlreadyExists` are definitive answers from the store;
    /// only transport failures are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ArchiveError::Transport(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ArchiveError::NotFound(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, ArchiveError::AlreadyExists(_))
    }
}

impl From<Status> for ArchiveError {
    fn from(status: Status) -> Self {
        match status.code {
            ErrorCode::NotFound => ArchiveError::NotFound(status.message),
            ErrorCode::AlreadyExists => ArchiveError::AlreadyExists(status.message),
            ErrorCode::Unavailable | ErrorCode::DeadlineExceeded => {
                ArchiveError::Transport(status.message)
            }
            code => ArchiveError::Remote {
                code,
                message: status.message,
            },
        }
    }
}
