//! Error types for the generation service

use thiserror::Error;

/// Broad classification of a failure, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required input was missing before the action was allowed
    Validation,
    /// The service could not be reached or answered with a non-success status
    Transport,
    /// The service answered successfully but the body carried an error
    Service,
}

/// Errors that can occur when talking to the plan/quiz generation service
#[derive(Debug, Error)]
pub enum GenerationError {
    /// HTTP request failed before a response arrived
    #[error("Could not reach the study service: {0}")]
    Request(#[from] reqwest::Error),

    /// Service returned a non-success status
    #[error("Study service error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Service reported an error in an otherwise successful response
    #[error("{0}")]
    Service(String),

    /// Response body was not the JSON we expected
    #[error("Unexpected response from the study service: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GenerationError {
    /// Which bucket of the error taxonomy this failure falls into
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Request(_) | Self::Status { .. } => ErrorKind::Transport,
            Self::Service(_) | Self::Decode(_) => ErrorKind::Service,
        }
    }
}
