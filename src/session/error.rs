//! Errors raised by session operations

use thiserror::Error;

use crate::generation::{ErrorKind, GenerationError};

/// Errors returned when a session operation cannot proceed
#[derive(Debug, Error)]
pub enum SessionError {
    /// Topic or duration (or lessons, when required) left blank
    #[error("Please fill in both topic and duration")]
    MissingFields,

    /// Lessons are required by configuration but were left blank
    #[error("Please fill in the topic, duration and lessons")]
    MissingLessons,

    /// Quiz requested without a topic
    #[error("Please enter a topic before generating a quiz")]
    MissingTopic,

    /// The same kind of request is already in flight
    #[error("A request is already in progress")]
    Busy,

    /// The operation needs the dashboard but no plan exists yet
    #[error("Create a study plan first")]
    NotStudying,

    /// The generation service failed
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl SessionError {
    /// Which bucket of the error taxonomy this failure falls into
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Generation(err) => err.kind(),
            _ => ErrorKind::Validation,
        }
    }
}
