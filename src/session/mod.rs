//! Study session state
//!
//! Holds the user's configuration, the generated plan and quiz, and the
//! answer selections. All transitions go through [`SessionController`];
//! network calls are described as [`Pending`] requests and fed back with
//! their ticket so late responses can be recognised and dropped.

pub mod config;
pub mod controller;
pub mod error;
pub mod phase;
pub mod scoring;

pub use config::{ConfigField, SessionConfig};
pub use controller::{Pending, Resolution, SessionController, SessionSettings};
pub use error::SessionError;
pub use phase::{Dashboard, Phase, QuizPhase, Ticket};
pub use scoring::{AnswerSelections, QuizAttempt};
