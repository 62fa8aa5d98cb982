//! Plan/quiz generation service integration
//!
//! The session controller only sees the [`GenerationService`] trait; the
//! HTTP client and the offline generator are the two implementations.

pub mod client;
pub mod error;
pub mod markup;
pub mod models;
pub mod offline;

use async_trait::async_trait;

pub use client::HttpGenerationClient;
pub use error::{ErrorKind, GenerationError};
pub use models::{
    GeneratedPlan, PlanRequest, QuizQuestion, QuizRequest, Resource, ResourceKind, StudyDay,
    StudyPlan,
};
pub use offline::OfflineGenerator;

/// A backend able to produce study plans and quizzes
///
/// Calls are single-shot request/response; implementations do not retry.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generate a study plan for a topic
    async fn generate_plan(&self, request: &PlanRequest) -> Result<GeneratedPlan, GenerationError>;

    /// Generate quiz questions for a topic
    async fn generate_quiz(&self, request: &QuizRequest)
    -> Result<Vec<QuizQuestion>, GenerationError>;
}
