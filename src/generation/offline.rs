//! Local plan generation for running without the service

use async_trait::async_trait;

use super::GenerationService;
use super::error::GenerationError;
use super::models::{
    GeneratedPlan, PlanRequest, QuizQuestion, QuizRequest, Resource, StudyDay, StudyPlan,
};

/// Builds plans locally from the request alone
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

impl OfflineGenerator {
    /// Tasks repeated on every day of an offline plan
    const DAILY_TASKS: [&'static str; 2] = ["Review key concepts", "Complete practice exercises"];

    /// Build a deterministic plan spanning `request.num_days` days
    pub fn build_plan(request: &PlanRequest) -> StudyPlan {
        let total = request.num_days.max(1);
        let days = (1..=total)
            .map(|day| {
                let mut tasks = vec![format!("Study {} (part {} of {})", request.topic, day, total)];
                tasks.extend(Self::DAILY_TASKS.iter().map(|t| t.to_string()));
                StudyDay { day, tasks, quiz: true, review: true }
            })
            .collect();
        StudyPlan::Structured(days)
    }
}

#[async_trait]
impl GenerationService for OfflineGenerator {
    async fn generate_plan(&self, request: &PlanRequest) -> Result<GeneratedPlan, GenerationError> {
        Ok(GeneratedPlan { plan: Self::build_plan(request), resources: Resource::catalogue() })
    }

    async fn generate_quiz(
        &self,
        _request: &QuizRequest,
    ) -> Result<Vec<QuizQuestion>, GenerationError> {
        Err(GenerationError::Service(
            "Quizzes need the study service; restart without --offline".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(days: u32) -> PlanRequest {
        PlanRequest { topic: "Networking".into(), num_days: days, difficulty: "easy".into() }
    }

    #[test]
    fn plan_has_one_card_per_day() {
        let plan = OfflineGenerator::build_plan(&request(5));
        assert_eq!(plan.day_count(), 5);
        let StudyPlan::Structured(days) = plan else { panic!("Expected structured plan") };
        assert_eq!(days[4].day, 5);
        assert_eq!(days[0].tasks[0], "Study Networking (part 1 of 5)");
        assert_eq!(days[0].tasks.len(), 3);
    }

    #[test]
    fn zero_days_still_yields_one_card() {
        assert_eq!(OfflineGenerator::build_plan(&request(0)).day_count(), 1);
    }

    #[tokio::test]
    async fn offline_quiz_is_a_service_error() {
        let request = QuizRequest { topic: "x".into(), num_questions: 3, quiz_type: None };
        let err = OfflineGenerator.generate_quiz(&request).await.unwrap_err();
        assert_eq!(err.kind(), crate::generation::ErrorKind::Service);
    }
}
