//! Session flows against a scripted generation service

use std::sync::Mutex;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use studybot::generation::{
    ErrorKind, GeneratedPlan, GenerationError, GenerationService, OfflineGenerator, PlanRequest,
    QuizQuestion, QuizRequest, Resource, StudyDay, StudyPlan,
};
use studybot::session::{
    ConfigField, Resolution, SessionController, SessionError, SessionSettings,
};

/// Scripted service that records every request it receives
#[derive(Default)]
struct MockService {
    /// Fail plan requests with this HTTP status
    plan_status: Option<u16>,
    /// Fail quiz requests with this service message
    quiz_error: Option<String>,
    plans: Mutex<Vec<PlanRequest>>,
    quizzes: Mutex<Vec<QuizRequest>>,
}

impl MockService {
    fn failing_plans(status: u16) -> Self {
        Self { plan_status: Some(status), ..Self::default() }
    }

    fn failing_quizzes(message: &str) -> Self {
        Self { quiz_error: Some(message.to_string()), ..Self::default() }
    }
}

fn linear_equation_questions() -> Vec<QuizQuestion> {
    let question = |text: &str, options: [&str; 3], correct_answer| QuizQuestion {
        question: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer,
    };
    vec![
        question("Solve x + 3 = 5", ["1", "2", "3"], 1),
        question("Solve 2x = 10", ["2", "3", "5"], 2),
        question("Solve x - 4 = 0", ["4", "0", "-4"], 0),
    ]
}

#[async_trait]
impl GenerationService for MockService {
    async fn generate_plan(&self, request: &PlanRequest) -> Result<GeneratedPlan, GenerationError> {
        self.plans.lock().unwrap().push(request.clone());
        if let Some(status) = self.plan_status {
            return Err(GenerationError::Status {
                status,
                message: "Internal Server Error".into(),
            });
        }
        let days = (1..=request.num_days)
            .map(|day| StudyDay::new(day, vec![format!("{} part {}", request.topic, day)]))
            .collect();
        Ok(GeneratedPlan { plan: StudyPlan::Structured(days), resources: Resource::catalogue() })
    }

    async fn generate_quiz(
        &self,
        request: &QuizRequest,
    ) -> Result<Vec<QuizQuestion>, GenerationError> {
        self.quizzes.lock().unwrap().push(request.clone());
        match &self.quiz_error {
            Some(message) => Err(GenerationError::Service(message.clone())),
            None => Ok(linear_equation_questions()),
        }
    }
}

fn session(topic: &str, duration: &str) -> SessionController {
    let mut session = SessionController::new(SessionSettings::default());
    session.update_config(ConfigField::Topic, topic);
    session.update_config(ConfigField::Duration, duration);
    session
}

#[tokio::test]
async fn linear_equations_end_to_end() {
    let service = MockService::default();
    let mut session = session("Linear Equations", "5");

    session.run_start_studying(&service).await.unwrap();
    assert!(session.show_dashboard());
    assert_eq!(session.plan().map(StudyPlan::day_count), Some(5));
    assert_eq!(service.plans.lock().unwrap()[0].num_days, 5);

    session.run_generate_quiz(&service).await.unwrap();
    assert_eq!(session.quiz().map(|q| q.questions().len()), Some(3));

    for (question, answer) in [1, 2, 0].into_iter().enumerate() {
        assert!(!session.can_submit());
        assert!(session.select_answer(question, answer.to_string()));
    }
    assert!(session.submit_quiz());
    assert!(session.show_results());

    let quiz = session.quiz().unwrap();
    assert_eq!(quiz.score(), (3, 3));
    assert!((0..3).all(|q| quiz.is_correct(q)));
}

#[tokio::test]
async fn blank_fields_never_reach_the_service() {
    let service = MockService::default();
    for (topic, duration) in [("", "5"), ("Algebra", ""), ("  ", "  ")] {
        let mut session = session(topic, duration);
        let err = session.run_start_studying(&service).await.unwrap_err();

        assert!(matches!(err, SessionError::MissingFields));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!session.show_dashboard());
        assert_eq!(session.error(), Some("Please fill in both topic and duration"));
    }
    assert!(service.plans.lock().unwrap().is_empty());
}

#[tokio::test]
async fn plan_success_shows_the_payload() {
    let service = MockService::default();
    let mut session = session("Algebra", "2 weeks");

    session.run_start_studying(&service).await.unwrap();

    assert!(session.show_dashboard());
    assert!(!session.loading());
    assert_eq!(session.error(), None);
    let request = service.plans.lock().unwrap()[0].clone();
    let expected = service.generate_plan(&request).await.unwrap();
    assert_eq!(session.plan(), Some(&expected.plan));
    assert_eq!(session.plan().map(StudyPlan::day_count), Some(14));
}

#[tokio::test]
async fn server_error_returns_to_the_form() {
    let service = MockService::failing_plans(500);
    let mut session = session("Algebra", "5");

    let err = session.run_start_studying(&service).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(!session.show_dashboard());
    assert!(!session.loading());
    let message = session.error().unwrap();
    assert!(!message.is_empty());
    assert!(message.contains("500"));

    // Retrying is allowed after a failure
    assert!(session.start_studying().is_ok());
}

#[tokio::test]
async fn quiz_failure_keeps_the_dashboard() {
    let service = MockService::failing_quizzes("quiz model offline");
    let mut session = session("Algebra", "3");
    session.run_start_studying(&service).await.unwrap();

    let err = session.run_generate_quiz(&service).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Service);
    assert!(session.show_dashboard());
    assert!(!session.loading());
    assert_eq!(session.quiz(), None);
    assert_eq!(session.error(), Some("quiz model offline"));
}

#[tokio::test]
async fn new_quiz_starts_a_fresh_cycle() {
    let service = MockService::default();
    let mut session = session("Linear Equations", "5");
    session.run_start_studying(&service).await.unwrap();
    session.run_generate_quiz(&service).await.unwrap();
    for question in 0..3 {
        session.select_answer(question, "0");
    }
    assert!(session.submit_quiz());
    assert!(session.show_results());

    session.run_generate_quiz(&service).await.unwrap();

    assert!(!session.show_results());
    assert!(session.quiz().unwrap().selections().is_empty());
    assert_eq!(service.quizzes.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn quiz_request_carries_topic_and_settings() {
    let service = MockService::default();
    let settings = SessionSettings {
        num_questions: 3,
        quiz_type: Some("multiple-choice".into()),
        ..SessionSettings::default()
    };
    let mut session = SessionController::new(settings);
    session.update_config(ConfigField::Topic, " Linear Equations ");
    session.update_config(ConfigField::Duration, "5");
    session.run_start_studying(&service).await.unwrap();

    session.run_generate_quiz(&service).await.unwrap();

    let requests = service.quizzes.lock().unwrap();
    assert_eq!(
        requests[0],
        QuizRequest {
            topic: "Linear Equations".into(),
            num_questions: 3,
            quiz_type: Some("multiple-choice".into()),
        }
    );
}

#[tokio::test]
async fn responses_after_reset_are_dropped() {
    let service = MockService::default();
    let mut session = session("Algebra", "5");

    let pending = session.start_studying().unwrap();
    session.reset();
    let generated = service.generate_plan(&pending.request).await;

    assert_eq!(session.complete_plan(pending.ticket, generated), Resolution::Stale);
    assert!(!session.show_dashboard());
    assert_eq!(session.config().topic, "Algebra");
}

#[tokio::test]
async fn duplicate_requests_are_rejected() {
    let mut session = session("Algebra", "5");
    let first = session.start_studying().unwrap();
    assert!(matches!(session.start_studying(), Err(SessionError::Busy)));

    let service = MockService::default();
    let generated = service.generate_plan(&first.request).await;
    assert_eq!(session.complete_plan(first.ticket, generated), Resolution::Applied);

    let quiz = session.generate_quiz().unwrap();
    assert!(matches!(session.generate_quiz(), Err(SessionError::Busy)));
    let questions = service.generate_quiz(&quiz.request).await;
    assert_eq!(session.complete_quiz(quiz.ticket, questions), Resolution::Applied);
    assert!(!session.loading());
}

#[tokio::test]
async fn offline_generator_builds_a_plan() {
    let mut session = session("Rust", "3 days");

    session.run_start_studying(&OfflineGenerator).await.unwrap();

    let Some(StudyPlan::Structured(days)) = session.plan() else {
        panic!("expected a structured plan");
    };
    assert_eq!(days.len(), 3);
    assert_eq!(days[2].day, 3);
    assert!(matches!(
        session.run_generate_quiz(&OfflineGenerator).await,
        Err(SessionError::Generation(GenerationError::Service(_)))
    ));
}
