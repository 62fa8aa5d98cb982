//! The study session state machine

use crate::generation::{
    GeneratedPlan, GenerationError, GenerationService, PlanRequest, QuizQuestion, QuizRequest,
    StudyPlan,
};

use super::config::{ConfigField, SessionConfig};
use super::error::SessionError;
use super::phase::{Dashboard, Phase, QuizPhase, Ticket};
use super::scoring::QuizAttempt;

/// Knobs that shape generation requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Difficulty sent with plan requests
    pub difficulty: String,
    /// Questions per generated quiz
    pub num_questions: u32,
    /// Optional quiz style sent with quiz requests
    pub quiz_type: Option<String>,
    /// Refuse to start without a lesson list
    pub require_lessons: bool,
    /// Plan length used when the duration has no leading number
    pub default_days: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            difficulty: "medium".to_string(),
            num_questions: 5,
            quiz_type: None,
            require_lessons: false,
            default_days: 7,
        }
    }
}

/// A request the caller must send, tagged with the ticket to complete it with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending<T> {
    pub ticket: Ticket,
    pub request: T,
}

/// Outcome of feeding a completion back into the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The completion was the one awaited and has been applied
    Applied,
    /// The session moved on (reset or superseded); the completion was dropped
    Stale,
}

/// Owns all state of one study session
#[derive(Debug, Clone, Default)]
pub struct SessionController {
    settings: SessionSettings,
    config: SessionConfig,
    phase: Phase,
    epoch: u64,
    next_seq: u64,
}

impl SessionController {
    pub fn new(settings: SessionSettings) -> Self {
        Self { settings, ..Self::default() }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The dashboard, once a plan exists
    pub fn dashboard(&self) -> Option<&Dashboard> {
        match &self.phase {
            Phase::Dashboard(dashboard) => Some(dashboard),
            _ => None,
        }
    }

    pub fn plan(&self) -> Option<&StudyPlan> {
        self.dashboard().map(|d| &d.plan)
    }

    /// The quiz currently being answered or reviewed
    pub fn quiz(&self) -> Option<&QuizAttempt> {
        self.dashboard().and_then(|d| d.quiz.attempt())
    }

    pub fn show_dashboard(&self) -> bool {
        matches!(self.phase, Phase::Dashboard(_))
    }

    pub fn show_results(&self) -> bool {
        matches!(self.dashboard().map(|d| &d.quiz), Some(QuizPhase::Revealed(_)))
    }

    /// A plan or quiz request is in flight
    pub fn loading(&self) -> bool {
        match &self.phase {
            Phase::Submitting { .. } => true,
            Phase::Dashboard(dashboard) => dashboard.quiz.is_loading(),
            Phase::Configuring | Phase::Failed { .. } => false,
        }
    }

    /// The message to show the user, if the last action failed
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed { reason } => Some(reason),
            Phase::Dashboard(dashboard) => dashboard.error.as_deref(),
            Phase::Configuring | Phase::Submitting { .. } => None,
        }
    }

    /// Set one configuration field
    pub fn update_config(&mut self, field: ConfigField, value: impl Into<String>) {
        self.config.set(field, value.into());
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_seq += 1;
        Ticket { epoch: self.epoch, seq: self.next_seq }
    }

    fn validate(&self) -> Result<(), SessionError> {
        if self.config.topic.trim().is_empty() || self.config.duration.trim().is_empty() {
            return Err(SessionError::MissingFields);
        }
        if self.settings.require_lessons && self.config.lessons.trim().is_empty() {
            return Err(SessionError::MissingLessons);
        }
        Ok(())
    }

    /// Validate the form and produce the plan request to send
    pub fn start_studying(&mut self) -> Result<Pending<PlanRequest>, SessionError> {
        match self.phase {
            Phase::Configuring | Phase::Failed { .. } => {}
            // Already studying or waiting on a plan; reset first
            Phase::Submitting { .. } | Phase::Dashboard(_) => return Err(SessionError::Busy),
        }

        if let Err(err) = self.validate() {
            tracing::debug!("Plan request rejected: {}", err);
            self.phase = Phase::Failed { reason: err.to_string() };
            return Err(err);
        }

        let num_days = self.config.duration_days().unwrap_or_else(|| {
            tracing::warn!(
                "Duration {:?} has no day count, using {}",
                self.config.duration,
                self.settings.default_days
            );
            self.settings.default_days
        });
        let request = PlanRequest {
            topic: self.config.topic.trim().to_string(),
            num_days,
            difficulty: self.settings.difficulty.clone(),
        };

        let ticket = self.issue_ticket();
        self.phase = Phase::Submitting { ticket };
        tracing::info!("Requesting {}-day plan for {:?}", num_days, request.topic);
        Ok(Pending { ticket, request })
    }

    /// Apply the outcome of a plan request
    pub fn complete_plan(
        &mut self,
        ticket: Ticket,
        result: Result<GeneratedPlan, GenerationError>,
    ) -> Resolution {
        self.finish_plan(ticket, result.map_err(|e| e.to_string()))
    }

    fn finish_plan(
        &mut self,
        ticket: Ticket,
        outcome: Result<GeneratedPlan, String>,
    ) -> Resolution {
        if self.phase != (Phase::Submitting { ticket }) {
            tracing::debug!("Dropping stale plan response {:?}", ticket);
            return Resolution::Stale;
        }

        self.phase = match outcome {
            Ok(generated) => {
                tracing::info!("Plan ready with {} day(s)", generated.plan.day_count());
                Phase::Dashboard(Dashboard::new(generated.plan, generated.resources))
            }
            Err(reason) => {
                tracing::error!("Plan generation failed: {}", reason);
                Phase::Failed { reason }
            }
        };
        Resolution::Applied
    }

    /// Produce a quiz request for the current topic
    pub fn generate_quiz(&mut self) -> Result<Pending<QuizRequest>, SessionError> {
        let topic = self.config.topic.trim().to_string();
        let request = QuizRequest {
            topic,
            num_questions: self.settings.num_questions,
            quiz_type: self.settings.quiz_type.clone(),
        };
        let ticket = Ticket { epoch: self.epoch, seq: self.next_seq + 1 };

        let Phase::Dashboard(dashboard) = &mut self.phase else {
            return Err(SessionError::NotStudying);
        };
        if dashboard.quiz.is_loading() {
            return Err(SessionError::Busy);
        }
        if request.topic.is_empty() {
            dashboard.error = Some(SessionError::MissingTopic.to_string());
            return Err(SessionError::MissingTopic);
        }

        let previous = std::mem::take(&mut dashboard.quiz);
        dashboard.quiz = QuizPhase::Loading { ticket, previous: Box::new(previous) };
        dashboard.error = None;
        self.next_seq = ticket.seq;

        tracing::info!(
            "Requesting {} quiz question(s) on {:?}",
            request.num_questions,
            request.topic
        );
        Ok(Pending { ticket, request })
    }

    /// Apply the outcome of a quiz request
    pub fn complete_quiz(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<QuizQuestion>, GenerationError>,
    ) -> Resolution {
        self.finish_quiz(ticket, result.map_err(|e| e.to_string()))
    }

    fn finish_quiz(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<QuizQuestion>, String>,
    ) -> Resolution {
        let Phase::Dashboard(dashboard) = &mut self.phase else {
            tracing::debug!("Dropping quiz response {:?} outside the dashboard", ticket);
            return Resolution::Stale;
        };
        let previous = match &mut dashboard.quiz {
            QuizPhase::Loading { ticket: awaited, previous } if *awaited == ticket => {
                std::mem::take(previous.as_mut())
            }
            _ => {
                tracing::debug!("Dropping stale quiz response {:?}", ticket);
                return Resolution::Stale;
            }
        };

        match outcome {
            Ok(questions) => {
                tracing::info!("Quiz ready with {} question(s)", questions.len());
                dashboard.quiz = QuizPhase::Ready(QuizAttempt::new(questions));
            }
            Err(reason) => {
                tracing::error!("Quiz generation failed: {}", reason);
                dashboard.quiz = previous;
                dashboard.error = Some(reason);
            }
        }
        Resolution::Applied
    }

    /// Record the chosen option for a question; returns whether it was recorded
    pub fn select_answer(&mut self, question: usize, value: impl Into<String>) -> bool {
        let Phase::Dashboard(dashboard) = &mut self.phase else {
            return false;
        };
        match &mut dashboard.quiz {
            QuizPhase::Ready(attempt) | QuizPhase::Revealed(attempt) => {
                attempt.select(question, value.into())
            }
            QuizPhase::Unset | QuizPhase::Loading { .. } => false,
        }
    }

    /// Every question of the current quiz has a selection
    pub fn can_submit(&self) -> bool {
        self.quiz().is_some_and(QuizAttempt::all_answered)
    }

    /// Reveal results; a no-op until every question is answered
    pub fn submit_quiz(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        let Phase::Dashboard(dashboard) = &mut self.phase else {
            return false;
        };
        dashboard.quiz = match std::mem::take(&mut dashboard.quiz) {
            QuizPhase::Ready(attempt) | QuizPhase::Revealed(attempt) => {
                let (correct, total) = attempt.score();
                tracing::info!("Quiz submitted: {}/{} correct", correct, total);
                QuizPhase::Revealed(attempt)
            }
            other => other,
        };
        true
    }

    /// Back to the form; anything still in flight becomes stale
    pub fn reset(&mut self) {
        tracing::info!("Resetting session from {}", self.phase.name());
        self.epoch += 1;
        self.phase = Phase::Configuring;
    }

    /// Start studying and wait for the plan in one step
    pub async fn run_start_studying(
        &mut self,
        service: &dyn GenerationService,
    ) -> Result<(), SessionError> {
        let pending = self.start_studying()?;
        match service.generate_plan(&pending.request).await {
            Ok(generated) => {
                self.finish_plan(pending.ticket, Ok(generated));
                Ok(())
            }
            Err(err) => {
                self.finish_plan(pending.ticket, Err(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Generate a quiz and wait for it in one step
    pub async fn run_generate_quiz(
        &mut self,
        service: &dyn GenerationService,
    ) -> Result<(), SessionError> {
        let pending = self.generate_quiz()?;
        match service.generate_quiz(&pending.request).await {
            Ok(questions) => {
                self.finish_quiz(pending.ticket, Ok(questions));
                Ok(())
            }
            Err(err) => {
                self.finish_quiz(pending.ticket, Err(err.to_string()));
                Err(err.into())
            }
        }
    }
}
