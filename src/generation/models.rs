//! Data models for generation service requests and responses

use serde::{Deserialize, Serialize};

use super::error::GenerationError;

/// Request body for `POST /generate-plan`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRequest {
    /// Subject to study
    pub topic: String,
    /// Number of days the plan should span
    pub num_days: u32,
    /// Difficulty hint passed through to the service
    pub difficulty: String,
}

/// Request body for `POST /generate-quiz`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizRequest {
    /// Subject the quiz should cover
    pub topic: String,
    /// Number of questions to generate
    pub num_questions: u32,
    /// Optional quiz style, only sent when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_type: Option<String>,
}

/// One day in a structured study plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyDay {
    /// 1-based day number
    pub day: u32,
    /// Ordered tasks for the day
    pub tasks: Vec<String>,
    /// Whether the day ends with a quiz
    #[serde(default)]
    pub quiz: bool,
    /// Whether the day includes a review block
    #[serde(default)]
    pub review: bool,
}

impl StudyDay {
    /// Create a day with the given tasks
    pub fn new(day: u32, tasks: Vec<String>) -> Self {
        Self { day, tasks, quiz: false, review: false }
    }
}

/// A study plan, either as day cards or as pre-rendered markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StudyPlan {
    /// Day-by-day task list
    Structured(Vec<StudyDay>),
    /// Opaque document rendered by the service (usually an HTML fragment)
    Rendered(String),
}

impl StudyPlan {
    /// Number of day cards, zero for rendered plans
    pub fn day_count(&self) -> usize {
        match self {
            Self::Structured(days) => days.len(),
            Self::Rendered(_) => 0,
        }
    }
}

/// Wire shapes the service has used for the `plan` field
#[derive(Deserialize)]
#[serde(untagged)]
enum PlanPayload {
    Days(Vec<StudyDay>),
    Wrapped { days: Vec<StudyDay> },
    Markup(String),
}

impl<'de> Deserialize<'de> for StudyPlan {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match PlanPayload::deserialize(deserializer)? {
            PlanPayload::Days(days) | PlanPayload::Wrapped { days } => Self::Structured(days),
            PlanPayload::Markup(markup) => Self::Rendered(markup),
        })
    }
}

/// Kind of learning resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Article,
    Video,
    Tutorial,
}

impl ResourceKind {
    /// Label shown on resource cards
    pub fn label(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Video => "video",
            Self::Tutorial => "tutorial",
        }
    }
}

/// A learning resource linked from the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: ResourceKind,
}

impl Resource {
    /// Built-in resources used when the service does not suggest any
    pub fn catalogue() -> Vec<Resource> {
        vec![
            Resource {
                title: "Introduction to Computer Science".into(),
                url: "https://example.com/intro-to-cs".into(),
                kind: ResourceKind::Article,
            },
            Resource {
                title: "Data Structures Tutorial".into(),
                url: "https://example.com/data-structures".into(),
                kind: ResourceKind::Video,
            },
            Resource {
                title: "Algorithms Explained".into(),
                url: "https://example.com/algorithms".into(),
                kind: ResourceKind::Article,
            },
        ]
    }
}

/// A plan as handed to the session controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPlan {
    pub plan: StudyPlan,
    pub resources: Vec<Resource>,
}

/// A multiple-choice quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options` of the right answer
    #[serde(rename = "correctAnswer", alias = "correct_answer")]
    pub correct_answer: usize,
}

impl QuizQuestion {
    /// Check the shape constraints: at least two options, answer in range
    pub fn validate(&self) -> Result<(), String> {
        if self.options.len() < 2 {
            return Err(format!("question \"{}\" has fewer than two options", self.question));
        }
        if self.correct_answer >= self.options.len() {
            return Err(format!(
                "question \"{}\" points at option {} of {}",
                self.question,
                self.correct_answer,
                self.options.len()
            ));
        }
        Ok(())
    }
}

/// Message used when the service flags an error without saying what went wrong
const UNSPECIFIED_ERROR: &str = "The study service reported an error";

/// Turn an embedded `error` field into a service error with a readable message
fn embedded_error(error: String) -> GenerationError {
    let error = error.trim();
    if error.is_empty() {
        GenerationError::Service(UNSPECIFIED_ERROR.to_string())
    } else {
        GenerationError::Service(error.to_string())
    }
}

/// Response envelope for `POST /generate-plan`
#[derive(Debug, Deserialize)]
pub(crate) struct PlanEnvelope {
    plan: Option<StudyPlan>,
    #[serde(default)]
    resources: Option<Vec<Resource>>,
    error: Option<String>,
}

impl PlanEnvelope {
    /// Turn the envelope into a plan, surfacing an embedded error field
    pub(crate) fn into_result(self) -> Result<GeneratedPlan, GenerationError> {
        if let Some(error) = self.error {
            return Err(embedded_error(error));
        }
        let plan = self
            .plan
            .ok_or_else(|| GenerationError::Service("Response did not contain a plan".into()))?;
        let resources = match self.resources {
            Some(resources) if !resources.is_empty() => resources,
            _ => Resource::catalogue(),
        };
        Ok(GeneratedPlan { plan, resources })
    }
}

/// Response envelope for `POST /generate-quiz`
#[derive(Debug, Deserialize)]
pub(crate) struct QuizEnvelope {
    questions: Option<Vec<QuizQuestion>>,
    error: Option<String>,
}

impl QuizEnvelope {
    /// Turn the envelope into questions, rejecting malformed ones
    pub(crate) fn into_result(self) -> Result<Vec<QuizQuestion>, GenerationError> {
        if let Some(error) = self.error {
            return Err(embedded_error(error));
        }
        let questions = self
            .questions
            .ok_or_else(|| GenerationError::Service("Response did not contain questions".into()))?;
        if questions.is_empty() {
            return Err(GenerationError::Service("The study service returned no questions".into()));
        }
        for question in &questions {
            question.validate().map_err(GenerationError::Service)?;
        }
        Ok(questions)
    }
}
