//! Session lifecycle states

use crate::generation::{Resource, StudyPlan};

use super::scoring::QuizAttempt;

/// Identifies one outstanding request
///
/// `epoch` changes on every reset, `seq` on every request, so a completion
/// can be matched against exactly the request the session is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub epoch: u64,
    pub seq: u64,
}

/// Where the quiz card on the dashboard is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QuizPhase {
    /// No quiz requested yet
    #[default]
    Unset,
    /// Quiz request in flight; `previous` is restored if it fails
    Loading { ticket: Ticket, previous: Box<QuizPhase> },
    /// Questions shown, answers being collected
    Ready(QuizAttempt),
    /// Results visible for the current selections
    Revealed(QuizAttempt),
}

impl QuizPhase {
    /// The attempt being answered or reviewed, if any
    pub fn attempt(&self) -> Option<&QuizAttempt> {
        match self {
            Self::Ready(attempt) | Self::Revealed(attempt) => Some(attempt),
            Self::Unset | Self::Loading { .. } => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// Everything shown once a plan exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub plan: StudyPlan,
    pub resources: Vec<Resource>,
    pub quiz: QuizPhase,
    /// Last quiz failure, cleared on the next quiz request
    pub error: Option<String>,
}

impl Dashboard {
    pub fn new(plan: StudyPlan, resources: Vec<Resource>) -> Self {
        Self { plan, resources, quiz: QuizPhase::Unset, error: None }
    }
}

/// Top-level session state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Editing the form
    #[default]
    Configuring,
    /// Plan request in flight
    Submitting { ticket: Ticket },
    /// Back on the form after a validation or generation failure
    Failed { reason: String },
    /// Plan shown
    Dashboard(Dashboard),
}

impl Phase {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Configuring => "configuring",
            Self::Submitting { .. } => "submitting",
            Self::Failed { .. } => "failed",
            Self::Dashboard(_) => "dashboard",
        }
    }
}
