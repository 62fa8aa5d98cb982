//! Answer recording and quiz scoring

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::generation::QuizQuestion;

static LEADING_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid regex"));

/// Parse the leading integer of a string, ignoring anything after it
///
/// `"2"`, `" 2 "` and `"2nd"` all give `Some(2)`; `"two"` and `""` give `None`.
pub fn parse_int(input: &str) -> Option<i64> {
    LEADING_INT.captures(input).and_then(|caps| caps[1].parse().ok())
}

/// Whether a recorded selection matches the expected option index
pub fn is_correct(selection: Option<&str>, correct_answer: usize) -> bool {
    match (selection.and_then(parse_int), i64::try_from(correct_answer)) {
        (Some(chosen), Ok(expected)) => chosen == expected,
        _ => false,
    }
}

/// Question index to the raw string of the chosen option
pub type AnswerSelections = BTreeMap<usize, String>;

/// A generated quiz together with the user's selections
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizAttempt {
    questions: Vec<QuizQuestion>,
    selections: AnswerSelections,
}

impl QuizAttempt {
    /// Start a fresh attempt with no selections
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self { questions, selections: AnswerSelections::new() }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn selections(&self) -> &AnswerSelections {
        &self.selections
    }

    /// The raw selection for a question, if any
    pub fn selection(&self, question: usize) -> Option<&str> {
        self.selections.get(&question).map(String::as_str)
    }

    /// Record a selection; out-of-range questions are ignored
    pub fn select(&mut self, question: usize, value: String) -> bool {
        if question >= self.questions.len() {
            return false;
        }
        self.selections.insert(question, value);
        true
    }

    /// Every question has a recorded selection
    pub fn all_answered(&self) -> bool {
        (0..self.questions.len()).all(|i| self.selections.contains_key(&i))
    }

    /// Whether question `i` is currently answered correctly
    pub fn is_correct(&self, question: usize) -> bool {
        self.questions
            .get(question)
            .is_some_and(|q| is_correct(self.selection(question), q.correct_answer))
    }

    /// (correct, total)
    pub fn score(&self) -> (usize, usize) {
        let correct = (0..self.questions.len()).filter(|&i| self.is_correct(i)).count();
        (correct, self.questions.len())
    }
}
