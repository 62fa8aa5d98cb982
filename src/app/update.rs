//! Applying actions and request completions to the application state

use crate::generation::{GeneratedPlan, GenerationError, PlanRequest, QuizQuestion, QuizRequest};
use crate::session::{Pending, Resolution, SessionError, Ticket};

use super::input::Action;
use super::state::{AppState, FormFocus};

/// Work the event loop must carry out after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    RequestPlan(Pending<PlanRequest>),
    RequestQuiz(Pending<QuizRequest>),
}

/// A generation call that finished on a background task
#[derive(Debug)]
pub enum Completion {
    Plan { ticket: Ticket, result: Result<GeneratedPlan, GenerationError> },
    Quiz { ticket: Ticket, result: Result<Vec<QuizQuestion>, GenerationError> },
}

/// Apply one user action
pub fn update(state: &mut AppState, action: Action) -> Effect {
    if action == Action::Quit {
        return Effect::Quit;
    }
    if state.session.show_dashboard() {
        update_dashboard(state, action)
    } else {
        update_form(state, action)
    }
}

fn update_form(state: &mut AppState, action: Action) -> Effect {
    match action {
        Action::NextField => state.form.focus = state.form.focus.next(),
        Action::PrevField => state.form.focus = state.form.focus.prev(),
        Action::Submit => return submit_form(state),
        Action::Insert(_)
        | Action::DeleteBack
        | Action::DeleteForward
        | Action::CursorLeft
        | Action::CursorRight
        | Action::CursorStart
        | Action::CursorEnd => edit_field(state, action),
        _ => {}
    }
    Effect::None
}

fn edit_field(state: &mut AppState, action: Action) {
    let Some(field) = state.form.focused_field() else {
        return;
    };
    let input = state.form.input_mut(field);
    match action {
        Action::Insert(c) => input.insert_char(c),
        Action::DeleteBack => input.delete_char(),
        Action::DeleteForward => input.delete_char_forward(),
        Action::CursorLeft => input.move_left(),
        Action::CursorRight => input.move_right(),
        Action::CursorStart => input.move_start(),
        Action::CursorEnd => input.move_end(),
        _ => return,
    }
    let value = input.value.clone();
    state.session.update_config(field, value);
}

fn submit_form(state: &mut AppState) -> Effect {
    if state.session.loading() {
        return Effect::None;
    }
    match state.session.start_studying() {
        Ok(pending) => {
            state.status.set_message("Creating your study plan...");
            Effect::RequestPlan(pending)
        }
        Err(err) => {
            state.status.set_error(err.to_string());
            Effect::None
        }
    }
}

fn update_dashboard(state: &mut AppState, action: Action) -> Effect {
    match action {
        Action::GenerateQuiz => return request_quiz(state),
        Action::SubmitQuiz => submit_quiz(state),
        Action::NewPlan => {
            state.session.reset();
            state.dashboard = Default::default();
            state.form.focus = FormFocus::default();
            state.status.clear();
        }
        Action::ScrollDown => state.dashboard.scroll_down(),
        Action::ScrollUp => state.dashboard.scroll_up(),
        Action::NextQuestion | Action::PrevQuestion | Action::NextOption | Action::PrevOption => {
            move_cursor(state, action);
        }
        Action::Choose => {
            let option = state.dashboard.option;
            choose(state, option);
        }
        Action::ChooseOption(option) => choose(state, option),
        _ => {}
    }
    Effect::None
}

fn request_quiz(state: &mut AppState) -> Effect {
    match state.session.generate_quiz() {
        Ok(pending) => {
            state.status.set_message("Generating quiz...");
            Effect::RequestQuiz(pending)
        }
        // Key is inert while a quiz is loading
        Err(SessionError::Busy) => Effect::None,
        Err(err) => {
            state.status.set_error(err.to_string());
            Effect::None
        }
    }
}

fn submit_quiz(state: &mut AppState) {
    let Some(quiz) = state.session.quiz() else {
        return;
    };
    let answered = quiz.selections().len();
    let total = quiz.questions().len();

    if state.session.submit_quiz() {
        if let Some((correct, total)) = state.session.quiz().map(|q| q.score()) {
            state.status.set_message(format!("{correct}/{total} correct"));
        }
    } else {
        state.status.set_error(format!(
            "Answer every question before submitting ({answered}/{total} answered)"
        ));
    }
}

fn move_cursor(state: &mut AppState, action: Action) {
    let Some(quiz) = state.session.quiz() else {
        return;
    };
    let questions = quiz.questions();
    if questions.is_empty() {
        return;
    }
    let cursor = &mut state.dashboard;
    let last_question = questions.len() - 1;

    match action {
        Action::NextQuestion => cursor.question = (cursor.question + 1).min(last_question),
        Action::PrevQuestion => cursor.question = cursor.question.saturating_sub(1),
        Action::NextOption => cursor.option += 1,
        Action::PrevOption => cursor.option = cursor.option.saturating_sub(1),
        _ => return,
    }

    let options = questions[cursor.question.min(last_question)].options.len();
    if matches!(action, Action::NextQuestion | Action::PrevQuestion) {
        // Land on the recorded answer, if any
        cursor.option = quiz
            .selection(cursor.question)
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(0);
    }
    cursor.option = cursor.option.min(options.saturating_sub(1));
}

fn choose(state: &mut AppState, option: usize) {
    let question = state.dashboard.question;
    let Some(options) =
        state.session.quiz().and_then(|q| q.questions().get(question)).map(|q| q.options.len())
    else {
        return;
    };
    if option >= options {
        return;
    }
    state.dashboard.option = option;
    state.session.select_answer(question, option.to_string());
}

/// Feed a finished generation call back into the session
pub fn apply_completion(state: &mut AppState, completion: Completion) -> Resolution {
    match completion {
        Completion::Plan { ticket, result } => {
            let resolution = state.session.complete_plan(ticket, result);
            if resolution == Resolution::Applied {
                state.dashboard = Default::default();
                match state.session.error() {
                    Some(err) => state.status.set_error(err.to_string()),
                    None => state.status.set_message("Study plan ready. Press g for a quiz"),
                }
            }
            resolution
        }
        Completion::Quiz { ticket, result } => {
            let resolution = state.session.complete_quiz(ticket, result);
            if resolution == Resolution::Applied {
                match state.session.error() {
                    Some(err) => state.status.set_error(err.to_string()),
                    None => {
                        state.dashboard.question = 0;
                        state.dashboard.option = 0;
                        state.status.set_message("Quiz ready. Pick an answer for each question");
                    }
                }
            }
            resolution
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{Resource, StudyDay, StudyPlan};
    use crate::session::ConfigField;

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            update(state, Action::Insert(c));
        }
    }

    fn questions() -> Vec<QuizQuestion> {
        vec![
            QuizQuestion {
                question: "2x = 4, x = ?".into(),
                options: vec!["1".into(), "2".into(), "4".into()],
                correct_answer: 1,
            },
            QuizQuestion {
                question: "x + 1 = 1, x = ?".into(),
                options: vec!["0".into(), "1".into()],
                correct_answer: 0,
            },
        ]
    }

    fn on_dashboard() -> AppState {
        let mut state = AppState::default();
        type_text(&mut state, "Algebra");
        update(&mut state, Action::NextField);
        type_text(&mut state, "3");
        let Effect::RequestPlan(pending) = update(&mut state, Action::Submit) else {
            panic!("Expected plan request");
        };
        let plan = GeneratedPlan {
            plan: StudyPlan::Structured(vec![StudyDay::new(1, vec!["Read".into()])]),
            resources: Resource::catalogue(),
        };
        apply_completion(&mut state, Completion::Plan { ticket: pending.ticket, result: Ok(plan) });
        state
    }

    fn with_quiz() -> AppState {
        let mut state = on_dashboard();
        let Effect::RequestQuiz(pending) = update(&mut state, Action::GenerateQuiz) else {
            panic!("Expected quiz request");
        };
        apply_completion(
            &mut state,
            Completion::Quiz { ticket: pending.ticket, result: Ok(questions()) },
        );
        state
    }

    #[test]
    fn typing_updates_session_config() {
        let mut state = AppState::default();
        type_text(&mut state, "Graphs");
        update(&mut state, Action::DeleteBack);
        assert_eq!(state.session.config().topic, "Graph");
        assert_eq!(state.form.input(ConfigField::Topic).value, "Graph");
    }

    #[test]
    fn typing_on_submit_button_is_ignored() {
        let mut state = AppState::default();
        update(&mut state, Action::PrevField);
        type_text(&mut state, "abc");
        assert!(state.session.config().topic.is_empty());
    }

    #[test]
    fn empty_form_submit_shows_error() {
        let mut state = AppState::default();
        assert_eq!(update(&mut state, Action::Submit), Effect::None);
        assert!(state.status.is_error);
        assert!(!state.session.show_dashboard());
    }

    #[test]
    fn submit_while_loading_is_ignored() {
        let mut state = AppState::default();
        type_text(&mut state, "Algebra");
        update(&mut state, Action::NextField);
        type_text(&mut state, "3");
        assert!(matches!(update(&mut state, Action::Submit), Effect::RequestPlan(_)));
        assert_eq!(update(&mut state, Action::Submit), Effect::None);
    }

    #[test]
    fn plan_completion_shows_dashboard() {
        let state = on_dashboard();
        assert!(state.session.show_dashboard());
        assert!(!state.status.is_error);
    }

    #[test]
    fn plan_failure_sets_error_status() {
        let mut state = AppState::default();
        type_text(&mut state, "Algebra");
        update(&mut state, Action::NextField);
        type_text(&mut state, "3");
        let Effect::RequestPlan(pending) = update(&mut state, Action::Submit) else {
            panic!("Expected plan request");
        };
        let err = GenerationError::Status { status: 502, message: "Bad Gateway".into() };
        apply_completion(&mut state, Completion::Plan { ticket: pending.ticket, result: Err(err) });

        assert!(state.status.is_error);
        assert!(!state.session.show_dashboard());
    }

    #[test]
    fn choosing_records_selection() {
        let mut state = with_quiz();
        update(&mut state, Action::NextOption);
        update(&mut state, Action::Choose);
        assert_eq!(state.session.quiz().unwrap().selection(0), Some("1"));
    }

    #[test]
    fn choose_option_out_of_range_is_ignored() {
        let mut state = with_quiz();
        update(&mut state, Action::ChooseOption(5));
        assert!(state.session.quiz().unwrap().selections().is_empty());
    }

    #[test]
    fn option_cursor_is_clamped() {
        let mut state = with_quiz();
        for _ in 0..10 {
            update(&mut state, Action::NextOption);
        }
        assert_eq!(state.dashboard.option, 2);

        update(&mut state, Action::NextQuestion);
        assert_eq!(state.dashboard.question, 1);
        assert_eq!(state.dashboard.option, 0);
        update(&mut state, Action::NextQuestion);
        assert_eq!(state.dashboard.question, 1);
    }

    #[test]
    fn premature_submit_reports_progress() {
        let mut state = with_quiz();
        update(&mut state, Action::ChooseOption(1));
        update(&mut state, Action::SubmitQuiz);
        assert!(!state.session.show_results());
        assert_eq!(
            state.status.message.as_deref(),
            Some("Answer every question before submitting (1/2 answered)")
        );
    }

    #[test]
    fn full_submit_reveals_score() {
        let mut state = with_quiz();
        update(&mut state, Action::ChooseOption(1));
        update(&mut state, Action::NextQuestion);
        update(&mut state, Action::ChooseOption(0));
        update(&mut state, Action::SubmitQuiz);

        assert!(state.session.show_results());
        assert_eq!(state.status.message.as_deref(), Some("2/2 correct"));
    }

    #[test]
    fn new_plan_returns_to_form_and_drops_late_quiz() {
        let mut state = on_dashboard();
        let Effect::RequestQuiz(pending) = update(&mut state, Action::GenerateQuiz) else {
            panic!("Expected quiz request");
        };
        update(&mut state, Action::NewPlan);
        assert!(!state.session.show_dashboard());

        let resolution = apply_completion(
            &mut state,
            Completion::Quiz { ticket: pending.ticket, result: Ok(questions()) },
        );
        assert_eq!(resolution, Resolution::Stale);
        assert_eq!(state.form.input(ConfigField::Topic).value, "Algebra");
    }

    #[test]
    fn scrolling_past_the_end_is_undone_by_one_step() {
        let mut state = on_dashboard();
        state.dashboard.set_plan_max_scroll(3);
        for _ in 0..10 {
            update(&mut state, Action::ScrollDown);
        }
        assert_eq!(state.dashboard.plan_scroll, 3);

        update(&mut state, Action::ScrollUp);
        assert_eq!(state.dashboard.plan_scroll, 2);
    }

    #[test]
    fn quit_is_always_available() {
        let mut state = with_quiz();
        assert_eq!(update(&mut state, Action::Quit), Effect::Quit);
    }
}
