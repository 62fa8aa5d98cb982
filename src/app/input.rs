//! Key mapping for the form and the dashboard

use crossterm::event::{KeyCode, KeyModifiers};

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Form editing
    Insert(char),
    DeleteBack,
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,
    NextField,
    PrevField,
    Submit,

    // Quiz navigation
    NextQuestion,
    PrevQuestion,
    NextOption,
    PrevOption,
    Choose,
    ChooseOption(usize),

    // Dashboard commands
    GenerateQuiz,
    SubmitQuiz,
    ScrollUp,
    ScrollDown,
    NewPlan,

    Quit,
}

/// Ctrl+C quits from anywhere
fn global_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
        Some(Action::Quit)
    } else {
        None
    }
}

/// Key mapping while the configuration form is shown
pub fn form_key_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if let Some(action) = global_action(key, modifiers) {
        return Some(action);
    }
    match key {
        KeyCode::Tab | KeyCode::Down => Some(Action::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(Action::PrevField),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Backspace => Some(Action::DeleteBack),
        KeyCode::Delete => Some(Action::DeleteForward),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Home => Some(Action::CursorStart),
        KeyCode::End => Some(Action::CursorEnd),
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Insert(c)),
        _ => None,
    }
}

/// Vim-style key mapping while the dashboard is shown
pub fn dashboard_key_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if let Some(action) = global_action(key, modifiers) {
        return Some(action);
    }
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::NextOption),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevOption),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => Some(Action::NextQuestion),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => Some(Action::PrevQuestion),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Choose),
        KeyCode::Char(c @ '1'..='9') => Some(Action::ChooseOption(c as usize - '1' as usize)),
        KeyCode::Char('J') | KeyCode::PageDown => Some(Action::ScrollDown),
        KeyCode::Char('K') | KeyCode::PageUp => Some(Action::ScrollUp),
        KeyCode::Char('g') => Some(Action::GenerateQuiz),
        KeyCode::Char('s') => Some(Action::SubmitQuiz),
        KeyCode::Char('n') => Some(Action::NewPlan),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}
