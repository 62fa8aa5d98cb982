//! Application state definitions

use crate::session::{ConfigField, SessionController, SessionSettings};

/// Which element of the configuration form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(ConfigField),
    Submit,
}

impl Default for FormFocus {
    fn default() -> Self {
        Self::Field(ConfigField::Topic)
    }
}

impl FormFocus {
    /// Focus order: the three fields, then the submit button
    const ORDER: [FormFocus; 4] = [
        Self::Field(ConfigField::Topic),
        Self::Field(ConfigField::Duration),
        Self::Field(ConfigField::Lessons),
        Self::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// A single-line text input with a character-indexed cursor
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// Current contents
    pub value: String,
    /// Cursor position in characters
    pub cursor: usize,
}

impl TextInput {
    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.value.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.value.len())
    }

    /// Get the number of characters in input
    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.value.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.value.remove(byte_idx);
        }
    }

    /// Delete character at cursor
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.char_count() {
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.value.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }
}

/// State for the configuration form
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// Focused element
    pub focus: FormFocus,
    /// Topic, duration and lessons inputs, in `ConfigField::ALL` order
    pub inputs: [TextInput; 3],
}

impl FormState {
    fn index(field: ConfigField) -> usize {
        match field {
            ConfigField::Topic => 0,
            ConfigField::Duration => 1,
            ConfigField::Lessons => 2,
        }
    }

    pub fn input(&self, field: ConfigField) -> &TextInput {
        &self.inputs[Self::index(field)]
    }

    pub fn input_mut(&mut self, field: ConfigField) -> &mut TextInput {
        &mut self.inputs[Self::index(field)]
    }

    /// The input under focus, if a field (not the button) is focused
    pub fn focused_field(&self) -> Option<ConfigField> {
        match self.focus {
            FormFocus::Field(field) => Some(field),
            FormFocus::Submit => None,
        }
    }
}

/// Cursor state for the dashboard
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Scroll offset of the plan panel in lines
    pub plan_scroll: usize,
    /// Largest useful scroll offset, as of the last frame drawn
    pub plan_max_scroll: usize,
    /// Question under the cursor
    pub question: usize,
    /// Option under the cursor within that question
    pub option: usize,
}

impl DashboardState {
    pub fn scroll_down(&mut self) {
        self.plan_scroll = (self.plan_scroll + 1).min(self.plan_max_scroll);
    }

    pub fn scroll_up(&mut self) {
        self.plan_scroll = self.plan_scroll.saturating_sub(1);
    }

    /// Record how far the plan can scroll, pulling the offset back if needed
    pub fn set_plan_max_scroll(&mut self, max: usize) {
        self.plan_max_scroll = max;
        self.plan_scroll = self.plan_scroll.min(max);
    }
}

/// Status line contents
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    /// Message to display
    pub message: Option<String>,
    /// Whether message is an error
    pub is_error: bool,
}

impl StatusLine {
    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    /// Clear the message
    pub fn clear(&mut self) {
        self.message = None;
    }
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// The study session
    pub session: SessionController,

    /// Configuration form state
    pub form: FormState,

    /// Dashboard cursor state
    pub dashboard: DashboardState,

    /// Status line
    pub status: StatusLine,

    /// Frames drawn so far, drives the loading spinner
    pub tick: usize,
}

impl AppState {
    pub fn new(settings: SessionSettings) -> Self {
        Self { session: SessionController::new(settings), ..Self::default() }
    }

    /// Spinner glyph for the current frame
    pub fn spinner(&self) -> char {
        const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
        FRAMES[(self.tick / 6) % FRAMES.len()]
    }
}
