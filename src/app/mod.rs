//! Application state and event handling

pub mod input;
pub mod state;
pub mod update;

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::generation::GenerationService;
use crate::theme::Theme;
use crate::ui;
use state::AppState;
use update::{Completion, Effect};

/// Completions buffered between frames
const COMPLETION_BUFFER: usize = 16;

/// The main application
pub struct App {
    /// Active color theme
    theme: Theme,

    /// Current application state
    state: AppState,

    /// Backend used for plan and quiz generation
    service: Arc<dyn GenerationService>,

    /// Sender handed to request tasks
    completions_tx: mpsc::Sender<Completion>,

    /// Finished requests waiting to be applied
    completions_rx: mpsc::Receiver<Completion>,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &Config, service: Arc<dyn GenerationService>) -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        let (completions_tx, completions_rx) = mpsc::channel(COMPLETION_BUFFER);

        Ok(Self {
            theme: config.active_theme(),
            state: AppState::new(config.session_settings()),
            service,
            completions_tx,
            completions_rx,
            terminal,
        })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        loop {
            // Draw UI
            self.terminal.draw(|frame| {
                ui::draw(frame, &mut self.state, &self.theme);
            })?;
            self.state.tick = self.state.tick.wrapping_add(1);

            // Handle events
            if event::poll(std::time::Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key.code, key.modifiers)
                    {
                        break;
                    }
                }
            }

            // Apply finished requests
            while let Ok(completion) = self.completions_rx.try_recv() {
                update::apply_completion(&mut self.state, completion);
            }

            // Let request tasks make progress between frames
            tokio::task::yield_now().await;
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Handle a key press, returns true if should exit
    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        let action = if self.state.session.show_dashboard() {
            input::dashboard_key_to_action(key, modifiers)
        } else {
            input::form_key_to_action(key, modifiers)
        };
        let Some(action) = action else {
            return false;
        };

        match update::update(&mut self.state, action) {
            Effect::Quit => return true,
            Effect::None => {}
            Effect::RequestPlan(pending) => {
                let service = Arc::clone(&self.service);
                let tx = self.completions_tx.clone();
                tokio::spawn(async move {
                    let result = service.generate_plan(&pending.request).await;
                    let completion = Completion::Plan { ticket: pending.ticket, result };
                    if tx.send(completion).await.is_err() {
                        tracing::debug!("App closed before plan response arrived");
                    }
                });
            }
            Effect::RequestQuiz(pending) => {
                let service = Arc::clone(&self.service);
                let tx = self.completions_tx.clone();
                tokio::spawn(async move {
                    let result = service.generate_quiz(&pending.request).await;
                    let completion = Completion::Quiz { ticket: pending.ticket, result };
                    if tx.send(completion).await.is_err() {
                        tracing::debug!("App closed before quiz response arrived");
                    }
                });
            }
        }
        false
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
