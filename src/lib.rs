//! Studybot - a terminal study-plan assistant
//!
//! Studybot turns a topic, a study duration and an optional lesson list
//! into a day-by-day plan, then quizzes you on it. Plans and quizzes come
//! from a remote generation service.

pub mod app;
pub mod config;
pub mod generation;
pub mod session;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use session::SessionController;
pub use theme::Theme;
