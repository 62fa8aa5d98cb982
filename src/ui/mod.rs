//! UI rendering components

pub mod dashboard;
pub mod form;
pub mod layout;
pub mod plan_panel;
pub mod quiz_panel;
pub mod status_line;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
};

use crate::app::state::AppState;
use crate::theme::Theme;

/// Main draw function
///
/// Records the plan panel's scroll limit so scrolling keys stop at the end.
pub fn draw(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let [main_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    if state.session.show_dashboard() {
        let max_scroll = dashboard::draw(frame, main_area, state, theme);
        state.dashboard.set_plan_max_scroll(max_scroll);
    } else {
        form::draw(frame, main_area, state, theme);
    }
    status_line::draw(frame, status_area, state, theme);
}
