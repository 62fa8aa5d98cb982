//! Status line UI component

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::AppState;
use crate::theme::Theme;

/// Key hints shown when there is nothing else to say
fn hint(state: &AppState) -> &'static str {
    if state.session.show_dashboard() {
        "[g] quiz  [j/k] option  [h/l] question  [Enter] choose  [s] submit  [n] new plan  [q] quit"
    } else {
        "[Tab] next field  [Enter] create plan  [Esc] quit"
    }
}

/// Draw the status line at the bottom of the screen
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (text, style) = if state.session.loading() {
        (
            format!("{} Waiting for the study service...", state.spinner()),
            Style::default().fg(theme.info),
        )
    } else if let Some(ref msg) = state.status.message {
        let style = if state.status.is_error {
            Style::default().fg(theme.error)
        } else {
            Style::default().fg(theme.fg_muted)
        };
        (msg.clone(), style)
    } else {
        (hint(state).to_string(), Style::default().fg(theme.fg_muted))
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(text, style)))
        .style(Style::default().bg(theme.bg_tertiary));
    frame.render_widget(paragraph, area);
}
