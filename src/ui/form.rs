//! Study configuration form

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::layout::{card, centered_rect};
use crate::app::state::{AppState, FormFocus, TextInput};
use crate::session::ConfigField;
use crate::theme::Theme;

const TAGLINE: &str = "Your AI-powered study assistant for personalized learning and exam preparation";

/// Draw the configuration form
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let form_area = centered_rect(70, 80, area);

    let [header_area, fields_area, button_area, error_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(9),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(form_area);

    draw_header(frame, header_area, theme);

    let field_areas = Layout::vertical([Constraint::Length(3); 3]).split(fields_area);
    for (field, field_area) in ConfigField::ALL.into_iter().zip(field_areas.iter()) {
        let focused = state.form.focus == FormFocus::Field(field);
        draw_field(frame, *field_area, field, state.form.input(field), focused, theme);
    }

    draw_button(frame, button_area, state, theme);

    if let Some(error) = state.session.error() {
        let para = Paragraph::new(Span::styled(error, Style::default().fg(theme.error)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(para, error_area);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(
            "STUDYBOT",
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(TAGLINE, Style::default().fg(theme.fg_secondary))),
    ];
    let para = Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: ConfigField,
    input: &TextInput,
    focused: bool,
    theme: &Theme,
) {
    let block = card(format!(" {} ", field.label()), focused, theme);

    let line = if input.value.is_empty() && !focused {
        Line::from(Span::styled(field.placeholder(), Style::default().fg(theme.fg_muted)))
    } else if input.value.is_empty() {
        // Cursor sits on the placeholder's first character
        build_line_with_cursor(field.placeholder(), 0, Style::default().fg(theme.fg_muted), theme)
    } else if focused {
        build_line_with_cursor(&input.value, input.cursor, Style::default().fg(theme.fg_primary), theme)
    } else {
        Line::from(Span::styled(input.value.clone(), Style::default().fg(theme.fg_primary)))
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_button(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.form.focus == FormFocus::Submit;
    let label = if state.session.loading() {
        format!("{} Creating Study Plan...", state.spinner())
    } else {
        String::from("Create Study Plan")
    };

    let style = if focused {
        Style::default().fg(theme.bg_primary).bg(theme.accent_primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.accent_primary)
    };

    let button_area = centered_rect(40, 100, area);
    let para = Paragraph::new(Line::from(Span::styled(format!(" {label} "), style)))
        .alignment(Alignment::Center)
        .block(card("", focused, theme));
    frame.render_widget(para, button_area);
}

/// Build a line with a visible cursor
pub(crate) fn build_line_with_cursor(
    text: &str,
    cursor_pos: usize,
    base_style: Style,
    theme: &Theme,
) -> Line<'static> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();

    // Text before cursor
    if cursor_pos > 0 {
        let before: String = chars.iter().take(cursor_pos).collect();
        spans.push(Span::styled(before, base_style));
    }

    // Cursor character (or space if at end)
    let cursor_char = chars.get(cursor_pos).copied().unwrap_or(' ');
    let cursor_style =
        Style::default().fg(theme.bg_primary).bg(theme.cursor).add_modifier(Modifier::BOLD);
    spans.push(Span::styled(cursor_char.to_string(), cursor_style));

    // Text after cursor
    if cursor_pos + 1 < chars.len() {
        let after: String = chars.iter().skip(cursor_pos + 1).collect();
        spans.push(Span::styled(after, base_style));
    }

    Line::from(spans)
}
