//! Study dashboard: plan, quiz and resources

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::layout::card;
use super::{plan_panel, quiz_panel};
use crate::app::state::AppState;
use crate::generation::Resource;
use crate::session::SessionConfig;
use crate::theme::Theme;

/// Draw the dashboard, returning how far the plan panel can scroll
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) -> usize {
    let Some(dashboard) = state.session.dashboard() else {
        return 0;
    };

    let [header_area, body_area, resources_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(8),
        Constraint::Length(resources_height(&dashboard.resources)),
    ])
    .areas(area);

    draw_header(frame, header_area, state.session.config(), theme);

    let [plan_area, quiz_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(body_area);
    let max_scroll =
        plan_panel::draw(frame, plan_area, &dashboard.plan, state.dashboard.plan_scroll, theme);
    quiz_panel::draw(frame, quiz_area, state, theme);

    draw_resources(frame, resources_area, &dashboard.resources, theme);
    max_scroll
}

fn resources_height(resources: &[Resource]) -> u16 {
    (resources.len() as u16).saturating_add(2)
}

/// Header text for the session, without styling
pub fn header_lines(config: &SessionConfig) -> (String, String) {
    let lessons = config.lessons_list();
    let lessons = if lessons.is_empty() { String::from("all") } else { lessons.join(", ") };
    (
        format!("Studying: {}", config.topic.trim()),
        format!("Duration: {} \u{2022} Lessons: {}", config.duration.trim(), lessons),
    )
}

fn draw_header(frame: &mut Frame, area: Rect, config: &SessionConfig, theme: &Theme) {
    let (title, details) = header_lines(config);
    let lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(details, Style::default().fg(theme.fg_muted))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_resources(frame: &mut Frame, area: Rect, resources: &[Resource], theme: &Theme) {
    let block = card(" Resources ", false, theme);
    let lines: Vec<Line> = resources
        .iter()
        .map(|resource| {
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", resource.kind.label()),
                    Style::default().fg(theme.accent_secondary),
                ),
                Span::styled(resource.title.as_str(), Style::default().fg(theme.fg_primary)),
                Span::styled(format!("  {}", resource.url), Style::default().fg(theme.fg_muted)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
