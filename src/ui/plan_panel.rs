//! Study plan panel

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::layout::card;
use crate::generation::{StudyDay, StudyPlan, markup};
use crate::theme::Theme;

/// Draw the plan with the dashboard's scroll offset, returning the largest useful offset
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    plan: &StudyPlan,
    scroll: usize,
    theme: &Theme,
) -> usize {
    let title = match plan.day_count() {
        0 => String::from(" Your Study Plan "),
        1 => String::from(" Your Study Plan (1 day) "),
        n => format!(" Your Study Plan ({n} days) "),
    };
    let block = card(title, false, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = plan_lines(plan, inner.width.saturating_sub(1) as usize, theme);
    let max_scroll = lines.len().saturating_sub(inner.height as usize);
    let scroll = scroll.min(max_scroll) as u16;

    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
    max_scroll
}

/// Lay out the plan as wrapped lines for the given width
pub fn plan_lines(plan: &StudyPlan, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let width = width.max(10);
    match plan {
        StudyPlan::Structured(days) => {
            let mut lines = Vec::new();
            for day in days {
                if !lines.is_empty() {
                    lines.push(Line::from(""));
                }
                day_lines(day, width, theme, &mut lines);
            }
            if lines.is_empty() {
                lines.push(Line::from(Span::styled(
                    "The plan has no days yet.",
                    Style::default().fg(theme.fg_muted),
                )));
            }
            lines
        }
        StudyPlan::Rendered(document) => {
            let style = Style::default().fg(theme.fg_primary);
            markup::to_plain_text(document)
                .lines()
                .flat_map(|line| {
                    if line.is_empty() {
                        vec![Line::from("")]
                    } else {
                        textwrap::wrap(line, width)
                            .into_iter()
                            .map(|part| Line::from(Span::styled(part.into_owned(), style)))
                            .collect()
                    }
                })
                .collect()
        }
    }
}

fn day_lines(day: &StudyDay, width: usize, theme: &Theme, lines: &mut Vec<Line<'static>>) {
    let mut header = vec![Span::styled(
        format!("Day {}", day.day),
        Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
    )];
    if day.quiz {
        header.push(Span::styled("  [quiz]", Style::default().fg(theme.info)));
    }
    if day.review {
        header.push(Span::styled("  [review]", Style::default().fg(theme.warning)));
    }
    lines.push(Line::from(header));

    let options = textwrap::Options::new(width)
        .initial_indent("  \u{2022} ")
        .subsequent_indent("    ");
    for task in &day.tasks {
        for part in textwrap::wrap(task, &options) {
            lines.push(Line::from(Span::styled(
                part.into_owned(),
                Style::default().fg(theme.fg_secondary),
            )));
        }
    }
}
