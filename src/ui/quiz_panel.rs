//! Quiz panel component

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::layout::card;
use crate::app::state::{AppState, DashboardState};
use crate::session::{QuizAttempt, QuizPhase};
use crate::theme::Theme;

/// Draw the quiz panel for the current dashboard
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(dashboard) = state.session.dashboard() else {
        return;
    };

    let title = match &dashboard.quiz {
        QuizPhase::Unset => " Quiz ",
        QuizPhase::Loading { .. } => " Generating Quiz... ",
        QuizPhase::Ready(_) => " Quiz ",
        QuizPhase::Revealed(_) => " Quiz Results ",
    };
    let block = card(title, true, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &dashboard.quiz {
        QuizPhase::Unset => draw_prompt(frame, inner, &focus_subject(state), theme),
        QuizPhase::Loading { .. } => draw_loading(frame, inner, state.spinner(), theme),
        QuizPhase::Ready(attempt) => {
            draw_questions(frame, inner, attempt, &state.dashboard, false, theme)
        }
        QuizPhase::Revealed(attempt) => {
            draw_questions(frame, inner, attempt, &state.dashboard, true, theme)
        }
    }
}

/// First listed lesson, falling back to the topic
fn focus_subject(state: &AppState) -> String {
    let config = state.session.config();
    config
        .lessons_list()
        .first()
        .map(|lesson| lesson.to_string())
        .unwrap_or_else(|| config.topic.trim().to_string())
}

fn draw_prompt(frame: &mut Frame, area: Rect, subject: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Test your knowledge on {subject}"),
            Style::default().fg(theme.fg_primary),
        )),
        Line::from(""),
        Line::from(Span::styled("[g] Generate quiz", Style::default().fg(theme.fg_muted))),
    ];

    let para = Paragraph::new(text).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

fn draw_loading(frame: &mut Frame, area: Rect, spinner: char, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{spinner} Generating quiz questions..."),
            Style::default().fg(theme.fg_primary),
        )),
    ];

    let para = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(para, area);
}

fn draw_questions(
    frame: &mut Frame,
    area: Rect,
    attempt: &QuizAttempt,
    cursor: &DashboardState,
    revealed: bool,
    theme: &Theme,
) {
    let lines = question_lines(attempt, cursor, revealed, theme);

    // Keep the question under the cursor on screen
    let offset = lines
        .iter()
        .position(|(q, _)| *q == cursor.question)
        .unwrap_or(0)
        .saturating_sub(1);
    let lines: Vec<Line> = lines.into_iter().map(|(_, line)| line).collect();

    let para = Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((offset as u16, 0));
    frame.render_widget(para, area);
}

/// Lines for every question, tagged with the question they belong to
fn question_lines(
    attempt: &QuizAttempt,
    cursor: &DashboardState,
    revealed: bool,
    theme: &Theme,
) -> Vec<(usize, Line<'static>)> {
    let mut lines = Vec::new();

    if revealed {
        let (correct, total) = attempt.score();
        let style = if correct == total {
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.warning).add_modifier(Modifier::BOLD)
        };
        lines.push((0, Line::from(Span::styled(format!("Score: {correct}/{total} correct"), style))));
        lines.push((0, Line::from("")));
    }

    for (q, question) in attempt.questions().iter().enumerate() {
        let current = q == cursor.question;
        let number_style = if current {
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_muted)
        };
        lines.push((
            q,
            Line::from(vec![
                Span::styled(format!("Q{}. ", q + 1), number_style),
                Span::styled(
                    question.question.clone(),
                    Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
                ),
            ]),
        ));

        let selection = attempt.selection(q);
        for (i, option) in question.options.iter().enumerate() {
            let chosen = selection == Some(i.to_string().as_str());
            let prefix = if chosen { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○
            let letter = (b'A' + (i % 26) as u8) as char;
            let under_cursor = current && i == cursor.option;

            let mut style = if revealed && i == question.correct_answer {
                Style::default().fg(theme.success)
            } else if revealed && chosen {
                Style::default().fg(theme.error)
            } else if chosen {
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg_secondary)
            };
            if under_cursor {
                style = style.bg(theme.selection);
            }

            lines.push((q, Line::from(Span::styled(format!("  {prefix} {letter}) {option}"), style))));
        }

        if revealed {
            let verdict = if attempt.is_correct(q) {
                Span::styled("  Correct!", Style::default().fg(theme.success))
            } else {
                Span::styled("  Incorrect", Style::default().fg(theme.error))
            };
            lines.push((q, Line::from(verdict)));
        }
        lines.push((q, Line::from("")));
    }

    lines
}
