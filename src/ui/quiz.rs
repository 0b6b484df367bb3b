use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use super::{bold_style, dim_style, italic_style, tier_color, title_style, urgency_color};
use crate::app::App;
use crate::quiz::{Attempt, QuizPhase};
use crate::session::{describe_duration, format_clock};
use unicode_width::UnicodeWidthStr;

/// Display columns reserved for a problem in the fastest / slowest lists.
const PROBLEM_COLUMN_WIDTH: usize = 10;

pub(super) fn render_quiz(app: &App, area: Rect, buf: &mut Buffer) {
    let quiz = &app.quiz;
    let clock = quiz.clock();
    let timer_color = urgency_color(clock.urgency());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // timer + score
            Constraint::Length(1), // operand label
            Constraint::Length(1), // progress
            Constraint::Length(1),
            Constraint::Length(3), // problem
            Constraint::Length(3), // answer box
            Constraint::Length(2), // feedback
            Constraint::Min(0),
        ])
        .split(area);

    let score = quiz.score();
    Paragraph::new(Line::from(vec![
        Span::styled(
            format!("⏱ {}", format_clock(quiz.remaining_secs())),
            bold_style().fg(timer_color),
        ),
        Span::raw("    "),
        Span::styled(format!("{}/{}", score.correct, score.total), bold_style()),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    Paragraph::new(Span::styled(app.setup.operand_label(), italic_style()))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Gauge::default()
        .gauge_style(Style::default().fg(timer_color))
        .ratio(clock.remaining_fraction().clamp(0.0, 1.0))
        .label("")
        .render(chunks[2], buf);

    if let Some(problem) = quiz.current_problem() {
        Paragraph::new(vec![
            Line::from(Span::styled(problem.display_text.as_str(), bold_style())),
            Line::from(Span::styled("= ?", dim_style())),
        ])
        .alignment(Alignment::Center)
        .render(chunks[4], buf);
    }

    let input = if app.input.is_empty() && quiz.phase() == QuizPhase::AwaitingAnswer {
        Span::styled("Your answer...", dim_style())
    } else {
        Span::styled(app.input.as_str(), bold_style())
    };
    Paragraph::new(input)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .render(chunks[5], buf);

    if let Some(feedback) = quiz.last_feedback() {
        let lines = if feedback.is_correct {
            vec![Line::from(Span::styled(
                "🎉 Correct!",
                bold_style().fg(Color::Green),
            ))]
        } else {
            vec![
                Line::from(Span::styled("Not quite!", bold_style().fg(Color::Red))),
                Line::from(vec![
                    Span::styled("The answer is ", Style::default().fg(Color::Red)),
                    Span::styled(
                        feedback.correct_answer.to_string(),
                        bold_style().fg(Color::Red),
                    ),
                ]),
            ]
        };
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(chunks[6], buf);
    }
}

fn attempt_line(attempt: &Attempt, color: Color) -> Line<'static> {
    let text = &attempt.problem.display_text;
    let padding = PROBLEM_COLUMN_WIDTH.saturating_sub(text.width());
    Line::from(vec![
        Span::raw(format!("{text}{}", " ".repeat(padding))),
        Span::styled(
            format!("{:.1}s", attempt.elapsed_secs),
            bold_style().fg(color),
        ),
    ])
}

pub(super) fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let summary = app.quiz.summary();
    let duration = app
        .quiz
        .config()
        .map(|c| c.duration_secs)
        .unwrap_or_else(|| app.setup.duration().secs());

    let (grade_emoji, grade_style) = match summary.grade {
        Some(grade) => (grade.emoji(), bold_style().fg(tier_color(grade.tier()))),
        None => ("❓", bold_style().fg(Color::Gray)),
    };

    let mut lines = vec![
        Line::from(grade_emoji),
        Line::from(Span::styled("Practice Complete!", title_style())),
        Line::from(Span::styled(
            format!(
                "Great job finishing your {} session!",
                describe_duration(duration)
            ),
            dim_style(),
        )),
        Line::default(),
        Line::from(Span::styled("Your Grade", dim_style())),
        Line::from(Span::styled(summary.grade_label(), grade_style)),
        Line::default(),
        Line::from(vec![
            Span::styled(format!("{}", summary.total), bold_style().fg(Color::Magenta)),
            Span::raw(" problems   "),
            Span::styled(format!("{}", summary.correct), bold_style().fg(Color::Green)),
            Span::raw(" correct   "),
            Span::styled(
                format!("{}%", summary.accuracy_percent),
                bold_style().fg(Color::Blue),
            ),
            Span::raw(" accuracy"),
        ]),
    ];

    if let Some(avg) = summary.average_secs {
        lines.push(Line::from(vec![
            Span::raw("Average time per question: "),
            Span::styled(format!("{avg:.1}s"), bold_style().fg(Color::Yellow)),
        ]));
    }

    let header_height = lines.len() as u16 + 1;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header_height), Constraint::Min(0)])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    if !summary.show_highlights() {
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let mut fastest = vec![Line::from(Span::styled(
        "⚡ Fastest",
        bold_style().fg(Color::Green),
    ))];
    fastest.extend(summary.fastest.iter().map(|a| attempt_line(a, Color::Green)));
    Paragraph::new(fastest)
        .alignment(Alignment::Center)
        .render(columns[0], buf);

    let mut slowest = vec![Line::from(Span::styled(
        "🐢 Needs Practice",
        bold_style().fg(Color::Red),
    ))];
    slowest.extend(summary.slowest.iter().map(|a| attempt_line(a, Color::Red)));
    Paragraph::new(slowest)
        .alignment(Alignment::Center)
        .render(columns[1], buf);
}
