use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::{bold_style, dim_style, italic_style, title_style};
use crate::app::App;
use crate::catalog::ContentBlock;
use crate::lesson::{LessonEngine, LessonPhase};

fn list_line(selected: bool, text: String) -> Line<'static> {
    if selected {
        Line::from(Span::styled(format!("▶ {text}"), bold_style().fg(Color::Magenta)))
    } else {
        Line::from(Span::raw(format!("  {text}")))
    }
}

pub(super) fn render_browser(app: &App, area: Rect, buf: &mut Buffer) {
    let mut lines = Vec::new();

    match app.open_category.and_then(|c| app.catalog.category(c)) {
        None => {
            lines.push(Line::from(Span::styled("📚 Lessons", title_style())));
            lines.push(Line::default());
            for (idx, category) in app.catalog.categories().iter().enumerate() {
                lines.push(list_line(
                    idx == app.browser_cursor,
                    format!(
                        "{} {}  ({} lessons)",
                        category.icon,
                        category.title,
                        category.lessons.len()
                    ),
                ));
            }
        }
        Some(category) => {
            lines.push(Line::from(Span::styled(
                format!("{} {}", category.icon, category.title),
                title_style(),
            )));
            lines.push(Line::default());
            for (idx, lesson) in category.lessons.iter().enumerate() {
                lines.push(list_line(
                    idx == app.browser_cursor,
                    format!("{}. {}", idx + 1, lesson.title),
                ));
            }
        }
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(area, buf);
}

fn content_lines(block: &ContentBlock) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    match block {
        ContentBlock::Explanation { text } => lines.push(Line::from(text.clone())),
        ContentBlock::Example {
            before,
            expression,
            after,
            result,
            note,
        } => {
            if let Some(before) = before {
                lines.push(Line::from(Span::styled(before.clone(), dim_style())));
            }
            lines.push(Line::from(Span::styled(
                format!("  {expression}"),
                bold_style().fg(Color::Magenta),
            )));
            if let Some(after) = after {
                lines.push(Line::from(Span::styled(after.clone(), dim_style())));
            }
            if let Some(result) = result {
                lines.push(Line::from(Span::styled(
                    format!("  {result}"),
                    bold_style().fg(Color::Green),
                )));
            }
            if let Some(note) = note {
                lines.push(Line::from(Span::styled(note.clone(), italic_style())));
            }
        }
        ContentBlock::Visual { layout, emoji } => {
            lines.extend(
                layout
                    .rows(emoji)
                    .into_iter()
                    .map(|row| Line::from(format!("  {row}"))),
            );
            if let Some(caption) = layout.caption() {
                lines.push(Line::from(Span::styled(caption, dim_style())));
            }
        }
        ContentBlock::Tip { text } => lines.push(Line::from(vec![
            Span::styled("💡 Tip: ", bold_style().fg(Color::Yellow)),
            Span::styled(text.clone(), Style::default().fg(Color::Yellow)),
        ])),
    }
    lines
}

fn render_learning(app: &App, engine: &LessonEngine, area: Rect, buf: &mut Buffer) {
    let mut lines = vec![
        Line::from(Span::styled(engine.lesson().title.clone(), title_style())),
        Line::default(),
    ];
    for block in &engine.lesson().content {
        lines.extend(content_lines(block));
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        "Ready to Practice! → (enter)",
        bold_style().fg(Color::Green),
    )));

    let max_scroll = lines.len().saturating_sub(1) as u16;
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.learn_scroll.min(max_scroll), 0))
        .render(area, buf);
}

fn render_practice(app: &App, engine: &LessonEngine, area: Rect, buf: &mut Buffer) {
    let Some(item) = engine.current_item() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Length(1), // progress
            Constraint::Length(3), // question
            Constraint::Length(3), // answer box
            Constraint::Length(3), // hint / feedback
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled(engine.lesson().title.clone(), title_style()))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        format!(
            "Question {} of {}",
            engine.practice_index() + 1,
            engine.practice_len()
        ),
        dim_style(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(item.question.clone(), bold_style()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    let input = if app.input.is_empty() && !engine.has_answered_current() {
        Span::styled("Your answer...", dim_style())
    } else {
        Span::styled(app.input.as_str(), bold_style())
    };
    Paragraph::new(input)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .render(chunks[3], buf);

    let lines = match engine.last_result() {
        None => item
            .hint
            .iter()
            .map(|hint| Line::from(Span::styled(format!("💡 Hint: {hint}"), dim_style())))
            .collect(),
        Some(result) => {
            let next = if engine.is_last_item() {
                "Finish Lesson →"
            } else {
                "Next Question →"
            };
            let mut lines = if result.is_correct {
                vec![Line::from(Span::styled(
                    "🎉 Correct!",
                    bold_style().fg(Color::Green),
                ))]
            } else {
                vec![
                    Line::from(Span::styled("Not quite!", bold_style().fg(Color::Red))),
                    Line::from(Span::styled(
                        format!("The answer is {}", item.answer),
                        Style::default().fg(Color::Red),
                    )),
                ]
            };
            lines.push(Line::from(Span::styled(next, italic_style())));
            lines
        }
    };
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[4], buf);
}

pub(super) fn render_lesson(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(engine) = app.lesson.as_ref() else {
        return;
    };
    match engine.phase() {
        LessonPhase::Learning => render_learning(app, engine, area, buf),
        LessonPhase::Practicing => render_practice(app, engine, area, buf),
        LessonPhase::Complete => render_lesson_complete(app, area, buf),
    }
}

pub(super) fn render_lesson_complete(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(engine) = app.lesson.as_ref() else {
        return;
    };
    let summary = engine.summary();

    let lines = vec![
        Line::from(summary.medal.emoji()),
        Line::from(Span::styled("Lesson Complete!", title_style())),
        Line::from(Span::styled(engine.lesson().title.clone(), dim_style())),
        Line::default(),
        Line::from(Span::styled(
            format!("{}/{}", summary.correct, summary.total),
            bold_style().fg(Color::Magenta),
        )),
        Line::from(Span::styled("Questions Correct", dim_style())),
        Line::from(Span::styled(format!("{}%", summary.percent), bold_style())),
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
}
