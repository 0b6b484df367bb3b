use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{bold_style, dim_style, italic_style, title_style};
use crate::app::{App, MenuItem, SETUP_COLUMNS};
use crate::problem::{OperationKind, OPERAND_RANGE};
use crate::session::DurationPreset;

pub(super) fn render_menu(app: &App, area: Rect, buf: &mut Buffer) {
    let mut lines = vec![
        Line::from(Span::styled("✨ Math Drill ✨", title_style())),
        Line::from(Span::styled("Times tables, division and squares", dim_style())),
        Line::default(),
    ];

    for (idx, item) in MenuItem::ALL.iter().enumerate() {
        let selected = idx == app.menu_index;
        let marker = if selected { "▶ " } else { "  " };
        let style = if selected {
            bold_style().fg(Color::Magenta)
        } else {
            bold_style()
        };
        lines.push(Line::from(vec![
            Span::styled(marker, style),
            Span::styled(format!("{}. {}", idx + 1, item.label()), style),
        ]));
        lines.push(Line::from(Span::styled(item.description(), italic_style())));
        lines.push(Line::default());
    }

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn number_span(app: &App, n: u32) -> Span<'static> {
    let mut style = if app.setup.numbers().contains(&n) {
        bold_style().fg(Color::Black).bg(Color::Green)
    } else {
        dim_style()
    };
    if n == app.setup_cursor {
        style = style.add_modifier(Modifier::REVERSED | Modifier::UNDERLINED);
    }
    Span::styled(format!(" {n:>2} "), style)
}

fn operation_span(app: &App, kind: OperationKind, key: char) -> Vec<Span<'static>> {
    let enabled = app.setup.operations().contains(&kind);
    let (check, style) = if enabled {
        ("[x]", bold_style().fg(Color::Green))
    } else {
        ("[ ]", dim_style())
    };
    vec![
        Span::styled(format!("({key}) "), italic_style()),
        Span::styled(format!("{check} {}", kind.label()), style),
        Span::raw("   "),
    ]
}

pub(super) fn render_setup(app: &App, area: Rect, buf: &mut Buffer) {
    let mut lines = vec![
        Line::from(Span::styled("Practice Setup", title_style())),
        Line::default(),
        Line::from(Span::styled("Which numbers?", bold_style())),
    ];

    let numbers: Vec<u32> = OPERAND_RANGE.collect();
    for row in numbers.chunks(SETUP_COLUMNS as usize) {
        lines.push(Line::from(
            row.iter()
                .flat_map(|n| [number_span(app, *n), Span::raw(" ")])
                .collect::<Vec<_>>(),
        ));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Operations", bold_style())));
    lines.push(Line::from(
        [
            (OperationKind::Multiplication, 'm'),
            (OperationKind::Division, 'd'),
            (OperationKind::Squares, 's'),
        ]
        .into_iter()
        .flat_map(|(kind, key)| operation_span(app, kind, key))
        .collect::<Vec<_>>(),
    ));

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Session length", bold_style())));
    lines.push(Line::from(
        DurationPreset::ALL
            .iter()
            .flat_map(|preset| {
                let style = if *preset == app.setup.duration() {
                    bold_style().fg(Color::Magenta).add_modifier(Modifier::REVERSED)
                } else {
                    dim_style()
                };
                [Span::styled(format!(" {} ", preset.label()), style), Span::raw(" ")]
            })
            .collect::<Vec<_>>(),
    ));

    lines.push(Line::default());
    let start = if app.setup.can_start() {
        Span::styled(
            format!("Start Practice! → ({})", app.setup.operand_label()),
            bold_style().fg(Color::Green),
        )
    } else {
        Span::styled("Select Numbers", Style::default().fg(Color::Gray))
    };
    lines.push(Line::from(start));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .render(area, buf);
}
