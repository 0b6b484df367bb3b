mod lessons;
mod menu;
mod quiz;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::clock::TimerUrgency;
use crate::grading::GradeTier;
use crate::ui::screen::current_screen;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

const ORANGE: Color = Color::Rgb(255, 165, 0);

fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn italic_style() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

fn title_style() -> Style {
    bold_style().fg(Color::Magenta)
}

fn tier_color(tier: GradeTier) -> Color {
    match tier {
        GradeTier::Excellent => Color::Green,
        GradeTier::Good => Color::Blue,
        GradeTier::Fair => Color::Yellow,
        GradeTier::Weak => ORANGE,
        GradeTier::Failing => Color::Red,
    }
}

fn urgency_color(urgency: TimerUrgency) -> Color {
    match urgency {
        TimerUrgency::Calm => Color::Magenta,
        TimerUrgency::Warning => ORANGE,
        TimerUrgency::Critical => Color::Red,
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let screen = current_screen(self);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(1),    // screen
                Constraint::Length(1), // message
                Constraint::Length(1), // legend
            ])
            .split(area);

        screen.render(self, chunks[0], buf);

        if let Some(message) = &self.message {
            Paragraph::new(Span::styled(message.as_str(), bold_style().fg(Color::Red)))
                .alignment(Alignment::Center)
                .render(chunks[1], buf);
        }

        Paragraph::new(Span::styled(screen.legend(self), italic_style()))
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Mode;
    use crate::catalog::Catalog;
    use crate::clock::ManualTime;
    use crate::problem::ScriptedRandom;
    use crate::quiz::QuizEngine;
    use crate::setup::PracticeSetup;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_test_app() -> App {
        let quiz = QuizEngine::with_sources(
            Box::new(ScriptedRandom::new(vec![0, 0, 7])),
            Box::new(ManualTime::new()),
        );
        let mut setup = PracticeSetup::new();
        setup.toggle_number(7);
        App::with_quiz_engine(Catalog::builtin().unwrap(), setup, quiz)
    }

    fn render(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_ui_menu() {
        let app = create_test_app();
        let rendered = render(&app, 80, 24);
        assert!(rendered.contains("Math Drill"));
        assert!(rendered.contains("Timed Practice"));
        assert!(rendered.contains("Lessons"));
    }

    #[test]
    fn test_ui_setup() {
        let mut app = create_test_app();
        app.mode = Mode::PracticeSetup;
        let rendered = render(&app, 100, 30);
        assert!(rendered.contains("Practice Setup"));
        assert!(rendered.contains("10 min"));
        assert!(rendered.contains("Start Practice"));
    }

    #[test]
    fn test_ui_quiz_in_progress() {
        let mut app = create_test_app();
        app.start_quiz().unwrap();
        let rendered = render(&app, 80, 24);
        assert!(rendered.contains("7 × 8"));
        assert!(rendered.contains("10:00"));
        assert!(rendered.contains("0/0"));
    }

    #[test]
    fn test_ui_quiz_feedback() {
        let mut app = create_test_app();
        app.start_quiz().unwrap();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Enter);
        let rendered = render(&app, 80, 24);
        assert!(rendered.contains("Not quite"));
        assert!(rendered.contains("56"));
    }

    #[test]
    fn test_ui_results_without_answers() {
        let mut app = create_test_app();
        app.setup.set_duration(crate::session::DurationPreset::HalfMinute);
        app.start_quiz().unwrap();
        for _ in 0..30 {
            app.on_tick();
        }
        let rendered = render(&app, 80, 30);
        assert!(rendered.contains("Practice Complete"));
        assert!(rendered.contains("30 second"));
        assert!(!rendered.contains("Fastest"));
    }

    #[test]
    fn test_ui_results_with_highlights() {
        let mut app = create_test_app();
        app.setup.set_duration(crate::session::DurationPreset::HalfMinute);
        app.start_quiz().unwrap();
        for _ in 0..3 {
            press(&mut app, KeyCode::Char('5'));
            press(&mut app, KeyCode::Char('6'));
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Enter);
        }
        for _ in 0..30 {
            app.on_tick();
        }
        let rendered = render(&app, 100, 40);
        assert!(rendered.contains("A+"));
        assert!(rendered.contains("Fastest"));
        assert!(rendered.contains("Needs Practice"));
    }

    #[test]
    fn test_ui_lesson_browser_and_lesson() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('2'));
        let rendered = render(&app, 80, 24);
        assert!(rendered.contains("Multiplication"));
        assert!(rendered.contains("Number Sense"));

        press(&mut app, KeyCode::Enter);
        let rendered = render(&app, 80, 24);
        assert!(rendered.contains("What is Multiplication?"));

        press(&mut app, KeyCode::Enter);
        let rendered = render(&app, 100, 40);
        assert!(rendered.contains("shortcut"));
        assert!(rendered.contains("3 × 4 = 12"));

        press(&mut app, KeyCode::Enter);
        let rendered = render(&app, 80, 24);
        assert!(rendered.contains("Question 1 of 3"));
        assert!(rendered.contains("Hint"));
    }

    #[test]
    fn test_ui_lesson_complete() {
        let mut app = create_test_app();
        app.open_lesson("mult-intro").unwrap();
        press(&mut app, KeyCode::Enter);
        for answer in ['3', '4', '3'] {
            press(&mut app, KeyCode::Char(answer));
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Enter);
        }
        let rendered = render(&app, 80, 24);
        assert!(rendered.contains("Lesson Complete"));
        assert!(rendered.contains("3/3"));
        assert!(rendered.contains("100%"));
    }

    #[test]
    fn test_ui_message_is_shown() {
        let mut app = create_test_app();
        app.message = Some("Type a whole number".to_string());
        let rendered = render(&app, 80, 24);
        assert!(rendered.contains("Type a whole number"));
    }

    #[test]
    fn test_ui_small_area() {
        let mut app = create_test_app();
        let area = Rect::new(0, 0, 20, 5);
        for mode in [Mode::Menu, Mode::PracticeSetup, Mode::Lessons] {
            app.mode = mode;
            let mut buffer = Buffer::empty(area);
            (&app).render(area, &mut buffer);
            assert!(*buffer.area() == area);
        }
        app.start_quiz().unwrap();
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);
        assert!(*buffer.area() == area);
    }
}
