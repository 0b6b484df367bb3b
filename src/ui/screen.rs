use ratatui::{buffer::Buffer, layout::Rect};

use crate::app::{App, Mode};
use crate::quiz::QuizPhase;
use crate::ui::{lessons, menu, quiz};

/// A UI Screen boundary: draws one mode of the app and names its keys.
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
    /// Key legend shown on the bottom line.
    fn legend(&self, app: &App) -> &'static str;
}

pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        menu::render_menu(app, area, buf);
    }

    fn legend(&self, _app: &App) -> &'static str {
        "↑↓ choose / enter select / (q)uit"
    }
}

pub struct SetupScreen;

impl Screen for SetupScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        menu::render_setup(app, area, buf);
    }

    fn legend(&self, _app: &App) -> &'static str {
        "←↑↓→ move / space toggle / (a)ll / (c)lear / (m)(d)(s) operations / (t)ime / enter start / esc back"
    }
}

pub struct QuizScreen;

impl Screen for QuizScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        quiz::render_quiz(app, area, buf);
    }

    fn legend(&self, app: &App) -> &'static str {
        match app.quiz.phase() {
            QuizPhase::ShowingFeedback => "enter next / esc back",
            _ => "type answer / enter check / esc back",
        }
    }
}

pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        quiz::render_results(app, area, buf);
    }

    fn legend(&self, _app: &App) -> &'static str {
        "(r)/enter practice again / (m)/esc menu"
    }
}

pub struct LessonBrowserScreen;

impl Screen for LessonBrowserScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        lessons::render_browser(app, area, buf);
    }

    fn legend(&self, _app: &App) -> &'static str {
        "↑↓ choose / enter open / esc back"
    }
}

pub struct LessonScreen;

impl Screen for LessonScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        lessons::render_lesson(app, area, buf);
    }

    fn legend(&self, app: &App) -> &'static str {
        match app.lesson.as_ref() {
            Some(engine) if engine.has_answered_current() => "enter next / esc lessons",
            Some(engine) if engine.current_item().is_some() => {
                "type answer / enter check / esc lessons"
            }
            _ => "↑↓ scroll / enter practice / esc lessons",
        }
    }
}

pub struct LessonCompleteScreen;

impl Screen for LessonCompleteScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        lessons::render_lesson_complete(app, area, buf);
    }

    fn legend(&self, _app: &App) -> &'static str {
        "(r)/enter try again / (b)/esc back to lessons"
    }
}

/// Helper to construct the appropriate screen for the current mode
pub fn current_screen(app: &App) -> Box<dyn Screen> {
    match app.mode {
        Mode::Menu => Box::new(MenuScreen),
        Mode::PracticeSetup => Box::new(SetupScreen),
        Mode::Quiz if app.quiz.phase() == QuizPhase::Complete => Box::new(ResultsScreen),
        Mode::Quiz => Box::new(QuizScreen),
        Mode::Lessons => Box::new(LessonBrowserScreen),
        Mode::Lesson => Box::new(LessonScreen),
        Mode::LessonComplete => Box::new(LessonCompleteScreen),
    }
}
