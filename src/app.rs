use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;

use crate::catalog::Catalog;
use crate::clock::ClockTick;
use crate::error::{DrillError, Result};
use crate::lesson::{LessonEngine, LessonPhase};
use crate::problem::{OperationKind, OPERAND_RANGE};
use crate::quiz::{QuizEngine, QuizPhase};
use crate::setup::PracticeSetup;

/// Longest answer the input box accepts.
const MAX_INPUT_LEN: usize = 7;
/// Numbers per row on the setup screen.
pub const SETUP_COLUMNS: u32 = 6;
const SCROLL_PAGE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    PracticeSetup,
    /// Running quiz, and its results once complete.
    Quiz,
    Lessons,
    Lesson,
    LessonComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Practice,
    Lessons,
}

impl MenuItem {
    pub const ALL: [MenuItem; 2] = [MenuItem::Practice, MenuItem::Lessons];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Practice => "🎯 Timed Practice",
            MenuItem::Lessons => "📚 Lessons",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MenuItem::Practice => "Race the clock on the tables you pick",
            MenuItem::Lessons => "Learn tricks step by step, then try them out",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// Everything the terminal front end shows, and the routing from keys to
/// engine intents.
#[derive(Debug)]
pub struct App {
    pub mode: Mode,
    pub catalog: Catalog,
    pub setup: PracticeSetup,
    pub quiz: QuizEngine,
    pub lesson: Option<LessonEngine>,
    /// Text typed into the answer box.
    pub input: String,
    /// One-line notice shown until the next key press.
    pub message: Option<String>,
    pub menu_index: usize,
    /// Number under the cursor on the setup screen.
    pub setup_cursor: u32,
    /// `None` lists categories, `Some` lists that category's lessons.
    pub open_category: Option<usize>,
    pub browser_cursor: usize,
    pub learn_scroll: u16,
}

impl App {
    pub fn new(catalog: Catalog, setup: PracticeSetup) -> Self {
        Self::with_quiz_engine(catalog, setup, QuizEngine::new())
    }

    pub fn with_quiz_engine(catalog: Catalog, setup: PracticeSetup, quiz: QuizEngine) -> Self {
        Self {
            mode: Mode::Menu,
            catalog,
            setup,
            quiz,
            lesson: None,
            input: String::new(),
            message: None,
            menu_index: 0,
            setup_cursor: *OPERAND_RANGE.start(),
            open_category: None,
            browser_cursor: 0,
            learn_scroll: 0,
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        debug!("mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.input.clear();
    }

    /// Starts a timed session from the current setup.
    pub fn start_quiz(&mut self) -> Result<()> {
        if !self.setup.can_start() {
            return Err(DrillError::InvalidConfiguration(
                "select at least one number to practice".to_string(),
            ));
        }
        self.quiz.start_session(self.setup.to_config())?;
        self.set_mode(Mode::Quiz);
        Ok(())
    }

    /// Opens a lesson by id, placing the browser on it for the way back.
    pub fn open_lesson(&mut self, id: &str) -> Result<()> {
        let lesson = self.catalog.lesson(id)?.clone();
        if let Some((category, index)) = self.catalog.position(id) {
            self.open_category = Some(category);
            self.browser_cursor = index;
        }
        self.lesson = Some(LessonEngine::new(lesson));
        self.learn_scroll = 0;
        self.set_mode(Mode::Lesson);
        Ok(())
    }

    /// Advances the session clock. Returns true when the screen changed.
    pub fn on_tick(&mut self) -> bool {
        if self.mode != Mode::Quiz {
            return false;
        }
        match self.quiz.tick() {
            ClockTick::Idle => false,
            ClockTick::Running { .. } => true,
            ClockTick::Expired => {
                self.input.clear();
                true
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Quit;
        }
        self.message = None;

        match self.mode {
            Mode::Menu => return self.menu_key(key),
            Mode::PracticeSetup => self.setup_key(key),
            Mode::Quiz => self.quiz_key(key),
            Mode::Lessons => self.browser_key(key),
            Mode::Lesson => self.lesson_key(key),
            Mode::LessonComplete => self.lesson_complete_key(key),
        }
        AppAction::Continue
    }

    fn report(&mut self, err: DrillError) {
        debug!("{err}");
        self.message = Some(match err {
            DrillError::InvalidInput(_) => "Type a whole number".to_string(),
            other => other.to_string(),
        });
    }

    fn menu_key(&mut self, key: KeyEvent) -> AppAction {
        let count = MenuItem::ALL.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_index = (self.menu_index + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.menu_index = (self.menu_index + 1) % count;
            }
            KeyCode::Char('1') => self.choose(MenuItem::Practice),
            KeyCode::Char('2') => self.choose(MenuItem::Lessons),
            KeyCode::Enter => self.choose(MenuItem::ALL[self.menu_index % count]),
            _ => {}
        }
        AppAction::Continue
    }

    fn choose(&mut self, item: MenuItem) {
        match item {
            MenuItem::Practice => self.set_mode(Mode::PracticeSetup),
            MenuItem::Lessons => {
                self.open_category = None;
                self.browser_cursor = 0;
                self.set_mode(Mode::Lessons);
            }
        }
    }

    fn move_setup_cursor(&mut self, delta: i64) {
        let first = i64::from(*OPERAND_RANGE.start());
        let span = i64::from(*OPERAND_RANGE.end()) - first + 1;
        let offset = (i64::from(self.setup_cursor) - first + delta).rem_euclid(span);
        self.setup_cursor = (first + offset) as u32;
    }

    fn setup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.set_mode(Mode::Menu),
            KeyCode::Left | KeyCode::Char('h') => self.move_setup_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_setup_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_setup_cursor(-i64::from(SETUP_COLUMNS)),
            KeyCode::Down | KeyCode::Char('j') => self.move_setup_cursor(i64::from(SETUP_COLUMNS)),
            KeyCode::Char(' ') => self.setup.toggle_number(self.setup_cursor),
            KeyCode::Char('a') => self.setup.select_all(),
            KeyCode::Char('c') => self.setup.clear_all(),
            KeyCode::Char('m') => self.setup.toggle_operation(OperationKind::Multiplication),
            KeyCode::Char('d') => self.setup.toggle_operation(OperationKind::Division),
            KeyCode::Char('s') => self.setup.toggle_operation(OperationKind::Squares),
            KeyCode::Char('t') | KeyCode::Tab => self.setup.cycle_duration(),
            KeyCode::Char('T') | KeyCode::BackTab => self.setup.cycle_duration_back(),
            KeyCode::Enter => {
                if let Err(err) = self.start_quiz() {
                    self.report(err);
                }
            }
            _ => {}
        }
    }

    /// Digits, a leading minus and backspace edit the answer box.
    fn edit_input(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() && self.input.len() < MAX_INPUT_LEN => {
                self.input.push(c);
            }
            KeyCode::Char('-') if self.input.is_empty() => self.input.push('-'),
            KeyCode::Backspace => {
                self.input.pop();
            }
            _ => {}
        }
    }

    fn quiz_key(&mut self, key: KeyEvent) {
        match (self.quiz.phase(), key.code) {
            (QuizPhase::Complete, KeyCode::Esc | KeyCode::Char('m')) => {
                self.quiz.abandon();
                self.set_mode(Mode::Menu);
            }
            (_, KeyCode::Esc) => {
                self.quiz.abandon();
                self.set_mode(Mode::PracticeSetup);
            }
            (QuizPhase::AwaitingAnswer, KeyCode::Enter) => {
                if self.input.is_empty() {
                    return;
                }
                match self.quiz.submit_answer(&self.input) {
                    Ok(_) => self.input.clear(),
                    Err(err) => self.report(err),
                }
            }
            (QuizPhase::AwaitingAnswer, code) => self.edit_input(code),
            (QuizPhase::ShowingFeedback, KeyCode::Enter | KeyCode::Char(' ')) => {
                if let Err(err) = self.quiz.advance() {
                    self.report(err);
                }
            }
            (QuizPhase::Complete, KeyCode::Enter | KeyCode::Char('r')) => {
                if let Err(err) = self.quiz.restart() {
                    self.report(err);
                }
                self.input.clear();
            }
            (QuizPhase::NotStarted, _) => self.set_mode(Mode::PracticeSetup),
            _ => {}
        }
    }

    fn browser_len(&self) -> usize {
        match self.open_category.and_then(|c| self.catalog.category(c)) {
            Some(category) => category.lessons.len(),
            None => self.catalog.categories().len(),
        }
    }

    fn browser_key(&mut self, key: KeyEvent) {
        let len = self.browser_len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') if len > 0 => {
                self.browser_cursor = (self.browser_cursor + len - 1) % len;
            }
            KeyCode::Down | KeyCode::Char('j') if len > 0 => {
                self.browser_cursor = (self.browser_cursor + 1) % len;
            }
            KeyCode::Esc | KeyCode::Backspace => match self.open_category.take() {
                Some(category) => self.browser_cursor = category,
                None => self.set_mode(Mode::Menu),
            },
            KeyCode::Enter => match self.open_category {
                None if self.browser_cursor < len => {
                    self.open_category = Some(self.browser_cursor);
                    self.browser_cursor = 0;
                }
                Some(category) => {
                    let id = self
                        .catalog
                        .category(category)
                        .and_then(|c| c.lessons.get(self.browser_cursor))
                        .map(|l| l.id.clone());
                    if let Some(id) = id {
                        if let Err(err) = self.open_lesson(&id) {
                            self.report(err);
                        }
                    }
                }
                None => {}
            },
            _ => {}
        }
    }

    fn back_to_lessons(&mut self) {
        self.lesson = None;
        self.set_mode(Mode::Lessons);
    }

    fn lesson_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.back_to_lessons();
            return;
        }
        let Some(engine) = self.lesson.as_mut() else {
            self.back_to_lessons();
            return;
        };

        let outcome = match engine.phase() {
            LessonPhase::Learning => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.learn_scroll = self.learn_scroll.saturating_sub(1);
                    Ok(())
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.learn_scroll = self.learn_scroll.saturating_add(1);
                    Ok(())
                }
                KeyCode::PageUp => {
                    self.learn_scroll = self.learn_scroll.saturating_sub(SCROLL_PAGE);
                    Ok(())
                }
                KeyCode::PageDown => {
                    self.learn_scroll = self.learn_scroll.saturating_add(SCROLL_PAGE);
                    Ok(())
                }
                KeyCode::Home => {
                    self.learn_scroll = 0;
                    Ok(())
                }
                KeyCode::Enter | KeyCode::Char('p') => engine.begin_practice(),
                _ => Ok(()),
            },
            LessonPhase::Practicing if engine.has_answered_current() => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => engine.advance().map(|_| ()),
                _ => Ok(()),
            },
            LessonPhase::Practicing => match key.code {
                KeyCode::Enter if !self.input.is_empty() => {
                    let result = engine.submit_answer(&self.input).map(|_| ());
                    if result.is_ok() {
                        self.input.clear();
                    }
                    result
                }
                code => {
                    self.edit_input(code);
                    Ok(())
                }
            },
            LessonPhase::Complete => Ok(()),
        };

        if let Err(err) = outcome {
            self.report(err);
        }
        if self.lesson.as_ref().map(|l| l.phase()) == Some(LessonPhase::Complete) {
            self.set_mode(Mode::LessonComplete);
        }
    }

    fn lesson_complete_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('r') => {
                if let Some(engine) = self.lesson.as_mut() {
                    *engine = LessonEngine::new(engine.lesson().clone());
                    self.learn_scroll = 0;
                    self.set_mode(Mode::Lesson);
                }
            }
            KeyCode::Esc | KeyCode::Char('b') => self.back_to_lessons(),
            _ => {}
        }
    }
}
