use crate::clock::{ClockTick, SessionClock, SystemTimeSource, TimeSource};
use crate::error::{parse_answer, DrillError, Result};
use crate::grading::QuizSummary;
use crate::problem::{generate, Problem, RandomSource, RngSource};
use crate::session::SessionConfig;
use log::{debug, info};
use std::fmt;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    NotStarted,
    AwaitingAnswer,
    ShowingFeedback,
    Complete,
}

impl QuizPhase {
    fn describe(&self) -> &'static str {
        match self {
            QuizPhase::NotStarted => "not started",
            QuizPhase::AwaitingAnswer => "awaiting an answer",
            QuizPhase::ShowingFeedback => "showing feedback",
            QuizPhase::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

/// One answered problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub problem: Problem,
    pub submitted_answer: i64,
    pub is_correct: bool,
    /// From the moment the problem was shown to the moment it was answered.
    pub elapsed_secs: f64,
}

/// Outcome of the most recent submission, for the feedback banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub is_correct: bool,
    pub correct_answer: i64,
}

/// The timed practice session.
///
/// `NotStarted -> AwaitingAnswer <-> ShowingFeedback -> Complete`, with
/// `reset`/`abandon` returning to `NotStarted` from anywhere. Every mutation
/// goes through one of the intent methods; the UI only reads.
pub struct QuizEngine {
    rng: Box<dyn RandomSource>,
    time: Box<dyn TimeSource>,
    config: Option<SessionConfig>,
    current: Option<Problem>,
    problem_started_at: Option<Instant>,
    clock: SessionClock,
    score: Score,
    history: Vec<Attempt>,
    phase: QuizPhase,
    last_feedback: Option<Feedback>,
}

impl QuizEngine {
    pub fn new() -> Self {
        Self::with_sources(
            Box::new(RngSource::thread()),
            Box::new(SystemTimeSource),
        )
    }

    pub fn with_sources(rng: Box<dyn RandomSource>, time: Box<dyn TimeSource>) -> Self {
        Self {
            rng,
            time,
            config: None,
            current: None,
            problem_started_at: None,
            clock: SessionClock::new(),
            score: Score::default(),
            history: Vec::new(),
            phase: QuizPhase::NotStarted,
            last_feedback: None,
        }
    }

    fn expect_phase(&self, operation: &'static str, expected: QuizPhase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(DrillError::UnexpectedPhase {
                operation,
                phase: self.phase.describe().to_string(),
            })
        }
    }

    fn set_phase(&mut self, phase: QuizPhase) {
        debug!("quiz phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Validates `config`, draws the first problem and starts the countdown.
    /// On error nothing about the current session changes.
    pub fn start_session(&mut self, config: SessionConfig) -> Result<()> {
        config.validate()?;
        let first = generate(&config, self.rng.as_mut())?;

        info!(
            "starting {}s session: numbers {:?}, operations {:?}",
            config.duration_secs, config.eligible_operands, config.enabled_kinds
        );
        self.clock.start(config.duration_secs);
        self.config = Some(config);
        self.current = Some(first);
        self.problem_started_at = Some(self.time.now());
        self.score = Score::default();
        self.history.clear();
        self.last_feedback = None;
        self.set_phase(QuizPhase::AwaitingAnswer);
        Ok(())
    }

    /// Starts over with the last configuration ("practice again").
    pub fn restart(&mut self) -> Result<()> {
        let config = self.config.clone().ok_or_else(|| {
            DrillError::InvalidConfiguration("no session has been configured yet".to_string())
        })?;
        self.start_session(config)
    }

    /// One second of session time. Hitting zero ends the session from either
    /// middle phase; an unanswered problem is dropped without an attempt.
    pub fn tick(&mut self) -> ClockTick {
        if matches!(self.phase, QuizPhase::NotStarted | QuizPhase::Complete) {
            return ClockTick::Idle;
        }
        let tick = self.clock.tick();
        if tick == ClockTick::Expired {
            self.finish();
        }
        tick
    }

    fn finish(&mut self) {
        self.clock.stop();
        self.current = None;
        self.problem_started_at = None;
        self.set_phase(QuizPhase::Complete);
        info!(
            "session complete: {}/{} correct",
            self.score.correct, self.score.total
        );
    }

    pub fn submit_answer(&mut self, raw: &str) -> Result<Feedback> {
        self.expect_phase("submit an answer", QuizPhase::AwaitingAnswer)?;
        let answer = parse_answer(raw)?;
        let problem = self
            .current
            .clone()
            .ok_or_else(|| DrillError::UnexpectedPhase {
                operation: "submit an answer",
                phase: "without a problem".to_string(),
            })?;

        let now = self.time.now();
        let elapsed_secs = self
            .problem_started_at
            .map(|started| now.saturating_duration_since(started).as_secs_f64())
            .unwrap_or(0.0);
        let is_correct = problem.is_correct(answer);
        let feedback = Feedback {
            is_correct,
            correct_answer: problem.correct_answer,
        };

        debug!(
            "{} = {} ({}) in {:.2}s",
            problem.display_text,
            answer,
            if is_correct { "correct" } else { "wrong" },
            elapsed_secs
        );
        self.history.push(Attempt {
            problem,
            submitted_answer: answer,
            is_correct,
            elapsed_secs,
        });
        self.score.total += 1;
        if is_correct {
            self.score.correct += 1;
        }
        self.last_feedback = Some(feedback);
        self.set_phase(QuizPhase::ShowingFeedback);
        Ok(feedback)
    }

    /// Moves past the feedback: either to the next problem or, when time is
    /// up, to `Complete`.
    pub fn advance(&mut self) -> Result<QuizPhase> {
        self.expect_phase("advance", QuizPhase::ShowingFeedback)?;
        if self.clock.remaining_secs() == 0 {
            self.finish();
            return Ok(self.phase);
        }

        let config = self.config.as_ref().ok_or_else(|| {
            DrillError::InvalidConfiguration("no session has been configured yet".to_string())
        })?;
        let next = generate(config, self.rng.as_mut())?;
        self.current = Some(next);
        self.problem_started_at = Some(self.time.now());
        self.last_feedback = None;
        self.set_phase(QuizPhase::AwaitingAnswer);
        Ok(self.phase)
    }

    /// Back to `NotStarted`, optionally swapping the configuration used by
    /// the next `restart`.
    pub fn reset(&mut self, config: Option<SessionConfig>) {
        if let Some(config) = config {
            self.config = Some(config);
        }
        self.current = None;
        self.problem_started_at = None;
        self.clock.clear();
        self.score = Score::default();
        self.history.clear();
        self.last_feedback = None;
        self.set_phase(QuizPhase::NotStarted);
    }

    pub fn abandon(&mut self) {
        self.reset(None);
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn current_problem(&self) -> Option<&Problem> {
        self.current.as_ref()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.clock.remaining_secs()
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn history(&self) -> &[Attempt] {
        &self.history
    }

    pub fn last_feedback(&self) -> Option<Feedback> {
        self.last_feedback
    }

    pub fn config(&self) -> Option<&SessionConfig> {
        self.config.as_ref()
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary::from_history(&self.history)
    }
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QuizEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizEngine")
            .field("phase", &self.phase)
            .field("current", &self.current)
            .field("remaining_secs", &self.clock.remaining_secs())
            .field("score", &self.score)
            .field("history", &self.history.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualTime;
    use crate::problem::{OperationKind, ScriptedRandom};
    use assert_matches::assert_matches;

    // kind 0, operand 0 (7), factor index 7 (8): always 7 × 8
    fn seven_times_eight() -> (QuizEngine, ManualTime) {
        let time = ManualTime::new();
        let engine = QuizEngine::with_sources(
            Box::new(ScriptedRandom::new(vec![0, 0, 7])),
            Box::new(time.clone()),
        );
        (engine, time)
    }

    fn sevens(duration: u32) -> SessionConfig {
        SessionConfig::new(duration, [7], [OperationKind::Multiplication])
    }

    #[test]
    fn test_new_engine_is_not_started() {
        let (engine, _) = seven_times_eight();
        assert_eq!(engine.phase(), QuizPhase::NotStarted);
        assert!(engine.current_problem().is_none());
        assert_eq!(engine.score(), Score::default());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_start_session() {
        let (mut engine, _) = seven_times_eight();
        engine.start_session(sevens(60)).unwrap();

        assert_eq!(engine.phase(), QuizPhase::AwaitingAnswer);
        assert_eq!(engine.remaining_secs(), 60);
        let problem = engine.current_problem().unwrap();
        assert_eq!(problem.operand_a, 7);
        assert!((1..=12).contains(&problem.operand_b));
    }

    #[test]
    fn test_correct_answer() {
        let (mut engine, time) = seven_times_eight();
        engine.start_session(sevens(60)).unwrap();
        time.advance_secs(2.5);

        let feedback = engine.submit_answer("56").unwrap();
        assert!(feedback.is_correct);
        assert_eq!(engine.score(), Score { correct: 1, total: 1 });
        assert_eq!(engine.phase(), QuizPhase::ShowingFeedback);

        let attempt = &engine.history()[0];
        assert_eq!(attempt.submitted_answer, 56);
        assert!(attempt.is_correct);
        assert!((attempt.elapsed_secs - 2.5).abs() < 1e-9);
        assert_eq!(engine.last_feedback(), Some(feedback));
    }

    #[test]
    fn test_wrong_answer_reports_correct_value() {
        let (mut engine, _) = seven_times_eight();
        engine.start_session(sevens(60)).unwrap();

        let feedback = engine.submit_answer("54").unwrap();
        assert_eq!(
            feedback,
            Feedback {
                is_correct: false,
                correct_answer: 56
            }
        );
        assert_eq!(engine.score(), Score { correct: 0, total: 1 });
        assert!(!engine.history()[0].is_correct);
    }

    #[test]
    fn test_invalid_input_changes_nothing() {
        let (mut engine, _) = seven_times_eight();
        engine.start_session(sevens(60)).unwrap();

        assert_matches!(engine.submit_answer("abc"), Err(DrillError::InvalidInput(_)));
        assert_matches!(engine.submit_answer(""), Err(DrillError::InvalidInput(_)));
        assert_eq!(engine.score(), Score::default());
        assert_eq!(engine.phase(), QuizPhase::AwaitingAnswer);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_advance_resets_problem_timer() {
        let (mut engine, time) = seven_times_eight();
        engine.start_session(sevens(60)).unwrap();
        engine.submit_answer("56").unwrap();

        time.advance_secs(4.0);
        assert_eq!(engine.advance().unwrap(), QuizPhase::AwaitingAnswer);
        assert!(engine.last_feedback().is_none());

        time.advance_secs(1.0);
        engine.submit_answer("56").unwrap();
        assert!((engine.history()[1].elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ticks_past_expiry_complete_once() {
        let (mut engine, _) = seven_times_eight();
        engine.start_session(sevens(10)).unwrap();

        let mut expiries = 0;
        for _ in 0..20 {
            if engine.tick() == ClockTick::Expired {
                expiries += 1;
            }
        }
        assert_eq!(expiries, 1);
        assert_eq!(engine.remaining_secs(), 0);
        assert_eq!(engine.phase(), QuizPhase::Complete);
        assert!(engine.history().is_empty());
        assert!(engine.current_problem().is_none());
    }

    #[test]
    fn test_expiry_during_feedback_keeps_attempt() {
        let (mut engine, _) = seven_times_eight();
        engine.start_session(sevens(2)).unwrap();
        engine.tick();
        engine.submit_answer("56").unwrap();
        assert_eq!(engine.tick(), ClockTick::Expired);

        assert_eq!(engine.phase(), QuizPhase::Complete);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.score().total, 1);
    }

    #[test]
    fn test_out_of_phase_intents_are_rejected() {
        let (mut engine, _) = seven_times_eight();
        assert_matches!(
            engine.submit_answer("1"),
            Err(DrillError::UnexpectedPhase { .. })
        );
        assert_matches!(engine.advance(), Err(DrillError::UnexpectedPhase { .. }));

        engine.start_session(sevens(60)).unwrap();
        assert_matches!(engine.advance(), Err(DrillError::UnexpectedPhase { .. }));
        engine.submit_answer("56").unwrap();
        assert_matches!(
            engine.submit_answer("56"),
            Err(DrillError::UnexpectedPhase { .. })
        );
        assert_eq!(engine.score().total, 1);
    }

    #[test]
    fn test_invalid_start_keeps_running_session() {
        let (mut engine, _) = seven_times_eight();
        engine.start_session(sevens(60)).unwrap();
        engine.submit_answer("56").unwrap();

        let bad = SessionConfig::new(60, [], [OperationKind::Division]);
        assert_matches!(
            engine.start_session(bad),
            Err(DrillError::InvalidConfiguration(_))
        );
        assert_eq!(engine.phase(), QuizPhase::ShowingFeedback);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.config(), Some(&sevens(60)));
    }

    #[test]
    fn test_ticks_are_ignored_before_start() {
        let (mut engine, _) = seven_times_eight();
        assert_eq!(engine.tick(), ClockTick::Idle);
        assert_eq!(engine.phase(), QuizPhase::NotStarted);
    }

    #[test]
    fn test_reset_and_restart() {
        let (mut engine, _) = seven_times_eight();
        assert_matches!(engine.restart(), Err(DrillError::InvalidConfiguration(_)));

        engine.start_session(sevens(30)).unwrap();
        engine.submit_answer("56").unwrap();
        engine.abandon();
        assert_eq!(engine.phase(), QuizPhase::NotStarted);
        assert!(engine.history().is_empty());
        assert_eq!(engine.score(), Score::default());
        assert_eq!(engine.remaining_secs(), 0);

        engine.reset(Some(sevens(120)));
        engine.restart().unwrap();
        assert_eq!(engine.phase(), QuizPhase::AwaitingAnswer);
        assert_eq!(engine.remaining_secs(), 120);
    }

    #[test]
    fn test_restart_after_completion_clears_history() {
        let (mut engine, _) = seven_times_eight();
        engine.start_session(sevens(1)).unwrap();
        engine.submit_answer("56").unwrap();
        engine.tick();
        assert_eq!(engine.phase(), QuizPhase::Complete);

        engine.restart().unwrap();
        assert!(engine.history().is_empty());
        assert_eq!(engine.remaining_secs(), 1);
    }

    #[test]
    fn test_history_matches_score_total() {
        let time = ManualTime::new();
        let mut engine =
            QuizEngine::with_sources(Box::new(RngSource::seeded(9)), Box::new(time.clone()));
        engine
            .start_session(SessionConfig::new(600, 1..=12, OperationKind::ALL))
            .unwrap();

        for round in 0..50 {
            let answer = engine.current_problem().unwrap().correct_answer;
            let typed = if round % 3 == 0 { answer + 1 } else { answer };
            time.advance_secs(0.5);
            engine.submit_answer(&typed.to_string()).unwrap();
            assert_eq!(engine.history().len() as u32, engine.score().total);
            engine.advance().unwrap();
        }
        assert_eq!(engine.score().total, 50);
        assert_eq!(engine.score().correct, 33);
        assert!(engine.history().iter().all(|a| a.elapsed_secs >= 0.0));
    }
}
