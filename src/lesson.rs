use crate::catalog::{Lesson, PracticeItem};
use crate::error::{parse_answer, DrillError, Result};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonPhase {
    Learning,
    Practicing,
    Complete,
}

impl LessonPhase {
    fn describe(&self) -> &'static str {
        match self {
            LessonPhase::Learning => "learning",
            LessonPhase::Practicing => "practicing",
            LessonPhase::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticeResult {
    pub is_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Perfect,
    Good,
    KeepGoing,
}

impl Medal {
    pub fn emoji(&self) -> &'static str {
        match self {
            Medal::Perfect => "🌟",
            Medal::Good => "⭐",
            Medal::KeepGoing => "💪",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonSummary {
    pub correct: usize,
    pub total: usize,
    pub percent: u32,
    pub medal: Medal,
}

impl LessonSummary {
    pub fn from_results(results: &[PracticeResult]) -> Self {
        let correct = results.iter().filter(|r| r.is_correct).count();
        let total = results.len();
        let percent = (100.0 * correct as f64 / total.max(1) as f64).round() as u32;
        let medal = match percent {
            100 => Medal::Perfect,
            p if p >= 70 => Medal::Good,
            _ => Medal::KeepGoing,
        };
        Self {
            correct,
            total,
            percent,
            medal,
        }
    }
}

/// Walks one lesson: read the content, then answer each practice item in
/// order. An item must be answered before `advance` moves past it.
#[derive(Debug, Clone)]
pub struct LessonEngine {
    lesson: Lesson,
    phase: LessonPhase,
    practice_index: usize,
    results: Vec<PracticeResult>,
}

impl LessonEngine {
    pub fn new(lesson: Lesson) -> Self {
        Self {
            lesson,
            phase: LessonPhase::Learning,
            practice_index: 0,
            results: Vec::new(),
        }
    }

    fn unexpected(&self, operation: &'static str) -> DrillError {
        DrillError::UnexpectedPhase {
            operation,
            phase: self.phase.describe().to_string(),
        }
    }

    fn set_phase(&mut self, phase: LessonPhase) {
        debug!(
            "lesson {} phase {:?} -> {:?}",
            self.lesson.id, self.phase, phase
        );
        self.phase = phase;
        if phase == LessonPhase::Complete {
            let summary = self.summary();
            info!(
                "lesson {} complete: {}/{} correct",
                self.lesson.id, summary.correct, summary.total
            );
        }
    }

    pub fn begin_practice(&mut self) -> Result<()> {
        if self.phase != LessonPhase::Learning {
            return Err(self.unexpected("begin practice"));
        }
        self.practice_index = 0;
        self.results.clear();
        if self.lesson.practice.is_empty() {
            self.set_phase(LessonPhase::Complete);
        } else {
            self.set_phase(LessonPhase::Practicing);
        }
        Ok(())
    }

    /// Checks `raw` against the current item and records the outcome.
    pub fn submit_answer(&mut self, raw: &str) -> Result<bool> {
        if self.phase != LessonPhase::Practicing {
            return Err(self.unexpected("submit an answer"));
        }
        if self.has_answered_current() {
            return Err(DrillError::UnexpectedPhase {
                operation: "submit an answer",
                phase: "showing feedback".to_string(),
            });
        }
        let answer = parse_answer(raw)?;
        let item = self
            .current_item()
            .ok_or_else(|| self.unexpected("submit an answer"))?;
        let is_correct = answer == item.answer;
        debug!("{} = {} ({})", item.question, answer, is_correct);
        self.results.push(PracticeResult { is_correct });
        Ok(is_correct)
    }

    /// Next item, or `Complete` after the last one.
    pub fn advance(&mut self) -> Result<LessonPhase> {
        if self.phase != LessonPhase::Practicing {
            return Err(self.unexpected("advance"));
        }
        if !self.has_answered_current() {
            return Err(DrillError::UnexpectedPhase {
                operation: "advance",
                phase: "awaiting an answer".to_string(),
            });
        }
        if self.practice_index + 1 >= self.lesson.practice.len() {
            self.set_phase(LessonPhase::Complete);
        } else {
            self.practice_index += 1;
        }
        Ok(self.phase)
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn phase(&self) -> LessonPhase {
        self.phase
    }

    pub fn practice_index(&self) -> usize {
        self.practice_index
    }

    pub fn practice_len(&self) -> usize {
        self.lesson.practice.len()
    }

    pub fn current_item(&self) -> Option<&PracticeItem> {
        match self.phase {
            LessonPhase::Practicing => self.lesson.practice.get(self.practice_index),
            _ => None,
        }
    }

    pub fn has_answered_current(&self) -> bool {
        self.results.len() > self.practice_index
    }

    /// Result for the current item once it has been answered.
    pub fn last_result(&self) -> Option<PracticeResult> {
        if self.phase == LessonPhase::Practicing && self.has_answered_current() {
            self.results.last().copied()
        } else {
            None
        }
    }

    pub fn is_last_item(&self) -> bool {
        self.practice_index + 1 >= self.lesson.practice.len()
    }

    pub fn results(&self) -> &[PracticeResult] {
        &self.results
    }

    pub fn summary(&self) -> LessonSummary {
        LessonSummary::from_results(&self.results)
    }
}
