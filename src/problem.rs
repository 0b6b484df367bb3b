use crate::error::{DrillError, Result};
use crate::session::SessionConfig;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Times-table numbers a session may draw from, and the range of the
/// second factor / quotient.
pub const OPERAND_RANGE: RangeInclusive<u32> = 1..=12;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OperationKind {
    Multiplication,
    Division,
    Squares,
}

impl OperationKind {
    pub const ALL: [OperationKind; 3] = [
        OperationKind::Multiplication,
        OperationKind::Division,
        OperationKind::Squares,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            OperationKind::Multiplication => "×",
            OperationKind::Division => "÷",
            OperationKind::Squares => "n²",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::Multiplication => "× Multiply",
            OperationKind::Division => "÷ Divide",
            OperationKind::Squares => "n² Squares",
        }
    }
}

/// One generated arithmetic question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub operand_a: u32,
    pub operand_b: u32,
    pub kind: OperationKind,
    pub correct_answer: i64,
    pub display_text: String,
}

impl Problem {
    pub fn multiplication(a: u32, b: u32) -> Self {
        Self {
            operand_a: a,
            operand_b: b,
            kind: OperationKind::Multiplication,
            correct_answer: i64::from(a) * i64::from(b),
            display_text: format!("{a} × {b}"),
        }
    }

    /// Builds `divisor * quotient ÷ divisor`, so the division is always exact.
    pub fn division(divisor: u32, quotient: u32) -> Self {
        let dividend = divisor * quotient;
        Self {
            operand_a: dividend,
            operand_b: divisor,
            kind: OperationKind::Division,
            correct_answer: i64::from(quotient),
            display_text: format!("{dividend} ÷ {divisor}"),
        }
    }

    pub fn square(n: u32) -> Self {
        Self {
            operand_a: n,
            operand_b: n,
            kind: OperationKind::Squares,
            correct_answer: i64::from(n) * i64::from(n),
            display_text: format!("{n}²"),
        }
    }

    pub fn is_correct(&self, answer: i64) -> bool {
        answer == self.correct_answer
    }
}

/// Source of uniform choices for the problem generator.
pub trait RandomSource {
    /// Returns a value in `0..upper`. Callers never pass `upper == 0`.
    fn below(&mut self, upper: usize) -> usize;
}

/// Adapts any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<ThreadRng> {
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn below(&mut self, upper: usize) -> usize {
        self.0.gen_range(0..upper)
    }
}

/// Replays a fixed list of choices, wrapping each into range and cycling
/// when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    choices: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(choices: Vec<usize>) -> Self {
        Self { choices, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&mut self, upper: usize) -> usize {
        if self.choices.is_empty() {
            return 0;
        }
        let value = self.choices[self.cursor % self.choices.len()];
        self.cursor += 1;
        value % upper
    }
}

fn pick<T: Copy>(rng: &mut dyn RandomSource, items: &[T]) -> T {
    items[rng.below(items.len())]
}

fn pick_factor(rng: &mut dyn RandomSource) -> u32 {
    let span = (OPERAND_RANGE.end() - OPERAND_RANGE.start() + 1) as usize;
    OPERAND_RANGE.start() + rng.below(span) as u32
}

/// Draws the next problem for `config`.
///
/// The operation is chosen first, then its operands: the table number always
/// comes from the eligible operands, the other factor (or the quotient) from
/// 1..=12. Squares fall back to 1..=12 when no operands were chosen.
pub fn generate(config: &SessionConfig, rng: &mut dyn RandomSource) -> Result<Problem> {
    let kinds: Vec<OperationKind> = config.enabled_kinds.iter().copied().collect();
    if kinds.is_empty() {
        return Err(DrillError::InvalidConfiguration(
            "no operation selected".to_string(),
        ));
    }
    let operands: Vec<u32> = config.eligible_operands.iter().copied().collect();

    let kind = pick(rng, &kinds);
    if operands.is_empty() && kind != OperationKind::Squares {
        return Err(DrillError::InvalidConfiguration(format!(
            "{kind} needs at least one number to practice"
        )));
    }

    let problem = match kind {
        OperationKind::Squares => {
            let n = if operands.is_empty() {
                pick_factor(rng)
            } else {
                pick(rng, &operands)
            };
            Problem::square(n)
        }
        OperationKind::Division => {
            let divisor = pick(rng, &operands);
            Problem::division(divisor, pick_factor(rng))
        }
        OperationKind::Multiplication => {
            let a = pick(rng, &operands);
            Problem::multiplication(a, pick_factor(rng))
        }
    };
    Ok(problem)
}
