use crate::config::Config;
use crate::problem::{OperationKind, OPERAND_RANGE};
use crate::session::{DurationPreset, SessionConfig};
use itertools::Itertools;
use log::warn;
use std::collections::BTreeSet;

/// Selections on the practice setup screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeSetup {
    numbers: BTreeSet<u32>,
    operations: BTreeSet<OperationKind>,
    duration: DurationPreset,
}

impl Default for PracticeSetup {
    fn default() -> Self {
        Self {
            numbers: BTreeSet::new(),
            operations: BTreeSet::from([OperationKind::Multiplication]),
            duration: DurationPreset::default(),
        }
    }
}

impl PracticeSetup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `n` in or out of the selection. Numbers outside 1..=12 are
    /// ignored.
    pub fn toggle_number(&mut self, n: u32) {
        if !OPERAND_RANGE.contains(&n) {
            return;
        }
        if !self.numbers.remove(&n) {
            self.numbers.insert(n);
        }
    }

    pub fn select_all(&mut self) {
        self.numbers = OPERAND_RANGE.collect();
    }

    pub fn clear_all(&mut self) {
        self.numbers.clear();
    }

    /// Flips an operation on or off; the last enabled one stays on.
    pub fn toggle_operation(&mut self, kind: OperationKind) {
        if self.operations.contains(&kind) {
            if self.operations.len() > 1 {
                self.operations.remove(&kind);
            }
        } else {
            self.operations.insert(kind);
        }
    }

    pub fn set_duration(&mut self, duration: DurationPreset) {
        self.duration = duration;
    }

    pub fn cycle_duration(&mut self) {
        self.duration = self.duration.next();
    }

    pub fn cycle_duration_back(&mut self) {
        self.duration = self.duration.previous();
    }

    pub fn numbers(&self) -> &BTreeSet<u32> {
        &self.numbers
    }

    pub fn operations(&self) -> &BTreeSet<OperationKind> {
        &self.operations
    }

    pub fn duration(&self) -> DurationPreset {
        self.duration
    }

    fn squares_only(&self) -> bool {
        self.operations.len() == 1 && self.operations.contains(&OperationKind::Squares)
    }

    pub fn can_start(&self) -> bool {
        !self.numbers.is_empty() || self.squares_only()
    }

    /// Short description for the quiz header, e.g. "7, 8 • × ÷".
    pub fn operand_label(&self) -> String {
        if self.squares_only() {
            return "Squares".to_string();
        }
        format!(
            "{} • {}",
            self.numbers.iter().join(", "),
            self.operations.iter().map(|k| k.symbol()).join(" ")
        )
    }

    pub fn to_config(&self) -> SessionConfig {
        SessionConfig::new(
            self.duration.secs(),
            self.numbers.iter().copied(),
            self.operations.iter().copied(),
        )
    }
}

impl From<&Config> for PracticeSetup {
    fn from(cfg: &Config) -> Self {
        let mut setup = PracticeSetup::default();

        match DurationPreset::from_secs(cfg.duration_secs) {
            Some(preset) => setup.duration = preset,
            None => warn!(
                "ignoring session length {}s, not one of the presets",
                cfg.duration_secs
            ),
        }

        for &n in &cfg.numbers {
            if OPERAND_RANGE.contains(&n) {
                setup.numbers.insert(n);
            } else {
                warn!("ignoring number {n} outside {OPERAND_RANGE:?}");
            }
        }

        if !cfg.operations.is_empty() {
            setup.operations = cfg.operations.iter().copied().collect();
        }
        setup
    }
}
