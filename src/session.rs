use crate::error::{DrillError, Result};
use crate::problem::{OperationKind, OPERAND_RANGE};
use std::collections::BTreeSet;

/// Session lengths offered to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationPreset {
    HalfMinute,
    OneMinute,
    TwoMinutes,
    FiveMinutes,
    #[default]
    TenMinutes,
    FifteenMinutes,
    TwentyMinutes,
}

impl DurationPreset {
    pub const ALL: [DurationPreset; 7] = [
        DurationPreset::HalfMinute,
        DurationPreset::OneMinute,
        DurationPreset::TwoMinutes,
        DurationPreset::FiveMinutes,
        DurationPreset::TenMinutes,
        DurationPreset::FifteenMinutes,
        DurationPreset::TwentyMinutes,
    ];

    pub fn secs(&self) -> u32 {
        match self {
            DurationPreset::HalfMinute => 30,
            DurationPreset::OneMinute => 60,
            DurationPreset::TwoMinutes => 120,
            DurationPreset::FiveMinutes => 300,
            DurationPreset::TenMinutes => 600,
            DurationPreset::FifteenMinutes => 900,
            DurationPreset::TwentyMinutes => 1200,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DurationPreset::HalfMinute => "30 sec",
            DurationPreset::OneMinute => "1 min",
            DurationPreset::TwoMinutes => "2 min",
            DurationPreset::FiveMinutes => "5 min",
            DurationPreset::TenMinutes => "10 min",
            DurationPreset::FifteenMinutes => "15 min",
            DurationPreset::TwentyMinutes => "20 min",
        }
    }

    pub fn from_secs(secs: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.secs() == secs)
    }

    /// The next longer preset, wrapping around to the shortest.
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// What a quiz session practices and for how long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub duration_secs: u32,
    pub eligible_operands: BTreeSet<u32>,
    pub enabled_kinds: BTreeSet<OperationKind>,
}

impl SessionConfig {
    pub fn new(
        duration_secs: u32,
        operands: impl IntoIterator<Item = u32>,
        kinds: impl IntoIterator<Item = OperationKind>,
    ) -> Self {
        Self {
            duration_secs,
            eligible_operands: operands.into_iter().collect(),
            enabled_kinds: kinds.into_iter().collect(),
        }
    }

    pub fn squares_only(&self) -> bool {
        self.enabled_kinds.len() == 1 && self.enabled_kinds.contains(&OperationKind::Squares)
    }

    /// Checks that every enabled operation can produce a problem.
    pub fn validate(&self) -> Result<()> {
        if self.duration_secs == 0 {
            return Err(DrillError::InvalidConfiguration(
                "session length must be at least one second".to_string(),
            ));
        }
        if self.enabled_kinds.is_empty() {
            return Err(DrillError::InvalidConfiguration(
                "no operation selected".to_string(),
            ));
        }
        if let Some(bad) = self
            .eligible_operands
            .iter()
            .find(|n| !OPERAND_RANGE.contains(*n))
        {
            return Err(DrillError::InvalidConfiguration(format!(
                "{bad} is outside {}..={}",
                OPERAND_RANGE.start(),
                OPERAND_RANGE.end()
            )));
        }
        if self.eligible_operands.is_empty() && !self.squares_only() {
            return Err(DrillError::InvalidConfiguration(
                "select at least one number to practice".to_string(),
            ));
        }
        Ok(())
    }
}

/// `m:ss`, as shown on the countdown.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Human phrase for a session length: "30 second", "1 minute", "10 minutes".
pub fn describe_duration(secs: u32) -> String {
    match secs {
        s if s < 60 => format!("{s} second"),
        s if s / 60 == 1 => "1 minute".to_string(),
        s => format!("{} minutes", s / 60),
    }
}
