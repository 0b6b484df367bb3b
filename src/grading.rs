use crate::quiz::Attempt;
use itertools::Itertools;

/// How many entries the fastest / slowest lists hold.
pub const HIGHLIGHT_COUNT: usize = 3;

pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

/// Rounded share of correct answers; 0 for an empty history.
pub fn accuracy_percent(history: &[Attempt]) -> u32 {
    let total = history.len().max(1);
    let correct = history.iter().filter(|a| a.is_correct).count();
    (100.0 * correct as f64 / total as f64).round() as u32
}

/// Mean response time, `None` when nothing was answered.
pub fn average_elapsed(history: &[Attempt]) -> Option<f64> {
    let times: Vec<f64> = history.iter().map(|a| a.elapsed_secs).collect();
    mean(&times)
}

/// Quickest `k` answers; equal times keep their history order.
pub fn fastest(history: &[Attempt], k: usize) -> Vec<&Attempt> {
    history
        .iter()
        .sorted_by(|a, b| a.elapsed_secs.total_cmp(&b.elapsed_secs))
        .take(k)
        .collect()
}

/// Slowest `k` answers; equal times keep their history order.
pub fn slowest(history: &[Attempt], k: usize) -> Vec<&Attempt> {
    history
        .iter()
        .sorted_by(|a, b| b.elapsed_secs.total_cmp(&a.elapsed_secs))
        .take(k)
        .collect()
}

/// Bonus or penalty for the average answer time.
pub fn speed_modifier(average_secs: f64) -> i32 {
    if average_secs < 3.0 {
        10
    } else if average_secs < 5.0 {
        5
    } else if average_secs < 8.0 {
        0
    } else if average_secs < 12.0 {
        -5
    } else {
        -10
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeTier {
    Excellent,
    Good,
    Fair,
    Weak,
    Failing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Grade {
    #[strum(serialize = "A+")]
    APlus,
    #[strum(serialize = "A")]
    A,
    #[strum(serialize = "A-")]
    AMinus,
    #[strum(serialize = "B+")]
    BPlus,
    #[strum(serialize = "B")]
    B,
    #[strum(serialize = "B-")]
    BMinus,
    #[strum(serialize = "C+")]
    CPlus,
    #[strum(serialize = "C")]
    C,
    #[strum(serialize = "C-")]
    CMinus,
    #[strum(serialize = "D+")]
    DPlus,
    #[strum(serialize = "D")]
    D,
    #[strum(serialize = "D-")]
    DMinus,
    #[strum(serialize = "F")]
    F,
}

/// Lowest final score that earns each grade, best first.
const THRESHOLDS: [(i32, Grade); 12] = [
    (97, Grade::APlus),
    (93, Grade::A),
    (90, Grade::AMinus),
    (87, Grade::BPlus),
    (83, Grade::B),
    (80, Grade::BMinus),
    (77, Grade::CPlus),
    (73, Grade::C),
    (70, Grade::CMinus),
    (67, Grade::DPlus),
    (63, Grade::D),
    (60, Grade::DMinus),
];

impl Grade {
    pub fn from_score(final_score: i32) -> Self {
        THRESHOLDS
            .iter()
            .find(|(min, _)| final_score >= *min)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn label(&self) -> String {
        self.to_string()
    }

    pub fn tier(&self) -> GradeTier {
        match self {
            Grade::APlus | Grade::A | Grade::AMinus => GradeTier::Excellent,
            Grade::BPlus | Grade::B | Grade::BMinus => GradeTier::Good,
            Grade::CPlus | Grade::C | Grade::CMinus => GradeTier::Fair,
            Grade::DPlus | Grade::D | Grade::DMinus => GradeTier::Weak,
            Grade::F => GradeTier::Failing,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Grade::APlus => "🌟",
            Grade::A | Grade::AMinus => "⭐",
            Grade::BPlus | Grade::B | Grade::BMinus => "👍",
            Grade::CPlus | Grade::C | Grade::CMinus => "📚",
            Grade::DPlus | Grade::D | Grade::DMinus => "💪",
            Grade::F => "🔄",
        }
    }
}

/// Letter grade from accuracy and speed.
///
/// A perfect run averaging under five seconds is always an A+; otherwise the
/// speed modifier is added to the accuracy, clamped to 0..=100 and looked up
/// in the threshold table.
pub fn grade(accuracy_percent: u32, average_secs: f64) -> Grade {
    if accuracy_percent == 100 && average_secs < 5.0 {
        return Grade::APlus;
    }
    let accuracy = i32::try_from(accuracy_percent).unwrap_or(i32::MAX);
    let final_score = accuracy
        .saturating_add(speed_modifier(average_secs))
        .clamp(0, 100);
    Grade::from_score(final_score)
}

/// Everything the results screen shows about a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSummary {
    pub correct: u32,
    pub total: u32,
    pub accuracy_percent: u32,
    pub average_secs: Option<f64>,
    pub grade: Option<Grade>,
    pub fastest: Vec<Attempt>,
    pub slowest: Vec<Attempt>,
}

impl QuizSummary {
    pub fn from_history(history: &[Attempt]) -> Self {
        let accuracy = accuracy_percent(history);
        let average_secs = average_elapsed(history);
        Self {
            correct: history.iter().filter(|a| a.is_correct).count() as u32,
            total: history.len() as u32,
            accuracy_percent: accuracy,
            average_secs,
            grade: average_secs.map(|avg| grade(accuracy, avg)),
            fastest: fastest(history, HIGHLIGHT_COUNT)
                .into_iter()
                .cloned()
                .collect(),
            slowest: slowest(history, HIGHLIGHT_COUNT)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// The fastest/slowest lists only say something once a few problems
    /// have been answered.
    pub fn show_highlights(&self) -> bool {
        self.total as usize >= HIGHLIGHT_COUNT
    }

    pub fn grade_label(&self) -> String {
        self.grade
            .map(|g| g.label())
            .unwrap_or_else(|| "-".to_string())
    }
}
