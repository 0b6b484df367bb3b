use thiserror::Error;

/// Everything the drill engines can refuse to do.
///
/// All of these are local and recoverable: the engine that raised one has
/// left its state exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrillError {
    /// The chosen operations and operands leave no problem to generate.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The submitted text is not a whole number.
    #[error("not a whole number: {0:?}")]
    InvalidInput(String),

    /// An intent arrived in a phase that does not accept it.
    #[error("cannot {operation} while {phase}")]
    UnexpectedPhase {
        operation: &'static str,
        phase: String,
    },

    #[error("no lesson with id {0:?}")]
    UnknownLesson(String),

    #[error("lesson catalog is corrupt: {0}")]
    Catalog(String),
}

pub type Result<T> = std::result::Result<T, DrillError>;

/// Parses a typed answer. Surrounding whitespace is ignored, anything else
/// that is not an integer is rejected rather than coerced.
pub fn parse_answer(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| DrillError::InvalidInput(raw.to_string()))
}
