use crate::keys::SequenceError;
use thiserror::Error;

pub type AutomationResult<T> = Result<T, AutomationError>;

/// The error type for high-level automation routines.
#[derive(Debug, Error)]
pub enum AutomationError {
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error("Unknown routine '{name}'")]
    UnknownRoutine { name: String },

    #[error("Unknown instruction '{instruction}' at position {position} (expected one of u d l r a b w)")]
    UnknownInstruction { instruction: char, position: usize },

    #[error("Invalid lineup: {reason}")]
    InvalidLineup { reason: String },

    #[error("Invalid Mii selection: {reason}")]
    InvalidMiiSelection { reason: String },

    #[error("Invalid wait of {seconds}s in routine '{routine}'")]
    InvalidWait { routine: String, seconds: f64 },
}

impl AutomationError {
    /// True when the routine stopped because a stop was requested.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AutomationError::Sequence(e) if e.is_cancelled())
    }
}
