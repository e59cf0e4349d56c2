use super::types::KeyId;
use std::fmt;
use thiserror::Error;

/// A specialized `Result` type for key operations.
pub type KeyResult<T> = Result<T, KeyError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAction::Press => f.write_str("press"),
            KeyAction::Release => f.write_str("release"),
        }
    }
}

/// The OS-level input call failed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Failed to {action} key '{key}': {description}")]
pub struct DriverError {
    pub key: KeyId,
    pub action: KeyAction,
    pub description: String,
}

impl DriverError {
    pub fn new(key: &KeyId, action: KeyAction, description: impl Into<String>) -> Self {
        Self {
            key: key.clone(),
            action,
            description: description.into(),
        }
    }
}

/// The error type for a single key action.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Key '{key}' is already held; a key must be released before it is pressed again")]
    DuplicateKey { key: KeyId },

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("Key sequence cancelled by stop request")]
    Cancelled,
}

/// A sequence stopped early. Forced cleanup has already run when this is returned.
#[derive(Debug, Error)]
#[error("Key sequence aborted at step {step}: {cause}")]
pub struct SequenceError {
    /// Index of the top-level step that failed.
    pub step: usize,
    #[source]
    pub cause: KeyError,
}

impl SequenceError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self.cause, KeyError::Cancelled)
    }

    pub fn driver_error(&self) -> Option<&DriverError> {
        match &self.cause {
            KeyError::Driver(e) => Some(e),
            _ => None,
        }
    }
}
