// Core key types and traits
use super::error::DriverError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Identifies one physical or virtual key by name (`"k"`, `"space"`, `"f1"`).
///
/// Names are trimmed and lower-cased so `"K"` and `"k"` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct KeyId(String);

impl KeyId {
    pub fn new(name: impl AsRef<str>) -> Self {
        KeyId(name.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyId {
    fn from(name: &str) -> Self {
        KeyId::new(name)
    }
}

impl From<String> for KeyId {
    fn from(name: String) -> Self {
        KeyId::new(name)
    }
}

impl From<KeyId> for String {
    fn from(key: KeyId) -> Self {
        key.0
    }
}

/// Hold and settle times applied to every key action.
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    /// Time between press and release.
    pub hold_duration: Duration,
    /// Time after a release before the next action may begin.
    pub post_release_delay: Duration,
    /// How many times a failing release is retried before giving up.
    pub release_attempts: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            hold_duration: Duration::from_millis(50),
            post_release_delay: Duration::from_millis(50),
            release_attempts: 3,
        }
    }
}

impl Timing {
    /// No delays at all. Useful for dry runs and tests.
    pub fn immediate() -> Self {
        Self {
            hold_duration: Duration::ZERO,
            post_release_delay: Duration::ZERO,
            release_attempts: 3,
        }
    }
}

/// One logical step of a key sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Press, hold for `hold_duration`, release.
    Tap(KeyId),
    /// Keep `key` pressed while the nested steps run.
    HoldAcross { key: KeyId, steps: Vec<Step> },
    /// Pause without touching any key.
    Wait(Duration),
}

impl Step {
    pub fn tap(key: impl Into<KeyId>) -> Self {
        Step::Tap(key.into())
    }

    pub fn hold(key: impl Into<KeyId>, steps: Vec<Step>) -> Self {
        Step::HoldAcross {
            key: key.into(),
            steps,
        }
    }
}

// Trait defining the OS-level key capability (xdotool or dry-run implementations)
#[allow(async_fn_in_trait)]
pub trait KeyDriver {
    async fn press(&self, key: &KeyId) -> Result<(), DriverError>;

    /// Releasing a key that is not down must be a harmless no-op.
    async fn release(&self, key: &KeyId) -> Result<(), DriverError>;

    fn name(&self) -> &str;
}
