// Held-key bookkeeping
use super::error::{KeyError, KeyResult};
use super::types::KeyId;

/// The set of keys this session believes are currently held down.
///
/// Keys are kept in press order so cleanup can release the newest first.
#[derive(Debug, Default)]
pub struct KeyStateTracker {
    held: Vec<KeyId>,
}

impl KeyStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` as held. Fails without touching state if it already is.
    pub fn mark_pressed(&mut self, key: &KeyId) -> KeyResult<()> {
        if self.is_held(key) {
            return Err(KeyError::DuplicateKey { key: key.clone() });
        }
        self.held.push(key.clone());
        Ok(())
    }

    /// Forget `key`. Releasing a key that is not held is not an error.
    pub fn mark_released(&mut self, key: &KeyId) {
        self.held.retain(|k| k != key);
    }

    pub fn held_keys(&self) -> Vec<KeyId> {
        self.held.clone()
    }

    pub fn is_held(&self, key: &KeyId) -> bool {
        self.held.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }
}
