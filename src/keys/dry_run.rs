// Dry-run driver: logs and records key events without touching the OS
use super::error::{DriverError, KeyAction};
use super::types::{KeyDriver, KeyId};
use log::info;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub action: KeyAction,
    pub key: KeyId,
}

impl KeyEvent {
    pub fn press(key: &str) -> Self {
        Self {
            action: KeyAction::Press,
            key: KeyId::new(key),
        }
    }

    pub fn release(key: &str) -> Self {
        Self {
            action: KeyAction::Release,
            key: KeyId::new(key),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DryRunDriver {
    journal: Arc<Mutex<Vec<KeyEvent>>>,
}

impl DryRunDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<KeyEvent> {
        self.journal.lock().map(|j| j.clone()).unwrap_or_default()
    }

    fn record(&self, action: KeyAction, key: &KeyId) {
        info!("🧪 [dry-run] {action} {key}");
        if let Ok(mut journal) = self.journal.lock() {
            journal.push(KeyEvent {
                action,
                key: key.clone(),
            });
        }
    }
}

impl KeyDriver for DryRunDriver {
    async fn press(&self, key: &KeyId) -> Result<(), DriverError> {
        self.record(KeyAction::Press, key);
        Ok(())
    }

    async fn release(&self, key: &KeyId) -> Result<(), DriverError> {
        self.record(KeyAction::Release, key);
        Ok(())
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}
