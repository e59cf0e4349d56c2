use super::dry_run::DryRunDriver;
use super::error::DriverError;
use super::shell::XdotoolDriver;
use super::types::{KeyDriver, KeyId};

pub enum KeyBackend {
    Xdotool(XdotoolDriver),
    DryRun(DryRunDriver),
}

impl KeyBackend {
    pub fn connect(dry_run: bool) -> Result<Self, String> {
        if dry_run {
            Ok(KeyBackend::DryRun(DryRunDriver::new()))
        } else {
            Ok(KeyBackend::Xdotool(XdotoolDriver::new()?))
        }
    }
}

impl KeyDriver for KeyBackend {
    async fn press(&self, key: &KeyId) -> Result<(), DriverError> {
        match self {
            KeyBackend::Xdotool(x) => x.press(key).await,
            KeyBackend::DryRun(d) => d.press(key).await,
        }
    }

    async fn release(&self, key: &KeyId) -> Result<(), DriverError> {
        match self {
            KeyBackend::Xdotool(x) => x.release(key).await,
            KeyBackend::DryRun(d) => d.release(key).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            KeyBackend::Xdotool(x) => x.name(),
            KeyBackend::DryRun(d) => d.name(),
        }
    }
}
