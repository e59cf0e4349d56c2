// Guarded key actions: every successful press is paired with a release
use super::error::{KeyError, KeyResult};
use super::tracker::KeyStateTracker;
use super::types::{KeyDriver, KeyId, Timing};
use log::{debug, error, warn};
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

/// Proof that a key was pressed and is still owed a release.
///
/// Hand it back to [`KeyController::release`]. Dropping it instead leaves the
/// key in the tracker for the forced cleanup pass.
#[must_use = "a held key must be handed back to KeyController::release"]
#[derive(Debug)]
pub struct HeldKey {
    key: KeyId,
    released: bool,
}

impl Drop for HeldKey {
    fn drop(&mut self) {
        if !self.released {
            warn!(
                "⚠️ Guard for key '{}' dropped without release, leaving it to forced cleanup",
                self.key
            );
        }
    }
}

/// Drives a [`KeyDriver`] while keeping the [`KeyStateTracker`] in step with it.
pub struct KeyController<D: KeyDriver> {
    driver: D,
    tracker: KeyStateTracker,
    timing: Timing,
    cancel: CancellationToken,
}

impl<D: KeyDriver> KeyController<D> {
    pub fn new(driver: D, timing: Timing) -> Self {
        Self {
            driver,
            tracker: KeyStateTracker::new(),
            timing,
            cancel: CancellationToken::new(),
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn tracker(&self) -> &KeyStateTracker {
        &self.tracker
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Wait for `duration`, returning early with `Cancelled` on a stop request.
    ///
    /// A zero duration still checks for cancellation.
    pub async fn delay(&self, duration: Duration) -> KeyResult<()> {
        if self.cancel.is_cancelled() {
            return Err(KeyError::Cancelled);
        }
        if duration.is_zero() {
            return Ok(());
        }
        tokio::select! {
            _ = self.cancel.cancelled() => Err(KeyError::Cancelled),
            _ = sleep(duration) => Ok(()),
        }
    }

    /// Press `key` and record it as held.
    pub async fn acquire(&mut self, key: &KeyId) -> KeyResult<HeldKey> {
        if self.tracker.is_held(key) {
            return Err(KeyError::DuplicateKey { key: key.clone() });
        }
        self.driver.press(key).await?;
        self.tracker.mark_pressed(key)?;
        debug!("⬇️ {} pressed '{}'", self.driver.name(), key);
        Ok(HeldKey {
            key: key.clone(),
            released: false,
        })
    }

    /// Release a key obtained from [`acquire`](Self::acquire). Never fails;
    /// returns whether the driver confirmed the release.
    pub async fn release(&mut self, mut held: HeldKey) -> bool {
        held.released = true;
        self.release_key(&held.key).await
    }

    /// Best-effort release with bounded retries. The key is forgotten by the
    /// tracker whether or not the driver succeeded.
    pub async fn release_key(&mut self, key: &KeyId) -> bool {
        let attempts = self.timing.release_attempts.max(1);
        let mut confirmed = false;
        for attempt in 1..=attempts {
            match self.driver.release(key).await {
                Ok(()) => {
                    confirmed = true;
                    break;
                }
                Err(e) => warn!("Release attempt {attempt}/{attempts} failed: {e}"),
            }
        }
        if confirmed {
            debug!("⬆️ {} released '{}'", self.driver.name(), key);
        } else {
            error!("❌ Giving up on releasing key '{key}' after {attempts} attempts");
        }
        self.tracker.mark_released(key);
        confirmed
    }

    /// Press, hold for `hold_duration`, release. The release happens on every
    /// exit path and the hold's outcome is returned afterwards.
    pub async fn run(&mut self, key: &KeyId, hold_duration: Duration) -> KeyResult<()> {
        let held = self.acquire(key).await?;
        let outcome = self.delay(hold_duration).await;
        self.release(held).await;
        outcome
    }
}
