// Sequence runner: ordered steps with forced cleanup on failure
use super::error::{KeyResult, SequenceError};
use super::guarded::KeyController;
use super::types::{KeyDriver, KeyId, Step};
use log::{debug, info, warn};

pub struct SequenceRunner<D: KeyDriver> {
    keys: KeyController<D>,
}

impl<D: KeyDriver> SequenceRunner<D> {
    pub fn new(keys: KeyController<D>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &KeyController<D> {
        &self.keys
    }

    pub fn held_keys(&self) -> Vec<KeyId> {
        self.keys.tracker().held_keys()
    }

    /// Run `steps` strictly in order.
    ///
    /// On the first failure the remaining steps are skipped, every key still
    /// tracked as held is force-released, and the failure is returned wrapped
    /// in a [`SequenceError`]. The tracker is empty whenever this returns.
    pub async fn execute(&mut self, steps: &[Step]) -> Result<(), SequenceError> {
        debug!("🎮 Executing key sequence of {} steps", steps.len());
        for (index, step) in steps.iter().enumerate() {
            if let Err(cause) = self.run_step(step).await {
                warn!("Key sequence failed at step {index}: {cause}");
                self.release_all().await;
                return Err(SequenceError { step: index, cause });
            }
        }
        Ok(())
    }

    async fn run_step(&mut self, step: &Step) -> KeyResult<()> {
        let hold = self.keys.timing().hold_duration;
        let settle = self.keys.timing().post_release_delay;
        match step {
            Step::Tap(key) => {
                self.keys.run(key, hold).await?;
                self.keys.delay(settle).await
            }
            Step::HoldAcross { key, steps } => {
                let held = self.keys.acquire(key).await?;
                let mut outcome = self.keys.delay(hold).await;
                if outcome.is_ok() {
                    for inner in steps {
                        outcome = Box::pin(self.run_step(inner)).await;
                        if outcome.is_err() {
                            break;
                        }
                    }
                }
                self.keys.release(held).await;
                outcome?;
                self.keys.delay(settle).await
            }
            Step::Wait(duration) => self.keys.delay(*duration).await,
        }
    }

    /// Forced cleanup pass: release every key the tracker still holds, newest
    /// first, swallowing driver errors. Every tracked key is forgotten either
    /// way; the return value counts only releases the driver confirmed.
    pub async fn release_all(&mut self) -> usize {
        let held = self.keys.tracker().held_keys();
        if held.is_empty() {
            return 0;
        }
        info!("🧹 Force-releasing {} held key(s): {:?}", held.len(), held);
        let mut confirmed = 0;
        for key in held.iter().rev() {
            if self.keys.release_key(key).await {
                confirmed += 1;
            }
        }
        confirmed
    }
}
