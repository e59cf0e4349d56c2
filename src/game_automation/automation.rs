// Automation facade: named game routines on top of the sequence runner
use super::actions::{ActionMap, START_GAME, default_routines, resolve_routine};
use super::error::{AutomationError, AutomationResult};
use super::formation::{Formation, Lineup};
use super::instructions::parse_instructions;
use super::mii::MiiSelection;
use super::types::ControlMap;
use crate::config::{ConfigError, Options};
use crate::keys::{KeyController, KeyDriver, KeyId, SequenceRunner, Step, Timing};
use log::{info, warn};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Menu moves around the two lineup walks, from the team select screen.
const ENTER_AWAY_LINEUP: &str = "wwulur";
const AWAY_TO_HOME_LINEUP: &str = "druldr";
const CONFIRM_LINEUPS: &str = "uruaw";

const DEFAULT_WAIT: Duration = Duration::from_millis(500);

pub struct Automation<D: KeyDriver> {
    runner: SequenceRunner<D>,
    controls: ControlMap,
    routines: ActionMap,
    wait: Duration,
    auto_start_game: bool,
}

impl<D: KeyDriver> Automation<D> {
    pub fn new(driver: D, timing: Timing, controls: ControlMap) -> Self {
        Self {
            runner: SequenceRunner::new(KeyController::new(driver, timing)),
            controls,
            routines: default_routines(),
            wait: DEFAULT_WAIT,
            auto_start_game: false,
        }
    }

    pub fn from_options(driver: D, options: &Options) -> Result<Self, ConfigError> {
        let automation = Self::new(driver, options.automation.timing()?, options.controls.clone())
            .with_routines(options.routines.clone())
            .with_wait(options.automation.wait()?)
            .with_auto_start(options.automation.auto_start_game);
        Ok(automation)
    }

    /// Add routines, replacing built-ins with the same name.
    pub fn with_routines(mut self, routines: ActionMap) -> Self {
        self.routines.extend(routines);
        self
    }

    /// Duration of the `w` instruction.
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    pub fn with_auto_start(mut self, enabled: bool) -> Self {
        self.auto_start_game = enabled;
        self
    }

    /// Token that stops the running routine at its next delay boundary.
    pub fn stop_handle(&self) -> CancellationToken {
        self.runner.keys().cancel_token()
    }

    pub fn driver(&self) -> &D {
        self.runner.keys().driver()
    }

    /// Diagnostics only.
    pub fn held_keys(&self) -> Vec<KeyId> {
        self.runner.held_keys()
    }

    pub async fn start_game(&mut self) -> AutomationResult<()> {
        self.run_routine(START_GAME).await
    }

    pub async fn run_routine(&mut self, name: &str) -> AutomationResult<()> {
        let entries = self
            .routines
            .get(name)
            .ok_or_else(|| AutomationError::UnknownRoutine {
                name: name.to_string(),
            })?;
        let steps = resolve_routine(name, entries, &self.controls, self.wait)?;
        self.execute(name, steps).await
    }

    pub async fn run_instructions(&mut self, text: &str) -> AutomationResult<()> {
        let steps = self.instruction_block(text)?;
        self.execute("instructions", steps).await
    }

    pub async fn apply_lineup(&mut self, lineup: &Lineup) -> AutomationResult<()> {
        let steps = self.instruction_block(&lineup.walk())?;
        self.execute("lineup", steps).await
    }

    /// Pick each team's Miis on the character select screen.
    pub async fn select_miis(&mut self, selection: &MiiSelection) -> AutomationResult<()> {
        let steps = self.instruction_block(&selection.walk())?;
        self.execute("mii selection", steps).await
    }

    /// Pick Miis when the formation has any, walk both lineup screens, then
    /// start the game if auto-start is on.
    pub async fn apply_formation(&mut self, formation: &Formation) -> AutomationResult<()> {
        let mut steps = match &formation.miis {
            Some(selection) => self.instruction_block(&selection.walk())?,
            None => Vec::new(),
        };
        steps.extend(self.instruction_block(ENTER_AWAY_LINEUP)?);
        steps.extend(self.instruction_block(&formation.away.walk())?);
        steps.extend(self.instruction_block(AWAY_TO_HOME_LINEUP)?);
        steps.extend(self.instruction_block(&formation.home.walk())?);
        steps.extend(self.instruction_block(CONFIRM_LINEUPS)?);
        self.execute("formation", steps).await?;

        if self.auto_start_game {
            self.start_game().await?;
        }
        Ok(())
    }

    /// Force-release every key still tracked as held. Safe to call at any
    /// time; does nothing when no key is held. Returns the number of
    /// releases the driver confirmed.
    pub async fn release_all(&mut self) -> usize {
        self.runner.release_all().await
    }

    // Instruction strings end with one extra hold-length pause so the game
    // settles before the next block.
    fn instruction_block(&self, text: &str) -> AutomationResult<Vec<Step>> {
        let mut steps = parse_instructions(text, &self.controls, self.wait)?;
        if !steps.is_empty() {
            steps.push(Step::Wait(self.runner.keys().timing().hold_duration));
        }
        Ok(steps)
    }

    async fn execute(&mut self, routine: &str, steps: Vec<Step>) -> AutomationResult<()> {
        let leftover = self.runner.held_keys().len();
        if leftover > 0 {
            warn!("Releasing {leftover} key(s) left over from an earlier routine");
            self.runner.release_all().await;
        }
        info!("🎮 Running '{routine}' ({} steps)", steps.len());
        self.runner.execute(&steps).await?;
        info!("✅ '{routine}' finished");
        Ok(())
    }
}
