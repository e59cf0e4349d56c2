// Game automation module
// This module turns game-level intents (start a match, pick Miis, arrange lineups) into
// key sequences and hands them to the key safety layer.

pub mod actions;
pub mod automation;
pub mod error;
pub mod formation;
pub mod instructions;
pub mod mii;
pub mod types;

// Re-export the main types and functions for easy access
pub use actions::{ActionMap, ActionStep, START_GAME, default_routines};
pub use automation::Automation;
pub use error::{AutomationError, AutomationResult};
pub use formation::{Formation, Lineup};
pub use instructions::parse_instructions;
pub use mii::MiiSelection;
pub use types::{Control, ControlMap};
