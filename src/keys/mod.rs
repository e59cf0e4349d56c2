// Key module - simulated keyboard input with guaranteed release
// This module owns the held-key bookkeeping and the drivers that talk to the
// host OS. Nothing here knows about the game; it only moves keys up and down.

pub mod backend;
pub mod dry_run;
pub mod error;
pub mod guarded;
pub mod runner;
pub mod shell;
pub mod tracker;
pub mod types;


// Re-export the main types and functions for easy access
pub use backend::KeyBackend;
pub use dry_run::{DryRunDriver, KeyEvent};
pub use error::{DriverError, KeyAction, KeyError, KeyResult, SequenceError};
pub use guarded::{HeldKey, KeyController};
pub use runner::SequenceRunner;
pub use shell::XdotoolDriver;
pub use tracker::KeyStateTracker;
pub use types::{KeyDriver, KeyId, Step, Timing};
