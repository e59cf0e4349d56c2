pub mod args;
pub mod config;
pub mod game_automation;
pub mod keys;

pub use game_automation::Automation;
pub use keys::KeyBackend;
