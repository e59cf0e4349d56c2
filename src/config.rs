//! Persistent options (`options.json`)
//!
//! Missing files are created with defaults and corrupt files are moved aside
//! to `<name>.backup` before defaults are written. Writes go through a temp
//! file and a rename so a crash never leaves a half-written file behind.

use crate::game_automation::{ActionMap, Control, ControlMap, default_routines};
use crate::keys::Timing;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const OPTIONS_VERSION: u32 = 1;
const OPTIONS_FILE: &str = "options.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access options file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Options file {path:?} is not valid: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Option '{field}' must be a non-negative number of seconds, got {value}")]
    InvalidTiming { field: &'static str, value: f64 },

    #[error("Control {control:?} has no key bound")]
    EmptyBinding { control: Control },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutomationOptions {
    pub auto_start_game: bool,
    /// Seconds between press and release.
    #[serde(alias = "inputDelay")]
    pub hold_duration: f64,
    /// Seconds after a release before the next input.
    #[serde(alias = "releaseDelay")]
    pub post_release_delay: f64,
    pub release_attempts: u32,
    /// Seconds paused by the `w` instruction.
    pub wait_duration: f64,
}

impl Default for AutomationOptions {
    fn default() -> Self {
        Self {
            auto_start_game: false,
            hold_duration: 0.05,
            post_release_delay: 0.05,
            release_attempts: 3,
            wait_duration: 0.5,
        }
    }
}

fn seconds(field: &'static str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidTiming { field, value })
}

impl AutomationOptions {
    pub fn timing(&self) -> Result<Timing, ConfigError> {
        Ok(Timing {
            hold_duration: seconds("holdDuration", self.hold_duration)?,
            post_release_delay: seconds("postReleaseDelay", self.post_release_delay)?,
            release_attempts: self.release_attempts.max(1),
        })
    }

    pub fn wait(&self) -> Result<Duration, ConfigError> {
        seconds("waitDuration", self.wait_duration)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub version: u32,
    pub automation: AutomationOptions,
    pub controls: ControlMap,
    /// User routines, merged over the built-in ones.
    pub routines: ActionMap,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            version: OPTIONS_VERSION,
            automation: AutomationOptions::default(),
            controls: ControlMap::default(),
            routines: ActionMap::new(),
        }
    }
}

impl Options {
    /// `<home>/.autoteam/options.json`, or `./options.json` without a home directory.
    pub fn default_path() -> PathBuf {
        homedir::my_home()
            .ok()
            .flatten()
            .map(|home| home.join(".autoteam").join(OPTIONS_FILE))
            .unwrap_or_else(|| PathBuf::from(OPTIONS_FILE))
    }

    /// Built-in routines plus the ones from this file.
    pub fn routine_names(&self) -> Vec<String> {
        let mut routines = default_routines();
        routines.extend(self.routines.clone());
        routines.into_keys().collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.automation.timing()?;
        self.automation.wait()?;
        if let Some(control) = self.controls.unbound() {
            return Err(ConfigError::EmptyBinding { control });
        }
        Ok(())
    }

    /// Parse options text. Files with none of the sectioned keys use the old
    /// flat layout.
    pub fn from_json(path: &Path, text: &str) -> Result<Self, ConfigError> {
        Self::parse(path, text).map(|(options, _)| options)
    }

    // Second value is true when the text was in the old flat layout.
    fn parse(path: &Path, text: &str) -> Result<(Self, bool), ConfigError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let sectioned = ["version", "automation", "controls", "routines"]
            .iter()
            .any(|key| value.get(key).is_some());
        if !sectioned {
            return Ok((Self::from_legacy(&value), true));
        }
        let options: Options =
            serde_json::from_value(value).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        options.validate()?;
        Ok((options, false))
    }

    fn from_legacy(value: &serde_json::Value) -> Self {
        let mut options = Options::default();
        if let Some(auto_start) = value.get("AutoStartGame").and_then(|v| v.as_bool()) {
            options.automation.auto_start_game = auto_start;
        }
        options
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json(path, &read(path)?)
    }

    /// Load `path`, creating it with defaults when missing and replacing it
    /// (after a backup) when it cannot be parsed. A file in the old flat
    /// layout is rewritten in the current one.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let options = Options::default();
            options.save(path)?;
            info!("📝 Created new options file: {}", path.display());
            return Ok(options);
        }
        match Self::parse(path, &read(path)?) {
            Ok((options, true)) => {
                options.save(path)?;
                info!("📝 Migrated legacy options file: {}", path.display());
                Ok(options)
            }
            Ok((options, false)) => {
                if options.version != OPTIONS_VERSION {
                    warn!(
                        "Options file version {} differs from {OPTIONS_VERSION}",
                        options.version
                    );
                }
                Ok(options)
            }
            Err(ConfigError::Parse { source, .. }) => {
                warn!("⚠️ Options file {} is corrupt ({source}), using defaults", path.display());
                let backup = backup_path(path);
                if let Err(e) = std::fs::rename(path, &backup) {
                    warn!("Could not back up {}: {e}", path.display());
                } else {
                    info!("Backed up corrupt options to {}", backup.display());
                }
                let options = Options::default();
                options.save(path)?;
                Ok(options)
            }
            Err(e) => Err(e),
        }
    }

    /// Write atomically: temp file in the same directory, then rename.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, text).map_err(io_err)?;
        if let Err(source) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(source));
        }
        Ok(())
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_automation::ActionStep;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_timing() {
        let timing = Options::default().automation.timing().unwrap();
        assert_eq!(timing.hold_duration, Duration::from_millis(50));
        assert_eq!(timing.post_release_delay, Duration::from_millis(50));
        assert_eq!(timing.release_attempts, 3);
        assert_eq!(timing, Timing::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let text = r#"{"version": 1, "automation": {"holdDuration": 0.1}, "controls": {"a_button": "space"}}"#;
        let options = Options::from_json(Path::new("options.json"), text).unwrap();

        assert_eq!(options.automation.hold_duration, 0.1);
        assert_eq!(options.automation.post_release_delay, 0.05);
        assert_eq!(options.controls.a_button.as_str(), "space");
        assert_eq!(options.controls.b_button.as_str(), "l");
    }

    #[test]
    fn test_legacy_delay_names_accepted() {
        let text = r#"{"version": 1, "automation": {"inputDelay": 0.02, "releaseDelay": 0.03}}"#;
        let options = Options::from_json(Path::new("options.json"), text).unwrap();

        assert_eq!(options.automation.hold_duration, 0.02);
        assert_eq!(options.automation.post_release_delay, 0.03);
    }

    #[test]
    fn test_flat_legacy_file_migrated() {
        let text = r#"{"MiiDBPath": "", "AutoStartGame": true}"#;
        let options = Options::from_json(Path::new("options.json"), text).unwrap();

        assert!(options.automation.auto_start_game);
        assert_eq!(options.version, OPTIONS_VERSION);
    }

    #[test]
    fn test_negative_timing_rejected() {
        let text = r#"{"version": 1, "automation": {"postReleaseDelay": -0.5}}"#;
        let err = Options::from_json(Path::new("options.json"), text).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidTiming {
                field: "postReleaseDelay",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_timing_allowed() {
        let text = r#"{"version": 1, "automation": {"holdDuration": 0, "postReleaseDelay": 0}}"#;
        let options = Options::from_json(Path::new("options.json"), text).unwrap();
        assert_eq!(options.automation.timing().unwrap().hold_duration, Duration::ZERO);
    }

    #[test]
    fn test_routines_parsed() {
        let text = r#"{"version": 1, "routines": {"confirm": [{"tap": "a_button"}]}}"#;
        let options = Options::from_json(Path::new("options.json"), text).unwrap();
        assert_eq!(
            options.routines["confirm"],
            vec![ActionStep::Tap(Control::A)]
        );
    }

    #[test]
    fn test_missing_file_created_with_defaults() {
        let dir = tempdir().expect("failed to create temp directory");
        let path = dir.path().join("nested").join("options.json");

        let options = Options::load_or_create(&path).unwrap();

        assert_eq!(options, Options::default());
        assert!(path.exists());
        assert_eq!(Options::load(&path).unwrap(), Options::default());
    }

    #[test]
    fn test_corrupt_file_backed_up() {
        let dir = tempdir().expect("failed to create temp directory");
        let path = dir.path().join("options.json");
        fs::write(&path, "{ not json").unwrap();

        let options = Options::load_or_create(&path).unwrap();

        assert_eq!(options, Options::default());
        let backup = dir.path().join("options.json.backup");
        assert_eq!(fs::read_to_string(backup).unwrap(), "{ not json");
        assert!(Options::load(&path).is_ok());
    }

    #[test]
    fn test_legacy_file_rewritten_on_load() {
        let dir = tempdir().expect("failed to create temp directory");
        let path = dir.path().join("options.json");
        fs::write(&path, r#"{"MiiDBPath": "", "AutoStartGame": true}"#).unwrap();

        let options = Options::load_or_create(&path).unwrap();

        assert!(options.automation.auto_start_game);
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"version\""));
        assert!(!text.contains("AutoStartGame"));
        assert_eq!(Options::load(&path).unwrap(), options);
    }

    #[test]
    fn test_empty_binding_rejected() {
        let text = r#"{"version": 1, "controls": {"a_button": ""}}"#;
        let err = Options::from_json(Path::new("options.json"), text).unwrap_err();

        assert!(matches!(err, ConfigError::EmptyBinding { control: Control::A }));
    }

    #[test]
    fn test_routine_names_merge_builtins() {
        let text = r#"{"version": 1, "routines": {"confirm": [{"tap": "a_button"}]}}"#;
        let options = Options::from_json(Path::new("options.json"), text).unwrap();

        let names = options.routine_names();
        assert!(names.contains(&"confirm".to_string()));
        assert!(names.contains(&"start_game".to_string()));
    }

    #[test]
    fn test_save_round_trips_custom_controls() {
        let dir = tempdir().expect("failed to create temp directory");
        let path = dir.path().join("options.json");
        let mut options = Options::default();
        options.controls.minus_button = "shift".into();
        options.automation.auto_start_game = true;

        options.save(&path).unwrap();

        assert_eq!(Options::load(&path).unwrap(), options);
        assert!(!dir.path().join("options.json.tmp").exists());
    }
}
