use super::error::{DriverError, KeyAction};
use super::types::{KeyDriver, KeyId};
use tokio::process::Command;

/// Sends key events through the `xdotool` command-line tool (X11).
pub struct XdotoolDriver {
    program: String,
}

impl XdotoolDriver {
    fn ensure_xdotool_available(program: &str) -> Result<(), String> {
        match std::process::Command::new(program).arg("version").output() {
            Ok(out) => {
                if !out.status.success() {
                    return Err(format!(
                        "'{program}' found but returned non-zero ({}). Check the X display, or restart with --dry-run.",
                        out.status
                    ));
                }
                Ok(())
            }
            Err(e) => {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Err(format!("'{program}' binary not found in PATH. Install xdotool or run with --dry-run."))
                } else {
                    Err(format!("Failed to invoke '{program}': {e}. Verify installation or run with --dry-run."))
                }
            }
        }
    }

    pub fn new() -> Result<Self, String> {
        Self::with_program("xdotool")
    }

    pub fn with_program(program: &str) -> Result<Self, String> {
        Self::ensure_xdotool_available(program)?;
        Ok(Self {
            program: program.to_string(),
        })
    }

    /// Map a key name to the X keysym xdotool expects.
    pub fn keysym(key: &KeyId) -> String {
        let name = key.as_str();
        let sym = match name {
            "space" => "space",
            "enter" => "Return",
            "tab" => "Tab",
            "escape" => "Escape",
            "backspace" => "BackSpace",
            "delete" => "Delete",
            "insert" => "Insert",
            "home" => "Home",
            "end" => "End",
            "page_up" => "Prior",
            "page_down" => "Next",
            "up_arrow" => "Up",
            "down_arrow" => "Down",
            "left_arrow" => "Left",
            "right_arrow" => "Right",
            "shift" => "Shift_L",
            "ctrl" => "Control_L",
            "alt" => "Alt_L",
            "caps_lock" => "Caps_Lock",
            "num_lock" => "Num_Lock",
            _ => {
                if let Some(n) = name.strip_prefix('f')
                    && n.parse::<u8>().is_ok_and(|n| (1..=12).contains(&n))
                {
                    return name.to_uppercase();
                }
                name
            }
        };
        sym.to_string()
    }

    async fn send(&self, subcommand: &str, key: &KeyId, action: KeyAction) -> Result<(), DriverError> {
        let output = Command::new(&self.program)
            .arg(subcommand)
            .arg(Self::keysym(key))
            .output()
            .await
            .map_err(|e| DriverError::new(key, action, format!("failed to run {} {subcommand}: {e}", self.program)))?;
        if !output.status.success() {
            return Err(DriverError::new(
                key,
                action,
                format!(
                    "{} {subcommand} failed: {}",
                    self.program,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }
        Ok(())
    }
}

impl KeyDriver for XdotoolDriver {
    async fn press(&self, key: &KeyId) -> Result<(), DriverError> {
        self.send("keydown", key, KeyAction::Press).await
    }

    async fn release(&self, key: &KeyId) -> Result<(), DriverError> {
        self.send("keyup", key, KeyAction::Release).await
    }

    fn name(&self) -> &str {
        "xdotool"
    }
}
