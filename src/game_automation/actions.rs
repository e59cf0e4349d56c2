// Named routines: static action-to-keys data resolved against the control map
use super::error::{AutomationError, AutomationResult};
use super::instructions::parse_instructions;
use super::types::{Control, ControlMap};
use crate::keys::Step;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

pub const START_GAME: &str = "start_game";

/// One entry of a routine as written in the options file.
///
/// ```json
/// [{"hold": {"control": "minus_button", "steps": [{"tap": "a_button"}]}},
///  {"wait": 0.5},
///  {"instructions": "uuadd"}]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStep {
    Tap(Control),
    Hold {
        control: Control,
        #[serde(default)]
        steps: Vec<ActionStep>,
    },
    /// Seconds.
    Wait(f64),
    Instructions(String),
}

pub type ActionMap = BTreeMap<String, Vec<ActionStep>>;

pub fn default_routines() -> ActionMap {
    let mut routines = ActionMap::new();
    routines.insert(
        START_GAME.to_string(),
        vec![ActionStep::Hold {
            control: Control::Minus,
            steps: vec![ActionStep::Tap(Control::A)],
        }],
    );
    routines.insert(
        "pause_menu".to_string(),
        vec![ActionStep::Tap(Control::Plus)],
    );
    routines
}

/// Turn a routine's entries into key steps.
pub fn resolve_routine(
    name: &str,
    entries: &[ActionStep],
    controls: &ControlMap,
    wait: Duration,
) -> AutomationResult<Vec<Step>> {
    let mut steps = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            ActionStep::Tap(control) => steps.push(Step::Tap(controls.key(*control).clone())),
            ActionStep::Hold {
                control,
                steps: inner,
            } => steps.push(Step::HoldAcross {
                key: controls.key(*control).clone(),
                steps: resolve_routine(name, inner, controls, wait)?,
            }),
            ActionStep::Wait(seconds) => {
                let duration = Duration::try_from_secs_f64(*seconds).map_err(|_| {
                    AutomationError::InvalidWait {
                        routine: name.to_string(),
                        seconds: *seconds,
                    }
                })?;
                steps.push(Step::Wait(duration));
            }
            ActionStep::Instructions(text) => {
                steps.extend(parse_instructions(text, controls, wait)?)
            }
        }
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_millis(500);

    #[test]
    fn test_default_start_game_holds_minus_over_a() {
        let routines = default_routines();
        let steps =
            resolve_routine(START_GAME, &routines[START_GAME], &ControlMap::default(), WAIT)
                .unwrap();
        assert_eq!(steps, vec![Step::hold("q", vec![Step::tap("k")])]);
    }

    #[test]
    fn test_routine_from_json() {
        let json = r#"{
            "menu_dance": [
                {"tap": "a_button"},
                {"hold": {"control": "minus", "steps": [{"instructions": "ud"}]}},
                {"wait": 0.25}
            ]
        }"#;
        let routines: ActionMap = serde_json::from_str(json).unwrap();
        let steps = resolve_routine(
            "menu_dance",
            &routines["menu_dance"],
            &ControlMap::default(),
            WAIT,
        )
        .unwrap();

        assert_eq!(
            steps,
            vec![
                Step::tap("k"),
                Step::hold("q", vec![Step::tap("w"), Step::tap("s")]),
                Step::Wait(Duration::from_millis(250)),
            ]
        );
    }

    #[test]
    fn test_negative_wait_rejected() {
        let entries = vec![ActionStep::Wait(-1.0)];
        let err = resolve_routine("broken", &entries, &ControlMap::default(), WAIT).unwrap_err();
        assert!(matches!(err, AutomationError::InvalidWait { ref routine, .. } if routine == "broken"));
    }

    #[test]
    fn test_bad_instruction_inside_routine() {
        let entries = vec![ActionStep::Instructions("uz".to_string())];
        let err = resolve_routine("broken", &entries, &ControlMap::default(), WAIT).unwrap_err();
        assert!(matches!(err, AutomationError::UnknownInstruction { instruction: 'z', .. }));
    }
}
