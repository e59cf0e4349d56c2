// Instruction strings: one character per controller input
//
//   u d l r  directions
//   a b      face buttons
//   w        pause (no key)
//
// Whitespace is ignored so long strings can be grouped for readability.
use super::error::{AutomationError, AutomationResult};
use super::types::{Control, ControlMap};
use crate::keys::Step;
use std::time::Duration;

pub fn parse_instructions(
    text: &str,
    controls: &ControlMap,
    wait: Duration,
) -> AutomationResult<Vec<Step>> {
    let mut steps = Vec::with_capacity(text.len());
    for (position, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            continue;
        }
        if c == 'w' {
            steps.push(Step::Wait(wait));
            continue;
        }
        let control = Control::from_instruction(c).ok_or(AutomationError::UnknownInstruction {
            instruction: c,
            position,
        })?;
        steps.push(Step::Tap(controls.key(control).clone()));
    }
    Ok(steps)
}
