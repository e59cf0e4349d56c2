// Logical game controls and their key bindings
use crate::keys::KeyId;
use serde::{Deserialize, Serialize};

/// A controller button as the game sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    #[serde(rename = "a_button", alias = "a")]
    A,
    #[serde(rename = "b_button", alias = "b")]
    B,
    #[serde(rename = "minus_button", alias = "minus")]
    Minus,
    #[serde(rename = "plus_button", alias = "plus")]
    Plus,
}

impl Control {
    pub const ALL: [Control; 8] = [
        Control::Up,
        Control::Down,
        Control::Left,
        Control::Right,
        Control::A,
        Control::B,
        Control::Minus,
        Control::Plus,
    ];

    /// Control for one character of the instruction alphabet.
    pub fn from_instruction(c: char) -> Option<Self> {
        match c {
            'u' => Some(Control::Up),
            'd' => Some(Control::Down),
            'l' => Some(Control::Left),
            'r' => Some(Control::Right),
            'a' => Some(Control::A),
            'b' => Some(Control::B),
            _ => None,
        }
    }
}

/// Which key each control is bound to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlMap {
    pub up: KeyId,
    pub down: KeyId,
    pub left: KeyId,
    pub right: KeyId,
    pub a_button: KeyId,
    pub b_button: KeyId,
    pub minus_button: KeyId,
    pub plus_button: KeyId,
}

impl Default for ControlMap {
    fn default() -> Self {
        Self {
            up: KeyId::new("w"),
            down: KeyId::new("s"),
            left: KeyId::new("a"),
            right: KeyId::new("d"),
            a_button: KeyId::new("k"),
            b_button: KeyId::new("l"),
            minus_button: KeyId::new("q"),
            plus_button: KeyId::new("e"),
        }
    }
}

impl ControlMap {
    pub fn key(&self, control: Control) -> &KeyId {
        match control {
            Control::Up => &self.up,
            Control::Down => &self.down,
            Control::Left => &self.left,
            Control::Right => &self.right,
            Control::A => &self.a_button,
            Control::B => &self.b_button,
            Control::Minus => &self.minus_button,
            Control::Plus => &self.plus_button,
        }
    }

    /// First control bound to an empty key name, if any.
    pub fn unbound(&self) -> Option<Control> {
        Control::ALL
            .into_iter()
            .find(|&control| self.key(control).as_str().is_empty())
    }
}
