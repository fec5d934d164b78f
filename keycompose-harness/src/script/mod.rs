//! Key scripts: a plain-text notation for sequences of key events
//!
//! ```text
//! # dead key, then e
//! Quote KeyE
//! shift+KeyA          # press with shift held
//! +AltRight KeyE -AltRight
//! @focus 2
//! ```

mod parser;
mod token;

pub use parser::{parse_script, parse_modifiers, Parser};
pub use token::Token;

use keycompose_core::KeyEvent;

use crate::host::ContextId;

/// What a scripted key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Key-down followed by key-up
    Press,
    Down,
    Up,
}

/// A key with the modifier flags held while it is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStroke {
    pub action: KeyAction,
    pub code: String,
    pub caps_lock: bool,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyStroke {
    /// The raw events this stroke stands for
    pub fn events(&self) -> Vec<KeyEvent> {
        let down = KeyEvent::down(&self.code)
            .with_caps_lock(self.caps_lock)
            .with_ctrl(self.ctrl)
            .with_shift(self.shift);
        let up = KeyEvent::up(&self.code)
            .with_caps_lock(self.caps_lock)
            .with_ctrl(self.ctrl)
            .with_shift(self.shift);

        match self.action {
            KeyAction::Press => vec![down, up],
            KeyAction::Down => vec![down],
            KeyAction::Up => vec![up],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Key { line: usize, stroke: KeyStroke },
    Focus(ContextId),
    Blur(ContextId),
}
