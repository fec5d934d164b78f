//! Input representation for the engine

use crate::types::key_code::ALT_RIGHT;

/// Whether a key went down or came up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    KeyDown,
    KeyUp,
}

/// A raw key event as delivered by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Physical key code (`KeyA`, `Quote`, `AltRight`, ...)
    pub code: String,
    pub direction: KeyDirection,
    pub caps_lock: bool,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyEvent {
    /// Creates a key-down event without modifiers
    pub fn down(code: &str) -> Self {
        Self {
            code: code.to_string(),
            direction: KeyDirection::KeyDown,
            caps_lock: false,
            ctrl: false,
            shift: false,
        }
    }

    /// Creates a key-up event without modifiers
    pub fn up(code: &str) -> Self {
        Self {
            direction: KeyDirection::KeyUp,
            ..Self::down(code)
        }
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = ctrl;
        self
    }

    pub fn with_caps_lock(mut self, caps_lock: bool) -> Self {
        self.caps_lock = caps_lock;
        self
    }

    pub fn is_key_down(&self) -> bool {
        self.direction == KeyDirection::KeyDown
    }

    pub fn is_alt_right(&self) -> bool {
        self.code == ALT_RIGHT
    }
}

/// Modifiers active for one key-down.
///
/// `alt` is the sticky AltRight state tracked by the engine, never the
/// host's own alt flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierState {
    pub caps_lock: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl ModifierState {
    /// Creates a new modifier state
    pub fn new(caps_lock: bool, ctrl: bool, alt: bool, shift: bool) -> Self {
        Self {
            caps_lock,
            ctrl,
            alt,
            shift,
        }
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }
}
