//! Output representation for the engine

/// Result of resolving a key-down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutput {
    /// Commit this text
    Emit(String),
    /// Nothing to commit, but the key was consumed
    Suppress,
    /// The layout has nothing for this key; let the host handle it
    PassThrough,
}

impl KeyOutput {
    pub fn emit(text: impl Into<String>) -> Self {
        KeyOutput::Emit(text.into())
    }

    /// Whether the host must skip its default key handling
    pub fn is_handled(&self) -> bool {
        !matches!(self, KeyOutput::PassThrough)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            KeyOutput::Emit(text) => Some(text),
            _ => None,
        }
    }
}

impl std::fmt::Display for KeyOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyOutput::Emit(text) => write!(f, "emit {:?}", text),
            KeyOutput::Suppress => f.write_str("suppress"),
            KeyOutput::PassThrough => f.write_str("pass-through"),
        }
    }
}
