use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Keyboard '{keyboard}': {source}")]
    Layout {
        keyboard: String,
        #[source]
        source: keycompose_core::Error,
    },

    #[error("Keyboard '{keyboard}': transform at {path:?} must be a string or an object, found {found}")]
    InvalidTransform {
        keyboard: String,
        path: Vec<String>,
        found: &'static str,
    },

    #[error("Keyboard '{keyboard}': unknown derive mode {mode:?}")]
    UnknownDeriveMode { keyboard: String, mode: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Script error at line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl ScriptError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}
