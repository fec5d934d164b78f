pub mod error;
pub mod loader;
pub mod script;
pub mod host;

pub use keycompose_core::*;

pub use error::{LoadError, ScriptError};
pub use host::{CommitLog, ContextId, HostAdapter, TextSink};
pub use loader::{load_descriptor_file, load_descriptors};
pub use script::{parse_script, KeyAction, ScriptStep};
