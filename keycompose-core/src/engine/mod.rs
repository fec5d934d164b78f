//! Key resolution engine
//!
//! Turns key-down events under a modifier state into committed text,
//! searching modifier layers from most to least specific and tracking at
//! most one dead-key composition.

mod composition;
mod engine;
mod input;
mod layers;
mod output;
mod state;

pub use composition::Step;
pub use engine::KeyboardEngine;
pub use input::{KeyDirection, KeyEvent, ModifierState};
pub use layers::{fallback_layers, layer_name, FallbackLayers};
pub use output::KeyOutput;
pub use state::EngineState;
