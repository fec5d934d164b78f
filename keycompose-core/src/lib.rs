pub mod types;
pub mod error;
pub mod descriptor;
pub mod engine;

pub use types::*;

// Re-export commonly used types
pub use types::layout::{KeyboardId, Layer, LayoutDescriptor, LayoutStore};
pub use types::transform::{TransformMap, TransformNode};
pub use descriptor::{DeriveTransforms, LayoutBuilder};
pub use error::{Error, Result};
pub use engine::{
    fallback_layers, layer_name, KeyDirection, KeyEvent, KeyOutput, KeyboardEngine, ModifierState,
};
