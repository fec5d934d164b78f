use std::sync::Arc;

use crate::types::TransformMap;

#[derive(Debug, Clone)]
struct Composition {
    /// Tree level the next value is looked up in
    node: Arc<TransformMap>,
    /// Values typed since the dead key, the dead key included
    sequence: Vec<String>,
}

/// Mutable state of one engine instance
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    composition: Option<Composition>,
    /// Sticky AltRight flag, set between its key-down and key-up
    pub alt_right_held: bool,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the engine state
    pub fn reset(&mut self) {
        self.composition = None;
        self.alt_right_held = false;
    }

    pub fn is_composing(&self) -> bool {
        self.composition.is_some()
    }

    /// Starts a composition at a dead key's transform root
    pub fn begin_composition(&mut self, dead_key: &str, root: Arc<TransformMap>) {
        self.composition = Some(Composition {
            node: root,
            sequence: vec![dead_key.to_string()],
        });
    }

    /// Current tree level, if composing
    pub fn composition_node(&self) -> Option<&Arc<TransformMap>> {
        self.composition.as_ref().map(|c| &c.node)
    }

    /// Moves an ongoing composition one level deeper
    pub fn advance_composition(&mut self, value: &str, node: Arc<TransformMap>) {
        if let Some(composition) = self.composition.as_mut() {
            composition.node = node;
            composition.sequence.push(value.to_string());
        }
    }

    pub fn clear_composition(&mut self) {
        self.composition = None;
    }

    pub fn composing_sequence(&self) -> &[String] {
        self.composition
            .as_ref()
            .map(|c| c.sequence.as_slice())
            .unwrap_or(&[])
    }
}
