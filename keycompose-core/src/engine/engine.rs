use std::sync::Arc;

use crate::types::key_code::SPACE;
use crate::types::{LayoutDescriptor, LayoutStore};
use super::composition::{self, Step};
use super::layers::{fallback_layers, layer_name};
use super::{EngineState, KeyEvent, KeyOutput, ModifierState};

/// Resolves key events against a set of keyboard layouts.
///
/// One engine serves one input context: it owns the pending composition and
/// the AltRight flag, while the layouts themselves are shared read-only.
pub struct KeyboardEngine {
    layouts: Arc<LayoutStore>,
    state: EngineState,
}

impl KeyboardEngine {
    /// Create a new engine instance
    pub fn new(layouts: impl Into<Arc<LayoutStore>>) -> Self {
        Self {
            layouts: layouts.into(),
            state: EngineState::new(),
        }
    }

    pub fn layouts(&self) -> &Arc<LayoutStore> {
        &self.layouts
    }

    /// Process a raw key event from the host.
    ///
    /// Key-ups only update modifier tracking and never emit text.
    pub fn process_key_event(&mut self, keyboard: &str, event: &KeyEvent) -> KeyOutput {
        if self.handle_modifier_tracking(event) {
            return KeyOutput::Suppress;
        }
        if !event.is_key_down() {
            return KeyOutput::PassThrough;
        }

        let modifiers = ModifierState::new(
            event.caps_lock,
            event.ctrl,
            self.state.alt_right_held,
            event.shift,
        );
        self.resolve_key_down(keyboard, &event.code, modifiers)
    }

    /// Tracks the AltRight key as a sticky modifier.
    ///
    /// Returns true when the event was an AltRight key-down, which is fully
    /// handled here.
    pub fn handle_modifier_tracking(&mut self, event: &KeyEvent) -> bool {
        if !event.is_alt_right() {
            return false;
        }
        self.state.alt_right_held = event.is_key_down();
        event.is_key_down()
    }

    /// Resolve a key-down of `code` under `modifiers` for one keyboard
    pub fn resolve_key_down(
        &mut self,
        keyboard: &str,
        code: &str,
        modifiers: ModifierState,
    ) -> KeyOutput {
        let layouts = Arc::clone(&self.layouts);
        let Some(layout) = layouts.get(keyboard) else {
            log::debug!("Unknown keyboard {:?}", keyboard);
            return KeyOutput::PassThrough;
        };

        let start = layer_name(&modifiers);
        for layer in fallback_layers(&start) {
            log::trace!("{} {} -> trying layer {}", keyboard, code, layer);
            if let Some(output) = self.resolve_in_layer(layout, layer, &start, code) {
                return output;
            }
        }

        log::debug!("{} {} [{}] not mapped", keyboard, code, start);
        KeyOutput::PassThrough
    }

    /// Decision of a single fallback layer, or None to try the next one
    fn resolve_in_layer(
        &mut self,
        layout: &LayoutDescriptor,
        layer_name: &str,
        start: &str,
        code: &str,
    ) -> Option<KeyOutput> {
        let layer = layout.layer(layer_name)?;
        let mapped = layer.get(code).map(String::as_str);

        // Dead keys win over everything else, but only start from idle
        if !self.state.is_composing() {
            if let Some(value) = mapped {
                if let Some(root) = layout.dead_key_root(layer_name, value) {
                    log::debug!("Dead key {:?} in layer {}", value, layer_name);
                    self.state.begin_composition(value, root);
                    return Some(KeyOutput::Suppress);
                }
            }
        }

        let value = if code == SPACE {
            Some(layout.space_override(start).or(mapped).unwrap_or(" "))
        } else {
            mapped
        }?;

        let Some(node) = self.state.composition_node().cloned() else {
            return Some(KeyOutput::emit(value));
        };

        let output = match composition::step(&node, value) {
            Step::Complete(text) => {
                log::debug!("Composed {:?} from {:?}", text, self.state.composing_sequence());
                self.state.clear_composition();
                KeyOutput::Emit(text)
            }
            Step::Continue(next) => {
                self.state.advance_composition(value, next);
                KeyOutput::Suppress
            }
            Step::Abandon => {
                log::debug!(
                    "Abandoned composition {:?} at {:?}",
                    self.state.composing_sequence(),
                    value
                );
                self.state.clear_composition();
                KeyOutput::Suppress
            }
        };
        Some(output)
    }

    pub fn is_composing(&self) -> bool {
        self.state.is_composing()
    }

    /// Values typed since the pending dead key, the dead key first
    pub fn composing_sequence(&self) -> &[String] {
        self.state.composing_sequence()
    }

    pub fn is_alt_right_held(&self) -> bool {
        self.state.alt_right_held
    }

    /// Reset the engine state
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Get the current engine state (for debugging)
    pub fn state(&self) -> &EngineState {
        &self.state
    }
}
