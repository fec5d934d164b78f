//! Modifier layer naming and fallback order

use super::ModifierState;

pub const DEFAULT_LAYER: &str = "default";
const CAPS: &str = "caps";
const SHIFT: &str = "shift";

/// Name of the layer selected by a modifier combination.
///
/// Active modifiers are joined with `+` in the fixed order caps, ctrl, alt,
/// shift; with none active the layer is `default`.
pub fn layer_name(modifiers: &ModifierState) -> String {
    let parts: Vec<&str> = [
        (modifiers.caps_lock, CAPS),
        (modifiers.ctrl, "ctrl"),
        (modifiers.alt, "alt"),
        (modifiers.shift, SHIFT),
    ]
    .into_iter()
    .filter_map(|(active, name)| active.then_some(name))
    .collect();

    if parts.is_empty() {
        DEFAULT_LAYER.to_string()
    } else {
        parts.join("+")
    }
}

/// Layers to search for a key, most specific first
pub fn fallback_layers(start: &str) -> FallbackLayers<'_> {
    FallbackLayers {
        start,
        stage: Stage::Start,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    Caps,
    Shift,
    Default,
    Done,
}

/// Fallback chain derived from a starting layer name.
///
/// The stage only ever advances, so the chain has at most four entries:
/// the starting layer, `caps`, `shift` and `default`.
#[derive(Debug, Clone)]
pub struct FallbackLayers<'a> {
    start: &'a str,
    stage: Stage,
}

impl<'a> Iterator for FallbackLayers<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let (next_stage, candidate) = match self.stage {
                Stage::Start => {
                    let next = if self.start == DEFAULT_LAYER {
                        Stage::Done
                    } else {
                        Stage::Caps
                    };
                    (next, Some(self.start))
                }
                Stage::Caps => (
                    Stage::Shift,
                    (self.start.contains(CAPS) && self.start != CAPS).then_some(CAPS),
                ),
                Stage::Shift => (
                    Stage::Default,
                    (self.start.contains(SHIFT) && self.start != SHIFT).then_some(SHIFT),
                ),
                Stage::Default => (Stage::Done, Some(DEFAULT_LAYER)),
                Stage::Done => return None,
            };

            self.stage = next_stage;
            if candidate.is_some() {
                return candidate;
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(4))
    }
}
