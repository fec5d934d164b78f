//! Dead-key composition steps

use std::sync::Arc;

use crate::types::{TransformMap, TransformNode};

/// Outcome of feeding one value to an in-progress composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A leaf was reached; commit the text and go idle
    Complete(String),
    /// An internal node was reached; keep composing from it
    Continue(Arc<TransformMap>),
    /// The value has no entry at this level; drop the composition silently
    Abandon,
}

/// Advances a composition by one value.
///
/// An unmatched value swallows both the dead key and itself.
pub fn step(node: &TransformMap, value: &str) -> Step {
    match node.get(value) {
        Some(TransformNode::Leaf(text)) => Step::Complete(text.clone()),
        Some(TransformNode::Internal(next)) => Step::Continue(Arc::clone(next)),
        None => Step::Abandon,
    }
}
