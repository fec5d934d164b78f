use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use super::transform::{TransformMap, TransformNode};

/// Identifies one keyboard among the loaded descriptors
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyboardId(String);

impl KeyboardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for KeyboardId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyboardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyboardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for KeyboardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Physical key code to output value, for one modifier layer
pub type Layer = BTreeMap<String, String>;

/// Immutable description of one keyboard layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutDescriptor {
    pub(crate) layers: BTreeMap<String, Layer>,
    pub(crate) dead_keys: BTreeMap<String, BTreeSet<String>>,
    pub(crate) transforms: Arc<TransformMap>,
    pub(crate) space: BTreeMap<String, String>,
}

impl LayoutDescriptor {
    /// Key table of a layer, if the layout defines it
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    /// Dead-key values registered for a layer
    pub fn dead_keys(&self, layer: &str) -> Option<&BTreeSet<String>> {
        self.dead_keys.get(layer)
    }

    pub fn is_dead_key(&self, layer: &str, value: &str) -> bool {
        self.dead_keys
            .get(layer)
            .map_or(false, |values| values.contains(value))
    }

    /// Every dead-key value of any layer, deduplicated
    pub fn all_dead_keys(&self) -> BTreeSet<&str> {
        self.dead_keys
            .values()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    pub fn transforms(&self) -> &TransformMap {
        &self.transforms
    }

    /// Transform tree level that a dead key opens.
    ///
    /// Any root node starts a composition. A leaf root has no entries to
    /// continue with, so it opens an empty level. A value registered as a
    /// dead key with no root at all is typed as ordinary text.
    pub fn dead_key_root(&self, layer: &str, value: &str) -> Option<Arc<TransformMap>> {
        if !self.is_dead_key(layer, value) {
            return None;
        }
        match self.transforms.get(value)? {
            TransformNode::Internal(map) => Some(Arc::clone(map)),
            TransformNode::Leaf(_) => Some(Arc::new(TransformMap::default())),
        }
    }

    /// Text the space bar produces when `layer` is the starting layer
    pub fn space_override(&self, layer: &str) -> Option<&str> {
        self.space
            .get(layer)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn space_overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.space.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Read-only collection of descriptors, keyed by keyboard id
#[derive(Debug, Clone, Default)]
pub struct LayoutStore {
    keyboards: BTreeMap<KeyboardId, LayoutDescriptor>,
}

impl LayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a keyboard, returning the descriptor it replaced
    pub fn insert(
        &mut self,
        id: impl Into<KeyboardId>,
        descriptor: LayoutDescriptor,
    ) -> Option<LayoutDescriptor> {
        self.keyboards.insert(id.into(), descriptor)
    }

    pub fn get(&self, id: &str) -> Option<&LayoutDescriptor> {
        self.keyboards.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.keyboards.contains_key(id)
    }

    pub fn keyboards(&self) -> impl Iterator<Item = &KeyboardId> {
        self.keyboards.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyboardId, &LayoutDescriptor)> {
        self.keyboards.iter()
    }

    pub fn len(&self) -> usize {
        self.keyboards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyboards.is_empty()
    }
}

impl FromIterator<(KeyboardId, LayoutDescriptor)> for LayoutStore {
    fn from_iter<T: IntoIterator<Item = (KeyboardId, LayoutDescriptor)>>(iter: T) -> Self {
        Self {
            keyboards: iter.into_iter().collect(),
        }
    }
}
