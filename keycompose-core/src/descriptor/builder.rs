use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::error::{Error, NodeKind, Result};
use crate::types::key_code::{iso_to_code, looks_like_iso};
use crate::types::{Layer, LayoutDescriptor, TransformMap, TransformNode};
use super::derive::{derived_entries, DeriveTransforms};

/// Transform tree under construction
#[derive(Debug)]
enum Pending {
    Leaf(String),
    Branch(BTreeMap<String, Pending>),
}

#[derive(Debug, Clone)]
struct TransformEntry {
    path: Vec<String>,
    /// None for an internal node with no entries
    output: Option<String>,
}

/// Collects the parts of a keyboard layout and validates them into a
/// [`LayoutDescriptor`].
///
/// Nothing is checked until [`LayoutBuilder::build`], which merges every
/// transform entry into one tree and rejects entries that would make a path
/// both a leaf and an internal node.
#[derive(Debug, Clone, Default)]
pub struct LayoutBuilder {
    layers: BTreeMap<String, Vec<(String, String)>>,
    dead_keys: BTreeMap<String, BTreeSet<String>>,
    transforms: Vec<TransformEntry>,
    space: BTreeMap<String, String>,
    derive: DeriveTransforms,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a key in a layer. The key may be a physical code or an ISO
    /// position; empty values are ignored.
    pub fn key(mut self, layer: &str, key: &str, value: &str) -> Self {
        let entries = self.layers.entry(layer.to_string()).or_default();
        if !value.is_empty() {
            entries.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Maps several keys in a layer at once
    pub fn layer<I, K, V>(mut self, name: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.layers.entry(name.to_string()).or_default();
        for (key, value) in entries {
            self = self.key(name, key.as_ref(), value.as_ref());
        }
        self
    }

    /// Registers output values of a layer as dead keys
    pub fn dead_keys<I, V>(mut self, layer: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        self.dead_keys
            .entry(layer.to_string())
            .or_default()
            .extend(values.into_iter().map(|v| v.as_ref().to_string()));
        self
    }

    /// Adds a transform: after the values in `path` are typed, `output` is
    /// committed. The first value is the dead key itself.
    pub fn transform<I, V>(mut self, path: I, output: &str) -> Self
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        self.transforms.push(TransformEntry {
            path: path.into_iter().map(|v| v.as_ref().to_string()).collect(),
            output: Some(output.to_string()),
        });
        self
    }

    /// Adds an internal node at `path` without any entries of its own.
    /// A composition that reaches it is abandoned by whatever is typed next.
    pub fn transform_branch<I, V>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        self.transforms.push(TransformEntry {
            path: path.into_iter().map(|v| v.as_ref().to_string()).collect(),
            output: None,
        });
        self
    }

    /// Sets the text typed by the space bar when `layer` is the starting layer
    pub fn space(mut self, layer: &str, output: &str) -> Self {
        self.space.insert(layer.to_string(), output.to_string());
        self
    }

    pub fn derive_transforms(mut self, mode: DeriveTransforms) -> Self {
        self.derive = mode;
        self
    }

    pub fn build(self) -> Result<LayoutDescriptor> {
        let mut layers = BTreeMap::new();
        for (name, entries) in self.layers {
            let mut layer = Layer::new();
            for (key, value) in entries {
                layer.insert(resolve_key(&key)?, value);
            }
            layers.insert(name, layer);
        }

        let mut tree = BTreeMap::new();
        for entry in &self.transforms {
            merge(&mut tree, &entry.path, entry.output.as_deref())?;
        }

        if self.derive != DeriveTransforms::Off {
            let derived = derived_entries(
                &layers,
                &self.dead_keys,
                |dead_key| tree.contains_key(dead_key),
                self.derive,
            );
            for (path, output) in derived {
                match merge(&mut tree, &path, Some(&output)) {
                    Ok(()) => {}
                    Err(Error::DuplicateTransform { .. }) => {
                        log::debug!("Keeping explicit transform for {:?}", path);
                    }
                    Err(e) => log::warn!("Skipping derived transform: {}", e),
                }
            }
        }

        Ok(LayoutDescriptor {
            layers,
            dead_keys: self.dead_keys,
            transforms: Arc::new(freeze(tree)),
            space: self.space,
        })
    }
}

fn resolve_key(key: &str) -> Result<String> {
    if looks_like_iso(key) {
        iso_to_code(key)
            .map(str::to_string)
            .ok_or_else(|| Error::UnknownIsoKey(key.to_string()))
    } else {
        Ok(key.to_string())
    }
}

/// Inserts one path into the tree, rejecting shape conflicts. A missing
/// output inserts an empty internal node.
fn merge(
    root: &mut BTreeMap<String, Pending>,
    path: &[String],
    output: Option<&str>,
) -> Result<()> {
    let (last, prefix) = path.split_last().ok_or(Error::EmptyTransformPath)?;

    let mut level = root;
    for (depth, step) in prefix.iter().enumerate() {
        let node = level
            .entry(step.clone())
            .or_insert_with(|| Pending::Branch(BTreeMap::new()));
        level = match node {
            Pending::Branch(map) => map,
            Pending::Leaf(_) => {
                return Err(Error::TransformConflict {
                    path: path[..=depth].to_vec(),
                    existing: NodeKind::Leaf,
                    incoming: NodeKind::Internal,
                })
            }
        };
    }

    match (level.get(last), output) {
        (None, Some(output)) => {
            level.insert(last.clone(), Pending::Leaf(output.to_string()));
            Ok(())
        }
        (None, None) => {
            level.insert(last.clone(), Pending::Branch(BTreeMap::new()));
            Ok(())
        }
        (Some(Pending::Branch(_)), None) => Ok(()),
        (Some(Pending::Leaf(existing)), Some(output)) if existing == output => Ok(()),
        (Some(Pending::Leaf(existing)), Some(output)) => Err(Error::DuplicateTransform {
            path: path.to_vec(),
            existing: existing.clone(),
            incoming: output.to_string(),
        }),
        (Some(Pending::Leaf(_)), None) => Err(Error::TransformConflict {
            path: path.to_vec(),
            existing: NodeKind::Leaf,
            incoming: NodeKind::Internal,
        }),
        (Some(Pending::Branch(_)), Some(_)) => Err(Error::TransformConflict {
            path: path.to_vec(),
            existing: NodeKind::Internal,
            incoming: NodeKind::Leaf,
        }),
    }
}

fn freeze(level: BTreeMap<String, Pending>) -> TransformMap {
    TransformMap::new(
        level
            .into_iter()
            .map(|(value, node)| {
                let node = match node {
                    Pending::Leaf(text) => TransformNode::Leaf(text),
                    Pending::Branch(map) => TransformNode::Internal(Arc::new(freeze(map))),
                };
                (value, node)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_keys_are_translated() {
        let layout = LayoutBuilder::new()
            .key("default", "C01", "a")
            .key("default", "Space", "_")
            .build()
            .unwrap();

        let layer = layout.layer("default").unwrap();
        assert_eq!(layer.get("KeyA").map(String::as_str), Some("a"));
        assert_eq!(layer.get("Space").map(String::as_str), Some("_"));
        assert!(layer.get("C01").is_none());
    }

    #[test]
    fn test_unknown_iso_key_is_rejected() {
        let err = LayoutBuilder::new().key("default", "C12", "x").build().unwrap_err();
        assert_eq!(err, Error::UnknownIsoKey("C12".to_string()));
    }

    #[test]
    fn test_empty_values_are_dropped_but_layer_exists() {
        let layout = LayoutBuilder::new().key("shift", "KeyA", "").build().unwrap();
        assert!(layout.layer("shift").unwrap().is_empty());
    }

    #[test]
    fn test_merge_reports_leaf_then_branch() {
        let err = LayoutBuilder::new()
            .transform(["^"], "^")
            .transform(["^", "a"], "â")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::TransformConflict {
                path: vec!["^".to_string()],
                existing: NodeKind::Leaf,
                incoming: NodeKind::Internal,
            }
        );
    }

    #[test]
    fn test_merge_reports_branch_then_leaf() {
        let err = LayoutBuilder::new()
            .transform(["^", "a", "b"], "x")
            .transform(["^", "a"], "â")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::TransformConflict {
                path: vec!["^".to_string(), "a".to_string()],
                existing: NodeKind::Internal,
                incoming: NodeKind::Leaf,
            }
        );
    }

    #[test]
    fn test_identical_leaf_is_not_a_conflict() {
        let layout = LayoutBuilder::new()
            .transform(["^", "a"], "â")
            .transform(["^", "a"], "â")
            .build()
            .unwrap();
        assert_eq!(layout.transforms().leaf_count(), 1);
    }

    #[test]
    fn test_empty_branch_is_kept() {
        let layout = LayoutBuilder::new()
            .transform_branch(["'"])
            .transform_branch(["^", "^"])
            .transform(["^", "a"], "â")
            .transform_branch(["^"])
            .build()
            .unwrap();

        let transforms = layout.transforms();
        assert!(transforms.get("'").and_then(TransformNode::as_internal).unwrap().is_empty());
        assert!(transforms.lookup(["^", "^"]).and_then(TransformNode::as_internal).unwrap().is_empty());
        assert_eq!(transforms.lookup(["^", "a"]).and_then(TransformNode::as_leaf), Some("â"));
    }

    #[test]
    fn test_empty_branch_conflicts_with_leaf() {
        let err = LayoutBuilder::new()
            .transform(["^", "a"], "â")
            .transform_branch(["^", "a"])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::TransformConflict {
                path: vec!["^".to_string(), "a".to_string()],
                existing: NodeKind::Leaf,
                incoming: NodeKind::Internal,
            }
        );

        let err = LayoutBuilder::new()
            .transform_branch(["^", "a"])
            .transform(["^", "a"], "â")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::TransformConflict { existing: NodeKind::Internal, .. }));
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let err = LayoutBuilder::new()
            .transform(Vec::<String>::new(), "x")
            .build()
            .unwrap_err();
        assert_eq!(err, Error::EmptyTransformPath);
    }
}
