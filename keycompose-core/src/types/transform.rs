use std::collections::BTreeMap;
use std::sync::Arc;

/// A node of the dead-key transform tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformNode {
    /// Final composed text
    Leaf(String),
    /// Further trigger values to wait for
    Internal(Arc<TransformMap>),
}

impl TransformNode {
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            TransformNode::Leaf(s) => Some(s),
            TransformNode::Internal(_) => None,
        }
    }

    pub fn as_internal(&self) -> Option<&Arc<TransformMap>> {
        match self {
            TransformNode::Leaf(_) => None,
            TransformNode::Internal(map) => Some(map),
        }
    }
}

/// Mapping from trigger value to subtree, one level of the transform tree.
///
/// The root level is keyed by the dead key's own output value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformMap {
    entries: BTreeMap<String, TransformNode>,
}

impl TransformMap {
    pub fn new(entries: BTreeMap<String, TransformNode>) -> Self {
        Self { entries }
    }

    pub fn get(&self, value: &str) -> Option<&TransformNode> {
        self.entries.get(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TransformNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Follows a sequence of trigger values from this level
    pub fn lookup<'a, I>(&self, path: I) -> Option<&TransformNode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut path = path.into_iter();
        let mut node = self.entries.get(path.next()?)?;
        for step in path {
            node = node.as_internal()?.get(step)?;
        }
        Some(node)
    }

    /// Number of leaves reachable from this level
    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                TransformNode::Leaf(_) => 1,
                TransformNode::Internal(map) => map.leaf_count(),
            })
            .sum()
    }
}
