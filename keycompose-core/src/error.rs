//! Error types for building keyboard layout descriptors
//!
//! Key resolution itself never fails; every error here is raised while a
//! descriptor is being built, before any input is processed.

use thiserror::Error;

/// Shape of a transform tree entry, used when reporting conflicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Internal,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Leaf => f.write_str("leaf"),
            NodeKind::Internal => f.write_str("internal node"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Transform conflict at {path:?}: already a {existing}, cannot also be a {incoming}")]
    TransformConflict {
        path: Vec<String>,
        existing: NodeKind,
        incoming: NodeKind,
    },

    #[error("Duplicate transform at {path:?}: {existing:?} vs {incoming:?}")]
    DuplicateTransform {
        path: Vec<String>,
        existing: String,
        incoming: String,
    },

    #[error("Transform entry has an empty trigger sequence")]
    EmptyTransformPath,

    #[error("Unknown ISO key position: {0}")]
    UnknownIsoKey(String),
}

pub type Result<T> = std::result::Result<T, Error>;
