//! Loading of keyboard descriptors from JSON
//!
//! The accepted shape is the descriptor object embedded in generated ChromeOS
//! input method extensions: keyboard ids at the top level, each with
//! `layers`, `deadKeys`, `transforms` and `space`.

use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;

use keycompose_core::{DeriveTransforms, KeyboardId, LayoutBuilder, LayoutDescriptor, LayoutStore};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::LoadError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDescriptor {
    #[serde(default)]
    layers: BTreeMap<String, BTreeMap<String, Option<String>>>,
    #[serde(default)]
    dead_keys: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    transforms: Map<String, Value>,
    #[serde(default)]
    space: BTreeMap<String, String>,
    #[serde(default)]
    derive: RawDerive,
}

#[derive(Debug, Default, Deserialize)]
struct RawDerive {
    #[serde(default)]
    transforms: Option<DeriveFlag>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DeriveFlag {
    Enabled(bool),
    Mode(String),
}

/// Parses every keyboard of a descriptor document
pub fn load_descriptors(json: &str) -> Result<LayoutStore, LoadError> {
    let raw: BTreeMap<String, RawDescriptor> = serde_json::from_str(json)?;

    let mut store = LayoutStore::new();
    for (keyboard, descriptor) in raw {
        let layout = build_descriptor(&keyboard, descriptor)?;
        log::debug!(
            "Loaded keyboard '{}' with {} layers",
            keyboard,
            layout.layer_names().count()
        );
        store.insert(KeyboardId::from(keyboard), layout);
    }
    Ok(store)
}

pub fn load_descriptor_file(path: &Path) -> Result<LayoutStore, LoadError> {
    let input = read_to_string(path)?;
    load_descriptors(&input)
}

fn build_descriptor(keyboard: &str, raw: RawDescriptor) -> Result<LayoutDescriptor, LoadError> {
    let mut builder = LayoutBuilder::new();

    for (layer, keys) in &raw.layers {
        // null entries mark keys the layer leaves undefined
        let keys = keys
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)));
        builder = builder.layer(layer, keys);
    }

    for (layer, values) in &raw.dead_keys {
        builder = builder.dead_keys(layer, values);
    }

    let mut path = Vec::new();
    builder = add_transforms(keyboard, builder, &mut path, &raw.transforms)?;

    for (layer, output) in &raw.space {
        builder = builder.space(layer, output);
    }

    let mode = match raw.derive.transforms {
        None | Some(DeriveFlag::Enabled(false)) => DeriveTransforms::Off,
        Some(DeriveFlag::Enabled(true)) => DeriveTransforms::Composable,
        Some(DeriveFlag::Mode(mode)) if mode == "all" => DeriveTransforms::All,
        Some(DeriveFlag::Mode(mode)) => {
            return Err(LoadError::UnknownDeriveMode {
                keyboard: keyboard.to_string(),
                mode,
            })
        }
    };

    builder
        .derive_transforms(mode)
        .build()
        .map_err(|source| LoadError::Layout {
            keyboard: keyboard.to_string(),
            source,
        })
}

/// Flattens a nested transform object into builder entries
fn add_transforms(
    keyboard: &str,
    mut builder: LayoutBuilder,
    path: &mut Vec<String>,
    level: &Map<String, Value>,
) -> Result<LayoutBuilder, LoadError> {
    for (value, node) in level {
        path.push(value.clone());
        builder = match node {
            Value::String(output) => builder.transform(path.iter(), output),
            Value::Object(next) if next.is_empty() => builder.transform_branch(path.iter()),
            Value::Object(next) => add_transforms(keyboard, builder, path, next)?,
            other => {
                return Err(LoadError::InvalidTransform {
                    keyboard: keyboard.to_string(),
                    path: path.clone(),
                    found: json_kind(other),
                })
            }
        };
        path.pop();
    }
    Ok(builder)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
