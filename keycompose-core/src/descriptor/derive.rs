//! Automatic dead-key transforms
//!
//! A layout can ask for the obvious compositions of each dead key to be
//! generated: the dead key followed by any letter the layout can type,
//! normalised to a precomposed character where Unicode has one.

use std::collections::{BTreeMap, BTreeSet};

use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

use crate::types::Layer;

/// Which transforms to derive from the dead keys of a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeriveTransforms {
    /// Only explicit transforms
    #[default]
    Off,
    /// Letter + dead key pairs that normalise to a precomposed character
    Composable,
    /// Every letter + dead key pair, even when it stays a combining sequence
    All,
}

/// Spacing accents with no compatibility decomposition, and the combining
/// mark they stand for
const SPACING_ACCENTS: [(char, char); 8] = [
    ('^', '\u{0302}'),
    ('\u{02C6}', '\u{0302}'),
    ('`', '\u{0300}'),
    ('\u{02CB}', '\u{0300}'),
    ('~', '\u{0303}'),
    ('\u{02C7}', '\u{030C}'),
    ('\u{02C9}', '\u{0304}'),
    ('\u{02CA}', '\u{0301}'),
];

/// Combining form of a dead key value.
///
/// Compatibility decomposition handles most spacing accents (`´` becomes a
/// space and U+0301); the ones it leaves alone come from a fixed table.
/// Values with no combining counterpart are returned unchanged.
pub fn combining_form(dead_key: &str) -> String {
    let decomposed: String = dead_key.nfkd().filter(|c| *c != ' ').collect();
    if decomposed != dead_key {
        return decomposed;
    }

    let mut chars = dead_key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => SPACING_ACCENTS
            .iter()
            .find(|(spacing, _)| *spacing == ch)
            .map(|(_, combining)| combining.to_string())
            .unwrap_or(decomposed),
        _ => decomposed,
    }
}

/// General category L (Lu, Ll, Lt, Lm, Lo)
fn is_letter(ch: char) -> bool {
    matches!(
        get_general_category(ch),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Single letters typed by any layer
fn input_letters(layers: &BTreeMap<String, Layer>) -> BTreeSet<char> {
    layers
        .values()
        .flat_map(|layer| layer.values())
        .filter_map(|value| {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if is_letter(ch) => Some(ch),
                _ => None,
            }
        })
        .collect()
}

/// Transform entries generated for every dead key of a layout.
///
/// `has_root` reports whether explicit transforms already exist for a dead
/// key; only dead keys without them get the `dead key + space` entry.
pub(crate) fn derived_entries(
    layers: &BTreeMap<String, Layer>,
    dead_keys: &BTreeMap<String, BTreeSet<String>>,
    has_root: impl Fn(&str) -> bool,
    mode: DeriveTransforms,
) -> Vec<(Vec<String>, String)> {
    if mode == DeriveTransforms::Off {
        return Vec::new();
    }

    let dead_keys: BTreeSet<&str> = dead_keys.values().flatten().map(String::as_str).collect();
    let letters = input_letters(layers);
    log::trace!("Deriving transforms for {:?} over {} letters", dead_keys, letters.len());

    let mut entries = Vec::new();
    for dead_key in dead_keys {
        if !has_root(dead_key) {
            entries.push((vec![dead_key.to_string(), " ".to_string()], dead_key.to_string()));
        }

        let combining = combining_form(dead_key);
        for &letter in &letters {
            let composed = format!("{}{}", letter, combining);
            let normalised: String = composed.nfkc().collect();

            if mode == DeriveTransforms::Composable && composed == normalised {
                continue;
            }

            log::trace!("Adding transform: {}{} -> {}", dead_key, letter, normalised);
            entries.push((vec![dead_key.to_string(), letter.to_string()], normalised));
        }
    }

    entries
}
