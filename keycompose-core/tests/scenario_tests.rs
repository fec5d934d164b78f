mod common;

use common::*;
use keycompose_core::{KeyOutput, LayoutBuilder, ModifierState};
use pretty_assertions::assert_eq;

#[test]
fn test_shift_selects_layer() {
    let mut engine = engine_for(
        LayoutBuilder::new()
            .key("default", "KeyA", "a")
            .key("shift", "KeyA", "A"),
    );

    assert_eq!(press(&mut engine, "KeyA"), emit("a"));
    assert_eq!(press_with(&mut engine, "KeyA", ModifierState::shift()), emit("A"));
}

#[test]
fn test_dead_key_then_match() {
    let mut engine = engine_for(acute_layout());

    assert_eq!(press(&mut engine, "Quote"), KeyOutput::Suppress);
    assert!(engine.is_composing());
    assert_eq!(press(&mut engine, "KeyE"), emit("é"));
    assert!(!engine.is_composing());
}

#[test]
fn test_dead_key_then_mismatch_recovers() {
    let mut engine = engine_for(acute_layout());

    assert_eq!(
        press_all(&mut engine, &["Quote", "KeyX", "KeyA"]),
        vec![KeyOutput::Suppress, KeyOutput::Suppress, emit("a")]
    );
    assert!(!engine.is_composing());
}

#[test]
fn test_abandoned_composition_is_not_retried() {
    let mut engine = engine_for(acute_layout());

    press(&mut engine, "Quote");
    press(&mut engine, "KeyX");
    // the e after an abandoned composition is a plain e
    assert_eq!(press(&mut engine, "KeyE"), emit("e"));
}

#[test]
fn test_composition_continues_across_layers() {
    let mut engine = engine_for(acute_layout());

    assert_eq!(press(&mut engine, "Quote"), KeyOutput::Suppress);
    assert_eq!(press_with(&mut engine, "KeyE", ModifierState::shift()), emit("É"));
}

#[test]
fn test_multi_level_transform_needs_two_keys() {
    let mut engine = engine_for(
        LayoutBuilder::new()
            .layer("default", [("BracketLeft", "^"), ("KeyB", "b"), ("KeyC", "c")])
            .dead_keys("default", ["^"])
            .transform(["^", "b", "c"], "â"),
    );

    assert_eq!(
        press_all(&mut engine, &["BracketLeft", "KeyB", "KeyC"]),
        vec![KeyOutput::Suppress, KeyOutput::Suppress, emit("â")]
    );

    // the intermediate node cannot be completed by the wrong key
    assert_eq!(
        press_all(&mut engine, &["BracketLeft", "KeyB", "KeyB", "KeyC"]),
        vec![KeyOutput::Suppress, KeyOutput::Suppress, KeyOutput::Suppress, emit("c")]
    );
}

#[test]
fn test_identical_sequences_give_identical_outputs() {
    let sequence = ["Quote", "KeyE", "KeyA", "Quote", "KeyX", "Quote", "Quote", "KeyE"];
    let mut engine = engine_for(acute_layout());

    let first = press_all(&mut engine, &sequence);
    let second = press_all(&mut engine, &sequence);
    assert_eq!(first, second);

    let mut fresh = engine_for(acute_layout());
    assert_eq!(press_all(&mut fresh, &sequence), first);
}

#[test]
fn test_unmapped_key_passes_through() {
    let mut engine = engine_for(acute_layout());
    assert_eq!(press(&mut engine, "F5"), KeyOutput::PassThrough);
}

#[test]
fn test_unmapped_key_keeps_composition() {
    let mut engine = engine_for(acute_layout());

    press(&mut engine, "Quote");
    assert_eq!(press(&mut engine, "ArrowLeft"), KeyOutput::PassThrough);
    assert!(engine.is_composing());
    assert_eq!(press(&mut engine, "KeyE"), emit("é"));
}

fn quote_dead_key() -> LayoutBuilder {
    LayoutBuilder::new()
        .layer("default", [("Quote", "'"), ("KeyA", "a"), ("KeyB", "b"), ("KeyZ", "z")])
        .dead_keys("default", ["'"])
}

#[test]
fn test_leaf_root_starts_composition() {
    let mut engine = engine_for(quote_dead_key().transform(["'"], "x"));

    assert_eq!(
        press_all(&mut engine, &["Quote", "KeyA", "KeyA"]),
        vec![KeyOutput::Suppress, KeyOutput::Suppress, emit("a")]
    );
}

#[test]
fn test_empty_root_starts_composition() {
    let mut engine = engine_for(quote_dead_key().transform_branch(["'"]));

    assert_eq!(press(&mut engine, "Quote"), KeyOutput::Suppress);
    assert!(engine.is_composing());
    assert_eq!(press(&mut engine, "KeyA"), KeyOutput::Suppress);
    assert!(!engine.is_composing());
}

#[test]
fn test_empty_inner_node_swallows_next_key() {
    let mut engine = engine_for(
        quote_dead_key()
            .transform_branch(["'", "a"])
            .transform(["'", "z"], "q"),
    );

    assert_eq!(
        press_all(&mut engine, &["Quote", "KeyA", "KeyB", "KeyB"]),
        vec![KeyOutput::Suppress, KeyOutput::Suppress, KeyOutput::Suppress, emit("b")]
    );
    assert_eq!(press_all(&mut engine, &["Quote", "KeyZ"]), vec![KeyOutput::Suppress, emit("q")]);
}
