use keycompose_core::{KeyOutput, KeyboardEngine, LayoutBuilder, LayoutStore, ModifierState};

pub const KEYBOARD: &str = "test";

/// Wraps one layout under the `test` keyboard id in a fresh engine
pub fn engine_for(builder: LayoutBuilder) -> KeyboardEngine {
    let layout = builder.build().expect("layout should build");
    let mut store = LayoutStore::new();
    store.insert(KEYBOARD, layout);
    KeyboardEngine::new(store)
}

/// Layout with a plain letter row and an apostrophe dead key
pub fn acute_layout() -> LayoutBuilder {
    LayoutBuilder::new()
        .layer("default", [("KeyA", "a"), ("KeyE", "e"), ("KeyX", "x"), ("Quote", "'")])
        .layer("shift", [("KeyA", "A"), ("KeyE", "E")])
        .dead_keys("default", ["'"])
        .transform(["'", "e"], "é")
        .transform(["'", "E"], "É")
}

pub fn press(engine: &mut KeyboardEngine, code: &str) -> KeyOutput {
    engine.resolve_key_down(KEYBOARD, code, ModifierState::default())
}

pub fn press_with(engine: &mut KeyboardEngine, code: &str, modifiers: ModifierState) -> KeyOutput {
    engine.resolve_key_down(KEYBOARD, code, modifiers)
}

/// Presses each code without modifiers and collects the outputs
pub fn press_all(engine: &mut KeyboardEngine, codes: &[&str]) -> Vec<KeyOutput> {
    codes.iter().map(|code| press(engine, code)).collect()
}

pub fn emit(text: &str) -> KeyOutput {
    KeyOutput::emit(text)
}
