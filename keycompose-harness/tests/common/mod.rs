use std::path::PathBuf;

use keycompose_harness::{
    load_descriptor_file, parse_script, CommitLog, ContextId, HostAdapter, LayoutStore, ScriptStep,
};

pub const KEYBOARD: &str = "sme-demo";

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn demo_store() -> LayoutStore {
    load_descriptor_file(&fixture_path("demo.json")).expect("fixture should load")
}

/// Plays a script against the demo keyboard with context 1 focused and
/// returns the commits
pub fn play(script: &str) -> CommitLog {
    let mut host = HostAdapter::new(demo_store(), CommitLog::new());
    host.focus(ContextId(1));

    for step in parse_script(script).expect("script should parse") {
        match step {
            ScriptStep::Focus(context) => host.focus(context),
            ScriptStep::Blur(context) => host.blur(context),
            ScriptStep::Key { stroke, .. } => {
                for event in stroke.events() {
                    host.key_event(KEYBOARD, &event);
                }
            }
        }
    }

    host.into_sink()
}

/// Text committed to context 1
pub fn typed(script: &str) -> String {
    play(script).text_for(ContextId(1))
}
