//! Host side of the engine: one engine per input context, text committed
//! through a sink

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use keycompose_core::{KeyEvent, KeyOutput, KeyboardEngine, LayoutStore};

/// Identifies a text field (input context) on the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(pub u64);

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Receives committed text
pub trait TextSink {
    fn commit_text(&mut self, context: ContextId, text: &str);
}

/// Sink that records every commit in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitLog {
    pub commits: Vec<(ContextId, String)>,
}

impl CommitLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenated text committed to one context
    pub fn text_for(&self, context: ContextId) -> String {
        self.commits
            .iter()
            .filter(|(ctx, _)| *ctx == context)
            .map(|(_, text)| text.as_str())
            .collect()
    }
}

impl TextSink for CommitLog {
    fn commit_text(&mut self, context: ContextId, text: &str) {
        self.commits.push((context, text.to_string()));
    }
}

/// Routes key events from the focused context to its engine
pub struct HostAdapter<S: TextSink> {
    layouts: Arc<LayoutStore>,
    engines: HashMap<ContextId, KeyboardEngine>,
    focused: Option<ContextId>,
    sink: S,
}

impl<S: TextSink> HostAdapter<S> {
    pub fn new(layouts: impl Into<Arc<LayoutStore>>, sink: S) -> Self {
        Self {
            layouts: layouts.into(),
            engines: HashMap::new(),
            focused: None,
            sink,
        }
    }

    /// Makes `context` the target of key events, creating its engine on
    /// first focus
    pub fn focus(&mut self, context: ContextId) {
        log::debug!("Focus {}", context);
        let layouts = &self.layouts;
        self.engines
            .entry(context)
            .or_insert_with(|| KeyboardEngine::new(Arc::clone(layouts)));
        self.focused = Some(context);
    }

    /// Drops the context's engine, discarding any pending composition
    pub fn blur(&mut self, context: ContextId) {
        log::debug!("Blur {}", context);
        self.engines.remove(&context);
        if self.focused == Some(context) {
            self.focused = None;
        }
    }

    pub fn focused(&self) -> Option<ContextId> {
        self.focused
    }

    /// Feeds one key event to the focused context.
    ///
    /// Returns true when the host must not apply its default handling.
    pub fn key_event(&mut self, keyboard: &str, event: &KeyEvent) -> bool {
        self.dispatch(keyboard, event).is_handled()
    }

    /// Like [`key_event`](Self::key_event), but returns the engine's decision
    pub fn dispatch(&mut self, keyboard: &str, event: &KeyEvent) -> KeyOutput {
        let Some(context) = self.focused else {
            log::debug!("No focused context for {}", event.code);
            return KeyOutput::PassThrough;
        };
        let Some(engine) = self.engines.get_mut(&context) else {
            return KeyOutput::PassThrough;
        };

        let output = engine.process_key_event(keyboard, event);
        if let KeyOutput::Emit(text) = &output {
            self.sink.commit_text(context, text);
        }
        output
    }

    pub fn engine(&self, context: ContextId) -> Option<&KeyboardEngine> {
        self.engines.get(&context)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keycompose_core::LayoutBuilder;
    use pretty_assertions::assert_eq;

    fn adapter() -> HostAdapter<CommitLog> {
        let layout = LayoutBuilder::new()
            .layer("default", [("KeyA", "a"), ("KeyE", "e"), ("Quote", "'")])
            .dead_keys("default", ["'"])
            .transform(["'", "e"], "é")
            .build()
            .unwrap();
        let mut store = LayoutStore::new();
        store.insert("kb", layout);
        HostAdapter::new(store, CommitLog::new())
    }

    #[test]
    fn test_unfocused_events_are_unhandled() {
        let mut host = adapter();
        assert!(!host.key_event("kb", &KeyEvent::down("KeyA")));
        assert!(host.sink().commits.is_empty());
    }

    #[test]
    fn test_compositions_are_per_context() {
        let mut host = adapter();
        host.focus(ContextId(1));
        assert!(host.key_event("kb", &KeyEvent::down("Quote")));

        host.focus(ContextId(2));
        assert!(host.key_event("kb", &KeyEvent::down("KeyE")));

        host.focus(ContextId(1));
        assert!(host.key_event("kb", &KeyEvent::down("KeyE")));

        let log = host.into_sink();
        assert_eq!(log.text_for(ContextId(1)), "é");
        assert_eq!(log.text_for(ContextId(2)), "e");
    }

    #[test]
    fn test_blur_discards_composition() {
        let mut host = adapter();
        host.focus(ContextId(1));
        host.key_event("kb", &KeyEvent::down("Quote"));
        assert!(host.engine(ContextId(1)).unwrap().is_composing());

        host.blur(ContextId(1));
        assert_eq!(host.focused(), None);
        assert!(host.engine(ContextId(1)).is_none());

        host.focus(ContextId(1));
        host.key_event("kb", &KeyEvent::down("KeyE"));
        assert_eq!(host.sink().text_for(ContextId(1)), "e");
    }
}
