//! Key chord to navigation intent mapping
//!
//! Hosts feed platform key events to [`crate::FocusEngine::handle_key`];
//! this table decides what each chord means. The defaults follow common
//! switch-control/keyboard conventions and can be rebound per app.

use petal_core::{KeyCode, KeyEvent, Modifiers};
use rustc_hash::FxHashMap;

/// What a key chord asks the engine to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavIntent {
    Next,
    Previous,
    NextSection,
    PreviousSection,
    Activate,
    LongPress,
    ScrollForward,
    ScrollBackward,
}

/// Key chord bindings.
#[derive(Debug)]
pub struct ShortcutMap {
    bindings: FxHashMap<(KeyCode, Modifiers), NavIntent>,
}

impl ShortcutMap {
    /// The default binding set.
    pub fn new() -> Self {
        let mut map = Self::empty();
        map.bind(KeyCode::TAB, Modifiers::NONE, NavIntent::Next);
        map.bind(KeyCode::TAB, Modifiers::SHIFT, NavIntent::Previous);
        map.bind(KeyCode::PAGE_DOWN, Modifiers::NONE, NavIntent::NextSection);
        map.bind(KeyCode::PAGE_UP, Modifiers::NONE, NavIntent::PreviousSection);
        map.bind(KeyCode::ENTER, Modifiers::NONE, NavIntent::Activate);
        map.bind(KeyCode::SPACE, Modifiers::NONE, NavIntent::Activate);
        map.bind(KeyCode::ENTER, Modifiers::SHIFT, NavIntent::LongPress);
        map.bind(KeyCode::DOWN, Modifiers::CTRL, NavIntent::ScrollForward);
        map.bind(KeyCode::UP, Modifiers::CTRL, NavIntent::ScrollBackward);
        map
    }

    /// No bindings at all.
    pub fn empty() -> Self {
        Self {
            bindings: FxHashMap::default(),
        }
    }

    /// Bind a chord, replacing any existing binding for it.
    pub fn bind(&mut self, key: KeyCode, modifiers: Modifiers, intent: NavIntent) {
        self.bindings.insert((key, modifiers), intent);
    }

    /// Remove a binding. Returns `false` if the chord was unbound.
    pub fn unbind(&mut self, key: KeyCode, modifiers: Modifiers) -> bool {
        self.bindings.remove(&(key, modifiers)).is_some()
    }

    /// Resolve a key event to an intent, if bound.
    pub fn resolve(&self, event: &KeyEvent) -> Option<NavIntent> {
        self.bindings.get(&(event.key, event.modifiers)).copied()
    }
}

impl Default for ShortcutMap {
    fn default() -> Self {
        Self::new()
    }
}
