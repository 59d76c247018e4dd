//! The focus engine facade
//!
//! One long-lived instance per app, owned by the root composition and passed
//! down explicitly. Single-threaded and synchronous: every entry point runs
//! to completion before the next, and every registry mutation recompiles the
//! focus order before returning.

use crate::actions;
use crate::config::EngineConfig;
use crate::element::{
    AccessibilityAction, NavigableElement, NavigableLandmark, NavigableSection,
};
use crate::input::{NavIntent, ShortcutMap};
use crate::navigation::{self, Direction, NavigationState};
use crate::order::compile_focus_order;
use crate::registry::ElementRegistry;
use petal_core::{Announcer, KeyEvent, ListenerRegistry, ListenerToken, NullAnnouncer};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::sync::Arc;

/// Emitted to subscribers on every successful focus movement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusChange {
    pub from: Option<String>,
    pub to: String,
    /// Whether the movement originated from a key event.
    pub keyboard: bool,
}

/// Read-only counts for the settings screen and the WCAG compliance scorer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub elements: usize,
    pub navigable_elements: usize,
    pub sections: usize,
    /// Sections with at least one element in the compiled order.
    pub populated_sections: usize,
    pub landmarks: usize,
    pub history_depth: usize,
    pub keyboard_mode: bool,
}

/// Accessibility focus navigation engine.
///
/// Not internally locked: hosts that dispatch UI callbacks from multiple
/// threads must serialize access externally (a mutex around the instance is
/// sufficient).
pub struct FocusEngine {
    config: EngineConfig,
    registry: ElementRegistry,
    order: Vec<String>,
    state: NavigationState,
    shortcuts: ShortcutMap,
    announcer: Arc<dyn Announcer>,
    listeners: ListenerRegistry<FocusChange>,
    stopped: bool,
}

impl FocusEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_announcer(config, Arc::new(NullAnnouncer))
    }

    pub fn with_announcer(config: EngineConfig, announcer: Arc<dyn Announcer>) -> Self {
        tracing::debug!(
            enabled = config.keyboard_navigation,
            wrap = config.wrap,
            "focus engine created"
        );
        Self {
            config,
            registry: ElementRegistry::new(),
            order: Vec::new(),
            state: NavigationState::default(),
            shortcuts: ShortcutMap::new(),
            announcer,
            listeners: ListenerRegistry::new(),
            stopped: false,
        }
    }

    /// Whether the engine accepts calls at all (settings gate, not stopped).
    pub fn is_enabled(&self) -> bool {
        self.config.keyboard_navigation && !self.stopped
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_announcer(&mut self, announcer: Arc<dyn Announcer>) {
        self.announcer = announcer;
    }

    pub fn shortcuts_mut(&mut self) -> &mut ShortcutMap {
        &mut self.shortcuts
    }

    // ========== Registration ==========

    pub fn register_element(&mut self, element: NavigableElement) -> bool {
        if !self.is_enabled() {
            return false;
        }
        match self.registry.register(element) {
            Ok(()) => {
                self.order = compile_focus_order(&self.registry);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "element registration rejected");
                false
            }
        }
    }

    /// Unregister an element. If it was focused, the cursor moves to the
    /// element now occupying its old position (else the new last element,
    /// else idle).
    pub fn unregister_element(&mut self, id: &str) -> bool {
        if !self.is_enabled() {
            return false;
        }

        let was_current = self.state.current() == Some(id);
        let old_pos = self.order.iter().position(|o| o == id);

        if self.registry.unregister(id).is_none() {
            return false;
        }
        self.order = compile_focus_order(&self.registry);

        if was_current {
            let successor = old_pos
                .and_then(|pos| self.order.get(pos).or_else(|| self.order.last()))
                .cloned();
            match successor {
                Some(target) => {
                    let keyboard = self.state.keyboard_mode_active();
                    self.apply_focus(&target, keyboard);
                }
                None => {
                    self.state.drop_cursor();
                    tracing::debug!(id, "focused element removed, cursor idle");
                }
            }
        }
        true
    }

    pub fn register_section(&mut self, section: NavigableSection) -> bool {
        if !self.is_enabled() {
            return false;
        }
        match self.registry.register_section(section) {
            Ok(()) => {
                self.order = compile_focus_order(&self.registry);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "section registration rejected");
                false
            }
        }
    }

    pub fn unregister_section(&mut self, id: &str) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let removed = self.registry.unregister_section(id);
        if removed {
            self.order = compile_focus_order(&self.registry);
        }
        removed
    }

    pub fn register_landmark(&mut self, landmark: NavigableLandmark) -> bool {
        if !self.is_enabled() {
            return false;
        }
        match self.registry.register_landmark(landmark) {
            Ok(()) => {
                self.order = compile_focus_order(&self.registry);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "landmark registration rejected");
                false
            }
        }
    }

    pub fn unregister_landmark(&mut self, id: &str) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let removed = self.registry.unregister_landmark(id);
        if removed {
            self.order = compile_focus_order(&self.registry);
        }
        removed
    }

    // ========== Navigation ==========

    pub fn navigate_next(&mut self) -> bool {
        self.run_intent(NavIntent::Next, false)
    }

    pub fn navigate_previous(&mut self) -> bool {
        self.run_intent(NavIntent::Previous, false)
    }

    pub fn navigate_next_section(&mut self) -> bool {
        self.run_intent(NavIntent::NextSection, false)
    }

    pub fn navigate_previous_section(&mut self) -> bool {
        self.run_intent(NavIntent::PreviousSection, false)
    }

    /// Focus a specific element directly, if it is in the compiled order.
    pub fn navigate_to_element(&mut self, id: &str) -> bool {
        if !self.is_enabled() {
            return false;
        }
        if !self.order.iter().any(|o| o == id) {
            return false;
        }
        let id = id.to_string();
        self.apply_focus(&id, false);
        true
    }

    /// Focus the first focusable element of the first non-empty section
    /// belonging to the landmark.
    pub fn navigate_to_landmark(&mut self, id: &str) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let target =
            navigation::landmark_target(&self.order, &self.registry, id).map(str::to_string);
        match target {
            Some(target) => {
                self.apply_focus(&target, false);
                true
            }
            None => false,
        }
    }

    /// Handle a platform key event. The only path that marks the session
    /// keyboard-driven.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let Some(intent) = self.shortcuts.resolve(event) else {
            return false;
        };
        self.state.mark_keyboard();
        self.run_intent(intent, true)
    }

    fn run_intent(&mut self, intent: NavIntent, keyboard: bool) -> bool {
        if !self.is_enabled() || self.order.is_empty() {
            return false;
        }

        let target = match intent {
            NavIntent::Next => {
                navigation::next_target(&self.order, self.state.current(), self.config.wrap)
            }
            NavIntent::Previous => {
                navigation::previous_target(&self.order, self.state.current(), self.config.wrap)
            }
            NavIntent::NextSection => navigation::section_target(
                &self.order,
                &self.registry,
                self.state.current(),
                Direction::Forward,
            ),
            NavIntent::PreviousSection => navigation::section_target(
                &self.order,
                &self.registry,
                self.state.current(),
                Direction::Backward,
            ),
            NavIntent::Activate => {
                return self.execute_on_current(AccessibilityAction::Activate);
            }
            NavIntent::LongPress => {
                return self.execute_on_current(AccessibilityAction::LongPress);
            }
            NavIntent::ScrollForward => {
                return self.execute_on_current(AccessibilityAction::ScrollForward);
            }
            NavIntent::ScrollBackward => {
                return self.execute_on_current(AccessibilityAction::ScrollBackward);
            }
        }
        .map(str::to_string);

        match target {
            Some(target) => {
                self.apply_focus(&target, keyboard);
                true
            }
            None => false,
        }
    }

    /// Move the cursor with full side effects: platform focus, announcement,
    /// history, listeners.
    fn apply_focus(&mut self, id: &str, keyboard: bool) {
        let Some(element) = self.registry.lookup(id) else {
            return;
        };
        let sink = element.focus_sink().clone();
        let announcement = element.announcement();
        let from = self.state.current().map(str::to_string);

        sink.focus();
        self.announcer.announce(&announcement);
        self.state.focus(id);
        self.listeners.emit(&FocusChange {
            from,
            to: id.to_string(),
            keyboard,
        });
        tracing::debug!(id, keyboard, "focus moved");
    }

    // ========== Actions ==========

    /// Dispatch an accessibility action to an element. Never moves focus.
    pub fn execute_action(&self, id: &str, action: AccessibilityAction) -> bool {
        if !self.is_enabled() {
            return false;
        }
        match self.registry.lookup(id) {
            Some(element) => actions::dispatch(element, action),
            None => {
                tracing::trace!(id, "action target not registered");
                false
            }
        }
    }

    fn execute_on_current(&self, action: AccessibilityAction) -> bool {
        match self.state.current() {
            Some(id) => {
                let id = id.to_string();
                self.execute_action(&id, action)
            }
            None => false,
        }
    }

    // ========== Listeners ==========

    /// Subscribe to focus changes; release with [`Self::unsubscribe`].
    pub fn on_focus_change<F>(&mut self, handler: F) -> ListenerToken
    where
        F: Fn(&FocusChange) + Send + 'static,
    {
        self.listeners.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, token: ListenerToken) -> bool {
        self.listeners.unsubscribe(token)
    }

    // ========== Introspection ==========

    pub fn navigation_state(&self) -> &NavigationState {
        &self.state
    }

    /// The compiled focus order.
    pub fn focus_order(&self) -> &[String] {
        &self.order
    }

    /// Navigable elements, in focus order.
    pub fn navigable_elements(&self) -> Vec<&NavigableElement> {
        self.order
            .iter()
            .filter_map(|id| self.registry.lookup(id))
            .collect()
    }

    /// Registered sections, sorted by order then id.
    pub fn navigable_sections(&self) -> Vec<&NavigableSection> {
        let mut sections: Vec<&NavigableSection> = self.registry.sections().collect();
        sections.sort_by_key(|s| (s.order, s.id.as_str()));
        sections
    }

    /// Registered landmarks, sorted by order then id.
    pub fn navigable_landmarks(&self) -> Vec<&NavigableLandmark> {
        let mut landmarks: Vec<&NavigableLandmark> = self.registry.landmarks().collect();
        landmarks.sort_by_key(|l| (l.order, l.id.as_str()));
        landmarks
    }

    /// Skip-link targets for the current session: `(section id, first
    /// element id)` per skip-linked section, in focus order. Empty until the
    /// session is keyboard-driven.
    pub fn skip_targets(&self) -> Vec<(String, String)> {
        if !self.is_enabled() || !self.state.keyboard_mode_active() {
            return Vec::new();
        }

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut targets = Vec::new();
        for id in &self.order {
            let Some(section) = self
                .registry
                .lookup(id)
                .and_then(|e| self.registry.section_of(e))
            else {
                continue;
            };
            if section.has_skip_link && seen.insert(section.id.as_str()) {
                targets.push((section.id.clone(), id.clone()));
            }
        }
        targets
    }

    /// Counts consumed by the WCAG compliance scorer and diagnostics UI.
    pub fn diagnostics(&self) -> Diagnostics {
        let populated: FxHashSet<&str> = self
            .order
            .iter()
            .filter_map(|id| self.registry.lookup(id))
            .filter_map(|e| self.registry.section_of(e))
            .map(|s| s.id.as_str())
            .collect();

        Diagnostics {
            elements: self.registry.element_count(),
            navigable_elements: self.order.len(),
            sections: self.registry.section_count(),
            populated_sections: populated.len(),
            landmarks: self.registry.landmark_count(),
            history_depth: self.state.history_len(),
            keyboard_mode: self.state.keyboard_mode_active(),
        }
    }

    // ========== Teardown ==========

    /// Drop every element. Sections, landmarks, history, and the keyboard
    /// flag survive; the cursor goes idle.
    pub fn clear_elements(&mut self) {
        if !self.is_enabled() {
            return;
        }
        self.registry.clear_elements();
        self.order.clear();
        self.state.drop_cursor();
    }

    /// Full teardown: registry, cursor, history, and listeners are cleared
    /// and the engine stops accepting calls.
    pub fn stop(&mut self) {
        self.registry.clear_all();
        self.order.clear();
        self.state.reset();
        self.listeners.clear();
        self.stopped = true;
        tracing::debug!("focus engine stopped");
    }
}
