//! Navigable elements, sections, and landmarks
//!
//! The engine works over pre-declared structure: every focusable unit names
//! its section, every section its landmark, with integer ordering at each
//! level. Nothing is inferred from layout.

use crate::A11yError;
use petal_core::{Announcement, FocusHandle};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Semantic actions an element may declare.
///
/// A closed set: dispatch over anything else is a compile error rather than
/// a runtime misconfiguration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessibilityAction {
    /// Primary action (tap equivalent).
    Activate,
    /// Secondary action (press-and-hold equivalent).
    LongPress,
    ScrollForward,
    ScrollBackward,
}

impl AccessibilityAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::LongPress => "longpress",
            Self::ScrollForward => "scrollforward",
            Self::ScrollBackward => "scrollbackward",
        }
    }
}

/// Top-level region roles, after the WAI-ARIA landmark vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LandmarkRole {
    Main,
    Navigation,
    Banner,
    Complementary,
    ContentInfo,
    Form,
    Search,
}

impl LandmarkRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Navigation => "navigation",
            Self::Banner => "banner",
            Self::Complementary => "complementary",
            Self::ContentInfo => "contentinfo",
            Self::Form => "form",
            Self::Search => "search",
        }
    }
}

/// Handler invoked when a declared action is dispatched.
pub type ActionFn = Arc<dyn Fn() + Send + Sync>;

/// Per-action handlers for one element.
///
/// An action should be declared together with its handler; a declared action
/// without one is a configuration error caught at dispatch.
#[derive(Clone, Default)]
pub struct ActionHandlers {
    pub activate: Option<ActionFn>,
    pub long_press: Option<ActionFn>,
    pub scroll_forward: Option<ActionFn>,
    pub scroll_backward: Option<ActionFn>,
}

impl ActionHandlers {
    pub(crate) fn get(&self, action: AccessibilityAction) -> Option<&ActionFn> {
        match action {
            AccessibilityAction::Activate => self.activate.as_ref(),
            AccessibilityAction::LongPress => self.long_press.as_ref(),
            AccessibilityAction::ScrollForward => self.scroll_forward.as_ref(),
            AccessibilityAction::ScrollBackward => self.scroll_backward.as_ref(),
        }
    }
}

impl fmt::Debug for ActionHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionHandlers")
            .field("activate", &self.activate.is_some())
            .field("long_press", &self.long_press.is_some())
            .field("scroll_forward", &self.scroll_forward.is_some())
            .field("scroll_backward", &self.scroll_backward.is_some())
            .finish()
    }
}

/// One focusable unit exposed to assistive technology.
#[derive(Clone)]
pub struct NavigableElement {
    pub id: String,
    /// Owning section; elements without one sit after all grouped content
    /// and are skipped by section jumps.
    pub section_id: Option<String>,
    /// Tie-break position within the section.
    pub order: i32,
    pub accessible: bool,
    pub focusable: bool,
    pub role: Option<String>,
    pub label: Option<String>,
    pub hint: Option<String>,
    /// Declared capability set.
    pub actions: SmallVec<[AccessibilityAction; 4]>,
    pub(crate) handlers: ActionHandlers,
    pub(crate) sink: FocusHandle,
    /// Registration sequence number, assigned by the registry. Stable
    /// tie-break for equal `order` within a section.
    pub(crate) seq: u64,
}

impl NavigableElement {
    pub fn builder(id: impl Into<String>) -> ElementBuilder {
        ElementBuilder::new(id)
    }

    /// Whether the element belongs in the compiled focus order.
    pub fn is_navigable(&self) -> bool {
        self.accessible && self.focusable
    }

    pub fn supports(&self, action: AccessibilityAction) -> bool {
        self.actions.contains(&action)
    }

    /// Screen-reader payload for a focus change onto this element.
    pub fn announcement(&self) -> Announcement {
        Announcement {
            label: self.label.clone(),
            hint: self.hint.clone(),
            role: self.role.clone(),
        }
    }

    pub(crate) fn focus_sink(&self) -> &FocusHandle {
        &self.sink
    }
}

impl fmt::Debug for NavigableElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigableElement")
            .field("id", &self.id)
            .field("section_id", &self.section_id)
            .field("order", &self.order)
            .field("accessible", &self.accessible)
            .field("focusable", &self.focusable)
            .field("label", &self.label)
            .field("actions", &self.actions)
            .finish_non_exhaustive()
    }
}

/// Builder for [`NavigableElement`].
pub struct ElementBuilder {
    id: String,
    section_id: Option<String>,
    order: i32,
    accessible: bool,
    focusable: bool,
    role: Option<String>,
    label: Option<String>,
    hint: Option<String>,
    actions: SmallVec<[AccessibilityAction; 4]>,
    handlers: ActionHandlers,
    sink: Option<FocusHandle>,
}

impl ElementBuilder {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            section_id: None,
            order: 0,
            accessible: true,
            focusable: true,
            role: None,
            label: None,
            hint: None,
            actions: SmallVec::new(),
            handlers: ActionHandlers::default(),
            sink: None,
        }
    }

    pub fn section(mut self, section_id: impl Into<String>) -> Self {
        self.section_id = Some(section_id.into());
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn accessible(mut self, accessible: bool) -> Self {
        self.accessible = accessible;
        self
    }

    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Declare an action without a handler. Prefer the `on_*` setters, which
    /// declare and wire in one step.
    pub fn action(mut self, action: AccessibilityAction) -> Self {
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
        self
    }

    pub fn on_activate<F: Fn() + Send + Sync + 'static>(mut self, handler: F) -> Self {
        self.handlers.activate = Some(Arc::new(handler));
        self.action(AccessibilityAction::Activate)
    }

    pub fn on_long_press<F: Fn() + Send + Sync + 'static>(mut self, handler: F) -> Self {
        self.handlers.long_press = Some(Arc::new(handler));
        self.action(AccessibilityAction::LongPress)
    }

    pub fn on_scroll_forward<F: Fn() + Send + Sync + 'static>(mut self, handler: F) -> Self {
        self.handlers.scroll_forward = Some(Arc::new(handler));
        self.action(AccessibilityAction::ScrollForward)
    }

    pub fn on_scroll_backward<F: Fn() + Send + Sync + 'static>(mut self, handler: F) -> Self {
        self.handlers.scroll_backward = Some(Arc::new(handler));
        self.action(AccessibilityAction::ScrollBackward)
    }

    /// The platform focus capability. Required.
    pub fn sink(mut self, sink: FocusHandle) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> Result<NavigableElement, A11yError> {
        let Some(sink) = self.sink else {
            return Err(A11yError::InvalidElement {
                id: self.id,
                reason: "no focus sink",
            });
        };

        Ok(NavigableElement {
            id: self.id,
            section_id: self.section_id,
            order: self.order,
            accessible: self.accessible,
            focusable: self.focusable,
            role: self.role,
            label: self.label,
            hint: self.hint,
            actions: self.actions,
            handlers: self.handlers,
            sink,
            seq: 0,
        })
    }
}

/// Ordered index entry for one element inside a section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SectionEntry {
    pub id: String,
    pub order: i32,
    pub seq: u64,
}

/// Mid-level grouping of elements within a landmark.
#[derive(Clone, Debug)]
pub struct NavigableSection {
    pub id: String,
    /// Position among sections within the landmark.
    pub order: i32,
    pub landmark_id: Option<String>,
    /// Whether keyboard sessions surface a skip link to this section.
    pub has_skip_link: bool,
    /// Member element ids, kept sorted by (element order, registration order).
    pub(crate) entries: SmallVec<[SectionEntry; 8]>,
}

impl NavigableSection {
    pub fn new(id: impl Into<String>, order: i32) -> Self {
        Self {
            id: id.into(),
            order,
            landmark_id: None,
            has_skip_link: false,
            entries: SmallVec::new(),
        }
    }

    pub fn with_landmark(mut self, landmark_id: impl Into<String>) -> Self {
        self.landmark_id = Some(landmark_id.into());
        self
    }

    pub fn with_skip_link(mut self) -> Self {
        self.has_skip_link = true;
        self
    }

    /// Member ids in traversal order.
    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn attach(&mut self, entry: SectionEntry) {
        let at = self
            .entries
            .partition_point(|e| (e.order, e.seq) <= (entry.order, entry.seq));
        self.entries.insert(at, entry);
    }

    pub(crate) fn detach(&mut self, id: &str) {
        self.entries.retain(|e| e.id != id);
    }
}

/// Top-level named region of the UI.
#[derive(Clone, Debug)]
pub struct NavigableLandmark {
    pub id: String,
    pub role: LandmarkRole,
    /// Position among landmarks.
    pub order: i32,
    /// Owned section ids (membership, not traversal order).
    pub(crate) sections: SmallVec<[String; 4]>,
}

impl NavigableLandmark {
    pub fn new(id: impl Into<String>, role: LandmarkRole, order: i32) -> Self {
        Self {
            id: id.into(),
            role,
            order,
            sections: SmallVec::new(),
        }
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.as_str())
    }

    pub(crate) fn attach_section(&mut self, id: &str) {
        if !self.sections.iter().any(|s| s == id) {
            self.sections.push(id.to_string());
        }
    }

    pub(crate) fn detach_section(&mut self, id: &str) {
        self.sections.retain(|s| s != id);
    }
}
