//! Capability seams consumed by the focus engine
//!
//! The engine never owns platform focus, speech output, or settings storage.
//! It reaches them through these traits; the host application (or a test)
//! provides the implementations.

use std::sync::Arc;

/// Something that can receive platform focus.
///
/// Widgets expose this for their backing platform view. The engine borrows
/// the capability for the duration of a `focus()` call only; the handle must
/// not be invoked after the owning element unregisters.
pub trait Focusable: Send + Sync {
    /// Move platform focus to this target.
    fn focus(&self);
}

/// Shared handle to a focus target.
pub type FocusHandle = Arc<dyn Focusable>;

/// Payload delivered to the screen reader on a focus change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Announcement {
    pub label: Option<String>,
    pub hint: Option<String>,
    pub role: Option<String>,
}

impl Announcement {
    /// Best single line for a speech queue: label, falling back to role.
    pub fn spoken_text(&self) -> Option<&str> {
        self.label.as_deref().or(self.role.as_deref())
    }
}

/// Screen-reader notification channel.
pub trait Announcer: Send + Sync {
    fn announce(&self, announcement: &Announcement);
}

/// Announcer that drops everything (no screen reader attached).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAnnouncer;

impl Announcer for NullAnnouncer {
    fn announce(&self, _announcement: &Announcement) {}
}

/// Accessibility settings provider.
///
/// Settings live in the host's preference store; the engine reads them once
/// at construction.
pub trait AccessibilitySettings {
    /// Whether keyboard/switch-control navigation is enabled at all.
    fn keyboard_navigation_enabled(&self) -> bool;
}

/// Fixed settings, for tests and hosts without a preference store.
#[derive(Clone, Copy, Debug)]
pub struct StaticSettings {
    keyboard_navigation: bool,
}

impl StaticSettings {
    pub const fn new(keyboard_navigation: bool) -> Self {
        Self { keyboard_navigation }
    }
}

impl AccessibilitySettings for StaticSettings {
    fn keyboard_navigation_enabled(&self) -> bool {
        self.keyboard_navigation
    }
}
