//! Navigation cursor and target selection
//!
//! The cursor is a two-state machine: `Idle` (nothing focused) or focused on
//! one id from the compiled order. Target selection is pure; the engine
//! applies side effects (sink, announcer, history, listeners) only once a
//! target is chosen, so failed navigation leaves everything untouched.

use crate::registry::ElementRegistry;
use std::collections::VecDeque;

/// Maximum number of ids retained in the focus history.
pub const FOCUS_HISTORY_LIMIT: usize = 10;

/// Direction of a section jump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// The engine's live cursor.
#[derive(Clone, Debug, Default)]
pub struct NavigationState {
    current: Option<String>,
    history: VecDeque<String>,
    keyboard_mode: bool,
}

impl NavigationState {
    /// Currently focused element id; `None` while idle.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// The last focused ids, oldest first, at most [`FOCUS_HISTORY_LIMIT`].
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(|s| s.as_str())
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// True once any keyboard-originated navigation event has occurred.
    /// Distinguishes touch-first from keyboard-first sessions for
    /// affordances such as visible skip links.
    pub fn keyboard_mode_active(&self) -> bool {
        self.keyboard_mode
    }

    /// Move the cursor and record the step in history.
    pub(crate) fn focus(&mut self, id: &str) {
        self.current = Some(id.to_string());
        if self.history.len() == FOCUS_HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(id.to_string());
    }

    /// Drop the cursor without touching history.
    pub(crate) fn drop_cursor(&mut self) {
        self.current = None;
    }

    pub(crate) fn mark_keyboard(&mut self) {
        self.keyboard_mode = true;
    }

    pub(crate) fn reset(&mut self) {
        self.current = None;
        self.history.clear();
        self.keyboard_mode = false;
    }
}

/// Next element in the order, honoring the wrap policy. `None` means the
/// operation fails and the cursor must not move.
pub(crate) fn next_target<'a>(
    order: &'a [String],
    current: Option<&str>,
    wrap: bool,
) -> Option<&'a str> {
    let first = order.first()?;
    let Some(current) = current else {
        return Some(first);
    };
    match order.iter().position(|id| id == current) {
        Some(pos) if pos + 1 < order.len() => Some(&order[pos + 1]),
        Some(_) if wrap => Some(first),
        Some(_) => None,
        // Cursor not in order: treat as idle
        None => Some(first),
    }
}

/// Previous element in the order, honoring the wrap policy.
pub(crate) fn previous_target<'a>(
    order: &'a [String],
    current: Option<&str>,
    wrap: bool,
) -> Option<&'a str> {
    let last = order.last()?;
    let Some(current) = current else {
        return Some(last);
    };
    match order.iter().position(|id| id == current) {
        Some(pos) if pos > 0 => Some(&order[pos - 1]),
        Some(_) if wrap => Some(last),
        Some(_) => None,
        None => Some(last),
    }
}

/// First element of the adjacent section in the given direction.
///
/// Sections with zero focusable elements have no presence in the compiled
/// order, so they are skipped without ever counting as a stop. Elements
/// outside any registered section never terminate the scan.
pub(crate) fn section_target<'a>(
    order: &'a [String],
    registry: &ElementRegistry,
    current: Option<&str>,
    direction: Direction,
) -> Option<&'a str> {
    if order.is_empty() {
        return None;
    }

    let current_section = current
        .and_then(|id| registry.lookup(id))
        .and_then(|e| registry.section_of(e))
        .map(|s| s.id.clone());

    // Idle cursors sit conceptually before the first element (forward scan)
    // or after the last (backward scan).
    let position = current.and_then(|id| order.iter().position(|o| o == id));

    let candidate = match direction {
        Direction::Forward => {
            let start = position.map(|p| p + 1).unwrap_or(0);
            order[start..]
                .iter()
                .find(|id| is_section_boundary(registry, id, current_section.as_deref()))
        }
        Direction::Backward => {
            let end = position.unwrap_or(order.len());
            order[..end]
                .iter()
                .rev()
                .find(|id| is_section_boundary(registry, id, current_section.as_deref()))
        }
    }?;

    // Land on the section's first focusable element, not the scan hit
    let section_id = registry
        .lookup(candidate)
        .and_then(|e| registry.section_of(e))
        .map(|s| s.id.clone())?;
    first_of_section(order, registry, &section_id)
}

/// First focusable element of the first non-empty section owned by the
/// landmark.
pub(crate) fn landmark_target<'a>(
    order: &'a [String],
    registry: &ElementRegistry,
    landmark_id: &str,
) -> Option<&'a str> {
    order
        .iter()
        .find(|id| {
            registry
                .lookup(id)
                .and_then(|e| registry.landmark_of(e))
                .is_some_and(|l| l.id == landmark_id)
        })
        .map(|s| s.as_str())
}

fn is_section_boundary(
    registry: &ElementRegistry,
    id: &str,
    current_section: Option<&str>,
) -> bool {
    registry
        .lookup(id)
        .and_then(|e| registry.section_of(e))
        .is_some_and(|s| Some(s.id.as_str()) != current_section)
}

fn first_of_section<'a>(
    order: &'a [String],
    registry: &ElementRegistry,
    section_id: &str,
) -> Option<&'a str> {
    order
        .iter()
        .find(|id| {
            registry
                .lookup(id)
                .and_then(|e| registry.section_of(e))
                .is_some_and(|s| s.id == section_id)
        })
        .map(|s| s.as_str())
}
