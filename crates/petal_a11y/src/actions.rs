//! Accessibility action dispatch
//!
//! Routes a named action to the target element's handler, after validating
//! it against the element's declared capability set. Dispatch is orthogonal
//! to focus movement: it never touches the navigation cursor.

use crate::element::{AccessibilityAction, NavigableElement};
use crate::A11yError;

/// Dispatch `action` to `element`. Returns `false` (after logging) if the
/// action is not declared, or declared without a handler; errors are
/// reported, never thrown.
pub(crate) fn dispatch(element: &NavigableElement, action: AccessibilityAction) -> bool {
    if !element.supports(action) {
        let err = A11yError::UnsupportedAction {
            id: element.id.clone(),
            action,
        };
        tracing::warn!(error = %err, "action rejected");
        return false;
    }

    match element.handlers.get(action) {
        Some(handler) => {
            tracing::trace!(id = %element.id, action = action.as_str(), "action dispatched");
            handler();
            true
        }
        None => {
            // Declared action with no handler is a wiring bug in the widget
            debug_assert!(
                false,
                "element {} declares {:?} but has no handler",
                element.id, action
            );
            tracing::warn!(id = %element.id, action = action.as_str(), "declared action has no handler");
            false
        }
    }
}
