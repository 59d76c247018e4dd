//! Petal Focus Navigation Engine
//!
//! Tracks every interactive element a screen exposes to assistive
//! technology, groups them into sections and landmarks, compiles a
//! deterministic traversal order, and drives keyboard/switch-control
//! navigation over it.
//!
//! The engine is deliberately declarative: elements are registered with an
//! explicit `(section, landmark, order)` placement as their widgets mount,
//! and unregistered on unmount. Every mutation recompiles the focus order
//! synchronously, so navigation always sees a consistent sequence.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use petal_a11y::{EngineConfig, FocusEngine, NavigableElement};
//! use petal_core::Focusable;
//!
//! struct ViewRef;
//! impl Focusable for ViewRef {
//!     fn focus(&self) {}
//! }
//!
//! let mut engine = FocusEngine::new(EngineConfig::default());
//!
//! let element = NavigableElement::builder("save-button")
//!     .order(1)
//!     .label("Save")
//!     .sink(Arc::new(ViewRef))
//!     .build()
//!     .unwrap();
//!
//! assert!(engine.register_element(element));
//! assert!(engine.navigate_next());
//! assert_eq!(engine.navigation_state().current(), Some("save-button"));
//! ```

pub mod actions;
pub mod config;
pub mod element;
pub mod engine;
pub mod input;
pub mod navigation;
pub mod order;
pub mod registry;

pub use config::EngineConfig;
pub use element::{
    AccessibilityAction, ActionFn, ActionHandlers, ElementBuilder, LandmarkRole,
    NavigableElement, NavigableLandmark, NavigableSection,
};
pub use engine::{Diagnostics, FocusChange, FocusEngine};
pub use input::{NavIntent, ShortcutMap};
pub use navigation::{NavigationState, FOCUS_HISTORY_LIMIT};
pub use order::compile_focus_order;
pub use registry::ElementRegistry;

/// Accessibility engine error.
///
/// All variants are recoverable: the engine logs them and surfaces a boolean
/// failure to callers, never a panic.
#[derive(Debug, thiserror::Error)]
pub enum A11yError {
    /// A second registration reused an existing id; the registry is unchanged.
    #[error("id already registered: {0}")]
    DuplicateId(String),

    /// The element cannot participate in focus navigation as declared.
    #[error("invalid element {id}: {reason}")]
    InvalidElement { id: String, reason: &'static str },

    /// The action is not in the element's declared capability set.
    #[error("action {action:?} not declared for element {id}")]
    UnsupportedAction {
        id: String,
        action: AccessibilityAction,
    },
}
