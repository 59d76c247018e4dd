//! Petal Core Runtime Seams
//!
//! This crate provides the host-facing primitives the Petal UI kit builds on:
//!
//! - **Capabilities**: traits the focus engine consumes but never owns
//!   (platform focus, screen-reader announcements, accessibility settings)
//! - **Key Input**: platform-agnostic key codes and modifier state
//! - **Listeners**: subscribe/unsubscribe registries with owned tokens
//!
//! # Example
//!
//! ```rust
//! use petal_core::listener::ListenerRegistry;
//!
//! let mut registry: ListenerRegistry<String> = ListenerRegistry::new();
//!
//! let token = registry.subscribe(|msg| {
//!     println!("got: {msg}");
//! });
//!
//! registry.emit(&"hello".to_string());
//! registry.unsubscribe(token);
//! ```

pub mod capability;
pub mod events;
pub mod listener;

pub use capability::{
    AccessibilitySettings, Announcement, Announcer, FocusHandle, Focusable, NullAnnouncer,
    StaticSettings,
};
pub use events::{KeyCode, KeyEvent, Modifiers};
pub use listener::{ListenerRegistry, ListenerToken};
