//! Engine configuration
//!
//! Read once at engine construction; the keyboard-navigation gate comes from
//! the host's accessibility settings screen.

use petal_core::AccessibilitySettings;
use serde::{Deserialize, Serialize};

/// Focus engine configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Master gate. When false the engine registers nothing and every public
    /// call is a no-op returning `false`.
    pub keyboard_navigation: bool,
    /// Whether element navigation wraps past either end of the order.
    pub wrap: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            keyboard_navigation: true,
            wrap: true,
        }
    }
}

impl EngineConfig {
    /// Build from the host's accessibility settings.
    pub fn from_settings(settings: &dyn AccessibilitySettings) -> Self {
        Self {
            keyboard_navigation: settings.keyboard_navigation_enabled(),
            ..Default::default()
        }
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petal_core::StaticSettings;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert!(config.keyboard_navigation);
        assert!(config.wrap);
    }

    #[test]
    fn from_settings_carries_the_gate() {
        let config = EngineConfig::from_settings(&StaticSettings::new(false));
        assert!(!config.keyboard_navigation);
        assert!(config.wrap);
    }

    #[test]
    fn parses_partial_toml() {
        let config: EngineConfig = toml::from_str("wrap = false").unwrap();
        assert!(config.keyboard_navigation);
        assert!(!config.wrap);
    }
}
