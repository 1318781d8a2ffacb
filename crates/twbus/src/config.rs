//! Disclosure panel configuration.
//!
//! [`DisclosureConfig`] carries every timing, threshold, label and selector the
//! controller uses. It can be built in code with the `with_*` setters or loaded
//! from TOML:
//!
//! ```
//! use twbus::DisclosureConfig;
//!
//! let config = DisclosureConfig::from_toml_str(r#"
//!     stagger_interval_ms = 80
//!     transition_duration_ms = 250
//!
//!     [labels]
//!     expand = "Expandir rota"
//!     collapse = "Contrair rota"
//! "#).unwrap();
//!
//! assert_eq!(config.stagger_interval().as_millis(), 80);
//! assert_eq!(config.refractory_window().as_millis(), 50);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::accessibility::AffordanceLabels;
use crate::animation::{Easing, TransitionStyle};
use crate::error::{ConfigError, ConfigResult};

/// Default delay before the first item is revealed.
pub const DEFAULT_BASE_DELAY_MS: u64 = 0;

/// Default extra reveal delay per item ordinal.
pub const DEFAULT_STAGGER_INTERVAL_MS: u64 = 50;

/// Default visual transition duration.
pub const DEFAULT_TRANSITION_DURATION_MS: u64 = 300;

/// Default minimum spacing between two accepted toggle requests.
pub const DEFAULT_REFRACTORY_WINDOW_MS: u64 = 50;

/// Default minimum vertical swipe distance in pixels.
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 50.0;

/// Default delay before re-laying out items after a viewport change.
pub const DEFAULT_RELAYOUT_DELAY_MS: u64 = 200;

/// Default horizontal offset of hidden items.
pub const DEFAULT_HIDDEN_OFFSET_PX: f32 = -20.0;

/// Upper bound accepted by [`DisclosureConfig::validate`] for every `*_ms`
/// field.
pub const MAX_TIMING_MS: u64 = 60_000;

/// Identifiers used to resolve the panel's elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementSelectors {
    /// The panel container.
    pub container: String,
    /// The expand/collapse control.
    pub toggle_control: String,
    /// The extra stops hidden while collapsed.
    pub items: String,
}

impl Default for ElementSelectors {
    fn default() -> Self {
        Self {
            container: ".container".to_string(),
            toggle_control: "#expandBtn".to_string(),
            items: ".stop.extra".to_string(),
        }
    }
}

/// Configuration for a [`DisclosureController`](crate::DisclosureController).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisclosureConfig {
    /// Reveal delay of the first item in milliseconds.
    pub base_delay_ms: u64,
    /// Added reveal delay per item ordinal in milliseconds.
    pub stagger_interval_ms: u64,
    /// Duration of each item's visual transition in milliseconds.
    pub transition_duration_ms: u64,
    /// Minimum spacing between accepted toggle requests in milliseconds.
    pub refractory_window_ms: u64,
    /// Minimum vertical distance for a swipe to request a toggle.
    pub swipe_threshold_px: f32,
    /// Delay before items are re-laid out after a viewport change.
    pub relayout_delay_ms: u64,
    /// Easing curve of item transitions.
    pub easing: Easing,
    /// Horizontal offset of hidden and staged items in pixels.
    pub hidden_offset_px: f32,
    /// Accessible names of the toggle control.
    pub labels: AffordanceLabels,
    /// Element identifiers.
    pub selectors: ElementSelectors,
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            stagger_interval_ms: DEFAULT_STAGGER_INTERVAL_MS,
            transition_duration_ms: DEFAULT_TRANSITION_DURATION_MS,
            refractory_window_ms: DEFAULT_REFRACTORY_WINDOW_MS,
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            relayout_delay_ms: DEFAULT_RELAYOUT_DELAY_MS,
            easing: Easing::default(),
            hidden_offset_px: DEFAULT_HIDDEN_OFFSET_PX,
            labels: AffordanceLabels::default(),
            selectors: ElementSelectors::default(),
        }
    }
}

impl DisclosureConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load_toml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check that every field holds a usable value.
    pub fn validate(&self) -> ConfigResult<()> {
        let timings = [
            ("base_delay_ms", self.base_delay_ms),
            ("stagger_interval_ms", self.stagger_interval_ms),
            ("transition_duration_ms", self.transition_duration_ms),
            ("refractory_window_ms", self.refractory_window_ms),
            ("relayout_delay_ms", self.relayout_delay_ms),
        ];
        for (field, ms) in timings {
            if ms > MAX_TIMING_MS {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be at most {MAX_TIMING_MS}, got {ms}"),
                ));
            }
        }
        if !self.swipe_threshold_px.is_finite() || self.swipe_threshold_px < 0.0 {
            return Err(ConfigError::invalid(
                "swipe_threshold_px",
                format!("must be a non-negative number, got {}", self.swipe_threshold_px),
            ));
        }
        if !self.hidden_offset_px.is_finite() {
            return Err(ConfigError::invalid("hidden_offset_px", "must be finite"));
        }
        if self.labels.expand.trim().is_empty() {
            return Err(ConfigError::invalid("labels.expand", "must not be empty"));
        }
        if self.labels.collapse.trim().is_empty() {
            return Err(ConfigError::invalid("labels.collapse", "must not be empty"));
        }
        let selectors = [
            ("selectors.container", &self.selectors.container),
            ("selectors.toggle_control", &self.selectors.toggle_control),
            ("selectors.items", &self.selectors.items),
        ];
        for (field, selector) in selectors {
            if selector.trim().is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
        }
        Ok(())
    }

    /// Set the reveal delay of the first item.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay_ms = whole_millis(delay);
        self
    }

    /// Set the per-ordinal reveal stagger.
    pub fn with_stagger_interval(mut self, interval: Duration) -> Self {
        self.stagger_interval_ms = whole_millis(interval);
        self
    }

    /// Set the transition duration.
    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration_ms = whole_millis(duration);
        self
    }

    /// Set the refractory window.
    pub fn with_refractory_window(mut self, window: Duration) -> Self {
        self.refractory_window_ms = whole_millis(window);
        self
    }

    /// Set the minimum swipe distance.
    pub fn with_swipe_threshold(mut self, px: f32) -> Self {
        self.swipe_threshold_px = px;
        self
    }

    /// Set the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the control's accessible names.
    pub fn with_labels(mut self, labels: AffordanceLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Set the element identifiers.
    pub fn with_selectors(mut self, selectors: ElementSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Reveal delay of the first item.
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Added reveal delay per item ordinal.
    pub fn stagger_interval(&self) -> Duration {
        Duration::from_millis(self.stagger_interval_ms)
    }

    /// Duration of each item's visual transition.
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    /// Minimum spacing between accepted toggle requests.
    pub fn refractory_window(&self) -> Duration {
        Duration::from_millis(self.refractory_window_ms)
    }

    /// Delay before re-laying out after a viewport change.
    pub fn relayout_delay(&self) -> Duration {
        Duration::from_millis(self.relayout_delay_ms)
    }

    /// Reveal delay of the item at `ordinal`, saturating on overflow.
    pub fn reveal_delay(&self, ordinal: usize) -> Duration {
        let ordinal = u64::try_from(ordinal).unwrap_or(u64::MAX);
        let ms = self
            .stagger_interval_ms
            .saturating_mul(ordinal)
            .saturating_add(self.base_delay_ms);
        Duration::from_millis(ms)
    }

    /// Transition style handed to every item.
    pub fn transition_style(&self) -> TransitionStyle {
        TransitionStyle {
            duration: self.transition_duration(),
            easing: self.easing,
            hidden_offset_px: self.hidden_offset_px,
        }
    }
}

fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DisclosureConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.transition_duration(), Duration::from_millis(300));
        assert_eq!(config.selectors.toggle_control, "#expandBtn");
    }

    #[test]
    fn test_reveal_delay_staggers_by_ordinal() {
        let config = DisclosureConfig::default()
            .with_base_delay(Duration::from_millis(100))
            .with_stagger_interval(Duration::from_millis(50));

        assert_eq!(config.reveal_delay(0), Duration::from_millis(100));
        assert_eq!(config.reveal_delay(2), Duration::from_millis(200));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DisclosureConfig::from_toml_str(
            r#"
            refractory_window_ms = 30
            easing = "ease-in-out"

            [selectors]
            items = ".stop.optional"
            "#,
        )
        .unwrap();

        assert_eq!(config.refractory_window(), Duration::from_millis(30));
        assert_eq!(config.easing, Easing::EaseInOut);
        assert_eq!(config.selectors.items, ".stop.optional");
        assert_eq!(config.selectors.container, ".container");
        assert_eq!(config.stagger_interval_ms, DEFAULT_STAGGER_INTERVAL_MS);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = DisclosureConfig::from_toml_str("swipe_threshold_px = -5.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "swipe_threshold_px",
                ..
            }
        ));

        let err = DisclosureConfig::from_toml_str("[labels]\nexpand = \"  \"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "labels.expand", .. }));
    }

    #[test]
    fn test_timings_are_bounded() {
        let err = DisclosureConfig::from_toml_str("transition_duration_ms = 60001").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "transition_duration_ms",
                ..
            }
        ));
        assert!(DisclosureConfig::from_toml_str("relayout_delay_ms = 60000").is_ok());
    }

    #[test]
    fn test_extreme_durations_saturate() {
        let config = DisclosureConfig::default()
            .with_base_delay(Duration::MAX)
            .with_stagger_interval(Duration::from_millis(u64::MAX));

        assert_eq!(config.base_delay_ms, u64::MAX);
        assert_eq!(config.reveal_delay(0), Duration::from_millis(u64::MAX));
        assert_eq!(config.reveal_delay(usize::MAX), Duration::from_millis(u64::MAX));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = DisclosureConfig::from_toml_str("stagger_interval_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DisclosureConfig::load_toml("/nonexistent/twbus.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.toml");
        std::fs::write(&path, "transition_duration_ms = 120\n").unwrap();

        let config = DisclosureConfig::load_toml(&path).unwrap();
        assert_eq!(config.transition_duration(), Duration::from_millis(120));
    }
}
