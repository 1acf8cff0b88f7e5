#![forbid(unsafe_code)]

//! Session configuration.
//!
//! [`GripConfig`] collects every tunable of a selection session. It is plain
//! data: construct it with [`Default`] and the builder setters, or load it
//! from JSON with [`GripConfig::from_json_str`]. Missing JSON fields take
//! their default values.
//!
//! Sizes are expressed in density-independent units (`dp`) and converted to
//! pixels with [`GripConfig::dp`].

use serde::{Deserialize, Serialize};

use crate::error::{GripError, Result};

/// Action menu sizing and arrow tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Number of action items shown in the menu (default: 5).
    pub item_count: usize,
    /// Maximum items per menu row (default: 5).
    pub span_count: usize,
    /// Distance between the arrow's drawn origin and its tip (default: 16dp).
    pub arrow_inset_dp: f32,
    /// Minimum distance between the arrow and either menu edge (default: 4dp).
    pub arrow_margin_dp: f32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            item_count: 5,
            span_count: 5,
            arrow_inset_dp: 16.0,
            arrow_margin_dp: 4.0,
        }
    }
}

/// Configuration for a selection session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GripConfig {
    /// Characters selected by a tap-to-select (default: 2).
    pub default_selection_len: usize,
    /// Long press selects the whole text instead of the pressed span (default: true).
    pub select_all_on_long_press: bool,
    /// Suppress the action menu when everything is selected (default: false).
    pub selected_all_no_pop: bool,
    /// Keep the selection across scrolls, re-showing it on the next redraw
    /// (default: true). When disabled a scroll resets the selection.
    pub scroll_show: bool,
    /// Pixels per dp (default: 1.0).
    pub density: f32,
    /// Handle glyph edge length (default: 24dp).
    pub handle_size_dp: f32,
    /// Extra touch slop around each handle glyph (default: 16dp).
    pub handle_padding_dp: f32,
    pub menu: MenuConfig,
}

impl Default for GripConfig {
    fn default() -> Self {
        Self {
            default_selection_len: 2,
            select_all_on_long_press: true,
            selected_all_no_pop: false,
            scroll_show: true,
            density: 1.0,
            handle_size_dp: 24.0,
            handle_padding_dp: 16.0,
            menu: MenuConfig::default(),
        }
    }
}

impl GripConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the placement and handle math cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(GripError::invalid(
                "density",
                format!("must be a positive number, got {}", self.density),
            ));
        }
        if !(self.handle_size_dp.is_finite() && self.handle_size_dp > 0.0) {
            return Err(GripError::invalid(
                "handle_size_dp",
                format!("must be a positive number, got {}", self.handle_size_dp),
            ));
        }
        if !(self.handle_padding_dp.is_finite() && self.handle_padding_dp >= 0.0) {
            return Err(GripError::invalid(
                "handle_padding_dp",
                "must be a non-negative number",
            ));
        }
        if self.menu.span_count == 0 {
            return Err(GripError::invalid("menu.span_count", "must be at least 1"));
        }
        for (field, value) in [
            ("menu.arrow_inset_dp", self.menu.arrow_inset_dp),
            ("menu.arrow_margin_dp", self.menu.arrow_margin_dp),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GripError::invalid(field, "must be a non-negative number"));
            }
        }
        Ok(())
    }

    /// Convert dp to whole pixels, rounding half up.
    #[inline]
    #[must_use]
    pub fn dp(&self, value: f32) -> f32 {
        (value * self.density + 0.5).floor()
    }

    /// Handle glyph edge length in pixels.
    #[must_use]
    pub fn handle_size(&self) -> f32 {
        self.dp(self.handle_size_dp)
    }

    /// Set the tap-to-select length.
    #[must_use]
    pub fn default_selection_len(mut self, len: usize) -> Self {
        self.default_selection_len = len;
        self
    }

    /// Choose whether long press selects everything.
    #[must_use]
    pub fn select_all_on_long_press(mut self, enabled: bool) -> Self {
        self.select_all_on_long_press = enabled;
        self
    }

    /// Suppress the action menu for select-all.
    #[must_use]
    pub fn selected_all_no_pop(mut self, enabled: bool) -> Self {
        self.selected_all_no_pop = enabled;
        self
    }

    /// Keep the selection across scrolls.
    #[must_use]
    pub fn scroll_show(mut self, enabled: bool) -> Self {
        self.scroll_show = enabled;
        self
    }

    /// Set the pixel density.
    #[must_use]
    pub fn density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Set the handle glyph size in dp.
    #[must_use]
    pub fn handle_size_dp(mut self, size: f32) -> Self {
        self.handle_size_dp = size;
        self
    }

    /// Set the menu configuration.
    #[must_use]
    pub fn menu(mut self, menu: MenuConfig) -> Self {
        self.menu = menu;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = GripConfig::default();
        assert_eq!(config.default_selection_len, 2);
        assert!(config.select_all_on_long_press);
        assert!(!config.selected_all_no_pop);
        assert!(config.scroll_show);
        assert_eq!(config.density, 1.0);
        assert_eq!(config.menu.span_count, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn dp_rounds_half_up() {
        let config = GripConfig::default().density(2.75);
        assert_eq!(config.dp(16.0), 44.0);
        assert_eq!(config.dp(1.0), 3.0);
        assert_eq!(GripConfig::default().dp(24.0), 24.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config =
            GripConfig::from_json_str(r#"{ "density": 2.0, "menu": { "item_count": 3 } }"#)
                .expect("valid config");
        assert_eq!(config.density, 2.0);
        assert_eq!(config.menu.item_count, 3);
        assert_eq!(config.menu.span_count, 5);
        assert_eq!(config.default_selection_len, 2);
    }

    #[test]
    fn json_round_trip_preserves_values() {
        let config = GripConfig::default()
            .scroll_show(false)
            .handle_size_dp(30.0);
        let json = config.to_json_string().expect("serializable");
        let back = GripConfig::from_json_str(&json).expect("valid");
        assert_eq!(back, config);
    }

    #[test]
    fn rejects_zero_density() {
        let err = GripConfig::default().density(0.0).validate().unwrap_err();
        assert!(matches!(
            err,
            GripError::InvalidConfig {
                field: "density",
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_span_count() {
        let err = GripConfig::from_json_str(r#"{ "menu": { "span_count": 0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            GripError::InvalidConfig {
                field: "menu.span_count",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_arrow_margin() {
        let config = GripConfig::default().menu(MenuConfig {
            arrow_margin_dp: -1.0,
            ..MenuConfig::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = GripConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, GripError::Json(_)));
    }
}
