#![forbid(unsafe_code)]

//! Action menu sizing.
//!
//! The menu is a grid of fixed-size items: `52dp` per item, `12dp` gutters,
//! at most `span_count` items per row.

use textgrip_core::config::GripConfig;

const ITEM_DP: f32 = 52.0;
const GUTTER_DP: f32 = 12.0;
/// Room for the arrow below the last row.
const ARROW_ROOM_DP: f32 = 5.0;

/// Pixel dimensions of the action menu and its arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct MenuMetrics {
    pub width: f32,
    pub height: f32,
    /// Distance between the arrow's drawn origin and its tip.
    pub arrow_inset: f32,
    /// Minimum distance between the arrow and either menu edge.
    pub arrow_margin: f32,
}

impl MenuMetrics {
    /// Explicit dimensions, in pixels.
    #[must_use]
    pub const fn new(width: f32, height: f32, arrow_inset: f32, arrow_margin: f32) -> Self {
        Self {
            width,
            height,
            arrow_inset,
            arrow_margin,
        }
    }

    /// Size the menu for `config.menu.item_count` items at `config.density`.
    #[must_use]
    pub fn from_config(config: &GripConfig) -> Self {
        let menu = &config.menu;
        let span = menu.span_count.max(1);
        let columns = menu.item_count.min(span) as f32;
        let rows = menu.item_count.div_ceil(span) as f32;

        Self {
            width: config.dp(GUTTER_DP * 4.0 + ITEM_DP * columns),
            height: config.dp(GUTTER_DP * (1.0 + rows) + ITEM_DP * rows + ARROW_ROOM_DP),
            arrow_inset: config.dp(menu.arrow_inset_dp),
            arrow_margin: config.dp(menu.arrow_margin_dp),
        }
    }
}

impl Default for MenuMetrics {
    fn default() -> Self {
        Self::from_config(&GripConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textgrip_core::config::MenuConfig;

    #[test]
    fn default_menu_is_one_row_of_five() {
        let metrics = MenuMetrics::default();
        assert_eq!(metrics.width, 308.0);
        assert_eq!(metrics.height, 81.0);
        assert_eq!(metrics.arrow_inset, 16.0);
        assert_eq!(metrics.arrow_margin, 4.0);
    }

    #[test]
    fn items_wrap_into_rows() {
        let config = GripConfig::default().menu(MenuConfig {
            item_count: 7,
            span_count: 3,
            ..MenuConfig::default()
        });
        let metrics = MenuMetrics::from_config(&config);
        // 3 columns, 3 rows.
        assert_eq!(metrics.width, 48.0 + 156.0);
        assert_eq!(metrics.height, 48.0 + 156.0 + 5.0);
    }

    #[test]
    fn fewer_items_than_span_shrink_width() {
        let config = GripConfig::default().menu(MenuConfig {
            item_count: 2,
            ..MenuConfig::default()
        });
        let metrics = MenuMetrics::from_config(&config);
        assert_eq!(metrics.width, 48.0 + 104.0);
        assert_eq!(metrics.height, 81.0);
    }

    #[test]
    fn density_scales_and_rounds() {
        let metrics = MenuMetrics::from_config(&GripConfig::default().density(1.5));
        assert_eq!(metrics.width, 462.0);
        assert_eq!(metrics.height, 122.0);
        assert_eq!(metrics.arrow_inset, 24.0);
        assert_eq!(metrics.arrow_margin, 6.0);
    }

    #[test]
    fn empty_menu_keeps_gutters() {
        let config = GripConfig::default().menu(MenuConfig {
            item_count: 0,
            ..MenuConfig::default()
        });
        let metrics = MenuMetrics::from_config(&config);
        assert_eq!(metrics.width, 48.0);
        assert_eq!(metrics.height, 17.0);
    }
}
