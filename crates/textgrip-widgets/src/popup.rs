#![forbid(unsafe_code)]

//! Action menu placement relative to a selection span.
//!
//! The menu sits with its bottom edge on the top of the line holding the
//! selection start. Horizontally it centers on the selected run: between
//! the two boundary carets when both share a line, otherwise between the
//! start caret and the surface's right content edge.
//!
//! After centering, the menu is clamped into `[0, viewport_width]`. The
//! pre-clamp position is kept in [`Clamp`] so the arrow keeps pointing at
//! the selection even when the menu body had to move.
//!
//! # Example
//!
//! ```
//! use textgrip_core::geometry::Point;
//! use textgrip_text::{GridLayout, WrapMode};
//! use textgrip_widgets::{MenuMetrics, Surface, place_popup};
//!
//! let layout = GridLayout::new("hello world", 80, WrapMode::Word).with_cell_size(10.0, 20.0);
//! let surface = Surface::new(Point::new(0.0, 100.0), 400.0, 400.0);
//! let metrics = MenuMetrics::new(120.0, 60.0, 16.0, 4.0);
//!
//! let popup = place_popup(&layout, 0, 5, &surface, &metrics);
//! assert_eq!(popup.y, 40.0);
//! ```

use textgrip_core::geometry::{Point, Rect};
use textgrip_text::TextLayout;

use crate::menu::MenuMetrics;

/// Screen-space geometry of the text surface hosting the selection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct Surface {
    /// Screen position of the text content origin.
    pub origin: Point,
    /// Width of the surface.
    pub width: f32,
    /// Right padding between the content and the surface edge.
    pub padding_right: f32,
    /// Width of the screen the menu must stay within.
    pub viewport_width: f32,
}

impl Surface {
    /// A surface without right padding.
    #[must_use]
    pub const fn new(origin: Point, width: f32, viewport_width: f32) -> Self {
        Self {
            origin,
            width,
            padding_right: 0.0,
            viewport_width,
        }
    }

    /// Set the right padding.
    #[must_use]
    pub fn padding_right(mut self, padding: f32) -> Self {
        self.padding_right = padding;
        self
    }

    /// Screen x of the right content edge.
    #[must_use]
    pub fn content_right(&self) -> f32 {
        self.origin.x + self.width - self.padding_right
    }
}

/// How the menu's horizontal position was adjusted to fit the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub enum Clamp {
    /// The centered position fit.
    None,
    /// Pushed right to the viewport's left edge from `raw`.
    Left { raw: f32 },
    /// Pushed left to fit the viewport's right edge from `raw`.
    Right { raw: f32 },
}

/// Computed position of the action menu.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct PopupGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Arrow position measured from the menu's left edge.
    pub arrow_offset: f32,
    pub clamp: Clamp,
}

impl PopupGeometry {
    /// The menu body as a rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Place the action menu for the span `[start, end)`.
///
/// Offsets past the end of the text are clamped. A degenerate span
/// (`start == end`) centers the menu on the single boundary.
#[must_use]
pub fn place_popup<L>(
    layout: &L,
    start: usize,
    end: usize,
    surface: &Surface,
    metrics: &MenuMetrics,
) -> PopupGeometry
where
    L: TextLayout + ?Sized,
{
    let len = layout.char_count();
    debug_assert!(start <= end && end <= len, "span [{start}, {end}) out of bounds (len {len})");
    let end = end.min(len);
    let start = start.min(end);

    let start_line = layout.line_for_offset(start);
    let end_line = layout.line_for_offset(end);
    let start_x = layout.primary_horizontal(start) + surface.origin.x;
    let end_x = layout.primary_horizontal(end) + surface.origin.x;

    let y = (layout.line_top(start_line) + surface.origin.y - metrics.height).max(0.0);

    let centered = if start_line == end_line {
        (start_x + end_x) / 2.0 - metrics.width / 2.0
    } else {
        (start_x + surface.content_right()) / 2.0 - metrics.width / 2.0
    };

    let (x, clamp) = clamp_x(centered, metrics.width, surface.viewport_width);
    let arrow_offset = arrow_offset(x, clamp, metrics);

    #[cfg(feature = "tracing")]
    tracing::debug!(start, end, x, y, ?clamp, arrow_offset, "placed popup");

    PopupGeometry {
        x,
        y,
        width: metrics.width,
        height: metrics.height,
        arrow_offset,
        clamp,
    }
}

/// Clamp x so a menu of `width` stays inside `[0, viewport_width]`.
///
/// A menu wider than the viewport is pinned to 0.
fn clamp_x(x: f32, width: f32, viewport_width: f32) -> (f32, Clamp) {
    if x < 0.0 {
        (0.0, Clamp::Left { raw: x })
    } else if x + width > viewport_width {
        ((viewport_width - width).max(0.0), Clamp::Right { raw: x })
    } else {
        (x, Clamp::None)
    }
}

fn arrow_offset(x: f32, clamp: Clamp, metrics: &MenuMetrics) -> f32 {
    let half = metrics.width / 2.0;
    let offset = match clamp {
        Clamp::None => half - metrics.arrow_inset,
        Clamp::Left { raw } => (raw - x) + half,
        Clamp::Right { raw } => (raw + half) - x - metrics.arrow_inset,
    };
    offset
        .min(metrics.width - metrics.arrow_margin)
        .max(metrics.arrow_margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use textgrip_text::{GridLayout, WrapMode};

    fn metrics() -> MenuMetrics {
        MenuMetrics::new(120.0, 60.0, 16.0, 4.0)
    }

    /// Ten cells of 10px per line, 20px lines.
    fn layout(text: &str) -> GridLayout {
        GridLayout::new(text, 10, WrapMode::Char).with_cell_size(10.0, 20.0)
    }

    #[test]
    fn left_clamp_keeps_arrow_on_selection() {
        // Boundaries at x=10 and x=90 on a 200-wide surface.
        let layout = layout("abcdefghij");
        let surface = Surface::new(Point::ZERO, 200.0, 200.0);
        let popup = place_popup(&layout, 1, 9, &surface, &metrics());
        assert_eq!(popup.x, 0.0);
        assert_eq!(popup.clamp, Clamp::Left { raw: -10.0 });
        assert_eq!(popup.arrow_offset, 50.0);
    }

    #[test]
    fn centered_menu_points_arrow_at_middle() {
        let layout = layout("abcdefghij");
        let surface = Surface::new(Point::new(100.0, 200.0), 200.0, 500.0);
        let popup = place_popup(&layout, 2, 8, &surface, &metrics());
        // Carets at 120 and 180 on screen.
        assert_eq!(popup.x, 90.0);
        assert_eq!(popup.clamp, Clamp::None);
        assert_eq!(popup.arrow_offset, 60.0 - 16.0);
        assert_eq!(popup.y, 140.0);
    }

    #[test]
    fn right_clamp_shifts_menu_inside_viewport() {
        let layout = layout("abcdefghij");
        let surface = Surface::new(Point::new(150.0, 100.0), 100.0, 250.0);
        // Carets at 230 and 250: centered x = 180, right edge 300 > 250.
        let popup = place_popup(&layout, 8, 10, &surface, &metrics());
        assert_eq!(popup.x, 130.0);
        assert_eq!(popup.clamp, Clamp::Right { raw: 180.0 });
        assert_eq!(popup.arrow_offset, 180.0 + 60.0 - 130.0 - 16.0);
    }

    #[test]
    fn arrow_never_overhangs_menu() {
        let layout = layout("abcdefghij");
        // Caret at 1000, past the viewport's right edge.
        let surface = Surface::new(Point::new(900.0, 100.0), 100.0, 980.0);
        let popup = place_popup(&layout, 10, 10, &surface, &metrics());
        assert_eq!(popup.x, 860.0);
        assert_eq!(popup.arrow_offset, 116.0);

        // Caret at 0 against the left edge.
        let surface = Surface::new(Point::new(0.0, 100.0), 100.0, 980.0);
        let popup = place_popup(&layout, 0, 0, &surface, &metrics());
        assert_eq!(popup.x, 0.0);
        assert_eq!(popup.arrow_offset, 4.0);
    }

    #[test]
    fn menu_clamps_to_top_of_screen() {
        let layout = layout("abcdefghij");
        let surface = Surface::new(Point::new(0.0, 10.0), 200.0, 400.0);
        let popup = place_popup(&layout, 0, 2, &surface, &metrics());
        assert_eq!(popup.y, 0.0);
    }

    #[test]
    fn multi_line_centers_on_content_right() {
        // "abcdefghij" / "klm"
        let layout = layout("abcdefghijklm");
        let surface = Surface::new(Point::new(20.0, 300.0), 140.0, 800.0).padding_right(20.0);
        let popup = place_popup(&layout, 4, 12, &surface, &metrics());
        // start caret at 60 on screen, content right at 140.
        assert_eq!(popup.x, 100.0 - 60.0);
        assert_eq!(popup.y, 240.0);
    }

    #[test]
    fn vertical_anchor_uses_start_line() {
        let layout = layout("abcdefghijklm");
        let surface = Surface::new(Point::new(0.0, 300.0), 200.0, 800.0);
        let popup = place_popup(&layout, 11, 12, &surface, &metrics());
        // Line 1 top is 20.
        assert_eq!(popup.y, 300.0 + 20.0 - 60.0);
    }

    #[test]
    fn centered_at_left_edge_is_not_clamped() {
        // Boundaries at x=10 and x=110 center a 120-wide menu exactly on 0.
        let layout = GridLayout::new("abcdefghijkl", 20, WrapMode::Char).with_cell_size(10.0, 20.0);
        let surface = Surface::new(Point::ZERO, 400.0, 400.0);
        let popup = place_popup(&layout, 1, 11, &surface, &metrics());
        assert_eq!(popup.x, 0.0);
        assert_eq!(popup.clamp, Clamp::None);
        assert_eq!(popup.arrow_offset, 44.0);

        let shifted = place_popup(&layout, 2, 12, &surface, &metrics());
        assert_eq!(shifted.x, 10.0);
        assert_eq!(shifted.arrow_offset, popup.arrow_offset);
    }

    #[test]
    fn degenerate_span_centers_on_boundary() {
        let layout = layout("abcdefghij");
        let surface = Surface::new(Point::ZERO, 400.0, 400.0);
        let popup = place_popup(&layout, 9, 9, &surface, &metrics());
        assert_eq!(popup.x, 90.0 - 60.0);
        assert_eq!(popup.clamp, Clamp::None);
    }

    #[test]
    fn narrow_viewport_pins_menu_to_zero() {
        let layout = layout("abcdefghij");
        let surface = Surface::new(Point::new(40.0, 100.0), 60.0, 100.0);
        let popup = place_popup(&layout, 4, 6, &surface, &metrics());
        assert_eq!(popup.x, 0.0);
        assert!(popup.arrow_offset >= 4.0 && popup.arrow_offset <= 116.0);
    }

    #[test]
    fn popup_rect_matches_fields() {
        let layout = layout("abcdefghij");
        let surface = Surface::new(Point::new(0.0, 200.0), 400.0, 400.0);
        let popup = place_popup(&layout, 3, 5, &surface, &metrics());
        assert_eq!(popup.rect(), Rect::new(popup.x, popup.y, 120.0, 60.0));
    }

    #[cfg(feature = "state-persistence")]
    #[test]
    fn geometry_survives_json() {
        let layout = layout("abcdefghij");
        let surface = Surface::new(Point::new(0.0, 200.0), 400.0, 400.0).padding_right(8.0);
        let popup = place_popup(&layout, 0, 2, &surface, &metrics());

        let json = serde_json::to_string(&(surface, popup)).expect("serialize");
        let back: (Surface, PopupGeometry) = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, (surface, popup));
    }
}
