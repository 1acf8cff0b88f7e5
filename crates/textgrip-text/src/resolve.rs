#![forbid(unsafe_code)]

//! Pointer → character offset resolution.
//!
//! Two entry points map a text-space point to an insertion offset:
//!
//! - [`OffsetResolver::precise`] for the first touch that starts a
//!   selection. It never reports an offset whose caret lies right of the
//!   pointer.
//! - [`OffsetResolver::with_hysteresis`] for every drag sample after that.
//!   It takes the offset the dragged boundary currently sits on and applies
//!   two wrapped-line corrections plus vertical hysteresis.
//!
//! # Why the wrapped-line corrections exist
//!
//! On a wrapped line, "after the last character" and "before the first
//! character of the next line" are the same offset, and layouts report it on
//! the next line. Without correction the last character of a visual line
//! cannot be selected unless the pointer moves to the next line. The
//! resolver compares the pointer against the midpoint of the last character
//! to decide which of the two meanings the user wants, on input (the previous
//! offset) and on output (the new offset).
//!
//! Both functions are pure given the layout: the same inputs always produce
//! the same offset.

use textgrip_core::geometry::Point;
use tracing::trace;

use crate::layout::TextLayout;

/// Resolve a first touch, or `None` when no layout is available yet.
#[must_use]
pub fn resolve_precise<L>(layout: Option<&L>, pos: Point) -> Option<usize>
where
    L: TextLayout + ?Sized,
{
    layout.map(|layout| OffsetResolver::new(layout).precise(pos))
}

/// Resolve a drag sample, or `None` when no layout is available yet.
#[must_use]
pub fn resolve_with_hysteresis<L>(layout: Option<&L>, pos: Point, previous: usize) -> Option<usize>
where
    L: TextLayout + ?Sized,
{
    layout.map(|layout| OffsetResolver::new(layout).with_hysteresis(pos, previous))
}

/// Offset resolution against a ready layout.
#[derive(Debug, Clone, Copy)]
pub struct OffsetResolver<'a, L: ?Sized> {
    layout: &'a L,
}

impl<'a, L> OffsetResolver<'a, L>
where
    L: TextLayout + ?Sized,
{
    /// Create a resolver over `layout`.
    #[must_use]
    pub const fn new(layout: &'a L) -> Self {
        Self { layout }
    }

    /// Offset under a first touch at `pos`.
    ///
    /// Picks the insertion point nearest to `pos.x` on the line under
    /// `pos.y`, stepping one character left if that caret lies right of the
    /// pointer. The step never leaves the line.
    #[must_use]
    pub fn precise(&self, pos: Point) -> usize {
        let layout = self.layout;
        let line = layout.line_for_vertical(pos.y);
        let offset = layout.offset_for_horizontal(line, pos.x);
        if layout.primary_horizontal(offset) <= pos.x {
            return offset;
        }
        let left = layout.offset_to_left_of(offset);
        if left < offset && layout.line_for_offset(left) == line {
            left
        } else {
            offset
        }
    }

    /// Offset under a drag sample at `pos`, given the offset the dragged
    /// boundary currently occupies.
    #[must_use]
    pub fn with_hysteresis(&self, pos: Point, previous: usize) -> usize {
        let layout = self.layout;
        let len = layout.char_count();
        debug_assert!(previous <= len, "previous offset {previous} out of bounds (len {len})");
        let mut previous = previous.min(len);

        let mut line = layout.line_for_vertical(pos.y);

        // A previous offset on a wrapped line start may really mean "after
        // the last character of the line above".
        if layout.is_line_start_after_wrap(previous) {
            let above = layout.line_for_offset(previous - 1);
            if past_last_char_midpoint(layout, previous - 1, above, pos.x) {
                trace!(previous, line = above, "previous offset read as end of line");
                previous -= 1;
            }
        }

        let previous_line = layout.line_for_offset(previous);
        let top = layout.line_top(previous_line);
        let bottom = layout.line_bottom(previous_line);
        let threshold = (bottom - top) / 2.0;

        let just_below = line == previous_line + 1 && pos.y - bottom < threshold;
        let just_above = previous_line > 0 && line == previous_line - 1 && top - pos.y < threshold;
        if just_below || just_above {
            trace!(line, previous_line, y = pos.y, "hysteresis keeps previous line");
            line = previous_line;
        }

        let mut offset = layout.offset_for_horizontal(line, pos.x);

        // Let the last character of a wrapped line be selected without the
        // caret jumping to the next line. The next call undoes this through
        // the input correction above.
        if offset + 1 < len
            && layout.is_line_start_after_wrap(offset + 1)
            && past_last_char_midpoint(layout, offset, line, pos.x)
        {
            trace!(offset, line, "advancing past last character of line");
            offset += 1;
        }

        offset
    }
}

/// Whether `x` lies right of the midpoint between the caret at `last_char`
/// and the right edge of `line`.
fn past_last_char_midpoint<L>(layout: &L, last_char: usize, line: usize, x: f32) -> bool
where
    L: TextLayout + ?Sized,
{
    let left = layout.primary_horizontal(last_char);
    let right = layout.line_right(line);
    let threshold = (right - left) / 2.0;
    x > right - threshold
}
