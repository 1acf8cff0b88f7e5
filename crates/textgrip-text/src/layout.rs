#![forbid(unsafe_code)]

//! The layout query interface consumed by the selection core.
//!
//! A [`TextLayout`] wraps an already computed, line-wrapped text layout.
//! Rendering and shaping happen elsewhere; the selection core only asks
//! geometric questions about the result.
//!
//! # Boundary semantics
//!
//! Implementations follow the conventions of mainstream platform layouts,
//! and the offset resolver relies on them:
//!
//! - An offset equal to the first character of a wrapped line belongs to that
//!   line, not to the end of the previous one. `line_for_offset(len)` is the
//!   last line.
//! - [`offset_for_horizontal`](TextLayout::offset_for_horizontal) never
//!   returns the insertion point after the last character of a non-final
//!   line, because that offset already belongs to the next line.
//! - [`primary_horizontal`](TextLayout::primary_horizontal) is the leading
//!   caret edge on the line reported by `line_for_offset`.
//!
//! Offsets are `char` indices into [`text`](TextLayout::text).

/// Geometric queries against a line-wrapped text layout.
pub trait TextLayout {
    /// The laid out text.
    fn text(&self) -> &str;

    /// Text length in characters.
    fn char_count(&self) -> usize {
        self.text().chars().count()
    }

    /// The substring covering character offsets `[start, end)`.
    ///
    /// Offsets past the end are clamped.
    fn substring(&self, start: usize, end: usize) -> &str {
        let text = self.text();
        let byte_at = |offset: usize| {
            text.char_indices()
                .nth(offset)
                .map_or(text.len(), |(byte, _)| byte)
        };
        let start = byte_at(start);
        let end = byte_at(end).max(start);
        &text[start..end]
    }

    /// Number of visual lines (at least 1, even for empty text).
    fn line_count(&self) -> usize;

    /// Line whose vertical band contains `y`, clamped to the first/last line.
    fn line_for_vertical(&self, y: f32) -> usize;

    /// Line containing `offset`.
    fn line_for_offset(&self, offset: usize) -> usize;

    /// Insertion point on `line` nearest to `x`.
    fn offset_for_horizontal(&self, line: usize, x: f32) -> usize;

    /// Leading caret x of `offset`.
    fn primary_horizontal(&self, offset: usize) -> f32;

    /// Top edge of `line`.
    fn line_top(&self, line: usize) -> f32;

    /// Bottom edge of `line`.
    fn line_bottom(&self, line: usize) -> f32;

    /// Right edge of the ink on `line`.
    fn line_right(&self, line: usize) -> f32;

    /// The insertion point one cursor step left of `offset`.
    fn offset_to_left_of(&self, offset: usize) -> usize;

    /// Whether `offset` starts a line that follows another line, making it
    /// ambiguous with "after the last character of the previous line".
    fn is_line_start_after_wrap(&self, offset: usize) -> bool {
        offset > 0 && self.line_for_offset(offset) == self.line_for_offset(offset - 1) + 1
    }
}
