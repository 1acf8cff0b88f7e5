#![forbid(unsafe_code)]

//! A cell-grid [`TextLayout`] for monospace and terminal-style surfaces.
//!
//! [`GridLayout`] wraps text into visual lines of at most `width` cells and
//! answers layout queries by scaling cell columns and rows to pixels. Cell
//! widths come from `unicode-width` (CJK and emoji take two cells), and
//! cursor steps respect grapheme clusters.
//!
//! # Example
//! ```
//! use textgrip_text::grid::{GridLayout, WrapMode};
//! use textgrip_text::TextLayout;
//!
//! let layout = GridLayout::new("hello world", 6, WrapMode::Char);
//! assert_eq!(layout.line_count(), 2);
//! assert_eq!(layout.line_for_offset(6), 1);
//! ```

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use crate::layout::TextLayout;

/// Text wrapping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// No wrapping: only hard newlines end a line.
    None,
    /// Wrap after whitespace when possible, falling back to characters.
    #[default]
    Word,
    /// Wrap at any character.
    Char,
}

/// A single visual line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLine {
    /// Character range covered by the line, including a terminating `\n`.
    pub range: Range<usize>,
    /// Display width in cells, excluding a terminating `\n`.
    pub width: usize,
    /// True if the line continues a source line that was wrapped.
    pub is_wrap: bool,
}

/// Wrapped text on a fixed cell grid.
#[derive(Debug, Clone)]
pub struct GridLayout {
    text: String,
    wrap: WrapMode,
    width: usize,
    cell_width: f32,
    line_height: f32,
    /// Byte offset of each char, plus the text length.
    char_bytes: Vec<usize>,
    /// Cell column of every insertion point on the line that owns it.
    columns: Vec<usize>,
    /// Insertion points that fall on grapheme boundaries.
    boundaries: Vec<bool>,
    lines: Vec<GridLine>,
}

impl GridLayout {
    /// Lay out `text` wrapped at `width` cells, with one pixel per cell.
    #[must_use]
    pub fn new(text: impl Into<String>, width: usize, wrap: WrapMode) -> Self {
        let mut layout = Self {
            text: text.into(),
            wrap,
            width,
            cell_width: 1.0,
            line_height: 1.0,
            char_bytes: Vec::new(),
            columns: Vec::new(),
            boundaries: Vec::new(),
            lines: Vec::new(),
        };
        layout.rebuild();
        layout
    }

    /// Scale cells to pixels.
    #[must_use]
    pub fn with_cell_size(mut self, cell_width: f32, line_height: f32) -> Self {
        self.cell_width = cell_width;
        self.line_height = line_height;
        self
    }

    /// Replace the text and recompute layout.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.rebuild();
    }

    /// Update the wrap width and recompute layout.
    pub fn set_width(&mut self, width: usize) {
        if self.width != width {
            self.width = width;
            self.rebuild();
        }
    }

    /// Update wrap mode and recompute layout.
    pub fn set_wrap(&mut self, wrap: WrapMode) {
        if self.wrap != wrap {
            self.wrap = wrap;
            self.rebuild();
        }
    }

    /// Current wrap width in cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Current wrap mode.
    #[must_use]
    pub const fn wrap_mode(&self) -> WrapMode {
        self.wrap
    }

    /// Width of one cell in pixels.
    #[must_use]
    pub const fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Height of one line in pixels.
    #[must_use]
    pub const fn line_height(&self) -> f32 {
        self.line_height
    }

    /// All visual lines.
    #[must_use]
    pub fn lines(&self) -> &[GridLine] {
        &self.lines
    }

    /// Text of a visual line without its terminating newline.
    #[must_use]
    pub fn line_text(&self, line: usize) -> &str {
        let Some(line) = self.lines.get(line) else {
            return "";
        };
        self.substring(line.range.start, line.range.end)
            .trim_end_matches('\n')
    }

    fn clamp_offset(&self, offset: usize) -> usize {
        let len = self.char_bytes.len() - 1;
        debug_assert!(offset <= len, "offset {offset} out of bounds (len {len})");
        offset.min(len)
    }

    fn clamp_line(&self, line: usize) -> usize {
        debug_assert!(line < self.lines.len(), "line {line} out of bounds");
        line.min(self.lines.len() - 1)
    }

    fn rebuild(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let widths: Vec<usize> = chars
            .iter()
            .map(|&c| if c == '\n' { 0 } else { c.width().unwrap_or(0) })
            .collect();

        self.char_bytes = self
            .text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(self.text.len()))
            .collect();

        self.boundaries = vec![false; chars.len() + 1];
        for (byte, _) in self.text.grapheme_indices(true) {
            if let Ok(idx) = self.char_bytes.binary_search(&byte) {
                self.boundaries[idx] = true;
            }
        }
        self.boundaries[chars.len()] = true;

        self.lines = break_lines(&chars, &widths, self.width, self.wrap);

        self.columns = vec![0; chars.len() + 1];
        for line in &mut self.lines {
            let mut col = 0;
            self.columns[line.range.start] = 0;
            for idx in line.range.clone() {
                col += widths[idx];
                self.columns[idx + 1] = col;
            }
            line.width = col;
        }
    }
}

/// Split `chars` into visual lines.
fn break_lines(chars: &[char], widths: &[usize], width: usize, wrap: WrapMode) -> Vec<GridLine> {
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut col = 0;
    let mut last_break: Option<usize> = None;
    let mut is_wrap = false;
    let wraps = wrap != WrapMode::None && width > 0;

    let mut idx = 0;
    while idx < chars.len() {
        let ch = chars[idx];
        if ch == '\n' {
            lines.push(GridLine {
                range: line_start..idx + 1,
                width: 0,
                is_wrap,
            });
            line_start = idx + 1;
            col = 0;
            last_break = None;
            is_wrap = false;
            idx += 1;
            continue;
        }

        let w = widths[idx];
        let hangs = wrap == WrapMode::Word && ch.is_whitespace();
        if wraps && col > 0 && col + w > width && !hangs {
            let brk = match (wrap, last_break) {
                (WrapMode::Word, Some(b)) if b > line_start => b,
                _ => idx,
            };
            lines.push(GridLine {
                range: line_start..brk,
                width: 0,
                is_wrap,
            });
            col = widths[brk..idx].iter().sum();
            line_start = brk;
            last_break = None;
            is_wrap = true;
            continue;
        }

        col += w;
        if wrap == WrapMode::Word && ch.is_whitespace() {
            last_break = Some(idx + 1);
        }
        idx += 1;
    }

    lines.push(GridLine {
        range: line_start..chars.len(),
        width: 0,
        is_wrap,
    });
    lines
}

impl TextLayout for GridLayout {
    fn text(&self) -> &str {
        &self.text
    }

    fn char_count(&self) -> usize {
        self.char_bytes.len() - 1
    }

    fn substring(&self, start: usize, end: usize) -> &str {
        let start = self.clamp_offset(start);
        let end = self.clamp_offset(end).max(start);
        &self.text[self.char_bytes[start]..self.char_bytes[end]]
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_for_vertical(&self, y: f32) -> usize {
        if y <= 0.0 || self.line_height <= 0.0 {
            return 0;
        }
        let line = (y / self.line_height).floor() as usize;
        line.min(self.lines.len() - 1)
    }

    fn line_for_offset(&self, offset: usize) -> usize {
        let offset = self.clamp_offset(offset);
        self.lines
            .partition_point(|line| line.range.start <= offset)
            .saturating_sub(1)
    }

    fn offset_for_horizontal(&self, line: usize, x: f32) -> usize {
        let line_idx = self.clamp_line(line);
        let range = &self.lines[line_idx].range;
        let last = if line_idx + 1 == self.lines.len() {
            range.end
        } else {
            range.end.saturating_sub(1).max(range.start)
        };

        let mut best = range.start;
        let mut best_dist = f32::INFINITY;
        for offset in range.start..=last {
            if !self.boundaries[offset] {
                continue;
            }
            let dist = (self.columns[offset] as f32 * self.cell_width - x).abs();
            if dist < best_dist {
                best = offset;
                best_dist = dist;
            }
        }
        best
    }

    fn primary_horizontal(&self, offset: usize) -> f32 {
        let offset = self.clamp_offset(offset);
        self.columns[offset] as f32 * self.cell_width
    }

    fn line_top(&self, line: usize) -> f32 {
        self.clamp_line(line) as f32 * self.line_height
    }

    fn line_bottom(&self, line: usize) -> f32 {
        (self.clamp_line(line) + 1) as f32 * self.line_height
    }

    fn line_right(&self, line: usize) -> f32 {
        self.lines[self.clamp_line(line)].width as f32 * self.cell_width
    }

    fn offset_to_left_of(&self, offset: usize) -> usize {
        let offset = self.clamp_offset(offset);
        (0..offset)
            .rev()
            .find(|&idx| self.boundaries[idx])
            .unwrap_or(0)
    }
}
