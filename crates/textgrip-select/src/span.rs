#![forbid(unsafe_code)]

//! The selection model: an ordered pair of offsets and the text between them.
//!
//! # Invariants
//!
//! 1. `start <= end` after every [`SelectionModel::set_span`].
//! 2. `content` is exactly `text[start..end]` of the layout passed to the
//!    last `set_span`, recomputed in the same call.
//! 3. After [`SelectionModel::clear`] there is no content until the next
//!    `set_span`. The offsets are kept so a later `set_span` may leave one
//!    boundary untouched.

use textgrip_text::TextLayout;

use crate::handle::Role;

/// A selected run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSpan {
    pub start: usize,
    pub end: usize,
    pub content: String,
}

impl SelectionSpan {
    /// Number of selected characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span selects nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Holds the current selection span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    start: usize,
    end: usize,
    content: Option<String>,
}

impl SelectionModel {
    /// An empty, inactive model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update one or both boundaries and recompute the content.
    ///
    /// `None` keeps the current boundary. Reversed boundaries are swapped.
    /// Offsets past the end of the text are a caller bug: they assert in
    /// debug builds and clamp in release builds.
    pub fn set_span<L>(&mut self, start: Option<usize>, end: Option<usize>, layout: &L) -> &str
    where
        L: TextLayout + ?Sized,
    {
        if let Some(start) = start {
            self.start = start;
        }
        if let Some(end) = end {
            self.end = end;
        }
        if self.start > self.end {
            std::mem::swap(&mut self.start, &mut self.end);
        }

        let len = layout.char_count();
        debug_assert!(
            self.end <= len,
            "span [{}, {}) out of bounds (len {len})",
            self.start,
            self.end
        );
        self.end = self.end.min(len);
        self.start = self.start.min(self.end);

        let content = self
            .content
            .insert(layout.substring(self.start, self.end).to_owned());
        content.as_str()
    }

    /// Drop the content. Offsets are retained.
    pub fn clear(&mut self) {
        self.content = None;
    }

    /// Whether a selection is active.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.content.is_some()
    }

    #[inline]
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// The boundary bound to `role`.
    #[inline]
    #[must_use]
    pub const fn boundary(&self, role: Role) -> usize {
        match role {
            Role::Start => self.start,
            Role::End => self.end,
        }
    }

    /// Selected text, or `None` when inactive.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Snapshot of the active span.
    #[must_use]
    pub fn span(&self) -> Option<SelectionSpan> {
        self.content.as_ref().map(|content| SelectionSpan {
            start: self.start,
            end: self.end,
            content: content.clone(),
        })
    }
}
