#![forbid(unsafe_code)]

//! Input and output channels of a [`SelectionSession`](crate::SelectionSession).
//!
//! The host feeds [`SelectionInput`] values and applies the returned
//! [`SelectionEvent`]s to its UI in order.

use textgrip_core::event::PointerEvent;
use textgrip_core::geometry::Point;
use textgrip_widgets::PopupGeometry;

use crate::handle::{HandleId, Role};

/// Something that happened to the text surface or a handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionInput {
    /// Long press on the text, in text space.
    LongPress(Point),
    /// Select the default number of characters starting under a text-space
    /// point.
    SelectAt(Point),
    /// Select the whole text.
    SelectAll,
    /// Click on the text.
    Tap,
    /// Pointer sample on a handle, in screen space.
    Handle { handle: HandleId, event: PointerEvent },
    /// The surface or one of its ancestors scrolled.
    Scroll,
    /// The surface is about to draw a frame.
    Redraw,
    /// Touch anywhere outside the text surface.
    OutsideTouch,
    /// Hide the action menu, keeping the selection.
    DismissPopup,
    /// Drop the selection.
    Reset,
}

/// UI update requested by the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// The selected text changed.
    SelectionChanged { content: String },
    /// Show (or move) the action menu.
    ShowPopup(PopupGeometry),
    /// Hide the action menu.
    HidePopup,
    /// Show (or move) a handle glyph. `(x, y)` is the top-left of the glyph
    /// box in screen space.
    PositionHandle {
        handle: HandleId,
        role: Role,
        left_visual: bool,
        x: f32,
        y: f32,
    },
    /// Hide both handle glyphs.
    HideHandles,
    /// Everything is selected and the menu is suppressed; the host may show
    /// its own.
    SelectAllCustomPopup,
    /// Hide the host's own menu shown after [`SelectAllCustomPopup`](Self::SelectAllCustomPopup).
    DismissCustomPopup,
    /// A scroll happened while a selection exists.
    Scrolling,
    /// The selection was dropped.
    Reset,
    /// A tap dismissed the selection while no menu was showing.
    Dismissed,
    /// A tap on the text, forwarded.
    Clicked,
    /// A long press on the text, forwarded.
    LongPressed,
}
