#![forbid(unsafe_code)]

//! textgrip public facade crate.
//!
//! Re-exports the types a host needs to run a two-handle text selection
//! and offers a prelude for day-to-day usage.
//!
//! ```
//! use textgrip::prelude::*;
//!
//! let layout = GridLayout::new("hello world", 80, WrapMode::Word).with_cell_size(10.0, 20.0);
//! let mut session = SelectionSession::new(GripConfig::default())?
//!     .with_layout(layout)
//!     .with_surface(Surface::new(Point::new(0.0, 100.0), 200.0, 400.0));
//!
//! let events = session.select_at(Point::new(54.0, 5.0));
//! assert!(events.contains(&SelectionEvent::SelectionChanged { content: " w".into() }));
//! # Ok::<(), GripError>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use textgrip_core::config::{GripConfig, MenuConfig};
pub use textgrip_core::error::{GripError, Result};
pub use textgrip_core::event::{PointerEvent, PointerPhase};
pub use textgrip_core::geometry::{Point, Rect, Size};

// --- Text re-exports -------------------------------------------------------

pub use textgrip_text::{
    GridLayout, GridLine, OffsetResolver, TextLayout, WrapMode, resolve_precise,
    resolve_with_hysteresis,
};

// --- Widget re-exports -----------------------------------------------------

pub use textgrip_widgets::{Clamp, MenuMetrics, PopupGeometry, Surface, place_popup};

// --- Selection re-exports --------------------------------------------------

pub use textgrip_select::{
    HandleId, HandleState, Role, SelectionEvent, SelectionInput, SelectionModel, SelectionSession,
    SelectionSpan,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        GridLayout, GripConfig, GripError, HandleId, Point, PointerEvent, Result, Role,
        SelectionEvent, SelectionInput, SelectionSession, Surface, TextLayout, WrapMode,
    };

    pub use crate::{select, text, widgets};
}

pub use textgrip_core as core;
pub use textgrip_select as select;
pub use textgrip_text as text;
pub use textgrip_widgets as widgets;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn prelude_drives_a_drag() {
        let layout = GridLayout::new("hello world", 80, WrapMode::Word).with_cell_size(10.0, 20.0);
        let mut session = SelectionSession::new(GripConfig::default())
            .expect("default config is valid")
            .with_layout(layout)
            .with_surface(Surface::new(Point::new(30.0, 100.0), 200.0, 400.0));

        session.process(&SelectionInput::SelectAll);
        let grabbed = session.handle_at(Point::new(30.0, 130.0));
        assert_eq!(grabbed, Some(HandleId::First));

        session.handle_event(HandleId::First, PointerEvent::down(30.0, 130.0));
        session.handle_event(HandleId::First, PointerEvent::moved(90.0, 130.0));
        session.handle_event(HandleId::First, PointerEvent::up(90.0, 130.0));
        assert_eq!(session.model().content(), Some("world"));
    }

    #[test]
    fn module_aliases_reach_crates() {
        let config = crate::core::GripConfig::default();
        assert_eq!(crate::widgets::MenuMetrics::from_config(&config).width, 308.0);
        assert_eq!(crate::text::GridLayout::new("ab", 4, WrapMode::None).char_count(), 2);
        assert_eq!(crate::select::HandleId::First.partner(), HandleId::Second);
    }
}
