#![forbid(unsafe_code)]

//! Two-handle text selection.
//!
//! - [`span::SelectionModel`] keeps the ordered span and its text.
//! - [`handle`] holds the per-handle binding and the drag state machine,
//!   including crossing detection.
//! - [`session::SelectionSession`] ties both to a layout, resolves pointer
//!   samples, and emits [`event::SelectionEvent`]s for the host UI.

pub mod event;
pub mod handle;
pub mod session;
pub mod span;

pub use event::{SelectionEvent, SelectionInput};
pub use handle::{DragContext, DragState, DragStep, HandleId, HandleState, Role};
pub use session::SelectionSession;
pub use span::{SelectionModel, SelectionSpan};
