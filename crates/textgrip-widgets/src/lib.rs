#![forbid(unsafe_code)]

//! Floating action menu geometry for text selections.
//!
//! - [`menu::MenuMetrics`] sizes the menu from its item count.
//! - [`popup::place_popup`] anchors the menu above a selection span and
//!   computes where its arrow points.

pub mod menu;
pub mod popup;

pub use menu::MenuMetrics;
pub use popup::{Clamp, PopupGeometry, Surface, place_popup};
