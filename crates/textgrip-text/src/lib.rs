#![forbid(unsafe_code)]

//! Text layout queries and pointer → offset resolution.
//!
//! - [`layout::TextLayout`] is the query interface a host implements over
//!   its own laid out text.
//! - [`grid::GridLayout`] is a ready-made implementation for cell grids.
//! - [`resolve`] maps pointer positions to character offsets, including the
//!   hysteresis used while a handle is dragged.

pub mod grid;
pub mod layout;
pub mod resolve;

pub use grid::{GridLayout, GridLine, WrapMode};
pub use layout::TextLayout;
pub use resolve::{OffsetResolver, resolve_precise, resolve_with_hysteresis};
