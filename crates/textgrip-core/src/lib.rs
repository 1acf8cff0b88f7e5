#![forbid(unsafe_code)]

//! Core: geometry, pointer input, configuration and errors.
//!
//! # Role in textgrip
//! `textgrip-core` is the leaf crate. It owns the pixel-space geometry types
//! shared by the layout adapter, the placement engine and the selection
//! session, the pointer events the platform glue feeds in, and the
//! [`GripConfig`](config::GripConfig) every session is built from.
//!
//! # How it fits in the system
//! `textgrip-text` answers layout queries in these coordinates,
//! `textgrip-widgets` places the action menu, and `textgrip-select` drives
//! the two selection handles from [`PointerEvent`](event::PointerEvent)s.

pub mod config;
pub mod error;
pub mod event;
pub mod geometry;

pub use config::{GripConfig, MenuConfig};
pub use error::{GripError, Result};
pub use event::{PointerEvent, PointerPhase};
pub use geometry::{Point, Rect, Size};

// Re-export tracing macros at crate root for ergonomic use.
pub use tracing::{debug, debug_span, error, info, trace, trace_span, warn};
