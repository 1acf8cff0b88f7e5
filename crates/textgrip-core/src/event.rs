#![forbid(unsafe_code)]

//! Pointer input delivered by the platform glue.
//!
//! Coordinates are screen space. The platform is responsible for routing a
//! pointer sequence that began on a handle to that handle until the sequence
//! ends with `Up` or `Cancel`.

use crate::geometry::Point;

/// Phase of a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Pointer pressed.
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released.
    Up,
    /// The platform cancelled the sequence (e.g. a parent intercepted it).
    Cancel,
}

impl PointerPhase {
    /// Whether this phase ends the pointer sequence.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Up | Self::Cancel)
    }
}

/// A single pointer sample in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub pos: Point,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(phase: PointerPhase, pos: Point) -> Self {
        Self { phase, pos }
    }

    /// Pointer pressed at `(x, y)`.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Down, Point::new(x, y))
    }

    /// Pointer moved to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Move, Point::new(x, y))
    }

    /// Pointer released at `(x, y)`.
    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Up, Point::new(x, y))
    }

    /// Pointer sequence cancelled at `(x, y)`.
    #[must_use]
    pub const fn cancel(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Cancel, Point::new(x, y))
    }
}
