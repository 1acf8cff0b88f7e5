#![forbid(unsafe_code)]

//! Selection handles and the per-gesture drag state machine.
//!
//! Each of the two handles carries a [`HandleState`]: which boundary it
//! drives ([`Role`]) and which side of the caret its glyph is drawn on.
//! Both change together when a drag crosses the other boundary.
//!
//! # State machine
//!
//! ```text
//!            pointer down
//!   Idle ─────────────────────▶ Dragging(DragContext)
//!    ▲                             │  pointer move: DragContext::step
//!    └─────────────────────────────┘  pointer up / cancel
//! ```
//!
//! # Crossing
//!
//! The *pivot* is the boundary the dragged handle did not own when the
//! gesture began. It stays fixed for the whole gesture. A Start-role handle
//! crosses when the resolved offset moves past the pivot to the right, an
//! End-role handle when it moves past it to the left. Every crossing flips
//! the dragged handle's role, so dragging back over the pivot restores the
//! original binding.

use textgrip_core::geometry::Point;

/// Identity of one of the two handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleId {
    /// Bound to the start boundary when a selection is created.
    First,
    /// Bound to the end boundary when a selection is created.
    Second,
}

impl HandleId {
    /// Both handles, in index order.
    pub const ALL: [HandleId; 2] = [HandleId::First, HandleId::Second];

    /// The other handle.
    #[inline]
    #[must_use]
    pub const fn partner(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// Which selection boundary a handle drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Start,
    End,
}

impl Role {
    #[inline]
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// Binding and drawing side of one handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleState {
    pub role: Role,
    /// Glyph drawn to the left of the caret.
    pub left_visual: bool,
}

impl HandleState {
    /// Initial state of `id` for a fresh selection.
    #[must_use]
    pub const fn initial(id: HandleId) -> Self {
        match id {
            HandleId::First => Self {
                role: Role::Start,
                left_visual: true,
            },
            HandleId::Second => Self {
                role: Role::End,
                left_visual: false,
            },
        }
    }

    /// Swap role and drawing side.
    pub fn flip(&mut self) {
        self.role = self.role.flipped();
        self.left_visual = !self.left_visual;
    }
}

/// What a resolved drag sample does to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStep {
    /// The dragged boundary did not move.
    Unchanged,
    /// The dragged boundary moved without crossing. `None` keeps a boundary.
    Move {
        start: Option<usize>,
        end: Option<usize>,
    },
    /// The dragged boundary crossed the pivot: roles swap and the span
    /// becomes `[start, end)`.
    Cross { start: usize, end: usize },
}

/// State captured when a drag begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragContext {
    pub anchor_start: usize,
    pub anchor_end: usize,
    /// The boundary the dragged handle did not own at pointer down.
    pub pivot: usize,
    /// Pointer position minus the handle's caret anchor, in screen space.
    pub grab: Point,
    /// Offset the dragged boundary currently sits on.
    pub last_resolved: usize,
}

impl DragContext {
    /// Capture a drag of a `role` handle over the span `[start, end)`.
    #[must_use]
    pub fn begin(role: Role, start: usize, end: usize, grab: Point) -> Self {
        let (pivot, owned) = match role {
            Role::Start => (end, start),
            Role::End => (start, end),
        };
        Self {
            anchor_start: start,
            anchor_end: end,
            pivot,
            grab,
            last_resolved: owned,
        }
    }

    /// Apply a resolved offset for a handle currently bound to `role`.
    pub fn step(&mut self, role: Role, resolved: usize) -> DragStep {
        if resolved == self.last_resolved {
            return DragStep::Unchanged;
        }
        self.last_resolved = resolved;

        match role {
            Role::Start if resolved > self.pivot => DragStep::Cross {
                start: self.pivot,
                end: resolved,
            },
            Role::Start => DragStep::Move {
                start: Some(resolved),
                end: None,
            },
            Role::End if resolved < self.pivot => DragStep::Cross {
                start: resolved,
                end: self.pivot,
            },
            Role::End => DragStep::Move {
                start: None,
                end: Some(resolved),
            },
        }
    }
}

/// Drag state of a single handle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragContext),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_states_bind_first_to_start() {
        assert_eq!(
            HandleState::initial(HandleId::First),
            HandleState {
                role: Role::Start,
                left_visual: true
            }
        );
        assert_eq!(HandleState::initial(HandleId::Second).role, Role::End);
        assert_eq!(HandleId::First.partner(), HandleId::Second);
    }

    #[test]
    fn flip_swaps_role_and_side() {
        let mut state = HandleState::initial(HandleId::First);
        state.flip();
        assert_eq!(state.role, Role::End);
        assert!(!state.left_visual);
        state.flip();
        assert_eq!(state, HandleState::initial(HandleId::First));
    }

    #[test]
    fn pivot_is_the_other_boundary() {
        let ctx = DragContext::begin(Role::Start, 2, 7, Point::ZERO);
        assert_eq!((ctx.pivot, ctx.last_resolved), (7, 2));
        let ctx = DragContext::begin(Role::End, 2, 7, Point::ZERO);
        assert_eq!((ctx.pivot, ctx.last_resolved), (2, 7));
    }

    #[test]
    fn same_offset_is_unchanged() {
        let mut ctx = DragContext::begin(Role::Start, 2, 7, Point::ZERO);
        assert_eq!(ctx.step(Role::Start, 2), DragStep::Unchanged);
    }

    #[test]
    fn start_moves_until_it_passes_pivot() {
        let mut ctx = DragContext::begin(Role::Start, 2, 7, Point::ZERO);
        assert_eq!(
            ctx.step(Role::Start, 5),
            DragStep::Move {
                start: Some(5),
                end: None
            }
        );
        // Reaching the pivot is not a crossing.
        assert_eq!(
            ctx.step(Role::Start, 7),
            DragStep::Move {
                start: Some(7),
                end: None
            }
        );
        assert_eq!(ctx.step(Role::Start, 8), DragStep::Cross { start: 7, end: 8 });
    }

    #[test]
    fn crossed_handle_moves_as_end() {
        let mut ctx = DragContext::begin(Role::Start, 2, 7, Point::ZERO);
        assert_eq!(ctx.step(Role::Start, 8), DragStep::Cross { start: 7, end: 8 });
        assert_eq!(
            ctx.step(Role::End, 9),
            DragStep::Move {
                start: None,
                end: Some(9)
            }
        );
        assert_eq!(ctx.pivot, 7);
    }

    #[test]
    fn dragging_back_recrosses() {
        let mut ctx = DragContext::begin(Role::Start, 2, 7, Point::ZERO);
        ctx.step(Role::Start, 9);
        assert_eq!(ctx.step(Role::End, 4), DragStep::Cross { start: 4, end: 7 });
    }

    #[test]
    fn end_crosses_below_pivot() {
        let mut ctx = DragContext::begin(Role::End, 3, 6, Point::ZERO);
        assert_eq!(
            ctx.step(Role::End, 3),
            DragStep::Move {
                start: None,
                end: Some(3)
            }
        );
        assert_eq!(ctx.step(Role::End, 1), DragStep::Cross { start: 1, end: 3 });
        assert_eq!(
            ctx.step(Role::Start, 0),
            DragStep::Move {
                start: Some(0),
                end: None
            }
        );
    }
}
