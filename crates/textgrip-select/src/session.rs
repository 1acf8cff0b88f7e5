#![forbid(unsafe_code)]

//! The selection session: one selection model, two handles, one menu.
//!
//! [`SelectionSession`] owns everything a text surface needs to run a
//! two-handle selection. The host delivers [`SelectionInput`]s through
//! [`process`](SelectionSession::process) and applies the returned
//! [`SelectionEvent`]s in order. Every input is handled to completion before
//! `process` returns, so the host never observes a half-applied crossing.
//!
//! # Coordinates
//!
//! - Long press and select-at points are in text space (relative to the text
//!   content origin).
//! - Handle pointer samples and every emitted position are in screen space.
//!   [`Surface::origin`] converts between the two.
//!
//! # Invariants
//!
//! 1. At any time exactly one handle is bound to [`Role::Start`] and the
//!    other to [`Role::End`].
//! 2. At most one handle is dragging.
//! 3. No handle or menu is shown while the session is hidden (after a reset,
//!    or before the first selection).
//! 4. While hidden by a scroll, the next [`SelectionInput::Redraw`] shows the
//!    menu and handles again.
//!
//! # Failure Modes
//!
//! - Without a layout every selection-affecting input is a no-op. Forwarded
//!   gestures (`Clicked`, `LongPressed`) and resets are still emitted.
//! - A tap-to-select whose default span would run past the end of the text
//!   is a no-op after the reset it implies.

use tracing::{Span, debug, debug_span};

use textgrip_core::config::GripConfig;
use textgrip_core::error::Result;
use textgrip_core::event::{PointerEvent, PointerPhase};
use textgrip_core::geometry::{Point, Rect, Size};
use textgrip_text::{TextLayout, resolve_precise, resolve_with_hysteresis};
use textgrip_widgets::{MenuMetrics, Surface, place_popup};

use crate::event::{SelectionEvent, SelectionInput};
use crate::handle::{DragContext, DragState, DragStep, HandleId, HandleState, Role};
use crate::span::{SelectionModel, SelectionSpan};

/// One selection handle: its binding plus an in-flight drag.
#[derive(Debug, Clone)]
struct HandleController {
    state: HandleState,
    drag: DragState,
    /// Span covering the current drag gesture.
    gesture: Span,
}

impl HandleController {
    fn new(id: HandleId) -> Self {
        Self {
            state: HandleState::initial(id),
            drag: DragState::Idle,
            gesture: Span::none(),
        }
    }

    fn cancel_drag(&mut self) {
        self.drag = DragState::Idle;
        self.gesture = Span::none();
    }
}

/// Two-handle text selection over a [`TextLayout`].
pub struct SelectionSession<L> {
    config: GripConfig,
    metrics: MenuMetrics,
    surface: Surface,
    layout: Option<L>,
    model: SelectionModel,
    handles: [HandleController; 2],
    popup_visible: bool,
    /// The host is showing its own menu after `SelectAllCustomPopup`.
    custom_popup_visible: bool,
    handles_visible: bool,
    hidden: bool,
    hidden_by_scroll: bool,
}

impl<L> std::fmt::Debug for SelectionSession<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionSession")
            .field("layout_ready", &self.layout.is_some())
            .field("span", &(self.model.start(), self.model.end()))
            .field("active", &self.model.is_active())
            .field("popup_visible", &self.popup_visible)
            .field("custom_popup_visible", &self.custom_popup_visible)
            .field("handles_visible", &self.handles_visible)
            .field("hidden_by_scroll", &self.hidden_by_scroll)
            .finish()
    }
}

impl<L: TextLayout> Default for SelectionSession<L> {
    fn default() -> Self {
        Self::from_valid_config(GripConfig::default())
    }
}

impl<L: TextLayout> SelectionSession<L> {
    /// Create a session without a layout.
    ///
    /// # Errors
    ///
    /// Returns [`GripError::InvalidConfig`](textgrip_core::GripError) if
    /// `config` fails validation.
    pub fn new(config: GripConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: GripConfig) -> Self {
        Self {
            metrics: MenuMetrics::from_config(&config),
            config,
            surface: Surface::default(),
            layout: None,
            model: SelectionModel::new(),
            handles: [
                HandleController::new(HandleId::First),
                HandleController::new(HandleId::Second),
            ],
            popup_visible: false,
            custom_popup_visible: false,
            handles_visible: false,
            hidden: true,
            hidden_by_scroll: false,
        }
    }

    /// Attach a layout.
    #[must_use]
    pub fn with_layout(mut self, layout: L) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Set the surface geometry.
    #[must_use]
    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }

    // --- accessors ---

    #[inline]
    #[must_use]
    pub fn config(&self) -> &GripConfig {
        &self.config
    }

    /// Menu dimensions derived from the configuration.
    #[inline]
    #[must_use]
    pub fn menu_metrics(&self) -> &MenuMetrics {
        &self.metrics
    }

    #[inline]
    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The current layout, if ready.
    #[inline]
    #[must_use]
    pub fn layout(&self) -> Option<&L> {
        self.layout.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn model(&self) -> &SelectionModel {
        &self.model
    }

    /// Snapshot of the active selection.
    #[must_use]
    pub fn span(&self) -> Option<SelectionSpan> {
        self.model.span()
    }

    /// Binding and drawing side of a handle.
    #[inline]
    #[must_use]
    pub fn handle(&self, id: HandleId) -> HandleState {
        self.handles[id.index()].state
    }

    /// The handle currently bound to `role`.
    #[must_use]
    pub fn handle_for(&self, role: Role) -> HandleId {
        if self.handle(HandleId::First).role == role {
            HandleId::First
        } else {
            HandleId::Second
        }
    }

    /// The handle being dragged, if any.
    #[must_use]
    pub fn dragging(&self) -> Option<HandleId> {
        HandleId::ALL
            .into_iter()
            .find(|id| matches!(self.handles[id.index()].drag, DragState::Dragging(_)))
    }

    #[inline]
    #[must_use]
    pub fn is_popup_showing(&self) -> bool {
        self.popup_visible
    }

    #[inline]
    #[must_use]
    pub fn are_handles_visible(&self) -> bool {
        self.handles_visible
    }

    // --- host updates ---

    /// Replace the layout after the text or wrap width changed.
    ///
    /// A selection that no longer fits the text is reset. Otherwise its
    /// content is recomputed and visible widgets are repositioned.
    pub fn set_layout(&mut self, layout: L) -> Vec<SelectionEvent> {
        let mut out = Vec::new();
        let len = layout.char_count();
        self.layout = Some(layout);

        if !self.model.is_active() {
            return out;
        }
        if self.model.end() > len {
            debug!(end = self.model.end(), len, "selection no longer fits text");
            self.on_reset(&mut out);
            return out;
        }

        let before = self.model.content().map(str::to_owned);
        self.apply_span(None, None, &mut out);
        if self.model.content().map(str::to_owned) == before {
            out.clear();
        }
        if self.handles_visible {
            self.show_handles(&mut out);
        }
        if self.popup_visible {
            self.show_popup(&mut out);
        }
        out
    }

    /// Detach the layout. Selection inputs become no-ops until a new one is
    /// attached.
    pub fn clear_layout(&mut self) -> Option<L> {
        for handle in &mut self.handles {
            handle.cancel_drag();
        }
        self.layout.take()
    }

    /// Update the surface geometry.
    pub fn set_surface(&mut self, surface: Surface) {
        self.surface = surface;
    }

    /// Which visible handle, if any, is under a screen-space point.
    ///
    /// Each glyph box is grown by the configured touch padding; when both
    /// boxes match, the handle whose glyph center is nearer wins.
    #[must_use]
    pub fn handle_at(&self, pos: Point) -> Option<HandleId> {
        if !self.handles_visible {
            return None;
        }
        let layout = self.layout.as_ref()?;
        let padding = self.config.dp(self.config.handle_padding_dp);

        HandleId::ALL
            .into_iter()
            .filter_map(|id| {
                let rect = self.handle_rect(layout, id);
                if !rect.inflate(padding).contains(pos) {
                    return None;
                }
                let center = Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
                let d = pos - center;
                Some((id, d.x * d.x + d.y * d.y))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    // --- input ---

    /// Handle one input, returning the UI updates it produced.
    pub fn process(&mut self, input: &SelectionInput) -> Vec<SelectionEvent> {
        let mut out = Vec::with_capacity(4);
        match *input {
            SelectionInput::LongPress(pos) => self.on_long_press(pos, &mut out),
            SelectionInput::SelectAt(pos) => self.on_select_at(pos, &mut out),
            SelectionInput::SelectAll => self.select_everything(false, &mut out),
            SelectionInput::Tap => self.on_tap(&mut out),
            SelectionInput::Handle { handle, event } => self.on_handle(handle, event, &mut out),
            SelectionInput::Scroll => self.on_scroll(&mut out),
            SelectionInput::Redraw => self.on_redraw(&mut out),
            SelectionInput::OutsideTouch | SelectionInput::Reset => self.on_reset(&mut out),
            SelectionInput::DismissPopup => self.hide_popup(&mut out),
        }
        out
    }

    /// Long press at a text-space point.
    pub fn long_press(&mut self, pos: Point) -> Vec<SelectionEvent> {
        self.process(&SelectionInput::LongPress(pos))
    }

    /// Select the default span under a text-space point.
    pub fn select_at(&mut self, pos: Point) -> Vec<SelectionEvent> {
        self.process(&SelectionInput::SelectAt(pos))
    }

    /// Select the whole text.
    pub fn select_all(&mut self) -> Vec<SelectionEvent> {
        self.process(&SelectionInput::SelectAll)
    }

    /// Click on the text.
    pub fn tap(&mut self) -> Vec<SelectionEvent> {
        self.process(&SelectionInput::Tap)
    }

    /// Pointer sample on a handle.
    pub fn handle_event(&mut self, handle: HandleId, event: PointerEvent) -> Vec<SelectionEvent> {
        self.process(&SelectionInput::Handle { handle, event })
    }

    pub fn scroll(&mut self) -> Vec<SelectionEvent> {
        self.process(&SelectionInput::Scroll)
    }

    pub fn redraw(&mut self) -> Vec<SelectionEvent> {
        self.process(&SelectionInput::Redraw)
    }

    pub fn outside_touch(&mut self) -> Vec<SelectionEvent> {
        self.process(&SelectionInput::OutsideTouch)
    }

    pub fn dismiss_popup(&mut self) -> Vec<SelectionEvent> {
        self.process(&SelectionInput::DismissPopup)
    }

    pub fn reset(&mut self) -> Vec<SelectionEvent> {
        self.process(&SelectionInput::Reset)
    }

    /// Select `[start, end)` and show the handles and menu, as if the user
    /// had made the selection.
    pub fn select_range(&mut self, start: usize, end: usize) -> Vec<SelectionEvent> {
        let mut out = Vec::new();
        self.hide_views(&mut out);
        if self.layout.is_none() {
            return out;
        }
        self.apply_span(Some(start), Some(end), &mut out);
        self.reveal(&mut out);
        out
    }
}

// ---------------------------------------------------------------------------
// Input handlers
// ---------------------------------------------------------------------------

impl<L: TextLayout> SelectionSession<L> {
    fn on_long_press(&mut self, pos: Point, out: &mut Vec<SelectionEvent>) {
        if self.config.select_all_on_long_press {
            self.select_everything(true, out);
        } else {
            self.on_select_at(pos, out);
        }
        out.push(SelectionEvent::LongPressed);
    }

    fn on_select_at(&mut self, pos: Point, out: &mut Vec<SelectionEvent>) {
        self.on_reset(out);
        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        let Some(start) = resolve_precise(Some(layout), pos) else {
            return;
        };
        let len = layout.char_count();
        let Some(end) = start
            .checked_add(self.config.default_selection_len)
            .filter(|&end| end <= len)
        else {
            debug!(start, len, "default selection runs past end of text");
            return;
        };
        self.apply_span(Some(start), Some(end), out);
        self.reveal(out);
    }

    /// Select `[0, len)`. A long press resets first; an explicit select-all
    /// only hides the current widgets.
    fn select_everything(&mut self, reset: bool, out: &mut Vec<SelectionEvent>) {
        if reset {
            self.on_reset(out);
        } else {
            self.hide_views(out);
        }
        let Some(len) = self.layout.as_ref().map(TextLayout::char_count) else {
            return;
        };
        self.apply_span(Some(0), Some(len), out);
        self.reveal(out);
    }

    fn on_tap(&mut self, out: &mut Vec<SelectionEvent>) {
        if !self.popup_visible {
            out.push(SelectionEvent::Dismissed);
        }
        self.on_reset(out);
        out.push(SelectionEvent::Clicked);
    }

    fn on_scroll(&mut self, out: &mut Vec<SelectionEvent>) {
        if !self.config.scroll_show {
            self.on_reset(out);
            return;
        }
        if !self.hidden_by_scroll && !self.hidden {
            debug!("hiding selection while scrolling");
            self.hidden_by_scroll = true;
            self.hide_widgets(out);
        }
        out.push(SelectionEvent::Scrolling);
    }

    fn on_redraw(&mut self, out: &mut Vec<SelectionEvent>) {
        if !self.hidden_by_scroll {
            return;
        }
        self.hidden_by_scroll = false;
        if !self.hidden {
            self.show_popup(out);
            self.show_handles(out);
        }
    }

    fn on_reset(&mut self, out: &mut Vec<SelectionEvent>) {
        self.hide_views(out);
        self.model.clear();
        self.hidden_by_scroll = false;
        debug!("selection reset");
        out.push(SelectionEvent::Reset);
    }

    fn on_handle(&mut self, id: HandleId, event: PointerEvent, out: &mut Vec<SelectionEvent>) {
        match event.phase {
            PointerPhase::Down => self.begin_drag(id, event.pos),
            PointerPhase::Move => self.drag_to(id, event.pos, out),
            PointerPhase::Up | PointerPhase::Cancel => self.end_drag(id, out),
        }
    }
}

// ---------------------------------------------------------------------------
// Handle drags
// ---------------------------------------------------------------------------

impl<L: TextLayout> SelectionSession<L> {
    fn begin_drag(&mut self, id: HandleId, pos: Point) {
        if !self.handles_visible || !self.model.is_active() || self.dragging().is_some() {
            return;
        }
        let Some(layout) = self.layout.as_ref() else {
            return;
        };

        let state = self.handles[id.index()].state;
        let anchor = caret_anchor(layout, &self.surface, self.model.boundary(state.role));
        let ctx = DragContext::begin(state.role, self.model.start(), self.model.end(), pos - anchor);

        let gesture = debug_span!("handle_drag", handle = ?id, role = ?state.role);
        gesture.in_scope(|| {
            debug!(
                start = ctx.anchor_start,
                end = ctx.anchor_end,
                pivot = ctx.pivot,
                "drag started"
            );
        });

        let handle = &mut self.handles[id.index()];
        handle.drag = DragState::Dragging(ctx);
        handle.gesture = gesture;
    }

    fn drag_to(&mut self, id: HandleId, pos: Point, out: &mut Vec<SelectionEvent>) {
        let idx = id.index();
        let DragState::Dragging(mut ctx) = self.handles[idx].drag else {
            return;
        };
        if self.layout.is_none() {
            return;
        }
        let _entered = self.handles[idx].gesture.clone().entered();

        self.hide_popup(out);

        let Some(layout) = self.layout.as_ref() else {
            return;
        };

        // Probe the middle of the caret's line so the target falls inside it.
        let line = layout.line_for_offset(ctx.last_resolved);
        let half_line = (layout.line_bottom(line) - layout.line_top(line)) / 2.0;
        let caret = pos - ctx.grab;
        let target = Point::new(
            caret.x - self.surface.origin.x,
            caret.y - self.surface.origin.y - half_line,
        );

        let Some(resolved) = resolve_with_hysteresis(Some(layout), target, ctx.last_resolved)
        else {
            return;
        };

        let role = self.handles[idx].state.role;
        let step = ctx.step(role, resolved);
        self.handles[idx].drag = DragState::Dragging(ctx);

        match step {
            DragStep::Unchanged => {}
            DragStep::Move { start, end } => {
                let content = self.model.set_span(start, end, layout).to_owned();
                out.push(SelectionEvent::SelectionChanged { content });
                self.position_handle(layout, id, out);
            }
            DragStep::Cross { start, end } => {
                debug!(resolved, pivot = ctx.pivot, "handles crossed");
                self.handles[idx].state.flip();
                self.handles[id.partner().index()].state.flip();
                let content = self.model.set_span(Some(start), Some(end), layout).to_owned();
                out.push(SelectionEvent::SelectionChanged { content });
                self.position_handle(layout, id.partner(), out);
                self.position_handle(layout, id, out);
            }
        }
    }

    fn end_drag(&mut self, id: HandleId, out: &mut Vec<SelectionEvent>) {
        let handle = &mut self.handles[id.index()];
        let DragState::Dragging(ctx) = handle.drag else {
            return;
        };
        handle.gesture.in_scope(|| {
            debug!(offset = ctx.last_resolved, "drag ended");
        });
        handle.cancel_drag();
        self.show_popup(out);
    }
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

impl<L: TextLayout> SelectionSession<L> {
    fn apply_span(&mut self, start: Option<usize>, end: Option<usize>, out: &mut Vec<SelectionEvent>) {
        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        let content = self.model.set_span(start, end, layout).to_owned();
        out.push(SelectionEvent::SelectionChanged { content });
    }

    /// Mark the selection visible, rebind the handles and show them with the
    /// menu.
    fn reveal(&mut self, out: &mut Vec<SelectionEvent>) {
        self.hidden = false;
        for id in HandleId::ALL {
            self.handles[id.index()].state = HandleState::initial(id);
        }
        self.show_handles(out);
        self.show_popup(out);
    }

    fn show_handles(&mut self, out: &mut Vec<SelectionEvent>) {
        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        if self.hidden || !self.model.is_active() {
            return;
        }
        for id in HandleId::ALL {
            self.position_handle(layout, id, out);
        }
        self.handles_visible = true;
    }

    fn show_popup(&mut self, out: &mut Vec<SelectionEvent>) {
        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        if self.hidden || !self.model.is_active() {
            return;
        }
        if self.config.selected_all_no_pop && self.model.content() == Some(layout.text()) {
            self.popup_visible = false;
            self.custom_popup_visible = true;
            out.push(SelectionEvent::HidePopup);
            out.push(SelectionEvent::SelectAllCustomPopup);
            return;
        }
        let geometry = place_popup(
            layout,
            self.model.start(),
            self.model.end(),
            &self.surface,
            &self.metrics,
        );
        self.popup_visible = true;
        out.push(SelectionEvent::ShowPopup(geometry));
    }

    fn hide_popup(&mut self, out: &mut Vec<SelectionEvent>) {
        if self.popup_visible {
            self.popup_visible = false;
            out.push(SelectionEvent::HidePopup);
        }
        if self.custom_popup_visible {
            self.custom_popup_visible = false;
            out.push(SelectionEvent::DismissCustomPopup);
        }
    }

    /// Hide handles and menu, ending any drag.
    fn hide_widgets(&mut self, out: &mut Vec<SelectionEvent>) {
        for handle in &mut self.handles {
            handle.cancel_drag();
        }
        if self.handles_visible {
            self.handles_visible = false;
            out.push(SelectionEvent::HideHandles);
        }
        self.hide_popup(out);
    }

    fn hide_views(&mut self, out: &mut Vec<SelectionEvent>) {
        self.hide_widgets(out);
        self.hidden = true;
    }

    fn handle_rect(&self, layout: &L, id: HandleId) -> Rect {
        let state = self.handles[id.index()].state;
        let caret = caret_anchor(layout, &self.surface, self.model.boundary(state.role));
        let size = self.config.handle_size();
        let x = if state.left_visual { caret.x - size } else { caret.x };
        Rect::from_origin_size(Point::new(x, caret.y), Size::new(size, size))
    }

    fn position_handle(&self, layout: &L, id: HandleId, out: &mut Vec<SelectionEvent>) {
        let state = self.handles[id.index()].state;
        let rect = self.handle_rect(layout, id);
        out.push(SelectionEvent::PositionHandle {
            handle: id,
            role: state.role,
            left_visual: state.left_visual,
            x: rect.x,
            y: rect.y,
        });
    }
}

/// Screen-space point under a boundary: its caret x on the bottom edge of
/// its line.
fn caret_anchor<L>(layout: &L, surface: &Surface, offset: usize) -> Point
where
    L: TextLayout + ?Sized,
{
    let line = layout.line_for_offset(offset);
    Point::new(
        surface.origin.x + layout.primary_horizontal(offset),
        surface.origin.y + layout.line_bottom(line),
    )
}
