#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use textgrip_core::event::PointerEvent;
use textgrip_core::geometry::Point;
use textgrip_select::{HandleId, SelectionInput, SelectionSession};
use textgrip_text::{GridLayout, TextLayout, WrapMode};
use textgrip_widgets::Surface;

#[derive(Debug, Arbitrary)]
enum Op {
    LongPress(i16, i16),
    SelectAt(i16, i16),
    SelectAll,
    Tap,
    Down(bool, i16, i16),
    Move(bool, i16, i16),
    Up(bool, i16, i16),
    Cancel(bool, i16, i16),
    Scroll,
    Redraw,
    OutsideTouch,
    DismissPopup,
    Reset,
}

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    width: u8,
    viewport: u16,
    ops: Vec<Op>,
}

fn point(x: i16, y: i16) -> Point {
    Point::new(f32::from(x) / 4.0, f32::from(y) / 4.0)
}

fn handle(second: bool) -> HandleId {
    if second { HandleId::Second } else { HandleId::First }
}

fn to_input(op: &Op) -> SelectionInput {
    match *op {
        Op::LongPress(x, y) => SelectionInput::LongPress(point(x, y)),
        Op::SelectAt(x, y) => SelectionInput::SelectAt(point(x, y)),
        Op::SelectAll => SelectionInput::SelectAll,
        Op::Tap => SelectionInput::Tap,
        Op::Down(h, x, y) => SelectionInput::Handle {
            handle: handle(h),
            event: PointerEvent::down(f32::from(x) / 4.0, f32::from(y) / 4.0),
        },
        Op::Move(h, x, y) => SelectionInput::Handle {
            handle: handle(h),
            event: PointerEvent::moved(f32::from(x) / 4.0, f32::from(y) / 4.0),
        },
        Op::Up(h, x, y) => SelectionInput::Handle {
            handle: handle(h),
            event: PointerEvent::up(f32::from(x) / 4.0, f32::from(y) / 4.0),
        },
        Op::Cancel(h, x, y) => SelectionInput::Handle {
            handle: handle(h),
            event: PointerEvent::cancel(f32::from(x) / 4.0, f32::from(y) / 4.0),
        },
        Op::Scroll => SelectionInput::Scroll,
        Op::Redraw => SelectionInput::Redraw,
        Op::OutsideTouch => SelectionInput::OutsideTouch,
        Op::DismissPopup => SelectionInput::DismissPopup,
        Op::Reset => SelectionInput::Reset,
    }
}

fuzz_target!(|input: Input| {
    if input.text.len() > 512 || input.ops.len() > 256 {
        return;
    }
    let width = usize::from(input.width % 60) + 1;
    let layout = GridLayout::new(input.text.as_str(), width, WrapMode::Word).with_cell_size(8.0, 16.0);
    let len = layout.char_count();
    let surface = Surface::new(Point::new(12.0, 40.0), 480.0, f32::from(input.viewport));
    let mut session = SelectionSession::default().with_layout(layout).with_surface(surface);

    for op in &input.ops {
        session.process(&to_input(op));

        if let Some(span) = session.span() {
            assert!(span.start <= span.end && span.end <= len);
            assert_eq!(span.content.chars().count(), span.len());
        }
        let first = session.handle(HandleId::First);
        let second = session.handle(HandleId::Second);
        assert_ne!(first.role, second.role, "both handles drive one boundary");
    }
});
