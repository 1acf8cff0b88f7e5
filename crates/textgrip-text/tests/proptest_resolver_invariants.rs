//! Property tests for offset resolution against [`GridLayout`].
//!
//! Invariants:
//! - both resolvers return offsets inside `[0, len]`
//! - both resolvers are deterministic
//! - a first touch never lands on a different line than the one under it

use proptest::prelude::*;
use textgrip_core::geometry::Point;
use textgrip_text::{GridLayout, OffsetResolver, TextLayout, WrapMode};

// ── Strategies ──────────────────────────────────────────────────────────

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            8 => prop::char::range('a', 'z'),
            3 => Just(' '),
            1 => Just('\n'),
            1 => Just('你'),
            1 => Just('\u{301}'),
        ],
        0..80,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn arb_wrap() -> impl Strategy<Value = WrapMode> {
    prop_oneof![Just(WrapMode::None), Just(WrapMode::Word), Just(WrapMode::Char)]
}

fn arb_layout() -> impl Strategy<Value = GridLayout> {
    (arb_text(), 1usize..24, arb_wrap())
        .prop_map(|(text, width, wrap)| GridLayout::new(text, width, wrap).with_cell_size(8.0, 16.0))
}

fn arb_point() -> impl Strategy<Value = Point> {
    (-50.0f32..300.0, -50.0f32..400.0).prop_map(|(x, y)| Point::new(x, y))
}

// ═════════════════════════════════════════════════════════════════════════
// Bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(400))]

    #[test]
    fn precise_stays_in_bounds(layout in arb_layout(), pos in arb_point()) {
        let offset = OffsetResolver::new(&layout).precise(pos);
        prop_assert!(offset <= layout.char_count());
    }

    #[test]
    fn hysteresis_stays_in_bounds(
        layout in arb_layout(),
        pos in arb_point(),
        seed in any::<usize>(),
    ) {
        let previous = seed % (layout.char_count() + 1);
        let offset = OffsetResolver::new(&layout).with_hysteresis(pos, previous);
        prop_assert!(offset <= layout.char_count());
    }

    #[test]
    fn precise_lands_on_pointer_line(layout in arb_layout(), pos in arb_point()) {
        let offset = OffsetResolver::new(&layout).precise(pos);
        prop_assert_eq!(layout.line_for_offset(offset), layout.line_for_vertical(pos.y));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn resolvers_are_pure(
        layout in arb_layout(),
        pos in arb_point(),
        seed in any::<usize>(),
    ) {
        let previous = seed % (layout.char_count() + 1);
        let a = OffsetResolver::new(&layout);
        let b = OffsetResolver::new(&layout);
        prop_assert_eq!(a.precise(pos), b.precise(pos));
        prop_assert_eq!(a.with_hysteresis(pos, previous), b.with_hysteresis(pos, previous));
    }
}
