#![no_main]

use libfuzzer_sys::fuzz_target;
use textgrip_core::geometry::Point;
use textgrip_text::{GridLayout, OffsetResolver, TextLayout, WrapMode};

fuzz_target!(|data: &[u8]| {
    // First three bytes pick wrap width, wrap mode and pointer y.
    if data.len() < 3 {
        return;
    }
    let width = usize::from(data[0] % 40) + 1;
    let wrap = match data[1] % 3 {
        0 => WrapMode::None,
        1 => WrapMode::Char,
        _ => WrapMode::Word,
    };
    let y = f32::from(data[2]) - 16.0;
    let Ok(text) = std::str::from_utf8(&data[3..]) else {
        return;
    };
    // Cap length to keep fuzzing fast.
    if text.len() > 1024 {
        return;
    }

    let layout = GridLayout::new(text, width, wrap).with_cell_size(8.0, 16.0);
    let resolver = OffsetResolver::new(&layout);
    let len = layout.char_count();

    let mut previous = 0;
    for x in [-10.0, 0.0, 3.5, 7.9, 64.0, 160.0, 999.0] {
        let pos = Point::new(x, y);

        let precise = resolver.precise(pos);
        assert!(precise <= len, "precise offset {precise} past len {len}");

        let next = resolver.with_hysteresis(pos, previous);
        assert!(next <= len, "drag offset {next} past len {len}");
        assert_eq!(next, resolver.with_hysteresis(pos, previous), "resolver is not pure");
        previous = next;
    }
});
