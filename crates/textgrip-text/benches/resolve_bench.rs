//! Benchmarks for pointer → offset resolution.
//!
//! Run with: cargo bench -p textgrip-text --bench resolve_bench
//!
//! Workloads sweep a pointer across a wrapped paragraph, the way a handle
//! drag samples it.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use textgrip_core::geometry::Point;
use textgrip_text::{GridLayout, OffsetResolver, WrapMode};

// ── Fixtures ────────────────────────────────────────────────────────────

fn paragraph(words: usize) -> String {
    let vocabulary = ["select", "handle", "drag", "wrapped", "line", "文字", "caret"];
    (0..words)
        .map(|i| vocabulary[i % vocabulary.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn sweep(points: usize, width: f32, height: f32) -> Vec<Point> {
    (0..points)
        .map(|i| {
            let t = i as f32 / points as f32;
            Point::new(t * width, t * height)
        })
        .collect()
}

// ── Benchmark Functions ─────────────────────────────────────────────────

fn bench_precise(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve/precise");
    for words in [50, 500] {
        let layout = GridLayout::new(paragraph(words), 40, WrapMode::Word).with_cell_size(8.0, 16.0);
        let points = sweep(256, 320.0, layout.lines().len() as f32 * 16.0);
        group.bench_with_input(BenchmarkId::from_parameter(words), &points, |b, points| {
            let resolver = OffsetResolver::new(&layout);
            b.iter(|| {
                for &pos in points {
                    black_box(resolver.precise(black_box(pos)));
                }
            });
        });
    }
    group.finish();
}

fn bench_hysteresis(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve/hysteresis");
    for words in [50, 500] {
        let layout = GridLayout::new(paragraph(words), 40, WrapMode::Word).with_cell_size(8.0, 16.0);
        let points = sweep(256, 320.0, layout.lines().len() as f32 * 16.0);
        group.bench_with_input(BenchmarkId::from_parameter(words), &points, |b, points| {
            let resolver = OffsetResolver::new(&layout);
            b.iter(|| {
                let mut previous = 0;
                for &pos in points {
                    previous = resolver.with_hysteresis(black_box(pos), previous);
                }
                black_box(previous)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_precise, bench_hysteresis);
criterion_main!(benches);
