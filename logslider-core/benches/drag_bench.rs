//! Criterion benchmarks for LogSlider hot paths.
//!
//! Benchmarks:
//! 1. Transfer functions (linear and log, both directions)
//! 2. Step quantization
//! 3. Gesture move handling (geometry + transfer + quantize + commit + notify)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use logslider_core::quantize::quantize;
use logslider_core::{
    GestureHost, HandleId, InputFamily, PointerEvent, ScaleMode, Slider, SliderConfig,
    TrackBounds,
};

// ── Helpers ──────────────────────────────────────────────────────────

struct BenchHost(TrackBounds);

impl GestureHost for BenchHost {
    fn track_bounds(&self) -> TrackBounds {
        self.0
    }
    fn bind_gesture(&mut self, _family: InputFamily) {}
    fn unbind_gesture(&mut self, _family: InputFamily) {}
    fn set_handle_active(&mut self, _handle: HandleId, _active: bool) {}
}

fn pointer_sweep(n: usize, width: f64) -> Vec<PointerEvent> {
    (0..n)
        .map(|i| PointerEvent::mouse((i as f64 * 0.37).sin().abs() * width))
        .collect()
}

// ── 1. Transfer ──────────────────────────────────────────────────────

fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer");
    for scale in [ScaleMode::Linear, ScaleMode::Logarithmic] {
        group.bench_with_input(
            BenchmarkId::new("percent_from_value", scale.label()),
            &scale,
            |b, scale| {
                b.iter(|| scale.percent_from_value(black_box(1234.5), 10.0, 100_000.0));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("value_from_percent", scale.label()),
            &scale,
            |b, scale| {
                b.iter(|| scale.value_from_percent(black_box(42.0), 10.0, 100_000.0));
            },
        );
    }
    group.finish();
}

// ── 2. Quantize ──────────────────────────────────────────────────────

fn bench_quantize(c: &mut Criterion) {
    c.bench_function("quantize", |b| {
        b.iter(|| quantize(black_box(1234.567), 2, 0.25, 10.0));
    });
}

// ── 3. Gesture move ──────────────────────────────────────────────────

fn bench_gesture_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_move");
    let events = pointer_sweep(1_000, 400.0);

    for (name, config) in [
        ("linear_range", SliderConfig::new(0.0, 1_000.0).range(100.0, 900.0)),
        (
            "log_single",
            SliderConfig::new(10.0, 1_000_000.0)
                .logarithmic()
                .with_step(0.5, 1),
        ),
    ] {
        group.bench_function(name, |b| {
            let mut slider = Slider::new(config.clone()).unwrap();
            slider.subscribe(|change| {
                black_box(change.low.percent);
            });
            let mut host = BenchHost(TrackBounds::new(0.0, 400.0));
            slider.gesture_start(HandleId::Low, &PointerEvent::mouse(0.0), &mut host);
            b.iter(|| {
                for event in &events {
                    black_box(slider.gesture_move(event, &mut host));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transfer, bench_quantize, bench_gesture_move);
criterion_main!(benches);
