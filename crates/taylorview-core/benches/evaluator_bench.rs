// ─────────────────────────────────────────────────────────────────────
// Taylor Surface Explorer — Evaluator Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the per-interaction recomputation: every
//! slider move or toggle rebuilds coefficients and both grids.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use taylorview_core::{compute_coefficients, Explorer, SineWave, TaylorEvaluator};
use taylorview_types::{ExpansionState, ExplorerConfig, Order, SamplingConfig};

// ── compute_coefficients() ──────────────────────────────────────────

fn bench_coefficients(c: &mut Criterion) {
    c.bench_function("coefficients_sine_wave", |b| {
        b.iter(|| compute_coefficients(&SineWave, black_box(0.5), black_box(-0.5)))
    });
}

// ── TaylorEvaluator.compute_surfaces() ──────────────────────────────

fn bench_surfaces_default_grid(c: &mut Criterion) {
    let ev = TaylorEvaluator::default();
    let state = ExpansionState::new().toggle_order(Order::Two);
    c.bench_function("surfaces_31x31", |b| {
        b.iter(|| ev.compute_surfaces(&SineWave, black_box(&state)))
    });
}

fn bench_surfaces_fine_grid(c: &mut Criterion) {
    let ev = TaylorEvaluator::new(SamplingConfig {
        min: -3.0,
        max: 3.0,
        step: 0.02,
    })
    .expect("valid sampling config");
    let state = ExpansionState::new().toggle_order(Order::Two);
    c.bench_function("surfaces_301x301", |b| {
        b.iter(|| ev.compute_surfaces(&SineWave, black_box(&state)))
    });
}

// ── Full interaction: move point + toggle + resample ────────────────

fn bench_interaction(c: &mut Criterion) {
    let mut explorer = Explorer::new(ExplorerConfig::default()).expect("default config");
    explorer.select("sine_wave").expect("catalog entry");
    c.bench_function("interaction_round_trip", |b| {
        b.iter(|| {
            explorer.set_point(black_box(1.2), black_box(-0.7));
            explorer.toggle_order(Order::One);
            black_box(explorer.surfaces())
        })
    });
}

criterion_group!(
    benches,
    bench_coefficients,
    bench_surfaces_default_grid,
    bench_surfaces_fine_grid,
    bench_interaction,
);
criterion_main!(benches);
