//! Criterion benchmarks for the scenario engine.
//!
//! The deck recomputes on every keystroke, so these track the cost of a
//! single recompute and of an allocation edit.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pitch_core::types::{Allocation, AllocationBucket, ScenarioField, ScenarioState};
use pitch_engine::allocation::normalize_allocation;
use pitch_engine::metrics::compute_metrics;
use pitch_engine::recommendations::{generate_insights, generate_recommendations};
use pitch_engine::valuation::{valuation_curve, MAX_CURVE_POINTS};

fn bench_compute_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_metrics");

    for agents in [10u32, 200, 100_000] {
        let state = ScenarioState::default().with(ScenarioField::NumberOfAgents, f64::from(agents));
        group.bench_with_input(BenchmarkId::from_parameter(agents), &state, |b, state| {
            b.iter(|| compute_metrics(black_box(state)));
        });
    }

    group.finish();
}

fn bench_normalize_allocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_allocation");

    let current = Allocation::default();
    group.bench_function("proportional", |b| {
        b.iter(|| normalize_allocation(black_box(&current), AllocationBucket::Team, black_box(50.0)));
    });

    let mut degenerate = Allocation::zeroed();
    degenerate.team = 100.0;
    group.bench_function("equal_split", |b| {
        b.iter(|| {
            normalize_allocation(black_box(&degenerate), AllocationBucket::Team, black_box(40.0))
        });
    });

    group.finish();
}

fn bench_recommendations(c: &mut Criterion) {
    let state = ScenarioState::default();
    let metrics = compute_metrics(&state);

    c.bench_function("recommendations_and_insights", |b| {
        b.iter(|| {
            let recs = generate_recommendations(black_box(&state), black_box(&metrics));
            let insights = generate_insights(black_box(&state), black_box(&metrics));
            (recs, insights)
        });
    });
}

fn bench_valuation_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("valuation_curve");

    for step in [1u64, 50, 500] {
        group.bench_with_input(BenchmarkId::new("step", step), &step, |b, &step| {
            b.iter(|| valuation_curve(0, black_box(MAX_CURVE_POINTS - 1), step, 5_000.0, 15.0));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_metrics,
    bench_normalize_allocation,
    bench_recommendations,
    bench_valuation_curve
);
criterion_main!(benches);
