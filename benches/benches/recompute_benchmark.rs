//! Recomputation benchmarks for the live Ichimoku pipeline.
//!
//! Run with: `cargo bench --package kumo-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use futures::stream;
use kumo_bench::{synthetic_events, synthetic_series};
use kumo_lib::{
    IchimokuParams, Interval, LiveConfig, LivePipeline, RenderPayload, compute, partition,
};
use std::hint::black_box;
use tokio::sync::mpsc;

/// History lengths covering a session chart up to a long backfill.
const SIZES: [usize; 3] = [500, 5_000, 50_000];

fn recompute_benchmark(c: &mut Criterion) {
    let params = IchimokuParams::default();
    let mut group = c.benchmark_group("recompute");

    for size in SIZES {
        let series = synthetic_series(size, Interval::Minute1);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("compute", size), &series, |b, series| {
            b.iter(|| compute(black_box(series.bars()), &params));
        });

        let set = compute(series.bars(), &params);
        group.bench_with_input(BenchmarkId::new("partition", size), &set, |b, set| {
            b.iter(|| partition(black_box(&set.leading_span_a), &set.leading_span_b));
        });

        group.bench_with_input(BenchmarkId::new("payload", size), &series, |b, series| {
            b.iter(|| RenderPayload::build(black_box(series.clone()), &params));
        });
    }

    group.finish();
}

fn pipeline_benchmark(c: &mut Criterion) {
    let Ok(runtime) = tokio::runtime::Runtime::new() else {
        eprintln!("Skipping pipeline benchmark: no tokio runtime");
        return;
    };

    let config = LiveConfig {
        redraw_interval_ms: 60_000,
        ..LiveConfig::default()
    };
    let events = synthetic_events(2_000, chrono::TimeDelta::seconds(15));

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);
    group.throughput(Throughput::Elements(events.len() as u64));

    group.bench_function("replay_2000_events", |b| {
        b.to_async(&runtime).iter(|| async {
            let Ok(pipeline) = LivePipeline::new(&config) else {
                return;
            };
            let (mut tx, _rx) = mpsc::channel::<RenderPayload>(events.len() + 1);
            let summary = pipeline.run(stream::iter(events.clone()), &mut tx).await;
            black_box(summary.ok());
        });
    });

    group.finish();
}

criterion_group!(benches, recompute_benchmark, pipeline_benchmark);
criterion_main!(benches);
