//! Analytics benchmarks over synthetic daily series.
//!
//! Run with: `cargo bench --package barstat-bench`

use barstat_bench::synthetic_series;
use barstat_lib::{
    Period, close_stats, interval_summary, moving_average, resample_bars, return_series,
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

/// Series lengths: one year, ten years and a century of daily bars.
const SIZES: [usize; 3] = [252, 2_520, 25_200];

fn rolling_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("moving_average");

    for size in SIZES {
        let series = synthetic_series(size);
        group.throughput(Throughput::Elements(size as u64));

        for window in [50, 200] {
            group.bench_with_input(
                BenchmarkId::new(format!("w{window}"), size),
                &series,
                |b, series| b.iter(|| moving_average(black_box(series), window)),
            );
        }
    }

    group.finish();
}

fn resample_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample_bars");

    for size in SIZES {
        let series = synthetic_series(size);
        group.throughput(Throughput::Elements(size as u64));

        for period in [Period::Week, Period::Month] {
            group.bench_with_input(BenchmarkId::new(period.as_str(), size), &series, |b, series| {
                b.iter(|| resample_bars(black_box(series), period));
            });
        }
    }

    group.finish();
}

fn summary_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary");

    for size in SIZES {
        let series = synthetic_series(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("return_series", size), &series, |b, s| {
            b.iter(|| return_series(black_box(s)));
        });
        group.bench_with_input(BenchmarkId::new("close_stats", size), &series, |b, s| {
            b.iter(|| close_stats(black_box(s)));
        });

        if let Some(range) = series.date_range() {
            group.bench_with_input(BenchmarkId::new("interval", size), &series, |b, s| {
                b.iter(|| interval_summary(black_box(s), range));
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    rolling_benchmark,
    resample_benchmark,
    summary_benchmark
);
criterion_main!(benches);
