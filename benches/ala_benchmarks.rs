//! Ala Hash Benchmarks
//!
//! Benchmarks for the open addressing hash table under both probing modes.
//! The benchmarks are implemented using the Criterion framework, which provides
//! statistical analysis and performance regression detection.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use ala_hash_lib::data_structures::ala_hash_table::{AlaHashTable, ProbingMode};
use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, SamplingMode,
    Throughput,
};
use std::time::Duration;

const MODES: [ProbingMode; 2] = [ProbingMode::Linear, ProbingMode::Double];
const SIZES: [usize; 3] = [100, 1_000, 10_000];

fn filled_table(mode: ProbingMode, size: usize) -> AlaHashTable<String, usize> {
    let mut table = AlaHashTable::with_probing_mode(mode);
    for i in 0..size {
        table.put(format!("key-{i}"), i).unwrap();
    }
    table
}

/// Benchmark inserts, including every growth rehash on the way.
fn bench_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("ala_hash_table/put");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    for mode in MODES {
        for size in SIZES {
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(BenchmarkId::new(mode.as_str(), size), &size, |b, &size| {
                b.iter(|| {
                    let mut table = AlaHashTable::with_probing_mode(mode);
                    for i in 0..size as u64 {
                        table.put(black_box(i), i).unwrap();
                    }
                    table
                });
            });
        }
    }

    group.finish();
}

/// Benchmark hits and misses against a populated table.
fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("ala_hash_table/get");
    group.measurement_time(Duration::from_secs(2));

    for mode in MODES {
        for size in SIZES {
            let table = filled_table(mode, size);
            let hits: Vec<String> = (0..size).map(|i| format!("key-{i}")).collect();
            let misses: Vec<String> = (0..size).map(|i| format!("missing-{i}")).collect();

            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{mode}/hit"), size),
                &hits,
                |b, keys| {
                    b.iter(|| {
                        for key in keys {
                            black_box(table.get(key.as_str()).ok());
                        }
                    });
                },
            );
            group.bench_with_input(
                BenchmarkId::new(format!("{mode}/miss"), size),
                &misses,
                |b, keys| {
                    b.iter(|| {
                        for key in keys {
                            black_box(table.has_key(key.as_str()));
                        }
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark draining a table, which leaves tombstones and triggers shrinks.
fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("ala_hash_table/remove");
    group.measurement_time(Duration::from_secs(2));

    for mode in MODES {
        for size in SIZES {
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(BenchmarkId::new(mode.as_str(), size), &size, |b, &size| {
                b.iter_batched(
                    || filled_table(mode, size),
                    |mut table| {
                        for i in 0..size {
                            black_box(table.remove(format!("key-{i}").as_str()).ok());
                        }
                        table
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

/// Benchmark a put/remove churn that keeps the live count constant.
fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("ala_hash_table/churn");

    for mode in MODES {
        group.bench_function(mode.as_str(), |b| {
            b.iter_batched(
                || {
                    let mut table = AlaHashTable::with_probing_mode(mode);
                    for i in 0..64u64 {
                        table.put(i, i).unwrap();
                    }
                    table
                },
                |mut table| {
                    for i in 64..1_064u64 {
                        table.put(i, i).unwrap();
                        black_box(table.remove(&(i - 64)).ok());
                    }
                    table
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_put, bench_get, bench_remove, bench_churn);
criterion_main!(benches);
