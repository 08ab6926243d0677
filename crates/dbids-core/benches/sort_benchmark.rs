//! Sorting and selection benchmarks.
//!
//! # Usage
//!
//! ```bash
//! cargo bench --bench sort_benchmark -- --noplot
//! ```

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use dbids_core::collections::select;
use dbids_core::{sort, ArrayModifiableDbids, Dbid};
use rand::{Rng, SeedableRng};

fn generate_pairs(count: usize, seed: u64) -> (Vec<f64>, Vec<i32>) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let keys = (0..count).map(|_| rng.gen::<f64>()).collect();
    let values = (0..count as i32).collect();
    (keys, values)
}

fn bench_sort_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_pairs");
    for size in [100usize, 1_000, 100_000] {
        let input = generate_pairs(size, 42);
        group.bench_with_input(BenchmarkId::new("dual_pivot", size), &input, |b, input| {
            b.iter_batched(
                || input.clone(),
                |(mut keys, mut values)| {
                    sort::sort(&mut keys, &mut values).expect("equal lengths");
                    black_box(values)
                },
                BatchSize::LargeInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("std_unstable", size), &input, |b, input| {
            b.iter_batched(
                || input.0.iter().copied().zip(input.1.iter().copied()).collect::<Vec<_>>(),
                |mut pairs| {
                    pairs.sort_unstable_by(|a, b| sort::compare_keys(a.0, b.0));
                    black_box(pairs)
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_quick_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("quick_select");
    let mut rng = rand::rngs::StdRng::seed_from_u64(3);
    let ids: ArrayModifiableDbids = (0..100_000)
        .map(|_| Dbid::new(rng.gen_range(0..1_000_000)))
        .collect();

    group.bench_function("median_100k", |b| {
        b.iter_batched(
            || ids.clone(),
            |mut data| black_box(select::median(&mut data, |a, b| a.cmp(&b)).expect("non-empty")),
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_sort_pairs, bench_quick_select);
criterion_main!(benches);
