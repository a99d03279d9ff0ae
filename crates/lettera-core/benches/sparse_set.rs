//! Benchmarks for SparseSet, the storage behind every component column

use lettera_core::alloc::sparse_set::{IndexSlot, SparseSet};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

#[derive(Clone, Copy, Debug, Default)]
struct GlyphSlotData {
    position: (f32, f32, f32),
    advance: f32,
    visible: bool,
}

fn bench_sparse_set_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_set_insert");

    for size in [10, 100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut set = SparseSet::new();
                for _ in 0..size {
                    set.push(black_box(GlyphSlotData::default()));
                }
                set
            });
        });
    }

    group.finish();
}

fn bench_sparse_set_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_set_access");

    for size in [100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));

        let mut set = SparseSet::new();
        let indices: Vec<IndexSlot> = (0..size)
            .map(|_| set.push(GlyphSlotData::default()))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0;
                for &idx in &indices {
                    sum += set.get(idx).advance;
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

fn bench_sparse_set_recycle(c: &mut Criterion) {
    c.bench_function("sparse_set_remove_push_1000", |b| {
        b.iter_batched(
            || {
                let mut set = SparseSet::new();
                let slots: Vec<_> = (0..1000).map(|_| set.push(GlyphSlotData::default())).collect();
                (set, slots)
            },
            |(mut set, slots)| {
                for slot in slots {
                    set.remove(slot);
                    set.push(GlyphSlotData::default());
                }
                set
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_sparse_set_insert,
    bench_sparse_set_access,
    bench_sparse_set_recycle
);
criterion_main!(benches);
