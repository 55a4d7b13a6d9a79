//! Pipelined vs one-by-one dispatch overhead on the in-memory backend.
//!
//! A live Redis would add network latency on top; this isolates the cost of
//! command buffering and batch dispatch inside the harness itself.
//!
//! Run: `cargo bench --bench pipeline_compare`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use redis_pipeline_bench::compare::compare;
use redis_pipeline_bench::harness::Harness;
use redis_pipeline_bench::memory::MemoryExecutor;

const SIZES: [usize; 3] = [100, 1_000, 10_000];

fn insert_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for &n in &SIZES {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("pipelined", n), &n, |b, &n| {
            b.iter(|| {
                let mut harness = Harness::new(MemoryExecutor::new());
                harness.insert_pipelined(n).unwrap();
            });
        });
        group.bench_with_input(BenchmarkId::new("individual", n), &n, |b, &n| {
            b.iter(|| {
                let mut harness = Harness::new(MemoryExecutor::new());
                harness.insert_individual(n).unwrap();
            });
        });
    }
    group.finish();
}

fn read_and_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_delete");

    for &n in &SIZES {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("read", n), &n, |b, &n| {
            let mut harness = Harness::new(MemoryExecutor::new());
            harness.insert_pipelined(n).unwrap();
            b.iter(|| {
                harness.read_pipelined(n).unwrap();
            });
        });
        group.bench_with_input(BenchmarkId::new("delete_reinsert", n), &n, |b, &n| {
            let mut harness = Harness::new(MemoryExecutor::new());
            b.iter(|| {
                harness.insert_pipelined(n).unwrap();
                harness.delete_pipelined(n).unwrap();
            });
        });
    }
    group.finish();
}

fn full_comparison(c: &mut Criterion) {
    c.bench_function("compare/1000", |b| {
        let mut harness = Harness::new(MemoryExecutor::new());
        b.iter(|| {
            compare(&mut harness, 1_000).unwrap();
        });
    });
}

criterion_group!(benches, insert_modes, read_and_delete, full_comparison);
criterion_main!(benches);
