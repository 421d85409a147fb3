use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tabula_engine::ops::fill_indexed;

fn bench_rows() -> usize {
    std::env::var("TABULA_BENCH_ROWS")
        .ok()
        .and_then(|v| v.replace('_', "").parse::<usize>().ok())
        .filter(|&v| (100_000..=10_000_000).contains(&v))
        .unwrap_or(1_000_000)
}

fn bench_max_threads() -> usize {
    std::env::var("TABULA_BENCH_MAX_THREADS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| (1..=64).contains(&v))
        .unwrap_or(8)
}

/// Reference per-index workload: enough arithmetic that partitioning cost is
/// visible but does not dominate.
fn workload(i: usize) -> usize {
    let mut acc = 0usize;
    for k in 0..1000 {
        acc = acc.wrapping_add(k.wrapping_mul(i));
    }
    acc
}

fn bench_parallel_for_static(c: &mut Criterion) {
    let n = bench_rows();
    let mut group = c.benchmark_group("parallel_for_static");
    group.throughput(Throughput::Elements(n as u64));

    for nthreads in 1..=bench_max_threads() {
        group.bench_with_input(
            BenchmarkId::from_parameter(nthreads),
            &nthreads,
            |b, &nthreads| {
                let mut data = vec![0usize; n];
                b.iter(|| {
                    fill_indexed(&mut data, nthreads, workload).unwrap();
                    black_box(data[n / 2]);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parallel_for_static);
criterion_main!(benches);
