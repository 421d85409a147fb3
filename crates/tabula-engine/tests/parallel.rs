use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use tabula_engine::{
    parallel_for_static, partitions, try_parallel_for_static, ParallelError, Partition,
};

const N: usize = 1_000_000;

#[test]
fn every_index_is_visited_exactly_once() {
    for nthreads in 1..=8 {
        let counters: Vec<AtomicU32> = (0..N).map(|_| AtomicU32::new(0)).collect();
        parallel_for_static(N, nthreads, |i| {
            counters[i].fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();

        let bad = counters
            .iter()
            .position(|c| c.load(Ordering::Relaxed) != 1);
        assert_eq!(bad, None, "nthreads={nthreads}");
    }
}

#[test]
fn partition_sizes_differ_by_at_most_one() {
    for nthreads in 1..=8 {
        let parts = partitions(N, nthreads);
        let sizes: Vec<usize> = parts.iter().map(Partition::len).collect();
        let min = sizes.iter().min().unwrap();
        let max = sizes.iter().max().unwrap();
        assert!(max - min <= 1, "nthreads={nthreads} sizes={sizes:?}");
        assert_eq!(sizes.iter().sum::<usize>(), N);
    }
}

#[test]
fn empty_domain_returns_without_invoking_op() {
    for nthreads in 1..=8 {
        let calls = AtomicUsize::new(0);
        parallel_for_static(0, nthreads, |_| {
            calls.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }
}

#[test]
fn zero_threads_is_an_error() {
    assert_eq!(
        parallel_for_static(10, 0, |_| {}),
        Err(ParallelError::InvalidThreadCount)
    );
    assert_eq!(
        try_parallel_for_static(10, 0, |_| Ok::<(), String>(())),
        Err(ParallelError::InvalidThreadCount)
    );
}

#[test]
fn first_failure_aborts_and_surfaces() {
    let visited_after_failure = AtomicUsize::new(0);
    let result = try_parallel_for_static(100_000, 4, |i| {
        if i == 1_234 {
            return Err(format!("boom at {i}"));
        }
        if i > 1_234 && i < 1_234 + 64 {
            // Indices right behind the failure in the same partition must
            // not run once the stop flag is up; give the flag time to land.
            visited_after_failure.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    });

    assert_eq!(result, Err(ParallelError::Task("boom at 1234".to_owned())));
    // The failing partition stops at its next index, so the window directly
    // after the failure inside that partition stays untouched.
    assert_eq!(visited_after_failure.load(Ordering::Relaxed), 0);
}

#[test]
fn sequential_and_parallel_results_agree() {
    let parallel: Vec<AtomicU32> = (0..10_000).map(|_| AtomicU32::new(0)).collect();
    parallel_for_static(10_000, 8, |i| {
        parallel[i].store((i % 97) as u32, Ordering::Relaxed);
    })
    .unwrap();

    let sequential: Vec<AtomicU32> = (0..10_000).map(|_| AtomicU32::new(0)).collect();
    parallel_for_static(10_000, 1, |i| {
        sequential[i].store((i % 97) as u32, Ordering::Relaxed);
    })
    .unwrap();

    for i in 0..10_000 {
        assert_eq!(
            parallel[i].load(Ordering::Relaxed),
            sequential[i].load(Ordering::Relaxed)
        );
    }
}

#[test]
fn more_threads_than_work_still_covers_domain() {
    let counters: Vec<AtomicU32> = (0..3).map(|_| AtomicU32::new(0)).collect();
    parallel_for_static(3, 8, |i| {
        counters[i].fetch_add(1, Ordering::Relaxed);
    })
    .unwrap();
    for c in &counters {
        assert_eq!(c.load(Ordering::Relaxed), 1);
    }
}
