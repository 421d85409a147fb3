#![forbid(unsafe_code)]

#[cfg(feature = "parallel")]
use rayon::ThreadPool;
#[cfg(feature = "parallel")]
use std::sync::OnceLock;

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Best-effort crate-local worker pool.
///
/// Rayon normally uses a **global** thread pool. Under extreme resource
/// constraints (e.g. many test binaries running concurrently on a
/// multi-agent host), global pool initialization can fail and Rayon will
/// panic on first use. We build and hold a crate-local pool instead; if even
/// that fails, callers fall back to single-threaded execution.
#[cfg(feature = "parallel")]
static POOL: OnceLock<Option<ThreadPool>> = OnceLock::new();

#[cfg(feature = "parallel")]
fn desired_threads() -> usize {
    let from_env = std::env::var("TABULA_NUM_THREADS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0);
    from_env.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    })
}

#[cfg(feature = "parallel")]
fn build_pool() -> Option<ThreadPool> {
    let requested = desired_threads().max(1);
    let try_build = |n| rayon::ThreadPoolBuilder::new().num_threads(n).build();

    match try_build(requested) {
        Ok(pool) => Some(pool),
        Err(_) if requested > 1 => try_build(1).ok(),
        Err(_) => None,
    }
}

/// The process-scoped pool, if one could be created. Initialization is
/// idempotent; the pool lives for the rest of the process, and the per-call
/// barrier guarantees no worker owes outstanding work between invocations.
#[cfg(feature = "parallel")]
pub(crate) fn pool() -> Option<&'static ThreadPool> {
    POOL.get_or_init(build_pool).as_ref()
}

/// Number of worker threads the pool runs, or 1 when execution is
/// sequential. Benchmark drivers use this as the sweep ceiling.
pub fn max_threads() -> usize {
    #[cfg(feature = "parallel")]
    {
        pool().map(ThreadPool::current_num_threads).unwrap_or(1)
    }
    #[cfg(not(feature = "parallel"))]
    {
        1
    }
}

/// Errors from the parallel-for entry points.
#[derive(Debug, PartialEq, Error)]
pub enum ParallelError<E = Infallible> {
    /// The scheduler needs at least one worker partition.
    #[error("invalid thread count 0: the scheduler needs at least one thread")]
    InvalidThreadCount,

    /// A per-index operation failed; this is the first observed failure,
    /// surfaced after every worker has stopped.
    #[error("parallel operation failed: {0}")]
    Task(E),
}

/// A contiguous half-open sub-range `[start, end)` of an iteration domain,
/// owned by exactly one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub start: usize,
    pub end: usize,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Statically split `[0, n)` into `nthreads` disjoint contiguous partitions.
///
/// Sizes differ by at most one: the first `n % nthreads` partitions take one
/// extra element. Partitions may be empty when `n < nthreads`; their union
/// is always exactly `[0, n)`.
pub fn partitions(n: usize, nthreads: usize) -> Vec<Partition> {
    debug_assert!(nthreads >= 1, "partitioning needs at least one thread");
    let base = n / nthreads;
    let extra = n % nthreads;

    let mut out = Vec::with_capacity(nthreads);
    let mut start = 0;
    for index in 0..nthreads {
        let size = base + usize::from(index < extra);
        out.push(Partition {
            start,
            end: start + size,
        });
        start += size;
    }
    out
}

/// Run `work` once per task, on the pool when available, inline otherwise.
/// Returns only after every task has completed (a join barrier); a panic in
/// `work` resurfaces on the caller after the workers have been joined.
pub(crate) fn run_tasks<T, F>(tasks: Vec<T>, work: F)
where
    T: Send,
    F: Fn(T) + Sync,
{
    #[cfg(feature = "parallel")]
    if let Some(pool) = pool() {
        pool.scope(|scope| {
            let work = &work;
            for task in tasks {
                scope.spawn(move |_| work(task));
            }
        });
        return;
    }

    for task in tasks {
        work(task);
    }
}

/// Execute `op(i)` for every `i` in `[0, n)` across `nthreads` static
/// partitions.
///
/// Partitions run with no ordering guarantee and share no mutable state; the
/// call returns only after all of them have finished. `n == 0` returns
/// immediately without invoking `op`.
pub fn parallel_for_static<F>(n: usize, nthreads: usize, op: F) -> Result<(), ParallelError>
where
    F: Fn(usize) + Sync,
{
    try_parallel_for_static(n, nthreads, |index| {
        op(index);
        Ok::<(), Infallible>(())
    })
}

/// Fallible form of [`parallel_for_static`].
///
/// The first error aborts the run: other partitions stop before their next
/// index, the barrier still waits for every worker to come to rest, and the
/// first observed error is returned. No partial-completion state escapes —
/// from the caller's point of view the whole call failed.
pub fn try_parallel_for_static<F, E>(
    n: usize,
    nthreads: usize,
    op: F,
) -> Result<(), ParallelError<E>>
where
    F: Fn(usize) -> Result<(), E> + Sync,
    E: Send,
{
    if nthreads < 1 {
        return Err(ParallelError::InvalidThreadCount);
    }
    if n == 0 {
        return Ok(());
    }

    let stop = AtomicBool::new(false);
    let first_error: Mutex<Option<E>> = Mutex::new(None);

    run_tasks(partitions(n, nthreads), |partition: Partition| {
        for index in partition.start..partition.end {
            if stop.load(Ordering::Relaxed) {
                return;
            }
            if let Err(error) = op(index) {
                stop.store(true, Ordering::Relaxed);
                let mut slot = first_error
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                if slot.is_none() {
                    *slot = Some(error);
                }
                return;
            }
        }
    });

    match first_error
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner)
    {
        Some(error) => Err(ParallelError::Task(error)),
        None => Ok(()),
    }
}
