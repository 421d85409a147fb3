//! Parallel execution substrate for tabula.
//!
//! The core primitive is [`parallel_for_static`]: it splits an iteration
//! domain `[0, n)` into `nthreads` contiguous partitions whose sizes differ
//! by at most one, runs a per-index operation over each partition on a
//! process-scoped worker pool, and returns only after every partition has
//! finished. Column-wise bulk kernels ([`ops`]) build on the same
//! partitioning.
//!
//! The pool is created lazily, sized from `TABULA_NUM_THREADS` (falling back
//! to the machine's available parallelism), and reused for the lifetime of
//! the process. If the pool cannot be created — or the `parallel` feature is
//! disabled — every entry point runs sequentially with identical results.

#![forbid(unsafe_code)]

pub mod ops;
mod parallel;

pub use crate::parallel::{
    max_threads, parallel_for_static, partitions, try_parallel_for_static, ParallelError,
    Partition,
};
