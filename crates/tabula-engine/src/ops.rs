#![forbid(unsafe_code)]

//! Column-wise bulk kernels built on the static partitioner.
//!
//! Each kernel hands every worker a disjoint slice of the output (or a
//! disjoint index range of the input), so the hot loops run with no shared
//! mutable state and no locks.

use crate::parallel::{partitions, run_tasks, ParallelError, Partition};
use tabula_columnar::{Column, Stype, Value};

/// Fill `out[i] = op(i)` for every index, one contiguous chunk per worker.
///
/// This is the materialization substrate for column-sized buffers: the
/// benchmark drives it with the reference per-index workload, and bulk
/// column operators use it to build new column storage.
pub fn fill_indexed<T, F>(out: &mut [T], nthreads: usize, op: F) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    if nthreads < 1 {
        return Err(ParallelError::InvalidThreadCount);
    }
    if out.is_empty() {
        return Ok(());
    }

    let parts = partitions(out.len(), nthreads);
    let mut chunks: Vec<(Partition, &mut [T])> = Vec::with_capacity(parts.len());
    let mut rest = out;
    for partition in parts {
        let (chunk, tail) = rest.split_at_mut(partition.len());
        chunks.push((partition, chunk));
        rest = tail;
    }

    run_tasks(chunks, |(partition, chunk): (Partition, &mut [T])| {
        for (offset, slot) in chunk.iter_mut().enumerate() {
            *slot = op(partition.start + offset);
        }
    });

    Ok(())
}

/// Sum a numeric column as `f64`, skipping missing values, partitioned
/// across `nthreads` workers. Returns `Ok(None)` for string columns, which
/// have no numeric sum.
pub fn sum_real(column: &Column, nthreads: usize) -> Result<Option<f64>, ParallelError> {
    if nthreads < 1 {
        return Err(ParallelError::InvalidThreadCount);
    }
    if column.stype() == Stype::Str {
        return Ok(None);
    }

    let parts = partitions(column.len(), nthreads);
    let mut partials = vec![0f64; parts.len()];

    let tasks: Vec<(Partition, &mut f64)> =
        parts.into_iter().zip(partials.iter_mut()).collect();
    run_tasks(tasks, |(partition, partial): (Partition, &mut f64)| {
        let mut sum = 0f64;
        for row in partition.start..partition.end {
            sum += match column.get(row) {
                Value::Bool(b) => f64::from(u8::from(b)),
                Value::Int(i) => i as f64,
                Value::Real(r) => r,
                Value::None | Value::Str(_) => 0.0,
            };
        }
        *partial = sum;
    });

    Ok(Some(partials.iter().sum()))
}
