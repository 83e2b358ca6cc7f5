//! Fan-out of a per-frequency kernel over a worker pool.

use log::info;
use rayon::prelude::*;

use crate::error::Error;

/// Evaluate `kernel` at every frequency of the batch on a dedicated rayon
/// pool, returning the results in input order.
///
/// `n_workers` of `None` sizes the pool automatically. Kernels must be pure
/// with respect to any shared model instances; the first kernel error aborts
/// the whole batch.
pub fn over_frequencies<R, F>(
    frequencies: &[f32],
    kernel: F,
    n_workers: Option<usize>,
) -> Result<Vec<R>, Error>
where
    F: Fn(f32) -> Result<R, Error> + Sync,
    R: Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_workers.unwrap_or(0))
        .build()
        .map_err(|e| Error::ThreadPool(e.to_string()))?;

    info!("evaluating a batch of {} frequencies", frequencies.len());

    pool.install(|| frequencies.par_iter().map(|&f| kernel(f)).collect())
}
