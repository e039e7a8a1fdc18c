//! Splitting the enumerated file list across workers.

use crate::errors::{ScanError, ScanResult};

/// Splits `items` into `workers` contiguous slices.
///
/// Every slice has `floor(len / workers)` elements except the last, which
/// absorbs the remainder. Concatenating the slices in order reproduces
/// `items` exactly; no element is duplicated or dropped. When there are more
/// workers than items the leading slices are legitimately empty.
///
/// Fails with [`ScanError::InvalidWorkerCount`] if `workers` is zero.
pub fn partition<T>(items: &[T], workers: usize) -> ScanResult<Vec<&[T]>> {
    if workers == 0 {
        return Err(ScanError::invalid_worker_count(workers));
    }

    let per_worker = items.len() / workers;
    let mut partitions = Vec::with_capacity(workers);
    for i in 0..workers {
        let start = i * per_worker;
        let end = if i + 1 == workers {
            items.len()
        } else {
            (i + 1) * per_worker
        };
        partitions.push(&items[start..end]);
    }
    Ok(partitions)
}
