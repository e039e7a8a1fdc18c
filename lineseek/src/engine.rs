//! Scan coordination: enumerate, partition, fork, join, merge.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::ScanConfig;
use crate::errors::{ScanError, ScanResult};
use crate::partition::partition;
use crate::results::{ScanResult as ScanOutput, WorkerId};
use crate::scanner::scan_partition;
use crate::walker::enumerate_files;

/// Runs a full scan: one worker per partition, fork-join.
///
/// Exactly `config.workers` tasks are launched on a dedicated pool of the
/// same size, each owning one contiguous partition of the enumerated files.
/// The needle is the only shared input and is borrowed read-only by every
/// worker. The call blocks until every worker has finished; there is no
/// cancellation path. Reports are merged in worker-index order, so the
/// aggregated records are grouped worker 0 first, then worker 1, and so on.
///
/// Structural failures (`DirectoryNotFound`, `InvalidWorkerCount`, pool
/// construction) abort before any worker starts. Per-file failures inside a
/// worker never abort the scan; they surface as entries in the result's
/// error list.
pub fn scan(config: &ScanConfig) -> ScanResult<ScanOutput> {
    let workers = config.workers;
    // Validated before enumeration so a bad count has no side effects.
    if workers == 0 {
        return Err(ScanError::invalid_worker_count(workers));
    }

    // The input domain is non-empty needles; an empty one would match every
    // line of every file, so refuse it rather than guess.
    if config.pattern.is_empty() {
        return Err(ScanError::config_error("search string must not be empty"));
    }

    info!(
        "Scanning {} for \"{}\" with {} workers",
        config.root_path.display(),
        config.pattern,
        workers
    );

    let files = enumerate_files(&config.root_path)?;
    let partitions = partition(&files, workers)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| ScanError::thread_pool(e.to_string()))?;

    let needle = config.pattern.as_str();
    // collect() preserves index order, so the join doubles as the merge step.
    let reports: Vec<_> = pool.install(|| {
        partitions
            .par_iter()
            .enumerate()
            .map(|(index, files)| scan_partition(WorkerId(index), needle, files))
            .collect()
    });

    let mut result = ScanOutput::new(files.len());
    for report in reports {
        debug!(
            "{}: {} records, {} unreadable files",
            report.worker,
            report.records.len(),
            report.errors.len()
        );
        result.absorb(report);
    }

    info!(
        "Scan complete: {} matches in {} of {} files",
        result.total_matches(),
        result.files_with_matches(),
        result.total_files_scanned
    );
    Ok(result)
}
