//! Scan result types.
//!
//! Every type here is built once and never mutated afterwards: workers own
//! their partitions and grow their own [`WorkerReport`] independently, and the
//! coordinator absorbs the reports in worker-index order after the join. No
//! state is shared between workers while they run.

use std::fmt;
use std::path::PathBuf;

/// Opaque identity of the worker that produced a record.
///
/// Assigned deterministically as 0..W-1 at launch, one per partition. This is
/// a logical identity, not an OS thread id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkerId(pub usize);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker-{}", self.0)
    }
}

/// A single matched line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    /// Which worker found the match
    pub worker: WorkerId,
    /// The file the match was found in
    pub path: PathBuf,
    /// 1-based line number within the file
    pub line_number: usize,
    /// The full matched line, without its line terminator
    pub line: String,
}

/// One record emitted by a worker.
///
/// A worker whose entire partition produced no matches still reports its
/// participation with a single `Idle` record, so that "which workers ran" is
/// observable from the aggregated result. `Idle` records are filterable and
/// can never be confused with a real match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanRecord {
    Match(LineMatch),
    Idle { worker: WorkerId },
}

impl ScanRecord {
    /// Returns the match if this record is one
    pub fn as_match(&self) -> Option<&LineMatch> {
        match self {
            ScanRecord::Match(m) => Some(m),
            ScanRecord::Idle { .. } => None,
        }
    }

    /// The worker that emitted this record
    pub fn worker(&self) -> WorkerId {
        match self {
            ScanRecord::Match(m) => m.worker,
            ScanRecord::Idle { worker } => *worker,
        }
    }
}

/// A file that could not be opened or read; the scan continued without it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    pub path: PathBuf,
    pub error: String,
}

impl FileError {
    pub fn new(path: impl Into<PathBuf>, error: impl fmt::Display) -> Self {
        Self {
            path: path.into(),
            error: error.to_string(),
        }
    }
}

/// Everything one worker produced from its partition
#[derive(Debug, Clone)]
pub struct WorkerReport {
    pub worker: WorkerId,
    pub records: Vec<ScanRecord>,
    pub errors: Vec<FileError>,
}

/// The complete result of one scan
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// All records, grouped by worker in ascending worker-index order;
    /// within a worker, in file-then-line order of that worker's partition
    pub records: Vec<ScanRecord>,
    /// Total number of files enumerated for scanning
    pub total_files_scanned: usize,
    /// Files skipped because they could not be opened or read
    pub errors: Vec<FileError>,
}

impl ScanResult {
    /// Creates an empty result covering `total_files_scanned` files
    pub fn new(total_files_scanned: usize) -> Self {
        Self {
            total_files_scanned,
            ..Default::default()
        }
    }

    /// Appends one worker's report. Call in worker-index order: the
    /// aggregated record ordering is a guarantee, not an accident.
    pub fn absorb(&mut self, report: WorkerReport) {
        self.records.extend(report.records);
        self.errors.extend(report.errors);
    }

    /// Iterates over real matches, skipping idle placeholders
    pub fn matches(&self) -> impl Iterator<Item = &LineMatch> {
        self.records.iter().filter_map(ScanRecord::as_match)
    }

    /// Number of real matches found
    pub fn total_matches(&self) -> usize {
        self.matches().count()
    }

    /// Workers whose partitions produced no matches
    pub fn idle_workers(&self) -> impl Iterator<Item = WorkerId> + '_ {
        self.records.iter().filter_map(|r| match r {
            ScanRecord::Idle { worker } => Some(*worker),
            ScanRecord::Match(_) => None,
        })
    }

    /// Number of distinct files with at least one match
    pub fn files_with_matches(&self) -> usize {
        let mut paths: Vec<&PathBuf> = self.matches().map(|m| &m.path).collect();
        paths.sort();
        paths.dedup();
        paths.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_record(worker: usize, path: &str, line_number: usize, line: &str) -> ScanRecord {
        ScanRecord::Match(LineMatch {
            worker: WorkerId(worker),
            path: PathBuf::from(path),
            line_number,
            line: line.to_string(),
        })
    }

    #[test]
    fn test_new_result_is_empty() {
        let result = ScanResult::new(7);
        assert_eq!(result.total_files_scanned, 7);
        assert_eq!(result.total_matches(), 0);
        assert!(result.records.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_absorb_keeps_worker_order() {
        let mut result = ScanResult::new(3);
        result.absorb(WorkerReport {
            worker: WorkerId(0),
            records: vec![
                match_record(0, "a.txt", 1, "foo"),
                match_record(0, "a.txt", 9, "foo again"),
            ],
            errors: vec![],
        });
        result.absorb(WorkerReport {
            worker: WorkerId(1),
            records: vec![match_record(1, "b.txt", 2, "foo")],
            errors: vec![FileError::new("c.txt", "permission denied")],
        });

        let workers: Vec<usize> = result.records.iter().map(|r| r.worker().0).collect();
        assert_eq!(workers, vec![0, 0, 1]);
        assert_eq!(result.total_matches(), 3);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.files_with_matches(), 2);
    }

    #[test]
    fn test_idle_records_are_filterable() {
        let mut result = ScanResult::new(0);
        result.absorb(WorkerReport {
            worker: WorkerId(0),
            records: vec![ScanRecord::Idle {
                worker: WorkerId(0),
            }],
            errors: vec![],
        });
        result.absorb(WorkerReport {
            worker: WorkerId(1),
            records: vec![match_record(1, "x.txt", 4, "needle")],
            errors: vec![],
        });

        assert_eq!(result.total_matches(), 1);
        assert_eq!(result.idle_workers().collect::<Vec<_>>(), vec![WorkerId(0)]);
        assert!(result.records[0].as_match().is_none());
        assert!(result.records[1].as_match().is_some());
    }

    #[test]
    fn test_worker_id_display() {
        assert_eq!(WorkerId(3).to_string(), "worker-3");
    }
}
