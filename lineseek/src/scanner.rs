//! Sequential line scanning of one partition.

use memchr::memmem;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use crate::results::{FileError, LineMatch, ScanRecord, WorkerId, WorkerReport};

const BUFFER_CAPACITY: usize = 8192;

/// Scans one partition of files for lines containing `needle`.
///
/// Files are processed strictly in partition order. Each file handle is
/// dropped before the next file is opened, so a worker holds at most one
/// handle at a time. A file that cannot be opened or read is recorded in the
/// report's error list and skipped; it never aborts the partition.
///
/// A partition that yields no matches at all still reports a single
/// [`ScanRecord::Idle`] placeholder so the coordinator can observe that this
/// worker participated.
pub fn scan_partition(worker: WorkerId, needle: &str, files: &[PathBuf]) -> WorkerReport {
    debug!("{} scanning {} files", worker, files.len());

    let finder = memmem::Finder::new(needle.as_bytes());
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for path in files {
        match scan_file(worker, &finder, path) {
            Ok(mut file_records) => records.append(&mut file_records),
            Err(err) => {
                warn!("{}: could not read {}: {}", worker, path.display(), err);
                errors.push(FileError::new(path.clone(), &err));
            }
        }
    }

    if records.is_empty() {
        records.push(ScanRecord::Idle { worker });
    }

    WorkerReport {
        worker,
        records,
        errors,
    }
}

/// Scans a single file, emitting one record per line containing the needle.
///
/// Matching is literal, case-sensitive, and byte-wise: lines are read as raw
/// bytes so content that is not valid UTF-8 (binary files, latin-1 text) is
/// still searched rather than aborting the file. Line numbers are 1-based
/// and count every line read, matching or not. Recorded text excludes the
/// `\n` or `\r\n` terminator and converts any invalid UTF-8 lossily. Errors
/// here are genuine I/O failures only.
fn scan_file(worker: WorkerId, finder: &memmem::Finder<'_>, path: &Path) -> io::Result<Vec<ScanRecord>> {
    trace!("{} scanning file {}", worker, path.display());
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);

    let mut records = Vec::new();
    let mut line: Vec<u8> = Vec::with_capacity(256);
    let mut line_number = 0;

    while reader.read_until(b'\n', &mut line)? > 0 {
        line_number += 1;
        if finder.find(&line).is_some() {
            trace!("match at {}:{}", path.display(), line_number);
            records.push(ScanRecord::Match(LineMatch {
                worker,
                path: path.to_path_buf(),
                line_number,
                line: String::from_utf8_lossy(strip_terminator(&line)).into_owned(),
            }));
        }
        line.clear();
    }

    Ok(records)
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
