//! Error types for scan operations.
//!
//! Structural failures (bad root, bad worker count, pool construction) abort
//! the whole scan and surface as [`ScanError`]. Per-file open/read failures
//! never do: they are contained inside the worker that hit them and reported
//! as [`FileError`](crate::results::FileError) values on the scan result.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that abort a scan before any worker produces output
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("Invalid worker count: {0} (must be at least 1)")]
    InvalidWorkerCount(usize),
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ScanError {
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryNotFound(path.into())
    }

    pub fn invalid_worker_count(count: usize) -> Self {
        Self::InvalidWorkerCount(count)
    }

    pub fn thread_pool(msg: impl Into<String>) -> Self {
        Self::ThreadPool(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
