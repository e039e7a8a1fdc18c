//! Directory enumeration.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::{ScanError, ScanResult};

/// Collects every regular file reachable from `root` by recursive descent.
///
/// Directories are traversed but excluded from the output; symlinks are not
/// followed. Entries that cannot be read are logged and skipped. The returned
/// order is traversal-defined and stable within a run, which is all the
/// partitioner needs; callers must not rely on it for anything else.
///
/// Fails with [`ScanError::DirectoryNotFound`] if `root` does not exist or is
/// not a directory.
pub fn enumerate_files(root: &Path) -> ScanResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(ScanError::directory_not_found(root));
    }

    // This tool searches everything under the root: no gitignore handling,
    // no hidden-file filtering.
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                    files.push(entry.into_path());
                }
            }
            Err(err) => warn!("Skipping unreadable entry: {}", err),
        }
    }

    debug!("Enumerated {} files under {}", files.len(), root.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_enumerates_nested_files() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("sub/deeper"))?;
        for name in ["top.txt", "sub/mid.txt", "sub/deeper/leaf.txt"] {
            let mut file = File::create(dir.path().join(name))?;
            writeln!(file, "content")?;
        }

        let files = enumerate_files(dir.path())?;
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|p| p.is_file()));
        Ok(())
    }

    #[test]
    fn test_includes_hidden_files() -> Result<()> {
        let dir = tempdir()?;
        File::create(dir.path().join(".hidden"))?;
        File::create(dir.path().join("visible.txt"))?;

        let files = enumerate_files(dir.path())?;
        assert_eq!(files.len(), 2);
        Ok(())
    }

    #[test]
    fn test_empty_directory() -> Result<()> {
        let dir = tempdir()?;
        let files = enumerate_files(dir.path())?;
        assert!(files.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_root_fails() {
        let err = enumerate_files(Path::new("definitely/not/a/real/dir")).unwrap_err();
        assert!(matches!(err, ScanError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_file_root_fails() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("plain.txt");
        File::create(&file_path)?;

        let err = enumerate_files(&file_path).unwrap_err();
        assert!(matches!(err, ScanError::DirectoryNotFound(_)));
        Ok(())
    }
}
