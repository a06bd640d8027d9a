//! Deterministic directory traversal.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for discovering the regular
//! files under a root directory. Traversal is single-threaded and
//! depth-first via [`walkdir`], with directory entries sorted
//! lexicographically by file name so that discovery order is reproducible
//! within a run. Reproducible order is what makes the "first file kept"
//! deletion policy deterministic.
//!
//! Unreadable entries are yielded as [`ScanError`] items rather than
//! stopping iteration; the caller records them as warnings and continues.
//!
//! # Example
//!
//! ```no_run
//! use duplicate_finder::scanner::{ScanConfig, Walker};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), ScanConfig::default());
//! let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
//! println!("Found {} files", files.len());
//! ```

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileEntry, ScanConfig, ScanError};

/// Directory walker for sequential file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Scan configuration
    config: ScanConfig,
}

impl Walker {
    /// Create a new walker for the given root.
    #[must_use]
    pub fn new(path: &Path, config: ScanConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Walk the directory tree, yielding file entries in discovery order.
    ///
    /// Symbolic links are not followed. Non-regular files and files below
    /// the minimum size are skipped silently; I/O failures are yielded as
    /// [`ScanError`] values so the caller can record them without aborting
    /// the scan.
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let mut walk_dir = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()));

        if !self.config.recursive {
            walk_dir = walk_dir.max_depth(1);
        }

        walk_dir.into_iter().filter_map(move |entry_result| {
            match entry_result {
                Ok(entry) => {
                    // Skip the root directory itself
                    if entry.depth() == 0 {
                        return None;
                    }

                    let file_type = entry.file_type();
                    if !file_type.is_file() {
                        if file_type.is_symlink() {
                            log::trace!("Skipping symlink: {}", entry.path().display());
                        }
                        return None;
                    }

                    let metadata = match entry.metadata() {
                        Ok(m) => m,
                        Err(e) => return Some(Err(self.map_walk_error(e))),
                    };

                    let size = metadata.len();
                    if size < self.config.min_size {
                        log::trace!(
                            "Skipping file below size threshold ({} < {}): {}",
                            size,
                            self.config.min_size,
                            entry.path().display()
                        );
                        return None;
                    }

                    Some(Ok(FileEntry::new(entry.into_path(), size)))
                }
                Err(e) => Some(Err(self.map_walk_error(e))),
            }
        })
    }

    /// Convert a walkdir error into a `ScanError`.
    fn map_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        match error.into_io_error() {
            Some(io_err) => match io_err.kind() {
                io::ErrorKind::PermissionDenied => {
                    log::warn!("Permission denied: {}", path.display());
                    ScanError::PermissionDenied(path)
                }
                io::ErrorKind::NotFound => {
                    log::debug!("Entry vanished during scan: {}", path.display());
                    ScanError::NotFound(path)
                }
                _ => {
                    log::warn!("I/O error for {}: {}", path.display(), io_err);
                    ScanError::Io {
                        path,
                        source: io_err,
                    }
                }
            },
            None => ScanError::Io {
                path,
                source: io::Error::other("filesystem loop detected"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    /// Create a test directory with two top-level files and a nested one.
    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        let mut f = File::create(dir.path().join("file1.txt")).unwrap();
        writeln!(f, "Hello, world!").unwrap();

        let mut f = File::create(dir.path().join("file2.txt")).unwrap();
        writeln!(f, "Another file").unwrap();

        let subdir = dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        let mut f = File::create(subdir.join("nested.txt")).unwrap();
        writeln!(f, "Nested file content").unwrap();

        dir
    }

    #[test]
    fn test_walker_finds_files() {
        let dir = create_test_dir();
        let walker = Walker::new(dir.path(), ScanConfig::default());

        let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();

        assert_eq!(files.len(), 3);
        for file in &files {
            assert!(file.size > 0);
            assert!(file.path.exists());
        }
    }

    #[test]
    fn test_walker_non_recursive() {
        let dir = create_test_dir();
        let walker = Walker::new(dir.path(), ScanConfig::new(false, 0));

        let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();

        assert_eq!(files.len(), 2);
        for file in &files {
            assert!(
                !file.path.to_string_lossy().contains("subdir"),
                "Non-recursive walk must not descend: {}",
                file.path.display()
            );
        }
    }

    #[test]
    fn test_walker_min_size_boundary() {
        let dir = TempDir::new().unwrap();

        fs::write(dir.path().join("nine.txt"), vec![b'x'; 9]).unwrap();
        fs::write(dir.path().join("ten.txt"), vec![b'x'; 10]).unwrap();
        fs::write(dir.path().join("eleven.txt"), vec![b'x'; 11]).unwrap();

        let walker = Walker::new(dir.path(), ScanConfig::new(true, 10));
        let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();

        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_str().unwrap().to_string())
            .collect();

        // Boundary is inclusive: exactly 10 bytes passes, 9 does not
        assert!(names.contains(&"ten.txt".to_string()));
        assert!(names.contains(&"eleven.txt".to_string()));
        assert!(!names.contains(&"nine.txt".to_string()));
    }

    #[test]
    fn test_walker_zero_min_size_includes_empty_files() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("empty.txt")).unwrap();

        let walker = Walker::new(dir.path(), ScanConfig::default());
        let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size, 0);
    }

    #[test]
    fn test_walker_deterministic_order() {
        let dir = TempDir::new().unwrap();

        // Created out of order on purpose
        fs::write(dir.path().join("c.txt"), "c").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        let walker = Walker::new(dir.path(), ScanConfig::default());
        let names: Vec<_> = walker
            .walk()
            .filter_map(Result::ok)
            .map(|f| f.path.file_name().unwrap().to_str().unwrap().to_string())
            .collect();

        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_walker_order_stable_across_runs() {
        let dir = create_test_dir();
        let walker = Walker::new(dir.path(), ScanConfig::default());

        let first: Vec<_> = walker.walk().filter_map(Result::ok).collect();
        let second: Vec<_> = walker.walk().filter_map(Result::ok).collect();

        assert_eq!(first, second);
    }

    #[test]
    #[cfg(unix)]
    fn test_walker_skips_symlinks() {
        use std::os::unix::fs::symlink;

        let dir = create_test_dir();
        symlink(
            dir.path().join("file1.txt"),
            dir.path().join("link-to-file1"),
        )
        .unwrap();

        let walker = Walker::new(dir.path(), ScanConfig::default());
        let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();

        assert_eq!(files.len(), 3);
        for file in &files {
            assert_ne!(file.path.file_name().unwrap(), "link-to-file1");
        }
    }

    #[test]
    fn test_walker_nonexistent_root_yields_errors() {
        let walker = Walker::new(
            Path::new("/nonexistent/path/12345"),
            ScanConfig::default(),
        );

        let results: Vec<_> = walker.walk().collect();

        // Errors, not panics
        assert!(results.iter().all(Result::is_err));
    }
}
