//! Duplicate finder pipeline orchestrator.
//!
//! # Overview
//!
//! The finder drives the straight-line detection pipeline:
//! 1. **Validate** the scan root (must exist and be a directory)
//! 2. **Walk** the tree in deterministic order
//! 3. **Fingerprint** each surviving file (unreadable files become
//!    warnings, not failures)
//! 4. **Group** records by fingerprint into duplicate sets
//!
//! The shutdown flag is checked between files, so an interrupt surfaces
//! promptly as [`FinderError::Interrupted`] without leaving partial state.
//!
//! # Example
//!
//! ```no_run
//! use duplicate_finder::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default());
//! let (sets, summary) = finder.find_duplicates(Path::new("/some/path")).unwrap();
//!
//! println!("Found {} duplicate sets", summary.duplicate_sets);
//! println!("Reclaimable space: {}", summary.reclaimable_display());
//! ```

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::report::format_size;
use crate::scanner::{FileRecord, HashError, Hasher, ScanConfig, ScanError, Walker};

use super::groups::{group_by_fingerprint, DuplicateSet};

/// How often to log fingerprinting progress, in files.
const PROGRESS_INTERVAL: usize = 100;

/// Errors that abort a duplicate scan.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The scan was interrupted by the user (Ctrl+C).
    #[error("Scan interrupted by user")]
    Interrupted,

    /// The scan root does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The scan root is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

impl FinderError {
    /// Whether this error means the scan root was rejected before scanning.
    #[must_use]
    pub fn is_invalid_root(&self) -> bool {
        matches!(self, Self::PathNotFound(_) | Self::NotADirectory(_))
    }
}

/// Configuration for the duplicate finder.
#[derive(Debug, Clone, Default)]
pub struct FinderConfig {
    /// Scan configuration for traversal and filtering.
    pub scan: ScanConfig,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
}

impl FinderConfig {
    /// Set the scan configuration.
    #[must_use]
    pub fn with_scan_config(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Number of files that passed the filters and entered fingerprinting
    pub total_files: usize,
    /// Total size of those files in bytes
    pub total_size: u64,
    /// Number of files successfully fingerprinted
    pub fingerprinted_files: usize,
    /// Per-file warnings collected during the scan (skipped files)
    pub scan_errors: Vec<ScanError>,
    /// Number of duplicate sets found
    pub duplicate_sets: usize,
    /// Number of redundant files across all sets (excluding keepers)
    pub duplicate_files: usize,
    /// Space reclaimable by removing all redundant files
    pub reclaimable_space: u64,
    /// Duration of the scan
    pub scan_duration: std::time::Duration,
}

impl ScanSummary {
    /// Number of files skipped with a warning.
    #[must_use]
    pub fn skipped_files(&self) -> usize {
        self.scan_errors.len()
    }

    /// Format reclaimable space as a human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        format_size(self.reclaimable_space)
    }

    /// Format total scanned size as a human-readable string.
    #[must_use]
    pub fn total_size_display(&self) -> String {
        format_size(self.total_size)
    }
}

/// Duplicate finder that runs the scan pipeline.
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let mut hasher = Hasher::new();
        if let Some(ref flag) = config.shutdown_flag {
            hasher = hasher.with_shutdown_flag(Arc::clone(flag));
        }
        Self { config, hasher }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find all duplicate files under the given root.
    ///
    /// Runs the full pipeline and returns the duplicate sets in discovery
    /// order along with summary statistics. Unreadable files are skipped
    /// and recorded in `ScanSummary::scan_errors`.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - the root does not exist (`PathNotFound`)
    /// - the root is not a directory (`NotADirectory`)
    /// - the scan is interrupted by the shutdown flag (`Interrupted`)
    pub fn find_duplicates(
        &self,
        path: &std::path::Path,
    ) -> Result<(Vec<DuplicateSet>, ScanSummary), FinderError> {
        let start_time = std::time::Instant::now();
        let mut summary = ScanSummary::default();

        // Root validation happens before any scanning output
        if !path.exists() {
            return Err(FinderError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(FinderError::NotADirectory(path.to_path_buf()));
        }

        log::info!("Scanning {} for duplicates", path.display());
        log::info!(
            "Recursive: {}, minimum size: {} bytes",
            self.config.scan.recursive,
            self.config.scan.min_size
        );

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        let walker = Walker::new(path, self.config.scan.clone());
        let mut records: Vec<FileRecord> = Vec::new();

        for result in walker.walk() {
            if self.config.is_shutdown_requested() {
                return Err(FinderError::Interrupted);
            }

            match result {
                Ok(entry) => {
                    summary.total_files += 1;
                    summary.total_size += entry.size;

                    match self.hasher.fingerprint(&entry.path) {
                        Ok(fingerprint) => {
                            records.push(FileRecord::new(entry.path, entry.size, fingerprint));
                            summary.fingerprinted_files += 1;

                            if summary.fingerprinted_files % PROGRESS_INTERVAL == 0 {
                                log::info!(
                                    "Fingerprinted {} of {} discovered files",
                                    summary.fingerprinted_files,
                                    summary.total_files
                                );
                            }
                        }
                        Err(HashError::Interrupted(_)) => {
                            return Err(FinderError::Interrupted);
                        }
                        Err(e) => {
                            log::warn!("Skipping unreadable file {}: {}", entry.path.display(), e);
                            summary.scan_errors.push(ScanError::from(e));
                        }
                    }
                }
                Err(e) => {
                    summary.scan_errors.push(e);
                }
            }
        }

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        log::info!(
            "Scanned {} files ({})",
            summary.total_files,
            summary.total_size_display()
        );

        let (sets, stats) = group_by_fingerprint(records);

        summary.duplicate_sets = stats.duplicate_sets;
        summary.duplicate_files = stats.duplicate_files;
        summary.reclaimable_space = stats.reclaimable_space;
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete in {:.2?}: {} duplicate sets, {} redundant files, {} reclaimable",
            summary.scan_duration,
            summary.duplicate_sets,
            summary.duplicate_files,
            summary.reclaimable_display()
        );

        Ok((sets, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn test_find_duplicates_path_not_found() {
        let finder = DuplicateFinder::with_defaults();
        let result = finder.find_duplicates(Path::new("/nonexistent/path/12345"));

        match result {
            Err(FinderError::PathNotFound(p)) => {
                assert_eq!(p, Path::new("/nonexistent/path/12345"));
            }
            other => panic!("Expected PathNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_find_duplicates_not_a_directory() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("plain.txt");
        fs::write(&file_path, "not a directory").unwrap();

        let finder = DuplicateFinder::with_defaults();
        let result = finder.find_duplicates(&file_path);

        assert!(matches!(result, Err(FinderError::NotADirectory(_))));
    }

    #[test]
    fn test_invalid_root_classification() {
        assert!(FinderError::PathNotFound(PathBuf::from("/x")).is_invalid_root());
        assert!(FinderError::NotADirectory(PathBuf::from("/x")).is_invalid_root());
        assert!(!FinderError::Interrupted.is_invalid_root());
    }

    #[test]
    fn test_find_duplicates_empty_directory() {
        let dir = tempdir().unwrap();
        let finder = DuplicateFinder::with_defaults();

        let (sets, summary) = finder.find_duplicates(dir.path()).unwrap();

        assert!(sets.is_empty());
        assert_eq!(summary.total_files, 0);
        assert_eq!(summary.duplicate_sets, 0);
    }

    #[test]
    fn test_find_duplicates_across_subdirectories() {
        let dir = tempdir().unwrap();

        fs::create_dir(dir.path().join("a")).unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("a/x.txt"), "same content").unwrap();
        fs::write(dir.path().join("b/y.txt"), "same content").unwrap();
        fs::write(dir.path().join("unique.txt"), "something else").unwrap();

        let finder = DuplicateFinder::with_defaults();
        let (sets, summary) = finder.find_duplicates(dir.path()).unwrap();

        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].len(), 2);
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.duplicate_sets, 1);
        assert_eq!(summary.duplicate_files, 1);
    }

    #[test]
    fn test_find_duplicates_min_size_filter() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("small1.txt"), "tiny").unwrap();
        fs::write(dir.path().join("small2.txt"), "tiny").unwrap();
        let big = "LARGE".repeat(100);
        fs::write(dir.path().join("big1.txt"), &big).unwrap();
        fs::write(dir.path().join("big2.txt"), &big).unwrap();

        let config = FinderConfig::default().with_scan_config(ScanConfig::new(true, 100));
        let finder = DuplicateFinder::new(config);
        let (sets, summary) = finder.find_duplicates(dir.path()).unwrap();

        // Only the big pair passes the filter
        assert_eq!(summary.total_files, 2);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].file_size(), 500);
    }

    #[test]
    fn test_find_duplicates_non_recursive() {
        let dir = tempdir().unwrap();

        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("top.txt"), "shared").unwrap();
        fs::write(dir.path().join("nested/deep.txt"), "shared").unwrap();

        let config = FinderConfig::default().with_scan_config(ScanConfig::new(false, 0));
        let finder = DuplicateFinder::new(config);
        let (sets, summary) = finder.find_duplicates(dir.path()).unwrap();

        // The nested copy is invisible, so no duplicate set forms
        assert!(sets.is_empty());
        assert_eq!(summary.total_files, 1);
    }

    #[test]
    fn test_find_duplicates_keeper_is_first_discovered() {
        let dir = tempdir().unwrap();

        fs::create_dir(dir.path().join("a")).unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("a/x.txt"), "hello").unwrap();
        fs::write(dir.path().join("b/y.txt"), "hello").unwrap();

        let finder = DuplicateFinder::with_defaults();
        let (sets, _) = finder.find_duplicates(dir.path()).unwrap();

        // Lexicographic traversal discovers a/x.txt before b/y.txt
        assert_eq!(sets.len(), 1);
        assert_eq!(
            sets[0].keeper().unwrap().path.file_name().unwrap(),
            "x.txt"
        );
    }

    #[test]
    fn test_find_duplicates_interrupted() {
        let dir = tempdir().unwrap();
        let mut f = File::create(dir.path().join("a.txt")).unwrap();
        writeln!(f, "content").unwrap();

        let flag = Arc::new(AtomicBool::new(true));
        let config = FinderConfig::default().with_shutdown_flag(flag);
        let finder = DuplicateFinder::new(config);

        let result = finder.find_duplicates(dir.path());
        assert!(matches!(result, Err(FinderError::Interrupted)));
    }

    #[test]
    fn test_summary_skipped_files_counts_errors() {
        let summary = ScanSummary {
            scan_errors: vec![
                ScanError::NotFound(PathBuf::from("/gone.txt")),
                ScanError::PermissionDenied(PathBuf::from("/secret.txt")),
            ],
            ..Default::default()
        };

        assert_eq!(summary.skipped_files(), 2);
    }

    #[test]
    fn test_summary_display_helpers() {
        let summary = ScanSummary {
            total_size: 2048,
            reclaimable_space: 1024,
            ..Default::default()
        };

        assert_eq!(summary.total_size_display(), "2.0 KB");
        assert_eq!(summary.reclaimable_display(), "1.0 KB");
    }
}
