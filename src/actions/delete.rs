//! Duplicate file deletion.
//!
//! # Overview
//!
//! Deletion operates on duplicate sets: the first member of each set (the
//! earliest in discovery order) is always preserved, every later member is
//! removed with `std::fs::remove_file`. Removal is whole-file and
//! immediate; an interrupt between files leaves everything not yet deleted
//! untouched.
//!
//! Failures on individual files (permission denied, already removed) are
//! collected as warnings and do not stop the remaining members or sets
//! from being processed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::duplicates::DuplicateSet;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (it may already have been removed).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Result of a successful deletion.
#[derive(Debug, Clone)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted file in bytes.
    pub size: u64,
}

impl DeleteResult {
    /// Create a new delete result.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Results of a batch deletion over duplicate sets.
#[derive(Debug, Clone, Default)]
pub struct BatchDeleteResult {
    /// Successfully deleted files.
    pub successes: Vec<DeleteResult>,
    /// Failed deletions with their error messages.
    pub failures: Vec<(PathBuf, String)>,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

impl BatchDeleteResult {
    /// Number of successful deletions.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed deletions.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Total number of attempted deletions.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Check if all deletions succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!(
                "Deleted {} file(s), freed {}",
                self.success_count(),
                crate::report::format_size(self.bytes_freed)
            )
        } else {
            format!(
                "Deleted {} file(s), {} failed, freed {}",
                self.success_count(),
                self.failure_count(),
                crate::report::format_size(self.bytes_freed)
            )
        }
    }
}

/// Remove a single file.
///
/// # Errors
///
/// - `NotFound` if the file no longer exists
/// - `PermissionDenied` if removal is not allowed
/// - `Io` for other failures
pub fn remove_file(path: &Path) -> Result<DeleteResult, DeleteError> {
    // Size is captured before removal for the bytes-freed accounting
    let metadata = fs::metadata(path).map_err(|e| map_io_error(path, e))?;
    let size = metadata.len();

    fs::remove_file(path).map_err(|e| map_io_error(path, e))?;

    log::info!("Deleted: {} ({} bytes)", path.display(), size);

    Ok(DeleteResult::new(path.to_path_buf(), size))
}

/// Delete the redundant members of every duplicate set.
///
/// The first member of each set is preserved; all later members are
/// removed. Per-file failures are logged and collected, and processing
/// continues with the remaining members and sets. When the shutdown flag
/// is set, the batch stops before the next removal and returns what was
/// done so far.
///
/// # Arguments
///
/// * `sets` - Duplicate sets with members in discovery order
/// * `shutdown_flag` - Optional flag polled between files
#[must_use]
pub fn delete_redundant(
    sets: &[DuplicateSet],
    shutdown_flag: Option<&AtomicBool>,
) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();

    for set in sets {
        if let Some(keeper) = set.keeper() {
            log::debug!("Keeping: {}", keeper.path.display());
        }

        for member in set.redundant_members() {
            if shutdown_flag.is_some_and(|f| f.load(Ordering::SeqCst)) {
                log::info!(
                    "Deletion interrupted; {} file(s) removed so far",
                    result.success_count()
                );
                return result;
            }

            match remove_file(&member.path) {
                Ok(deleted) => {
                    result.bytes_freed += deleted.size;
                    result.successes.push(deleted);
                }
                Err(e) => {
                    log::warn!("Failed to delete {}: {}", member.path.display(), e);
                    result.failures.push((member.path.clone(), e.to_string()));
                }
            }
        }
    }

    log::info!("{}", result.summary());

    result
}

/// Map an I/O error to the matching `DeleteError` variant.
fn map_io_error(path: &Path, error: io::Error) -> DeleteError {
    match error.kind() {
        io::ErrorKind::NotFound => DeleteError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => DeleteError::PermissionDenied(path.to_path_buf()),
        _ => DeleteError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}
