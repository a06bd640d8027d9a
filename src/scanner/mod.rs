//! Scanner module for directory traversal and file fingerprinting.
//!
//! The scanner is divided into submodules:
//! - [`walker`]: deterministic directory traversal and file discovery
//! - [`hasher`]: streaming BLAKE3 content fingerprinting
//!
//! # Example
//!
//! ```no_run
//! use duplicate_finder::scanner::{ScanConfig, Walker};
//! use std::path::Path;
//!
//! let config = ScanConfig {
//!     min_size: 1024, // skip files under 1 KiB
//!     ..Default::default()
//! };
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use hasher::{fingerprint_to_hex, Fingerprint, Hasher};
pub use walker::Walker;

/// A discovered regular file that passed the size filter.
///
/// Produced by the walker; consumed by the fingerprinting stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileEntry {
    /// Create a new file entry.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// A fingerprinted file.
///
/// Created once per surviving file during the scan; immutable and
/// discarded after grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// BLAKE3 digest of the full file content
    pub fingerprint: Fingerprint,
}

impl FileRecord {
    /// Create a new file record.
    #[must_use]
    pub fn new(path: PathBuf, size: u64, fingerprint: Fingerprint) -> Self {
        Self {
            path,
            size,
            fingerprint,
        }
    }

    /// Fingerprint as a lowercase hexadecimal string.
    #[must_use]
    pub fn fingerprint_hex(&self) -> String {
        fingerprint_to_hex(&self.fingerprint)
    }
}

/// Configuration for directory scanning.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Descend into subdirectories. When false, only direct children of
    /// the root are considered.
    pub recursive: bool,

    /// Minimum file size to include, in bytes. Files with
    /// `size >= min_size` pass; the boundary is inclusive.
    pub min_size: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            min_size: 0,
        }
    }
}

impl ScanConfig {
    /// Create a configuration from CLI arguments.
    #[must_use]
    pub fn new(recursive: bool, min_size: u64) -> Self {
        Self {
            recursive,
            min_size,
        }
    }
}

/// Errors that can occur while discovering files.
///
/// These are per-file conditions: the affected entry is skipped with a
/// warning and traversal continues.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The entry disappeared between discovery and inspection.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing an entry.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A file could not be fingerprinted.
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Errors that can occur during file fingerprinting.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The file was not found (it may have been deleted mid-scan).
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Hashing was aborted by a shutdown request.
    #[error("Interrupted while hashing {0}")]
    Interrupted(PathBuf),
}
