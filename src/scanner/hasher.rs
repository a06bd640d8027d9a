//! BLAKE3 file fingerprinting with streaming reads.
//!
//! Files are read in fixed-size chunks and fed to a BLAKE3 hasher, so
//! memory use stays constant regardless of file size. The resulting
//! 256-bit digest is the duplicate-equivalence key: equal digests are
//! treated as proof of identical content, with no byte-for-byte
//! re-verification.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::HashError;

/// A 256-bit BLAKE3 content digest.
pub type Fingerprint = [u8; 32];

/// Read buffer size for streaming hashing.
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Render a fingerprint as a lowercase hexadecimal string.
#[must_use]
pub fn fingerprint_to_hex(fingerprint: &Fingerprint) -> String {
    fingerprint.iter().map(|b| format!("{b:02x}")).collect()
}

/// Streaming file fingerprinter.
///
/// Carries an optional shutdown flag; when set, hashing aborts between
/// chunk reads so an interrupt does not have to wait for a large file.
#[derive(Debug, Default)]
pub struct Hasher {
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shutdown_flag: None,
        }
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

    /// Compute the BLAKE3 digest of the full file content.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the file no longer exists
    /// - `PermissionDenied` if the file cannot be opened or read
    /// - `Io` for other read failures
    /// - `Interrupted` if the shutdown flag was set mid-file
    pub fn fingerprint(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let mut file = File::open(path).map_err(|e| map_io_error(path, e))?;

        let mut hasher = blake3::Hasher::new();
        let mut buffer = vec![0u8; READ_BUFFER_SIZE];

        loop {
            if self.is_shutdown_requested() {
                return Err(HashError::Interrupted(path.to_path_buf()));
            }

            let bytes_read = file.read(&mut buffer).map_err(|e| map_io_error(path, e))?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(*hasher.finalize().as_bytes())
    }
}

/// Map an I/O error to the matching `HashError` variant.
fn map_io_error(path: &Path, error: io::Error) -> HashError {
    match error.kind() {
        io::ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}
