//! Signal handling for graceful shutdown.
//!
//! Centralized Ctrl+C handling built on an `AtomicBool` flag shared between
//! the signal handler thread and the scan/delete pipeline. When the flag is
//! set, the pipeline stops between files, so an interrupted run never leaves
//! a half-processed filesystem: deletion is whole-file removal and any file
//! not yet deleted remains untouched.
//!
//! An interrupted run exits with code 130 (128 + SIGINT).

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Shutdown coordinator for graceful termination.
///
/// Wraps an `AtomicBool` flag that is set when a Ctrl+C signal is received.
/// Clones share the same underlying flag.
#[derive(Debug, Clone)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a new handler with the flag initially unset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if shutdown has been requested.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Manually request a shutdown.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Get a clone of the shutdown flag for passing to the pipeline.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Reset the flag to unset. Used when the process-wide handler is reused.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl Default for ShutdownHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install a Ctrl+C handler that sets the shutdown flag on interrupt.
///
/// The underlying `ctrlc` hook can only be registered once per process, so
/// repeated calls (e.g. from tests running the app in-process) reuse the
/// existing handler with the flag reset. If registration fails because some
/// other code already owns the hook, an unhooked handler is returned; it
/// still works for manual `request_shutdown` calls.
///
/// # Errors
///
/// Currently infallible in practice; the `Result` is kept for the
/// registration error path of future `ctrlc` versions.
pub fn install_handler() -> Result<ShutdownHandler, SignalError> {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return Ok(handler.clone());
    }

    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    match ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);

        // stderr is line-buffered; flush so the message lands before exit
        let _ = writeln!(std::io::stderr(), "\nInterrupted. Finishing up...");
        let _ = std::io::stderr().flush();
    }) {
        Ok(()) => {
            let _ = GLOBAL_HANDLER.set(handler.clone());
            Ok(handler)
        }
        Err(_) => {
            if let Some(existing) = GLOBAL_HANDLER.get() {
                existing.reset();
                Ok(existing.clone())
            } else {
                log::debug!("Ctrl+C handler already registered, using unhooked handler");
                let fallback = ShutdownHandler::new();
                let _ = GLOBAL_HANDLER.set(fallback.clone());
                Ok(fallback)
            }
        }
    }
}
