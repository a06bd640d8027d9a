//! duplicate-finder - Find duplicate files by content
//!
//! A cross-platform CLI tool that walks a directory tree, fingerprints
//! file contents with BLAKE3, groups identical files into duplicate sets,
//! and reports or deletes the redundant copies.

pub mod actions;
pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod report;
pub mod scanner;
pub mod signal;

use cli::{Cli, RunMode};
use duplicates::{DuplicateFinder, FinderConfig};
use error::ExitCode;
use scanner::ScanConfig;

/// Run the application with parsed CLI arguments.
///
/// Drives the whole pipeline: scan, group, then report, preview or delete
/// depending on the resolved run mode. Non-fatal per-file problems are
/// summarized at the end of the run; only an invalid root or an interrupt
/// surfaces as an error.
///
/// # Errors
///
/// Returns an error when the scan root is rejected
/// ([`duplicates::FinderError::PathNotFound`] /
/// [`duplicates::FinderError::NotADirectory`]) or the run is interrupted
/// ([`duplicates::FinderError::Interrupted`]).
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let handler = signal::install_handler()?;

    let config = FinderConfig::default()
        .with_scan_config(ScanConfig::new(cli.recursive, cli.min_size))
        .with_shutdown_flag(handler.get_flag());
    let finder = DuplicateFinder::new(config);

    let (sets, summary) = finder.find_duplicates(&cli.directory)?;

    println!("{}", report::render_report(&sets, cli.show_size));

    match cli.mode() {
        RunMode::Report => {}
        RunMode::DryRun => {
            println!("{}", report::render_dry_run(&sets));
        }
        RunMode::Delete => {
            if !sets.is_empty() {
                log::info!("Deleting duplicate files...");
                let flag = handler.get_flag();
                let result = actions::delete_redundant(&sets, Some(&flag));

                log::info!("{}", report::delete_summary(&result));
                if !result.all_succeeded() {
                    log::warn!("{} deletion(s) failed", result.failure_count());
                }
            }
        }
    }

    if summary.skipped_files() > 0 {
        log::warn!("{} file(s) skipped during scan", summary.skipped_files());
    }

    if handler.is_shutdown_requested() {
        return Ok(ExitCode::Interrupted);
    }

    Ok(ExitCode::Success)
}
