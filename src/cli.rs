//! Command-line interface definitions.
//!
//! This module defines the single-command CLI surface using the clap derive
//! API, along with the custom value parsers for the `-r true|false` flag and
//! byte-size arguments.
//!
//! # Example
//!
//! ```bash
//! # Report duplicates under a directory tree
//! duplicate-finder ~/Downloads
//!
//! # Only the top-level directory, files of at least 1 KiB
//! duplicate-finder ~/Downloads -r false --min-size 1KiB
//!
//! # Preview what --delete would remove
//! duplicate-finder ~/Downloads --dry-run
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Find duplicate files by content and optionally remove redundant copies.
///
/// Files are fingerprinted with a BLAKE3 content hash; files sharing a
/// fingerprint form a duplicate set. In delete mode the first-discovered
/// member of each set is kept and the rest are removed.
#[derive(Debug, Parser)]
#[command(name = "duplicate-finder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicates
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Search subdirectories (true/false)
    #[arg(
        short = 'r',
        long = "recursive",
        value_name = "BOOL",
        default_value = "true",
        action = clap::ArgAction::Set,
        value_parser = parse_bool
    )]
    pub recursive: bool,

    /// Minimum file size to consider, in bytes
    ///
    /// Plain integers are bytes; suffixes such as KB, KiB, MB, MiB are
    /// also accepted.
    #[arg(long, value_name = "BYTES", default_value = "0", value_parser = parse_size)]
    pub min_size: u64,

    /// Include file sizes in the report
    #[arg(long)]
    pub show_size: bool,

    /// Print what would be deleted without deleting anything
    ///
    /// Takes precedence over --delete when both are given.
    #[arg(long)]
    pub dry_run: bool,

    /// Delete duplicate files, keeping the first occurrence in each set
    #[arg(long)]
    pub delete: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Emit fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// What to do with the duplicate sets once found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Print the duplicate report only.
    Report,
    /// Print the report plus the deletions that would be performed.
    DryRun,
    /// Delete all but the first member of each duplicate set.
    Delete,
}

impl Cli {
    /// Resolve the run mode from the `--dry-run`/`--delete` flags.
    ///
    /// `--dry-run` strictly overrides `--delete`: passing both previews the
    /// deletions without performing them.
    #[must_use]
    pub fn mode(&self) -> RunMode {
        if self.dry_run {
            RunMode::DryRun
        } else if self.delete {
            RunMode::Delete
        } else {
            RunMode::Report
        }
    }
}

/// Parse a `true`/`false` flag value, case-insensitively.
///
/// # Errors
///
/// Returns an error for anything other than true/false/yes/no/1/0.
pub fn parse_bool(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(format!("Expected true or false, got '{other}'")),
    }
}

/// Parse a human-readable size string into bytes.
///
/// Plain numbers are bytes. Supports suffixes: B, KB, KiB, MB, MiB, GB,
/// GiB, TB, TiB (case-insensitive).
///
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid or
/// negative number, or an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    // Split the numeric prefix from the unit suffix
    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    if num < 0.0 {
        return Err("Size cannot be negative".to_string());
    }

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        "TB" | "T" => 1_000_000_000_000,
        "TIB" => 1_099_511_627_776,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}
