//! duplicate-finder - Find duplicate files by content
//!
//! Entry point for the duplicate-finder CLI application.

use clap::Parser;
use duplicate_finder::{
    cli::Cli,
    duplicates::FinderError,
    error::{ExitCode, StructuredError},
};

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();
    let json_errors = cli.json_errors;

    // Run the application logic
    match duplicate_finder::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            // Determine the appropriate exit code for the error
            let exit_code = match err.downcast_ref::<FinderError>() {
                Some(FinderError::Interrupted) => ExitCode::Interrupted,
                Some(e) if e.is_invalid_root() => ExitCode::InvalidRoot,
                _ => ExitCode::GeneralError,
            };

            // Report the error
            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                if let Ok(json) = serde_json::to_string_pretty(&structured) {
                    eprintln!("{}", json);
                } else {
                    eprintln!("[{}] Error: {}", exit_code.code_prefix(), err);
                }
            } else {
                eprintln!("[{}] Error: {}", exit_code.code_prefix(), err);
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
