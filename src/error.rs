//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the duplicate-finder application.
///
/// - 0: Success (completed normally, whether or not duplicates were found)
/// - 1: General error (unexpected failure)
/// - 2: Invalid root (missing path or not a directory) or fatal setup error
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Scan completed normally.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Invalid root: The scan root is missing or not a directory.
    InvalidRoot = 2,
    /// Interrupted: The run was interrupted by the user (Ctrl+C).
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DF000",
            Self::GeneralError => "DF001",
            Self::InvalidRoot => "DF002",
            Self::Interrupted => "DF130",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DF002")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Whether the operation was interrupted
    pub interrupted: bool,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
            interrupted: exit_code == ExitCode::Interrupted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::InvalidRoot.as_i32(), 2);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_code_prefixes() {
        assert_eq!(ExitCode::Success.code_prefix(), "DF000");
        assert_eq!(ExitCode::InvalidRoot.code_prefix(), "DF002");
        assert_eq!(ExitCode::Interrupted.code_prefix(), "DF130");
    }

    #[test]
    fn test_structured_error_fields() {
        let err = anyhow::anyhow!("Not a directory: /some/file.txt");
        let structured = StructuredError::new(&err, ExitCode::InvalidRoot);

        assert_eq!(structured.code, "DF002");
        assert_eq!(structured.exit_code, 2);
        assert!(structured.message.contains("Not a directory"));
        assert!(!structured.interrupted);
    }

    #[test]
    fn test_structured_error_interrupted() {
        let err = anyhow::anyhow!("Scan interrupted by user");
        let structured = StructuredError::new(&err, ExitCode::Interrupted);

        assert!(structured.interrupted);
        assert_eq!(structured.exit_code, 130);
    }

    #[test]
    fn test_structured_error_serializes() {
        let err = anyhow::anyhow!("boom");
        let structured = StructuredError::new(&err, ExitCode::GeneralError);
        let json = serde_json::to_string(&structured).unwrap();

        assert!(json.contains("\"code\":\"DF001\""));
        assert!(json.contains("\"exit_code\":1"));
    }
}
