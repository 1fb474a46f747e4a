//! Structured error handling and exit codes.

use serde::Serialize;

use crate::app::AppError;
use crate::duplicates::FinderError;

/// Process exit codes.
///
/// - 0: Success
/// - 1: General error (scan target missing, delete failed, ...)
/// - 2: Duplicate check ran but found no duplicates
/// - 3: Duplicate check had no files to look at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Completed normally.
    Success = 0,
    /// An error occurred.
    GeneralError = 1,
    /// Files were checked and none are duplicates.
    NoDuplicates = 2,
    /// There were no files to check.
    NothingToCheck = 3,
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
            Self::Success => "DS000",
            Self::GeneralError => "DS001",
            Self::NoDuplicates => "DS002",
            Self::NothingToCheck => "DS003",
        }
    }

    /// Exit code for an error that reached `main`.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        let finder = err.downcast_ref::<FinderError>().or_else(|| {
            match err.downcast_ref::<AppError>() {
                Some(AppError::Duplicates(inner)) => Some(inner),
                _ => None,
            }
        });
        match finder {
            Some(FinderError::NothingToCheck) => Self::NothingToCheck,
            None => Self::GeneralError,
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DS001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
