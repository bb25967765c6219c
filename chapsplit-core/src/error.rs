// ============================================================================
// chapsplit-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Core Library
//
// Two families of errors live here:
//
// - CoreError: run-stopping errors raised before any work item is planned
//   (probing the input, parsing ffprobe output, invalid selection
//   expressions, missing external tools).
// - ExtractionError: item-local failures produced while extracting a single
//   chapter. These are captured as data, reported per item and folded into
//   the batch Status. They never abort sibling items.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Custom error type for run-stopping failures in chapsplit-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Required external tool '{0}' was not found in PATH")]
    DependencyNotFound(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("{command} failed ({status}){}", format_stderr(.stderr))]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid chapter selection '{expression}': {reason}")]
    InvalidSelection { expression: String, reason: String },
}

/// Result type for chapsplit-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Builds the error for a command that could not be launched.
///
/// A missing binary is reported as `DependencyNotFound` so the caller can
/// give a precise hint instead of a raw OS error.
pub fn command_start_error(command: impl Into<String>, err: io::Error) -> CoreError {
    let command = command.into();
    if err.kind() == io::ErrorKind::NotFound {
        CoreError::DependencyNotFound(command)
    } else {
        CoreError::CommandStart(command, err)
    }
}

/// Builds the error for a command that ran but exited unsuccessfully.
pub fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    stderr: impl AsRef<str>,
) -> CoreError {
    CoreError::CommandFailed {
        command: command.into(),
        status,
        stderr: trim_diagnostic(stderr.as_ref()).to_string(),
    }
}

/// Strips the trailing (and leading) newlines external tools put around
/// their diagnostics.
pub fn trim_diagnostic(text: &str) -> &str {
    text.trim_matches(|c| c == '\n' || c == '\r')
}

// ============================================================================
// ITEM-LOCAL ERRORS
// ============================================================================

/// Failure of a single chapter extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("failed to create output directory '{}': {source}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{}", tool_failure_message(.program, .status, .stderr))]
    ToolFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

impl ExtractionError {
    /// Builds a `ToolFailed` from raw stderr bytes, trimming newlines.
    pub fn tool_failed(program: impl Into<String>, status: ExitStatus, stderr: &[u8]) -> Self {
        let text = String::from_utf8_lossy(stderr);
        ExtractionError::ToolFailed {
            program: program.into(),
            status,
            stderr: trim_diagnostic(&text).to_string(),
        }
    }
}

// Diagnostic text wins; an empty diagnostic falls back to the exit status.
fn tool_failure_message(program: &str, status: &ExitStatus, stderr: &str) -> String {
    if stderr.is_empty() {
        format!("{program} exited with {status}")
    } else {
        stderr.to_string()
    }
}
