// ============================================================================
// chapsplit-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Errors that stop a chapsplit run
//
// Wraps the core library's CoreError with the context the CLI adds (which
// input was being probed, where logs were going) and maps each error to the
// process exit code.
//
// AI-ASSISTANT-INFO: CLI error type and exit code mapping

// ---- External crate imports ----
use thiserror::Error;

// ---- Internal crate imports ----
use chapsplit_core::CoreError;

// ---- Standard library imports ----
use std::io;
use std::path::PathBuf;

/// Exit code for runs that could not read the input.
pub const EXIT_INPUT_FAILURE: i32 = 1;

/// Exit code for inputs without chapters.
pub const EXIT_NOTHING_TO_DO: i32 = 2;

/// Exit code for batches where some chapters failed or went missing.
pub const EXIT_BATCH_FAILURE: i32 = 3;

/// Type alias for CLI results.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// The input path does not exist or is not a regular file.
    #[error("Invalid input path '{}': {source}", .path.display())]
    InvalidInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// ffprobe could not be run or its output could not be read.
    #[error("Failed to read chapters from '{}': {source}", .path.display())]
    Probe {
        path: PathBuf,
        #[source]
        source: CoreError,
    },

    /// The log directory or file could not be created.
    #[error("Failed to set up logging at '{}': {source}", .path.display())]
    Logging {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A global logger was already installed.
    #[error("Failed to install logger: {0}")]
    LoggerInstalled(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CliError {
    /// Every error that stops a run before extraction maps to the same code.
    pub fn exit_code(&self) -> i32 {
        EXIT_INPUT_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_exit_codes() {
        let missing_ffmpeg = CliError::from(CoreError::DependencyNotFound("ffmpeg".to_string()));
        assert_eq!(missing_ffmpeg.exit_code(), EXIT_INPUT_FAILURE);
        assert_eq!(
            missing_ffmpeg.to_string(),
            "Required external tool 'ffmpeg' was not found in PATH"
        );

        let probe = CliError::Probe {
            path: PathBuf::from("in.m4b"),
            source: CoreError::DependencyNotFound("ffprobe".to_string()),
        };
        assert_eq!(probe.exit_code(), EXIT_INPUT_FAILURE);
    }

    #[test]
    fn test_probe_message_names_input() {
        let err = CliError::Probe {
            path: PathBuf::from("in.m4b"),
            source: CoreError::DependencyNotFound("ffprobe".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read chapters from 'in.m4b': Required external tool 'ffprobe' was not found in PATH"
        );
        assert!(err.source().is_some());
    }
}
