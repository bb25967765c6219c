// ============================================================================
// chapsplit-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffprobe and ffmpeg
//
// This module encapsulates every interaction with external command-line
// tools. ffprobe is used once per input to read chapter metadata; ffmpeg is
// run once per work item to copy a chapter out of the input.
//
// KEY COMPONENTS:
// - ExtractionRunner trait and the ffmpeg-backed FfmpegRunner
// - read_chapters / read_file for probing inputs
// - Dependency checking
//
// DESIGN PHILOSOPHY:
// The execution engine depends on the ExtractionRunner trait rather than on
// ffmpeg directly, so tests can substitute their own runners.
//
// AI-ASSISTANT-INFO: External tool interactions for ffmpeg/ffprobe

// ---- Internal crate imports ----
use crate::error::{CoreResult, command_start_error};

// ---- Standard library imports ----
use std::ffi::OsStr;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Runs ffmpeg for a single work item
pub mod ffmpeg_executor;

/// Reads chapter metadata with ffprobe
pub mod ffprobe_executor;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{ExtractionRunner, FfmpegRunner, ensure_output_dir};
pub use ffprobe_executor::{
    FFPROBE_PROGRAM, probe_command_args, read_chapters, read_chapters_with, read_file,
    read_file_with,
};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that an external command is available and can be started.
///
/// Runs `<cmd_name> -version` with its output discarded. Only the ability to
/// launch the binary is checked, not its exit status.
///
/// # Errors
///
/// * `CoreError::DependencyNotFound` if the command is not in `$PATH`
/// * `CoreError::CommandStart` if it exists but cannot be started
pub fn check_dependency(cmd_name: impl AsRef<OsStr>) -> CoreResult<()> {
    let program = cmd_name.as_ref();
    let cmd_name = program.to_string_lossy();
    let result = Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) => {
            log::warn!("Dependency check for '{}' failed: {}", cmd_name, e);
            Err(command_start_error(&*cmd_name, e))
        }
    }
}
