// ============================================================================
// chapsplit-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Running One Chapter Extraction
//
// This module defines the seam between the execution engine and the external
// ffmpeg process. The engine only knows the ExtractionRunner trait; the
// production implementation spawns ffmpeg, while tests plug in doubles that
// count calls or simulate failures.
//
// KEY COMPONENTS:
// - ExtractionRunner: Trait for executing one WorkItem
// - FfmpegRunner: Concrete implementation spawning ffmpeg from $PATH
//
// AI-ASSISTANT-INFO: ffmpeg process execution for chapter extraction

use crate::error::{ExtractionError, trim_diagnostic};
use crate::processing::planner::{FFMPEG_PROGRAM, WorkItem};
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

/// Something that can perform the extraction described by a [`WorkItem`].
///
/// Implementations are shared by reference across worker threads, hence the
/// `Sync` requirement at the engine's call sites.
pub trait ExtractionRunner {
    /// Runs the extraction to completion, blocking the calling thread.
    fn run(&self, item: &WorkItem) -> Result<(), ExtractionError>;
}

impl<F> ExtractionRunner for F
where
    F: Fn(&WorkItem) -> Result<(), ExtractionError>,
{
    fn run(&self, item: &WorkItem) -> Result<(), ExtractionError> {
        self(item)
    }
}

/// Runs each work item through an ffmpeg subprocess.
#[derive(Debug, Clone)]
pub struct FfmpegRunner {
    program: OsString,
}

impl Default for FfmpegRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegRunner {
    pub fn new() -> Self {
        Self::with_program(FFMPEG_PROGRAM)
    }

    /// Uses a different binary, e.g. an absolute path to a specific ffmpeg build.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Program name as shown in error messages.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl ExtractionRunner for FfmpegRunner {
    fn run(&self, item: &WorkItem) -> Result<(), ExtractionError> {
        ensure_output_dir(&item.out_directory)?;

        log::debug!("Running {:?} {:?}", self.program, item.ffmpeg_args());

        // stdout stays empty on success; stderr carries the diagnostic on failure
        let output = Command::new(&self.program)
            .args(item.ffmpeg_args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ExtractionError::Launch {
                program: self.program_name(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if output.status.success() && trim_diagnostic(&stderr).is_empty() {
            Ok(())
        } else {
            Err(ExtractionError::tool_failed(
                self.program_name(),
                output.status,
                &output.stderr,
            ))
        }
    }
}

/// Creates the output directory and any missing parents.
///
/// Safe to call concurrently for the same path: an existing directory is
/// treated as success.
pub fn ensure_output_dir(dir: &Path) -> Result<(), ExtractionError> {
    fs::create_dir_all(dir).map_err(|source| ExtractionError::CreateOutputDir {
        path: dir.to_path_buf(),
        source,
    })
}
