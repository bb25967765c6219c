//! FFprobe integration for reading chapter metadata.
//!
//! Runs `ffprobe -show_chapters` on the input file, decodes the JSON it
//! prints and wraps the result in [`InputFileMetadata`].
use crate::chapters::{InputFileMetadata, ProbeOutput};
use crate::error::{CoreResult, command_failed_error, command_start_error};
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{Command, Stdio};

/// Name of the probe binary; expected somewhere in `$PATH`.
pub const FFPROBE_PROGRAM: &str = "ffprobe";

/// Arguments used to read chapter information from `infile`.
///
/// [`read_chapters`] uses these internally; they are public for debugging
/// and dry-run output.
pub fn probe_command_args(infile: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-i".into(), infile.as_os_str().to_os_string()];
    args.extend(["-v", "error", "-print_format", "json", "-show_chapters"].map(OsString::from));
    args
}

/// Reads chapter information from `infile` with ffprobe.
///
/// Blocks until ffprobe exits. Launch failures, non-zero exits and malformed
/// output are all returned as errors.
pub fn read_chapters(infile: &Path) -> CoreResult<ProbeOutput> {
    read_chapters_with(FFPROBE_PROGRAM, infile)
}

/// Like [`read_chapters`], running `program` instead of the ffprobe in `$PATH`.
pub fn read_chapters_with(program: impl AsRef<OsStr>, infile: &Path) -> CoreResult<ProbeOutput> {
    let program = program.as_ref();
    let name = program.to_string_lossy();
    log::debug!("Running {} for chapters on: {}", name, infile.display());

    let output = Command::new(program)
        .args(probe_command_args(infile))
        .stdin(Stdio::null())
        .output()
        .map_err(|e| command_start_error(&*name, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::error!("ffprobe failed on {}: {}", infile.display(), stderr.trim_end());
        return Err(command_failed_error(&*name, output.status, stderr));
    }

    let probe = ProbeOutput::from_json(&output.stdout)?;
    log::debug!(
        "ffprobe found {} chapter(s) in {} (max id {})",
        probe.chapters().len(),
        infile.display(),
        probe.max_chapter_id()
    );
    Ok(probe)
}

/// Probes `infile` and bundles the chapters with its base name and extension.
pub fn read_file(infile: &Path) -> CoreResult<InputFileMetadata> {
    read_file_with(FFPROBE_PROGRAM, infile)
}

pub fn read_file_with(program: impl AsRef<OsStr>, infile: &Path) -> CoreResult<InputFileMetadata> {
    let probe = read_chapters_with(program, infile)?;
    Ok(InputFileMetadata::new(infile, probe))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_probe_command_args() {
        let args = probe_command_args(Path::new("/media/book.m4b"));
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            ["-i", "/media/book.m4b", "-v", "error", "-print_format", "json", "-show_chapters"]
        );
    }

    #[test]
    fn test_missing_probe_program() {
        let err = read_chapters_with("/nonexistent/ffprobe", Path::new("in.m4b")).unwrap_err();
        assert!(
            matches!(err, CoreError::DependencyNotFound(ref name) if name == "/nonexistent/ffprobe")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_probe_reports_stderr() {
        // `false` ignores its arguments and exits 1 without output
        let err = read_chapters_with("false", Path::new("in.m4b")).unwrap_err();
        match err {
            CoreError::CommandFailed { command, status, stderr } => {
                assert_eq!(command, "false");
                assert_eq!(status.code(), Some(1));
                assert!(stderr.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_json_output_is_a_parse_error() {
        // `true` exits 0 with empty stdout
        let err = read_chapters_with("true", Path::new("in.m4b")).unwrap_err();
        assert!(matches!(err, CoreError::JsonParse(_)));
    }
}
