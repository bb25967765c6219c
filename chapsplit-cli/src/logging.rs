// ============================================================================
// chapsplit-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and File Logging for the CLI
//
// The core library only talks to the `log` facade. This module installs the
// backend: a fern dispatch that writes styled lines to stderr and, when a log
// directory is given, a plain-text debug log next to it.
//
// KEY COMPONENTS:
// - init_logging: installs the global logger
// - get_timestamp: timestamp used in log file names
//
// AI-ASSISTANT-INFO: fern-based logging setup for console and file output

// ---- External crate imports ----
use console::style;
use log::{Level, LevelFilter};

// ---- Standard library imports ----
use std::fs;
use std::path::{Path, PathBuf};

// ---- Internal crate imports ----
use crate::error::{CliError, CliResult};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// # Example
/// ```
/// let log_filename = format!("chapsplit_{}.log", chapsplit_cli::logging::get_timestamp());
/// assert!(log_filename.starts_with("chapsplit_"));
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Path of the log file for a run started now.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(format!("chapsplit_{}.log", get_timestamp()))
}

/// Installs the global logger.
///
/// The console gets `info` and above (`debug` with `verbose`). If `log_dir`
/// is set, every record down to `debug` is also appended to a timestamped
/// file in it, and the path of that file is returned.
///
/// Must be called at most once per process.
pub fn init_logging(verbose: bool, log_dir: Option<&Path>) -> CliResult<Option<PathBuf>> {
    let console_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let console = fern::Dispatch::new()
        .level(console_level)
        .format(|out, message, record| {
            let level = match record.level() {
                Level::Error => style("ERROR").red().bold(),
                Level::Warn => style("WARN ").yellow(),
                Level::Info => style("INFO ").green(),
                Level::Debug => style("DEBUG").blue(),
                Level::Trace => style("TRACE").magenta(),
            };
            out.finish(format_args!("{} {}", level, message))
        })
        .chain(std::io::stderr());

    let mut dispatch = fern::Dispatch::new().chain(console);

    let log_path = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir).map_err(|e| CliError::Logging {
                path: dir.to_path_buf(),
                source: e,
            })?;
            let path = log_file_path(dir);
            let file = fern::log_file(&path).map_err(|e| CliError::Logging {
                path: path.clone(),
                source: e,
            })?;
            dispatch = dispatch.chain(
                fern::Dispatch::new()
                    .level(LevelFilter::Debug)
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "[{} {:<5} {}] {}",
                            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                            record.level(),
                            record.target(),
                            message
                        ))
                    })
                    .chain(file),
            );
            Some(path)
        }
        None => None,
    };

    dispatch.apply().map_err(|e| CliError::LoggerInstalled(e.to_string()))?;

    if let Some(path) = &log_path {
        log::debug!("Writing log file to {}", path.display());
    }
    Ok(log_path)
}
