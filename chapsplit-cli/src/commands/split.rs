// ============================================================================
// chapsplit-cli/src/commands/split.rs
// ============================================================================
//
// SPLIT COMMAND: Probe, plan and extract
//
// 1. Check the input file and read its chapters with ffprobe.
// 2. Turn the command-line flags into OutFileOpts and plan one WorkItem per
//    surviving chapter.
// 3. Either print the chapters or commands (dry runs) or run the batch
//    through the core execution engine and report the final Status.
//
// AI-ASSISTANT-INFO: Main command flow of the chapsplit binary

// ---- External crate imports ----
use chapsplit_core::config::OutFileOpts;
use chapsplit_core::{FfmpegRunner, InputFileMetadata, Status, WorkItem, check_dependency};
use console::style;

// ---- Standard library imports ----
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

// ---- Internal crate imports ----
use crate::cli::Cli;
use crate::error::{CliError, CliResult, EXIT_BATCH_FAILURE, EXIT_NOTHING_TO_DO};
use crate::progress::BarReporter;

/// How a run ended when no error stopped it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOutcome {
    /// A dry run printed what it was asked for.
    Listed,
    /// The input has no chapters.
    NoChapters,
    /// The extraction batch ran to completion.
    Finished(Status),
}

impl SplitOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            SplitOutcome::Listed => 0,
            SplitOutcome::NoChapters => EXIT_NOTHING_TO_DO,
            SplitOutcome::Finished(status) if status.is_complete_success() => 0,
            SplitOutcome::Finished(_) => EXIT_BATCH_FAILURE,
        }
    }
}

/// Maps the naming and metadata flags onto core options.
pub fn build_options(cli: &Cli) -> OutFileOpts {
    let mut builder = OutFileOpts::builder()
        .use_title_in_name(!cli.no_use_title)
        .use_title_in_meta(!cli.no_title_meta)
        .use_chapter_number_in_meta(!cli.no_track_meta)
        .enum_offset(cli.enum_offset)
        .enum_padded_width(cli.enum_width);
    if let Some(ext) = &cli.swap_extension {
        builder = builder.alternate_extension(ext.trim_start_matches('.'));
    }
    if let Some(selection) = &cli.select_chapters {
        builder = builder.add_filter(selection.clone().into_filter());
    }
    builder.build()
}

/// Runs chapsplit for the parsed command line.
pub fn run_split(cli: &Cli) -> CliResult<SplitOutcome> {
    let total_start_time = Instant::now();

    validate_input(&cli.infile)?;
    let imeta = chapsplit_core::read_file_with(&cli.ffprobe, &cli.infile).map_err(|e| {
        CliError::Probe {
            path: cli.infile.clone(),
            source: e,
        }
    })?;

    if imeta.num_chapters() == 0 {
        log::error!("No chapters found in {}", cli.infile.display());
        return Ok(SplitOutcome::NoChapters);
    }
    log::info!("Found {} chapter(s) in {}", imeta.num_chapters(), cli.infile.display());

    if cli.only_show_chapters {
        println!("Found {} chapter(s):", imeta.num_chapters());
        for chapter in imeta.probe_output.chapters() {
            println!("{chapter}");
        }
        return Ok(SplitOutcome::Listed);
    }

    let opts = build_options(cli);
    let items = imeta.compute_work_items(&cli.outdir, &opts);
    if items.is_empty() {
        log::warn!("No chapters left after applying filters");
    }

    if cli.only_show_commands {
        for item in &items {
            println!("{}", format_command(&cli.ffmpeg, item));
        }
        return Ok(SplitOutcome::Listed);
    }

    check_dependency(&cli.ffmpeg)?;

    let runner = FfmpegRunner::with_program(cli.ffmpeg.as_os_str());
    let reporter = BarReporter::for_terminal(cli.verbose);
    let status = chapsplit_core::process_with(&items, cli.concurrency_limit(), &runner, &reporter);

    print_summary(&status, &imeta, &cli.outdir, total_start_time);
    Ok(SplitOutcome::Finished(status))
}

fn validate_input(infile: &Path) -> CliResult<()> {
    let metadata = fs::metadata(infile).map_err(|e| CliError::InvalidInput {
        path: infile.to_path_buf(),
        source: e,
    })?;
    if !metadata.is_file() {
        return Err(CliError::InvalidInput {
            path: infile.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    Ok(())
}

fn print_summary(status: &Status, imeta: &InputFileMetadata, outdir: &Path, started: Instant) {
    let elapsed = started.elapsed().as_secs_f64();
    if status.is_complete_success() {
        println!(
            "{} {} chapter(s) of {} written to {} in {:.1}s",
            style("Done:").green().bold(),
            status.successful,
            imeta.path.display(),
            outdir.display(),
            elapsed
        );
    } else {
        println!("{} {}", style("Incomplete:").red().bold(), status);
    }
}

/// Renders the ffmpeg invocation for `item` as a copy-pasteable shell line.
pub fn format_command(program: &Path, item: &WorkItem) -> String {
    std::iter::once(program.as_os_str())
        .chain(item.ffmpeg_args().iter().map(|a| a.as_os_str()))
        .map(quote_arg)
        .collect::<Vec<_>>()
        .join(" ")
}

/// POSIX shell quoting: plain words are kept, everything else is
/// single-quoted.
fn quote_arg(arg: &OsStr) -> String {
    let text = arg.to_string_lossy();
    let is_plain = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+%@".contains(c));
    if is_plain {
        text.into_owned()
    } else {
        format!("'{}'", text.replace('\'', r"'\''"))
    }
}
