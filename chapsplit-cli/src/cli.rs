// chapsplit-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use chapsplit_core::ChapterSelection;
use chapsplit_core::config::{DEFAULT_ENUM_OFFSET, DEFAULT_ENUM_PADDED_WIDTH};
use clap::Parser;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Chapsplit: split a media file into one file per chapter",
    long_about = "Reads the chapters of a media file with ffprobe and copies each chapter \
                  into its own file with ffmpeg, without re-encoding."
)]
pub struct Cli {
    /// Media file to split
    #[arg(short = 'i', long = "infile", value_name = "INFILE")]
    pub infile: PathBuf,

    /// Directory where the chapter files are written (created if missing)
    #[arg(short = 'o', long = "outdir", value_name = "OUTDIR")]
    pub outdir: PathBuf,

    // --- Dry Runs ---
    /// Print the chapters found in the input and exit
    #[arg(long)]
    pub only_show_chapters: bool,

    /// Print the ffmpeg command for every chapter and exit
    #[arg(long)]
    pub only_show_commands: bool,

    // --- Execution ---
    /// Maximum number of ffmpeg processes running at once (0 or less = one per CPU).
    /// Can also be set via the CHAPSPLIT_JOBS environment variable.
    #[arg(
        short = 'j',
        long,
        value_name = "N",
        default_value_t = 0,
        allow_negative_numbers = true,
        env = "CHAPSPLIT_JOBS"
    )]
    pub jobs: i64,

    /// ffmpeg binary used for extraction
    #[arg(long, value_name = "PATH", default_value = "ffmpeg", env = "CHAPSPLIT_FFMPEG")]
    pub ffmpeg: PathBuf,

    /// ffprobe binary used for reading chapters
    #[arg(long, value_name = "PATH", default_value = "ffprobe", env = "CHAPSPLIT_FFPROBE")]
    pub ffprobe: PathBuf,

    // --- Output Naming and Metadata ---
    /// Name output files after the input file instead of the chapter title
    #[arg(long)]
    pub no_use_title: bool,

    /// Do not write the chapter title into the output's title tag
    #[arg(long)]
    pub no_title_meta: bool,

    /// Do not write the chapter number into the output's track tag
    #[arg(long)]
    pub no_track_meta: bool,

    /// Added to every chapter id for numbering (negative = 0)
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_ENUM_OFFSET,
        allow_negative_numbers = true
    )]
    pub enum_offset: i64,

    /// Zero-padded width of the chapter number (negative = fit the largest number)
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_ENUM_PADDED_WIDTH,
        allow_negative_numbers = true
    )]
    pub enum_width: i64,

    /// Extension for output files instead of the input's (e.g. mp3)
    #[arg(long, value_name = "EXT")]
    pub swap_extension: Option<String>,

    /// Only extract chapters whose id matches, e.g. "0,3-5,9-"
    #[arg(long, value_name = "EXPR", value_parser = ChapterSelection::parse)]
    pub select_chapters: Option<ChapterSelection>,

    // --- Logging ---
    /// Also write a debug log file into this directory
    #[arg(short, long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Show debug output on the console
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Concurrency limit for the execution engine; `0` asks for one worker per CPU.
    pub fn concurrency_limit(&self) -> usize {
        usize::try_from(self.jobs).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_args() {
        let cli = Cli::parse_from(["chapsplit", "-i", "book.m4b", "-o", "out"]);

        assert_eq!(cli.infile, PathBuf::from("book.m4b"));
        assert_eq!(cli.outdir, PathBuf::from("out"));
        assert_eq!(cli.enum_offset, DEFAULT_ENUM_OFFSET);
        assert_eq!(cli.enum_width, DEFAULT_ENUM_PADDED_WIDTH);
        assert_eq!(cli.ffmpeg, PathBuf::from("ffmpeg"));
        assert_eq!(cli.ffprobe, PathBuf::from("ffprobe"));
        assert!(!cli.only_show_chapters);
        assert!(!cli.only_show_commands);
        assert!(!cli.no_use_title);
        assert!(cli.select_chapters.is_none());
        assert!(cli.swap_extension.is_none());
        assert!(cli.log_dir.is_none());
    }

    #[test]
    fn test_parse_naming_flags() {
        let cli = Cli::parse_from([
            "chapsplit",
            "--infile",
            "talk.aac",
            "--outdir",
            "out",
            "--no-use-title",
            "--no-title-meta",
            "--no-track-meta",
            "--enum-offset",
            "1",
            "--enum-width",
            "-1",
            "--swap-extension",
            "mp3",
            "-j",
            "3",
        ]);

        assert!(cli.no_use_title);
        assert!(cli.no_title_meta);
        assert!(cli.no_track_meta);
        assert_eq!(cli.enum_offset, 1);
        assert_eq!(cli.enum_width, -1);
        assert_eq!(cli.swap_extension.as_deref(), Some("mp3"));
        assert_eq!(cli.jobs, 3);
        assert_eq!(cli.concurrency_limit(), 3);
    }

    #[test]
    fn test_non_positive_jobs_mean_auto() {
        for jobs in ["0", "-1", "-8"] {
            let cli = Cli::try_parse_from(["chapsplit", "-i", "a.mka", "-o", "o", "--jobs", jobs])
                .expect("negative job counts are accepted");
            assert_eq!(cli.concurrency_limit(), 0, "--jobs {jobs}");
        }
    }

    #[test]
    fn test_parse_selection() {
        let cli = Cli::parse_from([
            "chapsplit",
            "-i",
            "a.mka",
            "-o",
            "o",
            "--select-chapters",
            "1,4-",
        ]);
        let selection = cli.select_chapters.expect("selection parsed");
        assert!(selection.matches(1));
        assert!(!selection.matches(2));
        assert!(selection.matches(7));
    }

    #[test]
    fn test_invalid_selection_rejected() {
        let result = Cli::try_parse_from([
            "chapsplit",
            "-i",
            "a.mka",
            "-o",
            "o",
            "--select-chapters",
            "3-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_outdir_rejected() {
        assert!(Cli::try_parse_from(["chapsplit", "-i", "a.mka"]).is_err());
    }
}
