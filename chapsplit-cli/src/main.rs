// chapsplit-cli/src/main.rs
//
// Entry point of the `chapsplit` binary.
//
// Parses the command line, installs logging, runs the split command and
// turns its outcome into the process exit code:
//
// - 0: every chapter was extracted, or a dry run finished
// - 1: the input could not be read or probed
// - 2: the input has no chapters, or the arguments were rejected
// - 3: some chapters failed or produced no result

use chapsplit_cli::{Cli, logging, run_split};
use clap::Parser;
use console::style;
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose, cli.log_dir.as_deref()) {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        process::exit(e.exit_code());
    }

    match run_split(&cli) {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(e) => {
            log::debug!("run failed: {e:?}");
            eprintln!("{} {}", style("Error:").red().bold(), e);
            process::exit(e.exit_code());
        }
    }
}
