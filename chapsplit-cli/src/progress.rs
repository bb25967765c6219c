// ============================================================================
// chapsplit-cli/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: Terminal progress for an extraction batch
//
// BarReporter implements the core ProgressReporter hook with an indicatif
// bar. Per-item outcomes still go through the log facade (so they reach the
// log file); the bar is suspended while they are written to keep the
// terminal readable.
//
// AI-ASSISTANT-INFO: indicatif-based ProgressReporter for the CLI

// ---- External crate imports ----
use chapsplit_core::{ExtractionError, LogReporter, ProgressReporter, Status, WorkItem};
use indicatif::{ProgressBar, ProgressStyle};

/// Shows a progress bar while chapters are extracted.
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    /// Creates a reporter; with `visible == false` only log lines are produced.
    pub fn new(visible: bool) -> Self {
        let bar = if visible {
            let bar = ProgressBar::new(0);
            let style = ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {wide_msg}",
            )
            .map(|s| s.progress_chars("█▓▒░ "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(style);
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    /// Shows the bar only when stderr is an interactive terminal and debug
    /// output is not flooding it.
    pub fn for_terminal(verbose: bool) -> Self {
        Self::new(!verbose && console::Term::stderr().is_term())
    }
}

impl ProgressReporter for BarReporter {
    fn on_batch_start(&self, total: usize, workers: usize) {
        self.bar.set_length(total as u64);
        self.bar.suspend(|| LogReporter.on_batch_start(total, workers));
    }

    fn on_item_finished(&self, item: &WorkItem, outcome: &Result<(), ExtractionError>) {
        self.bar.suspend(|| LogReporter.on_item_finished(item, outcome));
        self.bar.set_message(item.outfile.clone());
        self.bar.inc(1);
    }

    fn on_batch_finished(&self, status: &Status) {
        self.bar.finish_and_clear();
        LogReporter.on_batch_finished(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_reporter_counts_items() {
        let reporter = BarReporter::new(false);
        let mut status = Status::new(2);
        reporter.on_batch_start(2, 1);
        assert_eq!(reporter.bar.length(), Some(2));

        let item = chapsplit_core::InputFileMetadata::new(
            "/in/a.m4b",
            chapsplit_core::ProbeOutput::new(vec![Default::default()]),
        )
        .compute_work_items(std::path::Path::new("/out"), &Default::default())
        .remove(0);
        for _ in 0..2 {
            let outcome = Ok(());
            reporter.on_item_finished(&item, &outcome);
            status.record(&outcome);
        }
        assert_eq!(reporter.bar.position(), 2);
        reporter.on_batch_finished(&status);
    }
}
