//! Batch status and progress reporting.
//!
//! `Status` folds per-item outcomes into counts. `ProgressReporter` is the
//! hook the execution engine calls as results arrive; `LogReporter` is the
//! default implementation writing through the `log` facade.

use std::fmt;

use crate::error::ExtractionError;
use crate::processing::planner::WorkItem;

/// How many extractions were submitted, and how many succeeded or failed.
///
/// `successful + failed` equals `submitted` after a correctly terminated
/// batch. Any difference is a lost result and is reported by [`Status::missing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status {
    pub submitted: usize,
    pub successful: usize,
    pub failed: usize,
}

impl Status {
    /// Starts a status for a batch of `submitted` items with no results yet.
    pub fn new(submitted: usize) -> Self {
        Self {
            submitted,
            ..Default::default()
        }
    }

    pub fn record_success(&mut self) {
        self.successful += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn record<E>(&mut self, outcome: &Result<(), E>) {
        match outcome {
            Ok(()) => self.record_success(),
            Err(_) => self.record_failure(),
        }
    }

    /// Submitted items without a recorded result. Negative means double counting.
    pub fn missing(&self) -> i64 {
        self.submitted as i64 - (self.successful + self.failed) as i64
    }

    /// True when every submitted item succeeded.
    pub fn is_complete_success(&self) -> bool {
        self.failed == 0 && self.missing() == 0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total {} submitted jobs => success: {}, failed: {}, missing: {}",
            self.submitted,
            self.successful,
            self.failed,
            self.missing()
        )
    }
}

/// Receives batch progress from the execution engine.
///
/// All callbacks run on the thread that called the engine, one at a time.
pub trait ProgressReporter {
    fn on_batch_start(&self, _total: usize, _workers: usize) {}

    /// Called once per finished item, in completion order.
    fn on_item_finished(&self, item: &WorkItem, outcome: &Result<(), ExtractionError>);

    fn on_batch_finished(&self, _status: &Status) {}
}

/// Reports progress through the `log` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn on_batch_start(&self, total: usize, workers: usize) {
        log::info!("Extracting {total} chapter(s) with {workers} worker(s)");
    }

    fn on_item_finished(&self, item: &WorkItem, outcome: &Result<(), ExtractionError>) {
        match outcome {
            Ok(()) => log::info!("Done: {}", item.outfile),
            Err(e) => log::error!("Extraction failed: {}: {}", item.outfile, e),
        }
    }

    fn on_batch_finished(&self, status: &Status) {
        log::info!("Status: {status}");
    }
}
