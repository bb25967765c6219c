// ============================================================================
// chapsplit-core/src/processing/engine.rs
// ============================================================================
//
// EXECUTION ENGINE: Bounded Worker Pool for Chapter Extraction
//
// Runs a batch of WorkItems with at most N extractions in flight and folds
// every outcome into a Status.
//
// ARCHITECTURE:
// - A job queue sized to the batch is filled with every item up front and
//   closed, so workers drain it and exit on their own.
// - N scoped worker threads pull from the queue, run the item through an
//   ExtractionRunner and send exactly one result back.
// - The calling thread is the single aggregator: it reports each result and
//   folds it into the Status until all workers have hung up.
//
// A runner that panics loses only its current item: no result is sent for it,
// so the gap shows up as Status::missing() instead of being hidden.
//
// Completion order is unspecified. There is no timeout and no cancellation: a
// hung ffmpeg stalls the batch.

// ---- External crate imports ----
use crossbeam_channel::bounded;

// ---- Standard library imports ----
use std::panic::{self, AssertUnwindSafe};
use std::thread;

// ---- Internal crate imports ----
use crate::error::ExtractionError;
use crate::external::{ExtractionRunner, FfmpegRunner};
use crate::processing::planner::WorkItem;
use crate::reporting::{LogReporter, ProgressReporter, Status};

/// Outcome of one extraction, paired with the item it belongs to.
struct ItemResult<'a> {
    item: &'a WorkItem,
    outcome: Result<(), ExtractionError>,
}

/// Resolves the concurrency limit; `0` means one worker per available CPU.
pub fn resolve_concurrency(max_concurrent: usize) -> usize {
    if max_concurrent == 0 {
        num_cpus::get()
    } else {
        max_concurrent
    }
}

/// Extracts every item with ffmpeg, running at most `max_concurrent`
/// processes at a time (`0` = number of CPUs), and logs each outcome.
///
/// Blocks until every item has finished.
///
/// Extraction does not re-encode, so it tends to be I/O-bound: raising the
/// limit helps only until the disk is saturated.
pub fn process(items: &[WorkItem], max_concurrent: usize) -> Status {
    process_with(items, max_concurrent, &FfmpegRunner::new(), &LogReporter)
}

/// Like [`process`], with a custom runner and progress reporter.
pub fn process_with<R>(
    items: &[WorkItem],
    max_concurrent: usize,
    runner: &R,
    reporter: &dyn ProgressReporter,
) -> Status
where
    R: ExtractionRunner + Sync + ?Sized,
{
    let limit = resolve_concurrency(max_concurrent);
    let workers = limit.min(items.len());
    let mut status = Status::new(items.len());

    reporter.on_batch_start(items.len(), workers);
    if items.is_empty() {
        reporter.on_batch_finished(&status);
        return status;
    }

    // Both channels hold the whole batch, so neither side ever blocks on send.
    let (job_tx, job_rx) = bounded::<&WorkItem>(items.len());
    let (result_tx, result_rx) = bounded::<ItemResult<'_>>(items.len());

    for item in items {
        // Cannot fail: the receiver is alive and capacity equals the batch size.
        let _ = job_tx.send(item);
    }
    drop(job_tx);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker_id| {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    for item in job_rx.iter() {
                        log::debug!("worker {worker_id}: extracting {}", item.outfile);
                        let run = AssertUnwindSafe(|| runner.run(item));
                        let outcome = match panic::catch_unwind(run) {
                            Ok(outcome) => outcome,
                            Err(_) => {
                                log::error!(
                                    "worker {worker_id}: {} panicked; no result recorded",
                                    item.outfile
                                );
                                continue;
                            }
                        };
                        if result_tx.send(ItemResult { item, outcome }).is_err() {
                            break;
                        }
                    }
                })
            })
            .collect();

        // Only worker-held senders remain, so the loop ends when the last worker exits.
        drop(result_tx);

        for ItemResult { item, outcome } in result_rx.iter() {
            reporter.on_item_finished(item, &outcome);
            status.record(&outcome);
        }

        for (worker_id, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() {
                log::error!("worker {worker_id} terminated abnormally");
            }
        }
    });

    if status.missing() != 0 {
        log::error!(
            "{} of {} submitted item(s) produced no result",
            status.missing(),
            status.submitted
        );
    }

    reporter.on_batch_finished(&status);
    status
}
