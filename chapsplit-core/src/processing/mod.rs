//! Planning and executing chapter extractions.
//!
//! - `planner` turns chapter metadata and options into `WorkItem`s
//! - `engine` runs work items on a bounded pool of ffmpeg workers

pub mod engine;
pub mod planner;

pub use engine::{process, process_with, resolve_concurrency};
pub use planner::{WorkItem, build_ffmpeg_args, compute_outname, compute_work_items};
