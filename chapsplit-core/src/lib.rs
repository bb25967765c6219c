//! Core library for splitting a media file into one file per chapter.
//!
//! Chapter metadata is read with ffprobe, turned into a list of work items by
//! the planner, and extracted with ffmpeg (stream copy, no re-encoding) by a
//! bounded pool of workers.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use chapsplit_core::config::OutFileOptsBuilder;
//! use chapsplit_core::selection::ChapterSelection;
//! use std::path::Path;
//!
//! let imeta = chapsplit_core::read_file(Path::new("/path/to/book.m4b")).unwrap();
//!
//! let opts = OutFileOptsBuilder::new()
//!     .enum_offset(1)
//!     .add_filter(ChapterSelection::parse("1-10").unwrap().into_filter())
//!     .build();
//!
//! let items = imeta.compute_work_items(Path::new("/path/to/output"), &opts);
//! let status = chapsplit_core::process(&items, 0);
//! println!("Status: {status}");
//! ```

pub mod chapters;
pub mod config;
pub mod error;
pub mod external;
pub mod processing;
pub mod reporting;
pub mod selection;

// Re-exports for public API
pub use chapters::{Chapter, InputFileMetadata, ProbeOutput};
pub use config::{ChapterFilter, OutFileOpts, OutFileOptsBuilder, ResolvedOpts};
pub use error::{CoreError, CoreResult, ExtractionError};
pub use external::{
    ExtractionRunner, FfmpegRunner, check_dependency, read_chapters, read_chapters_with, read_file,
    read_file_with,
};
pub use processing::{WorkItem, compute_work_items, process, process_with};
pub use reporting::{LogReporter, ProgressReporter, Status};
pub use selection::ChapterSelection;
