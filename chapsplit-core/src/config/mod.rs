//! Output naming and metadata options for chapter extraction.
//!
//! `OutFileOpts` is owned by the caller and describes how output files are
//! named and tagged, plus which chapters to skip. Automatic values (negative
//! offset or padding width) are resolved per planning call by
//! [`OutFileOpts::resolve`], which never mutates the options themselves.

mod builder;

use std::fmt;
use std::sync::Arc;

use crate::chapters::Chapter;

pub use builder::OutFileOptsBuilder;

// Default constants

/// Enumeration offset that asks the planner to pick one automatically (0).
pub const DEFAULT_ENUM_OFFSET: i64 = -1;

/// Padding width that asks the planner to derive it from the largest
/// adjusted chapter number.
pub const DEFAULT_ENUM_PADDED_WIDTH: i64 = -1;

/// Predicate type used by [`ChapterFilter`]. Returning `true` excludes the chapter.
pub type ChapterPredicate = dyn Fn(&Chapter) -> bool + Send + Sync;

/// A named exclusion rule over chapters.
#[derive(Clone)]
pub struct ChapterFilter {
    pub description: String,
    predicate: Arc<ChapterPredicate>,
}

impl ChapterFilter {
    pub fn new<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Chapter) -> bool + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Returns `true` when the chapter should be skipped.
    pub fn excludes(&self, chapter: &Chapter) -> bool {
        (self.predicate)(chapter)
    }
}

impl fmt::Debug for ChapterFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChapterFilter")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// User-facing options controlling output file names and metadata.
///
/// # Examples
///
/// ```rust
/// use chapsplit_core::config::OutFileOpts;
///
/// let mut opts = OutFileOpts::default();
/// opts.use_title_in_name = false;
/// opts.enum_offset = 1;
///
/// let resolved = opts.resolve(9);
/// assert_eq!(resolved.enum_offset, 1);
/// assert_eq!(resolved.enum_padded_width, 2); // "10" has two digits
/// ```
#[derive(Debug, Clone)]
pub struct OutFileOpts {
    /// Use the chapter title as the file name (only when a title is available).
    pub use_title_in_name: bool,

    /// Write the chapter title into the output metadata (only when available).
    pub use_title_in_meta: bool,

    /// Write `track=<n>/<total>` into the output metadata.
    pub use_chapter_number_in_meta: bool,

    /// Added to every chapter id when numbering files. Negative means auto (0).
    pub enum_offset: i64,

    /// Zero-padding width of the file number. Negative means auto, 0 disables padding.
    pub enum_padded_width: i64,

    /// Extension to use instead of the input's. `None` or empty keeps the original.
    pub alternate_extension: Option<String>,

    /// Exclusion filters; a chapter is skipped if any of them matches.
    pub filters: Vec<ChapterFilter>,
}

impl Default for OutFileOpts {
    fn default() -> Self {
        Self {
            use_title_in_name: true,
            use_title_in_meta: true,
            use_chapter_number_in_meta: true,
            enum_offset: DEFAULT_ENUM_OFFSET,
            enum_padded_width: DEFAULT_ENUM_PADDED_WIDTH,
            alternate_extension: None,
            filters: Vec::new(),
        }
    }
}

impl OutFileOpts {
    pub fn builder() -> OutFileOptsBuilder {
        OutFileOptsBuilder::new()
    }

    pub fn add_filter(&mut self, filter: ChapterFilter) {
        self.filters.push(filter);
    }

    /// Returns `true` iff at least one filter excludes the chapter.
    pub fn is_filtered(&self, chapter: &Chapter) -> bool {
        self.filtered_by(chapter).is_some()
    }

    /// Returns the first filter that excludes the chapter, if any.
    pub fn filtered_by(&self, chapter: &Chapter) -> Option<&ChapterFilter> {
        self.filters.iter().find(|f| f.excludes(chapter))
    }

    /// Resolves automatic offset and width against the largest chapter id.
    pub fn resolve(&self, max_chapter_id: u64) -> ResolvedOpts {
        let enum_offset = u64::try_from(self.enum_offset).unwrap_or(0);
        let enum_padded_width = match usize::try_from(self.enum_padded_width) {
            Ok(width) => width,
            Err(_) => digit_count(max_chapter_id.saturating_add(enum_offset)),
        };
        let alternate_extension = self
            .alternate_extension
            .as_deref()
            .filter(|ext| !ext.is_empty())
            .map(str::to_string);

        ResolvedOpts {
            use_title_in_name: self.use_title_in_name,
            use_title_in_meta: self.use_title_in_meta,
            use_chapter_number_in_meta: self.use_chapter_number_in_meta,
            enum_offset,
            enum_padded_width,
            alternate_extension,
        }
    }
}

/// Options with all automatic values fixed for one planning call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOpts {
    pub use_title_in_name: bool,
    pub use_title_in_meta: bool,
    pub use_chapter_number_in_meta: bool,
    pub enum_offset: u64,
    pub enum_padded_width: usize,
    pub alternate_extension: Option<String>,
}

impl ResolvedOpts {
    /// Chapter id shifted by the enumeration offset.
    pub fn adjusted(&self, chapter_id: u64) -> u64 {
        chapter_id.saturating_add(self.enum_offset)
    }
}

fn digit_count(n: u64) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}
