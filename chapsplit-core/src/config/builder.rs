// ============================================================================
// chapsplit-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for OutFileOpts
//
// This module implements a fluent builder for OutFileOpts. Every setter has a
// default matching OutFileOpts::default(), so callers only spell out what
// differs.

// ---- Internal crate imports ----
use super::{ChapterFilter, OutFileOpts};
use crate::chapters::Chapter;

/// Builder for creating OutFileOpts instances.
///
/// # Examples
///
/// ```rust
/// use chapsplit_core::config::OutFileOptsBuilder;
///
/// let opts = OutFileOptsBuilder::new()
///     .use_title_in_name(false)
///     .enum_offset(1)
///     .enum_padded_width(3)
///     .alternate_extension("mka")
///     .filter("skip intro", |chapter| chapter.id == 0)
///     .build();
///
/// assert_eq!(opts.enum_offset, 1);
/// assert_eq!(opts.filters.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutFileOptsBuilder {
    opts: OutFileOpts,
}

impl OutFileOptsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_title_in_name(mut self, value: bool) -> Self {
        self.opts.use_title_in_name = value;
        self
    }

    pub fn use_title_in_meta(mut self, value: bool) -> Self {
        self.opts.use_title_in_meta = value;
        self
    }

    pub fn use_chapter_number_in_meta(mut self, value: bool) -> Self {
        self.opts.use_chapter_number_in_meta = value;
        self
    }

    /// Sets the enumeration offset. Negative values mean "choose automatically".
    pub fn enum_offset(mut self, offset: i64) -> Self {
        self.opts.enum_offset = offset;
        self
    }

    /// Sets the zero-padding width. Negative means auto, 0 disables padding.
    pub fn enum_padded_width(mut self, width: i64) -> Self {
        self.opts.enum_padded_width = width;
        self
    }

    pub fn alternate_extension(mut self, ext: impl Into<String>) -> Self {
        let ext = ext.into();
        self.opts.alternate_extension = (!ext.is_empty()).then_some(ext);
        self
    }

    /// Adds an exclusion filter built from a description and a predicate.
    pub fn filter<F>(self, description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Chapter) -> bool + Send + Sync + 'static,
    {
        self.add_filter(ChapterFilter::new(description, predicate))
    }

    pub fn add_filter(mut self, filter: ChapterFilter) -> Self {
        self.opts.add_filter(filter);
        self
    }

    pub fn build(self) -> OutFileOpts {
        self.opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_default_opts() {
        let built = OutFileOptsBuilder::new().build();
        let default = OutFileOpts::default();
        assert_eq!(built.use_title_in_name, default.use_title_in_name);
        assert_eq!(built.use_title_in_meta, default.use_title_in_meta);
        assert_eq!(built.use_chapter_number_in_meta, default.use_chapter_number_in_meta);
        assert_eq!(built.enum_offset, default.enum_offset);
        assert_eq!(built.enum_padded_width, default.enum_padded_width);
        assert_eq!(built.alternate_extension, default.alternate_extension);
    }

    #[test]
    fn test_builder_sets_fields() {
        let opts = OutFileOpts::builder()
            .use_title_in_name(false)
            .use_title_in_meta(false)
            .use_chapter_number_in_meta(false)
            .enum_offset(1)
            .enum_padded_width(0)
            .alternate_extension("mp3")
            .filter("none", |_| false)
            .build();

        assert!(!opts.use_title_in_name);
        assert!(!opts.use_title_in_meta);
        assert!(!opts.use_chapter_number_in_meta);
        assert_eq!(opts.enum_offset, 1);
        assert_eq!(opts.enum_padded_width, 0);
        assert_eq!(opts.alternate_extension.as_deref(), Some("mp3"));
        assert_eq!(opts.filters[0].description, "none");
    }

    #[test]
    fn test_empty_alternate_extension_keeps_original() {
        let opts = OutFileOptsBuilder::new().alternate_extension("").build();
        assert!(opts.alternate_extension.is_none());
    }
}
