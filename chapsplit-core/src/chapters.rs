//! Chapter model: the records produced by probing an input file.
//!
//! `Chapter` mirrors one entry of `ffprobe -show_chapters` JSON output.
//! `ProbeOutput` owns the chapter list together with the largest chapter id,
//! which is computed once when the output is constructed. `InputFileMetadata`
//! ties a probe output to the input path it was read from.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::OutFileOpts;
use crate::error::CoreResult;
use crate::processing::planner::{self, WorkItem};

/// A single chapter as reported by ffprobe.
///
/// Timestamps are kept as the strings ffprobe printed; they are handed back to
/// ffmpeg untouched and never reparsed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Chapter {
    pub id: u64,
    #[serde(default)]
    pub time_base: String,
    #[serde(default)]
    pub start: i64,
    pub start_time: String,
    #[serde(default)]
    pub end: i64,
    pub end_time: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Chapter {
    /// Returns the chapter title tag, if present.
    pub fn title(&self) -> Option<&str> {
        self.tags.get("title").map(String::as_str)
    }

    /// Returns the title tag only when it is present and non-empty.
    pub fn non_empty_title(&self) -> Option<&str> {
        self.title().filter(|t| !t.is_empty())
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:<3} {} -> {}", self.id, self.start_time, self.end_time)?;
        if let Some(title) = self.title() {
            write!(f, "  \"{title}\"")?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawProbeOutput {
    #[serde(default)]
    chapters: Vec<Chapter>,
}

/// Chapters of one input file, in the order ffprobe produced them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProbeOutput {
    chapters: Vec<Chapter>,
    max_chapter_id: u64,
}

impl ProbeOutput {
    /// Wraps a chapter list, computing the maximum chapter id.
    ///
    /// Chapters are not assumed to be sorted or contiguous.
    pub fn new(chapters: Vec<Chapter>) -> Self {
        let max_chapter_id = chapters.iter().map(|c| c.id).max().unwrap_or(0);
        Self {
            chapters,
            max_chapter_id,
        }
    }

    /// Parses the JSON printed by `ffprobe -print_format json -show_chapters`.
    pub fn from_json(encoded: &[u8]) -> CoreResult<Self> {
        let raw: RawProbeOutput = serde_json::from_slice(encoded)?;
        Ok(Self::new(raw.chapters))
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Largest chapter id in this output, 0 when there are no chapters.
    pub fn max_chapter_id(&self) -> u64 {
        self.max_chapter_id
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

/// Everything the planner needs to know about one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFileMetadata {
    pub path: PathBuf,
    /// File name without its final extension.
    pub base_no_ext: String,
    /// Final extension without the leading dot; empty if there is none.
    pub extension: String,
    pub probe_output: ProbeOutput,
}

impl InputFileMetadata {
    /// Splits `path` into base name and extension and attaches the probe output.
    pub fn new(path: impl Into<PathBuf>, probe_output: ProbeOutput) -> Self {
        let path = path.into();
        let base_no_ext = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            base_no_ext,
            extension,
            probe_output,
        }
    }

    pub fn num_chapters(&self) -> usize {
        self.probe_output.chapters().len()
    }

    /// Plans one work item per chapter that survives the option filters.
    ///
    /// See [`planner::compute_work_items`].
    pub fn compute_work_items(&self, outdir: &Path, opts: &OutFileOpts) -> Vec<WorkItem> {
        planner::compute_work_items(self, outdir, opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAPTERS_JSON: &str = r#"
    {
        "chapters": [
            {
                "id": 0,
                "time_base": "1/1000",
                "start": 0,
                "start_time": "0.000000",
                "end": 20000,
                "end_time": "20.000000",
                "tags": { "title": "It All Started With a Simple BEEP" }
            },
            {
                "id": 1,
                "time_base": "1/1000",
                "start": 20000,
                "start_time": "20.000000",
                "end": 40000,
                "end_time": "40.000000",
                "tags": { "title": "All You Can BEEP Buffee" }
            },
            {
                "id": 2,
                "time_base": "1/1000",
                "start": 40000,
                "start_time": "40.000000",
                "end": 60000,
                "end_time": "60.000000",
                "tags": { "title": "The Final Beep" }
            }
        ]
    }
    "#;

    fn chapter(id: u64) -> Chapter {
        Chapter {
            id,
            start_time: "0.0".into(),
            end_time: "1.0".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_ffprobe_json() {
        let probe = ProbeOutput::from_json(CHAPTERS_JSON.as_bytes()).unwrap();
        assert_eq!(probe.chapters().len(), 3);
        assert_eq!(probe.max_chapter_id(), 2);
        assert_eq!(probe.chapters()[1].start_time, "20.000000");
        assert_eq!(probe.chapters()[2].title(), Some("The Final Beep"));
    }

    #[test]
    fn test_decode_without_chapters_key() {
        let probe = ProbeOutput::from_json(b"{}").unwrap();
        assert!(probe.is_empty());
        assert_eq!(probe.max_chapter_id(), 0);
    }

    #[test]
    fn test_decode_chapter_without_tags() {
        let json = br#"{"chapters":[{"id":7,"start_time":"1.5","end_time":"2.5"}]}"#;
        let probe = ProbeOutput::from_json(json).unwrap();
        assert!(probe.chapters()[0].tags.is_empty());
        assert_eq!(probe.chapters()[0].title(), None);
        assert_eq!(probe.max_chapter_id(), 7);
    }

    #[test]
    fn test_decode_malformed_json() {
        assert!(ProbeOutput::from_json(b"{\"chapters\": [").is_err());
    }

    #[test]
    fn test_max_chapter_id_ignores_order() {
        let probe = ProbeOutput::new(vec![chapter(4), chapter(11), chapter(2)]);
        assert_eq!(probe.max_chapter_id(), 11);
        assert_eq!(ProbeOutput::new(Vec::new()).max_chapter_id(), 0);
    }

    #[test]
    fn test_input_metadata_splits_path() {
        let meta = InputFileMetadata::new("/books/My Book.m4b", ProbeOutput::default());
        assert_eq!(meta.base_no_ext, "My Book");
        assert_eq!(meta.extension, "m4b");

        let meta = InputFileMetadata::new("archive.tar.gz", ProbeOutput::default());
        assert_eq!(meta.base_no_ext, "archive.tar");
        assert_eq!(meta.extension, "gz");

        let meta = InputFileMetadata::new("noext", ProbeOutput::default());
        assert_eq!(meta.base_no_ext, "noext");
        assert_eq!(meta.extension, "");
    }

    #[test]
    fn test_non_empty_title() {
        let mut c = chapter(0);
        assert_eq!(c.non_empty_title(), None);
        c.tags.insert("title".into(), String::new());
        assert_eq!(c.title(), Some(""));
        assert_eq!(c.non_empty_title(), None);
        c.tags.insert("title".into(), "Intro".into());
        assert_eq!(c.non_empty_title(), Some("Intro"));
    }

    #[test]
    fn test_chapter_display() {
        let mut c = chapter(3);
        c.tags.insert("title".into(), "Intro".into());
        assert_eq!(c.to_string(), "#3   0.0 -> 1.0  \"Intro\"");
    }
}
