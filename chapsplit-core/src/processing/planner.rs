// ============================================================================
// chapsplit-core/src/processing/planner.rs
// ============================================================================
//
// WORK-ITEM PLANNER: From Chapter Metadata to Extraction Tasks
//
// Converts an InputFileMetadata plus OutFileOpts into an ordered list of
// WorkItems, one per chapter that survives the filter chain. Each WorkItem is
// fully resolved: output file name and the complete ffmpeg argument vector
// are computed here, so the execution engine only has to run them.
//
// KEY COMPONENTS:
// - compute_work_items: the planning entry point
// - compute_outname: "{number} - {name}.{ext}" file naming
// - build_ffmpeg_args: the fixed ffmpeg argument template
// - WorkItem: a ready-to-execute extraction task

// ---- Standard library imports ----
use std::ffi::OsString;
use std::path::{Path, PathBuf};

// ---- Internal crate imports ----
use crate::chapters::{Chapter, InputFileMetadata};
use crate::config::{OutFileOpts, ResolvedOpts};

/// Name of the extraction binary; expected somewhere in `$PATH`.
pub const FFMPEG_PROGRAM: &str = "ffmpeg";

/// A fully resolved extraction task for one chapter.
///
/// Owns copies of everything needed to run the extraction and is never
/// mutated after planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub infile: PathBuf,
    pub outfile: String,
    pub out_directory: PathBuf,
    pub chapter: Chapter,
    ffmpeg_args: Vec<OsString>,
}

impl WorkItem {
    /// Arguments passed to ffmpeg, excluding the program name.
    pub fn ffmpeg_args(&self) -> &[OsString] {
        &self.ffmpeg_args
    }

    /// Full command line, program name first. Useful for dry runs.
    pub fn command(&self) -> Vec<OsString> {
        std::iter::once(OsString::from(FFMPEG_PROGRAM))
            .chain(self.ffmpeg_args.iter().cloned())
            .collect()
    }

    /// Where the chapter file will be written.
    pub fn output_path(&self) -> PathBuf {
        self.out_directory.join(&self.outfile)
    }
}

/// Plans the extraction of every chapter of `imeta` that no filter excludes.
///
/// Items keep the chapter order of the probe output. An input without
/// chapters, or one where every chapter is filtered out, yields an empty plan.
pub fn compute_work_items(
    imeta: &InputFileMetadata,
    outdir: &Path,
    opts: &OutFileOpts,
) -> Vec<WorkItem> {
    let max_chapter_id = imeta.probe_output.max_chapter_id();
    let resolved = opts.resolve(max_chapter_id);

    log::debug!(
        "Planning {} chapter(s) of {} (offset={}, width={})",
        imeta.num_chapters(),
        imeta.path.display(),
        resolved.enum_offset,
        resolved.enum_padded_width
    );

    imeta
        .probe_output
        .chapters()
        .iter()
        .filter(|chapter| match opts.filtered_by(chapter) {
            Some(filter) => {
                log::debug!("Skipping chapter {}: {}", chapter.id, filter.description);
                false
            }
            None => true,
        })
        .map(|chapter| {
            let outfile = compute_outname(&resolved, chapter, imeta);
            let ffmpeg_args =
                build_ffmpeg_args(imeta, &resolved, chapter, &outdir.join(&outfile));
            WorkItem {
                infile: imeta.path.clone(),
                outfile,
                out_directory: outdir.to_path_buf(),
                chapter: chapter.clone(),
                ffmpeg_args,
            }
        })
        .collect()
}

/// Chooses the output file name for a chapter.
///
/// The shape is `{number} - {name}.{ext}`, where the number is the adjusted
/// chapter id zero-padded to the resolved width.
pub fn compute_outname(
    opts: &ResolvedOpts,
    chapter: &Chapter,
    imeta: &InputFileMetadata,
) -> String {
    let name = match chapter.non_empty_title() {
        Some(title) if opts.use_title_in_name => title,
        _ => imeta.base_no_ext.as_str(),
    };
    let ext = opts
        .alternate_extension
        .as_deref()
        .unwrap_or(imeta.extension.as_str());
    let number = opts.adjusted(chapter.id);

    format!(
        "{number:0width$} - {name}.{ext}",
        width = opts.enum_padded_width
    )
}

/// Builds the ffmpeg arguments that copy one chapter out of the input.
///
/// Argument order matters to ffmpeg: input options first, output options
/// next, output path last.
pub fn build_ffmpeg_args(
    imeta: &InputFileMetadata,
    opts: &ResolvedOpts,
    chapter: &Chapter,
    output_path: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::with_capacity(24);
    args.push("-nostdin".into());
    args.push("-i".into());
    args.push(imeta.path.clone().into_os_string());
    args.extend(["-v", "error", "-map_chapters", "-1", "-vn", "-c", "copy"].map(OsString::from));
    args.push("-ss".into());
    args.push(chapter.start_time.as_str().into());
    args.push("-to".into());
    args.push(chapter.end_time.as_str().into());
    args.push("-n".into());

    if opts.use_chapter_number_in_meta {
        let max_chapter_id = imeta.probe_output.max_chapter_id();
        args.push("-metadata".into());
        args.push(
            format!(
                "track={}/{}",
                opts.adjusted(chapter.id),
                opts.adjusted(max_chapter_id)
            )
            .into(),
        );
    }

    if opts.use_title_in_meta {
        if let Some(title) = chapter.non_empty_title() {
            args.push("-metadata".into());
            args.push(format!("title={title}").into());
        }
    }

    args.push(output_path.as_os_str().to_os_string());
    args
}
