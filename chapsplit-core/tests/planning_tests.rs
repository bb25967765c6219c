// chapsplit-core/tests/planning_tests.rs

use chapsplit_core::config::{OutFileOpts, OutFileOptsBuilder};
use chapsplit_core::selection::ChapterSelection;
use chapsplit_core::{InputFileMetadata, ProbeOutput};
use std::path::Path;

const THREE_CHAPTERS: &str = r#"
{
    "chapters": [
        { "id": 0, "time_base": "1/1000", "start": 0, "start_time": "0.000000",
          "end": 20000, "end_time": "20.000000",
          "tags": { "title": "It All Started With a Simple BEEP" } },
        { "id": 1, "time_base": "1/1000", "start": 20000, "start_time": "20.000000",
          "end": 40000, "end_time": "40.000000",
          "tags": { "title": "All You Can BEEP Buffee" } },
        { "id": 2, "time_base": "1/1000", "start": 40000, "start_time": "40.000000",
          "end": 60000, "end_time": "60.000000",
          "tags": { "title": "The Final Beep" } }
    ]
}
"#;

fn beep_book() -> InputFileMetadata {
    let probe = ProbeOutput::from_json(THREE_CHAPTERS.as_bytes()).expect("valid ffprobe JSON");
    InputFileMetadata::new("/books/beep.m4a", probe)
}

#[test]
fn test_default_options_name_files_by_title() {
    let opts = OutFileOpts {
        enum_offset: -1,
        enum_padded_width: -1,
        ..Default::default()
    };
    let items = beep_book().compute_work_items(Path::new("/out"), &opts);

    let names: Vec<&str> = items.iter().map(|i| i.outfile.as_str()).collect();
    assert_eq!(
        names,
        [
            "0 - It All Started With a Simple BEEP.m4a",
            "1 - All You Can BEEP Buffee.m4a",
            "2 - The Final Beep.m4a",
        ]
    );
}

#[test]
fn test_filter_drops_middle_chapter() {
    let opts = OutFileOptsBuilder::new()
        .filter("not chapter 1", |c| c.id == 1)
        .build();
    let items = beep_book().compute_work_items(Path::new("/out"), &opts);

    let ids: Vec<u64> = items.iter().map(|i| i.chapter.id).collect();
    assert_eq!(ids, [0, 2]);
}

#[test]
fn test_selection_expression_as_filter() {
    let opts = OutFileOptsBuilder::new()
        .add_filter(ChapterSelection::parse("1-").unwrap().into_filter())
        .enum_offset(1)
        .use_title_in_name(false)
        .build();
    let items = beep_book().compute_work_items(Path::new("/out"), &opts);

    let names: Vec<&str> = items.iter().map(|i| i.outfile.as_str()).collect();
    assert_eq!(names, ["2 - beep.m4a", "3 - beep.m4a"]);
}

#[test]
fn test_filtered_plan_keeps_total_in_track_metadata() {
    let opts = OutFileOptsBuilder::new()
        .filter("only last", |c| c.id != 2)
        .build();
    let items = beep_book().compute_work_items(Path::new("/out"), &opts);

    assert_eq!(items.len(), 1);
    let args: Vec<String> = items[0]
        .ffmpeg_args()
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert!(args.contains(&"track=2/2".to_string()));
    assert!(args.contains(&"title=The Final Beep".to_string()));
}

#[test]
fn test_planning_is_repeatable() {
    let imeta = beep_book();
    let opts = OutFileOpts::default();
    let first = imeta.compute_work_items(Path::new("/out"), &opts);
    let second = imeta.compute_work_items(Path::new("/out"), &opts);
    assert_eq!(first, second);
}
