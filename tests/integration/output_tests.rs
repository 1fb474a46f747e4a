use dirscope::app::AppState;
use dirscope::duplicates::DuplicateFinder;
use dirscope::error::ExitCode;
use dirscope::output::{CsvOutput, JsonDuplicates, JsonListing, Listing, TextOutput};
use dirscope::scanner::scan;
use dirscope::view::ViewFilter;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_json_listing_carries_markers_and_stats() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "twin").unwrap();
    fs::write(dir.path().join("b.txt"), "twin").unwrap();
    fs::create_dir(dir.path().join("folder")).unwrap();
    fs::write(dir.path().join("folder").join("big.bin"), vec![0u8; 64]).unwrap();

    let mut app = AppState::default();
    app.open(dir.path()).unwrap();
    app.find_duplicates().unwrap();

    let listing = Listing::from_app(&app).unwrap();
    let json = JsonListing::new(&listing).to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["stats"]["total_size"], 72);
    assert_eq!(value["stats"]["file_count"], 2);
    assert_eq!(value["stats"]["folder_count"], 1);
    assert_eq!(value["sort"]["key"], "size");
    assert_eq!(value["sort"]["direction"], "desc");

    let entries = value["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["name"], "folder");
    assert_eq!(entries[0]["is_dir"], true);
    assert_eq!(entries[0]["duplicate"], false);
    assert!(entries[0]["category"].is_null());
    assert_eq!(entries[1]["duplicate"], true);
    assert_eq!(entries[1]["category"], "documents");
    assert_eq!(entries[2]["duplicate"], true);
}

#[test]
fn test_json_duplicates_summary() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x.bin"), vec![5u8; 100]).unwrap();
    fs::write(dir.path().join("y.bin"), vec![5u8; 100]).unwrap();
    fs::write(dir.path().join("z.bin"), vec![5u8; 100]).unwrap();

    let snapshot = scan(dir.path()).unwrap();
    let report = DuplicateFinder::with_defaults()
        .find_in_snapshot(&snapshot)
        .unwrap();

    let json = JsonDuplicates::new(&report, ExitCode::Success)
        .to_json_pretty()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["duplicates"].as_array().unwrap().len(), 1);
    assert_eq!(value["duplicates"][0]["files"].as_array().unwrap().len(), 3);
    assert_eq!(value["duplicates"][0]["hash"].as_str().unwrap().len(), 64);
    assert_eq!(value["summary"]["duplicate_files"], 2);
    assert_eq!(value["summary"]["reclaimable_space"], 200);
    assert_eq!(value["summary"]["exit_code"], 0);
    assert_eq!(value["summary"]["exit_code_name"], "DS000");
}

#[test]
fn test_csv_listing_has_one_row_per_entry() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("one.txt"), "1").unwrap();
    fs::write(dir.path().join("two.txt"), "22").unwrap();

    let mut app = AppState::default();
    app.open(dir.path()).unwrap();

    let listing = Listing::from_app(&app).unwrap();
    let csv = CsvOutput::listing_to_string(&listing).unwrap();
    let lines: Vec<_> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("two.txt,"));
    assert!(lines[2].starts_with("one.txt,"));
    assert!(lines[2].ends_with(",false"));
}

#[test]
fn test_csv_header_survives_empty_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("alpha.txt"), "first").unwrap();
    fs::write(dir.path().join("beta.txt"), "second").unwrap();

    let mut app = AppState::default();
    app.open(dir.path()).unwrap();
    app.set_filter(ViewFilter::default().with_text("no-such-name"));

    let listing = Listing::from_app(&app).unwrap();
    let csv = CsvOutput::listing_to_string(&listing).unwrap();
    assert_eq!(
        csv.lines().collect::<Vec<_>>(),
        ["name,path,type,category,size,modified,duplicate"]
    );

    let snapshot = scan(dir.path()).unwrap();
    let report = DuplicateFinder::with_defaults()
        .find_in_snapshot(&snapshot)
        .unwrap();
    assert!(report.is_empty());

    let mut buffer = Vec::new();
    CsvOutput::write_duplicates(&report, &mut buffer).unwrap();
    assert_eq!(
        String::from_utf8(buffer).unwrap().trim_end(),
        "group_id,hash,path,size,modified"
    );
}

#[test]
fn test_text_listing_footer() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("same1"), "abc").unwrap();
    fs::write(dir.path().join("same2"), "abc").unwrap();

    let mut app = AppState::default();
    app.open(dir.path()).unwrap();
    app.find_duplicates().unwrap();

    let listing = Listing::from_app(&app).unwrap();
    let text = TextOutput::new(false).listing(&listing);

    assert!(text.contains("same1 [duplicate]"));
    assert!(text.contains("same2 [duplicate]"));
    assert!(text
        .lines()
        .last()
        .unwrap()
        .starts_with("2 files, 0 folders, "));
    assert!(text.trim_end().ends_with("2 marked as duplicate"));
}
