use dirscope::scanner::{scan, FileCategory, Snapshot};
use dirscope::view::{
    apply, CategoryFilter, MinSize, SizeUnit, SortDirection, SortKey, SortSpec, ViewFilter,
};
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// Layout:
/// - `report.txt` (100 bytes, oldest)
/// - `photo.jpg` (50 bytes)
/// - `clip.mp4` (300 bytes, newest)
/// - `backup/` holding `old.zip` (500 bytes)
fn fixture() -> (TempDir, Snapshot) {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("report.txt"), vec![b'r'; 100]).unwrap();
    fs::write(root.join("photo.jpg"), vec![b'p'; 50]).unwrap();
    fs::write(root.join("clip.mp4"), vec![b'c'; 300]).unwrap();
    fs::create_dir(root.join("backup")).unwrap();
    fs::write(root.join("backup").join("old.zip"), vec![b'z'; 500]).unwrap();

    set_mtime(&root.join("report.txt"), 1_000_000);
    set_mtime(&root.join("photo.jpg"), 2_000_000);
    set_mtime(&root.join("backup"), 3_000_000);
    set_mtime(&root.join("clip.mp4"), 4_000_000);

    let snapshot = scan(root).unwrap();
    (dir, snapshot)
}

fn set_mtime(path: &Path, secs: i64) {
    set_file_mtime(path, FileTime::from_unix_time(secs, 0)).unwrap();
}

fn names(snapshot: &Snapshot, filter: &ViewFilter, sort: SortSpec) -> Vec<String> {
    apply(snapshot, filter, sort)
        .entries()
        .iter()
        .map(|e| e.name.clone())
        .collect()
}

#[test]
fn test_default_view_is_snapshot_order() {
    let (_dir, snapshot) = fixture();

    assert_eq!(
        names(&snapshot, &ViewFilter::default(), SortSpec::default()),
        vec!["backup", "clip.mp4", "report.txt", "photo.jpg"]
    );
}

#[test]
fn test_stats_cover_only_displayed_entries() {
    let (_dir, snapshot) = fixture();

    let all = apply(&snapshot, &ViewFilter::default(), SortSpec::default());
    assert_eq!(all.stats().total_size, 950);
    assert_eq!(all.stats().file_count, 3);
    assert_eq!(all.stats().folder_count, 1);

    let filter = ViewFilter::default().with_category(CategoryFilter::Folders);
    let folders = apply(&snapshot, &filter, SortSpec::default());
    assert_eq!(folders.stats().total_size, 500);
    assert_eq!(folders.stats().file_count, 0);
    assert_eq!(folders.stats().folder_count, 1);
}

#[test]
fn test_category_and_min_size_compose() {
    let (_dir, snapshot) = fixture();

    let filter = ViewFilter::default()
        .with_category(CategoryFilter::Only(FileCategory::Images))
        .with_min_size(MinSize::new(40.0, SizeUnit::B));
    assert_eq!(
        names(&snapshot, &filter, SortSpec::default()),
        vec!["photo.jpg"]
    );

    let filter = filter.with_min_size(MinSize::new(51.0, SizeUnit::B));
    assert!(apply(&snapshot, &filter, SortSpec::default()).is_empty());
}

#[test]
fn test_min_size_is_inclusive() {
    let (_dir, snapshot) = fixture();

    let filter = ViewFilter::default().with_min_size(MinSize::new(300.0, SizeUnit::B));
    assert_eq!(
        names(&snapshot, &filter, SortSpec::default()),
        vec!["backup", "clip.mp4"]
    );
}

#[test]
fn test_invalid_min_size_disables_filter() {
    let (_dir, snapshot) = fixture();

    for text in ["", "abc", "0", "-3"] {
        let filter = ViewFilter::default().with_min_size(MinSize::parse(text, SizeUnit::KB));
        assert_eq!(apply(&snapshot, &filter, SortSpec::default()).len(), 4);
    }
}

#[test]
fn test_text_filter_matches_name_or_extension() {
    let (_dir, snapshot) = fixture();

    let filter = ViewFilter::default().with_text("REPORT");
    assert_eq!(
        names(&snapshot, &filter, SortSpec::default()),
        vec!["report.txt"]
    );

    let filter = ViewFilter::default().with_text(r"\.(jpg|mp4)$");
    assert_eq!(
        names(&snapshot, &filter, SortSpec::default()),
        vec!["clip.mp4", "photo.jpg"]
    );
}

#[test]
fn test_invalid_pattern_falls_back_to_substring() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes(draft.md"), "x").unwrap();
    fs::write(dir.path().join("notes.md"), "xy").unwrap();
    let snapshot = scan(dir.path()).unwrap();

    let filter = ViewFilter::default().with_text("(DRAFT");
    assert!(!filter.text.as_ref().unwrap().is_pattern());
    assert_eq!(
        names(&snapshot, &filter, SortSpec::default()),
        vec!["notes(draft.md"]
    );
}

#[test]
fn test_sort_by_name() {
    let (_dir, snapshot) = fixture();
    let asc = SortSpec::new(SortKey::Name, SortDirection::Asc);

    assert_eq!(
        names(&snapshot, &ViewFilter::default(), asc),
        vec!["backup", "clip.mp4", "photo.jpg", "report.txt"]
    );
    assert_eq!(
        names(&snapshot, &ViewFilter::default(), asc.toggle(SortKey::Name)),
        vec!["report.txt", "photo.jpg", "clip.mp4", "backup"]
    );
}

#[test]
fn test_sort_by_modified_date() {
    let (_dir, snapshot) = fixture();

    assert_eq!(
        names(
            &snapshot,
            &ViewFilter::default(),
            SortSpec::new(SortKey::Date, SortDirection::Asc)
        ),
        vec!["report.txt", "photo.jpg", "backup", "clip.mp4"]
    );
    assert_eq!(
        names(
            &snapshot,
            &ViewFilter::default(),
            SortSpec::new(SortKey::Date, SortDirection::Desc)
        ),
        vec!["clip.mp4", "backup", "photo.jpg", "report.txt"]
    );
}

#[test]
fn test_toggle_to_new_key_starts_descending() {
    let spec = SortSpec::new(SortKey::Name, SortDirection::Asc).toggle(SortKey::Size);

    assert_eq!(spec, SortSpec::new(SortKey::Size, SortDirection::Desc));
}

#[test]
fn test_apply_leaves_snapshot_untouched() {
    let (_dir, snapshot) = fixture();
    let before: Vec<_> = snapshot.entries().to_vec();

    let filter = ViewFilter::default().with_category(CategoryFilter::Only(FileCategory::Videos));
    let _ = apply(&snapshot, &filter, SortSpec::new(SortKey::Name, SortDirection::Asc));

    assert_eq!(snapshot.entries(), before.as_slice());
}
