use dirscope::actions::DeleteMode;
use dirscope::app::{AppError, AppState};
use dirscope::duplicates::FinderError;
use dirscope::scanner::ScanError;
use dirscope::view::{CategoryFilter, SortDirection, SortKey, SortSpec, ViewFilter};
use std::fs;
use tempfile::{tempdir, TempDir};

fn tree() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("music").join("live")).unwrap();
    fs::write(root.join("music").join("song.mp3"), vec![1u8; 30]).unwrap();
    fs::write(root.join("music").join("live").join("set.mp3"), vec![2u8; 70]).unwrap();
    fs::write(root.join("copy1.txt"), "duplicate").unwrap();
    fs::write(root.join("copy2.txt"), "duplicate").unwrap();
    fs::write(root.join("unique.txt"), "one of a kind").unwrap();
    dir
}

#[test]
fn test_navigate_down_and_back() {
    let dir = tree();
    let mut app = AppState::default();

    app.open(dir.path()).unwrap();
    assert!(!app.can_go_back());
    assert_eq!(app.snapshot().unwrap().find(&dir.path().join("music")).unwrap().size, 100);

    let music = dir.path().join("music");
    app.enter(&music).unwrap();
    assert_eq!(app.current_dir(), Some(music.as_path()));
    assert!(app.can_go_back());

    let live = music.join("live");
    app.enter(&live).unwrap();
    assert_eq!(app.snapshot().unwrap().total_size(), 70);

    app.back().unwrap();
    assert_eq!(app.current_dir(), Some(music.as_path()));
    app.back().unwrap();
    assert_eq!(app.current_dir(), Some(dir.path()));
    assert!(app.back().unwrap().is_none());
}

#[test]
fn test_failed_enter_keeps_current_directory() {
    let dir = tree();
    let mut app = AppState::default();
    app.open(dir.path()).unwrap();

    let result = app.enter(&dir.path().join("missing"));

    assert!(matches!(result, Err(AppError::Scan(ScanError::NotFound(_)))));
    assert_eq!(app.current_dir(), Some(dir.path()));
    assert!(!app.can_go_back());
}

#[test]
fn test_navigation_resets_filters_but_refresh_keeps_them() {
    let dir = tree();
    let mut app = AppState::default();
    app.open(dir.path()).unwrap();

    app.set_filter(ViewFilter::default().with_category(CategoryFilter::Folders));
    assert_eq!(app.view().unwrap().len(), 1);

    app.refresh().unwrap();
    assert_eq!(app.filter().category, CategoryFilter::Folders);

    app.enter(&dir.path().join("music")).unwrap();
    assert!(app.filter().is_inactive());
}

#[test]
fn test_sort_toggle_drives_view() {
    let dir = tree();
    let mut app = AppState::default();
    app.open(dir.path()).unwrap();

    app.toggle_sort(SortKey::Name);
    assert_eq!(app.sort(), SortSpec::new(SortKey::Name, SortDirection::Desc));
    app.toggle_sort(SortKey::Name);

    let view = app.view().unwrap();
    let names: Vec<_> = view.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["copy1.txt", "copy2.txt", "music", "unique.txt"]);
}

#[test]
fn test_duplicate_markers_overlay_view() {
    let dir = tree();
    let mut app = AppState::default();
    app.open(dir.path()).unwrap();

    assert_eq!(app.find_duplicates().unwrap(), 1);
    assert_eq!(app.marker_count(), 2);
    assert!(app.is_duplicate(&dir.path().join("copy1.txt")));
    assert!(app.is_duplicate(&dir.path().join("copy2.txt")));
    assert!(!app.is_duplicate(&dir.path().join("unique.txt")));
    assert!(!app.is_duplicate(&dir.path().join("music")));
}

#[test]
fn test_delete_refreshes_and_clears_markers() {
    let dir = tree();
    let mut app = AppState::default();
    app.open(dir.path()).unwrap();
    app.find_duplicates().unwrap();

    let target = dir.path().join("copy2.txt");
    let outcome = app.delete(&target, DeleteMode::Permanent).unwrap();

    assert!(outcome.existed);
    assert_eq!(outcome.size, 9);
    assert!(!target.exists());
    assert!(app.snapshot().unwrap().find(&target).is_none());
    assert_eq!(app.marker_count(), 0);
    assert!(!app.is_duplicate(&dir.path().join("copy1.txt")));
}

#[test]
fn test_delete_directory_recursively() {
    let dir = tree();
    let mut app = AppState::default();
    app.open(dir.path()).unwrap();

    let music = dir.path().join("music");
    let outcome = app.delete(&music, DeleteMode::Permanent).unwrap();

    assert_eq!(outcome.size, 100);
    assert!(!music.exists());
    assert_eq!(app.snapshot().unwrap().len(), 3);
}

#[test]
fn test_delete_missing_path_still_refreshes() {
    let dir = tree();
    let mut app = AppState::default();
    app.open(dir.path()).unwrap();

    // Removed behind the app's back.
    fs::remove_file(dir.path().join("unique.txt")).unwrap();
    let outcome = app
        .delete(&dir.path().join("unique.txt"), DeleteMode::Permanent)
        .unwrap();

    assert!(!outcome.existed);
    assert_eq!(app.snapshot().unwrap().len(), 3);
}

#[test]
fn test_find_duplicates_without_files() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("only-a-folder")).unwrap();
    let mut app = AppState::default();

    assert!(matches!(app.find_duplicates(), Err(AppError::NoDirectory)));

    app.open(dir.path()).unwrap();
    assert!(matches!(
        app.find_duplicates(),
        Err(AppError::Duplicates(FinderError::NothingToCheck))
    ));
    assert_eq!(app.marker_count(), 0);
}

#[test]
fn test_delete_and_open_lists_parent_without_target() {
    let dir = tree();
    let root = dir.path();
    let mut app = AppState::default();

    let outcome = app
        .delete_and_open(&root.join("music"), DeleteMode::Permanent, root)
        .unwrap();

    assert!(outcome.existed);
    assert_eq!(outcome.size, 100);
    assert!(!root.join("music").exists());
    assert_eq!(app.current_dir(), Some(root));
    assert!(app.snapshot().unwrap().find(&root.join("music")).is_none());
    assert!(!app.can_go_back());
}

#[test]
fn test_refresh_without_directory() {
    let mut app = AppState::default();

    assert!(matches!(app.refresh(), Err(AppError::NoDirectory)));
    assert!(app.view().is_none());
}
