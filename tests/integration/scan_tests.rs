use dirscope::scanner::{aggregate_size, scan, FileCategory, ScanError, Scanner, ScannerConfig};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_nested_directory_aggregates_all_descendants() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir_all(nested.join("deeper")).unwrap();
    fs::write(nested.join("ten.bin"), vec![0u8; 10]).unwrap();
    fs::write(nested.join("twenty.bin"), vec![0u8; 20]).unwrap();
    fs::write(nested.join("deeper").join("five.bin"), vec![0u8; 5]).unwrap();

    let snapshot = scan(dir.path()).unwrap();

    assert_eq!(snapshot.len(), 1);
    let entry = &snapshot.entries()[0];
    assert_eq!(entry.name, "nested");
    assert!(entry.is_dir);
    assert_eq!(entry.size, 35);
    assert_eq!(entry.extension, "");
    assert_eq!(entry.category, None);
}

#[test]
fn test_entries_sorted_by_size_descending() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("small.txt"), "ab").unwrap();
    fs::write(dir.path().join("large.txt"), "abcdefgh").unwrap();
    fs::create_dir(dir.path().join("medium")).unwrap();
    fs::write(dir.path().join("medium").join("inner.txt"), "abcde").unwrap();

    let snapshot = scan(dir.path()).unwrap();
    let names: Vec<_> = snapshot.entries().iter().map(|e| e.name.as_str()).collect();

    assert_eq!(names, vec!["large.txt", "medium", "small.txt"]);
    assert_eq!(snapshot.total_size(), 15);
}

#[test]
fn test_entry_fields_for_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Holiday.JPG"), "img").unwrap();
    fs::write(dir.path().join("notes"), "plain").unwrap();

    let snapshot = scan(dir.path()).unwrap();

    let photo = snapshot.find(&dir.path().join("Holiday.JPG")).unwrap();
    assert_eq!(photo.extension, ".jpg");
    assert_eq!(photo.category, Some(FileCategory::Images));
    assert_eq!(photo.size, 3);
    assert!(!photo.is_dir);

    let notes = snapshot.find(&dir.path().join("notes")).unwrap();
    assert_eq!(notes.extension, "");
    assert_eq!(notes.category, Some(FileCategory::Other));
}

#[test]
fn test_empty_directory_is_success() {
    let dir = tempdir().unwrap();

    let snapshot = scan(dir.path()).unwrap();

    assert!(snapshot.is_empty());
    assert_eq!(snapshot.total_size(), 0);
}

#[test]
fn test_missing_directory_is_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    match scan(&missing) {
        Err(ScanError::NotFound(path)) => assert_eq!(path, missing),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_file_target_is_error() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, "x").unwrap();

    assert!(matches!(scan(&file), Err(ScanError::NotADirectory(_))));
}

#[test]
fn test_rescan_is_idempotent() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "aaa").unwrap();
    fs::write(dir.path().join("b.txt"), "aaa").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("c.zip"), "cccc").unwrap();

    let first = scan(dir.path()).unwrap();
    let second = scan(dir.path()).unwrap();

    let key = |s: &dirscope::scanner::Snapshot| {
        s.entries()
            .iter()
            .map(|e| {
                (
                    e.name.clone(),
                    e.path.clone(),
                    e.size,
                    e.is_dir,
                    e.extension.clone(),
                    e.category,
                )
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(key(&first), key(&second));
}

#[test]
fn test_single_threaded_scan_matches_parallel() {
    let dir = tempdir().unwrap();
    for i in 0..6 {
        let sub = dir.path().join(format!("dir_{i}"));
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("data.bin"), vec![1u8; i * 7]).unwrap();
    }

    let parallel = scan(dir.path()).unwrap();
    let serial = Scanner::new(ScannerConfig::default().with_threads(1))
        .scan(dir.path())
        .unwrap();

    let sizes = |s: &dirscope::scanner::Snapshot| {
        s.entries()
            .iter()
            .map(|e| (e.name.clone(), e.size))
            .collect::<Vec<_>>()
    };
    assert_eq!(sizes(&parallel), sizes(&serial));
}

#[test]
fn test_aggregate_size_counts_files() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a").join("b")).unwrap();
    fs::write(dir.path().join("one"), vec![0u8; 100]).unwrap();
    fs::write(dir.path().join("a").join("two"), vec![0u8; 200]).unwrap();
    fs::write(dir.path().join("a").join("b").join("three"), vec![0u8; 300]).unwrap();

    let totals = aggregate_size(dir.path(), true);

    assert_eq!(totals.bytes, 600);
    assert_eq!(totals.files, 3);
    assert_eq!(totals.skipped, 0);
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::fs::symlink;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_broken_symlink_is_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("real.txt"), "data").unwrap();
        symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

        let snapshot = scan(dir.path()).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.entries()[0].name, "real.txt");
    }

    #[test]
    fn test_broken_symlink_kept_without_following() {
        let dir = tempdir().unwrap();
        symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

        let scanner = Scanner::new(ScannerConfig::default().with_follow_symlinks(false));
        let snapshot = scanner.scan(dir.path()).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert!(!snapshot.entries()[0].is_dir);
    }

    #[test]
    fn test_symlink_loop_terminates() {
        let dir = tempdir().unwrap();
        let looped = dir.path().join("looped");
        fs::create_dir(&looped).unwrap();
        fs::write(looped.join("file.bin"), vec![0u8; 12]).unwrap();
        symlink(&looped, looped.join("self")).unwrap();

        let snapshot = scan(dir.path()).unwrap();
        let entry = snapshot.find(&looped).unwrap();
        let totals = aggregate_size(&looped, true);

        assert_eq!(entry.size, 12);
        assert_eq!(totals.revisits, 1);
        assert_eq!(totals.skipped, 0);
    }

    /// Build `top/a/b/c/locked` with a reachable file at `a`, `a/b` and `a/b/c`.
    /// Returns the `top` and `locked` paths; 10 + 20 + 30 bytes are reachable.
    fn deep_tree_with_locked_leaf(root: &Path) -> (PathBuf, PathBuf) {
        let top = root.join("top");
        let a = top.join("a");
        let b = a.join("b");
        let c = b.join("c");
        let locked = c.join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(a.join("at_a.bin"), vec![0u8; 10]).unwrap();
        fs::write(b.join("at_b.bin"), vec![0u8; 20]).unwrap();
        fs::write(c.join("at_c.bin"), vec![0u8; 30]).unwrap();
        fs::write(locked.join("hidden.bin"), vec![0u8; 500]).unwrap();
        (top, locked)
    }

    #[test]
    fn test_unreadable_subdirectory_keeps_partial_sum() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let (top, locked) = deep_tree_with_locked_leaf(dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            eprintln!(
                "skipping test_unreadable_subdirectory_keeps_partial_sum: \
                 running with privileges that bypass directory permissions"
            );
            return;
        }

        let snapshot = scan(dir.path());
        let totals = aggregate_size(&top, true);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let snapshot = snapshot.unwrap();
        assert_eq!(snapshot.find(&top).unwrap().size, 60);
        assert_eq!(totals.bytes, 60);
        assert_eq!(totals.files, 3);
        assert!(totals.skipped > 0);
    }

    #[test]
    fn test_failing_leaf_keeps_partial_sum() {
        // A dangling link fails to resolve for every user, privileged or not.
        let dir = tempdir().unwrap();
        let (top, locked) = deep_tree_with_locked_leaf(dir.path());
        fs::remove_dir_all(&locked).unwrap();
        symlink(dir.path().join("vanished"), &locked).unwrap();

        let snapshot = scan(dir.path()).unwrap();
        let totals = aggregate_size(&top, true);

        assert_eq!(snapshot.find(&top).unwrap().size, 60);
        assert_eq!(totals.bytes, 60);
        assert_eq!(totals.skipped, 1);
    }

    #[test]
    fn test_unreadable_top_level_is_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            eprintln!(
                "skipping test_unreadable_top_level_is_error: \
                 running with privileges that bypass directory permissions"
            );
            return;
        }

        let result = scan(&locked);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(ScanError::PermissionDenied(_))));
    }
}
