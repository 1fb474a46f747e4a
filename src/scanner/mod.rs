//! Scanner module for directory listing and size aggregation.
//!
//! This module provides functionality for:
//! - Listing one directory level into an immutable [`Snapshot`]
//! - Recursive size aggregation for child directories
//! - File category classification by extension
//! - Content hashing with BLAKE3
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Top-level listing and recursive aggregation
//! - [`category`]: Fixed extension to category table
//! - [`identity`]: Directory identity tracking for revisit detection
//! - [`hasher`]: BLAKE3 file hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use dirscope::scanner::{Scanner, ScannerConfig};
//! use std::path::Path;
//!
//! let scanner = Scanner::new(ScannerConfig::default());
//! let snapshot = scanner.scan(Path::new(".")).unwrap();
//! for entry in snapshot.entries() {
//!     println!("{}: {} bytes", entry.name, entry.size);
//! }
//! ```

pub mod category;
pub mod hasher;
pub mod identity;
pub mod walker;

use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub use category::FileCategory;
pub use hasher::{hash_to_hex, ContentHasher, Hash, Hasher};
pub use walker::{aggregate_size, scan, DirTotals, Scanner};

/// One filesystem object directly inside a scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Base name of the object
    pub name: String,
    /// Absolute path, unique within a snapshot
    pub path: PathBuf,
    /// Whether this entry is a directory
    pub is_dir: bool,
    /// Byte length for files, recursive aggregate for directories
    pub size: u64,
    /// Lowercase extension including the leading dot, empty for directories
    pub extension: String,
    /// Category derived from the extension, `None` for directories
    pub category: Option<FileCategory>,
    /// Last modification time
    pub modified: SystemTime,
    /// Creation time, when the platform reports one
    pub created: Option<SystemTime>,
}

impl Entry {
    /// Create a file entry, deriving extension and category from the path.
    #[must_use]
    pub fn file(path: PathBuf, size: u64, modified: SystemTime) -> Self {
        let extension = extension_of(&path);
        let category = Some(FileCategory::from_extension(&extension));
        Self {
            name: name_of(&path),
            path,
            is_dir: false,
            size,
            extension,
            category,
            modified,
            created: None,
        }
    }

    /// Create a directory entry with an already aggregated size.
    #[must_use]
    pub fn directory(path: PathBuf, size: u64, modified: SystemTime) -> Self {
        Self {
            name: name_of(&path),
            path,
            is_dir: true,
            size,
            extension: String::new(),
            category: None,
            modified,
            created: None,
        }
    }

    /// Attach a creation time.
    #[must_use]
    pub fn with_created(mut self, created: Option<SystemTime>) -> Self {
        self.created = created;
        self
    }

    pub(crate) fn from_metadata(path: PathBuf, size: u64, metadata: &Metadata) -> Self {
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let entry = if metadata.is_dir() {
            Self::directory(path, size, modified)
        } else {
            Self::file(path, size, modified)
        };
        entry.with_created(metadata.created().ok())
    }

    /// Whether this entry is a file of the given category.
    #[must_use]
    pub fn is_category(&self, category: FileCategory) -> bool {
        !self.is_dir && self.category == Some(category)
    }
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Lowercase extension of `path` with its leading dot, or an empty string.
#[must_use]
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// The result of one scan: immediate children of a directory.
///
/// Entries are held in the canonical order (size descending, ties in
/// enumeration order). A snapshot has no mutating methods; re-scanning
/// produces a new one.
#[derive(Debug, Clone)]
pub struct Snapshot {
    root: PathBuf,
    entries: Vec<Entry>,
    scanned_at: SystemTime,
}

impl Snapshot {
    /// Build a snapshot from entries in enumeration order.
    ///
    /// The entries are stably sorted by size, largest first.
    #[must_use]
    pub fn from_entries(root: PathBuf, mut entries: Vec<Entry>) -> Self {
        entries.sort_by(|a, b| b.size.cmp(&a.size));
        Self {
            root,
            entries,
            scanned_at: SystemTime::now(),
        }
    }

    /// Directory this snapshot describes.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All entries in canonical order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Non-directory entries in canonical order.
    pub fn files(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| !e.is_dir)
    }

    /// Look up an entry by path.
    #[must_use]
    pub fn find(&self, path: &Path) -> Option<&Entry> {
        self.entries.iter().find(|e| e.path == path)
    }

    /// Sum of all entry sizes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the scanned directory had no readable entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// When the scan completed.
    #[must_use]
    pub fn scanned_at(&self) -> SystemTime {
        self.scanned_at
    }
}

/// Configuration for scanning.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Resolve symbolic links to their targets when sizing entries.
    pub follow_symlinks: bool,

    /// Worker threads for sibling directory aggregation (0 = rayon default).
    pub threads: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: true,
            threads: 0,
        }
    }
}

impl ScannerConfig {
    /// Set symlink following.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set the worker thread count.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }
}

/// Errors that fail a scan of the top-level directory.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when listing the directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Any other I/O error while listing the directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    pub(crate) fn from_io(path: &Path, error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    pub(crate) fn from_io(path: &Path, error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Run `op` on a dedicated rayon pool with `threads` workers.
///
/// Falls back to the global pool when `threads` is 0 or the pool cannot be built.
pub(crate) fn install<T, F>(threads: usize, op: F) -> T
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    if threads == 0 {
        return op();
    }
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(op),
        Err(e) => {
            log::warn!(
                "Failed to create thread pool, using global pool with {} threads: {}",
                rayon::current_num_threads(),
                e
            );
            op()
        }
    }
}
