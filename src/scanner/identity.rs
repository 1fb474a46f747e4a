//! Directory identity tracking for a single aggregation walk.
//!
//! When symbolic links are followed, two paths can lead into the same
//! directory and a link can point back at one of its own ancestors. The
//! walker records every directory it enters and refuses to enter one twice,
//! so each walk terminates and counts a directory's contents at most once.
//!
//! # Platform Support
//!
//! - **Unix**: Uses (device_id, inode) pairs from directory metadata
//! - **Other**: Uses the canonicalized path
//!
//! # Example
//!
//! ```no_run
//! use dirscope::scanner::identity::VisitedDirs;
//! use std::path::Path;
//!
//! let mut visited = VisitedDirs::new();
//! let path = Path::new("/some/dir");
//! let meta = std::fs::metadata(path).unwrap();
//!
//! assert!(visited.first_visit(path, &meta));
//! assert!(!visited.first_visit(path, &meta));
//! ```

use std::collections::HashSet;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// Identity of a directory on disk, independent of the path used to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DirIdentity {
    /// Device and inode numbers.
    Inode {
        /// Device ID
        dev: u64,
        /// Inode number
        ino: u64,
    },
    /// Fully resolved path.
    Canonical(PathBuf),
}

impl DirIdentity {
    /// Identify a directory from its (link-resolved) metadata.
    ///
    /// Returns `None` when no stable identity can be determined.
    #[cfg(unix)]
    #[must_use]
    pub fn of(_path: &Path, metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self::Inode {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }

    /// Identify a directory from its (link-resolved) metadata.
    ///
    /// Returns `None` when no stable identity can be determined.
    #[cfg(not(unix))]
    #[must_use]
    pub fn of(path: &Path, _metadata: &Metadata) -> Option<Self> {
        std::fs::canonicalize(path).ok().map(Self::Canonical)
    }
}

/// Set of directories already entered during one walk.
///
/// Not shared between walks: each aggregation owns its own set.
#[derive(Debug, Default)]
pub struct VisitedDirs {
    seen: HashSet<DirIdentity>,
}

impl VisitedDirs {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a directory, returning `false` if it was entered before.
    ///
    /// Directories without a determinable identity are always treated as new.
    pub fn first_visit(&mut self, path: &Path, metadata: &Metadata) -> bool {
        match DirIdentity::of(path, metadata) {
            Some(id) => self.seen.insert(id),
            None => true,
        }
    }

    /// Number of distinct directories recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
