//! Directory listing and recursive size aggregation.
//!
//! # Overview
//!
//! [`Scanner::scan`] lists the immediate children of one directory and
//! resolves each child's type and size. Child directories are sized by
//! [`aggregate_size`], a full depth-first walk built on [`walkdir`].
//! Sibling directories are aggregated in parallel on a rayon pool.
//!
//! # Failure handling
//!
//! - The top-level directory failing to list is a [`ScanError`].
//! - A child whose metadata cannot be read is skipped.
//! - Inside an aggregation walk, unreadable subdirectories and entries are
//!   skipped; everything reachable is still summed.
//! - A directory reached twice during one walk (symlink loops, links into a
//!   sibling) is pruned on the second visit.
//!
//! # Example
//!
//! ```no_run
//! use dirscope::scanner::{Scanner, ScannerConfig};
//! use std::path::Path;
//!
//! let scanner = Scanner::new(ScannerConfig::default());
//! match scanner.scan(Path::new("/home/user/Downloads")) {
//!     Ok(snapshot) => println!("{} entries", snapshot.len()),
//!     Err(e) => eprintln!("Scan failed: {}", e),
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use walkdir::WalkDir;

use super::identity::VisitedDirs;
use super::{install, Entry, ScanError, ScannerConfig, Snapshot};
use crate::progress::{ProgressCallback, PHASE_SCAN};

/// Totals collected by one aggregation walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirTotals {
    /// Sum of all reachable file sizes
    pub bytes: u64,
    /// Number of files counted
    pub files: u64,
    /// Entries or directories that could not be read
    pub skipped: u64,
    /// Directories pruned because they were already visited
    pub revisits: u64,
}

/// One-level directory scanner.
///
/// Holds only configuration; every call to [`Scanner::scan`] is independent,
/// so one scanner can serve concurrent scans of different paths.
#[derive(Clone, Default)]
pub struct Scanner {
    config: ScannerConfig,
    progress: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("config", &self.config)
            .field("progress", &self.progress.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl Scanner {
    /// Create a scanner with the given configuration.
    #[must_use]
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Report each resolved child to `callback`.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = Some(callback);
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Scan the immediate children of `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] when `dir` itself does not exist, is not a
    /// directory, or cannot be listed. An empty directory is a successful,
    /// empty snapshot.
    pub fn scan(&self, dir: &Path) -> Result<Snapshot, ScanError> {
        let root = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());

        let metadata = fs::metadata(&root).map_err(|e| ScanError::from_io(&root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(root));
        }

        let read_dir = fs::read_dir(&root).map_err(|e| ScanError::from_io(&root, e))?;

        let children: Vec<PathBuf> = read_dir
            .filter_map(|item| match item {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    log::debug!("Skipping unreadable entry in {}: {}", root.display(), e);
                    None
                }
            })
            .collect();

        log::debug!("Scanning {} children of {}", children.len(), root.display());

        let progress = self.progress.as_deref();
        if let Some(callback) = progress {
            callback.on_phase_start(PHASE_SCAN, children.len());
        }

        let follow = self.config.follow_symlinks;
        let done = AtomicUsize::new(0);
        let resolved: Vec<Option<Entry>> = install(self.config.threads, || {
            children
                .into_par_iter()
                .map(|path| {
                    if let Some(callback) = progress {
                        let current = done.fetch_add(1, Ordering::Relaxed) + 1;
                        callback.on_progress(current, &path.to_string_lossy());
                    }
                    resolve_entry(path, follow)
                })
                .collect()
        });

        if let Some(callback) = progress {
            callback.on_phase_end(PHASE_SCAN);
        }

        let entries: Vec<Entry> = resolved.into_iter().flatten().collect();
        log::info!("Scanned {}: {} entries", root.display(), entries.len());

        Ok(Snapshot::from_entries(root, entries))
    }
}

/// Scan `dir` with the default configuration.
///
/// # Errors
///
/// See [`Scanner::scan`].
pub fn scan(dir: &Path) -> Result<Snapshot, ScanError> {
    Scanner::default().scan(dir)
}

/// Stat one child and size it, or `None` if it cannot be read.
fn resolve_entry(path: PathBuf, follow_symlinks: bool) -> Option<Entry> {
    let metadata = if follow_symlinks {
        fs::metadata(&path)
    } else {
        fs::symlink_metadata(&path)
    };

    let metadata = match metadata {
        Ok(m) => m,
        Err(e) => {
            log::debug!("Skipping {}: {}", path.display(), e);
            return None;
        }
    };

    let size = if metadata.is_dir() {
        let totals = aggregate_size(&path, follow_symlinks);
        if totals.skipped > 0 || totals.revisits > 0 {
            log::debug!(
                "Partial size for {}: {} unreadable, {} revisited",
                path.display(),
                totals.skipped,
                totals.revisits
            );
        }
        totals.bytes
    } else {
        metadata.len()
    };

    Some(Entry::from_metadata(path, size, &metadata))
}

/// Recursively sum the sizes of all files below `dir`.
///
/// Post-order in effect: a directory's total is the sum of its files plus
/// the totals of its subdirectories. Anything that fails to list or stat is
/// counted in [`DirTotals::skipped`] and the walk continues with siblings.
#[must_use]
pub fn aggregate_size(dir: &Path, follow_symlinks: bool) -> DirTotals {
    let mut totals = DirTotals::default();
    let mut visited = VisitedDirs::new();
    let mut revisits = 0u64;

    let walker = WalkDir::new(dir)
        .follow_links(follow_symlinks)
        .into_iter()
        .filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            // Unreadable metadata: let walkdir report the error when it descends.
            let Ok(metadata) = entry.metadata() else {
                return true;
            };
            if visited.first_visit(entry.path(), &metadata) {
                true
            } else {
                log::debug!("Already visited, skipping: {}", entry.path().display());
                revisits += 1;
                false
            }
        });

    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_dir() {
                    continue;
                }
                match entry.metadata() {
                    Ok(metadata) => {
                        totals.bytes += metadata.len();
                        totals.files += 1;
                    }
                    Err(e) => {
                        log::trace!("Cannot stat {}: {}", entry.path().display(), e);
                        totals.skipped += 1;
                    }
                }
            }
            Err(e) if e.loop_ancestor().is_some() => {
                log::debug!(
                    "Link back to an ancestor, skipping: {}",
                    e.path().unwrap_or(dir).display()
                );
                totals.revisits += 1;
            }
            Err(e) => {
                log::debug!(
                    "Walk error under {}: {}",
                    e.path().unwrap_or(dir).display(),
                    e
                );
                totals.skipped += 1;
            }
        }
    }

    totals.revisits += revisits;
    totals
}
