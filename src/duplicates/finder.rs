//! Duplicate finder: content-hash grouping over a set of files.
//!
//! # Overview
//!
//! Every input file is hashed (no early exit), then files are grouped by
//! hash. Only groups with two or more members are reported.
//!
//! - Directories in the input are ignored; they are never hashed.
//! - A file that fails to hash is logged and skipped; the pass continues.
//! - Hashing runs on a bounded rayon pool, but results are regrouped in
//!   input order, so group order follows the first file that introduced
//!   each hash and members appear in input order.
//! - An empty input is [`FinderError::NothingToCheck`], distinct from a
//!   report with no groups.
//!
//! # Example
//!
//! ```no_run
//! use dirscope::duplicates::{DuplicateFinder, FinderError};
//! use dirscope::scanner::scan;
//! use std::path::Path;
//!
//! let snapshot = scan(Path::new(".")).unwrap();
//! match DuplicateFinder::with_defaults().find_in_snapshot(&snapshot) {
//!     Ok(report) if report.is_empty() => println!("No duplicate files found"),
//!     Ok(report) => println!("{} duplicate groups", report.groups.len()),
//!     Err(FinderError::NothingToCheck) => println!("No files to check"),
//! }
//! ```

use std::collections::hash_map::Entry as MapEntry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use super::groups::{DuplicateGroup, DuplicateReport, FinderStats};
use crate::progress::{ProgressCallback, PHASE_HASH};
use crate::scanner::{install, ContentHasher, Entry, Hash, Hasher, Snapshot};

/// Configuration for a detection pass.
#[derive(Clone)]
pub struct FinderConfig {
    /// Number of I/O threads for parallel hashing.
    /// Default is 4 to prevent disk thrashing.
    pub io_threads: usize,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("io_threads", &self.io_threads)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            io_threads: 4,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the I/O thread count (minimum 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Outcomes of a detection pass that are not a report.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinderError {
    /// The input contained no files.
    #[error("No files to check for duplicates")]
    NothingToCheck,
}

/// Duplicate finder over a pluggable [`ContentHasher`].
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Arc<dyn ContentHasher>,
}

impl std::fmt::Debug for DuplicateFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuplicateFinder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for DuplicateFinder {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl DuplicateFinder {
    /// Create a finder using the BLAKE3 [`Hasher`].
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self {
            config,
            hasher: Arc::new(Hasher::new()),
        }
    }

    /// Create a finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Replace the hashing capability.
    #[must_use]
    pub fn with_hasher(mut self, hasher: Arc<dyn ContentHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Find duplicates among the files of `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::NothingToCheck`] if the snapshot has no files.
    pub fn find_in_snapshot<'a>(
        &self,
        snapshot: &'a Snapshot,
    ) -> Result<DuplicateReport<'a>, FinderError> {
        self.find_duplicates(snapshot.files())
    }

    /// Find duplicates among `files`.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::NothingToCheck`] if `files` contains no
    /// non-directory entries.
    pub fn find_duplicates<'a, I>(&self, files: I) -> Result<DuplicateReport<'a>, FinderError>
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let files: Vec<&'a Entry> = files.into_iter().filter(|e| !e.is_dir).collect();
        if files.is_empty() {
            log::debug!("Duplicate check: no files");
            return Err(FinderError::NothingToCheck);
        }

        log::info!("Hashing {} files", files.len());
        let hashes = self.hash_all(&files);

        let mut stats = FinderStats {
            input_files: files.len(),
            ..Default::default()
        };
        let mut index: HashMap<Hash, usize> = HashMap::new();
        let mut groups: Vec<DuplicateGroup<'a>> = Vec::new();

        for (file, hash) in files.into_iter().zip(hashes) {
            let Some(hash) = hash else {
                stats.failed_files += 1;
                continue;
            };
            stats.hashed_files += 1;

            match index.entry(hash) {
                MapEntry::Occupied(slot) => groups[*slot.get()].add(file),
                MapEntry::Vacant(slot) => {
                    slot.insert(groups.len());
                    groups.push(DuplicateGroup::new(hash, file));
                }
            }
        }

        groups.retain(DuplicateGroup::is_duplicate);

        log::info!(
            "Duplicate check: {} groups from {} files ({} failed)",
            groups.len(),
            stats.hashed_files,
            stats.failed_files
        );

        Ok(DuplicateReport { groups, stats })
    }

    /// Hash every file, returning results in input order.
    fn hash_all(&self, files: &[&Entry]) -> Vec<Option<Hash>> {
        let progress = self.config.progress_callback.as_deref();
        if let Some(callback) = progress {
            callback.on_phase_start(PHASE_HASH, files.len());
        }

        let done = AtomicUsize::new(0);
        let hasher = self.hasher.as_ref();

        let hashes = install(self.config.io_threads, || {
            files
                .par_iter()
                .map(|file| {
                    let result = match hasher.hash_file(&file.path) {
                        Ok(hash) => Some(hash),
                        Err(e) => {
                            log::debug!("Skipping unhashable file: {}", e);
                            None
                        }
                    };
                    if let Some(callback) = progress {
                        let current = done.fetch_add(1, Ordering::Relaxed) + 1;
                        callback.on_progress(current, &file.path.to_string_lossy());
                    }
                    result
                })
                .collect()
        });

        if let Some(callback) = progress {
            callback.on_phase_end(PHASE_HASH);
        }
        hashes
    }
}

/// Find duplicates among `files` with the default finder.
///
/// # Errors
///
/// Returns [`FinderError::NothingToCheck`] if there are no files.
pub fn find_duplicates<'a, I>(files: I) -> Result<DuplicateReport<'a>, FinderError>
where
    I: IntoIterator<Item = &'a Entry>,
{
    DuplicateFinder::with_defaults().find_duplicates(files)
}
