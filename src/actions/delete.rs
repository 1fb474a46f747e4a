//! Deletion of a file or directory tree.
//!
//! # Overview
//!
//! [`delete_item`] removes one path, either permanently (recursive for
//! directories) or by moving it to the system trash. A path that no longer
//! exists is not an error; the outcome reports that nothing was removed.
//!
//! The caller is expected to re-scan the parent directory afterwards, since
//! snapshots are never patched in place.
//!
//! # Example
//!
//! ```no_run
//! use dirscope::actions::delete::{delete_item, DeleteMode};
//! use std::path::Path;
//!
//! match delete_item(Path::new("/tmp/old-build"), DeleteMode::Trash) {
//!     Ok(outcome) => println!("Freed {} bytes", outcome.size),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::scanner::aggregate_size;

/// How a path is removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeleteMode {
    /// Remove immediately; directories are removed recursively.
    #[default]
    Permanent,
    /// Move to the system trash (recoverable).
    Trash,
}

impl DeleteMode {
    /// Whether this mode cannot be undone.
    #[must_use]
    pub fn is_permanent(self) -> bool {
        matches!(self, Self::Permanent)
    }
}

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// Permission denied when attempting to delete.
    #[error("permission denied: {0} - try running with elevated privileges")]
    PermissionDenied(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed {
        /// Path that could not be moved
        path: PathBuf,
        /// Message from the platform trash
        message: String,
    },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path being deleted
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(p)
            | Self::TrashFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }

    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Result of a successful deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Bytes freed (aggregate size for directories).
    pub size: u64,
    /// How the path was removed.
    pub mode: DeleteMode,
    /// Whether anything existed at `path`.
    pub existed: bool,
}

/// Delete a file or directory tree.
///
/// Symbolic links are removed themselves, never their targets.
///
/// # Errors
///
/// - `PermissionDenied` if removal is not allowed
/// - `TrashFailed` if the platform trash rejects the path
/// - `Io` for any other failure
pub fn delete_item(path: &Path, mode: DeleteMode) -> Result<DeleteOutcome, DeleteError> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("Nothing to delete at {}", path.display());
            return Ok(DeleteOutcome {
                path: path.to_path_buf(),
                size: 0,
                mode,
                existed: false,
            });
        }
        Err(e) => return Err(DeleteError::from_io(path, e)),
    };

    let size = if metadata.is_dir() {
        aggregate_size(path, false).bytes
    } else {
        metadata.len()
    };

    match mode {
        DeleteMode::Permanent => {
            let removed = if metadata.is_dir() {
                fs::remove_dir_all(path)
            } else {
                fs::remove_file(path)
            };
            removed.map_err(|e| {
                log::error!("Permanent delete failed for {}: {}", path.display(), e);
                DeleteError::from_io(path, e)
            })?;
            log::info!("Permanently deleted: {} ({} bytes)", path.display(), size);
        }
        DeleteMode::Trash => {
            trash::delete(path).map_err(|e| {
                log::error!("Trash operation failed for {}: {}", path.display(), e);
                DeleteError::TrashFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?;
            log::info!("Moved to trash: {} ({} bytes)", path.display(), size);
        }
    }

    Ok(DeleteOutcome {
        path: path.to_path_buf(),
        size,
        mode,
        existed: true,
    })
}
