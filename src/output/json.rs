//! JSON output for listings and duplicate reports.
//!
//! # Listing schema
//!
//! ```json
//! {
//!   "root": "/home/user/Downloads",
//!   "scanned_at": "2024-05-01T10:00:00+00:00",
//!   "sort": { "key": "size", "direction": "desc" },
//!   "stats": { "total_size": 2048, "file_count": 1, "folder_count": 1 },
//!   "entries": [
//!     {
//!       "name": "photos",
//!       "path": "/home/user/Downloads/photos",
//!       "is_dir": true,
//!       "size": 1024,
//!       "extension": "",
//!       "category": null,
//!       "modified": "2024-04-30T09:00:00+00:00",
//!       "created": null,
//!       "duplicate": false
//!     }
//!   ]
//! }
//! ```
//!
//! # Duplicate report schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     { "hash": "abc123...", "size": 1024, "wasted_bytes": 1024, "files": ["/a", "/b"] }
//!   ],
//!   "summary": {
//!     "input_files": 10,
//!     "hashed_files": 10,
//!     "failed_files": 0,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 1,
//!     "reclaimable_space": 1024,
//!     "exit_code": 0,
//!     "exit_code_name": "DS000"
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use super::{rfc3339, Listing};
use crate::duplicates::{DuplicateGroup, DuplicateReport};
use crate::error::ExitCode;
use crate::scanner::FileCategory;
use crate::view::{SortSpec, ViewStats};

/// A single entry in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonEntry {
    /// Base name
    pub name: String,
    /// Absolute path
    pub path: String,
    /// Whether this is a directory
    pub is_dir: bool,
    /// Size in bytes (aggregate for directories)
    pub size: u64,
    /// Lowercase extension with leading dot, or empty
    pub extension: String,
    /// File category, null for directories
    pub category: Option<FileCategory>,
    /// Last modified time (RFC 3339)
    pub modified: String,
    /// Creation time (RFC 3339), when available
    pub created: Option<String>,
    /// Whether the entry is marked as a duplicate
    pub duplicate: bool,
}

/// Complete JSON listing.
#[derive(Debug, Clone, Serialize)]
pub struct JsonListing {
    /// Scanned directory
    pub root: String,
    /// Scan time (RFC 3339)
    pub scanned_at: String,
    /// Active sort
    pub sort: SortSpec,
    /// Statistics over the entries
    pub stats: ViewStats,
    /// Entries in display order
    pub entries: Vec<JsonEntry>,
}

impl JsonListing {
    /// Convert a listing.
    #[must_use]
    pub fn new(listing: &Listing<'_>) -> Self {
        let entries = listing
            .rows
            .iter()
            .map(|row| {
                let e = row.entry;
                JsonEntry {
                    name: e.name.clone(),
                    path: e.path.to_string_lossy().into_owned(),
                    is_dir: e.is_dir,
                    size: e.size,
                    extension: e.extension.clone(),
                    category: e.category,
                    modified: rfc3339(e.modified),
                    created: e.created.map(rfc3339),
                    duplicate: row.duplicate,
                }
            })
            .collect();

        Self {
            root: listing.root.to_string_lossy().into_owned(),
            scanned_at: rfc3339(listing.scanned_at),
            sort: listing.sort,
            stats: listing.stats,
            entries,
        }
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(writer, self)
    }
}

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// BLAKE3 hash as hexadecimal string (64 characters)
    pub hash: String,
    /// Size of one copy in bytes
    pub size: u64,
    /// Bytes reclaimable by keeping one copy
    pub wasted_bytes: u64,
    /// Absolute paths, in discovery order
    pub files: Vec<String>,
}

impl JsonDuplicateGroup {
    fn from_group(group: &DuplicateGroup<'_>) -> Self {
        Self {
            hash: group.hash_hex(),
            size: group.size(),
            wasted_bytes: group.wasted_bytes(),
            files: group
                .files
                .iter()
                .map(|f| f.path.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Files submitted for hashing
    pub input_files: usize,
    /// Files hashed successfully
    pub hashed_files: usize,
    /// Files skipped because hashing failed
    pub failed_files: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Duplicate files beyond the first copy of each group
    pub duplicate_files: usize,
    /// Total reclaimable bytes
    pub reclaimable_space: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DS000")
    pub exit_code_name: String,
}

/// Complete JSON duplicate report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicates {
    /// Groups in discovery order
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Summary statistics
    pub summary: JsonSummary,
}

impl JsonDuplicates {
    /// Convert a report.
    #[must_use]
    pub fn new(report: &DuplicateReport<'_>, exit_code: ExitCode) -> Self {
        Self {
            duplicates: report
                .groups
                .iter()
                .map(JsonDuplicateGroup::from_group)
                .collect(),
            summary: JsonSummary {
                input_files: report.stats.input_files,
                hashed_files: report.stats.hashed_files,
                failed_files: report.stats.failed_files,
                duplicate_groups: report.groups.len(),
                duplicate_files: report.duplicate_files(),
                reclaimable_space: report.wasted_bytes(),
                exit_code: exit_code.as_i32(),
                exit_code_name: exit_code.code_prefix().to_string(),
            },
        }
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(writer, self)
    }
}
