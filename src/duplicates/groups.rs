//! Duplicate groups and the report returned by a detection pass.
//!
//! Groups borrow their entries from the snapshot they were computed over,
//! so they cannot outlive it. They are recomputed wholesale on every pass.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::scanner::{hash_to_hex, Entry, Hash};

/// Two or more files sharing one content hash.
#[derive(Debug, Clone)]
pub struct DuplicateGroup<'a> {
    /// Content hash shared by every file in the group
    pub hash: Hash,
    /// Files in the order they were first seen
    pub files: Vec<&'a Entry>,
}

impl<'a> DuplicateGroup<'a> {
    /// Start a group with the file that introduced `hash`.
    #[must_use]
    pub fn new(hash: Hash, first: &'a Entry) -> Self {
        Self {
            hash,
            files: vec![first],
        }
    }

    /// Append another file with the same hash.
    pub fn add(&mut self, file: &'a Entry) {
        self.files.push(file);
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether the group holds at least two files.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        self.files.len() > 1
    }

    /// Hash as hexadecimal.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }

    /// Size of one copy (the first file's size).
    #[must_use]
    pub fn size(&self) -> u64 {
        self.files.first().map_or(0, |f| f.size)
    }

    /// Combined size of every copy.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    /// Bytes reclaimable by keeping a single copy.
    #[must_use]
    pub fn wasted_bytes(&self) -> u64 {
        self.total_size().saturating_sub(self.size())
    }

    /// Whether `path` is one of the group's files.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.files.iter().any(|f| f.path == path)
    }
}

/// Counters for one detection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinderStats {
    /// Files submitted for hashing
    pub input_files: usize,
    /// Files hashed successfully
    pub hashed_files: usize,
    /// Files skipped because hashing failed
    pub failed_files: usize,
}

/// Outcome of a detection pass that had files to check.
#[derive(Debug, Clone)]
pub struct DuplicateReport<'a> {
    /// Groups in discovery order
    pub groups: Vec<DuplicateGroup<'a>>,
    /// Pass counters
    pub stats: FinderStats,
}

impl DuplicateReport<'_> {
    /// Whether the pass found no duplicates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Files beyond the first copy in every group.
    #[must_use]
    pub fn duplicate_files(&self) -> usize {
        self.groups.iter().map(|g| g.len() - 1).sum()
    }

    /// Bytes reclaimable across all groups.
    #[must_use]
    pub fn wasted_bytes(&self) -> u64 {
        self.groups.iter().map(DuplicateGroup::wasted_bytes).sum()
    }

    /// Paths belonging to any group, for overlaying onto a listing.
    #[must_use]
    pub fn marked_paths(&self) -> HashSet<PathBuf> {
        self.groups
            .iter()
            .flat_map(|g| g.files.iter().map(|f| f.path.clone()))
            .collect()
    }
}
