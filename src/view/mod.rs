//! View pipeline: filter and sort a snapshot for display.
//!
//! [`apply`] is a pure function. It performs no I/O, never mutates the
//! snapshot, and returns the same view for the same inputs. Statistics are
//! computed over exactly the entries in the view.
//!
//! # Example
//!
//! ```
//! use dirscope::scanner::{Entry, Snapshot};
//! use dirscope::view::{apply, CategoryFilter, SortSpec, ViewFilter};
//! use dirscope::scanner::FileCategory;
//! use std::path::PathBuf;
//! use std::time::SystemTime;
//!
//! let snapshot = Snapshot::from_entries(
//!     PathBuf::from("/d"),
//!     vec![
//!         Entry::file(PathBuf::from("/d/a.txt"), 100, SystemTime::now()),
//!         Entry::file(PathBuf::from("/d/b.jpg"), 50, SystemTime::now()),
//!     ],
//! );
//!
//! let filter = ViewFilter::default().with_category(CategoryFilter::Only(FileCategory::Images));
//! let view = apply(&snapshot, &filter, SortSpec::default());
//!
//! assert_eq!(view.len(), 1);
//! assert_eq!(view.stats().total_size, 50);
//! ```

pub mod filter;
pub mod sort;

use serde::Serialize;

use crate::scanner::{Entry, Snapshot};

pub use filter::{CategoryFilter, MinSize, SizeUnit, TextFilter, ViewFilter};
pub use sort::{SortDirection, SortKey, SortSpec};

/// Aggregate statistics over a set of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewStats {
    /// Sum of entry sizes
    pub total_size: u64,
    /// Non-directory entries
    pub file_count: usize,
    /// Directory entries
    pub folder_count: usize,
}

impl ViewStats {
    /// Compute statistics over `entries`.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        entries.into_iter().fold(Self::default(), |mut stats, e| {
            stats.total_size += e.size;
            if e.is_dir {
                stats.folder_count += 1;
            } else {
                stats.file_count += 1;
            }
            stats
        })
    }
}

/// A filtered, sorted view over a snapshot.
#[derive(Debug, Clone)]
pub struct View<'a> {
    entries: Vec<&'a Entry>,
    stats: ViewStats,
}

impl<'a> View<'a> {
    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[&'a Entry] {
        &self.entries
    }

    /// Statistics over the displayed entries.
    #[must_use]
    pub fn stats(&self) -> ViewStats {
        self.stats
    }

    /// Number of displayed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing passed the filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reference size for relative size bars: the first displayed entry's
    /// size, or 1 when that is zero or the view is empty.
    #[must_use]
    pub fn bar_basis(&self) -> u64 {
        self.entries.first().map_or(1, |e| e.size.max(1))
    }
}

/// Filter and sort `snapshot`.
#[must_use]
pub fn apply<'a>(snapshot: &'a Snapshot, filter: &ViewFilter, sort: SortSpec) -> View<'a> {
    apply_entries(snapshot.entries(), filter, sort)
}

/// Filter and sort a slice of entries.
#[must_use]
pub fn apply_entries<'a>(entries: &'a [Entry], filter: &ViewFilter, sort: SortSpec) -> View<'a> {
    let mut selected: Vec<&Entry> = entries.iter().filter(|e| filter.matches(e)).collect();
    sort.sort(&mut selected);
    let stats = ViewStats::from_entries(selected.iter().copied());
    View {
        entries: selected,
        stats,
    }
}
