//! Output formatters for listings and duplicate reports.
//!
//! This module provides three formats:
//! - Text for people, with human-readable sizes and size bars
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! Every formatter renders the same [`Listing`] (a view plus duplicate
//! markers) or a [`DuplicateReport`](crate::duplicates::DuplicateReport).
//!
//! # Example
//!
//! ```no_run
//! use dirscope::app::AppState;
//! use dirscope::output::{Listing, TextOutput};
//! use std::path::Path;
//!
//! let mut app = AppState::default();
//! app.open(Path::new(".")).unwrap();
//! if let Some(listing) = Listing::from_app(&app) {
//!     print!("{}", TextOutput::new(false).listing(&listing));
//! }
//! ```

pub mod csv;
pub mod json;
pub mod text;

use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::app::AppState;
use crate::scanner::Entry;
use crate::view::{SortSpec, View, ViewStats};

pub use self::csv::{CsvOutput, CsvOutputError};
pub use json::{JsonDuplicates, JsonListing};
pub use text::TextOutput;

/// One displayed row.
#[derive(Debug, Clone, Copy)]
pub struct ListingRow<'a> {
    /// The entry
    pub entry: &'a Entry,
    /// Whether the entry is marked as a duplicate
    pub duplicate: bool,
}

/// A rendered-ready directory listing.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    /// Scanned directory
    pub root: &'a Path,
    /// When the snapshot was taken
    pub scanned_at: SystemTime,
    /// Active sort
    pub sort: SortSpec,
    /// Statistics over the rows
    pub stats: ViewStats,
    /// Reference size for size bars
    pub bar_basis: u64,
    /// Rows in display order
    pub rows: Vec<ListingRow<'a>>,
}

impl<'a> Listing<'a> {
    /// Build a listing from a view, marking rows with `is_duplicate`.
    pub fn new<F>(
        root: &'a Path,
        scanned_at: SystemTime,
        sort: SortSpec,
        view: &View<'a>,
        is_duplicate: F,
    ) -> Self
    where
        F: Fn(&Path) -> bool,
    {
        let rows = view
            .entries()
            .iter()
            .map(|&entry| ListingRow {
                entry,
                duplicate: is_duplicate(&entry.path),
            })
            .collect();

        Self {
            root,
            scanned_at,
            sort,
            stats: view.stats(),
            bar_basis: view.bar_basis(),
            rows,
        }
    }

    /// Build the listing for the application's current view.
    #[must_use]
    pub fn from_app(app: &'a AppState) -> Option<Self> {
        let snapshot = app.snapshot()?;
        let view = app.view()?;
        Some(Self::new(
            snapshot.root(),
            snapshot.scanned_at(),
            app.sort(),
            &view,
            |path| app.is_duplicate(path),
        ))
    }

    /// Number of rows marked as duplicates.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.rows.iter().filter(|r| r.duplicate).count()
    }
}

/// Format a timestamp as RFC 3339 (UTC).
#[must_use]
pub fn rfc3339(time: SystemTime) -> String {
    let datetime: DateTime<Utc> = time.into();
    datetime.to_rfc3339()
}
