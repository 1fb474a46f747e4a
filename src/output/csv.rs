//! CSV output for listings and duplicate reports.
//!
//! Listing columns: `name,path,type,category,size,modified,duplicate`.
//! Duplicate columns: `group_id,hash,path,size,modified`.
//!
//! # Example
//!
//! ```no_run
//! use dirscope::app::AppState;
//! use dirscope::output::{CsvOutput, Listing};
//! use std::path::Path;
//!
//! let mut app = AppState::default();
//! app.open(Path::new(".")).unwrap();
//! let listing = Listing::from_app(&app).unwrap();
//! CsvOutput::write_listing(&listing, std::io::stdout()).unwrap();
//! ```

use std::io;

use serde::Serialize;
use thiserror::Error;

use super::{rfc3339, Listing};
use crate::duplicates::DuplicateReport;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// Field order of the row structs below. `serialize` only emits a header with
// the first row, so empty output writes these explicitly.
const LISTING_HEADER: [&str; 7] = [
    "name",
    "path",
    "type",
    "category",
    "size",
    "modified",
    "duplicate",
];
const DUPLICATE_HEADER: [&str; 5] = ["group_id", "hash", "path", "size", "modified"];

#[derive(Debug, Serialize)]
struct ListingRow<'a> {
    name: &'a str,
    path: String,
    #[serde(rename = "type")]
    kind: &'static str,
    category: &'static str,
    size: u64,
    modified: String,
    duplicate: bool,
}

#[derive(Debug, Serialize)]
struct DuplicateRow {
    group_id: usize,
    hash: String,
    path: String,
    size: u64,
    modified: String,
}

/// CSV output formatter.
pub struct CsvOutput;

impl CsvOutput {
    /// Write one row per listed entry.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_listing<W: io::Write>(
        listing: &Listing<'_>,
        writer: W,
    ) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        if listing.rows.is_empty() {
            csv_writer.write_record(LISTING_HEADER)?;
        }

        for row in &listing.rows {
            let e = row.entry;
            csv_writer.serialize(ListingRow {
                name: &e.name,
                path: e.path.to_string_lossy().into_owned(),
                kind: if e.is_dir { "folder" } else { "file" },
                category: e.category.map_or("", |c| c.as_str()),
                size: e.size,
                modified: rfc3339(e.modified),
                duplicate: row.duplicate,
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write one row per file in every duplicate group.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_duplicates<W: io::Write>(
        report: &DuplicateReport<'_>,
        writer: W,
    ) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        if report.groups.iter().all(|group| group.files.is_empty()) {
            csv_writer.write_record(DUPLICATE_HEADER)?;
        }

        for (idx, group) in report.groups.iter().enumerate() {
            let hash = group.hash_hex();
            for file in &group.files {
                csv_writer.serialize(DuplicateRow {
                    group_id: idx + 1,
                    hash: hash.clone(),
                    path: file.path.to_string_lossy().into_owned(),
                    size: file.size,
                    modified: rfc3339(file.modified),
                })?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Render a listing as a CSV string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn listing_to_string(listing: &Listing<'_>) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        Self::write_listing(listing, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
