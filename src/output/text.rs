//! Human-readable text output.
//!
//! Sizes use binary units via `bytesize`. Each row carries a size bar
//! relative to the first displayed entry. Rows marked as duplicates are
//! highlighted with `yansi` when color is enabled, and always carry a
//! trailing `[duplicate]` tag so the marker survives without color.

use std::fmt::Write;

use bytesize::ByteSize;
use chrono::{DateTime, Local};
use yansi::Paint;

use super::{Listing, ListingRow};
use crate::duplicates::DuplicateReport;

/// Width of the size bar in characters.
const BAR_WIDTH: usize = 20;

/// Text formatter.
#[derive(Debug, Clone, Copy)]
pub struct TextOutput {
    color: bool,
}

impl TextOutput {
    /// Create a formatter; `color` enables ANSI highlighting.
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Render a directory listing.
    #[must_use]
    pub fn listing(&self, listing: &Listing<'_>) -> String {
        let mut out = String::new();
        let header = format!(
            "{}  (sorted by {} {})",
            listing.root.display(),
            listing.sort.key,
            listing.sort.direction
        );
        let _ = writeln!(out, "{}", self.bold(&header));

        if listing.rows.is_empty() {
            let _ = writeln!(out, "  No entries");
        } else {
            for row in &listing.rows {
                let _ = writeln!(out, "{}", self.row(row, listing.bar_basis));
            }
        }

        let stats = listing.stats;
        let _ = write!(
            out,
            "{}, {}, {} total",
            plural(stats.file_count, "file"),
            plural(stats.folder_count, "folder"),
            ByteSize::b(stats.total_size)
        );
        let duplicates = listing.duplicate_count();
        if duplicates > 0 {
            let _ = write!(out, ", {} marked as duplicate", duplicates);
        }
        out.push('\n');
        out
    }

    /// Render a duplicate report.
    #[must_use]
    pub fn duplicates(&self, report: &DuplicateReport<'_>) -> String {
        let mut out = String::new();

        if report.is_empty() {
            out.push_str("No duplicate files found\n");
        } else {
            for (idx, group) in report.groups.iter().enumerate() {
                let header = format!(
                    "Duplicate Group {} ({} files, {} each)",
                    idx + 1,
                    group.len(),
                    ByteSize::b(group.size())
                );
                let _ = writeln!(out, "{}", self.bold(&header));
                for file in &group.files {
                    let _ = writeln!(out, "  {}", self.highlight(&file.path.display().to_string()));
                }
                out.push('\n');
            }

            let _ = writeln!(
                out,
                "Found {}: {}, {} reclaimable",
                plural(report.groups.len(), "duplicate group"),
                plural(report.duplicate_files(), "duplicate file"),
                ByteSize::b(report.wasted_bytes())
            );
        }

        if report.stats.failed_files > 0 {
            let _ = writeln!(
                out,
                "{} could not be read",
                plural(report.stats.failed_files, "file")
            );
        }
        out
    }

    fn row(&self, row: &ListingRow<'_>, bar_basis: u64) -> String {
        let entry = row.entry;
        let modified: DateTime<Local> = entry.modified.into();
        let name = if entry.is_dir {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };
        let name = if row.duplicate {
            format!("{} [duplicate]", self.highlight(&name))
        } else {
            name
        };

        format!(
            "  {:>10}  {}  {}  {}",
            ByteSize::b(entry.size).to_string(),
            size_bar(entry.size, bar_basis),
            modified.format("%Y-%m-%d %H:%M"),
            name
        )
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn highlight(&self, text: &str) -> String {
        if self.color {
            text.yellow().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Fixed-width bar of `size` relative to `basis`, clamped to full width.
fn size_bar(size: u64, basis: u64) -> String {
    let basis = basis.max(1);
    let ratio = (size as f64 / basis as f64).clamp(0.0, 1.0);
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
