//! File category classification.
//!
//! Categories are derived from the lowercase extension through a fixed
//! table. Anything not listed, including files without an extension,
//! falls into [`FileCategory::Other`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp", ".svg", ".ico"];

const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv", ".webm", ".m4v"];

const DOCUMENT_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".txt", ".rtf", ".odt", ".xls", ".xlsx", ".ppt", ".pptx",
];

const ARCHIVE_EXTENSIONS: &[&str] = &[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2", ".xz"];

/// Category of a non-directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Raster and vector images
    Images,
    /// Video containers
    Videos,
    /// Office documents and plain text
    Documents,
    /// Compressed archives
    Archives,
    /// Everything else
    Other,
}

impl FileCategory {
    /// All categories, in display order.
    pub const ALL: [FileCategory; 5] = [
        Self::Images,
        Self::Videos,
        Self::Documents,
        Self::Archives,
        Self::Other,
    ];

    /// Classify an extension. Accepts it with or without the leading dot,
    /// in any case.
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        let lower = extension.to_lowercase();
        let dotted = if lower.starts_with('.') {
            lower
        } else {
            format!(".{lower}")
        };

        [Self::Images, Self::Videos, Self::Documents, Self::Archives]
            .into_iter()
            .find(|c| c.extensions().contains(&dotted.as_str()))
            .unwrap_or(Self::Other)
    }

    /// Extensions (with leading dot) belonging to this category.
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Images => IMAGE_EXTENSIONS,
            Self::Videos => VIDEO_EXTENSIONS,
            Self::Documents => DOCUMENT_EXTENSIONS,
            Self::Archives => ARCHIVE_EXTENSIONS,
            Self::Other => &[],
        }
    }

    /// Lowercase name used on the command line and in output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Videos => "videos",
            Self::Documents => "documents",
            Self::Archives => "archives",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown file category: '{s}'"))
    }
}
