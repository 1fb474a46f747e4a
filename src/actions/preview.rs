//! File preview functionality.
//!
//! Two kinds of files can be previewed:
//! - Text files with a known extension, read whole up to a size limit
//! - Image files, returned as raw bytes (or base64 for display)
//!
//! Directories and every other file type are not previewable.
//!
//! # Example
//!
//! ```no_run
//! use dirscope::actions::preview::{preview, Preview};
//! use dirscope::scanner::scan;
//! use std::path::Path;
//!
//! let snapshot = scan(Path::new(".")).unwrap();
//! if let Some(entry) = snapshot.files().next() {
//!     match preview(entry, 1024 * 1024) {
//!         Ok(Preview::Text(text)) => println!("{}", text),
//!         Ok(Preview::Image { mime, data }) => println!("{}: {} base64 chars", mime, data.len()),
//!         Err(e) => eprintln!("Preview failed: {}", e),
//!     }
//! };
//! ```

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::scanner::{Entry, FileCategory};

/// Default size limit for text previews (1 MiB).
pub const DEFAULT_PREVIEW_LIMIT: u64 = 1024 * 1024;

/// Extensions previewed as text.
const TEXT_EXTENSIONS: &[&str] = &[".txt", ".md", ".json", ".js", ".css", ".html", ".xml"];

/// Error type for preview operations.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// File was not found.
    #[error("file not found: {0}")]
    NotFound(String),

    /// Permission was denied when reading the file.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The file exceeds the preview size limit.
    #[error("file too large to preview: {size} bytes (limit {limit})")]
    TooLarge {
        /// File size in bytes
        size: u64,
        /// Limit in bytes
        limit: u64,
    },

    /// The entry is a directory or an unsupported file type.
    #[error("preview not available for this file type: {0}")]
    NotPreviewable(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Previewable content of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Text content.
    Text(String),
    /// Base64-encoded image with its MIME type.
    Image {
        /// MIME type derived from the extension, e.g. `image/png`
        mime: String,
        /// Base64 (standard alphabet, padded) image bytes
        data: String,
    },
}

/// Whether files with `extension` (lowercase, leading dot) are previewed as text.
#[must_use]
pub fn is_text_previewable(extension: &str) -> bool {
    TEXT_EXTENSIONS.contains(&extension)
}

/// Whether `entry` can be previewed at all.
#[must_use]
pub fn can_preview(entry: &Entry) -> bool {
    !entry.is_dir
        && (entry.is_category(FileCategory::Images) || is_text_previewable(&entry.extension))
}

/// Read a text file, refusing files larger than `limit` bytes.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
///
/// # Errors
///
/// Returns `TooLarge` above the limit, or an access error.
pub fn read_file_content(path: &Path, limit: u64) -> Result<String, PreviewError> {
    let size = file_size(path)?;
    if size > limit {
        return Err(PreviewError::TooLarge { size, limit });
    }

    let mut buffer = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
    open_file(path)?.take(limit).read_to_end(&mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Read the raw bytes of an image file.
///
/// # Errors
///
/// Returns an access error if the file cannot be read.
pub fn read_image_bytes(path: &Path) -> Result<Vec<u8>, PreviewError> {
    let mut buffer = Vec::new();
    open_file(path)?.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Encode image bytes as standard base64.
#[must_use]
pub fn encode_image(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// MIME type for an image extension (`.jpg` maps to `image/jpeg`).
#[must_use]
pub fn image_mime(extension: &str) -> String {
    match extension.trim_start_matches('.') {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "svg" => "image/svg+xml".to_string(),
        other => format!("image/{other}"),
    }
}

/// Preview `entry`: text within `limit` bytes, or a base64 image.
///
/// # Errors
///
/// Returns `NotPreviewable` for directories and unsupported types.
pub fn preview(entry: &Entry, limit: u64) -> Result<Preview, PreviewError> {
    if !can_preview(entry) {
        return Err(PreviewError::NotPreviewable(entry.path.display().to_string()));
    }

    if entry.is_category(FileCategory::Images) {
        let bytes = read_image_bytes(&entry.path)?;
        log::debug!("Image preview: {} ({} bytes)", entry.path.display(), bytes.len());
        return Ok(Preview::Image {
            mime: image_mime(&entry.extension),
            data: encode_image(&bytes),
        });
    }

    read_file_content(&entry.path, limit).map(Preview::Text)
}

fn file_size(path: &Path) -> Result<u64, PreviewError> {
    let metadata = fs::metadata(path).map_err(|e| map_open_error(path, e))?;
    if metadata.is_dir() {
        return Err(PreviewError::NotPreviewable(path.display().to_string()));
    }
    Ok(metadata.len())
}

/// Open a file with appropriate error handling.
fn open_file(path: &Path) -> Result<File, PreviewError> {
    File::open(path).map_err(|e| map_open_error(path, e))
}

fn map_open_error(path: &Path, error: io::Error) -> PreviewError {
    match error.kind() {
        io::ErrorKind::NotFound => PreviewError::NotFound(path.display().to_string()),
        io::ErrorKind::PermissionDenied => {
            PreviewError::PermissionDenied(path.display().to_string())
        }
        _ => PreviewError::Io(error),
    }
}
