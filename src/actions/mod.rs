//! File actions module.
//!
//! This module provides functionality for:
//! - Permanent recursive deletion, or moving to the system trash
//! - File preview (text within a size limit, images as base64)
//!
//! # Deletion
//!
//! ```no_run
//! use dirscope::actions::{delete_item, DeleteMode};
//! use std::path::Path;
//!
//! let outcome = delete_item(Path::new("/path/to/old.log"), DeleteMode::Trash);
//! ```
//!
//! # Preview
//!
//! ```no_run
//! use dirscope::actions::read_file_content;
//! use std::path::Path;
//!
//! let content = read_file_content(Path::new("notes.txt"), 1024 * 1024);
//! ```

pub mod delete;
pub mod preview;

pub use delete::{delete_item, DeleteError, DeleteMode, DeleteOutcome};
pub use preview::{
    can_preview, encode_image, image_mime, is_text_previewable, preview, read_file_content,
    read_image_bytes, Preview, PreviewError, DEFAULT_PREVIEW_LIMIT,
};
