//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Content hashing of every candidate file (no size pre-filter)
//! - Grouping by identical hash in discovery order
//! - Duplicate group and report management

pub mod finder;
pub mod groups;

pub use finder::{find_duplicates, DuplicateFinder, FinderConfig, FinderError};
pub use groups::{DuplicateGroup, DuplicateReport, FinderStats};
