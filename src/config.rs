//! Application configuration management.
//!
//! Preferences are stored as JSON in the platform configuration directory.
//! Any failure to read or parse the file falls back to defaults. Values
//! given on the command line override the file.

use anyhow::Result;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::actions::DEFAULT_PREVIEW_LIMIT;
use crate::view::{SizeUnit, SortDirection, SortKey, SortSpec};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial sort column.
    pub sort_key: SortKey,
    /// Initial sort direction.
    pub sort_direction: SortDirection,
    /// Unit for `--min-size` when `--unit` is not given.
    pub size_unit: SizeUnit,
    /// Resolve symbolic links when sizing entries.
    pub follow_symlinks: bool,
    /// Threads used for duplicate hashing.
    pub io_threads: usize,
    /// Largest text file shown by `preview`, in bytes.
    pub preview_limit_bytes: u64,
    /// Plain line-based progress instead of spinners and bars.
    pub accessible: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sort_key: SortKey::Size,
            sort_direction: SortDirection::Desc,
            size_unit: SizeUnit::MB,
            follow_symlinks: true,
            io_threads: 4,
            preview_limit_bytes: DEFAULT_PREVIEW_LIMIT,
            accessible: false,
        }
    }
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    pub fn load() -> Self {
        match Self::config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load the configuration from `path`. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Initial sort order.
    #[must_use]
    pub fn sort(&self) -> SortSpec {
        SortSpec::new(self.sort_key, self.sort_direction)
    }

    /// Get the default platform-specific configuration path.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "dirscope", "dirscope")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.json"))
    }
}
