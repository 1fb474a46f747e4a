//! Command-line interface definitions for dirscope.
//!
//! All arguments, subcommands, and options are defined with the clap derive
//! API. Global options (verbosity, color, error format) apply to every
//! subcommand.
//!
//! # Example
//!
//! ```bash
//! # List a directory, largest first
//! dirscope scan ~/Downloads
//!
//! # Only images of at least 2 MB, newest first
//! dirscope scan ~/Downloads --type images --min-size 2 --sort date
//!
//! # Highlight duplicate files in the listing
//! dirscope scan ~/Downloads --duplicates
//!
//! # Print duplicate groups as JSON
//! dirscope dupes ~/Downloads --output json
//!
//! # Move a folder to the trash, then show the refreshed parent
//! dirscope delete ~/Downloads/old-build --trash
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::scanner::FileCategory;
use crate::view::{CategoryFilter, SizeUnit, SortDirection, SortKey};

/// Directory size explorer with filtering, sorting and duplicate detection.
///
/// dirscope lists the immediate children of a directory with recursive
/// folder sizes, filters and sorts the listing, and finds duplicate files
/// by content hash (BLAKE3).
#[derive(Debug, Parser)]
#[command(name = "dirscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print errors as JSON objects on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Plain line-based progress output for screen readers
    #[arg(long, global = true)]
    pub accessible: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List a directory with sizes, filters and sorting
    Scan(ScanArgs),
    /// Find duplicate files among a directory's immediate files
    Dupes(DupesArgs),
    /// Delete a file or folder, then list its parent again
    Delete(DeleteArgs),
    /// Show the contents of a text or image file
    Preview(PreviewArgs),
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory to list
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Show only entries whose name, extension or path matches
    ///
    /// Interpreted as a case-insensitive regular expression; falls back to
    /// a plain substring match if the pattern is invalid.
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Show only one kind of entry
    #[arg(short = 't', long = "type", value_enum, default_value = "all")]
    pub kind: KindArg,

    /// Hide entries smaller than this (in --unit)
    ///
    /// Non-numeric or non-positive values disable the filter.
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub min_size: Option<String>,

    /// Unit for --min-size [default: from config, MB]
    #[arg(long, value_enum, ignore_case = true)]
    pub unit: Option<UnitArg>,

    /// Sort column [default: from config, size]
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Sort direction [default: from config, desc]
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    /// Run duplicate detection and mark duplicate files
    #[arg(short, long)]
    pub duplicates: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Size symbolic links themselves instead of their targets
    #[arg(long)]
    pub no_follow_symlinks: bool,
}

/// Arguments for the dupes subcommand.
#[derive(Debug, Args)]
pub struct DupesArgs {
    /// Directory whose files are checked
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Number of I/O threads for hashing [default: from config, 4]
    ///
    /// Lower values reduce disk thrashing on HDDs.
    #[arg(long, value_name = "N")]
    pub io_threads: Option<usize>,

    /// Size symbolic links themselves instead of their targets
    #[arg(long)]
    pub no_follow_symlinks: bool,
}

/// Arguments for the delete subcommand.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// File or folder to delete
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Move to the system trash instead of deleting permanently
    #[arg(long)]
    pub trash: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output format for the refreshed listing
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the preview subcommand.
#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// File to preview
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Largest text file to show, in bytes [default: from config, 1 MiB]
    #[arg(long, value_name = "BYTES")]
    pub limit: Option<u64>,
}

/// Output format for listings and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Entry kind selection for `--type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Everything
    All,
    /// Directories only
    Folders,
    /// Image files
    Images,
    /// Video files
    Videos,
    /// Documents and plain text
    Documents,
    /// Compressed archives
    Archives,
    /// Files in no other category
    Other,
}

impl From<KindArg> for CategoryFilter {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::All => Self::All,
            KindArg::Folders => Self::Folders,
            KindArg::Images => Self::Only(FileCategory::Images),
            KindArg::Videos => Self::Only(FileCategory::Videos),
            KindArg::Documents => Self::Only(FileCategory::Documents),
            KindArg::Archives => Self::Only(FileCategory::Archives),
            KindArg::Other => Self::Only(FileCategory::Other),
        }
    }
}

/// Unit for `--min-size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum UnitArg {
    /// Bytes
    B,
    /// Kibibytes
    KB,
    /// Mebibytes
    MB,
    /// Gibibytes
    GB,
}

impl From<UnitArg> for SizeUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::B => Self::B,
            UnitArg::KB => Self::KB,
            UnitArg::MB => Self::MB,
            UnitArg::GB => Self::GB,
        }
    }
}

/// Sort column for `--sort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Name, case-insensitive
    Name,
    /// Size in bytes
    Size,
    /// Last modified time
    Date,
}

impl From<SortArg> for SortKey {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Name => Self::Name,
            SortArg::Size => Self::Size,
            SortArg::Date => Self::Date,
        }
    }
}

/// Sort direction for `--order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl From<OrderArg> for SortDirection {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => Self::Asc,
            OrderArg::Desc => Self::Desc,
        }
    }
}
