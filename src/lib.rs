//! dirscope - Directory Size Explorer
//!
//! Lists the immediate children of a directory with recursive folder sizes,
//! filters and sorts the listing, and finds duplicate files by content hash
//! (BLAKE3).
//!
//! The library is split into stateless components plus one explicit state
//! holder:
//! - [`scanner`]: one-level listing with recursive aggregation
//! - [`view`]: pure filter and sort pipeline with statistics
//! - [`duplicates`]: content-hash grouping
//! - [`actions`]: delete and preview
//! - [`app`]: current directory, history, filters and duplicate markers

pub mod actions;
pub mod app;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod view;

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::actions::{preview, DeleteMode, Preview};
use crate::app::{AppError, AppState};
use crate::cli::{Cli, Commands, DeleteArgs, DupesArgs, OutputFormat, PreviewArgs, ScanArgs};
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, DuplicateReport, FinderConfig, FinderError};
use crate::error::ExitCode;
use crate::output::{CsvOutput, JsonDuplicates, JsonListing, Listing, TextOutput};
use crate::progress::Progress;
use crate::scanner::{Entry, Scanner, ScannerConfig};
use crate::view::{MinSize, SizeUnit, SortSpec, ViewFilter};

/// Settings shared by every subcommand.
struct Session {
    config: Config,
    quiet: bool,
    accessible: bool,
    color: bool,
}

impl Session {
    fn scanner(&self, no_follow_symlinks: bool, progress: &Arc<Progress>) -> Scanner {
        let follow = self.config.follow_symlinks && !no_follow_symlinks;
        Scanner::new(ScannerConfig::default().with_follow_symlinks(follow))
            .with_progress_callback(progress.clone())
    }

    fn finder(&self, io_threads: Option<usize>, progress: &Arc<Progress>) -> DuplicateFinder {
        DuplicateFinder::new(
            FinderConfig::default()
                .with_io_threads(io_threads.unwrap_or(self.config.io_threads))
                .with_progress_callback(progress.clone()),
        )
    }

    /// Busy indicators only accompany text output.
    fn progress(&self, output: OutputFormat) -> Arc<Progress> {
        Arc::new(Progress::with_accessible(
            self.quiet || output != OutputFormat::Text,
            self.accessible,
        ))
    }
}

/// Run the application with parsed arguments.
///
/// # Errors
///
/// Returns an error if the target cannot be scanned, deleted or previewed,
/// or if output cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let color = !cli.no_color && io::stdout().is_terminal();
    if !color {
        yansi::disable();
    }

    let config = Config::load();
    let session = Session {
        accessible: cli.accessible || config.accessible,
        config,
        quiet: cli.quiet,
        color,
    };
    log::debug!("Using configuration: {:?}", session.config);

    match cli.command {
        Commands::Scan(args) => run_scan(&session, args),
        Commands::Dupes(args) => run_dupes(&session, args),
        Commands::Delete(args) => run_delete(&session, args),
        Commands::Preview(args) => run_preview(&session, args),
    }
}

fn run_scan(session: &Session, args: ScanArgs) -> Result<ExitCode> {
    let config = &session.config;
    let progress = session.progress(args.output);
    let sort = SortSpec::new(
        args.sort.map_or(config.sort_key, Into::into),
        args.order.map_or(config.sort_direction, Into::into),
    );

    let mut app = AppState::new(
        session.scanner(args.no_follow_symlinks, &progress),
        session.finder(None, &progress),
    )
    .with_sort(sort);

    app.open(&args.path)
        .with_context(|| format!("Failed to scan {}", args.path.display()))?;

    let unit: SizeUnit = args.unit.map_or(config.size_unit, Into::into);
    let min_size = args.min_size.as_deref().and_then(|text| {
        let parsed = MinSize::parse(text, unit);
        if parsed.is_none() {
            log::debug!("Ignoring minimum size '{}'", text);
        }
        parsed
    });
    let mut filter = ViewFilter::default()
        .with_category(args.kind.into())
        .with_min_size(min_size);
    if let Some(query) = args.search.as_deref() {
        filter = filter.with_text(query);
    }
    app.set_filter(filter);

    if args.duplicates {
        match app.find_duplicates() {
            Ok(groups) => log::info!("Found {} duplicate groups", groups),
            Err(AppError::Duplicates(FinderError::NothingToCheck)) => {
                log::info!("No files to check for duplicates");
            }
            Err(e) => return Err(e).context("Failed to find duplicates"),
        }
    }

    print_listing(&app, args.output, session.color)?;
    Ok(ExitCode::Success)
}

fn run_dupes(session: &Session, args: DupesArgs) -> Result<ExitCode> {
    let progress = session.progress(args.output);
    let snapshot = session
        .scanner(args.no_follow_symlinks, &progress)
        .scan(&args.path)
        .with_context(|| format!("Failed to scan {}", args.path.display()))?;

    let finder = session.finder(args.io_threads, &progress);
    let (report, exit_code) = match finder.find_in_snapshot(&snapshot) {
        Ok(report) if report.is_empty() => (report, ExitCode::NoDuplicates),
        Ok(report) => (report, ExitCode::Success),
        Err(FinderError::NothingToCheck) => {
            if args.output == OutputFormat::Text {
                println!("No files to check for duplicates");
                return Ok(ExitCode::NothingToCheck);
            }
            let empty = DuplicateReport {
                groups: Vec::new(),
                stats: Default::default(),
            };
            (empty, ExitCode::NothingToCheck)
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.output {
        OutputFormat::Text => {
            write!(out, "{}", TextOutput::new(session.color).duplicates(&report))?;
        }
        OutputFormat::Json => {
            JsonDuplicates::new(&report, exit_code).write_to(&mut out)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => CsvOutput::write_duplicates(&report, &mut out)?,
    }
    out.flush()?;

    Ok(exit_code)
}

fn run_delete(session: &Session, args: DeleteArgs) -> Result<ExitCode> {
    let target = std::path::absolute(&args.path)
        .with_context(|| format!("Invalid path {}", args.path.display()))?;
    let parent = target
        .parent()
        .context("Refusing to delete a filesystem root")?
        .to_path_buf();

    let mode = if args.trash {
        DeleteMode::Trash
    } else {
        DeleteMode::Permanent
    };

    if !args.yes && !confirm_delete(&target, mode)? {
        log::info!("Delete cancelled");
        return Ok(ExitCode::Success);
    }

    let progress = session.progress(args.output);
    let mut app = AppState::new(
        session.scanner(false, &progress),
        session.finder(None, &progress),
    )
    .with_sort(session.config.sort());
    let outcome = app.delete_and_open(&target, mode, &parent).map_err(|e| {
        let action = match &e {
            AppError::Scan(_) => format!("Failed to scan {}", parent.display()),
            _ => format!("Failed to delete {}", target.display()),
        };
        anyhow::Error::new(e).context(action)
    })?;

    if !outcome.existed {
        log::warn!("Nothing to delete at {}", target.display());
    } else if args.output == OutputFormat::Text && !session.quiet {
        let verb = if mode.is_permanent() {
            "Deleted"
        } else {
            "Moved to trash"
        };
        println!(
            "{} {} ({})\n",
            verb,
            target.display(),
            bytesize::ByteSize::b(outcome.size)
        );
    }

    print_listing(&app, args.output, session.color)?;
    Ok(ExitCode::Success)
}

fn run_preview(session: &Session, args: PreviewArgs) -> Result<ExitCode> {
    let path = std::path::absolute(&args.path)
        .with_context(|| format!("Invalid path {}", args.path.display()))?;
    let metadata = std::fs::metadata(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let entry = Entry::from_metadata(path, metadata.len(), &metadata);
    let limit = args.limit.unwrap_or(session.config.preview_limit_bytes);

    let content = preview(&entry, limit)
        .with_context(|| format!("Failed to preview {}", entry.path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match content {
        Preview::Text(text) => write!(out, "{text}")?,
        Preview::Image { mime, data } => writeln!(out, "data:{mime};base64,{data}")?,
    }
    out.flush()?;
    Ok(ExitCode::Success)
}

fn print_listing(app: &AppState, format: OutputFormat, color: bool) -> Result<()> {
    let listing = Listing::from_app(app).context("No directory is open")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => write!(out, "{}", TextOutput::new(color).listing(&listing))?,
        OutputFormat::Json => {
            JsonListing::new(&listing).write_to(&mut out)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => CsvOutput::write_listing(&listing, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

/// Ask on stderr whether to delete `path`. Non-interactive stdin never confirms.
fn confirm_delete(path: &Path, mode: DeleteMode) -> Result<bool> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        anyhow::bail!(
            "Refusing to delete {} without confirmation; pass --yes",
            path.display()
        );
    }

    let how = if mode.is_permanent() {
        "permanently delete"
    } else {
        "move to trash"
    };
    eprint!("Really {} {}? [y/N] ", how, path.display());
    io::stderr().flush()?;

    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
