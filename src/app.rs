//! Application state owned by the presentation shell.
//!
//! The scanner, view pipeline and duplicate finder hold no state between
//! calls. Everything that changes as the user moves around lives here:
//! the current directory and its snapshot, navigation history, the active
//! filters and sort, and the duplicate markers from the last detection pass.
//!
//! # Example
//!
//! ```no_run
//! use dirscope::app::AppState;
//! use std::path::Path;
//!
//! let mut app = AppState::default();
//! app.open(Path::new("/home/user")).unwrap();
//! if let Some(view) = app.view() {
//!     println!("{} entries", view.len());
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::actions::{delete_item, DeleteError, DeleteMode, DeleteOutcome};
use crate::duplicates::{DuplicateFinder, FinderError};
use crate::scanner::{ScanError, Scanner, Snapshot};
use crate::view::{apply, SortKey, SortSpec, View, ViewFilter};

/// Errors from state transitions.
#[derive(Debug, Error)]
pub enum AppError {
    /// The target directory could not be scanned.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A delete action failed.
    #[error(transparent)]
    Delete(#[from] DeleteError),

    /// Duplicate detection could not run.
    #[error(transparent)]
    Duplicates(#[from] FinderError),

    /// An operation needs an open directory.
    #[error("No directory is open")]
    NoDirectory,
}

/// Explicit application state.
#[derive(Debug, Default)]
pub struct AppState {
    scanner: Scanner,
    finder: DuplicateFinder,
    current: Option<Snapshot>,
    history: Vec<PathBuf>,
    filter: ViewFilter,
    sort: SortSpec,
    duplicates: HashSet<PathBuf>,
}

impl AppState {
    /// Create state around a configured scanner and finder.
    #[must_use]
    pub fn new(scanner: Scanner, finder: DuplicateFinder) -> Self {
        Self {
            scanner,
            finder,
            current: None,
            history: Vec::new(),
            filter: ViewFilter::default(),
            sort: SortSpec::default(),
            duplicates: HashSet::new(),
        }
    }

    /// Use `sort` until the user changes it.
    #[must_use]
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Open a new root: clears history, filters and markers, then scans.
    ///
    /// # Errors
    ///
    /// Returns the scan error; the previous state is left untouched.
    pub fn open(&mut self, dir: &Path) -> Result<&Snapshot, AppError> {
        let snapshot = self.scanner.scan(dir)?;
        self.history.clear();
        self.reset_filters();
        Ok(self.install(snapshot))
    }

    /// Descend into `dir`, remembering the current directory for [`back`](Self::back).
    ///
    /// # Errors
    ///
    /// Returns the scan error; the previous state is left untouched.
    pub fn enter(&mut self, dir: &Path) -> Result<&Snapshot, AppError> {
        let snapshot = self.scanner.scan(dir)?;
        if let Some(previous) = self.current.as_ref().map(|s| s.root().to_path_buf()) {
            self.history.push(previous);
        }
        self.reset_filters();
        Ok(self.install(snapshot))
    }

    /// Return to the previous directory. `Ok(None)` when history is empty.
    ///
    /// # Errors
    ///
    /// Returns the scan error; the history entry is kept so the user can retry.
    pub fn back(&mut self) -> Result<Option<&Snapshot>, AppError> {
        let Some(previous) = self.history.last().cloned() else {
            return Ok(None);
        };
        let snapshot = self.scanner.scan(&previous)?;
        self.history.pop();
        self.reset_filters();
        Ok(Some(self.install(snapshot)))
    }

    /// Re-scan the current directory, keeping filters and sort.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NoDirectory`] if nothing is open.
    pub fn refresh(&mut self) -> Result<&Snapshot, AppError> {
        let root = self.current_dir().ok_or(AppError::NoDirectory)?.to_path_buf();
        let snapshot = self.scanner.scan(&root)?;
        Ok(self.install(snapshot))
    }

    /// Delete `path`, then re-scan the current directory.
    ///
    /// # Errors
    ///
    /// Returns the delete error, or the error of the follow-up scan.
    pub fn delete(&mut self, path: &Path, mode: DeleteMode) -> Result<DeleteOutcome, AppError> {
        let outcome = delete_item(path, mode)?;
        if self.current.is_some() {
            self.refresh()?;
        }
        Ok(outcome)
    }

    /// Delete `path`, then open `dir` as a new root with a single scan.
    ///
    /// # Errors
    ///
    /// Returns the delete error, in which case nothing is scanned, or the
    /// error of the scan.
    pub fn delete_and_open(
        &mut self,
        path: &Path,
        mode: DeleteMode,
        dir: &Path,
    ) -> Result<DeleteOutcome, AppError> {
        let outcome = delete_item(path, mode)?;
        self.open(dir)?;
        Ok(outcome)
    }

    /// Run duplicate detection over the current snapshot's files and replace
    /// the markers with the result. Returns the number of groups found.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NoDirectory`] if nothing is open, and
    /// [`FinderError::NothingToCheck`] if the snapshot has no files. The
    /// markers are cleared in both cases.
    pub fn find_duplicates(&mut self) -> Result<usize, AppError> {
        self.duplicates.clear();
        let snapshot = self.current.as_ref().ok_or(AppError::NoDirectory)?;
        let report = self.finder.find_in_snapshot(snapshot)?;
        let groups = report.groups.len();
        self.duplicates = report.marked_paths();
        Ok(groups)
    }

    /// Whether `path` is marked as a duplicate and present in the current snapshot.
    #[must_use]
    pub fn is_duplicate(&self, path: &Path) -> bool {
        self.duplicates.contains(path)
            && self.current.as_ref().is_some_and(|s| s.find(path).is_some())
    }

    /// Number of active duplicate markers.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.duplicates.len()
    }

    /// Filtered, sorted view of the current snapshot.
    #[must_use]
    pub fn view(&self) -> Option<View<'_>> {
        self.current
            .as_ref()
            .map(|snapshot| apply(snapshot, &self.filter, self.sort))
    }

    /// Replace the active filters.
    pub fn set_filter(&mut self, filter: ViewFilter) {
        self.filter = filter;
    }

    /// Active filters.
    #[must_use]
    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    /// Replace the sort order.
    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    /// Select a sort column (see [`SortSpec::toggle`]).
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = self.sort.toggle(key);
    }

    /// Active sort order.
    #[must_use]
    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Current snapshot, if a directory is open.
    #[must_use]
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    /// Current directory, if one is open.
    #[must_use]
    pub fn current_dir(&self) -> Option<&Path> {
        self.current.as_ref().map(Snapshot::root)
    }

    /// Whether [`back`](Self::back) has somewhere to go.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    fn reset_filters(&mut self) {
        self.filter = ViewFilter::default();
    }

    /// Swap in a fresh snapshot. Markers always belong to one snapshot.
    fn install(&mut self, snapshot: Snapshot) -> &Snapshot {
        self.duplicates.clear();
        self.current.insert(snapshot)
    }
}
