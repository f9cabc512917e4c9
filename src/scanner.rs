//! Depth-limited log directory walk and deletion of expired rotated logs.

use crate::patterns::{is_log_eligible, is_protected};
use crate::time::RetentionCutoff;

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// What to do when listing, inspecting or removing a single file fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop the run at the first failure; files already deleted stay deleted
    #[default]
    Abort,
    /// Report the failure on stderr, remember it and move on
    Continue,
}

/// Options controlling sweep behavior (runtime flags)
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepOptions {
    pub verbose: bool,
    pub error_policy: ErrorPolicy,
}

/// Outcome of evaluating one file against the retention rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Protected,
    NotRotated,
    TooRecent,
    Expired,
}

impl Decision {
    fn describe(self) -> &'static str {
        match self {
            Decision::Protected => "protected",
            Decision::NotRotated => "not a rotated log",
            Decision::TooRecent => "within retention period",
            Decision::Expired => "expired",
        }
    }
}

/// A failure recorded under [`ErrorPolicy::Continue`]
#[derive(Debug)]
pub struct SweepFailure {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

/// Result of a sweep
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Deleted files in traversal order
    pub deleted: Vec<PathBuf>,
    pub failures: Vec<SweepFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Directory,
    /// Symlink to a directory: never entered, never deleted
    LinkedDirectory,
}

fn classify(entry: &DirEntry) -> EntryKind {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_symlink() && entry.path().is_dir() {
        EntryKind::LinkedDirectory
    } else {
        EntryKind::File
    }
}

#[derive(Debug, Default)]
struct Listing {
    files: Vec<PathBuf>,
    subdirectories: Vec<PathBuf>,
    linked_directories: Vec<PathBuf>,
}

/// Decide what happens to one file.
///
/// Predicates run in order and short-circuit: protection, then the rotated
/// log name check, then the age check. The modification time is only read
/// (following symlinks) when the first two pass.
pub fn evaluate_file(
    path: &Path,
    containing_dir: &str,
    cutoff: RetentionCutoff,
    protected_items: &[String],
) -> Result<Decision> {
    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy())
        .unwrap_or_default();

    if is_protected(&file_name, containing_dir, protected_items) {
        return Ok(Decision::Protected);
    }
    if !is_log_eligible(&file_name) {
        return Ok(Decision::NotRotated);
    }

    let modified = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .with_context(|| format!("Failed to read modification time of {}", path.display()))?;

    if cutoff.is_expired(modified) {
        Ok(Decision::Expired)
    } else {
        Ok(Decision::TooRecent)
    }
}

/// Applies the error policy; keeps the failures it lets through
struct FailureLog {
    policy: ErrorPolicy,
    failures: Vec<SweepFailure>,
}

impl FailureLog {
    fn new(policy: ErrorPolicy) -> Self {
        FailureLog {
            policy,
            failures: Vec::new(),
        }
    }

    fn record(&mut self, path: &Path, error: anyhow::Error) -> Result<()> {
        match self.policy {
            ErrorPolicy::Abort => Err(error),
            ErrorPolicy::Continue => {
                eprintln!("{} {:#}. Skipping.", "Error:".red(), error);
                self.failures.push(SweepFailure {
                    path: path.to_path_buf(),
                    error,
                });
                Ok(())
            }
        }
    }
}

/// List the direct entries of `dir` without descending any further
fn list_directory(dir: &Path, failures: &mut FailureLog) -> Result<Listing> {
    let mut listing = Listing::default();

    for result in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(dir).to_path_buf();
                let error =
                    anyhow::Error::new(err).context(format!("Failed to list {}", dir.display()));
                failures.record(&path, error)?;
                continue;
            }
        };

        match classify(&entry) {
            EntryKind::File => listing.files.push(entry.into_path()),
            EntryKind::Directory => listing.subdirectories.push(entry.into_path()),
            EntryKind::LinkedDirectory => listing.linked_directories.push(entry.into_path()),
        }
    }

    Ok(listing)
}

/// First phase of the walk: the root followed by its immediate subdirectories
fn scan_scope(root: &Path, verbose: bool, failures: &mut FailureLog) -> Result<Vec<PathBuf>> {
    let listing = list_directory(root, failures)?;

    if verbose {
        for linked in &listing.linked_directories {
            eprintln!("Skipping linked directory: {}", linked.display());
        }
    }

    let mut dirs = Vec::with_capacity(listing.subdirectories.len() + 1);
    dirs.push(root.to_path_buf());
    dirs.extend(listing.subdirectories);
    Ok(dirs)
}

struct Sweeper<'a> {
    cutoff: RetentionCutoff,
    protected_items: &'a [String],
    verbose: bool,
    deleted: Vec<PathBuf>,
    failures: FailureLog,
}

impl Sweeper<'_> {
    fn process_files(&mut self, dir: &Path, files: &[PathBuf]) -> Result<()> {
        let containing_dir = dir.to_string_lossy();

        for path in files {
            let decision =
                match evaluate_file(path, &containing_dir, self.cutoff, self.protected_items) {
                    Ok(decision) => decision,
                    Err(err) => {
                        self.failures.record(path, err)?;
                        continue;
                    }
                };

            if decision != Decision::Expired {
                if self.verbose {
                    eprintln!("Keeping {} ({})", path.display(), decision.describe());
                }
                continue;
            }

            match fs::remove_file(path)
                .with_context(|| format!("Failed to remove {}", path.display()))
            {
                Ok(()) => {
                    if self.verbose {
                        eprintln!("{} {}", "Removed:".green(), path.display());
                    }
                    self.deleted.push(path.clone());
                }
                Err(err) => self.failures.record(path, err)?,
            }
        }

        Ok(())
    }
}

/// The directories whose files are considered: the root followed by its
/// immediate subdirectories, in listing order. Nothing deeper is ever listed.
pub fn directories_in_scope(root: &Path) -> Result<Vec<PathBuf>> {
    scan_scope(root, false, &mut FailureLog::new(ErrorPolicy::Abort))
}

/// Delete expired rotated logs in `root` and its immediate subdirectories.
///
/// The walk has two phases: the root is listed to find its child
/// directories, then the root and each child directory are listed for files
/// only. Grandchildren are never opened. Deleted paths are reported root
/// first, then per child directory, each in native listing order.
pub fn sweep(
    root: &Path,
    cutoff: RetentionCutoff,
    protected_items: &[String],
    options: SweepOptions,
) -> Result<SweepReport> {
    let mut failures = FailureLog::new(options.error_policy);
    let dirs = scan_scope(root, options.verbose, &mut failures)?;

    let mut sweeper = Sweeper {
        cutoff,
        protected_items,
        verbose: options.verbose,
        deleted: Vec::new(),
        failures,
    };

    for dir in &dirs {
        let listing = list_directory(dir, &mut sweeper.failures)?;
        sweeper.process_files(dir, &listing.files)?;
    }

    Ok(SweepReport {
        deleted: sweeper.deleted,
        failures: sweeper.failures.failures,
    })
}
