//! Command-line parameters and directory validation.

use clap::builder::ValueParser;
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_PROGRAM_NAME: &str = "cleanup-logs";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Delete rotated log files older than a retention period",
    long_about = None
)]
pub struct Args {
    /// Log directory to clean up (its immediate subdirectories are included)
    #[arg(value_parser = ValueParser::os_string())]
    pub log_directory: OsString,

    /// Rotated logs modified more than this many days ago are deleted
    pub retention_days: u64,

    /// File names, or fragments of directory paths, that are never deleted
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub protected_items: Vec<String>,

    /// Print the decision taken for every visited file to stderr
    #[arg(long, short)]
    pub verbose: bool,

    /// Report filesystem errors per file and continue instead of aborting
    #[arg(long)]
    pub keep_going: bool,
}

/// Resolved invocation parameters, immutable for the rest of the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub directory: PathBuf,
    pub retention_days: u64,
    pub protected_items: Vec<String>,
    pub verbose: bool,
    pub keep_going: bool,
}

impl From<Args> for Invocation {
    fn from(args: Args) -> Self {
        Invocation {
            directory: PathBuf::from(args.log_directory),
            retention_days: args.retention_days,
            protected_items: args.protected_items,
            verbose: args.verbose,
            keep_going: args.keep_going,
        }
    }
}

#[derive(Debug, Error)]
pub enum ParamError {
    /// Directory or retention days missing
    #[error("{}", usage_text(.program))]
    Usage { program: String },

    /// Malformed arguments, `--help` and `--version`; clap renders these itself
    #[error(transparent)]
    Clap(#[from] clap::Error),

    #[error("Das angegebene Verzeichnis existiert nicht: {}", .0.display())]
    InvalidDirectory(PathBuf),
}

impl ParamError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ParamError::Usage { .. } | ParamError::InvalidDirectory(_) => 1,
            ParamError::Clap(err) => err.exit_code(),
        }
    }
}

/// Usage text printed when required arguments are missing
pub fn usage_text(program: &str) -> String {
    format!(
        "Bitte gib den Pfad zu deinem Log-Verzeichnis und die Anzahl der Tage als Parameter an.\n\
         Verwendung: {program} /pfad/zu/deinem/log ANZAHL_TAGE [GESCHÜTZTE_LISTE]\n\
         Beispiel: {program} /opt/wildfly-31.0.1.Final-0/standalone/log/ 14 \"test_log_3.log.20222\" \"YatuWebClient/\""
    )
}

/// Resolve process arguments (including the program name) into an [`Invocation`].
pub fn resolve<I, T>(args: I) -> Result<Invocation, ParamError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = args
        .first()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string());

    match Args::try_parse_from(&args) {
        Ok(parsed) => Ok(parsed.into()),
        Err(err) if err.kind() == ErrorKind::MissingRequiredArgument => {
            Err(ParamError::Usage { program })
        }
        Err(err) => Err(ParamError::Clap(err)),
    }
}

/// Check that the log directory exists and is a directory
pub fn verify_directory_exists(directory: &Path) -> Result<(), ParamError> {
    if directory.is_dir() {
        Ok(())
    } else {
        Err(ParamError::InvalidDirectory(directory.to_path_buf()))
    }
}
