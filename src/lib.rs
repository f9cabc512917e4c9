//! cleanup-logs - Rotated Log Retention
//!
//! Deletes rotated log files (`app.log.1`, `server.log.20240101`, ...) that are
//! older than a retention period. The active log (`server.log`) is never
//! touched, protected names or directory fragments are skipped, and only the
//! log directory itself and its immediate subdirectories are scanned.
//!
//! A run is strictly sequential:
//! - [`params::resolve`] and [`params::verify_directory_exists`] check the
//!   arguments before anything is deleted
//! - [`scanner::sweep`] walks the tree and deletes expired files
//! - [`report::print_summary`] prints one timestamped summary line

pub mod params;
pub mod patterns;
pub mod report;
pub mod scanner;
pub mod time;

// Re-export commonly used items
pub use params::{resolve, verify_directory_exists, Invocation, ParamError};
pub use patterns::{is_log_eligible, is_protected};
pub use report::{format_summary, print_summary};
pub use scanner::{
    directories_in_scope, evaluate_file, sweep, Decision, ErrorPolicy, SweepFailure,
    SweepOptions, SweepReport,
};
pub use time::{format_timestamp, RetentionCutoff};
