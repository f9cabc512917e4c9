//! One-line deletion summary.

use crate::time::format_timestamp;
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Build the summary line for a finished run
pub fn format_summary(now: &DateTime<Local>, deleted: &[PathBuf]) -> String {
    let timestamp = format_timestamp(now);

    if deleted.is_empty() {
        return format!("{} -> Keine Dateien wurden gelöscht.", timestamp);
    }

    let paths = deleted
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} -> {} Dateien wurden gelöscht: {}",
        timestamp,
        deleted.len(),
        paths
    )
}

/// Print the summary line to stdout, stamped with the current local time
pub fn print_summary(deleted: &[PathBuf]) {
    println!("{}", format_summary(&Local::now(), deleted));
}
