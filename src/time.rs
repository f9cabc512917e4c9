//! Retention cutoff and timestamp formatting.

use chrono::{DateTime, Local};
use std::time::{Duration, SystemTime};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Timestamp format used at the start of every summary line
pub const SUMMARY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The point in time before which a file counts as expired.
///
/// Computed once per run from an explicit "now" so that every file in the
/// walk is compared against the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionCutoff {
    cutoff: SystemTime,
}

impl RetentionCutoff {
    /// Cutoff `retention_days` whole days before `now`.
    /// Saturates at the Unix epoch for absurdly large day counts.
    pub fn new(now: SystemTime, retention_days: u64) -> Self {
        let span = Duration::from_secs(retention_days.saturating_mul(SECONDS_PER_DAY));
        let cutoff = now.checked_sub(span).unwrap_or(SystemTime::UNIX_EPOCH);
        RetentionCutoff { cutoff }
    }

    /// Cutoff relative to a local wall-clock time
    pub fn from_local(now: DateTime<Local>, retention_days: u64) -> Self {
        Self::new(now.into(), retention_days)
    }

    /// True if a file modified at `modified_time` is older than the cutoff.
    /// A file modified exactly at the cutoff is kept.
    pub fn is_expired(&self, modified_time: SystemTime) -> bool {
        modified_time < self.cutoff
    }

    pub fn as_system_time(&self) -> SystemTime {
        self.cutoff
    }
}

/// Format a local time the way the summary line expects it
pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format(SUMMARY_TIMESTAMP_FORMAT).to_string()
}
