//! Backup file naming
//!
//! Backups are named `BASENAME-YYYY-MM-DD-hh-mm[=NOTE]`. Listing relies on
//! this exact shape, so changing it orphans existing backup sets.

use std::path::Path;

use chrono::{DateTime, TimeZone};

/// strftime pattern for the timestamp embedded in backup names (minute resolution)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M";

/// Format a point in time the way it appears in a backup name
pub fn format_timestamp<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Build a backup name from the source file's base name, a timestamp and an optional note
pub fn generate_backup_name(source_path: &Path, timestamp: &str, note: &str) -> String {
    let base = source_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if note.is_empty() {
        format!("{}-{}", base, timestamp)
    } else {
        format!("{}-{}={}", base, timestamp, note)
    }
}

/// Whether a directory entry name belongs to backups of `base_name`
pub fn matches_source(entry_name: &str, base_name: &str) -> bool {
    entry_name
        .strip_prefix(base_name)
        .is_some_and(|rest| rest.starts_with('-'))
}

/// The note embedded in a backup name: everything after the last `=`
///
/// A name that starts with `=` has no note.
pub fn extract_note(name: &str) -> Option<&str> {
    match name.rfind('=') {
        Some(idx) if idx > 0 => Some(&name[idx + 1..]),
        _ => None,
    }
}
