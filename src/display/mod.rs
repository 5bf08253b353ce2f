//! Display formatting for terminal output
//!
//! Turns outcomes, backup listings and config traces into the lines printed
//! by the CLI.

use std::path::Path;

use chrono::{DateTime, Local};

use crate::backup::{Backup, BackupOutcome};
use crate::config::ConfigValue;

/// Format used for backup creation times in listings
pub const LIST_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The single line reported for a backup attempt
pub fn format_outcome(outcome: &BackupOutcome) -> String {
    outcome.to_string()
}

/// One line per backup, newest first
pub fn format_backup_list(source: &Path, backups: &[Backup]) -> String {
    if backups.is_empty() {
        return format!("No backups found for {}", source.display());
    }

    backups
        .iter()
        .map(|backup| {
            let created: DateTime<Local> = backup.creation_time.into();
            format!(
                "{} (created: {})",
                backup.path.display(),
                created.format(LIST_TIME_FORMAT)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One `name: value (source: origin)` line per config value
pub fn format_config_values(values: &[ConfigValue]) -> String {
    values
        .iter()
        .map(|v| format!("{}: {} (source: {})", v.name, v.value, v.source))
        .collect::<Vec<_>>()
        .join("\n")
}
