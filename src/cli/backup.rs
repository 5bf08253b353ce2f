//! Backup CLI commands
//!
//! Creating and listing backups of one file. Each handler returns the process
//! exit status rather than exiting itself.

use std::path::Path;

use chrono::Local;
use log::error;

use crate::backup::BackupManager;
use crate::display::{format_backup_list, format_outcome};

/// Create a backup of `file` and print the outcome
///
/// Successful outcomes go to stdout, failures to stderr.
pub fn handle_create(manager: &BackupManager, file: &Path, note: &str, dry_run: bool) -> i32 {
    let outcome = manager.create_backup(file, note, dry_run, Local::now);
    let line = format_outcome(&outcome);

    if outcome.is_success() {
        println!("{}", line);
    } else {
        eprintln!("{}", line);
    }

    outcome.status_code(manager.config())
}

/// Print the existing backups of `file`, newest first
pub fn handle_list(manager: &BackupManager, file: &Path) -> i32 {
    match manager.list_backups(file) {
        Ok(backups) => {
            println!("{}", format_backup_list(file, &backups));
            0
        }
        Err(e) => {
            error!("Listing backups of {} failed: {}", file.display(), e);
            eprintln!("failed to list backups: {}", e);
            manager.config().status_config_error
        }
    }
}
