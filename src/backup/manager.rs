//! Backup creation for a single file
//!
//! `BackupManager::create_backup` walks a fixed sequence: stat the target,
//! check its type, list existing backups, compare with the most recent one,
//! name the new backup, then create the directory and copy. Each step maps its
//! failures onto one `BackupOutcome`. Nothing is retried.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::{debug, info};

use super::lister::{list_backups, Backup};
use super::naming::{format_timestamp, generate_backup_name};
use super::outcome::BackupOutcome;
use crate::config::Config;
use crate::error::{BkpfileError, BkpfileResult};
use crate::storage::file_io::{compare_files, copy_file, is_disk_space_error};
use crate::storage::paths::{mirror_dir, relative_to_cwd, split_source};

/// Creates and lists backups according to a resolved `Config`
#[derive(Debug, Clone)]
pub struct BackupManager {
    config: Config,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration this manager works with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Root directory of the mirrored backup tree
    pub fn backup_root(&self) -> PathBuf {
        PathBuf::from(&self.config.backup_dir_path)
    }

    /// List the backups of `file_path`, most recent first
    pub fn list_backups(&self, file_path: &Path) -> BkpfileResult<Vec<Backup>> {
        list_backups(&self.backup_root(), file_path)
    }

    /// Back up `file_path` unless it matches its most recent backup
    ///
    /// `now` supplies the timestamp for the backup name. The note never takes
    /// part in the identical check. With `dry_run` set, the path a real run
    /// would create is reported and nothing is written.
    pub fn create_backup<F>(
        &self,
        file_path: &Path,
        note: &str,
        dry_run: bool,
        now: F,
    ) -> BackupOutcome
    where
        F: FnOnce() -> DateTime<Local>,
    {
        let metadata = match fs::metadata(file_path) {
            Ok(metadata) => metadata,
            Err(e) => return classify_stat_error(file_path, e),
        };
        if !metadata.is_file() {
            return BackupOutcome::InvalidType {
                path: file_path.to_path_buf(),
            };
        }

        let source_path = match relative_to_cwd(file_path) {
            Ok(path) => path,
            Err(e) => return config_error(e),
        };

        let backups = match self.list_backups(file_path) {
            Ok(backups) => backups,
            Err(e) => return config_error(e),
        };

        if let Some(latest) = backups.first() {
            match compare_files(file_path, &latest.path) {
                Ok(true) => {
                    info!(
                        "{} is identical to {}",
                        file_path.display(),
                        latest.path.display()
                    );
                    return BackupOutcome::Identical {
                        existing: latest.path.clone(),
                    };
                }
                Ok(false) => debug!("{} differs from {}", file_path.display(), latest.name),
                Err(e) => return config_error(e),
            }
        }

        let (dir, _) = split_source(&source_path);
        let timestamp = format_timestamp(&now());
        let backup_name = generate_backup_name(&source_path, &timestamp, note);
        let backup_dir = mirror_dir(&self.backup_root(), &dir);
        let backup_path = backup_dir.join(&backup_name);

        if dry_run {
            info!("Dry run, not writing {}", backup_path.display());
            return BackupOutcome::Created {
                path: backup_path,
                dry_run: true,
            };
        }

        if let Err(e) = fs::create_dir_all(&backup_dir) {
            return classify_dir_error(e, backup_dir);
        }

        if let Err(e) = copy_file(file_path, &backup_path) {
            return classify_copy_error(e, backup_path);
        }

        info!("Created backup {}", backup_path.display());
        BackupOutcome::Created {
            path: backup_path,
            dry_run: false,
        }
    }
}

fn classify_stat_error(path: &Path, err: io::Error) -> BackupOutcome {
    match err.kind() {
        io::ErrorKind::NotFound => BackupOutcome::NotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => BackupOutcome::PermissionDenied {
            path: path.to_path_buf(),
            message: err.to_string(),
        },
        _ => config_error(BkpfileError::file("stat", path, err)),
    }
}

/// Map a failure to create the mirrored backup directory
fn classify_dir_error(err: io::Error, dir: PathBuf) -> BackupOutcome {
    let message = err.to_string();
    if err.kind() == io::ErrorKind::PermissionDenied {
        BackupOutcome::PermissionDenied { path: dir, message }
    } else if is_disk_space_error(Some(&err)) {
        BackupOutcome::DiskFull { path: dir, message }
    } else {
        BackupOutcome::DirCreateFailed { path: dir, message }
    }
}

/// Map a failure to copy the file into place
///
/// Only the wrapped I/O error is checked for disk-full wording, never the
/// paths in the context message.
fn classify_copy_error(err: BkpfileError, backup_path: PathBuf) -> BackupOutcome {
    let message = err.to_string();
    if err.is_permission_denied() {
        BackupOutcome::PermissionDenied {
            path: backup_path,
            message,
        }
    } else if is_disk_space_error(err.io_error()) {
        BackupOutcome::DiskFull {
            path: backup_path,
            message,
        }
    } else {
        BackupOutcome::ConfigError {
            message: format!("failed to create backup: {}", message),
        }
    }
}

fn config_error(err: BkpfileError) -> BackupOutcome {
    BackupOutcome::ConfigError {
        message: err.to_string(),
    }
}
