//! Result of a backup attempt
//!
//! Every failure inside backup creation is classified into exactly one of
//! these kinds, and each kind maps to one configurable status code.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// What happened when a backup was requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    /// A backup was written, or would have been in a dry run
    Created { path: PathBuf, dry_run: bool },
    /// The file matches its most recent backup, nothing was written
    Identical { existing: PathBuf },
    /// The target file does not exist
    NotFound { path: PathBuf },
    /// The target is not a regular file
    InvalidType { path: PathBuf },
    /// Permission was denied while reading the target or writing the backup
    PermissionDenied { path: PathBuf, message: String },
    /// The filesystem ran out of space
    DiskFull { path: PathBuf, message: String },
    /// The backup directory could not be created
    DirCreateFailed { path: PathBuf, message: String },
    /// Any other unexpected failure
    ConfigError { message: String },
}

impl BackupOutcome {
    /// The exit status configured for this outcome
    ///
    /// A dry run shares the status of a real creation.
    pub fn status_code(&self, cfg: &Config) -> i32 {
        match self {
            Self::Created { .. } => cfg.status_created_backup,
            Self::Identical { .. } => cfg.status_file_is_identical_to_existing_backup,
            Self::NotFound { .. } => cfg.status_file_not_found,
            Self::InvalidType { .. } => cfg.status_invalid_file_type,
            Self::PermissionDenied { .. } => cfg.status_permission_denied,
            Self::DiskFull { .. } => cfg.status_disk_full,
            Self::DirCreateFailed { .. } => cfg.status_failed_to_create_backup_directory,
            Self::ConfigError { .. } => cfg.status_config_error,
        }
    }

    /// Whether the request was satisfied (created or already backed up)
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Created { .. } | Self::Identical { .. })
    }

    /// The path this outcome refers to, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Created { path, .. }
            | Self::NotFound { path }
            | Self::InvalidType { path }
            | Self::PermissionDenied { path, .. }
            | Self::DiskFull { path, .. }
            | Self::DirCreateFailed { path, .. } => Some(path),
            Self::Identical { existing } => Some(existing),
            Self::ConfigError { .. } => None,
        }
    }
}

impl fmt::Display for BackupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { path, dry_run: true } => {
                write!(f, "Would create backup: {}", path.display())
            }
            Self::Created { path, dry_run: false } => {
                write!(f, "Created backup: {}", path.display())
            }
            Self::Identical { existing } => {
                write!(f, "File is identical to existing backup: {}", existing.display())
            }
            Self::NotFound { path } => write!(f, "File not found: {}", path.display()),
            Self::InvalidType { path } => write!(f, "Not a regular file: {}", path.display()),
            Self::PermissionDenied { path, message } => {
                write!(f, "Permission denied: {}: {}", path.display(), message)
            }
            Self::DiskFull { path, message } => {
                write!(f, "Disk full: {}: {}", path.display(), message)
            }
            Self::DirCreateFailed { path, message } => write!(
                f,
                "Failed to create backup directory {}: {}",
                path.display(),
                message
            ),
            Self::ConfigError { message } => write!(f, "{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_config() {
        let cfg = Config {
            status_created_backup: 1,
            status_file_is_identical_to_existing_backup: 2,
            status_file_not_found: 3,
            status_invalid_file_type: 4,
            status_permission_denied: 5,
            status_disk_full: 6,
            status_failed_to_create_backup_directory: 7,
            status_config_error: 8,
            ..Config::default()
        };
        let p = PathBuf::from("x");
        let m = String::from("m");

        let cases = [
            (BackupOutcome::Created { path: p.clone(), dry_run: false }, 1),
            (BackupOutcome::Created { path: p.clone(), dry_run: true }, 1),
            (BackupOutcome::Identical { existing: p.clone() }, 2),
            (BackupOutcome::NotFound { path: p.clone() }, 3),
            (BackupOutcome::InvalidType { path: p.clone() }, 4),
            (BackupOutcome::PermissionDenied { path: p.clone(), message: m.clone() }, 5),
            (BackupOutcome::DiskFull { path: p.clone(), message: m.clone() }, 6),
            (BackupOutcome::DirCreateFailed { path: p.clone(), message: m.clone() }, 7),
            (BackupOutcome::ConfigError { message: m.clone() }, 8),
        ];
        for (outcome, code) in cases {
            assert_eq!(outcome.status_code(&cfg), code, "{:?}", outcome);
        }
    }

    #[test]
    fn test_default_codes() {
        let cfg = Config::default();
        assert_eq!(
            BackupOutcome::NotFound { path: "x".into() }.status_code(&cfg),
            20
        );
        assert_eq!(
            BackupOutcome::Identical { existing: "x".into() }.status_code(&cfg),
            0
        );
    }

    #[test]
    fn test_success_kinds() {
        assert!(BackupOutcome::Identical { existing: "x".into() }.is_success());
        assert!(BackupOutcome::Created { path: "x".into(), dry_run: true }.is_success());
        assert!(!BackupOutcome::ConfigError { message: "boom".into() }.is_success());
    }

    #[test]
    fn test_display() {
        let created = BackupOutcome::Created {
            path: "../.bkpfile/notes.txt-2024-03-20-15-30".into(),
            dry_run: false,
        };
        assert_eq!(
            created.to_string(),
            "Created backup: ../.bkpfile/notes.txt-2024-03-20-15-30"
        );
        let dry = BackupOutcome::Created { path: "b".into(), dry_run: true };
        assert_eq!(dry.to_string(), "Would create backup: b");
        assert_eq!(dry.path(), Some(Path::new("b")));
    }
}
