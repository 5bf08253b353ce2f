//! Listing existing backups of a source file
//!
//! There is no index: every call enumerates the mirrored backup directory and
//! reads each matching file's modification time as its creation time.

use std::cmp::Reverse;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::debug;

use super::naming::{extract_note, matches_source};
use crate::error::{BkpfileError, BkpfileResult};
use crate::storage::paths::{mirror_dir, relative_to_cwd, split_source};

/// One backup file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    /// Backup file name
    pub name: String,
    /// Full path to the backup file
    pub path: PathBuf,
    /// Modification time of the backup file
    pub creation_time: SystemTime,
    /// Source path as supplied by the caller
    pub source_file: PathBuf,
    /// Note embedded in the name, empty if none
    pub note: String,
}

/// List the backups of `source_file` under `backup_root`, most recent first
///
/// A missing backup root or mirrored subdirectory means there are no backups
/// yet and yields an empty list. Ties on modification time are broken by
/// name, descending.
pub fn list_backups(backup_root: &Path, source_file: &Path) -> BkpfileResult<Vec<Backup>> {
    if !backup_root.exists() {
        debug!("Backup root {} does not exist", backup_root.display());
        return Ok(Vec::new());
    }

    let source_path = relative_to_cwd(source_file)?;
    let (dir, base_name) = split_source(&source_path);
    let backup_dir = mirror_dir(backup_root, &dir);

    let entries = match fs::read_dir(&backup_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(BkpfileError::file("read directory", &backup_dir, e)),
    };

    let mut backups = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BkpfileError::file("read directory", &backup_dir, e))?;

        let name = entry.file_name().to_string_lossy().into_owned();
        if !matches_source(&name, &base_name) {
            continue;
        }

        // Entries that vanish or cannot be inspected mid-listing are skipped
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            continue;
        }
        let Ok(creation_time) = entry.metadata().and_then(|m| m.modified()) else {
            continue;
        };

        backups.push(Backup {
            note: extract_note(&name).unwrap_or_default().to_string(),
            path: backup_dir.join(&name),
            name,
            creation_time,
            source_file: source_file.to_path_buf(),
        });
    }

    backups.sort_by_key(|b| Reverse((b.creation_time, b.name.clone())));
    debug!(
        "Found {} backup(s) of {} in {}",
        backups.len(),
        base_name,
        backup_dir.display()
    );

    Ok(backups)
}
