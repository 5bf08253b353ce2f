//! Backup system for bkpfile
//!
//! Creates timestamped copies of a single file in a directory tree that
//! mirrors the source's location, and lists the copies that already exist.
//!
//! # Architecture
//!
//! - `BackupManager`: runs one backup attempt and reports a `BackupOutcome`
//! - `list_backups`: enumerates existing backups of a file, newest first
//! - `naming`: the `BASENAME-YYYY-MM-DD-hh-mm[=NOTE]` naming scheme
//!
//! # Layout
//!
//! A source at `docs/notes.txt` (relative to the working directory) is backed
//! up under `<backup_dir_path>/docs/`. Absolute sources are mirrored with
//! their root stripped, so `/srv/app.conf` lands in `<backup_dir_path>/srv/`.
//!
//! # Example
//!
//! ```rust,ignore
//! use bkpfile::backup::BackupManager;
//! use bkpfile::config::ConfigResolver;
//!
//! let config = ConfigResolver::from_env().load(Path::new("."))?;
//! let manager = BackupManager::new(config);
//!
//! let outcome = manager.create_backup(Path::new("notes.txt"), "v1", false, chrono::Local::now);
//! std::process::exit(outcome.status_code(manager.config()));
//! ```

mod lister;
mod manager;
pub mod naming;
mod outcome;

pub use lister::{list_backups, Backup};
pub use manager::BackupManager;
pub use naming::generate_backup_name;
pub use outcome::BackupOutcome;
