//! bkpfile - Single-file backup utility
//!
//! This library provides the core functionality for the bkpfile command line
//! tool. Given a file path it creates a timestamped, note-annotated copy in a
//! mirrored directory tree under a configurable backup root, skips the copy
//! when the file is identical to its most recent backup, and lists existing
//! backups.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Config file discovery, defaults and merging
//! - `error`: Custom error types
//! - `backup`: Backup creation, naming and listing
//! - `storage`: File comparison, copying and path mirroring
//! - `display`: Terminal output formatting
//! - `cli`: Command handlers used by the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use bkpfile::backup::BackupManager;
//! use bkpfile::config::ConfigResolver;
//!
//! let config = ConfigResolver::from_env().load(Path::new("."))?;
//! let manager = BackupManager::new(config);
//! let outcome = manager.create_backup(Path::new("notes.txt"), "", false, chrono::Local::now);
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod storage;

pub use error::{BkpfileError, BkpfileResult};
