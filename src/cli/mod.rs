//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the backup and config layers.

pub mod backup;
pub mod config;

pub use backup::{handle_create, handle_list};
pub use config::handle_show_config;
