//! Configuration module for bkpfile
//!
//! This module provides configuration management including:
//! - Config file discovery (`BKPFILE_CONFIG` or the default search path)
//! - Hard-coded defaults for every field
//! - Merging YAML files into a resolved `Config`, with source attribution

pub mod paths;
pub mod resolver;
pub mod settings;

pub use resolver::ConfigResolver;
pub use settings::{Config, ConfigValue, PartialConfig};
