//! Config file discovery for bkpfile
//!
//! ## Search Path Resolution
//!
//! 1. `BKPFILE_CONFIG` environment variable (if set and non-empty), split on `:`
//! 2. Otherwise `./.bkpfile.yml` followed by `~/.bkpfile.yml`
//!
//! Tokens starting with `~/` are expanded to the user's home directory. When
//! the home directory cannot be determined the token is kept as written.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

/// Environment variable holding a colon-separated config search path
pub const CONFIG_ENV_VAR: &str = "BKPFILE_CONFIG";

/// Search path used when `BKPFILE_CONFIG` is unset or empty
pub const DEFAULT_SEARCH_PATH: [&str; 2] = ["./.bkpfile.yml", "~/.bkpfile.yml"];

/// Name of the config file probed directly under the root as a last resort
pub const LEGACY_CONFIG_FILE: &str = ".bkpfile.yml";

/// Build the config search path from the process environment
pub fn search_path() -> Vec<String> {
    let env_value = std::env::var(CONFIG_ENV_VAR).ok();
    search_path_from(env_value.as_deref(), home_dir().as_deref())
}

/// Build the config search path from an explicit override value
///
/// An empty override behaves as if it were unset.
pub fn search_path_from(env_value: Option<&str>, home: Option<&Path>) -> Vec<String> {
    let tokens: Vec<&str> = match env_value {
        Some(value) if !value.is_empty() => value.split(':').collect(),
        _ => DEFAULT_SEARCH_PATH.to_vec(),
    };

    tokens
        .into_iter()
        .map(|token| expand_home(token, home))
        .collect()
}

/// Expand a leading `~/` using the given home directory
pub fn expand_home(path: &str, home: Option<&Path>) -> String {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().into_owned(),
        _ => path.to_string(),
    }
}

/// The current user's home directory, if it can be determined
pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}
