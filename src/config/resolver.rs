//! Config resolution across the search path
//!
//! Two precedence rules live here and they are not the same:
//!
//! - [`ConfigResolver::load`] lets the first config file found decide every
//!   field it mentions. Later files in the search path are never read.
//! - [`ConfigResolver::display_trace`] reads every file and attributes each
//!   field to the first file that mentions it.
//!
//! Both are observable, so both are kept.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::paths::{self, LEGACY_CONFIG_FILE};
use super::settings::{Config, ConfigValue, PartialConfig};
use crate::error::{BkpfileError, BkpfileResult};
use crate::storage::paths::normalize;

/// Resolves `Config` from a list of candidate YAML files
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    search_path: Vec<String>,
    home: Option<PathBuf>,
}

impl ConfigResolver {
    /// Create a resolver from `BKPFILE_CONFIG` and the user's home directory
    pub fn from_env() -> Self {
        Self {
            search_path: paths::search_path(),
            home: paths::home_dir(),
        }
    }

    /// Create a resolver with an explicit search path (useful for testing)
    pub fn with_search_path(search_path: Vec<String>, home: Option<PathBuf>) -> Self {
        Self { search_path, home }
    }

    /// The candidate config files, in precedence order
    pub fn search_path(&self) -> &[String] {
        &self.search_path
    }

    /// Load the configuration, resolving relative config paths against `root`
    ///
    /// Missing files are skipped. A file that exists but cannot be read or
    /// parsed aborts the whole load.
    pub fn load(&self, root: &Path) -> BkpfileResult<Config> {
        let mut cfg = Config::default();

        for candidate in &self.search_path {
            let path = resolve_candidate(root, candidate);
            if let Some(partial) = read_partial(&path)? {
                info!("Loaded config from {}", path.display());
                partial.apply_to(&mut cfg, self.home.as_deref());
                return Ok(cfg);
            }
        }

        let legacy = normalize(&root.join(LEGACY_CONFIG_FILE));
        if let Some(partial) = read_partial(&legacy)? {
            info!("Loaded config from {}", legacy.display());
            partial.apply_to(&mut cfg, self.home.as_deref());
        } else {
            debug!("No config file found, using defaults");
        }

        Ok(cfg)
    }

    /// Resolve every field together with the file it came from
    ///
    /// Values are sorted by name. One unreadable or malformed file fails the
    /// whole trace.
    pub fn display_trace(&self, root: &Path) -> BkpfileResult<Vec<ConfigValue>> {
        let mut values: Vec<ConfigValue> = Config::default()
            .fields()
            .into_iter()
            .map(|(name, value)| ConfigValue::default_value(name, value))
            .collect();

        for candidate in &self.search_path {
            let path = resolve_candidate(root, candidate);
            let Some(partial) = read_partial(&path)? else {
                continue;
            };
            let source = display_source(candidate);

            for (name, value) in partial.present_fields(self.home.as_deref()) {
                if let Some(slot) = values.iter_mut().find(|v| v.name == name) {
                    if slot.is_default() {
                        slot.value = value;
                        slot.source = source.clone();
                    }
                }
            }
        }

        values.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(values)
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::from_env()
    }
}

fn resolve_candidate(root: &Path, candidate: &str) -> PathBuf {
    let path = Path::new(candidate);
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&root.join(path))
    }
}

/// How a config path is labelled in the trace: relative paths get a `./` prefix
fn display_source(candidate: &str) -> String {
    if Path::new(candidate).is_absolute() || candidate.starts_with("./") {
        candidate.to_string()
    } else {
        format!("./{}", candidate)
    }
}

/// Read and parse a config file, or `None` if it does not exist
fn read_partial(path: &Path) -> BkpfileResult<Option<PartialConfig>> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Config file {} not found, skipping", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(BkpfileError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    PartialConfig::parse(path, &data).map(Some)
}
