//! Configuration values for bkpfile
//!
//! `Config` is the fully resolved configuration. `PartialConfig` is what a
//! single YAML file contributes: every field is optional so an explicit
//! `false` or `0` can be told apart from a key that was never written.

use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use super::paths::expand_home;
use crate::error::{BkpfileError, BkpfileResult};

/// Source label for values that no config file set
pub const DEFAULT_SOURCE: &str = "default";

/// Resolved application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root directory under which mirrored backup trees are created
    pub backup_dir_path: String,

    /// Reserved toggle for prefixing backup paths with the current directory name
    pub use_current_dir_name: bool,

    /// Colon-separated config search path as written in the config file
    pub config: String,

    pub status_created_backup: i32,
    pub status_file_is_identical_to_existing_backup: i32,
    pub status_file_not_found: i32,
    pub status_invalid_file_type: i32,
    pub status_permission_denied: i32,
    pub status_disk_full: i32,
    pub status_failed_to_create_backup_directory: i32,
    pub status_config_error: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backup_dir_path: "../.bkpfile".to_string(),
            use_current_dir_name: true,
            config: "./.bkpfile.yml:~/.bkpfile.yml".to_string(),
            status_created_backup: 0,
            status_file_is_identical_to_existing_backup: 0,
            status_file_not_found: 20,
            status_invalid_file_type: 21,
            status_permission_denied: 22,
            status_disk_full: 30,
            status_failed_to_create_backup_directory: 31,
            status_config_error: 10,
        }
    }
}

impl Config {
    /// Every field as a `(yaml key, stringified value)` pair
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("backup_dir_path", self.backup_dir_path.clone()),
            ("use_current_dir_name", self.use_current_dir_name.to_string()),
            ("config", self.config.clone()),
            ("status_created_backup", self.status_created_backup.to_string()),
            (
                "status_file_is_identical_to_existing_backup",
                self.status_file_is_identical_to_existing_backup.to_string(),
            ),
            ("status_file_not_found", self.status_file_not_found.to_string()),
            ("status_invalid_file_type", self.status_invalid_file_type.to_string()),
            ("status_permission_denied", self.status_permission_denied.to_string()),
            ("status_disk_full", self.status_disk_full.to_string()),
            (
                "status_failed_to_create_backup_directory",
                self.status_failed_to_create_backup_directory.to_string(),
            ),
            ("status_config_error", self.status_config_error.to_string()),
        ]
    }
}

/// The fields a single config file sets explicitly
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    #[serde(deserialize_with = "scalar_string")]
    pub backup_dir_path: Option<String>,
    pub use_current_dir_name: Option<bool>,
    #[serde(deserialize_with = "scalar_string")]
    pub config: Option<String>,
    pub status_created_backup: Option<i32>,
    pub status_file_is_identical_to_existing_backup: Option<i32>,
    pub status_file_not_found: Option<i32>,
    pub status_invalid_file_type: Option<i32>,
    pub status_permission_denied: Option<i32>,
    pub status_disk_full: Option<i32>,
    pub status_failed_to_create_backup_directory: Option<i32>,
    pub status_config_error: Option<i32>,
}

/// Accept any scalar for a string setting, so `backup_dir_path: 2024` reads
/// as `"2024"`. Sequences and mappings are still rejected.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(D::Error::custom("expected a string")),
    }
}

impl PartialConfig {
    /// Parse the raw bytes of a config file
    ///
    /// An empty document is an empty partial config. Anything other than a
    /// mapping at the top level is rejected.
    pub fn parse(path: &Path, data: &[u8]) -> BkpfileResult<Self> {
        let parse_error = |message: String| BkpfileError::ConfigParse {
            path: path.to_path_buf(),
            message,
        };

        let value: serde_yaml::Value =
            serde_yaml::from_slice(data).map_err(|e| parse_error(e.to_string()))?;

        match value {
            serde_yaml::Value::Null => Ok(Self::default()),
            serde_yaml::Value::Mapping(_) => {
                serde_yaml::from_value(value).map_err(|e| parse_error(e.to_string()))
            }
            _ => Err(parse_error("expected a mapping at the top level".into())),
        }
    }

    /// Stringified values of the fields this file sets, keyed by yaml name
    ///
    /// An empty `backup_dir_path` counts as unset. A leading `~/` in it is
    /// expanded with `home`.
    pub fn present_fields(&self, home: Option<&Path>) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();

        if let Some(dir) = self.backup_dir_path.as_deref().filter(|d| !d.is_empty()) {
            fields.push(("backup_dir_path", expand_home(dir, home)));
        }
        if let Some(flag) = self.use_current_dir_name {
            fields.push(("use_current_dir_name", flag.to_string()));
        }
        if let Some(search) = &self.config {
            fields.push(("config", search.clone()));
        }

        let statuses = [
            ("status_created_backup", self.status_created_backup),
            (
                "status_file_is_identical_to_existing_backup",
                self.status_file_is_identical_to_existing_backup,
            ),
            ("status_file_not_found", self.status_file_not_found),
            ("status_invalid_file_type", self.status_invalid_file_type),
            ("status_permission_denied", self.status_permission_denied),
            ("status_disk_full", self.status_disk_full),
            (
                "status_failed_to_create_backup_directory",
                self.status_failed_to_create_backup_directory,
            ),
            ("status_config_error", self.status_config_error),
        ];
        for (name, code) in statuses {
            if let Some(code) = code {
                fields.push((name, code.to_string()));
            }
        }

        fields
    }

    /// Overwrite the fields of `cfg` that this file sets
    pub fn apply_to(&self, cfg: &mut Config, home: Option<&Path>) {
        if let Some(dir) = self.backup_dir_path.as_deref().filter(|d| !d.is_empty()) {
            cfg.backup_dir_path = expand_home(dir, home);
        }
        if let Some(flag) = self.use_current_dir_name {
            cfg.use_current_dir_name = flag;
        }
        if let Some(search) = &self.config {
            cfg.config = search.clone();
        }

        let statuses = [
            (&mut cfg.status_created_backup, self.status_created_backup),
            (
                &mut cfg.status_file_is_identical_to_existing_backup,
                self.status_file_is_identical_to_existing_backup,
            ),
            (&mut cfg.status_file_not_found, self.status_file_not_found),
            (&mut cfg.status_invalid_file_type, self.status_invalid_file_type),
            (&mut cfg.status_permission_denied, self.status_permission_denied),
            (&mut cfg.status_disk_full, self.status_disk_full),
            (
                &mut cfg.status_failed_to_create_backup_directory,
                self.status_failed_to_create_backup_directory,
            ),
            (&mut cfg.status_config_error, self.status_config_error),
        ];
        for (slot, code) in statuses {
            if let Some(code) = code {
                *slot = code;
            }
        }
    }
}

/// A resolved configuration value together with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValue {
    /// Configuration key as written in YAML
    pub name: String,
    /// Stringified resolved value
    pub value: String,
    /// Config file path, or `"default"`
    pub source: String,
}

impl ConfigValue {
    /// A value that still holds its hard-coded default
    pub fn default_value(name: &str, value: String) -> Self {
        Self {
            name: name.to_string(),
            value,
            source: DEFAULT_SOURCE.to_string(),
        }
    }

    /// Whether a config file has claimed this value yet
    pub fn is_default(&self) -> bool {
        self.source == DEFAULT_SOURCE
    }
}
