//! Config CLI command
//!
//! Shows every resolved configuration value and the file it came from.

use std::path::Path;

use crate::config::{Config, ConfigResolver};
use crate::display::format_config_values;

/// Print the source-attributed configuration
///
/// A broken config file prints nothing but the error and exits with the
/// default config-error status, since the configured one cannot be known.
pub fn handle_show_config(resolver: &ConfigResolver, root: &Path) -> i32 {
    match resolver.display_trace(root) {
        Ok(values) => {
            println!("{}", format_config_values(&values));
            0
        }
        Err(e) => {
            eprintln!("{}", e);
            Config::default().status_config_error
        }
    }
}
