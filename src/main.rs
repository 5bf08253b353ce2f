use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use log::{debug, LevelFilter};

use bkpfile::backup::BackupManager;
use bkpfile::cli::{handle_create, handle_list, handle_show_config};
use bkpfile::config::{Config, ConfigResolver};

#[derive(Parser)]
#[command(
    name = "bkpfile",
    version,
    about = "Single file backup CLI application",
    long_about = "bkpfile creates timestamped copies of a single file in a directory \
                  tree that mirrors the file's location under a backup root. A copy \
                  is skipped when the file matches its most recent backup."
)]
struct Cli {
    /// File to back up or list backups for
    #[arg(value_name = "FILE_PATH", required_unless_present = "config")]
    file_path: Option<PathBuf>,

    /// Note appended to the backup name
    #[arg(value_name = "NOTE")]
    note: Option<String>,

    /// Show what would be done without creating backups
    #[arg(long)]
    dry_run: bool,

    /// List all backups for the specified file
    #[arg(long)]
    list: bool,

    /// Display computed configuration values and exit
    #[arg(long)]
    config: bool,

    /// Log verbosity (off, error, warn, info, debug, trace), overrides RUST_LOG
    #[arg(long, env = "BKPFILE_LOG")]
    log_level: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = cli.log_level.as_deref() {
        let log_level = match level.to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Warn,
        };
        logger.filter_level(log_level);
    }
    logger.format_timestamp_secs().init();

    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    let root = Path::new(".");
    let resolver = ConfigResolver::from_env();
    debug!("Config search path: {:?}", resolver.search_path());

    if cli.config {
        return handle_show_config(&resolver, root);
    }

    let config = match resolver.load(root).context("failed to load config") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            return Config::default().status_config_error;
        }
    };
    let manager = BackupManager::new(config);

    // clap guarantees a file path whenever --config is absent
    let Some(file_path) = cli.file_path else {
        return manager.config().status_config_error;
    };

    if cli.list {
        return handle_list(&manager, &file_path);
    }

    let note = cli.note.unwrap_or_default();
    handle_create(&manager, &file_path, &note, cli.dry_run)
}
