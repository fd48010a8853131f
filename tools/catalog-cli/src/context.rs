//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use catalog_core::logging::{self, LogConfig, LogFormat, LogLevel};
use catalog_core::{CatalogConfig, FileConfig};
use catalog_graph::CatalogClients;
use tracing::debug;

use crate::output::Output;

/// Config file names searched from the working directory upwards.
const CONFIG_NAMES: [&str; 2] = ["catalog.toml", ".catalog.toml"];

/// Command-line flags that override the `[log]` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOverrides {
    /// `--verbose` lowers the level to debug.
    pub verbose: bool,
    /// `--log-json` switches to one JSON object per line.
    pub json: bool,
}

impl LogOverrides {
    pub fn apply(self, mut log: LogConfig) -> LogConfig {
        if self.verbose {
            log = log.with_level(LogLevel::Debug);
        }
        if self.json {
            log = log.with_format(LogFormat::Json);
        }
        log
    }
}

/// Execution context for CLI commands.
pub struct Context {
    /// Content and DAM clients.
    pub clients: CatalogClients,
    /// Output handler.
    pub output: Output,
}

impl Context {
    /// Resolve configuration, install logging and build the clients.
    pub fn load(config_path: Option<&str>, output: Output, log: LogOverrides) -> Result<Self> {
        let file = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                find_config(&cwd)
            }
        };

        let file_config = match &file {
            Some(path) => FileConfig::load(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?,
            None => FileConfig::default(),
        };

        let config = CatalogConfig::resolve(file_config, |key| std::env::var(key).ok())
            .context("Invalid catalog configuration")?;

        logging::init(&log.apply(config.log)).context("Failed to initialize logging")?;

        if let Some(path) = &file {
            debug!(path = %path.display(), "Using config file");
        }
        debug!(
            endpoint = %config.content.base_url,
            cache_capacity = config.cache_capacity,
            "Configuration resolved"
        );

        let clients = CatalogClients::from_config(&config).context("Failed to build clients")?;

        Ok(Self { clients, output })
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .flat_map(|dir| CONFIG_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}
