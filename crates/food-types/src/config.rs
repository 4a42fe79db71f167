//! Configuration loading for fastfood.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at `~/.config/fastfood/config.toml`.

use config::{Config, Environment, File};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::FoodError;

/// Hard cap on search results per query.
pub const MAX_SEARCH_LIMIT: usize = 100;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Data directory holding the keyed store, search index and manifest
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Records accumulated before an ingestion batch is flushed
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Memory budget for the search index writer in MB
    #[serde(default = "default_writer_memory_mb")]
    pub writer_memory_mb: usize,

    /// Result count used when a search does not ask for one
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Accepted records between progress log lines in verbose imports
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
}

fn default_data_dir() -> String {
    ProjectDirs::from("", "", "fastfood")
        .map(|p| p.data_local_dir().join("data"))
        .unwrap_or_else(|| PathBuf::from("./data"))
        .to_string_lossy()
        .to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_batch_size() -> usize {
    5_000
}

fn default_writer_memory_mb() -> usize {
    50
}

fn default_search_limit() -> usize {
    20
}

fn default_progress_interval() -> u64 {
    100_000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            batch_size: default_batch_size(),
            writer_memory_mb: default_writer_memory_mb(),
            search_limit: default_search_limit(),
            progress_interval: default_progress_interval(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/fastfood/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (FOOD_*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, FoodError> {
        let config_dir = ProjectDirs::from("", "", "fastfood")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("data_dir", default_data_dir())
            .map_err(|e| FoodError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| FoodError::Config(e.to_string()))?
            .set_default("batch_size", default_batch_size() as i64)
            .map_err(|e| FoodError::Config(e.to_string()))?
            .set_default("writer_memory_mb", default_writer_memory_mb() as i64)
            .map_err(|e| FoodError::Config(e.to_string()))?
            .set_default("search_limit", default_search_limit() as i64)
            .map_err(|e| FoodError::Config(e.to_string()))?
            .set_default("progress_interval", default_progress_interval() as i64)
            .map_err(|e| FoodError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // FOOD_DATA_DIR, FOOD_BATCH_SIZE, ...
        builder = builder.add_source(
            Environment::with_prefix("FOOD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder
            .build()
            .map_err(|e| FoodError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| FoodError::Config(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), FoodError> {
        if self.batch_size == 0 {
            return Err(FoodError::Config("batch_size must be > 0".to_string()));
        }
        // Tantivy needs at least 15MB per indexing thread.
        if self.writer_memory_mb < 15 {
            return Err(FoodError::Config(format!(
                "writer_memory_mb must be >= 15, got {}",
                self.writer_memory_mb
            )));
        }
        if !(1..=MAX_SEARCH_LIMIT).contains(&self.search_limit) {
            return Err(FoodError::Config(format!(
                "search_limit must be 1-{}, got {}",
                MAX_SEARCH_LIMIT, self.search_limit
            )));
        }
        Ok(())
    }

    /// Expand ~ in data_dir to the actual home directory
    pub fn expanded_data_dir(&self) -> PathBuf {
        if let Some(rest) = self.data_dir.strip_prefix("~/") {
            if let Some(dirs) = BaseDirs::new() {
                return dirs.home_dir().join(rest);
            }
        }
        PathBuf::from(&self.data_dir)
    }
}
