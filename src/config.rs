//! Configuration loading
//!
//! Reads `config.toml` from the platform config directory. A missing file
//! means defaults; a broken file means defaults plus a warning for the UI.

mod types;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use types::{BackendConfig, Config, StaleResponsePolicy, SubmissionConfig};

#[derive(Debug, Error)]
enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Loaded configuration plus any problem worth telling the user about
#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Default location: `<config dir>/asanas/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("asanas").join("config.toml"))
}

/// Load configuration from the default location
pub fn load_config() -> ConfigResult {
    match config_path() {
        Some(path) => load_config_from_path(&path),
        None => ConfigResult::default(),
    }
}

/// Load configuration from an explicit path
pub fn load_config_from_path(path: &Path) -> ConfigResult {
    if !path.exists() {
        log::debug!("No config file at {}", path.display());
        return ConfigResult::default();
    }

    match read_config(path) {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(e) => {
            log::warn!("{}", e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("{e}; using defaults")),
            }
        }
    }
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
