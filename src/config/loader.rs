//! Configuration loading and discovery for `rack.toml`
//!
//! Provides functions to find and load configuration.

use super::schema::RackConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file
pub const CONFIG_FILE: &str = "rack.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse rack.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// A loaded configuration and the directory its asset paths are relative to
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: RackConfig,
    pub root: PathBuf,
}

/// Find rack.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find rack.toml by walking up from a specific directory.
///
/// This is the internal implementation that allows specifying the start directory,
/// useful for testing.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        // Move to parent directory
        if !current.pop() {
            // Reached root, no config found
            return None;
        }
    }
}

/// Load configuration.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration rooted at the current directory.
///
/// # Example
/// ```ignore
/// // Load from discovered config
/// let loaded = load_config(None)?;
///
/// // Load from specific path
/// let loaded = load_config(Some(Path::new("shirts/rack.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            let config = load_config_file(&p)?;
            let root = p
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            log::debug!("Using config {}", p.display());
            Ok(LoadedConfig { config, root })
        }
        None => {
            log::debug!("No {} found, using defaults", CONFIG_FILE);
            Ok(LoadedConfig { config: RackConfig::default(), root: PathBuf::from(".") })
        }
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<RackConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: RackConfig = toml::from_str(&contents)?;

    // Validate the config
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}
