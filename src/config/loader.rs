//! Configuration structures and TOML loading
//!
//! The built-in defaults describe the one winmine.exe build this tool knows;
//! a TOML file can override individual values for a patched binary.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::defaults::default_config;
use super::validator::validate_config;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Names used to locate the target
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub process_name: String,
    pub module_name: String,
}

/// Fixed byte offsets from the module base
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub mine_count_offset: usize,
    pub width_offset: usize,
    pub height_offset: usize,
    pub mines_remaining_offset: usize,
    pub minefield_offset: usize,
    pub minefield_size: usize,
}

/// Parameters for the injected call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectionConfig {
    pub flag_tile_fn_offset: usize,
    pub thread_join_timeout_ms: u64,
}

/// Complete tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub target: TargetConfig,
    pub layout: LayoutConfig,
    pub injection: InjectionConfig,
}

impl Default for Config {
    fn default() -> Self {
        default_config()
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        default_config().target
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        default_config().layout
    }
}

impl Default for InjectionConfig {
    fn default() -> Self {
        default_config().injection
    }
}

/// Loads the configuration, merging a TOML file over the defaults when a
/// path is given
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            toml::from_str(&text)?
        }
        None => Config::default(),
    };
    validate_config(&config)?;
    Ok(config)
}
