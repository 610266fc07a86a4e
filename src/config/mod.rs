//! Configuration for the fixed winmine memory-layout contract
//!
//! Provides the built-in layout constants, optional TOML override loading,
//! and validation.

mod defaults;
mod loader;
mod validator;

pub use defaults::default_config;
pub use loader::{load_config, Config, ConfigError, InjectionConfig, LayoutConfig, TargetConfig};
pub use validator::validate_config;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;
