//! Configuration validation

use super::loader::{Config, ConfigError};
use crate::field::ROW_STRIDE;

/// Checks a configuration for values the rest of the tool cannot work with
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.target.process_name.is_empty() {
        return Err(ConfigError::Invalid(
            "target.process_name must not be empty".to_string(),
        ));
    }

    if config.target.module_name.is_empty() {
        return Err(ConfigError::Invalid(
            "target.module_name must not be empty".to_string(),
        ));
    }

    // The decode layer indexes rows at a fixed 32-byte pitch; a block smaller
    // than one row can never hold a minefield.
    if config.layout.minefield_size < ROW_STRIDE {
        return Err(ConfigError::Invalid(format!(
            "layout.minefield_size must be at least {} bytes, got {}",
            ROW_STRIDE, config.layout.minefield_size
        )));
    }

    if config.injection.flag_tile_fn_offset == 0 {
        return Err(ConfigError::Invalid(
            "injection.flag_tile_fn_offset must not be zero".to_string(),
        ));
    }

    if config.injection.thread_join_timeout_ms == 0 {
        return Err(ConfigError::Invalid(
            "injection.thread_join_timeout_ms must not be zero".to_string(),
        ));
    }

    Ok(())
}
