//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.ollama.endpoint.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "ollama.endpoint must not be empty".into(),
            ));
        }
        if self.ollama.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "ollama.timeout_ms must be > 0".into(),
            ));
        }
        if self.speed.num_runs == 0 {
            return Err(ConfigError::ValidationError(
                "speed.num_runs must be > 0".into(),
            ));
        }
        if self.images.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "images.supported_formats must list at least one extension".into(),
            ));
        }
        Ok(())
    }
}
