//! Configuration validator for the death counter
//!
//! Validates configuration values to ensure they are within acceptable ranges.

use super::loader::{Config, ConfigError, LoggingConfig, MonitorConfig};

/// Longest accepted retry interval
pub const MAX_RETRY_INTERVAL_MS: u64 = 60_000;

/// Accepted values for `[logging] level`
pub const VALID_LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_monitor(&config.monitor)?;
        Self::validate_logging(&config.logging)?;
        Ok(())
    }

    /// Validates polling configuration
    fn validate_monitor(monitor: &MonitorConfig) -> Result<(), ConfigError> {
        if monitor.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "Poll interval must be greater than 0".to_string(),
            ));
        }

        if monitor.retry_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "Retry interval must be greater than 0".to_string(),
            ));
        }

        if monitor.poll_interval_ms > monitor.retry_interval_ms {
            return Err(ConfigError::Invalid(format!(
                "Poll interval ({} ms) cannot exceed retry interval ({} ms)",
                monitor.poll_interval_ms, monitor.retry_interval_ms
            )));
        }

        if monitor.retry_interval_ms > MAX_RETRY_INTERVAL_MS {
            return Err(ConfigError::Invalid(format!(
                "Retry interval cannot exceed {} ms",
                MAX_RETRY_INTERVAL_MS
            )));
        }

        Ok(())
    }

    /// Validates logging configuration
    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                logging.level, VALID_LOG_LEVELS
            )));
        }

        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}
