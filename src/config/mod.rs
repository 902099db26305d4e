//! Configuration module for the death counter
//!
//! Provides configuration loading, validation, and default settings
//! for the monitor and logging.

mod defaults;
mod loader;
mod validator;

pub use defaults::{default_config, ConfigDefaults};
pub use loader::{load_config, ConfigLoader, DEFAULT_CONFIG_FILE};
pub use validator::{validate_config, ConfigValidator, MAX_RETRY_INTERVAL_MS, VALID_LOG_LEVELS};

// Re-export the configuration structures
pub use loader::{Config, LoggingConfig, MonitorConfig};

// Configuration-related error type
pub use loader::ConfigError;

// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_config_export() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_config_error_from_io() {
        use std::io;
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let config_error: ConfigError = io_error.into();
        assert!(matches!(config_error, ConfigError::Io(_)));
    }

    #[test]
    fn test_defaults_match_config_default() {
        let defaults = default_config();
        let config = Config::default();
        assert_eq!(config.monitor.poll_interval_ms, defaults.monitor.poll_interval_ms);
        assert_eq!(config.logging.level, defaults.logging.level);
    }
}
