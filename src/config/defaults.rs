//! Default configuration values for the death counter

use serde::{Deserialize, Serialize};

/// Default configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDefaults {
    pub monitor: MonitorDefaults,
    pub logging: LoggingDefaults,
}

/// Default polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorDefaults {
    pub poll_interval_ms: u64,
    pub retry_interval_ms: u64,
}

/// Default logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingDefaults {
    pub level: String,
    pub show_target: bool,
}

/// Returns the default configuration
pub fn default_config() -> ConfigDefaults {
    ConfigDefaults {
        monitor: MonitorDefaults {
            poll_interval_ms: 500,
            retry_interval_ms: 2000,
        },
        logging: LoggingDefaults {
            level: "info".to_string(),
            show_target: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_defaults() {
        let config = default_config();
        assert_eq!(config.monitor.poll_interval_ms, 500);
        assert_eq!(config.monitor.retry_interval_ms, 2000);
    }

    #[test]
    fn test_logging_defaults() {
        let config = default_config();
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.show_target);
    }

    #[test]
    fn test_serialization() {
        let config = default_config();
        let serialized = toml::to_string(&config).unwrap();
        assert!(serialized.contains("poll_interval_ms"));
        assert!(serialized.contains("[logging]"));

        let deserialized: ConfigDefaults = toml::from_str(&serialized).unwrap();
        assert_eq!(
            deserialized.monitor.retry_interval_ms,
            config.monitor.retry_interval_ms
        );
        assert_eq!(deserialized.logging.level, config.logging.level);
    }
}
