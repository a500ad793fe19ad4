/// Unified logger for centralized logging configuration

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    pub level: String,

    /// Log to file
    pub log_to_file: bool,

    /// Log file path, appended to
    pub log_file_path: Option<PathBuf>,

    /// Include timestamps
    pub include_timestamps: bool,

    /// Include thread IDs
    pub include_thread_ids: bool,

    /// Include target module paths
    pub include_targets: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_to_file: false,
            log_file_path: None,
            include_timestamps: true,
            include_thread_ids: false,
            include_targets: true,
        }
    }
}

/// Unified logger
pub struct UnifiedLogger;

impl UnifiedLogger {
    /// Initialize the global logger.
    ///
    /// `RUST_LOG` overrides the configured level. Fails if a global
    /// subscriber is already installed.
    pub fn init(config: LoggerConfig) -> anyhow::Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))?;

        let mut layers: Vec<BoxedLayer> = vec![Self::console_layer(&config)];
        if config.log_to_file {
            let path = config
                .log_file_path
                .clone()
                .ok_or_else(|| anyhow::anyhow!("log_to_file is set but log_file_path is missing"))?;
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            layers.push(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(config.include_targets)
                    .with_thread_ids(config.include_thread_ids)
                    .boxed(),
            );
        }

        tracing_subscriber::registry()
            .with(filter)
            .with(layers)
            .try_init()?;

        tracing::info!("Logging initialized with level: {}", config.level);

        Ok(())
    }

    /// Initialize with default configuration
    pub fn init_default() -> anyhow::Result<()> {
        Self::init(LoggerConfig::default())
    }

    fn console_layer(config: &LoggerConfig) -> BoxedLayer {
        let layer = fmt::layer()
            .with_target(config.include_targets)
            .with_thread_ids(config.include_thread_ids)
            .with_ansi(true);
        if config.include_timestamps {
            layer.boxed()
        } else {
            layer.without_time().boxed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_config_default() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.log_to_file);
    }

    #[test]
    fn test_file_logging_needs_path() {
        let config = LoggerConfig {
            log_to_file: true,
            ..Default::default()
        };
        assert!(UnifiedLogger::init(config).is_err());
    }
}
