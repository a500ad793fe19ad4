/// Integration module for the tab organizer
///
/// Wires a window host, the tab manager, logging and error handling into
/// one application context.

use browser_connector::WindowHost;
use std::path::Path;
use std::sync::Arc;
use tab_manager::{TabManager, TabManagerConfig, TabStats};
use tab_organizer_core::errors::Result;
use tokio::sync::RwLock;
use tracing::info;

pub mod application;
pub mod error_handler;
pub mod logger;

pub use application::Application;
pub use error_handler::{ErrorEntry, ErrorSeverity, ErrorStatistics, UnifiedErrorHandler};
pub use logger::{LoggerConfig, UnifiedLogger};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging setup
    pub logger: LoggerConfig,

    /// Engine settings
    pub manager: TabManagerConfig,
}

impl AppConfig {
    /// Parse a JSON configuration; missing keys keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(tab_organizer_core::SystemError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(tab_organizer_core::SystemError::from)?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<()> {
        let invalid = |details: &str| -> Result<()> {
            Err(tab_organizer_core::SystemError::Configuration {
                details: details.to_string(),
            }
            .into())
        };
        if self.manager.command_prefix.is_empty() {
            return invalid("command_prefix must not be empty");
        }
        if self.manager.suspended_url_limit <= tab_manager::SUSPENDED_URL_PREFIX.len() {
            return invalid("suspended_url_limit leaves no room for a page");
        }
        if self.manager.favicon_size == 0 {
            return invalid("favicon_size must be at least 1");
        }
        Ok(())
    }
}

/// Application context that holds all initialized components
pub struct AppContext {
    /// Browser windowing system
    pub host: Arc<dyn WindowHost>,

    /// Organizer engine
    pub tab_manager: Arc<TabManager>,

    /// Unified error handler
    pub error_handler: Arc<UnifiedErrorHandler>,

    /// Application configuration
    pub config: Arc<RwLock<AppConfig>>,
}

impl AppContext {
    /// Create a new application context on top of a window host
    pub fn new(config: AppConfig, host: Arc<dyn WindowHost>) -> Self {
        info!("Initializing application context");

        let tab_manager = Arc::new(TabManager::with_config(host.clone(), config.manager.clone()));
        let error_handler = Arc::new(UnifiedErrorHandler::new());
        let config = Arc::new(RwLock::new(config));

        info!("Application context initialized successfully");

        Self {
            host,
            tab_manager,
            error_handler,
            config,
        }
    }

    /// Tab and window counts
    pub async fn get_stats(&self) -> Result<TabStats> {
        self.tab_manager.update_stats().await
    }
}
