/// Main application module
///
/// Provides the high-level API a browser front end binds its shortcuts,
/// menu entries and popup to.

use crate::{AppConfig, AppContext, UnifiedLogger};
use browser_connector::WindowHost;
use std::sync::Arc;
use tab_manager::{
    MergeSessionState, SearchResult, SessionObserver, SplitSessionState, SubscriptionId,
    TabCommand, TabStats,
};
use tab_organizer_core::errors::Result;
use tracing::{debug, info};

/// Main application
pub struct Application {
    /// Application context
    context: Arc<AppContext>,
}

impl Application {
    /// Create and initialize a new application.
    ///
    /// Installs the global logger unless one is already in place.
    pub async fn new(config: AppConfig, host: Arc<dyn WindowHost>) -> Result<Self> {
        if let Err(e) = UnifiedLogger::init(config.logger.clone()) {
            debug!("Keeping existing logger: {}", e);
        }

        info!("Starting tab organizer");

        let context = Arc::new(AppContext::new(config, host));

        info!("Application initialized successfully");

        Ok(Self { context })
    }

    /// Get application context
    pub fn context(&self) -> &Arc<AppContext> {
        &self.context
    }

    /// Run a command by name, as bound to a shortcut or menu entry.
    ///
    /// Failures are recorded with the error handler before being returned.
    pub async fn handle_command(&self, name: &str) -> Result<()> {
        let result = match name.parse::<TabCommand>() {
            Ok(command) => self.context.tab_manager.execute(command).await,
            Err(e) => Err(e.into()),
        };
        self.track(result, name).await
    }

    /// Run a command
    pub async fn run_command(&self, command: TabCommand) -> Result<()> {
        let result = self.context.tab_manager.execute(command).await;
        self.track(result, command.name()).await
    }

    async fn track<T>(&self, result: Result<T>, context: &str) -> Result<T> {
        if let Err(e) = &result {
            self.context.error_handler.handle_error(e, context).await;
        }
        result
    }

    // High-level API methods

    /// Highlight the tabs matching a keyword
    pub async fn search(&self, keyword: &str) -> Result<SearchResult> {
        let result = self.context.tab_manager.search(keyword).await;
        self.track(result, "search").await
    }

    /// Tabs matching a keyword, leaving the selection alone
    pub async fn dry_search(&self, keyword: &str) -> Result<SearchResult> {
        let result = self.context.tab_manager.dry_search(keyword).await;
        self.track(result, "drySearch").await
    }

    /// Get application statistics
    pub async fn get_stats(&self) -> Result<TabStats> {
        let result = self.context.get_stats().await;
        self.track(result, "updateStats").await
    }

    /// Subscribe to merge session changes
    pub async fn on_merge_session(
        &self,
        observer: Arc<dyn SessionObserver<MergeSessionState>>,
    ) -> Result<SubscriptionId> {
        self.context.tab_manager.add_merge_session_listener(observer).await
    }

    /// Subscribe to split session changes
    pub async fn on_split_session(
        &self,
        observer: Arc<dyn SessionObserver<SplitSessionState>>,
    ) -> Result<SubscriptionId> {
        self.context.tab_manager.add_split_session_listener(observer).await
    }

    /// Errors recorded so far
    pub async fn recent_errors(&self) -> Vec<crate::ErrorEntry> {
        self.context.error_handler.get_recent_errors().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use browser_connector::InMemoryWindowHost;
    use tab_organizer_core::errors::TabOrganizerError;

    #[tokio::test]
    async fn test_application_creation() {
        let app = Application::new(AppConfig::default(), Arc::new(InMemoryWindowHost::new())).await;
        assert!(app.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_command_is_recorded() {
        let app = Application::new(AppConfig::default(), Arc::new(InMemoryWindowHost::new()))
            .await
            .unwrap();

        let err = app.handle_command("explode").await.unwrap_err();
        assert!(matches!(err, TabOrganizerError::System { .. }));

        let errors = app.recent_errors().await;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].context, "explode");
    }

    #[tokio::test]
    async fn test_merge_without_windows_fails() {
        let app = Application::new(AppConfig::default(), Arc::new(InMemoryWindowHost::new()))
            .await
            .unwrap();
        assert!(app.run_command(TabCommand::MergeNext).await.is_err());
        assert_eq!(app.context().error_handler.get_error_stats().await.info, 1);
    }
}
