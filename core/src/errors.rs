use thiserror::Error;
use crate::types::{TabId, WindowId};

/// Errors reported by the host windowing system
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Window not found: {window_id}")]
    WindowNotFound { window_id: WindowId },

    #[error("Tab not found: {tab_id}")]
    TabNotFound { tab_id: TabId },

    #[error("No focused window")]
    NoFocusedWindow,

    #[error("Query failed: {reason}")]
    QueryFailed { reason: String },

    #[error("Mutation failed: {operation}: {reason}")]
    MutationFailed { operation: String, reason: String },
}

/// Favicon rendering errors
///
/// Kept apart from [`TabOrganizerError`]: a favicon that cannot be
/// rendered leaves the suspended page without an icon.
#[derive(Debug, Error)]
pub enum SuspensionError {
    #[error("Favicon decode failed for {page_url}: {reason}")]
    FaviconDecodeFailed { page_url: String, reason: String },

    #[error("Favicon encode failed: {reason}")]
    FaviconEncodeFailed { reason: String },
}

/// General system errors
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Configuration error: {details}")]
    Configuration { details: String },

    #[error("IO error: {source}")]
    IO {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("Unknown command: {command}")]
    UnknownCommand { command: String },
}

/// Main error type for the tab organizer
#[derive(Debug, Error)]
pub enum TabOrganizerError {
    #[error("Host error: {source}")]
    Host {
        #[from]
        source: HostError,
    },

    #[error("System error: {source}")]
    System {
        #[from]
        source: SystemError,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TabOrganizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_converts() {
        let err: TabOrganizerError = HostError::TabNotFound { tab_id: TabId(4) }.into();
        assert_eq!(err.to_string(), "Host error: Tab not found: tab#4");
    }

    #[test]
    fn test_serde_error_converts_to_system() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: TabOrganizerError = SystemError::from(parse).into();
        assert!(matches!(err, TabOrganizerError::System { .. }));
    }
}
