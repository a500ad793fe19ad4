//! Tab Manager for the tab organizer
//!
//! This crate holds the organizer engine: everything that decides how tabs
//! are arranged, independent of the browser that hosts them.
//!
//! # Features
//! - Sorting by host and title, with numeric ordering for Goodreads listings
//! - Splitting a window at the active tab, at its center, or by selection
//! - Merging windows one after another through a merge session
//! - Moving tabs to the window that holds most tabs of the same host
//! - Suspending tabs into self-contained `data:` pages
//! - Searching tabs by pattern, language or audio, mirrored into the selection

pub mod command;
pub mod comparator;
pub mod config;
pub mod language;
pub mod manager;
pub mod matcher;
pub mod placement;
pub mod search;
pub mod session;
pub mod suspension;
pub mod url_parts;

pub use command::TabCommand;
pub use comparator::{SortKey, TabComparator};
pub use config::TabManagerConfig;
pub use language::is_german;
pub use manager::{TabManager, TabStats};
pub use matcher::SearchQuery;
pub use search::SearchResult;
pub use session::{
    MergeSession, MergeSessionState, MergeStep, ObserverList, SessionObserver, SplitSessionState,
    SubscriptionId,
};
pub use suspension::{SkipReason, SuspendOutcome, SuspensionCodec};
pub use url_parts::{UrlParts, UrlResolver, SUSPENDED_URL_PREFIX};

// Re-export commonly used types
pub use tab_organizer_core::*;
