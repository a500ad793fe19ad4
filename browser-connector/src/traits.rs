//! Window host traits

use tab_organizer_core::*;
use async_trait::async_trait;

/// The host windowing system the organizer drives.
///
/// Implementations wrap a browser's windows/tabs API. Every call is
/// asynchronous and fallible; the organizer never retries.
#[async_trait]
pub trait WindowHost: Send + Sync {
    /// Tabs matching the query, ordered by window then tab strip index
    async fn query_tabs(&self, query: &TabQuery) -> Result<Vec<Tab>>;

    /// Windows matching the query
    async fn query_windows(&self, query: &WindowQuery) -> Result<Vec<Window>>;

    /// Move tabs, in the given order, to a window position
    async fn move_tabs(&self, tab_ids: &[TabId], target: MoveTarget) -> Result<()>;

    /// Change tab properties
    async fn update_tab(&self, tab_id: TabId, update: &TabUpdate) -> Result<()>;

    /// Create a new window seeded with an existing tab
    async fn create_window(&self, seed_tab: TabId) -> Result<WindowId>;

    /// Raw favicon bytes for a page, served from the host's local cache.
    ///
    /// Must never hit the network. `None` when the host has no icon.
    async fn fetch_favicon(&self, page_url: &str) -> Result<Option<Vec<u8>>>;
}
