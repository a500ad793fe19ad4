//! Tab Manager
//!
//! The main interface of the organizer. It drives a [`WindowHost`] to sort,
//! split, merge, relocate, suspend and search tabs, and tracks the split and
//! merge sessions for whatever UI observes them.
//!
//! Operations on the merge session are serialized by the session lock; all
//! other operations run against whatever the host reports at call time, so
//! overlapping calls resolve last-write-wins.

use crate::command::TabCommand;
use crate::comparator::TabComparator;
use crate::config::TabManagerConfig;
use crate::matcher::SearchQuery;
use crate::placement;
use crate::search::{self, SearchResult};
use crate::session::{
    MergeSession, MergeSessionState, MergeStep, ObserverList, SessionObserver, SplitSessionState,
    SubscriptionId,
};
use crate::suspension::{SuspendOutcome, SuspensionCodec};
use browser_connector::WindowHost;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tab_organizer_core::*;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Tab and window counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStats {
    /// Tabs in all windows
    pub tab_count: usize,
    /// Normal windows
    pub window_count: usize,
}

impl fmt::Display for TabStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} in {} {}",
            self.tab_count,
            if self.tab_count == 1 { "Tab" } else { "Tabs" },
            self.window_count,
            if self.window_count == 1 { "Window" } else { "Windows" },
        )
    }
}

/// Tab Manager
pub struct TabManager {
    config: TabManagerConfig,
    host: Arc<dyn WindowHost>,
    comparator: TabComparator,
    codec: SuspensionCodec,
    merge_session: Mutex<MergeSession>,
    merge_observers: ObserverList<MergeSessionState>,
    split_observers: ObserverList<SplitSessionState>,
}

impl TabManager {
    /// Create a new Tab Manager with default configuration
    pub fn new(host: Arc<dyn WindowHost>) -> Self {
        Self::with_config(host, TabManagerConfig::default())
    }

    /// Create a new Tab Manager with custom configuration
    pub fn with_config(host: Arc<dyn WindowHost>, config: TabManagerConfig) -> Self {
        Self {
            comparator: TabComparator::new(config.affinity_site.clone(), config.affinity_sentinel),
            codec: SuspensionCodec::new(&config),
            config,
            host,
            merge_session: Mutex::new(MergeSession::new()),
            merge_observers: ObserverList::new(),
            split_observers: ObserverList::new(),
        }
    }

    /// Get the current configuration
    pub fn config(&self) -> &TabManagerConfig {
        &self.config
    }

    pub fn host(&self) -> &Arc<dyn WindowHost> {
        &self.host
    }

    pub fn comparator(&self) -> &TabComparator {
        &self.comparator
    }

    pub fn codec(&self) -> &SuspensionCodec {
        &self.codec
    }

    async fn current_tabs(&self) -> Result<Vec<Tab>> {
        self.host.query_tabs(&TabQuery::current_window()).await
    }

    /// The last focused window, taken from its tabs
    async fn current_window(&self) -> Result<Option<WindowId>> {
        Ok(self.current_tabs().await?.first().map(|t| t.window_id))
    }

    async fn active_tab(&self) -> Result<Option<Tab>> {
        let tabs = self.host.query_tabs(&TabQuery::current_window().active(true)).await?;
        Ok(tabs.into_iter().next())
    }

    // ------------------------------ Sorting -------------------------------

    /// Reorder the current window by host and title
    pub async fn sort(&self) -> Result<()> {
        let mut tabs = self.current_tabs().await?;
        if tabs.len() < 2 {
            return Ok(());
        }
        self.comparator.sort(&mut tabs);
        let ids: Vec<TabId> = tabs.iter().map(|t| t.id).collect();
        self.host.move_tabs(&ids, MoveTarget::in_place(0)).await?;
        info!("Sorted {} tab(s) in {}", ids.len(), tabs[0].window_id);
        Ok(())
    }

    // ------------------------------ Splitting -----------------------------

    /// Move `selected` into a new window seeded with the first of them
    async fn split_off(&self, selected: &[TabId]) -> Result<Option<WindowId>> {
        let Some((first, rest)) = selected.split_first() else {
            return Ok(None);
        };
        let window_id = self.host.create_window(*first).await?;
        if !rest.is_empty() {
            self.host.move_tabs(rest, MoveTarget::end_of(window_id)).await?;
        }
        info!("Split {} tab(s) into {}", selected.len(), window_id);
        Ok(Some(window_id))
    }

    /// Split the current window left of its active tab
    pub async fn split_at_tab(&self) -> Result<Option<WindowId>> {
        let tabs = self.current_tabs().await?;
        let Some(at) = tabs.iter().find(|t| t.active).map(|t| t.index) else {
            return Ok(None);
        };
        let created = self.split_at_index(&tabs, at).await?;
        self.notify_split(None).await?;
        Ok(created)
    }

    /// Split the current window in the middle of its tab strip
    pub async fn split_at_center(&self) -> Result<Option<WindowId>> {
        let tabs = self.current_tabs().await?;
        let at = (tabs.len() + 1) / 2;
        let created = self.split_at_index(&tabs, at).await?;
        self.notify_split(None).await?;
        Ok(created)
    }

    async fn split_at_index(&self, tabs: &[Tab], at: usize) -> Result<Option<WindowId>> {
        // splitting before the first tab would only recreate the window
        if at == 0 || at >= tabs.len() {
            debug!("Nothing to split at index {} of {} tab(s)", at, tabs.len());
            return Ok(None);
        }
        let selected: Vec<TabId> = tabs.iter().filter(|t| t.index >= at).map(|t| t.id).collect();
        self.split_off(&selected).await
    }

    /// Move the highlighted tabs of the current window into a new window
    pub async fn split_highlighted(&self) -> Result<Option<WindowId>> {
        let tabs = self
            .host
            .query_tabs(&TabQuery::current_window().highlighted(true))
            .await?;
        let selected: Vec<TabId> = tabs.iter().map(|t| t.id).collect();
        let created = self.split_off(&selected).await?;
        self.notify_split(Some(SplitSessionState::Default)).await?;
        Ok(created)
    }

    /// Register a split session observer; it immediately receives the current state
    pub async fn add_split_session_listener(
        &self,
        observer: Arc<dyn SessionObserver<SplitSessionState>>,
    ) -> Result<SubscriptionId> {
        let id = self.split_observers.subscribe(observer).await;
        let state = self.split_state().await?;
        self.split_observers.notify_one(id, state).await;
        Ok(id)
    }

    pub async fn remove_split_session_listener(&self, id: SubscriptionId) -> bool {
        self.split_observers.unsubscribe(id).await
    }

    /// Split session state derived from the current window
    pub async fn split_state(&self) -> Result<SplitSessionState> {
        Ok(SplitSessionState::from_tabs(&self.current_tabs().await?))
    }

    async fn notify_split(&self, state: Option<SplitSessionState>) -> Result<()> {
        let state = match state {
            Some(state) => state,
            None => self.split_state().await?,
        };
        self.split_observers.notify_all(state).await;
        Ok(())
    }

    // ------------------------------ Merging -------------------------------

    /// Stage the current window for merging, or merge the staged window
    /// into the current one and stage the current window instead.
    ///
    /// Triggering from the staged window ends the session.
    pub async fn merge_next(&self) -> Result<MergeStep> {
        let mut session = self.merge_session.lock().await;
        let current = self.current_window().await?.ok_or(HostError::NoFocusedWindow)?;

        // commit only once the host accepted the move
        let mut next = session.clone();
        let step = next.advance(current);
        if let MergeStep::Merge { staged, into } = step {
            let tabs = self.host.query_tabs(&TabQuery::in_window(staged)).await?;
            let ids: Vec<TabId> = tabs.iter().map(|t| t.id).collect();
            if !ids.is_empty() {
                self.host.move_tabs(&ids, MoveTarget::end_of(into)).await?;
            }
            info!("Merged {} tab(s) of {} into {}", ids.len(), staged, into);
        }
        *session = next;
        drop(session);

        debug!("Merge session step: {:?}", step);
        let state = match step {
            MergeStep::Cancelled => MergeSessionState::Default,
            MergeStep::Staged(_) | MergeStep::Merge { .. } => MergeSessionState::Cancelable,
        };
        self.merge_observers.notify_all(state).await;
        Ok(step)
    }

    /// End the merge session
    pub async fn cancel_merge(&self) {
        self.merge_session.lock().await.cancel();
        debug!("Merge session cancelled");
        self.merge_observers.notify_all(MergeSessionState::Default).await;
    }

    /// Merge session state as seen from the current window
    pub async fn merge_state(&self) -> Result<MergeSessionState> {
        let current = self.current_window().await?;
        Ok(self.merge_session.lock().await.state_for(current))
    }

    /// Register a merge session observer; it immediately receives the current state
    pub async fn add_merge_session_listener(
        &self,
        observer: Arc<dyn SessionObserver<MergeSessionState>>,
    ) -> Result<SubscriptionId> {
        let id = self.merge_observers.subscribe(observer).await;
        let state = self.merge_state().await?;
        self.merge_observers.notify_one(id, state).await;
        Ok(id)
    }

    pub async fn remove_merge_session_listener(&self, id: SubscriptionId) -> bool {
        self.merge_observers.unsubscribe(id).await
    }

    // --------------------------- Better windows ---------------------------

    /// Window `tab` would be moved to, if any
    pub async fn suggest_window(&self, tab: &Tab) -> Result<Option<WindowId>> {
        let all = self.host.query_tabs(&TabQuery::all()).await?;
        Ok(placement::suggest_window(tab, &all))
    }

    /// Move tabs to the windows holding most tabs of the same host.
    ///
    /// `None` processes the tabs of the current window. Returns the number
    /// of tabs moved.
    pub async fn move_tabs_to_better_windows(&self, tabs: Option<Vec<Tab>>) -> Result<usize> {
        let tabs = match tabs {
            Some(tabs) => tabs,
            None => self.current_tabs().await?,
        };
        let all = self.host.query_tabs(&TabQuery::all()).await?;

        let mut moved = 0;
        for tab in &tabs {
            let Some(window_id) = placement::suggest_window(tab, &all) else {
                continue;
            };
            match self.host.move_tabs(&[tab.id], MoveTarget::end_of(window_id)).await {
                Ok(()) => {
                    debug!("Moved {} to better window {}", tab.id, window_id);
                    moved += 1;
                }
                // an earlier move in this pass emptied and closed the target
                Err(TabOrganizerError::Host { source: HostError::WindowNotFound { .. } }) => {
                    warn!("Leaving {} in place: {} has closed", tab.id, window_id);
                }
                Err(e) => return Err(e),
            }
        }
        info!("Moved {} of {} tab(s) to better windows", moved, tabs.len());
        Ok(moved)
    }

    // ------------------------------ Suspension ----------------------------

    /// Replace a tab's page with a lightweight suspended page
    pub async fn suspend_tab(&self, tab: &Tab) -> Result<SuspendOutcome> {
        if let Some(reason) = self.codec.skip_reason(&tab.url) {
            debug!("Not suspending {}: {:?}", tab.id, reason);
            return Ok(SuspendOutcome::Skipped(reason));
        }

        let favicon = match self.host.fetch_favicon(&tab.url).await? {
            Some(bytes) => match self.codec.render_favicon(&tab.url, &bytes) {
                Ok(data_url) => Some(data_url),
                Err(e) => {
                    warn!("Suspending {} without icon: {}", tab.id, e);
                    None
                }
            },
            None => None,
        };

        let outcome = self.codec.encode(&tab.url, &tab.title, favicon.as_deref());
        if let SuspendOutcome::Suspended(url) = &outcome {
            debug_assert!(
                url.len() <= self.codec.url_limit(),
                "suspended URL must not exceed {} chars",
                self.codec.url_limit()
            );
            self.host.update_tab(tab.id, &TabUpdate::url(url.clone())).await?;
            debug!("Suspended {} ({} chars)", tab.id, url.len());
        }
        Ok(outcome)
    }

    /// Suspend every tab of the current window that is not playing sound
    pub async fn suspend_tabs(&self) -> Result<Vec<SuspendOutcome>> {
        let tabs = self.current_tabs().await?;
        let outcomes = try_join_all(
            tabs.iter()
                .filter(|t| !t.audible)
                .map(|t| self.suspend_tab(t)),
        )
        .await?;
        let suspended = outcomes
            .iter()
            .filter(|o| matches!(o, SuspendOutcome::Suspended(_)))
            .count();
        info!("Suspended {} of {} tab(s)", suspended, tabs.len());
        Ok(outcomes)
    }

    /// Suspend the active tab of the current window
    pub async fn suspend_active_tab(&self) -> Result<Option<SuspendOutcome>> {
        match self.active_tab().await? {
            Some(tab) => Ok(Some(self.suspend_tab(&tab).await?)),
            None => Ok(None),
        }
    }

    /// Move the active tab to a better window, then suspend it
    pub async fn move_active_tab_to_better_window(&self) -> Result<Option<SuspendOutcome>> {
        let Some(tab) = self.active_tab().await? else {
            return Ok(None);
        };
        self.move_tabs_to_better_windows(Some(vec![tab.clone()])).await?;
        Ok(Some(self.suspend_tab(&tab).await?))
    }

    // ------------------------------ Searching -----------------------------

    /// Parse a keyword with the configured command prefix
    pub fn parse_query(&self, keyword: &str) -> SearchQuery {
        SearchQuery::parse(keyword, &self.config.command_prefix)
    }

    pub fn matches(&self, keyword: &str, tab: &Tab) -> bool {
        self.parse_query(keyword).matches(tab)
    }

    /// Matching tabs of all normal windows, current window first
    pub async fn dry_search(&self, keyword: &str) -> Result<SearchResult> {
        search::dry_search(self.host.as_ref(), &self.parse_query(keyword)).await
    }

    /// Highlight exactly the matching tabs in every window
    pub async fn search(&self, keyword: &str) -> Result<SearchResult> {
        let result = search::search(self.host.as_ref(), &self.parse_query(keyword)).await?;
        self.notify_split(None).await?;
        Ok(result)
    }

    // ------------------------------ Statistics ----------------------------

    pub async fn update_stats(&self) -> Result<TabStats> {
        let windows = self.host.query_windows(&WindowQuery::normal()).await?;
        let tabs = self.host.query_tabs(&TabQuery::all()).await?;
        Ok(TabStats {
            tab_count: tabs.len(),
            window_count: windows.len(),
        })
    }

    // ------------------------------ Commands ------------------------------

    /// Run a named command
    pub async fn execute(&self, command: TabCommand) -> Result<()> {
        debug!("Executing command {}", command);
        match command {
            TabCommand::MergeNext => {
                self.merge_next().await?;
            }
            TabCommand::CancelMerge => self.cancel_merge().await,
            TabCommand::SplitAtTab => {
                self.split_at_tab().await?;
            }
            TabCommand::SplitAtCenter => {
                self.split_at_center().await?;
            }
            TabCommand::SplitHighlighted => {
                self.split_highlighted().await?;
            }
            TabCommand::Sort => self.sort().await?,
            TabCommand::SuspendTab => {
                self.suspend_active_tab().await?;
            }
            TabCommand::SuspendTabs => {
                self.suspend_tabs().await?;
            }
            TabCommand::MoveTabToBetterWindow => {
                self.move_active_tab_to_better_window().await?;
            }
            TabCommand::MoveTabsToBetterWindows => {
                self.move_tabs_to_better_windows(None).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use browser_connector::InMemoryWindowHost;
    use std::sync::Mutex as StdMutex;

    async fn setup(windows: &[&[(&str, &str)]]) -> (TabManager, InMemoryWindowHost, Vec<WindowId>) {
        let host = InMemoryWindowHost::new();
        let mut ids = Vec::new();
        for tabs in windows {
            let window = host.add_window(WindowType::Normal).await;
            for (url, title) in tabs.iter() {
                host.add_tab(window, url, title).await.unwrap();
            }
            ids.push(window);
        }
        let manager = TabManager::new(Arc::new(host.clone()));
        (manager, host, ids)
    }

    fn titles(tabs: &[Tab]) -> Vec<String> {
        tabs.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_stats_display() {
        let one = TabStats { tab_count: 1, window_count: 1 };
        let many = TabStats { tab_count: 12, window_count: 3 };
        assert_eq!(one.to_string(), "1 Tab in 1 Window");
        assert_eq!(many.to_string(), "12 Tabs in 3 Windows");
    }

    #[tokio::test]
    async fn test_sort_current_window() {
        let (manager, host, windows) = setup(&[&[
            ("https://zeit.de/", "Z"),
            ("https://github.com/", "B"),
            ("https://github.com/x", "A"),
        ]])
        .await;
        manager.sort().await.unwrap();
        assert_eq!(titles(&host.tabs_in(windows[0]).await), vec!["A", "B", "Z"]);
        assert_eq!(host.calls().await.moves.len(), 1);
    }

    #[tokio::test]
    async fn test_split_at_center() {
        let (manager, host, windows) = setup(&[&[
            ("https://a.com/", "1"),
            ("https://a.com/", "2"),
            ("https://a.com/", "3"),
            ("https://a.com/", "4"),
            ("https://a.com/", "5"),
        ]])
        .await;
        let created = manager.split_at_center().await.unwrap().unwrap();
        assert_eq!(titles(&host.tabs_in(windows[0]).await), vec!["1", "2", "3"]);
        assert_eq!(titles(&host.tabs_in(created).await), vec!["4", "5"]);
    }

    #[tokio::test]
    async fn test_split_at_active_tab() {
        let (manager, host, windows) = setup(&[&[
            ("https://a.com/", "1"),
            ("https://a.com/", "2"),
            ("https://a.com/", "3"),
        ]])
        .await;
        let second = host.tabs_in(windows[0]).await[1].id;
        host.update_tab(second, &TabUpdate::activate()).await.unwrap();

        let created = manager.split_at_tab().await.unwrap().unwrap();
        assert_eq!(titles(&host.tabs_in(windows[0]).await), vec!["1"]);
        assert_eq!(titles(&host.tabs_in(created).await), vec!["2", "3"]);
    }

    #[tokio::test]
    async fn test_split_single_tab_is_noop() {
        let (manager, host, _) = setup(&[&[("https://a.com/", "1")]]).await;
        assert_eq!(manager.split_at_center().await.unwrap(), None);
        assert!(host.calls().await.created_windows.is_empty());
    }

    #[tokio::test]
    async fn test_split_highlighted_notifies_default() {
        let (manager, host, windows) = setup(&[&[
            ("https://a.com/", "1"),
            ("https://a.com/", "2"),
            ("https://a.com/", "3"),
        ]])
        .await;
        let third = host.tabs_in(windows[0]).await[2].id;
        host.edit_tab(third, |t| t.highlighted = true).await.unwrap();

        let states = Arc::new(StdMutex::new(Vec::new()));
        let sink = states.clone();
        manager
            .add_split_session_listener(Arc::new(move |s: SplitSessionState| sink.lock().unwrap().push(s)))
            .await
            .unwrap();

        let created = manager.split_highlighted().await.unwrap().unwrap();
        assert_eq!(titles(&host.tabs_in(created).await), vec!["1", "3"]);
        assert_eq!(
            *states.lock().unwrap(),
            vec![SplitSessionState::Highlighted, SplitSessionState::Default]
        );
    }

    #[tokio::test]
    async fn test_merge_twice_in_same_window_cancels() {
        let (manager, _host, _) = setup(&[&[("https://a.com/", "1")], &[("https://b.com/", "2")]]).await;
        assert!(matches!(manager.merge_next().await.unwrap(), MergeStep::Staged(_)));
        assert_eq!(manager.merge_state().await.unwrap(), MergeSessionState::Cancelable);
        assert_eq!(manager.merge_next().await.unwrap(), MergeStep::Cancelled);
        assert_eq!(manager.merge_state().await.unwrap(), MergeSessionState::Default);
    }

    #[tokio::test]
    async fn test_merge_chain() {
        let (manager, host, windows) = setup(&[
            &[("https://a.com/", "a1"), ("https://a.com/", "a2")],
            &[("https://b.com/", "b1")],
        ])
        .await;
        host.focus_window(windows[0]).await.unwrap();
        manager.merge_next().await.unwrap();

        host.focus_window(windows[1]).await.unwrap();
        assert_eq!(manager.merge_state().await.unwrap(), MergeSessionState::Awaiting);

        let step = manager.merge_next().await.unwrap();
        assert_eq!(step, MergeStep::Merge { staged: windows[0], into: windows[1] });
        assert_eq!(titles(&host.tabs_in(windows[1]).await), vec!["b1", "a1", "a2"]);
        assert_eq!(host.window_ids().await, vec![windows[1]]);
        assert_eq!(manager.merge_state().await.unwrap(), MergeSessionState::Cancelable);
    }

    #[tokio::test]
    async fn test_merge_listener_replays_state() {
        let (manager, _host, _) = setup(&[&[("https://a.com/", "1")]]).await;
        manager.merge_next().await.unwrap();

        let states = Arc::new(StdMutex::new(Vec::new()));
        let sink = states.clone();
        manager
            .add_merge_session_listener(Arc::new(move |s: MergeSessionState| sink.lock().unwrap().push(s)))
            .await
            .unwrap();
        manager.cancel_merge().await;

        assert_eq!(
            *states.lock().unwrap(),
            vec![MergeSessionState::Cancelable, MergeSessionState::Default]
        );
    }

    #[tokio::test]
    async fn test_better_window_pass_survives_closed_target() {
        let (manager, host, windows) = setup(&[
            &[("https://a.com/x", "x"), ("https://c.com/1", "c1")],
            &[("https://a.com/1", "a1"), ("https://a.com/2", "a2")],
            &[("https://c.com/2", "c2"), ("https://d.com/", "d")],
        ])
        .await;
        let mut pass = Vec::new();
        for title in ["c1", "x", "c2"] {
            let all = host.query_tabs(&TabQuery::all()).await.unwrap();
            pass.push(all.into_iter().find(|t| t.title == title).unwrap());
        }

        // c2 is pointed at the first window, which closes once c1 and x leave it
        let moved = manager.move_tabs_to_better_windows(Some(pass)).await.unwrap();

        assert_eq!(moved, 2);
        assert_eq!(host.window_ids().await, vec![windows[1], windows[2]]);
        assert_eq!(titles(&host.tabs_in(windows[1]).await), vec!["a1", "a2", "x"]);
        assert_eq!(titles(&host.tabs_in(windows[2]).await), vec!["c2", "d", "c1"]);
    }

    #[tokio::test]
    async fn test_move_tabs_to_better_windows() {
        let (manager, host, windows) = setup(&[
            &[("https://a.com/1", "a1"), ("https://a.com/2", "a2")],
            &[("https://b.com/", "b1"), ("https://a.com/3", "a3")],
        ])
        .await;
        let moved = manager.move_tabs_to_better_windows(None).await.unwrap();
        assert_eq!(moved, 1);
        assert_eq!(titles(&host.tabs_in(windows[0]).await), vec!["a1", "a2", "a3"]);
        assert_eq!(titles(&host.tabs_in(windows[1]).await), vec!["b1"]);
    }

    #[tokio::test]
    async fn test_suspend_skips_audible_and_excluded() {
        let (manager, host, windows) = setup(&[&[
            ("https://a.com/", "A"),
            ("chrome://settings", "Settings"),
            ("https://music.example/", "Radio"),
        ]])
        .await;
        let radio = host.tabs_in(windows[0]).await[2].id;
        host.edit_tab(radio, |t| t.audible = true).await.unwrap();

        let outcomes = manager.suspend_tabs().await.unwrap();
        assert_eq!(outcomes.len(), 2);

        let tabs = host.tabs_in(windows[0]).await;
        assert!(SuspensionCodec::is_suspended(&tabs[0].url));
        assert_eq!(tabs[1].url, "chrome://settings");
        assert_eq!(tabs[2].url, "https://music.example/");
        assert_eq!(crate::url_parts::resolved_host(&tabs[0].url), "a.com");
    }

    #[tokio::test]
    async fn test_command_dispatch() {
        let (manager, host, windows) = setup(&[&[("https://b.com/", "B"), ("https://a.com/", "A")]]).await;
        manager.execute("sort".parse().unwrap()).await.unwrap();
        assert_eq!(titles(&host.tabs_in(windows[0]).await), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_stats() {
        let (manager, _host, _) = setup(&[
            &[("https://a.com/", "1"), ("https://a.com/", "2")],
            &[("https://b.com/", "3")],
        ])
        .await;
        let stats = manager.update_stats().await.unwrap();
        assert_eq!(stats, TabStats { tab_count: 3, window_count: 2 });
    }
}
