//! In-memory window host
//!
//! A self-contained [`WindowHost`] that keeps windows and tab strips in
//! process. It follows the Chromium tabs API closely enough to drive the
//! organizer end to end: windows that lose their last tab are closed,
//! every window keeps exactly one active tab, and new windows take focus.

use crate::traits::WindowHost;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tab_organizer_core::*;
use tokio::sync::RwLock;
use tracing::debug;

/// Record of the calls the host received
#[derive(Debug, Clone, Default)]
pub struct HostCallLog {
    pub tab_queries: usize,
    pub window_queries: usize,
    pub moves: Vec<(Vec<TabId>, MoveTarget)>,
    pub updates: Vec<(TabId, TabUpdate)>,
    pub created_windows: Vec<WindowId>,
    pub favicon_fetches: usize,
}

impl HostCallLog {
    /// Number of mutation requests (moves, updates and window creations)
    pub fn mutation_count(&self) -> usize {
        self.moves.len() + self.updates.len() + self.created_windows.len()
    }
}

#[derive(Debug)]
struct WindowState {
    window: Window,
    tabs: Vec<Tab>,
}

#[derive(Debug, Default)]
struct HostState {
    windows: Vec<WindowState>,
    focused: Option<WindowId>,
    next_window_id: i64,
    next_tab_id: i64,
    favicons: HashMap<String, Vec<u8>>,
    calls: HostCallLog,
}

impl HostState {
    fn window_mut(&mut self, window_id: WindowId) -> Result<&mut WindowState> {
        self.windows
            .iter_mut()
            .find(|w| w.window.id == window_id)
            .ok_or_else(|| HostError::WindowNotFound { window_id }.into())
    }

    fn find_tab(&self, tab_id: TabId) -> Option<&Tab> {
        self.windows
            .iter()
            .flat_map(|w| w.tabs.iter())
            .find(|t| t.id == tab_id)
    }

    fn find_tab_mut(&mut self, tab_id: TabId) -> Result<&mut Tab> {
        self.windows
            .iter_mut()
            .flat_map(|w| w.tabs.iter_mut())
            .find(|t| t.id == tab_id)
            .ok_or_else(|| HostError::TabNotFound { tab_id }.into())
    }

    fn take_tab(&mut self, tab_id: TabId) -> Result<Tab> {
        for state in &mut self.windows {
            if let Some(pos) = state.tabs.iter().position(|t| t.id == tab_id) {
                return Ok(state.tabs.remove(pos));
            }
        }
        Err(HostError::TabNotFound { tab_id }.into())
    }

    fn add_window(&mut self, window_type: WindowType) -> WindowId {
        self.next_window_id += 1;
        let id = WindowId(self.next_window_id);
        self.windows.push(WindowState {
            window: Window {
                id,
                focused: false,
                window_type,
            },
            tabs: Vec::new(),
        });
        self.focus(id);
        id
    }

    fn focus(&mut self, window_id: WindowId) {
        self.focused = Some(window_id);
        for state in &mut self.windows {
            state.window.focused = state.window.id == window_id;
        }
    }

    /// Re-index tab strips, close empty windows, keep one active tab per window
    fn settle(&mut self) {
        self.windows.retain(|w| !w.tabs.is_empty());

        for state in &mut self.windows {
            let window_id = state.window.id;
            let mut seen_active = false;
            for (index, tab) in state.tabs.iter_mut().enumerate() {
                tab.index = index;
                tab.window_id = window_id;
                if tab.active {
                    if seen_active {
                        tab.active = false;
                    }
                    seen_active = true;
                }
            }
            if !seen_active {
                if let Some(first) = state.tabs.first_mut() {
                    first.active = true;
                    first.highlighted = true;
                }
            }
        }

        let focus_alive = self
            .focused
            .map(|id| self.windows.iter().any(|w| w.window.id == id))
            .unwrap_or(false);
        if !focus_alive {
            match self.windows.last().map(|w| w.window.id) {
                Some(id) => self.focus(id),
                None => self.focused = None,
            }
        }
    }
}

/// Window host backed by process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryWindowHost {
    state: Arc<RwLock<HostState>>,
}

impl InMemoryWindowHost {
    /// Create an empty host with no windows
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new window; it becomes the focused window.
    ///
    /// The window is closed again by the next mutation if no tab is added.
    pub async fn add_window(&self, window_type: WindowType) -> WindowId {
        self.state.write().await.add_window(window_type)
    }

    /// Append a tab to a window. The first tab of a window becomes active.
    pub async fn add_tab(&self, window_id: WindowId, url: &str, title: &str) -> Result<TabId> {
        let mut state = self.state.write().await;
        state.next_tab_id += 1;
        let tab_id = TabId(state.next_tab_id);
        let window = state.window_mut(window_id)?;
        let mut tab = Tab::new(tab_id, window_id, url, title);
        tab.index = window.tabs.len();
        if window.tabs.is_empty() {
            tab.active = true;
            tab.highlighted = true;
        }
        window.tabs.push(tab);
        Ok(tab_id)
    }

    /// Change raw tab state, bypassing the call log
    pub async fn edit_tab<F>(&self, tab_id: TabId, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Tab) + Send,
    {
        let mut state = self.state.write().await;
        edit(state.find_tab_mut(tab_id)?);
        state.settle();
        Ok(())
    }

    /// Focus a window
    pub async fn focus_window(&self, window_id: WindowId) -> Result<()> {
        let mut state = self.state.write().await;
        state.window_mut(window_id)?;
        state.focus(window_id);
        Ok(())
    }

    /// Register the cached favicon of a page
    pub async fn set_favicon(&self, page_url: &str, bytes: Vec<u8>) {
        self.state
            .write()
            .await
            .favicons
            .insert(page_url.to_string(), bytes);
    }

    /// Snapshot of a tab
    pub async fn tab(&self, tab_id: TabId) -> Option<Tab> {
        self.state.read().await.find_tab(tab_id).cloned()
    }

    /// Snapshot of a window's tab strip, in order
    pub async fn tabs_in(&self, window_id: WindowId) -> Vec<Tab> {
        self.state
            .read()
            .await
            .windows
            .iter()
            .find(|w| w.window.id == window_id)
            .map(|w| w.tabs.clone())
            .unwrap_or_default()
    }

    /// Ids of all open windows, in creation order
    pub async fn window_ids(&self) -> Vec<WindowId> {
        self.state
            .read()
            .await
            .windows
            .iter()
            .map(|w| w.window.id)
            .collect()
    }

    /// Calls received so far
    pub async fn calls(&self) -> HostCallLog {
        self.state.read().await.calls.clone()
    }

    /// Forget recorded calls
    pub async fn reset_calls(&self) {
        self.state.write().await.calls = HostCallLog::default();
    }
}

#[async_trait]
impl WindowHost for InMemoryWindowHost {
    async fn query_tabs(&self, query: &TabQuery) -> Result<Vec<Tab>> {
        let mut state = self.state.write().await;
        state.calls.tab_queries += 1;
        let focused = state.focused;
        Ok(state
            .windows
            .iter()
            .flat_map(|w| w.tabs.iter())
            .filter(|t| query.matches(t, focused))
            .cloned()
            .collect())
    }

    async fn query_windows(&self, query: &WindowQuery) -> Result<Vec<Window>> {
        let mut state = self.state.write().await;
        state.calls.window_queries += 1;
        Ok(state
            .windows
            .iter()
            .map(|w| w.window.clone())
            .filter(|w| query.matches(w))
            .collect())
    }

    async fn move_tabs(&self, tab_ids: &[TabId], target: MoveTarget) -> Result<()> {
        let mut state = self.state.write().await;
        state.calls.moves.push((tab_ids.to_vec(), target));
        let Some(first) = tab_ids.first() else {
            return Ok(());
        };

        let target_window = match target.window_id {
            Some(window_id) => window_id,
            None => {
                state
                    .find_tab(*first)
                    .ok_or(HostError::TabNotFound { tab_id: *first })?
                    .window_id
            }
        };
        state.window_mut(target_window)?;

        // validate the whole batch before any tab leaves its window
        let mut seen = HashSet::with_capacity(tab_ids.len());
        for tab_id in tab_ids {
            if state.find_tab(*tab_id).is_none() {
                return Err(HostError::TabNotFound { tab_id: *tab_id }.into());
            }
            if !seen.insert(*tab_id) {
                return Err(HostError::MutationFailed {
                    operation: "move".to_string(),
                    reason: format!("{} listed twice", tab_id),
                }
                .into());
            }
        }

        let mut moving = Vec::with_capacity(tab_ids.len());
        for tab_id in tab_ids {
            let mut tab = state.take_tab(*tab_id)?;
            if tab.window_id != target_window {
                tab.active = false;
                tab.highlighted = false;
            }
            moving.push(tab);
        }

        let window = state.window_mut(target_window)?;
        let at = match target.position {
            TabPosition::End => window.tabs.len(),
            TabPosition::Index(index) => index.min(window.tabs.len()),
        };
        window.tabs.splice(at..at, moving);

        debug!("Moved {} tab(s) to {}", tab_ids.len(), target_window);
        state.settle();
        Ok(())
    }

    async fn update_tab(&self, tab_id: TabId, update: &TabUpdate) -> Result<()> {
        let mut state = self.state.write().await;
        state.calls.updates.push((tab_id, update.clone()));

        let window_id = state
            .find_tab(tab_id)
            .ok_or(HostError::TabNotFound { tab_id })?
            .window_id;

        if update.active == Some(true) {
            for tab in &mut state.window_mut(window_id)?.tabs {
                tab.active = false;
            }
        }

        let tab = state.find_tab_mut(tab_id)?;
        if let Some(url) = &update.url {
            tab.url = url.clone();
        }
        if let Some(highlighted) = update.highlighted {
            tab.highlighted = highlighted;
        }
        if let Some(active) = update.active {
            tab.active = active;
            if active {
                tab.highlighted = true;
            }
        }

        state.settle();
        Ok(())
    }

    async fn create_window(&self, seed_tab: TabId) -> Result<WindowId> {
        let mut state = self.state.write().await;
        let mut tab = state.take_tab(seed_tab)?;
        let window_id = state.add_window(WindowType::Normal);
        state.calls.created_windows.push(window_id);

        tab.active = true;
        tab.highlighted = true;
        state.window_mut(window_id)?.tabs.push(tab);
        state.settle();
        Ok(window_id)
    }

    async fn fetch_favicon(&self, page_url: &str) -> Result<Option<Vec<u8>>> {
        let mut state = self.state.write().await;
        state.calls.favicon_fetches += 1;
        Ok(state.favicons.get(page_url).cloned())
    }
}
