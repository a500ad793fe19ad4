//! Tab search across windows
//!
//! A dry search only reports matches; a full search additionally makes the
//! browser's tab selection mirror the result in every window.

use crate::matcher::SearchQuery;
use browser_connector::WindowHost;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tab_organizer_core::*;
use tracing::debug;

/// Matching tabs, current window first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub tabs: Vec<Tab>,
    /// Number of windows holding at least one match
    pub matching_windows: usize,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn contains(&self, tab_id: TabId) -> bool {
        self.tabs.iter().any(|t| t.id == tab_id)
    }
}

/// Filter per-window tab lists with a query.
///
/// Matches of the focused window come first, other windows keep their
/// given order.
pub fn collect_matches<I>(query: &SearchQuery, windows: I) -> SearchResult
where
    I: IntoIterator<Item = (Window, Vec<Tab>)>,
{
    let mut focused = Vec::new();
    let mut others = Vec::new();
    let mut matching_windows = 0;

    for (window, tabs) in windows {
        let hits: Vec<Tab> = tabs.into_iter().filter(|t| query.matches(t)).collect();
        if hits.is_empty() {
            continue;
        }
        matching_windows += 1;
        if window.focused {
            focused.extend(hits);
        } else {
            others.extend(hits);
        }
    }

    focused.extend(others);
    SearchResult {
        tabs: focused,
        matching_windows,
    }
}

/// Highlight changes that make `tabs` mirror `result`.
///
/// Only tabs whose highlight state differs are listed.
pub fn highlight_changes(tabs: &[Tab], result: &SearchResult) -> Vec<(TabId, bool)> {
    let matched: HashSet<TabId> = result.tabs.iter().map(|t| t.id).collect();
    tabs.iter()
        .filter_map(|t| {
            let wanted = matched.contains(&t.id);
            (t.highlighted != wanted).then_some((t.id, wanted))
        })
        .collect()
}

/// Query every normal window and collect the matching tabs.
///
/// The per-window queries run concurrently; the result is assembled once
/// all of them finished, including when there are no windows at all.
pub async fn dry_search(host: &dyn WindowHost, query: &SearchQuery) -> Result<SearchResult> {
    let windows = host.query_windows(&WindowQuery::normal()).await?;
    let per_window = try_join_all(windows.into_iter().map(|window| async move {
        let tabs = host.query_tabs(&TabQuery::in_window(window.id)).await?;
        Ok::<_, TabOrganizerError>((window, tabs))
    }))
    .await?;

    let result = collect_matches(query, per_window);
    debug!(
        "Search matched {} tab(s) in {} window(s)",
        result.tabs.len(),
        result.matching_windows
    );
    Ok(result)
}

/// Dry search, then highlight exactly the matching tabs in all windows
pub async fn search(host: &dyn WindowHost, query: &SearchQuery) -> Result<SearchResult> {
    let result = dry_search(host, query).await?;
    let tabs = host.query_tabs(&TabQuery::all()).await?;
    for (tab_id, highlighted) in highlight_changes(&tabs, &result) {
        host.update_tab(tab_id, &TabUpdate::highlighted(highlighted)).await?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(id: i64, focused: bool) -> Window {
        Window {
            id: WindowId(id),
            focused,
            window_type: WindowType::Normal,
        }
    }

    fn tab(id: i64, window: i64, title: &str) -> Tab {
        Tab::new(TabId(id), WindowId(window), "https://example.com/", title)
    }

    fn query(keyword: &str) -> SearchQuery {
        SearchQuery::parse(keyword, ":")
    }

    #[test]
    fn test_focused_window_first() {
        let result = collect_matches(
            &query("rust"),
            vec![
                (window(1, false), vec![tab(1, 1, "Rust news"), tab(2, 1, "Cooking")]),
                (window(2, true), vec![tab(3, 2, "rust-lang.org")]),
                (window(3, false), vec![tab(4, 3, "Gardening")]),
            ],
        );
        let ids: Vec<_> = result.tabs.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(result.matching_windows, 2);
    }

    #[test]
    fn test_no_windows() {
        let result = collect_matches(&query("x"), Vec::new());
        assert_eq!(result, SearchResult::default());
    }

    #[test]
    fn test_highlight_changes_only_differences() {
        let mut already = tab(1, 1, "Rust");
        already.highlighted = true;
        let mut stale = tab(2, 1, "Go");
        stale.highlighted = true;
        let fresh = tab(3, 1, "Rustacean");
        let untouched = tab(4, 1, "Python");

        let tabs = vec![already.clone(), stale, fresh.clone(), untouched];
        let result = SearchResult {
            tabs: vec![already, fresh],
            matching_windows: 1,
        };
        assert_eq!(
            highlight_changes(&tabs, &result),
            vec![(TabId(2), false), (TabId(3), true)]
        );
    }
}
