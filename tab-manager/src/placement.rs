//! Placement Heuristic
//!
//! Suggests the window a tab belongs in: the one holding the most other
//! tabs of the same host.

use crate::url_parts;
use std::collections::HashMap;
use std::hash::Hash;
use tab_organizer_core::{Tab, WindowId};

/// Most frequent value; among equally frequent values the one seen first wins
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Copy + Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    let mut order = Vec::new();
    for value in values {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for value in order {
        let count = counts[&value];
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Window with the most tabs sharing `tab`'s host.
///
/// `None` when no other tab has that host, or when the best window is the
/// one `tab` is already in.
pub fn suggest_window(tab: &Tab, all_tabs: &[Tab]) -> Option<WindowId> {
    let host = url_parts::resolved_host(&tab.url);
    let suggested = mode(
        all_tabs
            .iter()
            .filter(|other| other.id != tab.id && url_parts::resolved_host(&other.url) == host)
            .map(|other| other.window_id),
    )?;
    (suggested != tab.window_id).then_some(suggested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tab_organizer_core::TabId;

    fn tab(id: i64, window: i64, host: &str) -> Tab {
        Tab::new(TabId(id), WindowId(window), format!("https://{}/page", host), "x")
    }

    #[test]
    fn test_mode_prefers_first_seen_on_tie() {
        assert_eq!(mode(vec![3, 2, 2, 3]), Some(3));
        assert_eq!(mode(vec![1, 2, 2]), Some(2));
        assert_eq!(mode(Vec::<i32>::new()), None);
    }

    #[test]
    fn test_suggests_most_common_window() {
        let all = vec![tab(1, 1, "a"), tab(2, 1, "a"), tab(3, 2, "a"), tab(4, 3, "b")];
        let new_tab = tab(5, 3, "a");
        assert_eq!(suggest_window(&new_tab, &all), Some(WindowId(1)));
    }

    #[test]
    fn test_no_other_tab_with_host() {
        let all = vec![tab(1, 1, "a"), tab(2, 2, "b")];
        assert_eq!(suggest_window(&tab(3, 2, "c"), &all), None);
    }

    #[test]
    fn test_already_in_best_window() {
        let all = vec![tab(1, 1, "a"), tab(2, 1, "a"), tab(3, 2, "a")];
        assert_eq!(suggest_window(&all[0], &all), None);
    }

    #[test]
    fn test_tab_itself_is_not_counted() {
        // without itself, window 2 holds the only other "a" tab
        let all = vec![tab(1, 1, "a"), tab(2, 2, "a")];
        assert_eq!(suggest_window(&all[0], &all), Some(WindowId(2)));
    }
}
