//! Tab Comparator
//!
//! Orders tabs by host and title. Tabs of one configured site (Goodreads
//! by default) are instead ranked by the figure in their title: the total
//! of a paged listing ("1-30 of 1,234)") or a shelf size ("(1,234 books)").
//!
//! The ordering is computed from a [`SortKey`] per tab, so it is a total
//! preorder even when site tabs and other tabs are mixed: site tabs form
//! one block positioned by the site's host name. Site tabs with the same
//! figure keep their current order.

use crate::url_parts;
use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;
use tab_organizer_core::Tab;

static RANGE_OF_TOTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\d,]+)-[\d,]+ of ([\d,]+)\)").expect("range pattern compiles"));

static COUNT_IN_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([\d,]+) books?\)").expect("count pattern compiles"));

/// Case-folded text followed by the raw text as tie breaker
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct CollationKey {
    folded: String,
    raw: String,
}

impl CollationKey {
    fn new(text: String) -> Self {
        Self {
            folded: text.to_lowercase(),
            raw: text,
        }
    }
}

/// Precomputed sort position of a tab
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    group: CollationKey,
    affinity: u64,
}

/// Comparator for the sort operation
#[derive(Debug, Clone)]
pub struct TabComparator {
    affinity_site: String,
    sentinel: u64,
}

impl TabComparator {
    pub fn new(affinity_site: impl Into<String>, sentinel: u64) -> Self {
        Self {
            affinity_site: affinity_site.into(),
            sentinel,
        }
    }

    /// Sort position of a tab
    pub fn sort_key(&self, tab: &Tab) -> SortKey {
        let host = url_parts::resolved_host(&tab.url);

        if !self.affinity_site.is_empty() && host.starts_with(&self.affinity_site) {
            SortKey {
                group: CollationKey::new(self.affinity_site.clone()),
                affinity: self.affinity(&tab.title),
            }
        } else {
            SortKey {
                group: CollationKey::new(format!("{}{}", host, tab.title)),
                affinity: 0,
            }
        }
    }

    /// Figure a site title is ranked by; titles without one rank last
    pub fn affinity(&self, title: &str) -> u64 {
        let figure = RANGE_OF_TOTAL
            .captures(title)
            .and_then(|c| c.get(2))
            .or_else(|| COUNT_IN_PARENS.captures(title).and_then(|c| c.get(1)));

        figure
            .and_then(|m| m.as_str().replace(',', "").parse().ok())
            .unwrap_or(self.sentinel)
    }

    pub fn compare(&self, a: &Tab, b: &Tab) -> Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }

    /// Stable sort, computing each key once
    pub fn sort(&self, tabs: &mut [Tab]) {
        tabs.sort_by_cached_key(|tab| self.sort_key(tab));
    }
}

impl Default for TabComparator {
    fn default() -> Self {
        Self::new("www.goodreads.com", 1_000_000)
    }
}
