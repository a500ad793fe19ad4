//! Tab and window model shared by every crate of the tab organizer.
//!
//! Tabs and windows are owned by the host windowing system. The organizer
//! only reads them through queries and asks for mutations through the
//! descriptors defined here ([`MoveTarget`], [`TabUpdate`]).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-assigned tab identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TabId(pub i64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

/// Host-assigned window identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(pub i64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// A browser tab as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub window_id: WindowId,
    pub url: String,
    pub title: String,
    pub favicon_url: Option<String>,
    /// The tab is currently playing sound
    pub audible: bool,
    /// Part of the window's tab selection (the active tab is always highlighted)
    pub highlighted: bool,
    pub active: bool,
    /// Zero-based position inside its window's tab strip
    pub index: usize,
}

impl Tab {
    /// Create a plain, inactive tab
    pub fn new(id: TabId, window_id: WindowId, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            window_id,
            url: url.into(),
            title: title.into(),
            favicon_url: None,
            audible: false,
            highlighted: false,
            active: false,
            index: 0,
        }
    }
}

/// Kind of a browser window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WindowType {
    #[default]
    Normal,
    Popup,
    Panel,
    App,
    DevTools,
}

/// A browser window as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub id: WindowId,
    /// The window the user interacted with last
    pub focused: bool,
    pub window_type: WindowType,
}

/// Predicate for tab queries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabQuery {
    /// Restrict to one window
    pub window_id: Option<WindowId>,
    /// Restrict to the last focused window
    pub last_focused_window: bool,
    pub highlighted: Option<bool>,
    pub active: Option<bool>,
}

impl TabQuery {
    /// Every tab of every window
    pub fn all() -> Self {
        Self::default()
    }

    /// Tabs of the last focused window
    pub fn current_window() -> Self {
        Self {
            last_focused_window: true,
            ..Default::default()
        }
    }

    /// Tabs of the given window
    pub fn in_window(window_id: WindowId) -> Self {
        Self {
            window_id: Some(window_id),
            ..Default::default()
        }
    }

    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = Some(highlighted);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Check a tab against this predicate.
    ///
    /// `focused_window` is the host's last focused window, needed to
    /// evaluate [`TabQuery::last_focused_window`].
    pub fn matches(&self, tab: &Tab, focused_window: Option<WindowId>) -> bool {
        if let Some(window_id) = self.window_id {
            if tab.window_id != window_id {
                return false;
            }
        }
        if self.last_focused_window && focused_window != Some(tab.window_id) {
            return false;
        }
        if let Some(highlighted) = self.highlighted {
            if tab.highlighted != highlighted {
                return false;
            }
        }
        if let Some(active) = self.active {
            if tab.active != active {
                return false;
            }
        }
        true
    }
}

/// Predicate for window queries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowQuery {
    /// Empty means every window type
    pub window_types: Vec<WindowType>,
    /// Ask the host to attach tabs (unused by the organizer, kept for host parity)
    pub populate: bool,
}

impl WindowQuery {
    /// Normal browser windows only, without tabs attached
    pub fn normal() -> Self {
        Self {
            window_types: vec![WindowType::Normal],
            populate: false,
        }
    }

    pub fn matches(&self, window: &Window) -> bool {
        self.window_types.is_empty() || self.window_types.contains(&window.window_type)
    }
}

/// Where moved tabs are inserted inside the target tab strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabPosition {
    /// Append after the last tab
    End,
    /// Insert starting at this index
    Index(usize),
}

/// Destination of a tab move request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTarget {
    /// `None` keeps each tab in the window of the first moved tab
    pub window_id: Option<WindowId>,
    pub position: TabPosition,
}

impl MoveTarget {
    /// Append to the end of the given window
    pub fn end_of(window_id: WindowId) -> Self {
        Self {
            window_id: Some(window_id),
            position: TabPosition::End,
        }
    }

    /// Reorder inside the current window starting at `index`
    pub fn in_place(index: usize) -> Self {
        Self {
            window_id: None,
            position: TabPosition::Index(index),
        }
    }
}

/// Requested tab property changes; `None` leaves a property untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabUpdate {
    pub url: Option<String>,
    pub highlighted: Option<bool>,
    pub active: Option<bool>,
}

impl TabUpdate {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn highlighted(highlighted: bool) -> Self {
        Self {
            highlighted: Some(highlighted),
            ..Default::default()
        }
    }

    pub fn activate() -> Self {
        Self {
            active: Some(true),
            highlighted: Some(true),
            ..Default::default()
        }
    }
}
