//! Named commands, as bound to keyboard shortcuts and menu entries

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tab_organizer_core::SystemError;

/// An operation a user can trigger by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TabCommand {
    MergeNext,
    CancelMerge,
    SplitAtTab,
    SplitAtCenter,
    SplitHighlighted,
    Sort,
    /// Suspend the active tab of the current window
    SuspendTab,
    /// Suspend every silent tab of the current window
    SuspendTabs,
    /// Move the active tab to a better window, then suspend it
    MoveTabToBetterWindow,
    MoveTabsToBetterWindows,
}

impl TabCommand {
    pub const ALL: [TabCommand; 10] = [
        Self::MergeNext,
        Self::CancelMerge,
        Self::SplitAtTab,
        Self::SplitAtCenter,
        Self::SplitHighlighted,
        Self::Sort,
        Self::SuspendTab,
        Self::SuspendTabs,
        Self::MoveTabToBetterWindow,
        Self::MoveTabsToBetterWindows,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::MergeNext => "mergeNext",
            Self::CancelMerge => "cancelMerge",
            Self::SplitAtTab => "splitAtTab",
            Self::SplitAtCenter => "splitAtCenter",
            Self::SplitHighlighted => "splitHighlighted",
            Self::Sort => "sort",
            Self::SuspendTab => "suspendTab",
            Self::SuspendTabs => "suspendTabs",
            Self::MoveTabToBetterWindow => "moveTabToBetterWindow",
            Self::MoveTabsToBetterWindows => "moveTabsToBetterWindows",
        }
    }
}

impl fmt::Display for TabCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TabCommand {
    type Err = SystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|command| command.name() == s)
            .ok_or_else(|| SystemError::UnknownCommand {
                command: s.to_string(),
            })
    }
}
