//! Split and merge sessions
//!
//! A merge session stages one window; the next trigger from another window
//! pulls the staged window's tabs into it and stages that window instead,
//! so windows can be folded together one after another. Triggering twice
//! from the staged window ends the session.
//!
//! The split session keeps no state of its own: it is `highlighted` while
//! the current window has a multi-tab selection to split off.
//!
//! Observers are called in registration order, synchronously.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tab_organizer_core::{Tab, WindowId};
use tokio::sync::RwLock;

/// Display state of the merge session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeSessionState {
    /// No window staged
    Default,
    /// The current window is staged; triggering again cancels
    Cancelable,
    /// Another window is staged; triggering merges it into the current one
    Awaiting,
}

impl MergeSessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Cancelable => "cancelable",
            Self::Awaiting => "awaiting",
        }
    }
}

impl fmt::Display for MergeSessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display state of the split session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitSessionState {
    Default,
    /// Two or more tabs of the current window are highlighted
    Highlighted,
}

impl SplitSessionState {
    /// Derive the state from the tabs of the current window.
    ///
    /// The active tab always counts as highlighted, so a selection needs
    /// at least two highlighted tabs.
    pub fn from_tabs(tabs: &[Tab]) -> Self {
        if tabs.iter().filter(|t| t.highlighted).count() > 1 {
            Self::Highlighted
        } else {
            Self::Default
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Highlighted => "highlighted",
        }
    }
}

impl fmt::Display for SplitSessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a merge trigger has to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStep {
    /// The staged window was the current one; the session ended
    Cancelled,
    /// The current window was staged, nothing to move yet
    Staged(WindowId),
    /// Move the tabs of `staged` to the end of `into`; `into` is now staged
    Merge { staged: WindowId, into: WindowId },
}

/// Merge session state machine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSession {
    pending: Option<WindowId>,
}

impl MergeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The staged window, if a session is running
    pub fn pending(&self) -> Option<WindowId> {
        self.pending
    }

    /// Handle a merge trigger issued from `current`
    pub fn advance(&mut self, current: WindowId) -> MergeStep {
        match self.pending {
            Some(staged) if staged == current => {
                self.pending = None;
                MergeStep::Cancelled
            }
            None => {
                self.pending = Some(current);
                MergeStep::Staged(current)
            }
            Some(staged) => {
                self.pending = Some(current);
                MergeStep::Merge { staged, into: current }
            }
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Display state as seen from the current window
    pub fn state_for(&self, current: Option<WindowId>) -> MergeSessionState {
        match self.pending {
            None => MergeSessionState::Default,
            Some(staged) if Some(staged) == current => MergeSessionState::Cancelable,
            Some(_) => MergeSessionState::Awaiting,
        }
    }
}

/// Receiver of session state changes
pub trait SessionObserver<S>: Send + Sync {
    fn notify(&self, state: S);
}

impl<S, F> SessionObserver<S> for F
where
    F: Fn(S) + Send + Sync,
{
    fn notify(&self, state: S) {
        self(state)
    }
}

/// Handle returned on registration, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct ObserverEntries<S> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Arc<dyn SessionObserver<S>>)>,
}

/// Ordered set of observers for one kind of session state
pub struct ObserverList<S> {
    inner: RwLock<ObserverEntries<S>>,
}

impl<S: Copy> ObserverList<S> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ObserverEntries {
                next_id: 0,
                entries: Vec::new(),
            }),
        }
    }

    /// Register an observer at the end of the dispatch order
    pub async fn subscribe(&self, observer: Arc<dyn SessionObserver<S>>) -> SubscriptionId {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.entries.push((id, observer));
        id
    }

    /// Remove an observer; returns whether it was registered
    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.write().await;
        let before = inner.entries.len();
        inner.entries.retain(|(entry_id, _)| *entry_id != id);
        inner.entries.len() != before
    }

    /// Deliver a state to every observer in registration order
    pub async fn notify_all(&self, state: S) {
        for (_, observer) in self.inner.read().await.entries.iter() {
            observer.notify(state);
        }
    }

    /// Deliver a state to one observer only
    pub async fn notify_one(&self, id: SubscriptionId, state: S) {
        let inner = self.inner.read().await;
        if let Some((_, observer)) = inner.entries.iter().find(|(entry_id, _)| *entry_id == id) {
            observer.notify(state);
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<S: Copy> Default for ObserverList<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tab_organizer_core::TabId;

    #[test]
    fn test_merge_toggle_cancels() {
        let mut session = MergeSession::new();
        assert_eq!(session.advance(WindowId(1)), MergeStep::Staged(WindowId(1)));
        assert_eq!(session.state_for(Some(WindowId(1))), MergeSessionState::Cancelable);
        assert_eq!(session.advance(WindowId(1)), MergeStep::Cancelled);
        assert_eq!(session.pending(), None);
        assert_eq!(session.state_for(Some(WindowId(1))), MergeSessionState::Default);
    }

    #[test]
    fn test_merge_chain_restages_current() {
        let mut session = MergeSession::new();
        session.advance(WindowId(1));
        assert_eq!(session.state_for(Some(WindowId(2))), MergeSessionState::Awaiting);
        assert_eq!(
            session.advance(WindowId(2)),
            MergeStep::Merge { staged: WindowId(1), into: WindowId(2) }
        );
        assert_eq!(session.pending(), Some(WindowId(2)));
        assert_eq!(
            session.advance(WindowId(3)),
            MergeStep::Merge { staged: WindowId(2), into: WindowId(3) }
        );
    }

    #[test]
    fn test_cancel_clears_pending() {
        let mut session = MergeSession::new();
        session.advance(WindowId(4));
        session.cancel();
        assert_eq!(session.state_for(None), MergeSessionState::Default);
    }

    #[test]
    fn test_split_state_needs_two_highlighted() {
        let mut tabs: Vec<Tab> = (1..=3)
            .map(|i| Tab::new(TabId(i), WindowId(1), "https://example.com/", "x"))
            .collect();
        tabs[0].highlighted = true;
        assert_eq!(SplitSessionState::from_tabs(&tabs), SplitSessionState::Default);
        tabs[2].highlighted = true;
        assert_eq!(SplitSessionState::from_tabs(&tabs), SplitSessionState::Highlighted);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(MergeSessionState::Cancelable.to_string(), "cancelable");
        assert_eq!(SplitSessionState::Highlighted.as_str(), "highlighted");
        assert_eq!(
            serde_json::to_string(&MergeSessionState::Awaiting).unwrap(),
            "\"awaiting\""
        );
    }

    #[tokio::test]
    async fn test_observers_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let observers: ObserverList<SplitSessionState> = ObserverList::new();
        for name in ["first", "second"] {
            let log = log.clone();
            observers
                .subscribe(Arc::new(move |state: SplitSessionState| {
                    log.lock().unwrap().push(format!("{}:{}", name, state));
                }))
                .await;
        }

        observers.notify_all(SplitSessionState::Highlighted).await;
        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:highlighted", "second:highlighted"]
        );
    }

    #[tokio::test]
    async fn test_unsubscribe() {
        let hits = Arc::new(Mutex::new(0));
        let observers: ObserverList<MergeSessionState> = ObserverList::new();
        let counter = hits.clone();
        let id = observers
            .subscribe(Arc::new(move |_: MergeSessionState| *counter.lock().unwrap() += 1))
            .await;

        observers.notify_one(id, MergeSessionState::Default).await;
        assert!(observers.unsubscribe(id).await);
        observers.notify_all(MergeSessionState::Default).await;

        assert_eq!(*hits.lock().unwrap(), 1);
        assert!(observers.is_empty().await);
        assert!(!observers.unsubscribe(id).await);
    }
}
