//! In-memory session state: the ordered list of proverbs.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;

/// List of the proverbs being written.
///
/// This is the state shape shared with clients. No validation is applied
/// to individual entries; empty strings and duplicates are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProverbsState {
    /// The list of already written proverbs, in display order.
    #[serde(default)]
    pub proverbs: Vec<String>,
}

impl ProverbsState {
    /// Wraps a list of proverbs.
    #[must_use]
    pub fn new(proverbs: Vec<String>) -> Self {
        Self { proverbs }
    }
}

/// Mutable session container, one per running process.
///
/// Every method takes the lock only for the in-memory step and returns
/// an owned copy, so no lock is ever held across database I/O.
#[derive(Debug, Default)]
pub struct SessionState {
    inner: RwLock<ProverbsState>,
}

impl SessionState {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current proverbs.
    pub async fn proverbs(&self) -> Vec<String> {
        self.inner.read().await.proverbs.clone()
    }

    /// Appends `items` after the existing proverbs and returns the result.
    pub async fn append(&self, items: Vec<String>) -> ProverbsState {
        let mut state = self.inner.write().await;
        state.proverbs.extend(items);
        state.clone()
    }

    /// Replaces all proverbs with `items` and returns the result.
    pub async fn replace(&self, items: Vec<String>) -> ProverbsState {
        let mut state = self.inner.write().await;
        state.proverbs = items;
        state.clone()
    }

    /// Seeds the session from storage, returning how many items were loaded.
    pub async fn hydrate(&self, items: Vec<String>) -> usize {
        let count = items.len();
        self.inner.write().await.proverbs = items;
        count
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn starts_empty() {
        let session = SessionState::new();
        assert!(session.proverbs().await.is_empty());
    }

    #[tokio::test]
    async fn append_preserves_both_orders() {
        let session = SessionState::new();
        session.append(owned(&["a", "b"])).await;
        let state = session.append(owned(&["c", "a"])).await;
        assert_eq!(state.proverbs, owned(&["a", "b", "c", "a"]));
    }

    #[tokio::test]
    async fn replace_discards_previous() {
        let session = SessionState::new();
        session.append(owned(&["a", "b"])).await;
        let state = session.replace(owned(&["c"])).await;
        assert_eq!(state.proverbs, owned(&["c"]));
        assert_eq!(session.proverbs().await, state.proverbs);
    }

    #[tokio::test]
    async fn hydrate_reports_count() {
        let session = SessionState::new();
        assert_eq!(session.hydrate(owned(&["P1", "P2"])).await, 2);
        assert_eq!(session.proverbs().await, owned(&["P1", "P2"]));
    }

    #[test]
    fn state_deserializes_without_field() {
        let Ok(state) = serde_json::from_str::<ProverbsState>("{}") else {
            panic!("missing proverbs field should default");
        };
        assert!(state.proverbs.is_empty());
    }
}
