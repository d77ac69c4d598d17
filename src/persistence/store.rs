//! Storage seam between session operations and the database.

use async_trait::async_trait;

/// Result of a best-effort write against the mirror table.
///
/// Writes never surface as errors; the caller decides how loudly to
/// report a [`PersistOutcome::Failed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The statement(s) completed.
    Persisted {
        /// Rows inserted or deleted.
        rows: u64,
    },
    /// The write had no durable effect.
    Failed {
        /// Human-readable failure cause.
        reason: String,
    },
}

impl PersistOutcome {
    /// Returns `true` for [`PersistOutcome::Persisted`].
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted { .. })
    }
}

/// Best-effort proverb storage.
///
/// Implementations catch and log every storage failure: reads degrade to
/// an empty list and writes report [`PersistOutcome::Failed`].
#[async_trait]
pub trait ProverbStore: Send + Sync + std::fmt::Debug {
    /// Returns all stored proverbs, oldest first. Empty on failure.
    async fn get_all(&self) -> Vec<String>;

    /// Deletes every stored proverb, then inserts `items` in order.
    async fn replace_all(&self, items: &[String]) -> PersistOutcome;

    /// Deletes every stored proverb whose text equals `text` exactly.
    async fn delete_one(&self, text: &str) -> PersistOutcome;
}
