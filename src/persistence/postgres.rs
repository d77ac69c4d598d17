//! PostgreSQL implementation of [`ProverbStore`].

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::Connection;

use super::models::ProverbRow;
use super::pool::ConnectionManager;
use super::store::{PersistOutcome, ProverbStore};
use crate::error::AgentError;

/// PostgreSQL-backed proverb repository.
///
/// Each call checks out its own connection from the shared
/// [`ConnectionManager`], so the pool is built lazily by whichever call
/// comes first.
#[derive(Debug, Clone)]
pub struct ProverbRepository {
    connections: Arc<ConnectionManager>,
}

impl ProverbRepository {
    /// Creates a repository over the given connection manager.
    #[must_use]
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self { connections }
    }

    /// Loads every row, ordered by insertion time.
    ///
    /// Rows inserted by one statement share `created_at`, so `id` breaks
    /// the tie.
    ///
    /// # Errors
    ///
    /// Returns an [`AgentError`] if no connection can be acquired or the
    /// query fails.
    pub async fn fetch_rows(&self) -> Result<Vec<ProverbRow>, AgentError> {
        let mut conn = self.connections.acquire().await?;
        let rows = sqlx::query_as::<_, ProverbRow>(
            "SELECT id, text, created_at, updated_at FROM proverbs \
             ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&mut *conn)
        .await;
        self.connections.release(conn);
        Ok(rows?)
    }

    /// Deletes all rows, then bulk-inserts `items` preserving their order.
    ///
    /// Both statements run in one transaction: readers never see the
    /// emptied table, and a failure mid-way leaves the previous rows.
    ///
    /// # Errors
    ///
    /// Returns an [`AgentError`] on connection or statement failure.
    pub async fn try_replace_all(&self, items: &[String]) -> Result<u64, AgentError> {
        let mut conn = self.connections.acquire().await?;
        let result = async {
            let mut tx = conn.begin().await?;
            sqlx::query("DELETE FROM proverbs")
                .execute(&mut *tx)
                .await?;

            let mut inserted = 0;
            if !items.is_empty() {
                inserted = sqlx::query(
                    "INSERT INTO proverbs (text) \
                     SELECT item FROM UNNEST($1::text[]) WITH ORDINALITY AS t(item, position) \
                     ORDER BY position",
                )
                .bind(items)
                .execute(&mut *tx)
                .await?
                .rows_affected();
            }
            tx.commit().await?;
            Ok::<u64, sqlx::Error>(inserted)
        }
        .await;
        self.connections.release(conn);
        Ok(result?)
    }

    /// Deletes every row whose text equals `text`.
    ///
    /// # Errors
    ///
    /// Returns an [`AgentError`] on connection or statement failure.
    pub async fn try_delete_one(&self, text: &str) -> Result<u64, AgentError> {
        let mut conn = self.connections.acquire().await?;
        let result = sqlx::query("DELETE FROM proverbs WHERE text = $1")
            .bind(text)
            .execute(&mut *conn)
            .await;
        self.connections.release(conn);
        Ok(result?.rows_affected())
    }
}

#[async_trait]
impl ProverbStore for ProverbRepository {
    async fn get_all(&self) -> Vec<String> {
        match self.fetch_rows().await {
            Ok(rows) => rows.into_iter().map(|row| row.text).collect(),
            Err(err) => {
                tracing::error!(error = %err, "database error getting proverbs");
                Vec::new()
            }
        }
    }

    async fn replace_all(&self, items: &[String]) -> PersistOutcome {
        match self.try_replace_all(items).await {
            Ok(rows) => {
                tracing::debug!(rows, "proverbs mirrored to database");
                PersistOutcome::Persisted { rows }
            }
            Err(err) => {
                tracing::error!(error = %err, "database error saving proverbs");
                PersistOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    async fn delete_one(&self, text: &str) -> PersistOutcome {
        match self.try_delete_one(text).await {
            Ok(rows) => PersistOutcome::Persisted { rows },
            Err(err) => {
                tracing::error!(error = %err, "database error deleting proverb");
                PersistOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }
}
