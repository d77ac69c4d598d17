//! Idempotent creation of the `proverbs` table.

use sqlx::PgConnection;

use crate::error::AgentError;

/// DDL for the backing table. Safe to run against an existing table.
pub const CREATE_PROVERBS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS proverbs (
    id SERIAL PRIMARY KEY,
    text TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMP NOT NULL DEFAULT NOW()
)";

/// Ensures the `proverbs` table exists on the given connection.
///
/// Unlike the repository, this propagates failures: a schema that cannot
/// be created means the pool is unusable.
///
/// # Errors
///
/// Returns [`AgentError::Storage`] if the statement fails.
pub async fn ensure_schema(conn: &mut PgConnection) -> Result<(), AgentError> {
    sqlx::query(CREATE_PROVERBS_TABLE).execute(&mut *conn).await?;
    tracing::debug!("proverbs schema ensured");
    Ok(())
}
