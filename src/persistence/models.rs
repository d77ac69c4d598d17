//! Database models for persisted proverbs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A stored row from the `proverbs` table.
///
/// Only `text` flows back into session state; the identifier and
/// timestamps exist for ordering and inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProverbRow {
    /// Generated surrogate key.
    pub id: i32,
    /// Proverb text.
    pub text: String,
    /// Insertion timestamp (server default `NOW()`).
    pub created_at: NaiveDateTime,
    /// Last update timestamp (server default `NOW()`).
    pub updated_at: NaiveDateTime,
}
