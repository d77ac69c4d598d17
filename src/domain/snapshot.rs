//! State snapshot events sent to clients after each mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ProverbsState;

/// Event type discriminator, serialized in `SCREAMING_SNAKE_CASE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Full replacement of client-side state.
    StateSnapshot,
}

/// Point-in-time copy of the session, forwarded to clients verbatim.
///
/// ```json
/// { "type": "STATE_SNAPSHOT", "snapshot": { "proverbs": ["..."] }, "timestamp": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StateSnapshotEvent {
    /// Always [`EventType::StateSnapshot`].
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Full session state after the mutation.
    pub snapshot: ProverbsState,
    /// Time the snapshot was taken.
    pub timestamp: DateTime<Utc>,
}

impl StateSnapshotEvent {
    /// Captures `state` as of now.
    #[must_use]
    pub fn new(snapshot: ProverbsState) -> Self {
        Self {
            event_type: EventType::StateSnapshot,
            snapshot,
            timestamp: Utc::now(),
        }
    }

    /// Proverbs carried by the snapshot.
    #[must_use]
    pub fn proverbs(&self) -> &[String] {
        &self.snapshot.proverbs
    }
}
