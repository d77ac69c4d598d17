//! Session state DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::PersistenceStatus;

/// Request body for `PUT /api/v1/state`: a client-side state write.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStateRequest {
    /// Complete new list of proverbs.
    pub proverbs: Vec<String>,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process serves requests.
    pub status: String,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
    /// Storage mode.
    pub persistence: PersistenceStatus,
}
