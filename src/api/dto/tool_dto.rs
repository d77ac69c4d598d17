//! Tool catalog DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::tools::ToolSpec;

/// Response body for `GET /api/v1/tools`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ToolCatalogResponse {
    /// Assistant instructions to pair with the tools.
    pub system_prompt: &'static str,
    /// Registered tools.
    pub tools: Vec<ToolSpec>,
}
