//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::{HealthResponse, ToolCatalogResponse, UpdateStateRequest};
use super::handlers::{state, system, tools};
use crate::domain::{EventType, ProverbsState, StateSnapshotEvent};
use crate::error::{ErrorBody, ErrorResponse};
use crate::service::PersistenceStatus;
use crate::tools::{ToolOutput, ToolSpec};

/// Generated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "proverbs-agent", description = "Proverbs assistant tool and state API"),
    paths(
        system::health_handler,
        tools::list_tools,
        tools::invoke_tool,
        state::get_state,
        state::put_state,
    ),
    components(schemas(
        HealthResponse,
        PersistenceStatus,
        ToolCatalogResponse,
        ToolSpec,
        ToolOutput,
        UpdateStateRequest,
        ProverbsState,
        StateSnapshotEvent,
        EventType,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "System", description = "Health"),
        (name = "Tools", description = "Tool catalog and invocation"),
        (name = "State", description = "Session state"),
    )
)]
pub struct ApiDoc;
