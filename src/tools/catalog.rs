//! Tool descriptions handed to the conversational runtime.

use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

/// Instructions that accompany the tool catalog.
pub const SYSTEM_PROMPT: &str = "\
You are a helpful assistant that helps manage and discuss proverbs.

The user has a list of proverbs that you can help them manage.
You have tools available to add, set, or retrieve proverbs from the list.

When discussing proverbs, ALWAYS use the get_proverbs tool to see the current list before
mentioning, updating, or discussing proverbs with the user.";

/// Name, description, and JSON-schema parameters of one tool.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ToolSpec {
    /// Name the runtime uses to invoke the tool.
    pub name: &'static str,
    /// Description shown to the model.
    pub description: &'static str,
    /// JSON schema of the tool's arguments object.
    #[schema(value_type = Object)]
    pub parameters: serde_json::Value,
}

fn proverbs_parameter(description: &str) -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "proverbs": {
                "type": "array",
                "items": { "type": "string" },
                "description": description,
            }
        },
        "required": ["proverbs"],
    })
}

/// Returns every registered tool.
#[must_use]
pub fn catalog() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "get_proverbs",
            description: "Get the current list of proverbs.",
            parameters: json!({ "type": "object", "properties": {} }),
        },
        ToolSpec {
            name: "add_proverbs",
            description: "Append proverbs to the end of the list.",
            parameters: proverbs_parameter("Proverbs to append, in order."),
        },
        ToolSpec {
            name: "set_proverbs",
            description: "Replace the whole list of proverbs.",
            parameters: proverbs_parameter("The complete new list of proverbs."),
        },
        ToolSpec {
            name: "get_weather",
            description: "Get the weather for a given location. Ensure location is fully spelled out.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "location": { "type": "string" }
                },
                "required": ["location"],
            }),
        },
    ]
}

/// Returns `true` if `name` is in the [`catalog`].
#[must_use]
pub fn is_registered(name: &str) -> bool {
    catalog().iter().any(|spec| spec.name == name)
}
