mod directory;

use serde::{Deserialize, Serialize};

pub use super::{JsonRpcError, Tool, INTERNAL_ERROR, INVALID_PARAMS};

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

fn internal(e: impl std::fmt::Display) -> JsonRpcError {
    JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {e}"))
}

/// Wraps a serializable payload as pretty JSON text content
pub fn text_result(payload: &impl Serialize) -> Result<serde_json::Value, JsonRpcError> {
    let text = serde_json::to_string_pretty(payload).map_err(internal)?;
    let result = CallToolResult {
        content: vec![Content::Text { text }],
        is_error: None,
    };
    serde_json::to_value(result).map_err(internal)
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "docfinder".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(internal)
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "doctors_list".to_string(),
            description: "List doctors from the directory after applying the name search, consultation mode and specialty filters, and the optional sort. Selecting several specialties returns doctors with ANY of them. Returns the matching doctor cards, the visible and total counts, and the shareable query string for the filters.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "search": {
                        "type": "string",
                        "description": "Case-insensitive substring of the doctor's name"
                    },
                    "consultation": {
                        "type": "string",
                        "description": "Consultation mode (default: all)",
                        "enum": ["video", "clinic", "all"]
                    },
                    "specialty": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Exact specialty names to include (e.g. ['Dentist', 'ENT'])"
                    },
                    "sort": {
                        "type": "string",
                        "description": "Sort order: fees ascending or experience descending (default: directory order)",
                        "enum": ["fees", "experience"]
                    },
                    "query": {
                        "type": "string",
                        "description": "Query string to start from (e.g. 'search=rao&specialty=ENT&sort=fees'). Other arguments override it."
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "doctors_specialties".to_string(),
            description: "List the specialty names present in the directory, sorted alphabetically, with the number of doctors practising each.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "filter": {
                        "type": "string",
                        "description": "Case-insensitive substring to narrow the specialty names"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "doctors_suggest".to_string(),
            description: "Autocomplete doctor names. Returns at most 3 names containing the term, in directory order. An empty term returns no suggestions.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "term": {
                        "type": "string",
                        "description": "Partial doctor name"
                    }
                },
                "required": ["term"]
            }),
        },
    ];

    serde_json::to_value(ToolsList { tools }).map_err(internal)
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {e}")))?;

    log::debug!("tools/call {}", params.name);

    match params.name.as_str() {
        "doctors_list" => directory::handle_doctors_list(params.arguments, global).await,
        "doctors_specialties" => {
            directory::handle_doctors_specialties(params.arguments, global).await
        }
        "doctors_suggest" => directory::handle_doctors_suggest(params.arguments, global).await,
        _ => Err(JsonRpcError::new(
            INVALID_PARAMS,
            format!("Unknown tool: {}", params.name),
        )),
    }
}
