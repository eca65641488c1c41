//! JSON-RPC tool endpoint.
//!
//! Exposes the splitter as the `split_text` tool over stateless JSON-RPC 2.0,
//! one request per POST. Supported methods:
//!
//! - `initialize`: server name, version and capabilities
//! - `ping`: empty result
//! - `tools/list`: the `split_text` tool and its input schema
//! - `tools/call`: run `split_text` on `arguments.text`
//!
//! Requests without an `id` are notifications and get `202 Accepted` with no
//! body.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::handlers::text_argument;
use crate::state::AppState;

/// Name reported in `initialize`.
const SERVER_NAME: &str = "MarkdownMCPServer";

/// Protocol revision reported in `initialize`.
const PROTOCOL_VERSION: &str = "2025-03-26";

/// Name of the only tool.
const SPLIT_TOOL: &str = "split_text";

const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

/// Incoming JSON-RPC request.
///
/// The `id` is read from the raw payload instead, since an explicit `null`
/// id is a request and only an absent one marks a notification.
#[derive(Debug, Deserialize)]
struct RpcRequest {
    jsonrpc: String,
    method: String,
    #[serde(default)]
    params: Value,
}

/// JSON-RPC error object.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct RpcError {
    code: i32,
    message: String,
}

impl RpcError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Outgoing JSON-RPC response.
#[derive(Debug, Serialize)]
struct RpcResponse {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

impl RpcResponse {
    fn from_outcome(id: Value, outcome: Result<Value, RpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(result) => (Some(result), None),
            Err(error) => (None, Some(error)),
        };
        Self {
            jsonrpc: "2.0",
            id,
            result,
            error,
        }
    }
}

impl IntoResponse for RpcResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Handle POST to the configured tool endpoint.
pub(crate) async fn post_mcp(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let raw: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Unparseable JSON-RPC payload");
            return RpcResponse::from_outcome(
                Value::Null,
                Err(RpcError::new(PARSE_ERROR, format!("Parse error: {e}"))),
            )
            .into_response();
        }
    };

    let id = raw.get("id").cloned();

    let request: RpcRequest = match serde_json::from_value(raw) {
        Ok(request) => request,
        Err(e) => {
            return RpcResponse::from_outcome(
                id.unwrap_or(Value::Null),
                Err(RpcError::new(INVALID_REQUEST, format!("Invalid request: {e}"))),
            )
            .into_response();
        }
    };

    if request.jsonrpc != "2.0" {
        return RpcResponse::from_outcome(
            id.unwrap_or(Value::Null),
            Err(RpcError::new(INVALID_REQUEST, "jsonrpc must be \"2.0\"")),
        )
        .into_response();
    }

    let Some(id) = id else {
        tracing::debug!(method = %request.method, "Notification received");
        return StatusCode::ACCEPTED.into_response();
    };

    let outcome = dispatch(&state, &request.method, &request.params);
    RpcResponse::from_outcome(id, outcome).into_response()
}

fn dispatch(state: &AppState, method: &str, params: &Value) -> Result<Value, RpcError> {
    match method {
        "initialize" => Ok(initialize_result(&state.version)),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": [split_tool_descriptor()] })),
        "tools/call" => call_tool(params),
        other => Err(RpcError::new(
            METHOD_NOT_FOUND,
            format!("Method not found: {other}"),
        )),
    }
}

fn initialize_result(version: &str) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "serverInfo": {"name": SERVER_NAME, "version": version},
        "capabilities": {"tools": {"listChanged": false}},
    })
}

fn split_tool_descriptor() -> Value {
    json!({
        "name": SPLIT_TOOL,
        "description": "Split Markdown text into hierarchical sections. Each section \
                        carries its header, body text, header level, parent headers \
                        by level and sibling headers sharing the same parents.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "Markdown document with '#' headers."
                }
            },
            "required": ["text"]
        }
    })
}

fn call_tool(params: &Value) -> Result<Value, RpcError> {
    let name = params.get("name").and_then(Value::as_str).unwrap_or_default();
    if name != SPLIT_TOOL {
        return Err(RpcError::new(INVALID_PARAMS, format!("Unknown tool: {name:?}")));
    }

    let arguments = params.get("arguments").unwrap_or(&Value::Null);
    let text =
        text_argument(arguments).map_err(|e| RpcError::new(INVALID_PARAMS, e.to_string()))?;

    tracing::info!(chars = text.chars().count(), "Processing split_text request");
    let sections = mdsplit_sections::split(text);
    tracing::info!(
        sections = sections.len(),
        "Successfully processed split_text request"
    );

    let structured = serde_json::to_value(&sections).map_err(|e| {
        tracing::error!(error = %e, "Failed to serialize sections");
        RpcError::new(INTERNAL_ERROR, format!("Failed to serialize sections: {e}"))
    })?;

    Ok(json!({
        "content": [{"type": "text", "text": structured.to_string()}],
        "structuredContent": {"result": structured},
        "isError": false,
    }))
}
