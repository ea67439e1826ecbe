//! Request handling for the dispatch server.
//!
//! Maps each JSON-RPC method onto the [`ToolRegistry`]. Tool failures are
//! successful JSON-RPC responses carrying an error [`ToolResponse`]; only
//! protocol problems become JSON-RPC errors.
//!
//! [`ToolResponse`]: simbridge_domain::ToolResponse

use super::protocol::{
    CallToolParams, INVALID_PARAMS, INVALID_REQUEST, JsonRpcRequest, JsonRpcResponse,
    METHOD_NOT_FOUND, PARSE_ERROR,
};
use serde_json::{Value, json};
use simbridge_domain::ToolArguments;
use simbridge_infrastructure::ToolRegistry;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Protocol revision advertised in `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub struct RequestHandler {
    registry: Arc<ToolRegistry>,
    server_name: String,
    server_version: String,
}

impl RequestHandler {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            server_name: "simbridge".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Handle one raw frame. Returns `None` when no reply is due.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Malformed frame: {}", e);
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::failure(
                id,
                INVALID_REQUEST,
                format!("Invalid request: {e}"),
            )),
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!("Received {}", request.method);

        // Notifications are never answered
        let Some(id) = request.id else {
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize_result()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, self.list_tools()),
            "tools/call" => self.call_tool(id, request.params).await,
            other => {
                JsonRpcResponse::failure(id, METHOD_NOT_FOUND, format!("Method not found: {other}"))
            }
        };
        Some(response)
    }

    fn initialize_result(&self) -> Value {
        info!(
            "Client initialized; advertising {} tools",
            self.registry.len()
        );
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": self.server_name,
                "version": self.server_version,
            },
        })
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<Value> = self
            .registry
            .list_descriptors()
            .into_iter()
            .map(|d| {
                json!({
                    "name": d.name,
                    "description": d.description,
                    "inputSchema": d.input_schema(),
                })
            })
            .collect();
        json!({ "tools": tools })
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params.map(serde_json::from_value).transpose() {
            Ok(Some(params)) => params,
            Ok(None) => {
                return JsonRpcResponse::failure(id, INVALID_PARAMS, "Missing params for tools/call");
            }
            Err(e) => {
                return JsonRpcResponse::failure(id, INVALID_PARAMS, format!("Invalid params: {e}"));
            }
        };

        let args = match ToolArguments::from_value(params.arguments) {
            Ok(args) => args,
            Err(e) => return JsonRpcResponse::failure(id, INVALID_PARAMS, e),
        };

        match self.registry.call(&params.name, &args).await {
            Some(response) => match serde_json::to_value(&response) {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(e) => JsonRpcResponse::failure(
                    id,
                    INVALID_PARAMS,
                    format!("Failed to encode tool response: {e}"),
                ),
            },
            None => {
                warn!("Unknown tool requested: {}", params.name);
                JsonRpcResponse::failure(id, INVALID_PARAMS, format!("Unknown tool: {}", params.name))
            }
        }
    }
}
