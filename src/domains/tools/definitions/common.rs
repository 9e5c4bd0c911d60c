//! Common utilities shared across the Intigriti tools.
//!
//! Argument parsing, pagination defaults, and the conversion of API
//! responses into `CallToolResult`s live here so every tool reports
//! success and failure the same way.

use rmcp::model::{CallToolResult, Content, JsonObject, ToolAnnotations};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::core::client::{ApiError, ApiRequest, ResearcherApi, TOKEN_ENV_VAR};
use crate::domains::tools::ToolError;

/// Page size used when the client does not ask for one.
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest page the API accepts.
pub const MAX_LIMIT: u32 = 500;

pub fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Clamp a requested page size to what the API accepts.
pub fn clamp_limit(limit: u32) -> u32 {
    limit.min(MAX_LIMIT)
}

/// Deserialize tool arguments into the tool's params struct.
///
/// Unknown keys are ignored; missing or mistyped fields are rejected with
/// serde's message, which names the offending field.
pub fn parse_params<P: DeserializeOwned>(tool: &str, arguments: JsonObject) -> Result<P, ToolError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(tool, e))
}

/// Reject blank identifiers before they turn into a malformed path.
pub fn require_id(tool: &str, field: &str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::invalid_arguments(
            tool,
            format!("`{}` must not be empty", field),
        ));
    }
    Ok(())
}

/// Annotations shared by every tool: all of them are plain GETs.
pub fn read_only_annotations() -> ToolAnnotations {
    ToolAnnotations::new()
        .read_only(true)
        .destructive(false)
        .idempotent(true)
        .open_world(true)
}

/// Run one API call and turn the outcome into the tool result.
pub async fn fetch(api: &dyn ResearcherApi, tool: &str, request: ApiRequest) -> CallToolResult {
    info!("{} -> GET {}", tool, request.target());

    match api.get(&request).await {
        Ok(body) => json_result(&body),
        Err(e) => api_error_result(tool, &e),
    }
}

/// Success result carrying the upstream JSON, pretty-printed.
pub fn json_result(body: &Value) -> CallToolResult {
    CallToolResult::success(vec![Content::text(format!("{:#}", body))])
}

/// Error result for a failed API call.
pub fn api_error_result(tool: &str, err: &ApiError) -> CallToolResult {
    let message = format!("{} failed: {}", tool, err);
    if err.is_auth_failure() {
        warn!("{} (is {} valid?)", message, TOKEN_ENV_VAR);
    } else {
        warn!("{}", message);
    }
    CallToolResult::error(vec![Content::text(message)])
}
