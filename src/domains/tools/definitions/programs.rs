//! Program listing tool.
//!
//! Lists every program the researcher has access to, with optional
//! filtering and offset/limit pagination passed straight through to
//! `GET /v1/programs`.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

use super::common::{clamp_limit, default_limit, fetch, parse_params, read_only_annotations};
use crate::core::client::{ApiRequest, ResearcherApi};
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the program listing tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetProgramsParams {
    /// Filter by program status ID.
    #[schemars(description = "Filter by program status ID")]
    pub status_id: Option<i64>,

    /// Filter by program type ID.
    #[schemars(description = "Filter by program type ID")]
    pub type_id: Option<i64>,

    /// Only programs you are (or are not) following.
    #[schemars(description = "Filter by programs you're following")]
    pub following: Option<bool>,

    /// Free-text search on program names.
    #[schemars(description = "Free-text search on program names")]
    pub search: Option<String>,

    /// Page size (default: 20, max: 500).
    #[serde(default = "default_limit")]
    #[schemars(description = "Number of programs per page (max 500)", range(max = 500))]
    pub limit: u32,

    /// Pagination offset.
    #[serde(default)]
    #[schemars(description = "Offset for pagination")]
    pub offset: u32,
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// `get_programs` tool.
pub struct GetProgramsTool;

impl GetProgramsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_programs";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get all programs you have access to with optional filtering";

    /// Build the upstream request.
    pub fn request(params: &GetProgramsParams) -> ApiRequest {
        ApiRequest::new(["v1", "programs"])
            .query("limit", clamp_limit(params.limit))
            .query("offset", params.offset)
            .query_opt("statusId", params.status_id)
            .query_opt("typeId", params.type_id)
            .query_opt("following", params.following)
            .query_opt(
                "search",
                params.search.as_deref().filter(|s| !s.trim().is_empty()),
            )
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(limit = params.limit, offset = params.offset))]
    pub async fn execute(
        params: &GetProgramsParams,
        api: &dyn ResearcherApi,
    ) -> Result<CallToolResult, ToolError> {
        Ok(fetch(api, Self::NAME, Self::request(params)).await)
    }

    /// Parse raw arguments and execute.
    pub async fn handle(
        arguments: JsonObject,
        api: &dyn ResearcherApi,
    ) -> Result<CallToolResult, ToolError> {
        let params: GetProgramsParams = parse_params(Self::NAME, arguments)?;
        Self::execute(&params, api).await
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetProgramsParams>(),
            annotations: Some(read_only_annotations()),
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the rmcp router.
    pub fn create_route<S>(api: Arc<dyn ResearcherApi>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let api = api.clone();
            async move {
                Self::handle(args, api.as_ref())
                    .await
                    .map_err(McpError::from)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::fake::FakeApi;
    use crate::domains::tools::definitions::common::test_support::{args, result_text};
    use serde_json::json;

    #[test]
    fn test_params_defaults() {
        let params: GetProgramsParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.limit, 20);
        assert_eq!(params.offset, 0);
        assert!(params.status_id.is_none());
        assert!(params.following.is_none());
    }

    #[test]
    fn test_request_defaults() {
        let params: GetProgramsParams = serde_json::from_str("{}").unwrap();
        let request = GetProgramsTool::request(&params);
        assert_eq!(request.path(), "/v1/programs");
        assert_eq!(request.query_string(), "limit=20&offset=0");
    }

    #[test]
    fn test_request_with_filters() {
        let params: GetProgramsParams = serde_json::from_value(json!({
            "status_id": 3,
            "type_id": 1,
            "following": true,
            "search": "acme",
            "limit": 50,
            "offset": 100
        }))
        .unwrap();
        let request = GetProgramsTool::request(&params);
        assert_eq!(
            request.query_string(),
            "limit=50&offset=100&statusId=3&typeId=1&following=true&search=acme"
        );
    }

    #[test]
    fn test_request_clamps_limit() {
        let params: GetProgramsParams = serde_json::from_value(json!({"limit": 9000})).unwrap();
        let request = GetProgramsTool::request(&params);
        assert_eq!(request.query_value("limit"), Some("500"));
    }

    #[test]
    fn test_negative_offset_rejected() {
        let err = parse_params::<GetProgramsParams>(
            GetProgramsTool::NAME,
            args(json!({"offset": -1})),
        )
        .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[test]
    fn test_schema_lists_filters() {
        let tool = GetProgramsTool::to_tool();
        let props = tool.input_schema.get("properties").unwrap();
        for key in ["status_id", "type_id", "following", "search", "limit", "offset"] {
            assert!(props.get(key).is_some(), "missing property {}", key);
        }
    }

    #[tokio::test]
    async fn test_handle_passes_body_through() {
        let body = json!({"maxCount": 1, "records": [{"id": "p1"}]});
        let api = FakeApi::new().with_response(Ok(body.clone()));

        let result = GetProgramsTool::handle(args(json!({"following": false})), &api)
            .await
            .unwrap();

        assert!(!result.is_error.unwrap_or(false));
        let parsed: serde_json::Value = serde_json::from_str(result_text(&result)).unwrap();
        assert_eq!(parsed, body);

        let requests = api.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query_value("following"), Some("false"));
    }
}
