//! Program details tool.

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

use super::common::{fetch, parse_params, read_only_annotations, require_id};
use crate::core::client::{ApiRequest, ResearcherApi};
use crate::domains::tools::ToolError;

/// Parameters for the program details tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetProgramDetailsParams {
    /// Program GUID.
    #[schemars(description = "The unique identifier (GUID) of the program")]
    pub program_id: String,
}

/// `get_program_details` tool: `GET /v1/programs/{programId}`.
pub struct GetProgramDetailsTool;

impl GetProgramDetailsTool {
    pub const NAME: &'static str = "get_program_details";

    pub const DESCRIPTION: &'static str =
        "Get detailed information about a specific bug bounty program";

    pub fn request(params: &GetProgramDetailsParams) -> Result<ApiRequest, ToolError> {
        require_id(Self::NAME, "program_id", &params.program_id)?;
        Ok(ApiRequest::new(["v1", "programs", params.program_id.trim()]))
    }

    #[instrument(skip_all, fields(program_id = %params.program_id))]
    pub async fn execute(
        params: &GetProgramDetailsParams,
        api: &dyn ResearcherApi,
    ) -> Result<CallToolResult, ToolError> {
        let request = Self::request(params)?;
        Ok(fetch(api, Self::NAME, request).await)
    }

    pub async fn handle(
        arguments: JsonObject,
        api: &dyn ResearcherApi,
    ) -> Result<CallToolResult, ToolError> {
        let params: GetProgramDetailsParams = parse_params(Self::NAME, arguments)?;
        Self::execute(&params, api).await
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetProgramDetailsParams>(),
            annotations: Some(read_only_annotations()),
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::{ApiError, fake::FakeApi};
    use crate::domains::tools::definitions::common::test_support::{args, result_text};
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_returns_body_unchanged() {
        let api = FakeApi::new().with_response(Ok(json!({"id": "abc"})));

        let result = GetProgramDetailsTool::handle(args(json!({"program_id": "abc"})), &api)
            .await
            .unwrap();

        assert!(!result.is_error.unwrap_or(false));
        let parsed: Value = serde_json::from_str(result_text(&result)).unwrap();
        assert_eq!(parsed, json!({"id": "abc"}));
        assert_eq!(api.requests()[0].path(), "/v1/programs/abc");
    }

    #[tokio::test]
    async fn test_missing_program_id_makes_no_call() {
        let api = FakeApi::new();

        let err = GetProgramDetailsTool::handle(args(json!({})), &api)
            .await
            .unwrap_err();

        match err {
            ToolError::InvalidArguments { tool, message } => {
                assert_eq!(tool, "get_program_details");
                assert!(message.contains("program_id"));
            }
            other => panic!("expected invalid arguments, got {:?}", other),
        }
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_program_id_rejected() {
        let api = FakeApi::new();
        let result = GetProgramDetailsTool::handle(args(json!({"program_id": " "})), &api).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments { .. })));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upstream_error_becomes_error_result() {
        let api = FakeApi::new().with_response(Err(ApiError::Upstream {
            status: 404,
            body: "{\"message\":\"Program not found\"}".to_string(),
            retry_after: None,
        }));

        let result = GetProgramDetailsTool::handle(args(json!({"program_id": "nope"})), &api)
            .await
            .unwrap();

        assert!(result.is_error.unwrap_or(false));
        let text = result_text(&result);
        assert!(text.contains("get_program_details"));
        assert!(text.contains("404"));
    }

    #[test]
    fn test_schema_requires_program_id() {
        let tool = GetProgramDetailsTool::to_tool();
        let required = tool.input_schema.get("required").unwrap();
        assert_eq!(required, &json!(["program_id"]));
    }
}
