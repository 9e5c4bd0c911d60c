//! Program activities tool.
//!
//! Feed of changes across programs (scope updates, bounty changes, ...),
//! optionally restricted to activities created after a unix timestamp.

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

/// Parameters for the program activities tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetProgramActivitiesParams {
    /// Only activities created at or after this unix timestamp.
    #[schemars(description = "Unix timestamp to filter activities created since this time")]
    pub created_since: Option<i64>,

    /// Only activities of programs you are (or are not) following.
    #[schemars(description = "Filter by programs you're following")]
    pub following: Option<bool>,

    /// Page size (default: 20, max: 500).
    #[serde(default = "default_limit")]
    #[schemars(description = "Number of activities per page (max 500)", range(max = 500))]
    pub limit: u32,

    /// Pagination offset.
    #[serde(default)]
    #[schemars(description = "Offset for pagination")]
    pub offset: u32,
}

/// `get_program_activities` tool: `GET /v1/programs/activities`.
pub struct GetProgramActivitiesTool;

impl GetProgramActivitiesTool {
    pub const NAME: &'static str = "get_program_activities";

    pub const DESCRIPTION: &'static str = "Get all program activities with optional filtering";

    pub fn request(params: &GetProgramActivitiesParams) -> ApiRequest {
        ApiRequest::new(["v1", "programs", "activities"])
            .query("limit", clamp_limit(params.limit))
            .query("offset", params.offset)
            .query_opt("createdSince", params.created_since)
            .query_opt("following", params.following)
    }

    #[instrument(skip_all, fields(created_since = ?params.created_since))]
    pub async fn execute(
        params: &GetProgramActivitiesParams,
        api: &dyn ResearcherApi,
    ) -> Result<CallToolResult, ToolError> {
        Ok(fetch(api, Self::NAME, Self::request(params)).await)
    }

    pub async fn handle(
        arguments: JsonObject,
        api: &dyn ResearcherApi,
    ) -> Result<CallToolResult, ToolError> {
        let params: GetProgramActivitiesParams = parse_params(Self::NAME, arguments)?;
        Self::execute(&params, api).await
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetProgramActivitiesParams>(),
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
    use serde_json::json;

    #[test]
    fn test_request_defaults() {
        let params: GetProgramActivitiesParams = serde_json::from_str("{}").unwrap();
        let request = GetProgramActivitiesTool::request(&params);
        assert_eq!(request.path(), "/v1/programs/activities");
        assert_eq!(request.query_string(), "limit=20&offset=0");
    }

    #[test]
    fn test_request_with_created_since() {
        let params: GetProgramActivitiesParams = serde_json::from_value(json!({
            "created_since": 1700000000,
            "following": true,
            "limit": 1000
        }))
        .unwrap();
        let request = GetProgramActivitiesTool::request(&params);
        assert_eq!(
            request.query_string(),
            "limit=500&offset=0&createdSince=1700000000&following=true"
        );
    }

    #[test]
    fn test_mistyped_timestamp_rejected() {
        let err = parse_params::<GetProgramActivitiesParams>(
            GetProgramActivitiesTool::NAME,
            args(json!({"created_since": "yesterday"})),
        )
        .unwrap_err();
        assert!(err.to_string().contains("get_program_activities"));
    }

    #[tokio::test]
    async fn test_transport_error_becomes_error_result() {
        let api = FakeApi::new().with_response(Err(ApiError::Transport(
            "request timed out".to_string(),
        )));

        let result = GetProgramActivitiesTool::handle(args(json!({})), &api)
            .await
            .unwrap();

        assert!(result.is_error.unwrap_or(false));
        assert!(result_text(&result).contains("Network error"));
    }
}
