//! Program rules of engagement tool.

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

/// Parameters for the rules of engagement tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetRulesOfEngagementParams {
    #[schemars(description = "The unique identifier (GUID) of the program")]
    pub program_id: String,

    #[schemars(description = "The unique identifier (GUID) of the rules version")]
    pub version_id: String,
}

/// `get_program_rules_of_engagement` tool:
/// `GET /v1/programs/{programId}/rules-of-engagements/{versionId}`.
pub struct GetRulesOfEngagementTool;

impl GetRulesOfEngagementTool {
    pub const NAME: &'static str = "get_program_rules_of_engagement";

    pub const DESCRIPTION: &'static str =
        "Get program rules of engagement for a specific version";

    pub fn request(params: &GetRulesOfEngagementParams) -> Result<ApiRequest, ToolError> {
        require_id(Self::NAME, "program_id", &params.program_id)?;
        require_id(Self::NAME, "version_id", &params.version_id)?;
        Ok(ApiRequest::new([
            "v1",
            "programs",
            params.program_id.trim(),
            "rules-of-engagements",
            params.version_id.trim(),
        ]))
    }

    #[instrument(skip_all, fields(program_id = %params.program_id, version_id = %params.version_id))]
    pub async fn execute(
        params: &GetRulesOfEngagementParams,
        api: &dyn ResearcherApi,
    ) -> Result<CallToolResult, ToolError> {
        let request = Self::request(params)?;
        Ok(fetch(api, Self::NAME, request).await)
    }

    pub async fn handle(
        arguments: JsonObject,
        api: &dyn ResearcherApi,
    ) -> Result<CallToolResult, ToolError> {
        let params: GetRulesOfEngagementParams = parse_params(Self::NAME, arguments)?;
        Self::execute(&params, api).await
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetRulesOfEngagementParams>(),
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
