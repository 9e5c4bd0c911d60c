//! Program domains (scope) tool.

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

/// Parameters for the program domains tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetProgramDomainsParams {
    #[schemars(description = "The unique identifier (GUID) of the program")]
    pub program_id: String,

    #[schemars(description = "The unique identifier (GUID) of the domains version")]
    pub version_id: String,
}

/// `get_program_domains` tool: `GET /v1/programs/{programId}/domains/{versionId}`.
pub struct GetProgramDomainsTool;

impl GetProgramDomainsTool {
    pub const NAME: &'static str = "get_program_domains";

    pub const DESCRIPTION: &'static str = "Get program domains/scope for a specific version";

    pub fn request(params: &GetProgramDomainsParams) -> Result<ApiRequest, ToolError> {
        require_id(Self::NAME, "program_id", &params.program_id)?;
        require_id(Self::NAME, "version_id", &params.version_id)?;
        Ok(ApiRequest::new([
            "v1",
            "programs",
            params.program_id.trim(),
            "domains",
            params.version_id.trim(),
        ]))
    }

    #[instrument(skip_all, fields(program_id = %params.program_id, version_id = %params.version_id))]
    pub async fn execute(
        params: &GetProgramDomainsParams,
        api: &dyn ResearcherApi,
    ) -> Result<CallToolResult, ToolError> {
        let request = Self::request(params)?;
        Ok(fetch(api, Self::NAME, request).await)
    }

    pub async fn handle(
        arguments: JsonObject,
        api: &dyn ResearcherApi,
    ) -> Result<CallToolResult, ToolError> {
        let params: GetProgramDomainsParams = parse_params(Self::NAME, arguments)?;
        Self::execute(&params, api).await
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetProgramDomainsParams>(),
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
    use crate::core::client::fake::FakeApi;
    use crate::domains::tools::definitions::common::test_support::args;
    use serde_json::json;

    #[tokio::test]
    async fn test_builds_versioned_path() {
        let api = FakeApi::new();

        GetProgramDomainsTool::handle(
            args(json!({"program_id": "prog-1", "version_id": "ver-2"})),
            &api,
        )
        .await
        .unwrap();

        let requests = api.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path(), "/v1/programs/prog-1/domains/ver-2");
        assert!(requests[0].query_string().is_empty());
    }

    #[tokio::test]
    async fn test_missing_version_id() {
        let api = FakeApi::new();

        let err = GetProgramDomainsTool::handle(args(json!({"program_id": "prog-1"})), &api)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("version_id"));
        assert_eq!(api.call_count(), 0);
    }
}
