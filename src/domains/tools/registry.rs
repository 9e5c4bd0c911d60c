//! Tool Registry - central listing and dispatch for all tools.
//!
//! The registry is the fixed name -> handler table. It backs the HTTP
//! transport and mirrors the routes served by the rmcp router.

use std::sync::Arc;
use tracing::{info, warn};

use rmcp::model::{CallToolResult, JsonObject, Tool};

use super::ToolError;
use super::definitions::{
    GetProgramActivitiesTool, GetProgramDetailsTool, GetProgramDomainsTool, GetProgramsTool,
    GetRulesOfEngagementTool,
};
use crate::core::client::ResearcherApi;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    api: Arc<dyn ResearcherApi>,
}

impl ToolRegistry {
    /// Create a new tool registry over the given API client.
    pub fn new(api: Arc<dyn ResearcherApi>) -> Self {
        Self { api }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            GetProgramsTool::NAME,
            GetProgramDetailsTool::NAME,
            GetProgramActivitiesTool::NAME,
            GetProgramDomainsTool::NAME,
            GetRulesOfEngagementTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            GetProgramsTool::to_tool(),
            GetProgramDetailsTool::to_tool(),
            GetProgramActivitiesTool::to_tool(),
            GetProgramDomainsTool::to_tool(),
            GetRulesOfEngagementTool::to_tool(),
        ]
    }

    /// Dispatch a tool call by name.
    ///
    /// Unknown names and invalid arguments are rejected before any API call.
    /// API failures come back as `Ok` with an error `CallToolResult`.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, ToolError> {
        info!("Dispatching tool call: {}", name);
        let api = self.api.as_ref();

        match name {
            GetProgramsTool::NAME => GetProgramsTool::handle(arguments, api).await,
            GetProgramDetailsTool::NAME => GetProgramDetailsTool::handle(arguments, api).await,
            GetProgramActivitiesTool::NAME => {
                GetProgramActivitiesTool::handle(arguments, api).await
            }
            GetProgramDomainsTool::NAME => GetProgramDomainsTool::handle(arguments, api).await,
            GetRulesOfEngagementTool::NAME => {
                GetRulesOfEngagementTool::handle(arguments, api).await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
