//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool knows how to create its own route; this module only collects
//! them for the STDIO/TCP transports.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    GetProgramActivitiesTool, GetProgramDetailsTool, GetProgramDomainsTool, GetProgramsTool,
    GetRulesOfEngagementTool,
};
use crate::core::client::ResearcherApi;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(api: Arc<dyn ResearcherApi>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GetProgramsTool::create_route(api.clone()))
        .with_route(GetProgramDetailsTool::create_route(api.clone()))
        .with_route(GetProgramActivitiesTool::create_route(api.clone()))
        .with_route(GetProgramDomainsTool::create_route(api.clone()))
        .with_route(GetRulesOfEngagementTool::create_route(api))
}
