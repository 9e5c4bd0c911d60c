//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools and resources domains.
//!
//! Tool calls over STDIO/TCP go through the rmcp `ToolRouter` built in
//! `domains/tools/router.rs`; the HTTP transport dispatches through the
//! `ToolRegistry`. Both end up in the same per-tool `handle()`.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::client::{IntigritiClient, ResearcherApi};
use super::config::Config;
use super::error::Result as CrateResult;
use crate::domains::{resources::ResourceService, tools::build_tool_router};

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// Instructions sent to clients on initialization.
pub const INSTRUCTIONS: &str = "Read-only access to the Intigriti Researcher API. \
     Use get_programs to discover programs, get_program_details for a single program, \
     get_program_activities for recent changes, and get_program_domains / \
     get_program_rules_of_engagement with the version ids found in program details.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Intigriti API client, used directly by HTTP tool dispatch.
    #[cfg(feature = "http")]
    api: Arc<dyn ResearcherApi>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking to the real Intigriti API.
    pub fn new(config: Config) -> CrateResult<Self> {
        let client = IntigritiClient::new(&config.api)?;
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Create a server around any API implementation.
    pub fn with_api(config: Config, api: Arc<dyn ResearcherApi>) -> Self {
        let resource_service = Arc::new(ResourceService::new(api.clone()));

        Self {
            tool_router: build_tool_router::<Self>(api.clone()),
            config: Arc::new(config),
            #[cfg(feature = "http")]
            api,
            resource_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                    "annotations": t.annotations,
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// `Err` means the call was rejected (unknown tool, bad arguments);
    /// API failures are an `Ok` result with `isError: true`.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, String> {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => JsonObject::new(),
            _ => return Err("Tool arguments must be a JSON object".to_string()),
        };

        let registry = ToolRegistry::new(self.api.clone());
        let result = registry
            .call_tool(name, arguments)
            .await
            .map_err(|e| e.to_string())?;

        serde_json::to_value(result).map_err(|e| e.to_string())
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(&self, uri: &str) -> std::result::Result<serde_json::Value, String> {
        match self.resource_service.read_resource(uri).await {
            Ok(result) => Ok(serde_json::json!({
                "contents": result.contents
            })),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }
}
