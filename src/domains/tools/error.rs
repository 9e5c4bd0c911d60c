//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Errors that reject a tool invocation before any API call is made.
///
/// Failures of the API call itself are not errors at this level: they are
/// reported back to the client as an error `CallToolResult`.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(tool: impl Into<String>, msg: impl ToString) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            message: msg.to_string(),
        }
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        McpError::invalid_params(err.to_string(), None)
    }
}
