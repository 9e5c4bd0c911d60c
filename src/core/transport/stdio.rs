//! STDIO transport implementation.
//!
//! Newline-delimited JSON-RPC over stdin/stdout. Logs must stay on stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult, shutdown_signal};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve one session until stdin closes or the process is signalled.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let cancel = service.cancellation_token();

        tokio::select! {
            result = service.waiting() => {
                result.map_err(|e| TransportError::ServiceError(e.to_string()))?;
                info!("Client closed the STDIO channel");
            }
            _ = shutdown_signal() => {
                cancel.cancel();
            }
        }

        info!("STDIO transport finished");
        Ok(())
    }
}
