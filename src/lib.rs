//! Intigriti Researcher MCP Server
//!
//! Exposes the read-only GET endpoints of the Intigriti Researcher API as
//! Model Context Protocol tools, so an MCP client can browse bug bounty
//! programs, their activities, scope domains and rules of engagement.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the Intigriti API client, the
//!   MCP server handler and the transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: one tool per API endpoint
//!   - **resources**: API status and the list of covered endpoints
//!
//! # Example
//!
//! ```rust,no_run
//! use intigriti_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
