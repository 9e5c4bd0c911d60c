//! Core module containing shared infrastructure components.
//!
//! Configuration, error handling, the Intigriti API client, the MCP server
//! handler and the transport layer.

pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use client::{ApiError, IntigritiClient, ResearcherApi};
pub use config::{ApiConfig, Config};
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
