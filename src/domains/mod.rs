//! Domains module containing business logic organized by bounded contexts.
//!
//! - **tools**: one MCP tool per Intigriti Researcher API endpoint
//! - **resources**: read-only resources describing the API connection

pub mod resources;
pub mod tools;
