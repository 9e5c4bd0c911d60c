//! Intigriti Researcher API client.
//!
//! Tools and resources talk to the upstream API only through the
//! [`ResearcherApi`] trait, so they can be exercised against an in-memory
//! fake. [`IntigritiClient`] is the real implementation backed by `reqwest`.
//!
//! Every call is exactly one GET round trip: no retries, no caching.

mod error;
mod intigriti;
mod request;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use serde_json::Value;

pub use error::{ApiError, ApiResult};
pub use intigriti::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, IntigritiClient, TOKEN_ENV_VAR};
pub use request::ApiRequest;

/// Read-only access to the Intigriti Researcher API.
#[async_trait]
pub trait ResearcherApi: Send + Sync {
    /// Perform an authenticated GET and return the parsed JSON body.
    async fn get(&self, request: &ApiRequest) -> ApiResult<Value>;
}
