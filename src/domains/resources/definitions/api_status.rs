//! API status resource definition.
//!
//! Reading it makes one small program listing request to check that the
//! token is accepted.

use rmcp::model::ResourceContents;
use tracing::warn;

use super::ResourceDefinition;
use crate::core::client::{ApiRequest, ResearcherApi};
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// Connectivity and authentication status (dynamic).
pub struct ApiStatusResource;

impl ResourceDefinition for ApiStatusResource {
    const URI: &'static str = "intigriti://api/status";
    const NAME: &'static str = "API Status";
    const DESCRIPTION: &'static str = "Check API connectivity and authentication status";
    const MIME_TYPE: &'static str = "text/plain";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::ApiStatus)
    }
}

impl ApiStatusResource {
    /// Probe the API and describe the outcome.
    pub async fn resolve(uri: &str, api: &dyn ResearcherApi) -> ResourceContents {
        let request = ApiRequest::new(["v1", "programs"]).query("limit", 1);

        let text = match api.get(&request).await {
            Ok(body) => {
                let total = body
                    .get("maxCount")
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                format!("API connected\nTotal programs accessible: {}", total)
            }
            Err(e) => {
                warn!("API status check failed: {}", e);
                format!("API connection failed\nError: {}", e)
            }
        };

        ResourceContents::TextResourceContents {
            uri: uri.to_string(),
            mime_type: Some(Self::MIME_TYPE.to_string()),
            text,
            meta: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::{ApiError, fake::FakeApi};
    use serde_json::json;

    fn text_of(contents: ResourceContents) -> String {
        match contents {
            ResourceContents::TextResourceContents { text, .. } => text,
            _ => panic!("expected text contents"),
        }
    }

    #[tokio::test]
    async fn test_status_connected() {
        let api = FakeApi::new().with_response(Ok(json!({"maxCount": 42, "records": []})));
        let text = text_of(ApiStatusResource::resolve(ApiStatusResource::URI, &api).await);

        assert!(text.contains("API connected"));
        assert!(text.contains("42"));
        assert_eq!(api.requests()[0].query_string(), "limit=1");
    }

    #[tokio::test]
    async fn test_status_auth_failure() {
        let api = FakeApi::new().with_response(Err(ApiError::Upstream {
            status: 401,
            body: String::new(),
            retry_after: None,
        }));
        let text = text_of(ApiStatusResource::resolve(ApiStatusResource::URI, &api).await);

        assert!(text.contains("API connection failed"));
        assert!(text.contains("401"));
    }
}
