//! Covered endpoints resource definition.

use serde_json::json;

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Static list of the API endpoints this server exposes as tools.
pub struct ApiEndpointsResource;

impl ResourceDefinition for ApiEndpointsResource {
    const URI: &'static str = "intigriti://api/endpoints";
    const NAME: &'static str = "Available Endpoints";
    const DESCRIPTION: &'static str = "Intigriti Researcher API endpoints covered by this server";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        let endpoints = json!({
            "programs": "GET /v1/programs - Get all programs you have access to",
            "program_details": "GET /v1/programs/{programId} - Get program details",
            "program_activities": "GET /v1/programs/activities - Get all program activities",
            "program_domains": "GET /v1/programs/{programId}/domains/{versionId} - Get program domains",
            "program_rules": "GET /v1/programs/{programId}/rules-of-engagements/{versionId} - Get rules of engagement",
        });

        ResourceContent::Text(format!("{:#}", endpoints))
    }
}
