//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access. Resources are
//! defined in `definitions/` and registered via `registry.rs`.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use super::definitions::ApiStatusResource;
use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::core::client::ResearcherApi;

/// Service for managing and accessing resources.
pub struct ResourceService {
    /// API client used by dynamic resources.
    api: Arc<dyn ResearcherApi>,

    /// Registry of available resources, keyed by URI.
    resources: BTreeMap<String, ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(String),

    /// Content computed on every read.
    Dynamic(DynamicResourceType),
}

/// Types of dynamic resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicResourceType {
    /// Live API connectivity check.
    ApiStatus,
}

impl ResourceService {
    /// Create a new ResourceService backed by the given API client.
    pub fn new(api: Arc<dyn ResearcherApi>) -> Self {
        info!("Initializing ResourceService");

        let resources = get_all_resources()
            .into_iter()
            .map(|entry| (entry.resource.raw.uri.clone(), entry))
            .collect();

        Self { api, resources }
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let content = match &entry.content {
            ResourceContent::Text(text) => ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: entry.resource.raw.mime_type.clone(),
                text: text.clone(),
                meta: None,
            },
            ResourceContent::Dynamic(DynamicResourceType::ApiStatus) => {
                ApiStatusResource::resolve(uri, self.api.as_ref()).await
            }
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }
}
