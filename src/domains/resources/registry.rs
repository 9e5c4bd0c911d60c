//! Resource Registry - central registration of all resources.

use rmcp::model::{AnnotateAble, RawResource};

use super::definitions::{ApiEndpointsResource, ApiStatusResource, ResourceDefinition};
use super::service::ResourceEntry;

/// Helper function to create an annotated resource from a definition.
fn build_resource<R: ResourceDefinition>() -> ResourceEntry {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        content: R::content(),
    }
}

/// Get all registered resources as ResourceEntries.
pub fn get_all_resources() -> Vec<ResourceEntry> {
    vec![
        build_resource::<ApiStatusResource>(),
        build_resource::<ApiEndpointsResource>(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_all_resources() {
        let resources = get_all_resources();
        assert_eq!(resources.len(), 2);

        let uris: Vec<_> = resources
            .iter()
            .map(|r| r.resource.raw.uri.as_str())
            .collect();
        assert!(uris.contains(&"intigriti://api/status"));
        assert!(uris.contains(&"intigriti://api/endpoints"));
    }
}
