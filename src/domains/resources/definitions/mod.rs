//! Resource definitions module.
//!
//! Each resource is defined in its own file with its URI, metadata and
//! content provider, and registered in `registry.rs`.

mod api_endpoints;
mod api_status;

pub use api_endpoints::ApiEndpointsResource;
pub use api_status::ApiStatusResource;

use super::service::ResourceContent;

/// Trait for resource definitions.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Get the content for this resource.
    fn content() -> ResourceContent;
}
