//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access.
//! Resources are defined in `definitions/` and registered via `registry.rs`.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use std::collections::HashMap;
use tracing::{info, warn};

use super::error::ResourceError;
use super::registry::get_all_resources;

/// Service for listing and reading resources.
///
/// Content is rendered once at registration; reads never touch the
/// filesystem or network.
pub struct ResourceService {
    /// Key: resource URI.
    resources: HashMap<String, ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The text served for this resource.
    pub content: String,
}

impl ResourceService {
    /// Create a new ResourceService with every registered resource.
    pub fn new() -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            resources: HashMap::new(),
        };
        for entry in get_all_resources() {
            service.register_resource(entry);
        }
        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        info!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
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
        let entry = self.resources.get(uri).ok_or_else(|| {
            warn!("Unknown resource requested: {}", uri);
            ResourceError::not_found(uri)
        })?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(entry.content.clone(), uri)],
        })
    }
}

impl Default for ResourceService {
    fn default() -> Self {
        Self::new()
    }
}
