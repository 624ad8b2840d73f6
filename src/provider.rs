use crate::client::{AclApi, ConfluentCloudClient};
use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use crate::resource::{acl_schema, AclResource, ResourceSchema, RESOURCE_NAME};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Every resource type this provider serves, keyed by type name.
pub fn resource_schemas() -> BTreeMap<&'static str, ResourceSchema> {
    let mut schemas = BTreeMap::new();
    schemas.insert(RESOURCE_NAME, acl_schema());
    schemas
}

/// A configured provider: one shared ACL client plus the resources it serves.
pub struct Provider {
    config: ProviderConfig,
    client: Arc<dyn AclApi>,
}

impl Provider {
    /// Build a provider talking to Confluent Cloud over HTTPS.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = ConfluentCloudClient::from_config(&config)?;
        info!("Configured Confluent Cloud provider");
        Ok(Self::with_client(config, Arc::new(client)))
    }

    pub fn with_client(config: ProviderConfig, client: Arc<dyn AclApi>) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn acl_resource(&self) -> AclResource<dyn AclApi> {
        AclResource::new(Arc::clone(&self.client)).with_id_format(self.config.id_format)
    }

    /// Look up a resource by its type name.
    pub fn resource(&self, type_name: &str) -> Result<AclResource<dyn AclApi>> {
        match type_name {
            RESOURCE_NAME => Ok(self.acl_resource()),
            other => Err(ProviderError::UnknownResource(other.to_string())),
        }
    }
}
