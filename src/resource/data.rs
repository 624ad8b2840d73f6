use super::schema::ResourceSchema;
use crate::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier plus attribute map for one resource instance, as exchanged
/// with the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default)]
    attributes: Map<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self {
            id: None,
            attributes,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Mark the instance as no longer existing.
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Write one attribute, rejecting keys the schema does not declare and
    /// values of the wrong type.
    pub fn set(
        &mut self,
        schema: &ResourceSchema,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        let value = value.into();
        let attribute = schema.attribute(key).ok_or_else(|| ProviderError::StateWrite {
            attribute: key.to_string(),
            reason: "attribute is not declared in the schema".to_string(),
        })?;

        if !attribute.attr_type.accepts(&value) {
            return Err(ProviderError::StateWrite {
                attribute: key.to_string(),
                reason: format!("expected {:?}, got {}", attribute.attr_type, value),
            });
        }

        self.attributes.insert(key.to_string(), value);
        Ok(())
    }
}
