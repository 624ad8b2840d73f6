//! Declarative description of a resource's attributes.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
}

impl AttributeType {
    pub fn accepts(&self, value: &serde_json::Value) -> bool {
        match self {
            AttributeType::String => value.is_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    pub required: bool,
    /// A change to this attribute destroys and recreates the resource.
    pub force_new: bool,
    pub description: &'static str,
}

impl Attribute {
    pub fn required_string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            attr_type: AttributeType::String,
            required: true,
            force_new: false,
            description,
        }
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSchema {
    pub attributes: Vec<Attribute>,
    /// Whether an existing object can be adopted by identifier alone.
    pub importable: bool,
}

impl ResourceSchema {
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
            importable: false,
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn importable(mut self) -> Self {
        self.importable = true;
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn required_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| a.required)
    }

    /// True when no attribute can be changed in place.
    pub fn all_force_new(&self) -> bool {
        self.attributes.iter().all(|a| a.force_new)
    }
}

impl Default for ResourceSchema {
    fn default() -> Self {
        Self::new()
    }
}
