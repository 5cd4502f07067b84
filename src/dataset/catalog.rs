use serde::{Deserialize, Serialize};

use super::label::AttributeValue;

/// Describes the label schema of a dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "BOX2D", default, skip_serializing_if = "Option::is_none")]
    pub box2d: Option<Box2DSubcatalog>,
}

impl Catalog {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn box2d(&self) -> Option<&Box2DSubcatalog> {
        self.box2d.as_ref()
    }

    /// Category names of the box2d subcatalog, in catalog order
    pub fn category_names(&self) -> Vec<&str> {
        self.box2d
            .as_ref()
            .map(|sub| sub.categories.iter().map(|c| c.name.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn contains_category(&self, name: &str) -> bool {
        self.box2d
            .as_ref()
            .map(|sub| sub.categories.iter().any(|c| c.name == name))
            .unwrap_or(false)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeInfo> {
        self.box2d
            .as_ref()
            .and_then(|sub| sub.attributes.iter().find(|a| a.name == name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Box2DSubcatalog {
    #[serde(rename = "isTracking", default)]
    pub is_tracking: bool,
    pub categories: Vec<CategoryInfo>,
    #[serde(default)]
    pub attributes: Vec<AttributeInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Boolean,
    Integer,
    String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeInfo {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<AttributeType>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl AttributeInfo {
    /// Check a value against the declared type and enum of this attribute
    pub fn accepts(&self, value: &AttributeValue) -> bool {
        if let Some(values) = &self.enum_values {
            return value
                .as_str()
                .map(|s| values.iter().any(|v| v == s))
                .unwrap_or(false);
        }

        match (self.attribute_type, value) {
            (None, _) => true,
            (Some(AttributeType::Boolean), AttributeValue::Boolean(_)) => true,
            (Some(AttributeType::Integer), AttributeValue::Integer(_)) => true,
            (Some(AttributeType::String), AttributeValue::Text(_)) => true,
            _ => false,
        }
    }
}
