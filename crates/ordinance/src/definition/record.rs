use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::resource_key::{ResourceKey, StringResourceKey};

/// A typed property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PropertyValue {
    Uint32(u32),
    Uint32Array(Vec<u32>),
    Sint64(i64),
    Float32(f32),
    Bool(bool),
    String(String),
}

/// An authorable ordinance definition: a key plus a bag of typed properties.
///
/// ```json
/// {
///   "key": { "type": 1697917002, "group": 1250263651, "instance": 3735928559 },
///   "properties": {
///     "16": { "type": "Uint32", "value": 14 },
///     "686668850": { "type": "String", "value": "Bike Lanes" }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionRecord {
    pub key: ResourceKey,
    #[serde(default)]
    pub properties: BTreeMap<u32, PropertyValue>,
}

impl DefinitionRecord {
    pub fn new(key: ResourceKey) -> Self {
        Self {
            key,
            properties: BTreeMap::new(),
        }
    }

    pub fn with(mut self, id: u32, value: PropertyValue) -> Self {
        self.properties.insert(id, value);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a JSON array of records.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn has(&self, id: u32) -> bool {
        self.properties.contains_key(&id)
    }

    pub fn get(&self, id: u32) -> Option<&PropertyValue> {
        self.properties.get(&id)
    }

    // -------------------------------------------------------------------------
    // Typed getters. A property of a different type reads as absent.
    // -------------------------------------------------------------------------

    pub fn uint32(&self, id: u32) -> Option<u32> {
        match self.get(id)? {
            PropertyValue::Uint32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn sint64(&self, id: u32) -> Option<i64> {
        match self.get(id)? {
            PropertyValue::Sint64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn float32(&self, id: u32) -> Option<f32> {
        match self.get(id)? {
            PropertyValue::Float32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn bool(&self, id: u32) -> Option<bool> {
        match self.get(id)? {
            PropertyValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn string(&self, id: u32) -> Option<&str> {
        match self.get(id)? {
            PropertyValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// A string resource key stored as `[type, group, instance]`.
    pub fn string_key(&self, id: u32) -> Option<StringResourceKey> {
        match self.get(id)? {
            PropertyValue::Uint32Array(values) => match values.as_slice() {
                [_, group, instance] => Some(StringResourceKey::new(*group, *instance)),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_from_json() {
        let json = r#"{
            "key": { "type": 1, "group": 2, "instance": 3 },
            "properties": {
                "16": { "type": "Uint32", "value": 14 },
                "100": { "type": "Uint32Array", "value": [1, 2, 3] },
                "101": { "type": "Sint64", "value": -500 },
                "102": { "type": "Float32", "value": 0.5 },
                "103": { "type": "Bool", "value": true },
                "104": { "type": "String", "value": "Bike Lanes" }
            }
        }"#;
        let record = DefinitionRecord::from_json(json).unwrap();
        assert_eq!(record.key, ResourceKey::new(1, 2, 3));
        assert_eq!(record.uint32(16), Some(14));
        assert_eq!(record.string_key(100), Some(StringResourceKey::new(2, 3)));
        assert_eq!(record.sint64(101), Some(-500));
        assert_eq!(record.float32(102), Some(0.5));
        assert_eq!(record.bool(103), Some(true));
        assert_eq!(record.string(104), Some("Bike Lanes"));
    }

    #[test]
    fn test_mismatched_type_reads_as_absent() {
        let record = DefinitionRecord::new(ResourceKey::none())
            .with(1, PropertyValue::Uint32(5))
            .with(2, PropertyValue::Uint32Array(vec![1, 2]));
        assert!(record.has(1));
        assert_eq!(record.float32(1), None);
        assert_eq!(record.string(1), None);
        assert_eq!(record.string_key(2), None);
        assert_eq!(record.uint32(3), None);
    }

    #[test]
    fn test_missing_properties_default_to_empty() {
        let record =
            DefinitionRecord::from_json(r#"{ "key": { "type": 0, "group": 0, "instance": 9 } }"#)
                .unwrap();
        assert!(record.properties.is_empty());
    }
}
