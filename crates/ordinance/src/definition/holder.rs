use std::io::{Read, Write};
use std::sync::Arc;

use super::catalog::DefinitionSource;
use super::record::{DefinitionRecord, PropertyValue};
use crate::config::RULE_PAYLOAD_VERSION;
use crate::error::StreamError;
use crate::resource_key::ResourceKey;
use crate::stream::{SaveRead, SaveWrite};

/// Read-only view of the definition an ordinance was built from.
///
/// Only the definition key is persisted; reading resolves it again through a
/// [`DefinitionSource`].
#[derive(Debug, Clone, Default)]
pub struct PropertyHolder {
    record: Option<Arc<DefinitionRecord>>,
}

impl PropertyHolder {
    pub fn new(record: Arc<DefinitionRecord>) -> Self {
        Self {
            record: Some(record),
        }
    }

    pub fn record(&self) -> Option<&DefinitionRecord> {
        self.record.as_deref()
    }

    /// Key of the wrapped definition, or the all-zero key when empty.
    pub fn key(&self) -> ResourceKey {
        self.record
            .as_ref()
            .map_or(ResourceKey::none(), |record| record.key)
    }

    pub fn has_property(&self, id: u32) -> bool {
        self.record.as_ref().is_some_and(|record| record.has(id))
    }

    pub fn property(&self, id: u32) -> Option<&PropertyValue> {
        self.record.as_ref().and_then(|record| record.get(id))
    }

    /// Ids of every property, in ascending order.
    pub fn property_ids(&self) -> Vec<u32> {
        self.record
            .as_ref()
            .map(|record| record.properties.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn set_default(&mut self, record: Option<Arc<DefinitionRecord>>) {
        self.record = record;
    }

    pub fn clear(&mut self) {
        self.record = None;
    }

    pub fn write(&self, writer: &mut dyn Write) -> Result<(), StreamError> {
        writer.write_u32_le(RULE_PAYLOAD_VERSION)?;
        writer.write_resource_key(&self.key())
    }

    /// Reads a holder. A key that no longer resolves yields an empty holder.
    pub fn read(
        reader: &mut dyn Read,
        source: Option<&dyn DefinitionSource>,
    ) -> Result<Self, StreamError> {
        reader.expect_version("property holder", RULE_PAYLOAD_VERSION)?;
        let key = reader.read_resource_key()?;
        if key.is_none() {
            return Ok(Self::default());
        }
        Ok(Self {
            record: source.and_then(|source| source.definition(&key)),
        })
    }
}
