use bevy::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::record::DefinitionRecord;
use crate::config::{
    reserved_ordinance_name, OrdinanceSettings, EXEMPLAR_TYPE_PROPERTY, ORDINANCE_EXEMPLAR_TYPE,
};
use crate::resource_key::ResourceKey;

/// Resolves definition records by key.
pub trait DefinitionSource {
    fn definition(&self, key: &ResourceKey) -> Option<Arc<DefinitionRecord>>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("definition {0} has no exemplar type property")]
    MissingExemplarType(ResourceKey),
    #[error("definition {key} has exemplar type {found}, not an ordinance")]
    NotAnOrdinance { key: ResourceKey, found: u32 },
    #[error("definition {key} uses the id of the built-in ordinance '{name}'")]
    ReservedId { key: ResourceKey, name: &'static str },
    #[error("definition {0} is already registered")]
    Duplicate(ResourceKey),
}

/// Validated ordinance definitions, keyed by resource key.
#[derive(Resource, Debug, Clone, Default)]
pub struct DefinitionCatalog {
    records: BTreeMap<ResourceKey, Arc<DefinitionRecord>>,
}

impl DefinitionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.records.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ResourceKey> {
        self.records.keys()
    }

    /// Adds `record` if it is an ordinance definition that does not clash
    /// with a built-in ordinance or an already registered one.
    pub fn register(&mut self, record: DefinitionRecord) -> Result<(), RegistrationError> {
        let key = record.key;
        let result = Self::validate(&record).and_then(|()| {
            if self.records.contains_key(&key) {
                Err(RegistrationError::Duplicate(key))
            } else {
                Ok(())
            }
        });

        match result {
            Ok(()) => {
                self.records.insert(key, Arc::new(record));
                Ok(())
            }
            Err(e) => {
                error!("Rejected ordinance definition: {}", e);
                Err(e)
            }
        }
    }

    /// Registers every record, skipping rejected ones. Returns the number accepted.
    pub fn register_all(
        &mut self,
        records: impl IntoIterator<Item = DefinitionRecord>,
        settings: &OrdinanceSettings,
    ) -> usize {
        let mut accepted = 0;
        for record in records {
            let key = record.key;
            if self.register(record).is_ok() {
                accepted += 1;
                if settings.log_registered_ids {
                    info!("Registered ordinance definition {}", key);
                }
            }
        }
        info!("Registered {} custom ordinance definition(s)", accepted);
        accepted
    }

    fn validate(record: &DefinitionRecord) -> Result<(), RegistrationError> {
        let key = record.key;
        let exemplar_type = record
            .uint32(EXEMPLAR_TYPE_PROPERTY)
            .ok_or(RegistrationError::MissingExemplarType(key))?;
        if exemplar_type != ORDINANCE_EXEMPLAR_TYPE {
            return Err(RegistrationError::NotAnOrdinance {
                key,
                found: exemplar_type,
            });
        }
        if let Some(name) = reserved_ordinance_name(key.instance) {
            return Err(RegistrationError::ReservedId { key, name });
        }
        Ok(())
    }
}

impl DefinitionSource for DefinitionCatalog {
    fn definition(&self, key: &ResourceKey) -> Option<Arc<DefinitionRecord>> {
        self.records.get(key).cloned()
    }
}
