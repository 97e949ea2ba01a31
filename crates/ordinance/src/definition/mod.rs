//! Ordinance definitions: the records ordinances are built from, the catalog
//! that validates them, and the mapping from properties to rules.

mod catalog;
mod holder;
mod loader;
pub mod property_ids;
mod record;

pub use catalog::{DefinitionCatalog, DefinitionSource, RegistrationError};
pub use holder::PropertyHolder;
pub use loader::{read_conditions, read_factors, read_metadata, OrdinanceMetadata};
pub use record::{DefinitionRecord, PropertyValue};
