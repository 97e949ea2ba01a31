//! Data-driven city ordinances.
//!
//! Ordinances are policy toggles defined by [`definition::DefinitionRecord`]s
//! rather than code. Each one owns an ordered list of
//! [`availability::AvailabilityCondition`]s that decide when the player may
//! enact it, and an ordered list of [`income::IncomeFactor`]s that turn its
//! constant monthly income into the income actually booked each month.
//!
//! [`OrdinancePlugin`] hosts the collection inside a bevy `App`: it creates
//! ordinances when a city starts, runs the monthly pass on [`MonthElapsed`],
//! and releases everything on [`CityShutdown`].

pub mod availability;
pub mod city;
pub mod config;
pub mod context;
pub mod definition;
pub mod error;
pub mod income;
pub mod localization;
pub mod ordinance;
pub mod plugin;
pub mod providers;
pub mod resource_key;
pub mod rules;
pub mod script;
pub mod simulator;
pub mod stream;
#[cfg(any(test, feature = "test-harness"))]
pub mod test_harness;

pub use availability::{AvailabilityCondition, ConditionKind};
pub use city::{BuildingType, CityCounters, CitySession, CityStats, RciGroup};
pub use config::OrdinanceSettings;
pub use context::SimContext;
pub use definition::{DefinitionCatalog, DefinitionRecord, DefinitionSource, PropertyValue};
pub use error::StreamError;
pub use income::{FactorKind, IncomeFactor};
pub use localization::{StringResources, StringTable};
pub use ordinance::{HostResources, Ordinance};
pub use plugin::{CityShutdown, CityStarted, MonthElapsed, OrdinancePlugin};
pub use resource_key::{ResourceKey, StringResourceKey};
pub use simulator::{OrdinanceLedger, OrdinanceSimulator};
