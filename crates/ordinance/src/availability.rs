//! Availability conditions.
//!
//! Predicates that gate whether an ordinance may be enacted. An ordinance
//! holds an ordered list of them and is available only when all hold.

use bevy::prelude::*;
use std::io::{Read, Write};

use crate::city::BuildingType;
use crate::config::RULE_PAYLOAD_VERSION;
use crate::context::SimContext;
use crate::error::StreamError;
use crate::providers::{BuildingCountProvider, PopulationProvider};
use crate::rules::PersistedRule;
use crate::script::{self, ScriptCallError};
use crate::stream::{SaveRead, SaveWrite};

/// Persisted variant tags. Append only; never renumber or reuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ConditionKind {
    GameYear = 0,
    BuildingCount = 1,
    RciGroupPopulation = 2,
    ScriptedPredicate = 3,
}

impl ConditionKind {
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(ConditionKind::GameYear),
            1 => Some(ConditionKind::BuildingCount),
            2 => Some(ConditionKind::RciGroupPopulation),
            3 => Some(ConditionKind::ScriptedPredicate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityCondition {
    /// The simulated year has reached `min_year`.
    GameYear { min_year: u32 },
    /// At least `min_count` buildings of `building_type` exist.
    BuildingCount {
        building_type: BuildingType,
        min_count: u32,
    },
    /// The demand group `group_id` has at least `min_population`.
    RciGroupPopulation { group_id: u32, min_population: i32 },
    /// A script function `fn() -> bool` decides.
    ScriptedPredicate { function_name: String },
}

impl AvailabilityCondition {
    pub fn kind(&self) -> ConditionKind {
        match self {
            AvailabilityCondition::GameYear { .. } => ConditionKind::GameYear,
            AvailabilityCondition::BuildingCount { .. } => ConditionKind::BuildingCount,
            AvailabilityCondition::RciGroupPopulation { .. } => ConditionKind::RciGroupPopulation,
            AvailabilityCondition::ScriptedPredicate { .. } => ConditionKind::ScriptedPredicate,
        }
    }

    pub fn evaluate(&self, ctx: &mut SimContext<'_>) -> bool {
        match self {
            AvailabilityCondition::GameYear { min_year } => ctx
                .city
                .and_then(|city| city.current_year())
                .is_some_and(|year| year >= *min_year),
            AvailabilityCondition::BuildingCount {
                building_type,
                min_count,
            } => BuildingCountProvider::building_count(ctx.city, *building_type) >= *min_count,
            AvailabilityCondition::RciGroupPopulation {
                group_id,
                min_population,
            } => PopulationProvider::group_population(ctx.city, *group_id) >= *min_population,
            AvailabilityCondition::ScriptedPredicate { function_name } => {
                evaluate_scripted(ctx, function_name)
            }
        }
    }
}

/// Scripted predicates fail closed: any failure makes the condition false.
fn evaluate_scripted(ctx: &mut SimContext<'_>, function_name: &str) -> bool {
    let result = match ctx.scripts.as_deref_mut() {
        Some(engine) => script::call_predicate(engine, function_name),
        None => Err(ScriptCallError::NoEngine),
    };
    match result {
        Ok(value) => value,
        Err(ScriptCallError::NoEngine) => {
            debug!(
                "Script function '{}' skipped: no script engine is active",
                function_name
            );
            false
        }
        Err(e) => {
            error!("Error calling script function '{}': {}", function_name, e);
            false
        }
    }
}

impl PersistedRule for AvailabilityCondition {
    const FAMILY: &'static str = "availability condition";

    fn tag(&self) -> u32 {
        self.kind() as u32
    }

    fn write_payload(&self, writer: &mut dyn Write) -> Result<(), StreamError> {
        writer.write_u32_le(RULE_PAYLOAD_VERSION)?;
        match self {
            AvailabilityCondition::GameYear { min_year } => writer.write_u32_le(*min_year),
            AvailabilityCondition::BuildingCount {
                building_type,
                min_count,
            } => {
                writer.write_u32_le(*building_type as u32)?;
                writer.write_u32_le(*min_count)
            }
            AvailabilityCondition::RciGroupPopulation {
                group_id,
                min_population,
            } => {
                writer.write_u32_le(*group_id)?;
                writer.write_i32_le(*min_population)
            }
            AvailabilityCondition::ScriptedPredicate { function_name } => {
                writer.write_string(function_name)
            }
        }
    }

    fn read_payload(tag: u32, reader: &mut dyn Read) -> Result<Self, StreamError> {
        let kind = ConditionKind::from_tag(tag).ok_or(StreamError::UnknownVariant {
            family: Self::FAMILY,
            tag,
        })?;
        reader.expect_version(Self::FAMILY, RULE_PAYLOAD_VERSION)?;
        let condition = match kind {
            ConditionKind::GameYear => AvailabilityCondition::GameYear {
                min_year: reader.read_u32_le()?,
            },
            ConditionKind::BuildingCount => {
                let raw = reader.read_u32_le()?;
                let building_type =
                    BuildingType::from_u32(raw).ok_or(StreamError::UnknownBuildingType(raw))?;
                AvailabilityCondition::BuildingCount {
                    building_type,
                    min_count: reader.read_u32_le()?,
                }
            }
            ConditionKind::RciGroupPopulation => {
                let group_id = reader.read_u32_le()?;
                AvailabilityCondition::RciGroupPopulation {
                    group_id,
                    min_population: reader.read_i32_le()?,
                }
            }
            ConditionKind::ScriptedPredicate => AvailabilityCondition::ScriptedPredicate {
                function_name: reader.read_string()?,
            },
        };
        Ok(condition)
    }
}
