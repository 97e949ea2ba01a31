//! Monthly income factors.
//!
//! Each factor maps a running monthly total to a new one. The ordinance folds
//! its factors over the constant monthly income in list order.

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
pub enum FactorKind {
    TotalResidentialPopulation = 0,
    RciGroupPopulation = 1,
    BuildingCount = 2,
    ScriptedFunction = 3,
}

impl FactorKind {
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(FactorKind::TotalResidentialPopulation),
            1 => Some(FactorKind::RciGroupPopulation),
            2 => Some(FactorKind::BuildingCount),
            3 => Some(FactorKind::ScriptedFunction),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IncomeFactor {
    /// Adds `total residential population * factor`.
    TotalResidentialPopulation { factor: f32 },
    /// Adds `population of group_id * factor`.
    RciGroupPopulation { group_id: u32, factor: f32 },
    /// Adds `count of building_type * factor`.
    BuildingCount {
        building_type: BuildingType,
        factor: f32,
    },
    /// Replaces the total with `function_name(total)`.
    ScriptedFunction { function_name: String },
}

impl IncomeFactor {
    pub fn kind(&self) -> FactorKind {
        match self {
            IncomeFactor::TotalResidentialPopulation { .. } => {
                FactorKind::TotalResidentialPopulation
            }
            IncomeFactor::RciGroupPopulation { .. } => FactorKind::RciGroupPopulation,
            IncomeFactor::BuildingCount { .. } => FactorKind::BuildingCount,
            IncomeFactor::ScriptedFunction { .. } => FactorKind::ScriptedFunction,
        }
    }

    pub fn apply(&self, running_total: f64, ctx: &mut SimContext<'_>) -> f64 {
        match self {
            IncomeFactor::TotalResidentialPopulation { factor } => {
                let population = PopulationProvider::total_residential_population(ctx.city);
                running_total + f64::from(population) * f64::from(*factor)
            }
            IncomeFactor::RciGroupPopulation { group_id, factor } => {
                let population = PopulationProvider::group_population(ctx.city, *group_id);
                running_total + f64::from(population) * f64::from(*factor)
            }
            IncomeFactor::BuildingCount {
                building_type,
                factor,
            } => {
                let count = BuildingCountProvider::building_count(ctx.city, *building_type);
                running_total + f64::from(count) * f64::from(*factor)
            }
            IncomeFactor::ScriptedFunction { function_name } => {
                apply_scripted(ctx, function_name, running_total)
            }
        }
    }
}

/// Scripted functions fail open: any failure passes the total through.
fn apply_scripted(ctx: &mut SimContext<'_>, function_name: &str, running_total: f64) -> f64 {
    let result = match ctx.scripts.as_deref_mut() {
        Some(engine) => script::call_number_function(engine, function_name, running_total),
        None => Err(ScriptCallError::NoEngine),
    };
    match result {
        Ok(value) => value,
        Err(ScriptCallError::NoEngine) => {
            debug!(
                "Script function '{}' skipped: no script engine is active",
                function_name
            );
            running_total
        }
        Err(e) => {
            error!("Error calling script function '{}': {}", function_name, e);
            running_total
        }
    }
}

impl PersistedRule for IncomeFactor {
    const FAMILY: &'static str = "income factor";

    fn tag(&self) -> u32 {
        self.kind() as u32
    }

    fn write_payload(&self, writer: &mut dyn Write) -> Result<(), StreamError> {
        writer.write_u32_le(RULE_PAYLOAD_VERSION)?;
        match self {
            IncomeFactor::TotalResidentialPopulation { factor } => writer.write_f32_le(*factor),
            IncomeFactor::RciGroupPopulation { group_id, factor } => {
                writer.write_u32_le(*group_id)?;
                writer.write_f32_le(*factor)
            }
            IncomeFactor::BuildingCount {
                building_type,
                factor,
            } => {
                writer.write_u32_le(*building_type as u32)?;
                writer.write_f32_le(*factor)
            }
            IncomeFactor::ScriptedFunction { function_name } => writer.write_string(function_name),
        }
    }

    fn read_payload(tag: u32, reader: &mut dyn Read) -> Result<Self, StreamError> {
        let kind = FactorKind::from_tag(tag).ok_or(StreamError::UnknownVariant {
            family: Self::FAMILY,
            tag,
        })?;
        reader.expect_version(Self::FAMILY, RULE_PAYLOAD_VERSION)?;
        let factor = match kind {
            FactorKind::TotalResidentialPopulation => IncomeFactor::TotalResidentialPopulation {
                factor: reader.read_f32_le()?,
            },
            FactorKind::RciGroupPopulation => {
                let group_id = reader.read_u32_le()?;
                IncomeFactor::RciGroupPopulation {
                    group_id,
                    factor: reader.read_f32_le()?,
                }
            }
            FactorKind::BuildingCount => {
                let raw = reader.read_u32_le()?;
                let building_type =
                    BuildingType::from_u32(raw).ok_or(StreamError::UnknownBuildingType(raw))?;
                IncomeFactor::BuildingCount {
                    building_type,
                    factor: reader.read_f32_le()?,
                }
            }
            FactorKind::ScriptedFunction => IncomeFactor::ScriptedFunction {
                function_name: reader.read_string()?,
            },
        };
        Ok(factor)
    }
}
