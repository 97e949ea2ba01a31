//! Derives an ordinance's default metadata and rules from its definition.

use super::property_ids as ids;
use super::record::DefinitionRecord;
use crate::availability::AvailabilityCondition;
use crate::city::RciGroup;
use crate::config::SIMULATION_START_YEAR;
use crate::income::IncomeFactor;
use crate::resource_key::StringResourceKey;

/// Name and economics read from a definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrdinanceMetadata {
    pub name: String,
    pub name_key: StringResourceKey,
    pub description: String,
    pub description_key: StringResourceKey,
    pub enactment_income: i64,
    pub retraction_income: i64,
    pub monthly_constant_income: i64,
    pub is_income: bool,
}

/// Reads the name, description and income properties.
///
/// A string key takes the place of the literal text: when the key is present
/// the text is left empty until it is localized. With neither present, the
/// text falls back to the instance id.
pub fn read_metadata(record: &DefinitionRecord) -> OrdinanceMetadata {
    let fallback = || format!("0x{:08x}", record.key.instance);
    let mut metadata = OrdinanceMetadata::default();

    match record.string_key(ids::NAME_KEY) {
        Some(key) => metadata.name_key = key,
        None => {
            metadata.name = record
                .string(ids::NAME)
                .map_or_else(fallback, str::to_string);
        }
    }
    match record.string_key(ids::DESCRIPTION_KEY) {
        Some(key) => metadata.description_key = key,
        None => {
            metadata.description = record
                .string(ids::DESCRIPTION)
                .map_or_else(fallback, str::to_string);
        }
    }

    metadata.enactment_income = record.sint64(ids::ENACTMENT_INCOME).unwrap_or(0);
    metadata.retraction_income = record.sint64(ids::RETRACTION_INCOME).unwrap_or(0);
    metadata.monthly_constant_income = record.sint64(ids::MONTHLY_CONSTANT_INCOME).unwrap_or(0);
    metadata.is_income = record.bool(ids::IS_INCOME).unwrap_or(false);
    metadata
}

fn script_function(record: &DefinitionRecord, id: u32) -> Option<String> {
    record
        .string(id)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Builds the availability conditions.
///
/// A script predicate replaces every other condition. Otherwise the order is
/// year, building counts, then group populations; zero thresholds are skipped.
pub fn read_conditions(record: &DefinitionRecord) -> Vec<AvailabilityCondition> {
    if let Some(function_name) = script_function(record, ids::AVAILABILITY_SCRIPT_FUNCTION) {
        return vec![AvailabilityCondition::ScriptedPredicate { function_name }];
    }

    let mut conditions = Vec::new();

    if let Some(min_year) = record
        .uint32(ids::AVAILABILITY_GAME_YEAR)
        .filter(|year| *year > SIMULATION_START_YEAR)
    {
        conditions.push(AvailabilityCondition::GameYear { min_year });
    }

    for (id, building_type) in ids::AVAILABILITY_MIN_BUILDING_COUNTS {
        if let Some(min_count) = record.uint32(id).filter(|count| *count > 0) {
            conditions.push(AvailabilityCondition::BuildingCount {
                building_type,
                min_count,
            });
        }
    }

    for (id, group) in ids::AVAILABILITY_MIN_POPULATIONS {
        if let Some(min) = record.uint32(id).filter(|min| *min > 0) {
            conditions.push(AvailabilityCondition::RciGroupPopulation {
                group_id: group.id(),
                min_population: i32::try_from(min).unwrap_or(i32::MAX),
            });
        }
    }

    conditions
}

/// Builds the monthly income factors.
///
/// A script function replaces every other factor. A total residential
/// factor replaces the three residential wealth factors; commercial,
/// industrial and building factors always apply. Zero factors are kept.
pub fn read_factors(record: &DefinitionRecord) -> Vec<IncomeFactor> {
    if let Some(function_name) = script_function(record, ids::INCOME_FACTOR_SCRIPT_FUNCTION) {
        return vec![IncomeFactor::ScriptedFunction { function_name }];
    }

    let mut factors = Vec::new();

    match record.float32(ids::INCOME_FACTOR_RES_TOTAL_POPULATION) {
        Some(factor) => factors.push(IncomeFactor::TotalResidentialPopulation { factor }),
        None => push_group_factors(record, &ids::INCOME_FACTOR_RES_WEALTH, &mut factors),
    }
    push_group_factors(record, &ids::INCOME_FACTOR_CS_WEALTH, &mut factors);
    push_group_factors(record, &ids::INCOME_FACTOR_CO_WEALTH, &mut factors);
    push_group_factors(record, &ids::INCOME_FACTOR_INDUSTRIAL, &mut factors);

    for (id, building_type) in ids::INCOME_FACTOR_BUILDING_COUNTS {
        if let Some(factor) = record.float32(id) {
            factors.push(IncomeFactor::BuildingCount {
                building_type,
                factor,
            });
        }
    }

    factors
}

fn push_group_factors(
    record: &DefinitionRecord,
    table: &[(u32, RciGroup)],
    factors: &mut Vec<IncomeFactor>,
) {
    for (id, group) in table {
        if let Some(factor) = record.float32(*id) {
            factors.push(IncomeFactor::RciGroupPopulation {
                group_id: group.id(),
                factor,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::{BuildingType, RciGroup};
    use crate::definition::record::PropertyValue;
    use crate::resource_key::ResourceKey;

    fn record() -> DefinitionRecord {
        DefinitionRecord::new(ResourceKey::new(0x6534284A, 0x4A8F8A63, 0xABCD0001))
    }

    #[test]
    fn test_metadata_falls_back_to_instance_id() {
        let metadata = read_metadata(&record());
        assert_eq!(metadata.name, "0xabcd0001");
        assert_eq!(metadata.description, "0xabcd0001");
        assert_eq!(metadata.enactment_income, 0);
        assert!(!metadata.is_income);
    }

    #[test]
    fn test_metadata_reads_text_and_economics() {
        let record = record()
            .with(ids::NAME, PropertyValue::String("Bike Lanes".into()))
            .with(ids::DESCRIPTION_KEY, PropertyValue::Uint32Array(vec![0x2026960B, 7, 8]))
            .with(ids::DESCRIPTION, PropertyValue::String("ignored".into()))
            .with(ids::ENACTMENT_INCOME, PropertyValue::Sint64(-1_000))
            .with(ids::RETRACTION_INCOME, PropertyValue::Sint64(-250))
            .with(ids::MONTHLY_CONSTANT_INCOME, PropertyValue::Sint64(-40))
            .with(ids::IS_INCOME, PropertyValue::Bool(true));
        let metadata = read_metadata(&record);
        assert_eq!(metadata.name, "Bike Lanes");
        assert_eq!(metadata.name_key, StringResourceKey::default());
        assert_eq!(metadata.description, "");
        assert_eq!(metadata.description_key, StringResourceKey::new(7, 8));
        assert_eq!(metadata.enactment_income, -1_000);
        assert_eq!(metadata.retraction_income, -250);
        assert_eq!(metadata.monthly_constant_income, -40);
        assert!(metadata.is_income);
    }

    #[test]
    fn test_condition_order_and_thresholds() {
        let record = record()
            .with(ids::AVAILABILITY_GAME_YEAR, PropertyValue::Uint32(2010))
            .with(0x6B23D80B, PropertyValue::Uint32(500))
            .with(0x6B23D800, PropertyValue::Uint32(0))
            .with(0x6B23D824, PropertyValue::Uint32(2))
            .with(0x6B23D820, PropertyValue::Uint32(1));
        assert_eq!(
            read_conditions(&record),
            vec![
                AvailabilityCondition::GameYear { min_year: 2010 },
                AvailabilityCondition::BuildingCount {
                    building_type: BuildingType::FireStation,
                    min_count: 1,
                },
                AvailabilityCondition::BuildingCount {
                    building_type: BuildingType::School,
                    min_count: 2,
                },
                AvailabilityCondition::RciGroupPopulation {
                    group_id: RciGroup::IndustrialHighTech.id(),
                    min_population: 500,
                },
            ]
        );
    }

    #[test]
    fn test_start_year_is_ignored() {
        let record = record().with(ids::AVAILABILITY_GAME_YEAR, PropertyValue::Uint32(2000));
        assert!(read_conditions(&record).is_empty());
    }

    #[test]
    fn test_script_predicate_takes_precedence() {
        let record = record()
            .with(ids::AVAILABILITY_GAME_YEAR, PropertyValue::Uint32(2050))
            .with(
                ids::AVAILABILITY_SCRIPT_FUNCTION,
                PropertyValue::String("can_enact".into()),
            );
        assert_eq!(
            read_conditions(&record),
            vec![AvailabilityCondition::ScriptedPredicate {
                function_name: "can_enact".into()
            }]
        );

        let empty_name = record
            .clone()
            .with(ids::AVAILABILITY_SCRIPT_FUNCTION, PropertyValue::String(String::new()));
        assert_eq!(
            read_conditions(&empty_name),
            vec![AvailabilityCondition::GameYear { min_year: 2050 }]
        );
    }

    #[test]
    fn test_total_population_replaces_res_wealth_factors() {
        let record = record()
            .with(0x6B23D900, PropertyValue::Float32(1.0))
            .with(0x6B23D903, PropertyValue::Float32(0.0))
            .with(0x6B23D921, PropertyValue::Float32(-5.0))
            .with(ids::INCOME_FACTOR_RES_TOTAL_POPULATION, PropertyValue::Float32(0.1));
        assert_eq!(
            read_factors(&record),
            vec![
                IncomeFactor::TotalResidentialPopulation { factor: 0.1 },
                IncomeFactor::RciGroupPopulation {
                    group_id: RciGroup::CsLowWealth.id(),
                    factor: 0.0,
                },
                IncomeFactor::BuildingCount {
                    building_type: BuildingType::Hospital,
                    factor: -5.0,
                },
            ]
        );
    }

    #[test]
    fn test_res_wealth_factors_without_total() {
        let record = record()
            .with(0x6B23D902, PropertyValue::Float32(0.3))
            .with(0x6B23D900, PropertyValue::Float32(0.1))
            .with(0x6B23D90A, PropertyValue::Float32(0.2));
        assert_eq!(
            read_factors(&record),
            vec![
                IncomeFactor::RciGroupPopulation {
                    group_id: RciGroup::ResLowWealth.id(),
                    factor: 0.1,
                },
                IncomeFactor::RciGroupPopulation {
                    group_id: RciGroup::ResHighWealth.id(),
                    factor: 0.3,
                },
                IncomeFactor::RciGroupPopulation {
                    group_id: RciGroup::IndustrialManufacturing.id(),
                    factor: 0.2,
                },
            ]
        );
    }

    #[test]
    fn test_script_function_takes_precedence() {
        let record = record()
            .with(0x6B23D900, PropertyValue::Float32(0.1))
            .with(
                ids::INCOME_FACTOR_SCRIPT_FUNCTION,
                PropertyValue::String("income".into()),
            );
        assert_eq!(
            read_factors(&record),
            vec![IncomeFactor::ScriptedFunction {
                function_name: "income".into()
            }]
        );
    }
}
