//! End-to-end monthly cycle through the bevy host.

use ordinance::config::{EXEMPLAR_TYPE_PROPERTY, ORDINANCE_EXEMPLAR_TYPE};
use ordinance::definition::property_ids as ids;
use ordinance::script::{NativeScriptEngine, ScriptValue};
use ordinance::test_harness::TestHost;
use ordinance::{
    BuildingType, CityStats, DefinitionCatalog, DefinitionRecord, OrdinanceLedger,
    OrdinanceSettings, PropertyValue, RciGroup, ResourceKey, StringResourceKey,
};

const GROUP: u32 = 0x4A8F8A63;
const TYPE: u32 = 0x6534284A;

fn definition(instance: u32) -> DefinitionRecord {
    DefinitionRecord::new(ResourceKey::new(TYPE, GROUP, instance))
        .with(EXEMPLAR_TYPE_PROPERTY, PropertyValue::Uint32(ORDINANCE_EXEMPLAR_TYPE))
}

fn bike_lanes() -> DefinitionRecord {
    definition(0x1001)
        .with(ids::NAME, PropertyValue::String("Bike Lanes".into()))
        .with(ids::ENACTMENT_INCOME, PropertyValue::Sint64(-1_000))
        .with(ids::RETRACTION_INCOME, PropertyValue::Sint64(-50))
        .with(ids::MONTHLY_CONSTANT_INCOME, PropertyValue::Sint64(-100))
        .with(0x6B23D823, PropertyValue::Uint32(2))
        .with(0x6B23D923, PropertyValue::Float32(-10.0))
}

#[test]
fn test_ordinance_becomes_available_and_books_income() {
    let mut host = TestHost::new().with_definition(bike_lanes());
    host.start_city(CityStats::running(2000));
    assert!(host.city_active());

    let ordinance = host.ordinance(0x1001).unwrap();
    assert!(ordinance.is_enabled());
    assert_eq!(ordinance.name(), "Bike Lanes");

    host.advance_months(1);
    assert!(!host.ordinance(0x1001).unwrap().is_available());
    assert_eq!(host.enact(0x1001), None);

    host.edit_city(|city| city.set_building_count(BuildingType::PoliceStation, 2));
    host.advance_months(1);
    assert!(host.ordinance(0x1001).unwrap().is_available());
    assert_eq!(host.enact(0x1001), Some(-1_000));

    host.advance_months(1);
    assert_eq!(host.ordinance(0x1001).unwrap().monthly_adjusted_income(), -120);
    let ledger = host.ledger();
    assert_eq!(ledger.monthly_income, -120);
    assert_eq!(ledger.enacted, 1);
    assert_eq!(ledger.months_simulated, 3);

    assert_eq!(host.retract(0x1001), Some(-50));
    host.advance_months(1);
    assert_eq!(host.ledger().monthly_income, 0);
}

#[test]
fn test_losing_a_condition_withdraws_the_ordinance() {
    let mut host = TestHost::new().with_definition(bike_lanes());
    let mut stats = CityStats::running(2000);
    stats.set_building_count(BuildingType::PoliceStation, 3);
    host.start_city(stats);
    host.advance_months(1);
    host.enact(0x1001);
    host.advance_months(1);
    assert!(host.ordinance(0x1001).unwrap().is_on());

    host.edit_city(|city| city.set_building_count(BuildingType::PoliceStation, 1));
    host.advance_months(1);
    let ordinance = host.ordinance(0x1001).unwrap();
    assert!(!ordinance.is_available());
    assert!(!ordinance.is_on());
    assert_eq!(ordinance.monthly_adjusted_income(), 0);
}

#[test]
fn test_scripted_rules() {
    let mut engine = NativeScriptEngine::new();
    engine.register_function("after_2010", |_| Ok(vec![ScriptValue::Boolean(true)]));
    engine.register_function("tax_half", |args| match args.first() {
        Some(ScriptValue::Number(n)) => Ok(vec![ScriptValue::Number(n / 2.0)]),
        _ => Err("expected a number".into()),
    });

    let record = definition(0x2002)
        .with(ids::MONTHLY_CONSTANT_INCOME, PropertyValue::Sint64(500))
        .with(ids::IS_INCOME, PropertyValue::Bool(true))
        .with(
            ids::AVAILABILITY_SCRIPT_FUNCTION,
            PropertyValue::String("after_2010".into()),
        )
        .with(
            ids::INCOME_FACTOR_SCRIPT_FUNCTION,
            PropertyValue::String("tax_half".into()),
        );

    let mut host = TestHost::new()
        .with_definition(record)
        .with_script_engine(engine);
    host.start_city(CityStats::running(2011));
    host.advance_months(1);
    assert_eq!(host.enact(0x2002), Some(0));
    host.advance_months(1);

    let ordinance = host.ordinance(0x2002).unwrap();
    assert!(ordinance.is_income_ordinance());
    assert_eq!(ordinance.monthly_adjusted_income(), 250);
}

#[test]
fn test_missing_script_engine_fails_closed() {
    let record = definition(0x3003).with(
        ids::AVAILABILITY_SCRIPT_FUNCTION,
        PropertyValue::String("anything".into()),
    );
    let mut host = TestHost::new().with_definition(record);
    host.start_city(CityStats::running(2001));
    host.advance_months(2);
    assert!(!host.ordinance(0x3003).unwrap().is_available());
}

#[test]
fn test_population_condition_and_localized_name() {
    let record = definition(0x4004)
        .with(ids::NAME_KEY, PropertyValue::Uint32Array(vec![0x2026960B, 9, 1]))
        .with(ids::DESCRIPTION_KEY, PropertyValue::Uint32Array(vec![0x2026960B, 9, 2]))
        .with(0x6B23D802, PropertyValue::Uint32(1_000));
    let mut host = TestHost::new()
        .with_definition(record)
        .with_string(StringResourceKey::new(9, 1), "Luxury Tax")
        .with_string(StringResourceKey::new(9, 2), "Tax the rich.");
    host.start_city(CityStats::running(2001));

    let ordinance = host.ordinance(0x4004).unwrap();
    assert_eq!(ordinance.name(), "Luxury Tax");
    assert_eq!(ordinance.description(), "Tax the rich.");

    host.edit_city(|city| city.set_group_population(RciGroup::ResHighWealth, 1_000));
    host.advance_months(1);
    assert!(host.ordinance(0x4004).unwrap().is_available());
}

#[test]
fn test_months_without_a_city_do_nothing() {
    let mut host = TestHost::new().with_definition(bike_lanes());
    host.advance_months(3);
    assert!(host.simulator().is_empty());
    assert_eq!(host.ledger().months_simulated, 0);
}

#[test]
fn test_shutdown_releases_ordinances() {
    let mut host = TestHost::new().with_definition(bike_lanes());
    host.start_city(CityStats::running(2000));
    assert_eq!(host.simulator().len(), 1);

    host.shutdown_city();
    assert!(!host.city_active());
    assert!(host.simulator().is_empty());
    assert_eq!(host.ledger(), OrdinanceLedger::default());
}

#[test]
fn test_definitions_from_json() {
    let json = format!(
        r#"[
            {{
                "key": {{ "type": {TYPE}, "group": {GROUP}, "instance": 20480 }},
                "properties": {{
                    "16": {{ "type": "Uint32", "value": 14 }},
                    "{name}": {{ "type": "String", "value": "Recycling Drive" }},
                    "{constant}": {{ "type": "Sint64", "value": -75 }}
                }}
            }},
            {{
                "key": {{ "type": {TYPE}, "group": {GROUP}, "instance": 20481 }},
                "properties": {{ "16": {{ "type": "Uint32", "value": 2 }} }}
            }}
        ]"#,
        name = ids::NAME,
        constant = ids::MONTHLY_CONSTANT_INCOME,
    );
    let records = DefinitionRecord::list_from_json(&json).unwrap();
    assert_eq!(records.len(), 2);

    let mut host = TestHost::new();
    let accepted = host
        .world_mut()
        .resource_mut::<DefinitionCatalog>()
        .register_all(records, &OrdinanceSettings::default());
    assert_eq!(accepted, 1);

    host.start_city(CityStats::running(2000));
    let ordinance = host.ordinance(0x5000).unwrap();
    assert_eq!(ordinance.name(), "Recycling Drive");
    assert_eq!(ordinance.monthly_constant_income(), -75);
}
