//! Property ids read from ordinance definition records, and the tables that
//! map groups of them onto rule variants.

use crate::city::{BuildingType, RciGroup};

// =============================================================================
// Metadata
// =============================================================================

/// `[type, group, instance]` of the localized name.
pub const NAME_KEY: u32 = 0x6A416B21;
pub const NAME: u32 = 0x28EBBC32;
/// `[type, group, instance]` of the localized description.
pub const DESCRIPTION_KEY: u32 = 0xCA416B2A;
pub const DESCRIPTION: u32 = 0x28EBBC34;
pub const ENACTMENT_INCOME: u32 = 0x28EBBC37;
pub const RETRACTION_INCOME: u32 = 0x28EBBC38;
pub const MONTHLY_CONSTANT_INCOME: u32 = 0x28EBBC39;
pub const IS_INCOME: u32 = 0x28EBBC3C;

// =============================================================================
// Availability
// =============================================================================

pub const AVAILABILITY_GAME_YEAR: u32 = 0x28EBBC35;
/// Name of a script predicate. When set, all other availability properties are ignored.
pub const AVAILABILITY_SCRIPT_FUNCTION: u32 = 0x6B23D830;

pub const AVAILABILITY_MIN_BUILDING_COUNTS: [(u32, BuildingType); 5] = [
    (0x6B23D820, BuildingType::FireStation),
    (0x6B23D821, BuildingType::Hospital),
    (0x6B23D822, BuildingType::Jail),
    (0x6B23D823, BuildingType::PoliceStation),
    (0x6B23D824, BuildingType::School),
];

pub const AVAILABILITY_MIN_POPULATIONS: [(u32, RciGroup); 12] = [
    (0x6B23D800, RciGroup::ResLowWealth),
    (0x6B23D801, RciGroup::ResMediumWealth),
    (0x6B23D802, RciGroup::ResHighWealth),
    (0x6B23D803, RciGroup::CsLowWealth),
    (0x6B23D804, RciGroup::CsMediumWealth),
    (0x6B23D805, RciGroup::CsHighWealth),
    (0x6B23D806, RciGroup::CoMediumWealth),
    (0x6B23D807, RciGroup::CoHighWealth),
    (0x6B23D808, RciGroup::IndustrialResource),
    (0x6B23D809, RciGroup::IndustrialDirty),
    (0x6B23D80A, RciGroup::IndustrialManufacturing),
    (0x6B23D80B, RciGroup::IndustrialHighTech),
];

// =============================================================================
// Monthly income
// =============================================================================

/// Factor applied to the total residential population. Replaces the three
/// residential wealth factors when present.
pub const INCOME_FACTOR_RES_TOTAL_POPULATION: u32 = 0x28EBBC3A;
/// Name of a script income function. When set, all other factor properties are ignored.
pub const INCOME_FACTOR_SCRIPT_FUNCTION: u32 = 0x6B23D930;

pub const INCOME_FACTOR_RES_WEALTH: [(u32, RciGroup); 3] = [
    (0x6B23D900, RciGroup::ResLowWealth),
    (0x6B23D901, RciGroup::ResMediumWealth),
    (0x6B23D902, RciGroup::ResHighWealth),
];

pub const INCOME_FACTOR_CS_WEALTH: [(u32, RciGroup); 3] = [
    (0x6B23D903, RciGroup::CsLowWealth),
    (0x6B23D904, RciGroup::CsMediumWealth),
    (0x6B23D905, RciGroup::CsHighWealth),
];

pub const INCOME_FACTOR_CO_WEALTH: [(u32, RciGroup); 2] = [
    (0x6B23D906, RciGroup::CoMediumWealth),
    (0x6B23D907, RciGroup::CoHighWealth),
];

pub const INCOME_FACTOR_INDUSTRIAL: [(u32, RciGroup); 4] = [
    (0x6B23D908, RciGroup::IndustrialResource),
    (0x6B23D909, RciGroup::IndustrialDirty),
    (0x6B23D90A, RciGroup::IndustrialManufacturing),
    (0x6B23D90B, RciGroup::IndustrialHighTech),
];

pub const INCOME_FACTOR_BUILDING_COUNTS: [(u32, BuildingType); 5] = [
    (0x6B23D920, BuildingType::FireStation),
    (0x6B23D921, BuildingType::Hospital),
    (0x6B23D922, BuildingType::Jail),
    (0x6B23D923, BuildingType::PoliceStation),
    (0x6B23D924, BuildingType::School),
];
