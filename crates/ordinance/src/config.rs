use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Version written at the head of every ordinance record.
pub const ORDINANCE_RECORD_VERSION: u32 = 1;

/// Version written at the head of every condition/factor payload and of the
/// property holder block.
pub const RULE_PAYLOAD_VERSION: u32 = 1;

/// First simulated year of a new city. Year thresholds at or below this are ignored.
pub const SIMULATION_START_YEAR: u32 = 2000;

/// Property id holding the definition's exemplar type.
pub const EXEMPLAR_TYPE_PROPERTY: u32 = 0x10;

/// Exemplar type value that marks a definition as an ordinance.
pub const ORDINANCE_EXEMPLAR_TYPE: u32 = 14;

/// Class ids of the base-game ordinances. Custom definitions may not reuse them.
pub const RESERVED_ORDINANCE_IDS: [(u32, &str); 20] = [
    (0xA2BF1DDC, "Carpool Incentive"),
    (0xA2BF1E43, "Clean Air"),
    (0x00D0723D, "CPR Training"),
    (0x40D07236, "Free Clinics"),
    (0x815B4CEF, "Junior Sports League"),
    (0x22F6E80C, "Landfill Gas Recovery"),
    (0xA0D07129, "Legalize Gambling"),
    (0x62BF1DAA, "Mandatory Smoke Detectors"),
    (0x62BF1DB9, "Neighborhood Watch"),
    (0xE0D0722E, "Nuclear Free Zone"),
    (0x22F6E81B, "Paper Reduction Act"),
    (0x82B9999B, "Power Conservation"),
    (0xE0D07233, "Pro Reading Campaign"),
    (0xA2BF1DE5, "Shuttle Service"),
    (0xC2F6E81F, "Tire Recycling"),
    (0x62F6E7CF, "Tourist Promotion"),
    (0x42BF1E18, "Trash Presort"),
    (0xC2BF1E04, "Vehicle Emission Standard"),
    (0x02BF1DFA, "Water Conservation"),
    (0xC2BF1DC5, "Youth Curfew"),
];

/// Returns the base-game ordinance name if `id` is reserved.
pub fn reserved_ordinance_name(id: u32) -> Option<&'static str> {
    RESERVED_ORDINANCE_IDS
        .iter()
        .find(|(reserved, _)| *reserved == id)
        .map(|(_, name)| *name)
}

/// Runtime settings for the ordinance host.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdinanceSettings {
    /// LZ4-compress the ordinance save segment.
    pub compress_save_segment: bool,
    /// Log every accepted definition key when the catalog is built.
    pub log_registered_ids: bool,
}

impl Default for OrdinanceSettings {
    fn default() -> Self {
        Self {
            compress_save_segment: true,
            log_registered_ids: false,
        }
    }
}
