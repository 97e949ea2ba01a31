//! Live city state seen by ordinance rules.
//!
//! The host publishes a [`CitySession`] while a city is open. Each subsystem
//! inside [`CityStats`] is optional; rules read through the providers in
//! [`crate::providers`], which turn any missing piece into a zero.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Building types
// =============================================================================

/// Civic building categories that can be counted.
///
/// Discriminants are persisted in save data and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
pub enum BuildingType {
    FireStation = 0,
    Hospital = 1,
    Jail = 2,
    PoliceStation = 3,
    School = 4,
}

impl BuildingType {
    pub const ALL: [BuildingType; 5] = [
        BuildingType::FireStation,
        BuildingType::Hospital,
        BuildingType::Jail,
        BuildingType::PoliceStation,
        BuildingType::School,
    ];

    pub fn from_u32(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| *t as u32 == value)
    }
}

// =============================================================================
// RCI groups
// =============================================================================

/// Residential/commercial/industrial demand groups, identified by the
/// simulation's demand ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RciGroup {
    ResLowWealth,
    ResMediumWealth,
    ResHighWealth,
    CsLowWealth,
    CsMediumWealth,
    CsHighWealth,
    CoMediumWealth,
    CoHighWealth,
    IndustrialResource,
    IndustrialDirty,
    IndustrialManufacturing,
    IndustrialHighTech,
}

impl RciGroup {
    pub const ALL: [RciGroup; 12] = [
        RciGroup::ResLowWealth,
        RciGroup::ResMediumWealth,
        RciGroup::ResHighWealth,
        RciGroup::CsLowWealth,
        RciGroup::CsMediumWealth,
        RciGroup::CsHighWealth,
        RciGroup::CoMediumWealth,
        RciGroup::CoHighWealth,
        RciGroup::IndustrialResource,
        RciGroup::IndustrialDirty,
        RciGroup::IndustrialManufacturing,
        RciGroup::IndustrialHighTech,
    ];

    /// Demand id used by the simulation and persisted in save data.
    pub const fn id(self) -> u32 {
        match self {
            RciGroup::ResLowWealth => 0x1010,
            RciGroup::ResMediumWealth => 0x1020,
            RciGroup::ResHighWealth => 0x1030,
            RciGroup::CsLowWealth => 0x3110,
            RciGroup::CsMediumWealth => 0x3120,
            RciGroup::CsHighWealth => 0x3130,
            RciGroup::CoMediumWealth => 0x3320,
            RciGroup::CoHighWealth => 0x3330,
            RciGroup::IndustrialResource => 0x4100,
            RciGroup::IndustrialDirty => 0x4200,
            RciGroup::IndustrialManufacturing => 0x4300,
            RciGroup::IndustrialHighTech => 0x4400,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.id() == id)
    }
}

// =============================================================================
// Counter interface
// =============================================================================

/// Read access to the counters of an active city.
///
/// `None` means the subsystem that owns the counter is not running.
pub trait CityCounters {
    fn building_count(&self, kind: BuildingType) -> Option<u32>;
    fn group_population(&self, group_id: u32) -> Option<i32>;
    fn total_residential_population(&self) -> Option<i32>;
    fn current_year(&self) -> Option<u32>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoliceCounts {
    pub stations: u32,
    pub jails: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentialCounts {
    pub population: i32,
    pub hospitals: u32,
    pub schools: u32,
}

/// Snapshot of the simulation subsystems an ordinance can query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityStats {
    pub fire_stations: Option<u32>,
    pub police: Option<PoliceCounts>,
    pub residential: Option<ResidentialCounts>,
    /// Supply value per demand id.
    pub demand: Option<BTreeMap<u32, i32>>,
    pub year: Option<u32>,
}

impl CityStats {
    /// All subsystems running with zeroed counters.
    pub fn running(year: u32) -> Self {
        Self {
            fire_stations: Some(0),
            police: Some(PoliceCounts::default()),
            residential: Some(ResidentialCounts::default()),
            demand: Some(BTreeMap::new()),
            year: Some(year),
        }
    }

    pub fn set_building_count(&mut self, kind: BuildingType, count: u32) {
        match kind {
            BuildingType::FireStation => self.fire_stations = Some(count),
            BuildingType::Hospital => {
                self.residential.get_or_insert_with(Default::default).hospitals = count;
            }
            BuildingType::Jail => self.police.get_or_insert_with(Default::default).jails = count,
            BuildingType::PoliceStation => {
                self.police.get_or_insert_with(Default::default).stations = count;
            }
            BuildingType::School => {
                self.residential.get_or_insert_with(Default::default).schools = count;
            }
        }
    }

    pub fn set_group_population(&mut self, group: RciGroup, population: i32) {
        self.demand
            .get_or_insert_with(BTreeMap::new)
            .insert(group.id(), population);
    }

    pub fn set_residential_population(&mut self, population: i32) {
        self.residential.get_or_insert_with(Default::default).population = population;
    }
}

impl CityCounters for CityStats {
    fn building_count(&self, kind: BuildingType) -> Option<u32> {
        match kind {
            BuildingType::FireStation => self.fire_stations,
            BuildingType::Hospital => self.residential.map(|r| r.hospitals),
            BuildingType::Jail => self.police.map(|p| p.jails),
            BuildingType::PoliceStation => self.police.map(|p| p.stations),
            BuildingType::School => self.residential.map(|r| r.schools),
        }
    }

    fn group_population(&self, group_id: u32) -> Option<i32> {
        self.demand
            .as_ref()
            .and_then(|demand| demand.get(&group_id).copied())
    }

    fn total_residential_population(&self) -> Option<i32> {
        self.residential.map(|r| r.population)
    }

    fn current_year(&self) -> Option<u32> {
        self.year
    }
}

// =============================================================================
// Resource
// =============================================================================

/// The active city, if any. Set when a city session starts, cleared when it ends.
#[derive(Resource, Debug, Clone, Default)]
pub struct CitySession {
    pub stats: Option<CityStats>,
}

impl CitySession {
    pub fn is_active(&self) -> bool {
        self.stats.is_some()
    }

    pub fn counters(&self) -> Option<&dyn CityCounters> {
        self.stats.as_ref().map(|s| s as &dyn CityCounters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_building_type_tags_are_stable() {
        assert_eq!(BuildingType::FireStation as u32, 0);
        assert_eq!(BuildingType::School as u32, 4);
        assert_eq!(BuildingType::from_u32(3), Some(BuildingType::PoliceStation));
        assert_eq!(BuildingType::from_u32(5), None);
    }

    #[test]
    fn test_group_ids_roundtrip() {
        for group in RciGroup::ALL {
            assert_eq!(RciGroup::from_id(group.id()), Some(group));
        }
        assert_eq!(RciGroup::from_id(0), None);
    }

    #[test]
    fn test_missing_subsystem_reports_none() {
        let stats = CityStats {
            fire_stations: Some(2),
            ..Default::default()
        };
        assert_eq!(stats.building_count(BuildingType::FireStation), Some(2));
        assert_eq!(stats.building_count(BuildingType::Jail), None);
        assert_eq!(stats.total_residential_population(), None);
        assert_eq!(stats.current_year(), None);
    }

    #[test]
    fn test_setters_enable_subsystems() {
        let mut stats = CityStats::default();
        stats.set_building_count(BuildingType::Hospital, 3);
        stats.set_group_population(RciGroup::IndustrialHighTech, 900);
        assert_eq!(stats.building_count(BuildingType::Hospital), Some(3));
        assert_eq!(stats.building_count(BuildingType::School), Some(0));
        assert_eq!(stats.group_population(0x4400), Some(900));
        assert_eq!(stats.group_population(0x4100), None);
    }

    #[test]
    fn test_session_inactive_by_default() {
        let session = CitySession::default();
        assert!(!session.is_active());
        assert!(session.counters().is_none());
    }
}
