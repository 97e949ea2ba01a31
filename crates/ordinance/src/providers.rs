//! Numeric query providers.
//!
//! Stateless lookups from a building type or demand group to a live value.
//! A missing city or subsystem reads as zero; nothing here fails or caches.

use crate::city::{BuildingType, CityCounters};

pub struct BuildingCountProvider;

impl BuildingCountProvider {
    pub fn building_count(city: Option<&dyn CityCounters>, kind: BuildingType) -> u32 {
        city.and_then(|c| c.building_count(kind)).unwrap_or(0)
    }
}

pub struct PopulationProvider;

impl PopulationProvider {
    pub fn group_population(city: Option<&dyn CityCounters>, group_id: u32) -> i32 {
        city.and_then(|c| c.group_population(group_id)).unwrap_or(0)
    }

    pub fn total_residential_population(city: Option<&dyn CityCounters>) -> i32 {
        city.and_then(|c| c.total_residential_population())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::{CityStats, RciGroup};

    #[test]
    fn test_no_city_reads_zero() {
        assert_eq!(BuildingCountProvider::building_count(None, BuildingType::Jail), 0);
        assert_eq!(PopulationProvider::group_population(None, 0x1010), 0);
        assert_eq!(PopulationProvider::total_residential_population(None), 0);
    }

    #[test]
    fn test_reads_live_values() {
        let mut stats = CityStats::running(2010);
        stats.set_building_count(BuildingType::School, 6);
        stats.set_group_population(RciGroup::CsHighWealth, -4);
        stats.set_residential_population(12_000);
        let city: Option<&dyn CityCounters> = Some(&stats);

        assert_eq!(BuildingCountProvider::building_count(city, BuildingType::School), 6);
        assert_eq!(
            PopulationProvider::group_population(city, RciGroup::CsHighWealth.id()),
            -4
        );
        assert_eq!(PopulationProvider::total_residential_population(city), 12_000);
    }

    #[test]
    fn test_unknown_group_reads_zero() {
        let stats = CityStats::running(2010);
        assert_eq!(PopulationProvider::group_population(Some(&stats), 0xFFFF), 0);
    }
}
