//! The collection of ordinances owned by the active city.

use bevy::prelude::*;

use crate::context::SimContext;
use crate::definition::DefinitionCatalog;
use crate::ordinance::{HostResources, Ordinance};

/// Outcome of one monthly pass.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrdinanceLedger {
    /// Sum of the adjusted income of every enacted ordinance.
    pub monthly_income: i64,
    pub available: usize,
    pub enacted: usize,
    pub months_simulated: u32,
}

/// Ordinances of the active city, in registration order.
#[derive(Resource, Debug, Default)]
pub struct OrdinanceSimulator {
    ordinances: Vec<Ordinance>,
}

impl OrdinanceSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ordinances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ordinance> {
        self.ordinances.iter()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: u32) -> Option<&Ordinance> {
        self.ordinances.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Ordinance> {
        self.ordinances.iter_mut().find(|o| o.id() == id)
    }

    /// Adds `ordinance` unless one with the same id is already present.
    pub fn add(&mut self, ordinance: Ordinance) -> bool {
        if self.contains(ordinance.id()) {
            warn!("Ordinance 0x{:08x} is already registered", ordinance.id());
            return false;
        }
        self.ordinances.push(ordinance);
        true
    }

    /// Replaces every ordinance, e.g. with the contents of a loaded save.
    pub fn replace_all(&mut self, ordinances: Vec<Ordinance>) {
        self.ordinances = ordinances;
    }

    pub fn clear(&mut self) {
        self.ordinances.clear();
    }

    // =========================================================================
    // City lifecycle
    // =========================================================================

    /// Creates an ordinance for every catalog entry that has none yet, then
    /// initializes all of them. Restored ordinances keep their saved state.
    /// Returns the number of ordinances created.
    pub fn start_city(&mut self, catalog: &DefinitionCatalog, host: &HostResources<'_>) -> usize {
        let mut created = 0;
        for key in catalog.keys() {
            if !self.contains(key.instance) {
                self.ordinances.push(Ordinance::new(*key));
                created += 1;
            }
        }
        for ordinance in &mut self.ordinances {
            ordinance.init(host);
        }
        created
    }

    /// Shuts every ordinance down and drops them.
    pub fn shutdown_city(&mut self) {
        for ordinance in &mut self.ordinances {
            ordinance.shutdown();
        }
        self.ordinances.clear();
    }

    /// Monthly pass: refreshes availability and simulates enacted ordinances.
    pub fn simulate_month(&mut self, ctx: &mut SimContext<'_>) -> OrdinanceLedger {
        let mut ledger = OrdinanceLedger::default();
        for ordinance in &mut self.ordinances {
            let available = ordinance.check_conditions(ctx);
            if available != ordinance.is_available() {
                ordinance.set_available(available);
                debug!(
                    "Ordinance '{}' is now {}",
                    ordinance.name(),
                    if available { "available" } else { "unavailable" }
                );
            }
            if available {
                ledger.available += 1;
            }
            if ordinance.is_on() {
                ordinance.simulate(ctx);
                ledger.enacted += 1;
                ledger.monthly_income = ledger
                    .monthly_income
                    .saturating_add(ordinance.monthly_adjusted_income());
            }
        }
        ledger
    }

    // =========================================================================
    // Player actions
    // =========================================================================

    /// Turns on an available ordinance. Returns its enactment income.
    pub fn enact(&mut self, id: u32) -> Option<i64> {
        let ordinance = self.get_mut(id)?;
        if !ordinance.is_available() || ordinance.is_on() {
            return None;
        }
        ordinance.set_on(true);
        info!("Enacted ordinance '{}'", ordinance.name());
        Some(ordinance.enactment_income())
    }

    /// Turns off an enacted ordinance. Returns its retraction income.
    pub fn retract(&mut self, id: u32) -> Option<i64> {
        let ordinance = self.get_mut(id)?;
        if !ordinance.is_on() {
            return None;
        }
        ordinance.set_on(false);
        info!("Retracted ordinance '{}'", ordinance.name());
        Some(ordinance.retraction_income())
    }

    /// Sum of the stored adjusted income of ordinances that are on.
    pub fn total_monthly_income(&self) -> i64 {
        self.ordinances
            .iter()
            .filter(|o| o.is_on())
            .fold(0i64, |total, o| total.saturating_add(o.monthly_adjusted_income()))
    }
}
