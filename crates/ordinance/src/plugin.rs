use bevy::prelude::*;

use crate::city::{CityStats, CitySession};
use crate::config::OrdinanceSettings;
use crate::context::SimContext;
use crate::definition::DefinitionCatalog;
use crate::localization::StringTable;
use crate::ordinance::HostResources;
use crate::script::{ScriptEngine, ScriptHost};
use crate::simulator::{OrdinanceLedger, OrdinanceSimulator};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A city was opened. Its subsystems become visible to ordinance rules.
#[derive(Event, Debug, Clone)]
pub struct CityStarted {
    pub stats: CityStats,
}

/// The active city was closed.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct CityShutdown;

/// One simulated month passed.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct MonthElapsed;

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct OrdinancePlugin;

impl Plugin for OrdinancePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CityStarted>()
            .add_event::<CityShutdown>()
            .add_event::<MonthElapsed>()
            .init_resource::<OrdinanceSettings>()
            .init_resource::<DefinitionCatalog>()
            .init_resource::<StringTable>()
            .init_resource::<CitySession>()
            .init_resource::<ScriptHost>()
            .init_resource::<OrdinanceSimulator>()
            .init_resource::<OrdinanceLedger>();

        app.add_systems(
            Update,
            (start_city, run_monthly_pass, shutdown_city).chain(),
        );
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

fn start_city(
    mut events: EventReader<CityStarted>,
    catalog: Res<DefinitionCatalog>,
    strings: Res<StringTable>,
    mut session: ResMut<CitySession>,
    mut simulator: ResMut<OrdinanceSimulator>,
) {
    // Only the latest start matters.
    let Some(started) = events.read().last() else {
        return;
    };
    session.stats = Some(started.stats.clone());

    let host = HostResources::new(&*catalog, &*strings);
    let created = simulator.start_city(&catalog, &host);
    info!(
        "City started with {} ordinance(s), {} created from {} definition(s)",
        simulator.len(),
        created,
        catalog.len()
    );
}

fn run_monthly_pass(
    mut events: EventReader<MonthElapsed>,
    session: Res<CitySession>,
    mut scripts: ResMut<ScriptHost>,
    mut simulator: ResMut<OrdinanceSimulator>,
    mut ledger: ResMut<OrdinanceLedger>,
) {
    let months = events.read().count();
    if months == 0 || !session.is_active() {
        return;
    }

    for _ in 0..months {
        let mut ctx = SimContext {
            city: session.counters(),
            scripts: scripts
                .engine
                .as_deref_mut()
                .map(|engine| engine as &mut dyn ScriptEngine),
        };
        let summary = simulator.simulate_month(&mut ctx);
        *ledger = OrdinanceLedger {
            months_simulated: ledger.months_simulated + 1,
            ..summary
        };
    }
}

fn shutdown_city(
    mut events: EventReader<CityShutdown>,
    mut session: ResMut<CitySession>,
    mut simulator: ResMut<OrdinanceSimulator>,
    mut ledger: ResMut<OrdinanceLedger>,
) {
    if events.read().count() == 0 {
        return;
    }
    simulator.shutdown_city();
    session.stats = None;
    *ledger = OrdinanceLedger::default();
    info!("City shut down; ordinances released");
}
