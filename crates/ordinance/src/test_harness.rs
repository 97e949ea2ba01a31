//! # TestHost: headless harness for ordinance integration tests
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` + [`OrdinancePlugin`] and
//! exposes a fluent API for registering definitions, opening a city and
//! advancing months.

use bevy::app::App;
use bevy::prelude::*;

use crate::city::{CitySession, CityStats};
use crate::config::OrdinanceSettings;
use crate::definition::{DefinitionCatalog, DefinitionRecord};
use crate::localization::StringTable;
use crate::ordinance::Ordinance;
use crate::plugin::{CityShutdown, CityStarted, MonthElapsed, OrdinancePlugin};
use crate::resource_key::StringResourceKey;
use crate::script::{ScriptEngine, ScriptHost};
use crate::simulator::{OrdinanceLedger, OrdinanceSimulator};

pub struct TestHost {
    app: App,
}

impl Default for TestHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHost {
    pub fn new() -> Self {
        Self::finish(Self::base_app())
    }

    /// A host with `plugin` added on top of [`OrdinancePlugin`].
    pub fn with_plugin(plugin: impl Plugin) -> Self {
        let mut app = Self::base_app();
        app.add_plugins(plugin);
        Self::finish(app)
    }

    fn base_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(OrdinancePlugin);
        app
    }

    /// Runs one update so startup systems execute.
    fn finish(mut app: App) -> Self {
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Setup
    // -----------------------------------------------------------------------

    /// Registers a definition, panicking if the catalog rejects it.
    pub fn with_definition(mut self, record: DefinitionRecord) -> Self {
        let key = record.key;
        let mut catalog = self.app.world_mut().resource_mut::<DefinitionCatalog>();
        if let Err(e) = catalog.register(record) {
            panic!("definition {key} rejected: {e}");
        }
        self
    }

    pub fn with_string(mut self, key: StringResourceKey, text: &str) -> Self {
        self.app
            .world_mut()
            .resource_mut::<StringTable>()
            .insert(key, text);
        self
    }

    pub fn with_script_engine(mut self, engine: impl ScriptEngine + Send + Sync + 'static) -> Self {
        self.app.world_mut().insert_resource(ScriptHost::new(engine));
        self
    }

    pub fn with_settings(mut self, settings: OrdinanceSettings) -> Self {
        self.app.world_mut().insert_resource(settings);
        self
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    pub fn start_city(&mut self, stats: CityStats) -> &mut Self {
        self.app.world_mut().send_event(CityStarted { stats });
        self.app.update();
        self
    }

    pub fn shutdown_city(&mut self) -> &mut Self {
        self.app.world_mut().send_event(CityShutdown);
        self.app.update();
        self
    }

    /// Advances `n` months, one frame each.
    pub fn advance_months(&mut self, n: u32) -> &mut Self {
        for _ in 0..n {
            self.app.world_mut().send_event(MonthElapsed);
            self.app.update();
        }
        self
    }

    /// Runs one frame with no events.
    pub fn update(&mut self) -> &mut Self {
        self.app.update();
        self
    }

    /// Mutates the live city counters. Panics if no city is open.
    pub fn edit_city(&mut self, edit: impl FnOnce(&mut CityStats)) -> &mut Self {
        let mut session = self.app.world_mut().resource_mut::<CitySession>();
        match session.stats.as_mut() {
            Some(stats) => edit(stats),
            None => panic!("edit_city called without an open city"),
        }
        self
    }

    pub fn enact(&mut self, id: u32) -> Option<i64> {
        self.app
            .world_mut()
            .resource_mut::<OrdinanceSimulator>()
            .enact(id)
    }

    pub fn retract(&mut self, id: u32) -> Option<i64> {
        self.app
            .world_mut()
            .resource_mut::<OrdinanceSimulator>()
            .retract(id)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn simulator(&self) -> &OrdinanceSimulator {
        self.app.world().resource::<OrdinanceSimulator>()
    }

    pub fn ordinance(&self, id: u32) -> Option<&Ordinance> {
        self.simulator().get(id)
    }

    pub fn ledger(&self) -> OrdinanceLedger {
        *self.app.world().resource::<OrdinanceLedger>()
    }

    pub fn city_active(&self) -> bool {
        self.app.world().resource::<CitySession>().is_active()
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
