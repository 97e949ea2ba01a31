use crate::city::CityCounters;
use crate::script::ScriptEngine;

/// Everything a rule may consult while it is evaluated.
///
/// Built by the host for the duration of one evaluation pass. `city` is `None`
/// when no city is open; `scripts` is `None` when no script engine is attached.
#[derive(Default)]
pub struct SimContext<'a> {
    pub city: Option<&'a dyn CityCounters>,
    pub scripts: Option<&'a mut dyn ScriptEngine>,
}

impl<'a> SimContext<'a> {
    /// A context with no active city and no script engine.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn with_city(city: &'a dyn CityCounters) -> Self {
        Self {
            city: Some(city),
            scripts: None,
        }
    }

    pub fn scripts(mut self, engine: &'a mut dyn ScriptEngine) -> Self {
        self.scripts = Some(engine);
        self
    }
}
