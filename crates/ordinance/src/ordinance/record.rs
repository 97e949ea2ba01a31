use bevy::prelude::*;

use crate::availability::AvailabilityCondition;
use crate::context::SimContext;
use crate::definition::{self, DefinitionSource, PropertyHolder};
use crate::income::IncomeFactor;
use crate::localization::{apply_localized, StringResources};
use crate::resource_key::{ResourceKey, StringResourceKey};

/// Host services an ordinance consults when it initializes or is restored.
#[derive(Clone, Copy, Default)]
pub struct HostResources<'a> {
    pub definitions: Option<&'a dyn DefinitionSource>,
    pub strings: Option<&'a dyn StringResources>,
}

impl<'a> HostResources<'a> {
    pub fn new(definitions: &'a dyn DefinitionSource, strings: &'a dyn StringResources) -> Self {
        Self {
            definitions: Some(definitions),
            strings: Some(strings),
        }
    }
}

/// A data-driven city ordinance.
///
/// Identity is fixed at construction; the instance id of the key is the
/// class id the host uses to recreate the ordinance from save data.
#[derive(Debug, Clone)]
pub struct Ordinance {
    key: ResourceKey,
    pub(super) conditions: Vec<AvailabilityCondition>,
    pub(super) factors: Vec<IncomeFactor>,
    pub(super) name: String,
    pub(super) name_key: StringResourceKey,
    pub(super) description: String,
    pub(super) description_key: StringResourceKey,
    pub(super) enactment_income: i64,
    pub(super) retraction_income: i64,
    pub(super) monthly_constant_income: i64,
    pub(super) monthly_adjusted_income: i64,
    pub(super) is_income: bool,
    pub(super) properties: PropertyHolder,
    pub(super) available: bool,
    pub(super) on: bool,
    pub(super) enabled: bool,
    /// Set by a successful read; `init` then keeps the restored state.
    pub(super) restored: bool,
}

impl Ordinance {
    pub fn new(key: ResourceKey) -> Self {
        Self {
            key,
            conditions: Vec::new(),
            factors: Vec::new(),
            name: String::new(),
            name_key: StringResourceKey::default(),
            description: String::new(),
            description_key: StringResourceKey::default(),
            enactment_income: 0,
            retraction_income: 0,
            monthly_constant_income: 0,
            monthly_adjusted_income: 0,
            is_income: false,
            properties: PropertyHolder::default(),
            available: false,
            on: false,
            enabled: false,
            restored: false,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Enables the ordinance and derives its defaults from its definition,
    /// unless its state was just restored from a save.
    pub fn init(&mut self, host: &HostResources<'_>) -> bool {
        if !self.restored {
            self.enabled = true;
            self.init_from_definition(host);
        }
        true
    }

    /// Disables the ordinance and releases its definition.
    pub fn shutdown(&mut self) -> bool {
        self.enabled = false;
        self.restored = false;
        self.properties.clear();
        true
    }

    fn init_from_definition(&mut self, host: &HostResources<'_>) {
        let Some(record) = host
            .definitions
            .and_then(|definitions| definitions.definition(&self.key))
        else {
            warn!("No definition found for ordinance {}", self.key);
            return;
        };

        let metadata = definition::read_metadata(&record);
        self.name = metadata.name;
        self.name_key = metadata.name_key;
        self.description = metadata.description;
        self.description_key = metadata.description_key;
        self.enactment_income = metadata.enactment_income;
        self.retraction_income = metadata.retraction_income;
        self.monthly_constant_income = metadata.monthly_constant_income;
        self.is_income = metadata.is_income;
        self.conditions = definition::read_conditions(&record);
        self.factors = definition::read_factors(&record);
        self.properties.set_default(Some(record));

        self.load_localized_strings(host.strings);
    }

    /// Refreshes the cached name and description from the string resources.
    /// Nothing changes unless both lookups succeed.
    pub(super) fn load_localized_strings(&mut self, strings: Option<&dyn StringResources>) {
        let Some(strings) = strings else {
            return;
        };
        let (Some(name), Some(description)) = (
            strings.localized_string(&self.name_key),
            strings.localized_string(&self.description_key),
        ) else {
            return;
        };
        apply_localized(&mut self.name, &name);
        apply_localized(&mut self.description, &description);
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    /// True when the ordinance is enabled and every condition holds.
    pub fn check_conditions(&self, ctx: &mut SimContext<'_>) -> bool {
        self.enabled
            && self
                .conditions
                .iter()
                .all(|condition| condition.evaluate(ctx))
    }

    /// Constant income with every factor folded over it, in list order.
    ///
    /// A total that does not fit an `i64` is logged and the constant income
    /// is returned instead.
    pub fn current_monthly_income(&self, ctx: &mut SimContext<'_>) -> i64 {
        let total = self
            .factors
            .iter()
            .fold(self.monthly_constant_income as f64, |total, factor| {
                factor.apply(total, ctx)
            });

        match f64_to_i64(total) {
            Some(income) => income,
            None => {
                error!(
                    "Error when calculating the monthly income for '{}' (TGI {}), {} cannot be \
                     represented as a signed 64-bit integer. Returning the monthly constant income.",
                    self.name, self.key, total
                );
                self.monthly_constant_income
            }
        }
    }

    /// Monthly update: stores the current monthly income.
    pub fn simulate(&mut self, ctx: &mut SimContext<'_>) -> bool {
        self.monthly_adjusted_income = self.current_monthly_income(ctx);
        true
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Sets availability and clears the adjusted income.
    pub fn set_available(&mut self, available: bool) -> bool {
        self.available = available;
        self.monthly_adjusted_income = 0;
        true
    }

    pub fn set_on(&mut self, on: bool) -> bool {
        self.on = on;
        true
    }

    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        self.enabled = enabled;
        true
    }

    pub fn force_available(&mut self, available: bool) -> bool {
        self.set_available(available)
    }

    pub fn force_on(&mut self, on: bool) -> bool {
        self.set_on(on)
    }

    pub fn force_enabled(&mut self, enabled: bool) -> bool {
        self.set_enabled(enabled)
    }

    /// Overwrites the stored adjusted income.
    ///
    /// Earlier hosts treated this call as a no-op (the argument shadowed the
    /// field). Here it stores the value.
    pub fn force_monthly_adjusted_income(&mut self, income: i64) -> bool {
        self.monthly_adjusted_income = income;
        true
    }

    /// Accepted and ignored: the key is fixed at construction.
    pub fn set_key(&mut self, _key: ResourceKey) -> bool {
        true
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn key(&self) -> ResourceKey {
        self.key
    }

    pub fn id(&self) -> u32 {
        self.key.instance
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn name_key(&self) -> StringResourceKey {
        self.name_key
    }

    pub fn description_key(&self) -> StringResourceKey {
        self.description_key
    }

    /// Availability is governed by conditions, not a start year.
    pub fn year_first_available(&self) -> u32 {
        0
    }

    pub fn chance_availability(&self) -> f32 {
        1.0
    }

    pub fn enactment_income(&self) -> i64 {
        self.enactment_income
    }

    pub fn retraction_income(&self) -> i64 {
        self.retraction_income
    }

    pub fn monthly_constant_income(&self) -> i64 {
        self.monthly_constant_income
    }

    pub fn monthly_adjusted_income(&self) -> i64 {
        self.monthly_adjusted_income
    }

    pub fn monthly_income_factor(&self) -> f32 {
        1.0
    }

    pub fn advisor_id(&self) -> u32 {
        0
    }

    pub fn is_income_ordinance(&self) -> bool {
        self.is_income
    }

    pub fn properties(&self) -> &PropertyHolder {
        &self.properties
    }

    pub fn conditions(&self) -> &[AvailabilityCondition] {
        &self.conditions
    }

    pub fn factors(&self) -> &[IncomeFactor] {
        &self.factors
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Enacted and available.
    pub fn is_on(&self) -> bool {
        self.available && self.on
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_restored(&self) -> bool {
        self.restored
    }
}

/// Truncating conversion that rejects non-finite and out-of-range values.
fn f64_to_i64(value: f64) -> Option<i64> {
    // 2^63 is exactly representable; i64::MAX is not.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if value.is_finite() && (-LIMIT..LIMIT).contains(&value) {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod conversion_tests {
    use super::f64_to_i64;

    #[test]
    fn test_conversion_bounds() {
        assert_eq!(f64_to_i64(107.0), Some(107));
        assert_eq!(f64_to_i64(-2.9), Some(-2));
        assert_eq!(f64_to_i64(-9_223_372_036_854_775_808.0), Some(i64::MIN));
        assert_eq!(f64_to_i64(9_223_372_036_854_775_808.0), None);
        assert_eq!(f64_to_i64(f64::INFINITY), None);
        assert_eq!(f64_to_i64(f64::NAN), None);
    }
}
