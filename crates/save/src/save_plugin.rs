use std::path::Path;

use bevy::prelude::*;
use ordinance::{DefinitionCatalog, HostResources, OrdinanceSettings, OrdinanceSimulator, StringTable};

use crate::atomic_write::atomic_write;
use crate::save_codec::{decode_ordinances, encode_ordinances};
use crate::save_error::SaveError;

// ---------------------------------------------------------------------------
// Slot resource
// ---------------------------------------------------------------------------

/// The most recently encoded ordinance segment, and the outcome of the last
/// save or load.
#[derive(Resource, Debug, Default)]
pub struct OrdinanceSaveSlot {
    pub bytes: Option<Vec<u8>>,
    pub last_error: Option<String>,
}

impl OrdinanceSaveSlot {
    /// Writes the held segment to `path`.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let bytes = self.bytes.as_deref().ok_or(SaveError::NoData)?;
        atomic_write(path.as_ref(), bytes)?;
        Ok(())
    }

    /// Replaces the held segment with the contents of `path`.
    pub fn read_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        self.bytes = Some(std::fs::read(path)?);
        Ok(())
    }

    fn record(&mut self, error: Option<&SaveError>) {
        self.last_error = error.map(|e| e.to_string());
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Encode the current ordinances into [`OrdinanceSaveSlot`].
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SaveOrdinancesEvent;

/// Replace the current ordinances with the segment in [`OrdinanceSaveSlot`].
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct LoadOrdinancesEvent;

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct OrdinanceSavePlugin;

impl Plugin for OrdinanceSavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveOrdinancesEvent>()
            .add_event::<LoadOrdinancesEvent>()
            .init_resource::<OrdinanceSaveSlot>();

        // Save before load so a save+load pair in one frame round-trips.
        app.add_systems(Update, (exclusive_save, exclusive_load).chain());
    }
}

/// Drains pending events of type `E`; true if there were any.
fn take_events<E: Event>(world: &mut World) -> bool {
    world
        .get_resource_mut::<Events<E>>()
        .is_some_and(|mut events| events.drain().count() > 0)
}

fn missing(name: &str) -> SaveError {
    SaveError::MissingResource(name.to_string())
}

// ---------------------------------------------------------------------------
// Exclusive systems
// ---------------------------------------------------------------------------

fn exclusive_save(world: &mut World) {
    if !take_events::<SaveOrdinancesEvent>(world) {
        return;
    }

    let result = encode_current(world);
    let Some(mut slot) = world.get_resource_mut::<OrdinanceSaveSlot>() else {
        error!("Ordinance save failed: {}", missing("OrdinanceSaveSlot"));
        return;
    };
    match result {
        Ok((bytes, count)) => {
            info!("Saved {} ordinance(s) into a {}-byte segment", count, bytes.len());
            slot.bytes = Some(bytes);
            slot.record(None);
        }
        Err(e) => {
            error!("Ordinance save failed: {e}");
            slot.record(Some(&e));
        }
    }
}

fn encode_current(world: &World) -> Result<(Vec<u8>, usize), SaveError> {
    let compress = world
        .get_resource::<OrdinanceSettings>()
        .map_or(OrdinanceSettings::default().compress_save_segment, |settings| {
            settings.compress_save_segment
        });
    let simulator = world
        .get_resource::<OrdinanceSimulator>()
        .ok_or_else(|| missing("OrdinanceSimulator"))?;
    let bytes = encode_ordinances(simulator.iter(), compress)?;
    Ok((bytes, simulator.len()))
}

/// Decodes the slot and swaps the result into the simulator. On any failure
/// the current ordinances stay as they are.
fn exclusive_load(world: &mut World) {
    if !take_events::<LoadOrdinancesEvent>(world) {
        return;
    }

    let result = exclusive_load_inner(world);
    match &result {
        Ok(count) => info!("Loaded {count} ordinance(s) from save segment"),
        Err(e) => warn!("Ordinance load failed, keeping current ordinances: {e}"),
    }
    if let Some(mut slot) = world.get_resource_mut::<OrdinanceSaveSlot>() {
        slot.record(result.as_ref().err());
    }
}

fn exclusive_load_inner(world: &mut World) -> Result<usize, SaveError> {
    let ordinances = {
        let slot = world
            .get_resource::<OrdinanceSaveSlot>()
            .ok_or_else(|| missing("OrdinanceSaveSlot"))?;
        let bytes = slot.bytes.as_deref().ok_or(SaveError::NoData)?;
        let catalog = world
            .get_resource::<DefinitionCatalog>()
            .ok_or_else(|| missing("DefinitionCatalog"))?;
        let strings = world
            .get_resource::<StringTable>()
            .ok_or_else(|| missing("StringTable"))?;
        decode_ordinances(bytes, &HostResources::new(catalog, strings))?
    };

    let count = ordinances.len();
    world
        .get_resource_mut::<OrdinanceSimulator>()
        .ok_or_else(|| missing("OrdinanceSimulator"))?
        .replace_all(ordinances);
    Ok(count)
}
