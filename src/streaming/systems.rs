// src/streaming/systems.rs
use bevy::asset::LoadState;
use bevy::ecs::query::QuerySingleError;
use bevy::prelude::*;
use std::fmt::Display;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::corridor::{CorridorDiagnostics, CorridorSettings, SegmentCatalog};
use super::components::CorridorObserver;
use super::plugin::{
    CatalogPath, CorridorCatalog, CorridorCatalogHandle, CorridorFault, CorridorHalted,
    CorridorRng, EntityCorridor, SegmentRetired, SegmentSpawned,
};
use super::spawn::EntityPayloads;

/// Startup: seed the selection RNG from settings (or the thread RNG).
pub fn seed_corridor_rng(mut commands: Commands, settings: Res<CorridorSettings>) {
    let rng = match settings.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };
    info!("Corridor: selection rng seeded (fixed seed: {:?})", settings.seed);
    commands.insert_resource(CorridorRng(rng));
}

/// Startup: request loading the catalog, store handle.
pub fn load_catalog(
    mut handle_res: ResMut<CorridorCatalogHandle>,
    path: Res<CatalogPath>,
    assets: Res<AssetServer>,
) {
    if handle_res.0.is_strong() { return; }
    handle_res.0 = assets.load(path.0.as_str());
    info!("Corridor: loading segment catalog from '{}'", path.0);
}

/// Update: copy the catalog out of the asset store once it has loaded, or halt
/// if the loader rejected it.
pub fn resolve_catalog_asset(
    mut commands: Commands,
    handle_res: Res<CorridorCatalogHandle>,
    catalogs: Res<Assets<SegmentCatalog>>,
    assets: Res<AssetServer>,
    path: Res<CatalogPath>,
    mut faults: EventWriter<CorridorFault>,
) {
    if let LoadState::Failed(err) = assets.load_state(&handle_res.0) {
        halt(
            &mut commands,
            &mut faults,
            format!("segment catalog '{}' failed to load: {err}", path.0),
        );
        return;
    }
    let Some(catalog) = catalogs.get(&handle_res.0) else { return };
    info!("Corridor: segment catalog ready ({} templates)", catalog.len());
    commands.insert_resource(CorridorCatalog(catalog.clone()));
}

/// Update (once): build the manager and spawn the initial window.
pub fn init_corridor(
    mut commands: Commands,
    catalog: Res<CorridorCatalog>,
    settings: Res<CorridorSettings>,
    mut rng: ResMut<CorridorRng>,
    assets: Option<Res<AssetServer>>,
    mut diagnostics: ResMut<CorridorDiagnostics>,
    mut spawned_w: EventWriter<SegmentSpawned>,
    mut retired_w: EventWriter<SegmentRetired>,
    mut faults: EventWriter<CorridorFault>,
) {
    let mut manager = match EntityCorridor::new(catalog.0.clone(), settings.clone()) {
        Ok(m) => m,
        Err(err) => {
            halt(&mut commands, &mut faults, err);
            return;
        }
    };

    let mut payloads = EntityPayloads::new(&mut commands, assets.as_deref());
    let result = manager.initialize(&mut payloads, &mut rng.0);
    let (spawned, retired) = payloads.into_events();
    forward_events(spawned, retired, &mut spawned_w, &mut retired_w);

    match result {
        Ok(()) => {
            if let Some(d) = manager.diagnostics() {
                *diagnostics = d;
            }
            commands.insert_resource(manager);
        }
        Err(err) => halt(&mut commands, &mut faults, err),
    }
}

/// Update: sample the observer once and let the manager advance the window.
pub fn advance_corridor(
    mut commands: Commands,
    mut manager: ResMut<EntityCorridor>,
    mut rng: ResMut<CorridorRng>,
    observer_q: Query<&Transform, With<CorridorObserver>>,
    assets: Option<Res<AssetServer>>,
    mut diagnostics: ResMut<CorridorDiagnostics>,
    mut spawned_w: EventWriter<SegmentSpawned>,
    mut retired_w: EventWriter<SegmentRetired>,
    mut faults: EventWriter<CorridorFault>,
    mut warned: Local<bool>,
) {
    let observer = match observer_q.single() {
        Ok(tf) => {
            *warned = false;
            tf.translation
        }
        Err(QuerySingleError::MultipleEntities(_)) => {
            if !*warned {
                *warned = true;
                warn!("Corridor: more than one CorridorObserver; not advancing until there is exactly one");
            }
            return;
        }
        Err(_) => return,
    };

    let mut payloads = EntityPayloads::new(&mut commands, assets.as_deref());
    let result = manager.tick(observer, &mut payloads, &mut rng.0);
    let (spawned, retired) = payloads.into_events();
    forward_events(spawned, retired, &mut spawned_w, &mut retired_w);

    if let Some(d) = manager.diagnostics() {
        *diagnostics = d;
    }
    if let Err(err) = result {
        halt(&mut commands, &mut faults, err);
    }
}

fn forward_events(
    spawned: Vec<SegmentSpawned>,
    retired: Vec<SegmentRetired>,
    spawned_w: &mut EventWriter<SegmentSpawned>,
    retired_w: &mut EventWriter<SegmentRetired>,
) {
    for ev in retired {
        retired_w.write(ev);
    }
    for ev in spawned {
        spawned_w.write(ev);
    }
}

fn halt(commands: &mut Commands, faults: &mut EventWriter<CorridorFault>, err: impl Display) {
    error!("Corridor: halted: {err}");
    faults.write(CorridorFault(err.to_string()));
    commands.insert_resource(CorridorHalted(err.to_string()));
}
