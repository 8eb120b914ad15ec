// src/streaming/plugin.rs
//! Corridor plugin wiring (glue).
//! - Catalog: inline, or `.segments.ron` asset
//! - Settings + seeded RNG
//! - Init / advance systems, lifecycle events, diagnostics

use bevy::ecs::schedule::common_conditions::{not, resource_exists};
use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::corridor::{CorridorDiagnostics, CorridorManager, CorridorSettings, SegmentCatalog, TemplateId};
use super::registry::SegmentCatalogAssetPlugin;
use super::systems::{
    advance_corridor, init_corridor, load_catalog, resolve_catalog_asset, seed_corridor_rng,
};

pub const DEFAULT_CATALOG_PATH: &str = "segments/corridor.segments.ron";

/// Per-frame ordering of the corridor systems.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum CorridorSet {
    Resolve, // catalog asset -> CorridorCatalog
    Init,    // build + initialize the manager once
    Advance, // per-tick window update
}

/// Where the segment catalog comes from.
#[derive(Clone, Debug)]
pub enum CatalogSource {
    Asset(String),
    Inline(SegmentCatalog),
}

/// The catalog the corridor runs on, once available.
#[derive(Resource, Clone, Debug)]
pub struct CorridorCatalog(pub SegmentCatalog);

/// Handle to the catalog asset while it loads.
#[derive(Resource, Default)]
pub struct CorridorCatalogHandle(pub Handle<SegmentCatalog>);

/// Template selection randomness.
#[derive(Resource)]
pub struct CorridorRng(pub ChaCha8Rng);

/// Present once the corridor hit a fatal error; stops all further work.
#[derive(Resource, Debug, Clone)]
pub struct CorridorHalted(pub String);

/// The manager as stored in the world: payload handles are entities.
pub type EntityCorridor = CorridorManager<Entity>;

#[derive(Event, Debug, Clone, Copy)]
pub struct SegmentSpawned {
    pub entity: Entity,
    pub ordinal: u64,
    pub template: TemplateId,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct SegmentRetired {
    pub entity: Entity,
    pub ordinal: u64,
}

/// Fired once when the corridor halts.
#[derive(Event, Debug, Clone)]
pub struct CorridorFault(pub String);

pub struct CorridorPlugin {
    pub source: CatalogSource,
}

impl CorridorPlugin {
    pub fn inline(catalog: SegmentCatalog) -> Self {
        Self { source: CatalogSource::Inline(catalog) }
    }

    pub fn from_asset(path: impl Into<String>) -> Self {
        Self { source: CatalogSource::Asset(path.into()) }
    }
}

impl Default for CorridorPlugin {
    fn default() -> Self {
        Self::from_asset(DEFAULT_CATALOG_PATH)
    }
}

impl Plugin for CorridorPlugin {
    fn build(&self, app: &mut App) {
        match &self.source {
            CatalogSource::Inline(catalog) => {
                app.insert_resource(CorridorCatalog(catalog.clone()));
            }
            CatalogSource::Asset(path) => {
                app.add_plugins(SegmentCatalogAssetPlugin)
                    .insert_resource(CatalogPath(path.clone()))
                    .init_resource::<CorridorCatalogHandle>()
                    .add_systems(Startup, load_catalog)
                    .add_systems(
                        Update,
                        resolve_catalog_asset
                            .in_set(CorridorSet::Resolve)
                            .run_if(not(resource_exists::<CorridorCatalog>))
                            .run_if(not(resource_exists::<CorridorHalted>)),
                    );
            }
        }

        app
            .init_resource::<CorridorSettings>()
            .init_resource::<CorridorDiagnostics>()
            .add_event::<SegmentSpawned>()
            .add_event::<SegmentRetired>()
            .add_event::<CorridorFault>()
            .configure_sets(
                Update,
                (CorridorSet::Resolve, CorridorSet::Init, CorridorSet::Advance).chain(),
            )
            .add_systems(Startup, seed_corridor_rng)
            .add_systems(
                Update,
                (
                    init_corridor
                        .in_set(CorridorSet::Init)
                        .run_if(resource_exists::<CorridorCatalog>)
                        .run_if(not(resource_exists::<EntityCorridor>))
                        .run_if(not(resource_exists::<CorridorHalted>)),
                    advance_corridor
                        .in_set(CorridorSet::Advance)
                        .run_if(resource_exists::<EntityCorridor>)
                        .run_if(not(resource_exists::<CorridorHalted>)),
                ),
            );
    }
}

/// Asset path of the catalog when loading from disk.
#[derive(Resource, Clone, Debug)]
pub struct CatalogPath(pub String);
