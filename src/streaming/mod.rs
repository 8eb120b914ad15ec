// src/streaming/mod.rs
//! Bevy glue: runs a `CorridorManager<Entity>` off an observer entity's transform.

mod components;
mod debug;
mod plugin;
mod registry;
mod spawn;
mod systems;

pub use components::{CorridorObserver, CorridorSegment};
pub use debug::CorridorDebugPlugin;
pub use plugin::{
    CatalogPath, CatalogSource, CorridorCatalog, CorridorFault, CorridorHalted, CorridorPlugin,
    CorridorRng, CorridorSet, EntityCorridor, SegmentRetired, SegmentSpawned,
    DEFAULT_CATALOG_PATH,
};
pub use registry::{parse_catalog, CatalogLoadError, SegmentCatalogAssetPlugin};
pub use spawn::EntityPayloads;
