//! Endless corridor streaming.
//!
//! Segments are picked from a fixed catalog so that each one's start connector
//! matches the previous one's end connector. They are spawned ahead of an
//! observer moving along +Z and retired behind it.
//!
//! `corridor` holds the engine-independent core; `streaming` runs it inside Bevy.

pub mod corridor;
pub mod streaming;

pub use corridor::{
    AdvanceReport, ConnectorClass, CorridorDiagnostics, CorridorError, CorridorManager,
    CorridorSettings, PayloadError, PayloadFactory, Placement, SegmentCatalog, SegmentTemplate,
    SegmentVisual, SpawnedSegment, TemplateId,
};
pub use streaming::{CorridorDebugPlugin, CorridorObserver, CorridorPlugin, CorridorSegment};
