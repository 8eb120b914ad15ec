// src/corridor/mod.rs
//! Host-agnostic corridor core: catalog lookup, window management, payload lifecycle.
//! Nothing in here touches the ECS world; the Bevy glue lives in `crate::streaming`.

pub mod catalog;
pub mod connector;
pub mod error;
pub mod manager;
pub mod payload;
pub mod settings;

pub use catalog::{SegmentCatalog, SegmentTemplate, SegmentVisual, TemplateId};
pub use connector::ConnectorClass;
pub use error::{CorridorError, PayloadError};
pub use manager::{AdvanceReport, CorridorDiagnostics, CorridorManager};
pub use payload::{PayloadFactory, Placement, SpawnedSegment};
pub use settings::CorridorSettings;
