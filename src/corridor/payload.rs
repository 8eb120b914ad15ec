// src/corridor/payload.rs
use bevy::math::{Quat, Vec3};

use super::catalog::{SegmentTemplate, TemplateId};
use super::connector::ConnectorClass;
use super::error::PayloadError;

/// Where and how a payload should be instantiated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub translation: Vec3,
    pub rotation: Quat,
    /// Monotonic spawn counter at the time of placement.
    pub ordinal: u64,
}

/// A template instantiated at a world position. Owned by the corridor until retired.
#[derive(Clone, Debug)]
pub struct SpawnedSegment<H> {
    pub position: Vec3,
    pub start: ConnectorClass,
    pub end: ConnectorClass,
    pub template: TemplateId,
    pub ordinal: u64,
    pub handle: H,
}

/// Host side of the segment lifecycle.
///
/// Every handle returned by `instantiate` comes back through `destroy` exactly once.
pub trait PayloadFactory {
    type Handle;

    fn instantiate(
        &mut self,
        id: TemplateId,
        template: &SegmentTemplate,
        placement: Placement,
    ) -> Result<Self::Handle, PayloadError>;

    fn destroy(&mut self, segment: SpawnedSegment<Self::Handle>);
}
