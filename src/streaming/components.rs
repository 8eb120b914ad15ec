// src/streaming/components.rs
use bevy::prelude::*;

use crate::corridor::{ConnectorClass, TemplateId};

/// Marks the entity whose `Transform` drives the corridor. Expected unparented.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct CorridorObserver;

/// Attached to every spawned segment entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorridorSegment {
    pub template: TemplateId,
    pub start: ConnectorClass,
    pub end: ConnectorClass,
    pub ordinal: u64,
}
