// src/corridor/settings.rs
use bevy::math::EulerRot;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::CorridorError;

/// Tunables for the corridor window. Field defaults match a 7-segment corridor
/// spaced 10 units apart that advances one segment at a time.
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorSettings {
    /// Segments spawned by `initialize` (anchor included).
    pub initial_segment_count: usize,
    /// Distance between segment anchor points along +Z.
    pub axis_spacing: f32,
    pub segments_to_spawn_per_advance: usize,
    pub segments_to_retire_per_advance: usize,
    /// How many segments back from the tail the observer must reach to advance.
    pub lookahead_distance: usize,
    /// Euler XYZ, degrees. Applied to every spawned payload.
    pub segment_orientation: [f32; 3],
    /// World position of the anchor segment.
    pub origin: [f32; 3],
    /// Name of the anchor template; `None` uses the catalog's first entry.
    pub anchor: Option<String>,
    /// RNG seed for template selection; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for CorridorSettings {
    fn default() -> Self {
        Self {
            initial_segment_count: 7,
            axis_spacing: 10.0,
            segments_to_spawn_per_advance: 1,
            segments_to_retire_per_advance: 1,
            lookahead_distance: 0,
            segment_orientation: [0.0; 3],
            origin: [0.0; 3],
            anchor: None,
            seed: None,
        }
    }
}

impl CorridorSettings {
    pub fn from_ron_str(src: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(src)
    }

    pub fn origin(&self) -> Vec3 {
        Vec3::from_array(self.origin)
    }

    pub fn orientation(&self) -> Quat {
        let [x, y, z] = self.segment_orientation;
        Quat::from_euler(
            EulerRot::XYZ,
            x.to_radians(),
            y.to_radians(),
            z.to_radians(),
        )
    }

    pub fn validate(&self) -> Result<(), CorridorError> {
        if self.initial_segment_count < 1 {
            return Err(CorridorError::Configuration(
                "initial_segment_count must be at least 1".to_string(),
            ));
        }
        if !self.axis_spacing.is_finite() || self.axis_spacing <= 0.0 {
            return Err(CorridorError::Configuration(format!(
                "axis_spacing must be finite and positive, got {}",
                self.axis_spacing
            )));
        }
        Ok(())
    }
}
