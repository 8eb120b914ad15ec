// src/streaming/debug.rs
use bevy::color::palettes::css::{BLUE, YELLOW};
use bevy::ecs::schedule::common_conditions::resource_exists;
use bevy::prelude::*;

use crate::corridor::CorridorDiagnostics;
use super::plugin::{CorridorSet, EntityCorridor};

const HALF_WIDTH: f32 = 10.0;

/// Gizmo lines across the corridor: blue at the advance threshold, yellow at the observer.
/// Needs the gizmo plugin (part of `DefaultPlugins`).
pub struct CorridorDebugPlugin;

impl Plugin for CorridorDebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            draw_corridor_diagnostics
                .after(CorridorSet::Advance)
                .run_if(resource_exists::<EntityCorridor>),
        );
    }
}

fn draw_corridor_diagnostics(mut gizmos: Gizmos, diagnostics: Res<CorridorDiagnostics>) {
    let t = diagnostics.threshold_position;
    gizmos.line(t + Vec3::NEG_X * HALF_WIDTH, t + Vec3::X * HALF_WIDTH, BLUE);

    if let Some(p) = diagnostics.observer_position {
        gizmos.line(p + Vec3::NEG_X * HALF_WIDTH, p + Vec3::X * HALF_WIDTH, YELLOW);
    }
}
