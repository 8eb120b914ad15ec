use bevy::prelude::*;
use corridor::{CorridorDebugPlugin, CorridorPlugin};

mod setup;

fn main() {
    App::new()
        // core engine plugins
        .add_plugins(DefaultPlugins)
        // corridor streaming + threshold/observer gizmos
        .add_plugins(CorridorPlugin::default())
        .add_plugins(CorridorDebugPlugin)
        // settings file must land before the corridor seeds its rng at Startup
        .add_systems(PreStartup, setup::load_settings)
        .add_systems(Startup, setup::setup)
        .add_systems(Update, (setup::run_observer, setup::follow_observer).chain())
        .run();
}
