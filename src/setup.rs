use bevy::prelude::*;
use corridor::{CorridorObserver, CorridorSettings};
use std::path::PathBuf;

/// Relative to the asset root, like the catalog.
pub const SETTINGS_FILE: &str = "assets/corridor.settings.ron";
const RUN_SPEED: f32 = 12.0;

#[derive(Component)]
pub struct MainCamera;

/// Demo observer: runs straight down +Z.
#[derive(Component)]
pub struct Runner {
    pub speed: f32,
}

/// Same lookup order as Bevy's file asset reader: `BEVY_ASSET_ROOT`, then
/// `CARGO_MANIFEST_DIR`, then the executable's directory.
pub fn settings_path() -> PathBuf {
    let root = std::env::var_os("BEVY_ASSET_ROOT")
        .or_else(|| std::env::var_os("CARGO_MANIFEST_DIR"))
        .map(PathBuf::from)
        .or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(PathBuf::from))
        })
        .unwrap_or_default();
    root.join(SETTINGS_FILE)
}

/// PreStartup: replace default settings with the RON file next to the assets, if present.
pub fn load_settings(mut commands: Commands) {
    let path = settings_path();
    let src = match std::fs::read_to_string(&path) {
        Ok(src) => src,
        Err(e) => {
            warn!("Corridor demo: cannot read '{}' ({}), using default settings", path.display(), e);
            return;
        }
    };
    match CorridorSettings::from_ron_str(&src) {
        Ok(settings) => {
            info!("Corridor demo: settings loaded from '{}'", path.display());
            commands.insert_resource(settings);
        }
        Err(e) => warn!("Corridor demo: ignoring '{}': {}", path.display(), e),
    }
}

pub fn setup(mut commands: Commands) {
    // 1) Light
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 12.0, -4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // 2) Observer
    commands.spawn((
        Transform::from_xyz(0.0, 1.0, 0.0),
        CorridorObserver,
        Runner { speed: RUN_SPEED },
        Name::new("Observer"),
    ));

    // 3) Camera
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 8.0, -14.0).looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::Y),
        MainCamera,
    ));
}

pub fn run_observer(time: Res<Time>, mut q: Query<(&mut Transform, &Runner)>) {
    for (mut tf, runner) in &mut q {
        tf.translation.z += runner.speed * time.delta_secs();
    }
}

/// Keeps the camera at a fixed offset behind the observer.
pub fn follow_observer(
    observer_q: Query<&Transform, (With<CorridorObserver>, Without<MainCamera>)>,
    mut cam_q: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(observer) = observer_q.single() else { return };
    let Ok(mut cam) = cam_q.single_mut() else { return };

    let focus = observer.translation + Vec3::Z * 10.0;
    cam.translation = observer.translation + Vec3::new(0.0, 7.0, -14.0);
    cam.look_at(focus, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_settings_resolve_from_the_asset_root() {
        let path = settings_path();
        assert!(path.ends_with(SETTINGS_FILE));

        let src = std::fs::read_to_string(&path).unwrap();
        let settings = CorridorSettings::from_ron_str(&src).unwrap();
        assert!(settings.validate().is_ok());
    }
}
