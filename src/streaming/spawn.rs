// src/streaming/spawn.rs
//! Segment payloads as entities. Bundle-free: components are added explicitly.

use bevy::pbr::MeshMaterial3d;
use bevy::prelude::*;

use crate::corridor::{
    PayloadError, PayloadFactory, Placement, SegmentTemplate, SegmentVisual, SpawnedSegment,
    TemplateId,
};
use super::components::CorridorSegment;
use super::plugin::{SegmentRetired, SegmentSpawned};

/// Spawns one entity per segment through `Commands` and despawns it on retirement.
/// Collects lifecycle events so the calling system can forward them.
pub struct EntityPayloads<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    assets: Option<&'a AssetServer>,
    spawned: Vec<SegmentSpawned>,
    retired: Vec<SegmentRetired>,
}

impl<'a, 'w, 's> EntityPayloads<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>, assets: Option<&'a AssetServer>) -> Self {
        Self { commands, assets, spawned: Vec::new(), retired: Vec::new() }
    }

    pub fn into_events(self) -> (Vec<SegmentSpawned>, Vec<SegmentRetired>) {
        (self.spawned, self.retired)
    }
}

/// Resolved drawable for a visual, built before anything is spawned.
enum Drawable {
    Scene(Handle<Scene>),
    Mesh { mesh: Handle<Mesh>, material: Handle<StandardMaterial>, offset: Vec3 },
    Nothing,
}

fn resolve_visual(template: &SegmentTemplate, assets: Option<&AssetServer>) -> Result<Drawable, PayloadError> {
    if !template.visual.needs_assets() {
        return Ok(Drawable::Nothing);
    }
    let assets = assets.ok_or_else(|| PayloadError::AssetServerUnavailable {
        template: template.name.clone(),
    })?;

    let drawable = match &template.visual {
        SegmentVisual::Scene { path } => Drawable::Scene(assets.load(path.as_str())),
        SegmentVisual::MeshMaterial { mesh, material } => Drawable::Mesh {
            mesh: assets.load(mesh.as_str()),
            material: match material {
                Some(m) => assets.load(m.as_str()),
                None => assets.add(StandardMaterial::default()),
            },
            offset: Vec3::ZERO,
        },
        SegmentVisual::Slab { size, offset, color } => {
            let [sx, sy, sz] = *size;
            let [r, g, b] = *color;
            Drawable::Mesh {
                mesh: assets.add(Mesh::from(Cuboid::new(sx, sy, sz))),
                material: assets.add(StandardMaterial {
                    base_color: Color::srgb(r, g, b),
                    perceptual_roughness: 0.9,
                    ..default()
                }),
                offset: Vec3::from_array(*offset),
            }
        }
        SegmentVisual::Placeholder => Drawable::Nothing,
    };
    Ok(drawable)
}

impl PayloadFactory for EntityPayloads<'_, '_, '_> {
    type Handle = Entity;

    fn instantiate(
        &mut self,
        id: TemplateId,
        template: &SegmentTemplate,
        placement: Placement,
    ) -> Result<Entity, PayloadError> {
        let drawable = resolve_visual(template, self.assets)?;

        let mut e = self.commands.spawn((
            Transform::from_translation(placement.translation).with_rotation(placement.rotation),
            Visibility::Visible,
            Name::new(format!("Segment_{}", placement.ordinal)),
            CorridorSegment {
                template: id,
                start: template.start,
                end: template.end,
                ordinal: placement.ordinal,
            },
        ));

        match drawable {
            Drawable::Scene(scene) => {
                e.insert(SceneRoot(scene));
            }
            Drawable::Mesh { mesh, material, offset } if offset == Vec3::ZERO => {
                e.insert((Mesh3d(mesh), MeshMaterial3d(material)));
            }
            Drawable::Mesh { mesh, material, offset } => {
                // Offset drawables hang off a child so the segment itself stays on the anchor.
                e.with_child((
                    Transform::from_translation(offset),
                    Visibility::Inherited,
                    Mesh3d(mesh),
                    MeshMaterial3d(material),
                ));
            }
            Drawable::Nothing => {}
        }

        let entity = e.id();
        self.spawned.push(SegmentSpawned { entity, ordinal: placement.ordinal, template: id });
        Ok(entity)
    }

    fn destroy(&mut self, segment: SpawnedSegment<Entity>) {
        self.commands.entity(segment.handle).despawn();
        self.retired.push(SegmentRetired { entity: segment.handle, ordinal: segment.ordinal });
    }
}
