// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene building
//!
//! Each component becomes its own Bevy entity with its own material handle,
//! because the simulation overlay and the selection highlight both recolour
//! individual components at runtime. Spawning is cooperative: a fixed number
//! of components per frame, so a large model never stalls the event loop.

use crate::{SceneBounds, SceneData};
use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use bridgeview_fragment::FragMesh;
use bridgeview_model::{Appearance, ComponentId, Rgb};
use log::info;
use rustc_hash::FxHashMap;

/// Components spawned per frame while a model is loading in.
const SPAWN_CHUNK: usize = 256;

pub struct MeshPlugin;

impl Plugin for MeshPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnQueue>()
            .init_resource::<ComponentMaterials>()
            .init_resource::<AutoFitState>()
            .add_systems(
                Update,
                (begin_scene_rebuild, spawn_chunk_system, auto_fit_camera_system).chain(),
            );
    }
}

/// Marker component carrying per-component metadata.
#[derive(Component)]
pub struct BridgeComponent {
    pub id: ComponentId,
    pub entity_type: String,
    pub name: Option<String>,
}

/// World-space AABB of one component, used for picking and framing.
#[derive(Component, Clone, Debug)]
pub struct ComponentBounds {
    pub min: Vec3,
    pub max: Vec3,
}

/// Material handle and base look per component id.
///
/// The simulation and the selection highlight write through this; everything
/// that recolours a component funnels through [`ComponentMaterials::paint`].
#[derive(Resource, Default)]
pub struct ComponentMaterials {
    pub handles: FxHashMap<ComponentId, Handle<StandardMaterial>>,
    pub base: FxHashMap<ComponentId, Appearance>,
}

impl ComponentMaterials {
    /// Write an appearance into a component's material.
    pub fn paint(
        &self,
        materials: &mut Assets<StandardMaterial>,
        id: ComponentId,
        appearance: &Appearance,
    ) {
        if let Some(handle) = self.handles.get(&id) {
            if let Some(material) = materials.get_mut(handle) {
                material.base_color = crate::srgb(appearance.diffuse);
                material.emissive = linear(appearance.emissive);
            }
        }
    }

    /// Put a component back to its as-loaded look.
    pub fn restore(&self, materials: &mut Assets<StandardMaterial>, id: ComponentId) {
        if let Some(appearance) = self.base.get(&id).copied() {
            self.paint(materials, id, &appearance);
        }
    }

    fn clear(&mut self) {
        self.handles.clear();
        self.base.clear();
    }
}

fn linear(rgb: Rgb) -> LinearRgba {
    LinearRgba::rgb(rgb.r, rgb.g, rgb.b)
}

/// Progress of the cooperative spawn pass.
#[derive(Resource, Default)]
pub struct SpawnQueue {
    next: usize,
    active: bool,
    min: Vec3,
    max: Vec3,
}

/// Camera fit pending for a freshly loaded scene.
#[derive(Resource, Default)]
pub struct AutoFitState {
    pub has_fit: bool,
}

/// Tear down the previous scene and arm the spawn queue.
fn begin_scene_rebuild(
    mut commands: Commands,
    mut scene_data: ResMut<SceneData>,
    mut queue: ResMut<SpawnQueue>,
    mut lookup: ResMut<ComponentMaterials>,
    mut auto_fit: ResMut<AutoFitState>,
    existing: Query<Entity, With<BridgeComponent>>,
) {
    if !scene_data.dirty {
        return;
    }
    scene_data.dirty = false;
    scene_data.bounds = None;

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }
    lookup.clear();

    *queue = SpawnQueue {
        next: 0,
        active: true,
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };
    auto_fit.has_fit = false;

    info!(
        "rebuilding scene: {} components, {} triangles",
        scene_data.meshes.len(),
        scene_data.triangle_count()
    );
}

/// Spawn the next chunk of components. Bounds accumulate as we go and land
/// in `SceneData` once the queue drains.
fn spawn_chunk_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut scene_data: ResMut<SceneData>,
    mut queue: ResMut<SpawnQueue>,
    mut lookup: ResMut<ComponentMaterials>,
) {
    if !queue.active {
        return;
    }

    let end = (queue.next + SPAWN_CHUNK).min(scene_data.meshes.len());
    for idx in queue.next..end {
        let frag = &scene_data.meshes[idx];
        if frag.is_empty() {
            continue;
        }

        let (mesh, min, max) = build_component_mesh(frag);
        queue.min = queue.min.min(min);
        queue.max = queue.max.max(max);

        let material = StandardMaterial {
            base_color: Color::srgba(frag.color[0], frag.color[1], frag.color[2], frag.color[3]),
            metallic: 0.0,
            perceptual_roughness: 0.6,
            reflectance: 0.3,
            double_sided: true,
            cull_mode: None,
            ..default()
        };
        let handle = materials.add(material);
        lookup.handles.insert(frag.id, handle.clone());
        lookup.base.insert(frag.id, SceneData::base_appearance(frag));

        commands.spawn((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(handle),
            Transform::default(),
            BridgeComponent {
                id: frag.id,
                entity_type: frag.entity_type.clone(),
                name: frag.name.clone(),
            },
            ComponentBounds { min, max },
        ));
    }
    queue.next = end;

    if queue.next >= scene_data.meshes.len() {
        queue.active = false;
        if queue.min.x.is_finite() {
            scene_data.bounds = Some(SceneBounds {
                min: queue.min,
                max: queue.max,
            });
        }
        info!("scene ready: {} components spawned", queue.next);
    }
}

/// Build a Bevy mesh from a fragment record, converting IFC Z-up to Bevy
/// Y-up and applying the stored transform. Returns the mesh with its
/// world-space bounds.
fn build_component_mesh(frag: &FragMesh) -> (Mesh, Vec3, Vec3) {
    let transform = Transform::from_matrix(Mat4::from_cols_array(&frag.transform));
    let vertex_count = frag.vertex_count();

    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);

    let positions: Vec<[f32; 3]> = (0..vertex_count)
        .map(|i| {
            let idx = i * 3;
            let local = Vec3::new(
                frag.positions[idx],
                frag.positions[idx + 2],  // Z -> Y
                -frag.positions[idx + 1], // -Y -> Z
            );
            let world = transform.transform_point(local);
            min = min.min(world);
            max = max.max(world);
            [world.x, world.y, world.z]
        })
        .collect();

    let normals: Vec<[f32; 3]> = if frag.normals.len() == frag.positions.len() {
        (0..vertex_count)
            .map(|i| {
                let idx = i * 3;
                let local = Vec3::new(
                    frag.normals[idx],
                    frag.normals[idx + 2],
                    -frag.normals[idx + 1],
                );
                let world = transform.rotation * local;
                [world.x, world.y, world.z]
            })
            .collect()
    } else {
        compute_flat_normals(&positions, &frag.indices)
    };

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_indices(Indices::U32(frag.indices.clone()));

    (mesh, min, max)
}

/// Fit the camera once the scene bounds are known.
fn auto_fit_camera_system(
    scene_data: Res<SceneData>,
    mut auto_fit: ResMut<AutoFitState>,
    mut controller: ResMut<crate::camera::CameraController>,
) {
    if auto_fit.has_fit {
        return;
    }
    if let Some(ref bounds) = scene_data.bounds {
        controller.snap_to_bounds(bounds);
        auto_fit.has_fit = true;
    }
}

/// Area-weighted vertex normals from triangle geometry.
fn compute_flat_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![[0.0f32, 0.0, 0.0]; positions.len()];

    for tri in indices.chunks(3) {
        if tri.len() < 3 {
            continue;
        }
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
            continue;
        }

        let p0 = Vec3::from_array(positions[i0]);
        let p1 = Vec3::from_array(positions[i1]);
        let p2 = Vec3::from_array(positions[i2]);
        let face_normal = (p1 - p0).cross(p2 - p0);

        for &idx in &[i0, i1, i2] {
            normals[idx][0] += face_normal.x;
            normals[idx][1] += face_normal.y;
            normals[idx][2] += face_normal.z;
        }
    }

    for normal in &mut normals {
        let len = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
        if len > 0.0001 {
            normal[0] /= len;
            normal[1] /= len;
            normal[2] /= len;
        } else {
            *normal = [0.0, 1.0, 0.0];
        }
    }

    normals
}
