// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Picking and selection
//!
//! Click picking casts a ray against every component's AABB (slab test) and
//! takes the nearest hit. A hit is first offered to the simulation session;
//! only when the component is not part of the run does it get the plain
//! orange selection highlight.

use crate::camera::{CameraInputSet, MainCamera};
use crate::mesh::{BridgeComponent, ComponentBounds, ComponentMaterials};
use crate::simulation::ForceSim;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bridgeview_model::{Appearance, ComponentId, Rgb};

/// Selection highlight colour.
const HIGHLIGHT: Rgb = Rgb::new(1.0, 0.65, 0.0);

pub struct PickingPlugin;

impl Plugin for PickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectionState>()
            .add_message::<SelectComponent>()
            .add_systems(
                Update,
                (click_pick_system, apply_selection_system)
                    .chain()
                    .after(CameraInputSet),
            );
    }
}

/// Request to change the selection; `None` clears it. Written by click
/// picking and by the component list panel.
#[derive(Message)]
pub struct SelectComponent {
    pub id: Option<ComponentId>,
}

/// Current selection.
#[derive(Resource, Default)]
pub struct SelectionState {
    pub selected: Option<ComponentId>,
    /// Whether the selected component carries the orange highlight (false
    /// when the simulation owns its colour).
    highlighted: bool,
}

impl SelectionState {
    pub fn is_selected(&self, id: ComponentId) -> bool {
        self.selected == Some(id)
    }

    /// Drop the selection without touching any material, for when the
    /// scene it pointed into is going away.
    pub fn clear(&mut self) {
        self.selected = None;
        self.highlighted = false;
    }
}

/// Convert a click (a left release that never became a drag) into a
/// selection request.
fn click_pick_system(
    mut controller: ResMut<crate::camera::CameraController>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    components: Query<(&BridgeComponent, &ComponentBounds)>,
    mut select_events: MessageWriter<SelectComponent>,
) {
    if !controller.just_clicked {
        return;
    }
    controller.just_clicked = false;

    let Ok(window) = windows.single() else { return };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else {
        return;
    };

    let mut closest: Option<(ComponentId, f32)> = None;
    for (component, bounds) in components.iter() {
        if let Some(distance) = ray_aabb_intersection(&ray, bounds.min, bounds.max) {
            if closest.map(|(_, d)| distance < d).unwrap_or(true) {
                closest = Some((component.id, distance));
            }
        }
    }

    select_events.write(SelectComponent {
        id: closest.map(|(id, _)| id),
    });
}

/// Apply selection requests: restore the old highlight, record the new
/// selection, offer it to the simulation, highlight when it declines.
fn apply_selection_system(
    mut select_events: MessageReader<SelectComponent>,
    mut selection: ResMut<SelectionState>,
    mut sim: ResMut<ForceSim>,
    lookup: Res<ComponentMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for event in select_events.read() {
        if let Some(prev) = selection.selected {
            if selection.highlighted {
                lookup.restore(&mut materials, prev);
            }
        }

        selection.selected = event.id;
        selection.highlighted = false;

        if let Some(id) = event.id {
            if sim.session.select_by_component(&id) {
                // The simulation colours this one; the detail card updates
                // through the resource change.
                continue;
            }
            lookup.paint(&mut materials, id, &Appearance::flat(HIGHLIGHT));
            selection.highlighted = true;
        }
    }
}

/// Slab-method ray/AABB intersection, returns entry distance.
fn ray_aabb_intersection(ray: &Ray3d, min: Vec3, max: Vec3) -> Option<f32> {
    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1: Vec3 = (min - ray.origin) * inv_dir;
    let t2: Vec3 = (max - ray.origin) * inv_dir;

    let tmin = t1.min(t2);
    let tmax = t1.max(t2);

    let t_enter = tmin.x.max(tmin.y).max(tmin.z);
    let t_exit = tmax.x.min(tmax.y).min(tmax.z);

    if t_enter <= t_exit && t_exit >= 0.0 {
        Some(t_enter.max(0.0))
    } else {
        None
    }
}
