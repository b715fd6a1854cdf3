// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BridgeView - Bevy 3D viewer
//!
//! Desktop viewer for converted `.frag` bridge models (and directly imported
//! `.ifc` files). Orbit/pan/zoom camera, per-component picking, component
//! list and properties panels, and the force simulation overlay driven by
//! `bridgeview-sim`.

pub mod camera;
pub mod loader;
pub mod mesh;
pub mod picking;
pub mod simulation;
pub mod ui;

use bevy::prelude::*;
use bridgeview_fragment::FragMesh;
use bridgeview_model::{Appearance, ComponentInfo, Rgb};

pub use camera::{CameraController, CameraPlugin};
pub use loader::{LoadModelFileEvent, LoaderPlugin, OpenFileDialogRequest};
pub use mesh::{BridgeComponent, ComponentBounds, ComponentMaterials, MeshPlugin};
pub use picking::{PickingPlugin, SelectComponent, SelectionState};
pub use simulation::{ForceSim, SimulationCommand, SimulationPlugin};
pub use ui::{UiState, ViewerUiPlugin};

/// Main viewer plugin, combines all subsystems.
pub struct BridgeViewerPlugin;

impl Plugin for BridgeViewerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneData>().add_plugins((
            CameraPlugin,
            MeshPlugin,
            PickingPlugin,
            LoaderPlugin,
            SimulationPlugin,
            ViewerUiPlugin,
        ));
    }
}

/// Resource holding the loaded model.
#[derive(Resource, Default)]
pub struct SceneData {
    /// Mesh records straight from the codec/importer
    pub meshes: Vec<FragMesh>,
    /// Metadata per component, same order as `meshes`
    pub infos: Vec<ComponentInfo>,
    /// Scene AABB, set once spawning finishes
    pub bounds: Option<SceneBounds>,
    /// File stem of the loaded model, for the status bar
    pub model_name: Option<String>,
    /// Whether the 3D scene needs a rebuild
    pub dirty: bool,
}

impl SceneData {
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.triangle_count()).sum()
    }

    /// Base look of a component, derived from its stored colour.
    pub fn base_appearance(mesh: &FragMesh) -> Appearance {
        Appearance::flat(Rgb::new(mesh.color[0], mesh.color[1], mesh.color[2]))
    }
}

/// Axis-aligned bounding box for the whole scene.
#[derive(Clone, Debug, Default)]
pub struct SceneBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl SceneBounds {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn diagonal(&self) -> f32 {
        (self.max - self.min).length()
    }
}

/// Convert a shared colour into Bevy's sRGB colour.
pub fn srgb(rgb: Rgb) -> Color {
    Color::srgb(rgb.r, rgb.g, rgb.b)
}

/// Run the desktop viewer.
pub fn run_native() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "BridgeView".to_string(),
                resolution: (1280u32, 720u32).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.10, 0.11, 0.14)))
        .add_plugins(BridgeViewerPlugin)
        .run();
}
