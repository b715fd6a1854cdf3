// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Orbit camera
//!
//! Left drag orbits, right drag pans, wheel zooms. Spherical coordinates
//! around a target point, with damping and eased animations for the Home
//! preset and fit-to-bounds.

use crate::SceneBounds;
use bevy::ecs::message::MessageReader;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

/// System set for camera input, so picking can order itself after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CameraInputSet;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraController>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (camera_input_system, camera_keyboard_system, camera_update_system)
                    .chain()
                    .in_set(CameraInputSet),
            );
    }
}

/// Camera controller resource.
#[derive(Resource)]
pub struct CameraController {
    /// Point the camera orbits around
    pub target: Vec3,
    /// Distance from target
    pub distance: f32,
    /// Horizontal rotation
    pub azimuth: f32,
    /// Vertical rotation
    pub elevation: f32,
    /// Damping factor for smooth movement
    pub damping: f32,
    /// Active eased transition, if any
    pub animation: Option<CameraAnimation>,
    /// Field of view in degrees
    pub fov: f32,
    pub orbit_sensitivity: f32,
    pub pan_sensitivity: f32,
    pub zoom_sensitivity: f32,
    /// Left button held
    pub is_orbiting: bool,
    /// Right button held
    pub is_panning: bool,
    /// Did the current left drag move past the click threshold
    pub did_drag: bool,
    /// Left button released without dragging; consumed by picking
    pub just_clicked: bool,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 100.0,
            azimuth: 0.785,   // 45 degrees
            elevation: 0.615, // ~35 degrees, isometric
            damping: 0.90,
            animation: None,
            fov: 45.0,
            orbit_sensitivity: 0.005,
            pan_sensitivity: 0.0015,
            zoom_sensitivity: 0.1,
            is_orbiting: false,
            is_panning: false,
            did_drag: false,
            just_clicked: false,
        }
    }
}

impl CameraController {
    /// Camera position from spherical coordinates.
    pub fn get_position(&self) -> Vec3 {
        let x = self.distance * self.elevation.cos() * self.azimuth.sin();
        let y = self.distance * self.elevation.sin();
        let z = self.distance * self.elevation.cos() * self.azimuth.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Animate to the isometric home view.
    pub fn home(&mut self) {
        self.animation = Some(CameraAnimation {
            azimuth: 0.785,
            elevation: 0.615,
            distance: self.distance,
            target: self.target,
            duration: 0.5,
            elapsed: 0.0,
        });
    }

    /// Animate the camera so the given bounds fill the view.
    pub fn fit_bounds(&mut self, bounds: &SceneBounds) {
        self.animation = Some(CameraAnimation {
            azimuth: self.azimuth,
            elevation: self.elevation,
            distance: self.fit_distance(bounds),
            target: bounds.center(),
            duration: 0.5,
            elapsed: 0.0,
        });
    }

    /// Jump to fit without animating, used right after a load.
    pub fn snap_to_bounds(&mut self, bounds: &SceneBounds) {
        self.animation = None;
        self.target = bounds.center();
        self.distance = self.fit_distance(bounds);
        self.azimuth = 0.785;
        self.elevation = 0.615;
    }

    /// Distance at which the bounds' diagonal fills the vertical fov.
    fn fit_distance(&self, bounds: &SceneBounds) -> f32 {
        let fov_rad = self.fov.to_radians();
        (bounds.diagonal() / (2.0 * (fov_rad / 2.0).tan())).max(1.0)
    }
}

/// Eased camera transition.
#[derive(Clone, Debug)]
pub struct CameraAnimation {
    pub azimuth: f32,
    pub elevation: f32,
    pub distance: f32,
    pub target: Vec3,
    pub duration: f32,
    pub elapsed: f32,
}

/// Marker component for the main 3D camera.
#[derive(Component)]
pub struct MainCamera;

fn setup_camera(mut commands: Commands, controller: Res<CameraController>) {
    use bevy::render::view::Msaa;

    let position = controller.get_position();

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(position).looking_at(controller.target, Vec3::Y),
        Projection::Perspective(PerspectiveProjection {
            fov: controller.fov.to_radians(),
            near: 0.01,
            far: 100000.0,
            ..default()
        }),
        MainCamera,
        Msaa::Sample4,
    ));

    commands.spawn(AmbientLight {
        color: Color::WHITE,
        brightness: 120.0,
        affects_lightmapped_meshes: true,
    });

    // Key light from top-front, fill from the opposite side
    commands.spawn((
        DirectionalLight {
            color: Color::srgb(1.0, 0.99, 0.97),
            illuminance: 22000.0,
            shadows_enabled: false,
            affects_lightmapped_mesh_diffuse: true,
            ..default()
        },
        Transform::from_xyz(0.5, 1.0, 0.3).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            color: Color::srgb(0.85, 0.9, 1.0),
            illuminance: 7000.0,
            shadows_enabled: false,
            affects_lightmapped_mesh_diffuse: true,
            ..default()
        },
        Transform::from_xyz(-0.5, 0.4, -0.6).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Mouse input: orbit on left drag, pan on right drag, zoom on wheel.
fn camera_input_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut controller: ResMut<CameraController>,
    ui_interactions: Query<&Interaction, With<Node>>,
) {
    // Don't start a drag or zoom while the cursor is on a UI panel
    let mouse_over_ui = ui_interactions
        .iter()
        .any(|i| matches!(i, Interaction::Hovered | Interaction::Pressed));

    if mouse_button.just_pressed(MouseButton::Left) && !mouse_over_ui {
        controller.is_orbiting = true;
        controller.did_drag = false;
        controller.just_clicked = false;
    }
    if mouse_button.just_released(MouseButton::Left) {
        if controller.is_orbiting && !controller.did_drag {
            controller.just_clicked = true;
        }
        controller.is_orbiting = false;
    }
    if mouse_button.just_pressed(MouseButton::Right) && !mouse_over_ui {
        controller.is_panning = true;
    }
    if mouse_button.just_released(MouseButton::Right) {
        controller.is_panning = false;
    }

    for ev in mouse_motion.read() {
        if controller.is_orbiting {
            if ev.delta.length() > 3.0 {
                controller.did_drag = true;
            }
            controller.azimuth -= ev.delta.x * controller.orbit_sensitivity;
            controller.elevation -= ev.delta.y * controller.orbit_sensitivity;
            controller.elevation = controller.elevation.clamp(-1.5, 1.5);
        } else if controller.is_panning {
            let right = Vec3::new(controller.azimuth.cos(), 0.0, -controller.azimuth.sin());
            let pan = right * ev.delta.x * controller.pan_sensitivity * controller.distance
                - Vec3::Y * ev.delta.y * controller.pan_sensitivity * controller.distance;
            controller.target += pan;
        }
    }

    if !mouse_over_ui {
        for ev in mouse_wheel.read() {
            let zoom_delta = ev.y * controller.zoom_sensitivity;
            controller.distance = (controller.distance * (1.0 - zoom_delta)).clamp(0.1, 100000.0);
        }
    }
}

fn camera_keyboard_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut controller: ResMut<CameraController>,
) {
    if keyboard.just_pressed(KeyCode::KeyH) {
        controller.home();
    }
}

/// Apply animation and damping, then write the camera transform.
fn camera_update_system(
    mut controller: ResMut<CameraController>,
    mut camera: Query<&mut Transform, With<MainCamera>>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    if let Some(mut anim) = controller.animation.take() {
        anim.elapsed += dt;
        let t = (anim.elapsed / anim.duration).min(1.0);
        // Ease out cubic
        let t = 1.0 - (1.0 - t).powi(3);

        controller.azimuth = lerp(controller.azimuth, anim.azimuth, t);
        controller.elevation = lerp(controller.elevation, anim.elevation, t);
        controller.distance = lerp(controller.distance, anim.distance, t);
        controller.target = controller.target.lerp(anim.target, t);

        if anim.elapsed < anim.duration {
            controller.animation = Some(anim);
        }
    }

    if let Ok(mut transform) = camera.single_mut() {
        let position = controller.get_position();
        transform.translation = transform
            .translation
            .lerp(position, 1.0 - controller.damping.powi(2));
        transform.look_at(controller.target, Vec3::Y);
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_bounds_frames_scene() {
        let bounds = SceneBounds {
            min: Vec3::new(-10.0, 0.0, -10.0),
            max: Vec3::new(10.0, 20.0, 10.0),
        };
        let mut controller = CameraController::default();
        controller.home();

        controller.snap_to_bounds(&bounds);
        assert!(controller.animation.is_none());
        assert_eq!(controller.target, bounds.center());
        // Diagonal over the fov tangent, so strictly beyond the bounds
        assert!(controller.distance > bounds.diagonal() / 2.0);
    }

    #[test]
    fn test_fit_bounds_animates_to_center() {
        let bounds = SceneBounds {
            min: Vec3::ZERO,
            max: Vec3::splat(50.0),
        };
        let mut controller = CameraController::default();

        controller.fit_bounds(&bounds);
        let anim = controller.animation.as_ref().unwrap();
        assert_eq!(anim.target, bounds.center());
        assert!(anim.distance >= 1.0);
    }
}
