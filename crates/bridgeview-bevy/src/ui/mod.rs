// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bevy UI for the viewer
//!
//! Pure Bevy UI: toolbar, component list (left), properties (right), the
//! force simulation console (bottom-left overlay) and a status bar.

mod components;
mod force_panel;
mod layout;
mod properties;
mod styles;
mod toolbar;

pub use components::*;
pub use force_panel::*;
pub use layout::*;
pub use properties::*;
pub use styles::*;
pub use toolbar::{ButtonAction, ToolbarButton, ToolbarPlugin};

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::ui::{ComputedNode, ScrollPosition};

pub struct ViewerUiPlugin;

impl Plugin for ViewerUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .add_plugins((
                LayoutPlugin,
                ToolbarPlugin,
                ComponentListPlugin,
                PropertiesPlugin,
                ForcePanelPlugin,
            ))
            .add_systems(Update, ui_scroll_system);
    }
}

/// Global UI state.
#[derive(Resource)]
pub struct UiState {
    pub show_components: bool,
    pub show_properties: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_components: true,
            show_properties: true,
        }
    }
}

/// Marker for panels that scroll with the mouse wheel.
#[derive(Component)]
pub struct ScrollablePanel;

/// Wheel scrolling for whichever scrollable panel is under the cursor.
fn ui_scroll_system(
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut scrollable_query: Query<
        (&mut ScrollPosition, &ComputedNode, &GlobalTransform),
        With<ScrollablePanel>,
    >,
    windows: Query<&Window>,
) {
    const LINE_HEIGHT: f32 = 40.0;

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };

    for ev in mouse_wheel.read() {
        let delta_y = -ev.y * LINE_HEIGHT;

        for (mut scroll_pos, computed, global_transform) in scrollable_query.iter_mut() {
            let node_pos = global_transform.translation().truncate();
            let half_size = computed.size() / 2.0;

            let within = cursor_pos.x >= node_pos.x - half_size.x
                && cursor_pos.x <= node_pos.x + half_size.x
                && cursor_pos.y >= node_pos.y - half_size.y
                && cursor_pos.y <= node_pos.y + half_size.y;

            if within {
                scroll_pos.y = (scroll_pos.y + delta_y).max(0.0);
                break;
            }
        }
    }
}
