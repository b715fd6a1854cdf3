// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Main UI layout - toolbar, panels, viewport, status bar

use super::styles::{UiColors, UiSizes};
use crate::SceneData;
use bevy::prelude::*;
use bevy::ui::{
    AlignItems, BackgroundColor, FlexDirection, Node, Overflow, ScrollPosition, UiRect, Val,
};

pub struct LayoutPlugin;

impl Plugin for LayoutPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_ui_camera, setup_layout).chain())
            .add_systems(Update, update_status_bar);
    }
}

/// Marker for the UI camera.
#[derive(Component)]
pub struct UiOnlyCamera;

/// Dedicated 2D camera rendered on top of the 3D view.
fn setup_ui_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Camera {
            order: 1,
            clear_color: bevy::prelude::ClearColorConfig::None,
            ..default()
        },
        UiOnlyCamera,
    ));
}

#[derive(Component)]
pub struct UiRoot;

#[derive(Component)]
pub struct ToolbarContainer;

/// Left panel: component list.
#[derive(Component)]
pub struct LeftPanel;

/// Right panel: properties.
#[derive(Component)]
pub struct RightPanel;

/// Transparent area the 3D scene shows through.
#[derive(Component)]
pub struct ViewportArea;

#[derive(Component)]
pub struct StatusBar;

/// Text inside the status bar.
#[derive(Component)]
pub struct StatusBarText;

pub fn setup_layout(mut commands: Commands) {
    commands
        .spawn((
            UiRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::NONE),
        ))
        .with_children(|parent| {
            parent.spawn((
                ToolbarContainer,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Px(UiSizes::TOOLBAR_HEIGHT),
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    padding: UiRect::horizontal(Val::Px(UiSizes::PADDING)),
                    ..default()
                },
                BackgroundColor(UiColors::TOOLBAR_BG),
            ));

            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        flex_direction: FlexDirection::Row,
                        ..default()
                    },
                    BackgroundColor(Color::NONE),
                ))
                .with_children(|content| {
                    content.spawn((
                        LeftPanel,
                        super::ScrollablePanel,
                        Node {
                            width: Val::Px(UiSizes::PANEL_WIDTH),
                            height: Val::Percent(100.0),
                            flex_direction: FlexDirection::Column,
                            padding: UiRect::all(Val::Px(UiSizes::PADDING)),
                            overflow: Overflow::scroll_y(),
                            ..default()
                        },
                        BackgroundColor(UiColors::PANEL_BG),
                        Interaction::default(),
                        ScrollPosition::default(),
                    ));

                    content.spawn((
                        ViewportArea,
                        Node {
                            flex_grow: 1.0,
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::NONE),
                    ));

                    content.spawn((
                        RightPanel,
                        super::ScrollablePanel,
                        Node {
                            width: Val::Px(UiSizes::PANEL_WIDTH),
                            height: Val::Percent(100.0),
                            flex_direction: FlexDirection::Column,
                            padding: UiRect::all(Val::Px(UiSizes::PADDING)),
                            overflow: Overflow::scroll_y(),
                            ..default()
                        },
                        BackgroundColor(UiColors::PANEL_BG),
                        Interaction::default(),
                        ScrollPosition::default(),
                    ));
                });

            parent
                .spawn((
                    StatusBar,
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(UiSizes::STATUS_HEIGHT),
                        flex_direction: FlexDirection::Row,
                        align_items: AlignItems::Center,
                        padding: UiRect::horizontal(Val::Px(UiSizes::PADDING)),
                        ..default()
                    },
                    BackgroundColor(UiColors::TOOLBAR_BG),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        StatusBarText,
                        Text::new("No model loaded"),
                        TextFont {
                            font_size: UiSizes::FONT_SIZE_SM,
                            ..default()
                        },
                        TextColor(UiColors::TEXT_SECONDARY),
                    ));
                });
        });
}

fn update_status_bar(
    scene_data: Res<SceneData>,
    mut status_text: Query<&mut Text, With<StatusBarText>>,
) {
    if !scene_data.is_changed() {
        return;
    }
    let Ok(mut text) = status_text.single_mut() else {
        return;
    };

    *text = match scene_data.model_name {
        Some(ref name) => Text::new(format!(
            "{} - {} components, {} triangles",
            name,
            scene_data.meshes.len(),
            scene_data.triangle_count()
        )),
        None => Text::new("No model loaded - open a .frag or .ifc file, or drop one here"),
    };
}
