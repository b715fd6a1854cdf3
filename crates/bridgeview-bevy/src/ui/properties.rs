// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Properties panel - details of the selected component

use super::layout::RightPanel;
use super::styles::{UiColors, UiSizes};
use crate::picking::SelectionState;
use crate::SceneData;
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;
use bevy::ui::{BackgroundColor, BorderColor, FlexDirection, JustifyContent, Node, UiRect, Val};

pub struct PropertiesPlugin;

impl Plugin for PropertiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_properties.after(super::layout::setup_layout))
            .add_systems(Update, update_properties);
    }
}

#[derive(Component)]
pub struct PropertiesContent;

/// Cleanup marker for rebuilt rows.
#[derive(Component)]
pub struct PropertyRow;

fn setup_properties(mut commands: Commands, panel_query: Query<Entity, With<RightPanel>>) {
    let Ok(panel_entity) = panel_query.single() else {
        return;
    };

    commands.entity(panel_entity).with_children(|panel| {
        panel.spawn((
            Text::new("Properties"),
            TextFont {
                font_size: UiSizes::FONT_SIZE_LG,
                ..default()
            },
            TextColor(UiColors::TEXT_PRIMARY),
            Node {
                margin: UiRect::bottom(Val::Px(UiSizes::PADDING)),
                ..default()
            },
        ));

        panel.spawn((
            PropertiesContent,
            Node {
                width: Val::Percent(100.0),
                flex_grow: 1.0,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::NONE),
        ));
    });
}

fn update_properties(
    mut commands: Commands,
    selection: Res<SelectionState>,
    scene_data: Res<SceneData>,
    content_query: Query<Entity, With<PropertiesContent>>,
    existing_rows: Query<Entity, With<PropertyRow>>,
) {
    if !selection.is_changed() && !scene_data.is_changed() {
        return;
    }

    let Ok(content_entity) = content_query.single() else {
        return;
    };

    for entity in existing_rows.iter() {
        commands.entity(entity).despawn();
    }

    commands.entity(content_entity).with_children(|content| {
        let Some(id) = selection.selected else {
            spawn_no_selection(content);
            return;
        };
        let Some(mesh) = scene_data.meshes.iter().find(|m| m.id == id) else {
            spawn_no_selection(content);
            return;
        };

        spawn_property_row(content, "Type", &mesh.entity_type);
        if let Some(ref name) = mesh.name {
            spawn_property_row(content, "Name", name);
        }
        spawn_property_row(content, "ID", &format!("#{id}"));
        spawn_property_row(content, "Triangles", &mesh.triangle_count().to_string());
        spawn_property_row(content, "Vertices", &mesh.vertex_count().to_string());
    });
}

fn spawn_property_row(parent: &mut ChildSpawnerCommands, label: &str, value: &str) {
    parent
        .spawn((
            PropertyRow,
            Node {
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::vertical(Val::Px(UiSizes::PADDING_SM)),
                border: UiRect::bottom(Val::Px(1.0)),
                ..default()
            },
            BorderColor::all(UiColors::BORDER),
        ))
        .with_children(|row: &mut ChildSpawnerCommands| {
            row.spawn((
                Text::new(label),
                TextFont {
                    font_size: UiSizes::FONT_SIZE_SM,
                    ..default()
                },
                TextColor(UiColors::TEXT_SECONDARY),
            ));
            row.spawn((
                Text::new(value),
                TextFont {
                    font_size: UiSizes::FONT_SIZE_SM,
                    ..default()
                },
                TextColor(UiColors::TEXT_PRIMARY),
            ));
        });
}

fn spawn_no_selection(parent: &mut ChildSpawnerCommands) {
    parent.spawn((
        PropertyRow,
        Text::new("No selection"),
        TextFont {
            font_size: UiSizes::FONT_SIZE,
            ..default()
        },
        TextColor(UiColors::TEXT_SECONDARY),
        Node {
            margin: UiRect::top(Val::Px(UiSizes::PADDING * 2.0)),
            ..default()
        },
    ));

    parent.spawn((
        PropertyRow,
        Text::new("Click a component in the 3D view or in the list to inspect it."),
        TextFont {
            font_size: UiSizes::FONT_SIZE_SM,
            ..default()
        },
        TextColor(UiColors::TEXT_SECONDARY),
        Node {
            margin: UiRect::top(Val::Px(UiSizes::PADDING)),
            ..default()
        },
    ));
}
