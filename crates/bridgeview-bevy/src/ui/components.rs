// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Component list panel
//!
//! Numbered row per component; clicking a row drives the same selection
//! path as clicking the component in the 3D view.

use super::layout::LeftPanel;
use super::styles::{UiColors, UiSizes};
use crate::picking::{SelectComponent, SelectionState};
use crate::SceneData;
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;
use bevy::ui::{
    widget::Button, BackgroundColor, BorderRadius, FlexDirection, Interaction, Node, UiRect, Val,
};
use bridgeview_model::{ComponentId, ComponentInfo};

pub struct ComponentListPlugin;

impl Plugin for ComponentListPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_list.after(super::layout::setup_layout))
            .add_systems(Update, (update_list, handle_row_click));
    }
}

/// Marker for the list header text.
#[derive(Component)]
pub struct ComponentListHeader;

/// Marker for the list body container.
#[derive(Component)]
pub struct ComponentListContent;

/// One clickable row.
#[derive(Component)]
pub struct ComponentRow {
    pub id: ComponentId,
}

fn setup_list(mut commands: Commands, panel_query: Query<Entity, With<LeftPanel>>) {
    let Ok(panel_entity) = panel_query.single() else {
        return;
    };

    commands.entity(panel_entity).with_children(|panel| {
        panel.spawn((
            ComponentListHeader,
            Text::new("Components"),
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
            ComponentListContent,
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

fn update_list(
    mut commands: Commands,
    scene_data: Res<SceneData>,
    content_query: Query<Entity, With<ComponentListContent>>,
    existing_rows: Query<Entity, With<ComponentRow>>,
    mut header: Query<&mut Text, With<ComponentListHeader>>,
) {
    if !scene_data.is_changed() {
        return;
    }

    let Ok(content_entity) = content_query.single() else {
        return;
    };

    if let Ok(mut text) = header.single_mut() {
        *text = Text::new(format!("Components ({})", scene_data.infos.len()));
    }

    for entity in existing_rows.iter() {
        commands.entity(entity).despawn();
    }

    commands.entity(content_entity).with_children(|content| {
        for (index, info) in scene_data.infos.iter().enumerate() {
            spawn_row(content, index, info);
        }
    });
}

fn spawn_row(parent: &mut ChildSpawnerCommands, index: usize, info: &ComponentInfo) {
    parent
        .spawn((
            ComponentRow { id: info.id },
            Button,
            Node {
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(UiSizes::PADDING_SM)),
                border_radius: BorderRadius::all(Val::Px(UiSizes::BORDER_RADIUS)),
                ..default()
            },
            BackgroundColor(Color::NONE),
        ))
        .with_children(|row: &mut ChildSpawnerCommands| {
            row.spawn((
                Text::new(format!("{}. {}", index + 1, info.display_name())),
                TextFont {
                    font_size: UiSizes::FONT_SIZE_SM,
                    ..default()
                },
                TextColor(UiColors::TEXT_PRIMARY),
            ));
            row.spawn((
                Text::new(format!("{} · #{}", info.entity_type, info.id)),
                TextFont {
                    font_size: UiSizes::FONT_SIZE_SM,
                    ..default()
                },
                TextColor(UiColors::TEXT_SECONDARY),
            ));
        });
}

fn handle_row_click(
    mut query: Query<(&Interaction, &ComponentRow, &mut BackgroundColor), Changed<Interaction>>,
    selection: Res<SelectionState>,
    mut select_events: MessageWriter<SelectComponent>,
) {
    for (interaction, row, mut bg_color) in query.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                select_events.write(SelectComponent { id: Some(row.id) });
                *bg_color = BackgroundColor(UiColors::SELECTED);
            }
            Interaction::Hovered => {
                *bg_color = BackgroundColor(UiColors::HOVER);
            }
            Interaction::None => {
                *bg_color = if selection.is_selected(row.id) {
                    BackgroundColor(UiColors::SELECTED)
                } else {
                    BackgroundColor(Color::NONE)
                };
            }
        }
    }
}
