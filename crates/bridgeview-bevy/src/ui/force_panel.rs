// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Force simulation console
//!
//! Bottom-left overlay: force readout and slider, run/reset buttons, and a
//! detail card for the selected simulated component. The slider is a drag
//! target; while the left button is held on the track, the cursor's
//! horizontal position maps to the force range in steps of 10 kN.

use super::styles::{UiColors, UiSizes};
use crate::simulation::{ForceSim, SimulationCommand};
use crate::SceneData;
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;
use bevy::ui::{
    widget::Button, AlignItems, AlignSelf, BackgroundColor, BorderRadius, ComputedNode,
    FlexDirection, Interaction, JustifyContent, Node, PositionType, UiRect, Val,
};
use bridgeview_model::Rgb;
use bridgeview_sim::{FORCE_MAX, FORCE_MIN};

/// Slider step in kN.
const FORCE_STEP: f32 = 10.0;

pub struct ForcePanelPlugin;

impl Plugin for ForcePanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_force_panel.after(super::layout::setup_layout))
            .add_systems(
                Update,
                (sim_button_system, slider_drag_system, update_force_panel),
            );
    }
}

#[derive(Component)]
pub struct ForcePanel;

/// "Force: N kN" readout.
#[derive(Component)]
pub struct ForceReadout;

/// Drag target of the slider.
#[derive(Component)]
pub struct ForceSliderTrack;

/// Filled part of the slider, width follows the force.
#[derive(Component)]
pub struct ForceSliderFill;

/// Container the detail card rows are rebuilt into.
#[derive(Component)]
pub struct SimDetailCard;

/// Cleanup marker for detail card rows.
#[derive(Component)]
pub struct SimDetailRow;

#[derive(Component)]
pub struct SimButton {
    pub action: SimButtonAction,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SimButtonAction {
    Run,
    Reset,
}

fn setup_force_panel(mut commands: Commands) {
    commands
        .spawn((
            ForcePanel,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(UiSizes::PANEL_WIDTH + UiSizes::PADDING * 2.0),
                bottom: Val::Px(UiSizes::STATUS_HEIGHT + UiSizes::PADDING * 2.0),
                width: Val::Px(UiSizes::FORCE_PANEL_WIDTH),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(UiSizes::PADDING)),
                border_radius: BorderRadius::all(Val::Px(UiSizes::BORDER_RADIUS)),
                ..default()
            },
            BackgroundColor(UiColors::PANEL_BG),
            Interaction::default(),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new("Force Simulation"),
                TextFont {
                    font_size: UiSizes::FONT_SIZE,
                    ..default()
                },
                TextColor(UiColors::TEXT_ACCENT),
                Node {
                    margin: UiRect::bottom(Val::Px(UiSizes::PADDING_SM)),
                    ..default()
                },
            ));

            panel.spawn((
                ForceReadout,
                Text::new("Force: 500 kN"),
                TextFont {
                    font_size: UiSizes::FONT_SIZE_SM,
                    ..default()
                },
                TextColor(UiColors::TEXT_PRIMARY),
            ));

            // Slider track with a fill bar child
            panel
                .spawn((
                    ForceSliderTrack,
                    Button,
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(14.0),
                        margin: UiRect::vertical(Val::Px(UiSizes::PADDING_SM)),
                        border_radius: BorderRadius::all(Val::Px(7.0)),
                        ..default()
                    },
                    BackgroundColor(UiColors::SLIDER_TRACK),
                ))
                .with_children(|track: &mut ChildSpawnerCommands| {
                    track.spawn((
                        ForceSliderFill,
                        Node {
                            width: Val::Percent(500.0 / FORCE_MAX * 100.0),
                            height: Val::Percent(100.0),
                            border_radius: BorderRadius::all(Val::Px(7.0)),
                            ..default()
                        },
                        BackgroundColor(UiColors::SLIDER_FILL),
                    ));
                });

            // Run / reset buttons
            panel
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        flex_direction: FlexDirection::Row,
                        margin: UiRect::vertical(Val::Px(UiSizes::PADDING_SM)),
                        ..default()
                    },
                    BackgroundColor(Color::NONE),
                ))
                .with_children(|row: &mut ChildSpawnerCommands| {
                    spawn_sim_button(row, "Random load point", SimButtonAction::Run);
                    spawn_sim_button(row, "Reset", SimButtonAction::Reset);
                });

            // Detail card for the selected entry
            panel.spawn((
                SimDetailCard,
                Node {
                    width: Val::Percent(100.0),
                    flex_direction: FlexDirection::Column,
                    ..default()
                },
                BackgroundColor(Color::NONE),
            ));
        });
}

fn spawn_sim_button(parent: &mut ChildSpawnerCommands, label: &str, action: SimButtonAction) {
    parent
        .spawn((
            SimButton { action },
            Button,
            Node {
                flex_grow: 1.0,
                height: Val::Px(28.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                margin: UiRect::horizontal(Val::Px(2.0)),
                border_radius: BorderRadius::all(Val::Px(UiSizes::BORDER_RADIUS)),
                ..default()
            },
            BackgroundColor(UiColors::BUTTON_BG),
        ))
        .with_children(|btn: &mut ChildSpawnerCommands| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: UiSizes::FONT_SIZE_SM,
                    ..default()
                },
                TextColor(UiColors::TEXT_PRIMARY),
            ));
        });
}

fn sim_button_system(
    mut query: Query<(&Interaction, &SimButton, &mut BackgroundColor), Changed<Interaction>>,
    mut commands: MessageWriter<SimulationCommand>,
) {
    for (interaction, button, mut bg_color) in query.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                *bg_color = BackgroundColor(UiColors::BUTTON_ACTIVE);
                match button.action {
                    SimButtonAction::Run => {
                        commands.write(SimulationCommand::Run);
                    }
                    SimButtonAction::Reset => {
                        commands.write(SimulationCommand::Reset);
                    }
                }
            }
            Interaction::Hovered => {
                *bg_color = BackgroundColor(UiColors::BUTTON_HOVER);
            }
            Interaction::None => {
                *bg_color = BackgroundColor(UiColors::BUTTON_BG);
            }
        }
    }
}

/// While the left button is held on the track, map the cursor to a force.
fn slider_drag_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    track_query: Query<(&Interaction, &ComputedNode, &GlobalTransform), With<ForceSliderTrack>>,
    mut commands: MessageWriter<SimulationCommand>,
) {
    if !mouse_button.pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };

    for (interaction, computed, global_transform) in track_query.iter() {
        if !matches!(interaction, Interaction::Pressed) {
            continue;
        }
        let center_x = global_transform.translation().x;
        let width = computed.size().x;
        if width <= 0.0 {
            continue;
        }

        let t = ((cursor_pos.x - (center_x - width / 2.0)) / width).clamp(0.0, 1.0);
        let raw = FORCE_MIN + t * (FORCE_MAX - FORCE_MIN);
        let force = (raw / FORCE_STEP).round() * FORCE_STEP;
        commands.write(SimulationCommand::SetForce(force));
    }
}

/// Refresh readout, fill bar and the detail card whenever the session or
/// the scene changes.
fn update_force_panel(
    mut commands: Commands,
    sim: Res<ForceSim>,
    scene_data: Res<SceneData>,
    mut readout: Query<&mut Text, With<ForceReadout>>,
    mut fill: Query<&mut Node, With<ForceSliderFill>>,
    card_query: Query<Entity, With<SimDetailCard>>,
    existing_rows: Query<Entity, With<SimDetailRow>>,
) {
    if !sim.is_changed() && !scene_data.is_changed() {
        return;
    }

    let force = sim.session.force();
    if let Ok(mut text) = readout.single_mut() {
        *text = Text::new(format!("Force: {} kN", force as i64));
    }
    if let Ok(mut node) = fill.single_mut() {
        node.width = Val::Percent(force / FORCE_MAX * 100.0);
    }

    let Ok(card_entity) = card_query.single() else {
        return;
    };
    for entity in existing_rows.iter() {
        commands.entity(entity).despawn();
    }

    let Some((entry, sample)) = sim.session.selected() else {
        return;
    };
    let name = scene_data
        .infos
        .iter()
        .find(|info| info.id == entry.component)
        .map(|info| info.display_name())
        .unwrap_or_else(|| format!("Component #{}", entry.component));
    let stiffness = entry.stiffness;

    commands.entity(card_entity).with_children(|card| {
        spawn_detail_row(card, "Load point", &name);
        spawn_detail_row(card, "Stiffness", &format!("{stiffness:.2}"));
        spawn_detail_row(card, "Deformation", &format!("{:.1} mm", sample.deformation));

        // Intensity bar tinted with the current stress colour
        card.spawn((
            SimDetailRow,
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(8.0),
                margin: UiRect::vertical(Val::Px(UiSizes::PADDING_SM)),
                border_radius: BorderRadius::all(Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(UiColors::SLIDER_TRACK),
        ))
        .with_children(|bar: &mut ChildSpawnerCommands| {
            bar.spawn((
                Node {
                    width: Val::Percent(sample.intensity * 100.0),
                    height: Val::Percent(100.0),
                    border_radius: BorderRadius::all(Val::Px(4.0)),
                    ..default()
                },
                BackgroundColor(crate::srgb(sample.appearance().diffuse)),
            ));
        });

        // Status badge
        card.spawn((
            SimDetailRow,
            Node {
                padding: UiRect::axes(Val::Px(UiSizes::PADDING), Val::Px(2.0)),
                margin: UiRect::top(Val::Px(UiSizes::PADDING_SM)),
                align_self: AlignSelf::FlexStart,
                border_radius: BorderRadius::all(Val::Px(UiSizes::BORDER_RADIUS)),
                ..default()
            },
            BackgroundColor(crate::srgb(sample.status.badge_color())),
        ))
        .with_children(|badge: &mut ChildSpawnerCommands| {
            badge.spawn((
                Text::new(sample.status.label()),
                TextFont {
                    font_size: UiSizes::FONT_SIZE_SM,
                    ..default()
                },
                TextColor(srgb_contrast(sample.status.badge_color())),
            ));
        });
    });
}

fn spawn_detail_row(parent: &mut ChildSpawnerCommands, label: &str, value: &str) {
    parent
        .spawn((
            SimDetailRow,
            Node {
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::vertical(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::NONE),
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

/// Dark text on light badges, light text on dark ones.
fn srgb_contrast(rgb: Rgb) -> Color {
    let luma = 0.299 * rgb.r + 0.587 * rgb.g + 0.114 * rgb.b;
    if luma > 0.6 {
        Color::srgb(0.1, 0.1, 0.1)
    } else {
        Color::srgb(0.95, 0.95, 0.95)
    }
}
