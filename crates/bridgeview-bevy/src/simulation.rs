// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Force simulation bridge
//!
//! Owns the [`SimulationSession`] as a Bevy resource and translates UI
//! commands into session calls, writing the resulting appearances into the
//! component materials.

use crate::mesh::ComponentMaterials;
use crate::SceneData;
use bevy::prelude::*;
use bridgeview_model::ComponentId;
use bridgeview_sim::{SimulationSession, MAX_TARGET_POOL};
use log::debug;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ForceSim>()
            .add_message::<SimulationCommand>()
            .add_systems(Update, handle_simulation_commands);
    }
}

/// The simulation session, one per viewer.
#[derive(Resource, Default)]
pub struct ForceSim {
    pub session: SimulationSession<ComponentId>,
}

/// Commands from the force console.
#[derive(Message)]
pub enum SimulationCommand {
    /// Start a run over one random component
    Run,
    /// Slider moved
    SetForce(f32),
    /// End the run and restore everything
    Reset,
}

fn handle_simulation_commands(
    mut commands: MessageReader<SimulationCommand>,
    mut sim: ResMut<ForceSim>,
    scene_data: Res<SceneData>,
    lookup: Res<ComponentMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut repaint = false;

    for command in commands.read() {
        match command {
            SimulationCommand::Run => {
                let pool: Vec<_> = scene_data
                    .meshes
                    .iter()
                    .take(MAX_TARGET_POOL)
                    .map(|m| (m.id, SceneData::base_appearance(m)))
                    .collect();

                for (id, original) in sim.session.start_random_run(&pool, 1) {
                    lookup.paint(&mut materials, id, &original);
                }
                repaint = true;
            }
            SimulationCommand::SetForce(value) => {
                sim.session.apply_force(*value);
                repaint = sim.session.is_running();
            }
            SimulationCommand::Reset => {
                for (id, original) in sim.session.reset() {
                    lookup.paint(&mut materials, id, &original);
                }
                debug!("simulation reset");
            }
        }
    }

    if repaint {
        let visuals: Vec<_> = sim.session.visuals().collect();
        for (id, _, appearance) in visuals {
            lookup.paint(&mut materials, id, &appearance);
        }
    }
}
