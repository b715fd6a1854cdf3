// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model loading - file dialog and drag-and-drop
//!
//! Accepts `.frag` archives (decoded by the codec) and raw `.ifc` files
//! (run through the importer on the spot).

use crate::simulation::ForceSim;
use crate::{SceneData, SelectionState};
use anyhow::Context;
use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};
use bridgeview_fragment::FragMesh;
use bridgeview_ifc::IfcImporter;
use log::{info, warn};
use std::path::{Path, PathBuf};

pub struct LoaderPlugin;

impl Plugin for LoaderPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<LoadModelFileEvent>()
            .add_message::<OpenFileDialogRequest>()
            .init_resource::<FileDialogState>()
            .add_systems(
                Update,
                (
                    handle_open_dialog_request,
                    poll_file_dialog,
                    handle_load_file_event,
                    handle_file_drop,
                ),
            );
    }
}

/// Request to open the native file dialog.
#[derive(Message)]
pub struct OpenFileDialogRequest;

/// Request to load a model file.
#[derive(Message)]
pub struct LoadModelFileEvent {
    pub path: PathBuf,
}

/// Pending async file dialog.
#[derive(Resource, Default)]
pub struct FileDialogState {
    task: Option<Task<Option<PathBuf>>>,
}

fn handle_open_dialog_request(
    mut requests: MessageReader<OpenFileDialogRequest>,
    mut state: ResMut<FileDialogState>,
) {
    for _ in requests.read() {
        if state.task.is_some() {
            continue;
        }

        let task = IoTaskPool::get().spawn(async {
            use rfd::AsyncFileDialog;

            let file = AsyncFileDialog::new()
                .add_filter("Model files", &["frag", "ifc", "IFC"])
                .set_title("Open model")
                .pick_file()
                .await;

            file.map(|f| f.path().to_path_buf())
        });
        state.task = Some(task);
    }
}

fn poll_file_dialog(
    mut state: ResMut<FileDialogState>,
    mut load_events: MessageWriter<LoadModelFileEvent>,
) {
    if let Some(ref mut task) = state.task {
        if let Some(result) = bevy::tasks::block_on(bevy::tasks::poll_once(task)) {
            if let Some(path) = result {
                load_events.write(LoadModelFileEvent { path });
            }
            state.task = None;
        }
    }
}

fn handle_load_file_event(
    mut events: MessageReader<LoadModelFileEvent>,
    mut scene_data: ResMut<SceneData>,
    mut sim: ResMut<ForceSim>,
    mut selection: ResMut<SelectionState>,
) {
    for event in events.read() {
        info!("loading {}", event.path.display());

        match load_model_file(&event.path) {
            Ok(meshes) => {
                // Any running simulation references the old scene; the old
                // materials are about to be despawned, drop the restorations.
                let _ = sim.session.reset();
                selection.clear();

                scene_data.infos = meshes.iter().map(|m| m.info()).collect();
                scene_data.meshes = meshes;
                scene_data.model_name = event
                    .path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned());
                scene_data.dirty = true;

                info!(
                    "loaded {} with {} components",
                    event.path.display(),
                    scene_data.meshes.len()
                );
            }
            Err(e) => warn!("failed to load {}: {e:#}", event.path.display()),
        }
    }
}

fn handle_file_drop(
    mut drop_events: MessageReader<bevy::window::FileDragAndDrop>,
    mut load_events: MessageWriter<LoadModelFileEvent>,
) {
    for event in drop_events.read() {
        if let bevy::window::FileDragAndDrop::DroppedFile { path_buf, .. } = event {
            let supported = path_buf.extension().is_some_and(|ext| {
                ext.eq_ignore_ascii_case("ifc") || ext.eq_ignore_ascii_case("frag")
            });
            if supported {
                load_events.write(LoadModelFileEvent {
                    path: path_buf.clone(),
                });
            }
        }
    }
}

/// Read and decode a model file by extension.
fn load_model_file(path: &Path) -> anyhow::Result<Vec<FragMesh>> {
    let is_frag = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("frag"));

    if is_frag {
        let data = std::fs::read(path).context("reading fragment file")?;
        Ok(bridgeview_fragment::decode(&data)?)
    } else {
        let content = std::fs::read_to_string(path).context("reading IFC file")?;
        Ok(IfcImporter::import(&content)?)
    }
}
