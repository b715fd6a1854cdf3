// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh record stored in a fragment archive

use bridgeview_model::{ComponentId, ComponentInfo};
use serde::{Deserialize, Serialize};

/// One triangulated component as stored on disk.
///
/// Serde derives exist for debug dumps; the wire format is the hand-written
/// binary layout in [`crate::codec`], not serde.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FragMesh {
    /// Component id, stable across conversion and viewing
    pub id: ComponentId,
    /// Vertex positions (flattened: [x0,y0,z0, x1,y1,z1, ...])
    pub positions: Vec<f32>,
    /// Vertex normals (flattened, same length as positions, or empty)
    pub normals: Vec<f32>,
    /// Triangle indices
    pub indices: Vec<u32>,
    /// Base colour [r, g, b, a]
    pub color: [f32; 4],
    /// Transform matrix (column-major 4x4)
    pub transform: [f32; 16],
    /// IFC entity type (e.g. "IFCWALL")
    pub entity_type: String,
    /// Entity name
    pub name: Option<String>,
}

/// Identity transform for meshes whose coordinates are already absolute.
pub const IDENTITY_TRANSFORM: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, // column 0
    0.0, 1.0, 0.0, 0.0, // column 1
    0.0, 0.0, 1.0, 0.0, // column 2
    0.0, 0.0, 0.0, 1.0, // column 3
];

impl FragMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }

    /// Metadata view for list/properties panels.
    pub fn info(&self) -> ComponentInfo {
        ComponentInfo {
            id: self.id,
            entity_type: self.entity_type.clone(),
            name: self.name.clone(),
        }
    }
}
