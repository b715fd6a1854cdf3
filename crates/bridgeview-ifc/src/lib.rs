// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BridgeView IFC - minimal STEP importer
//!
//! Extracts pre-triangulated geometry (`IFCTRIANGULATEDFACESET` backed by
//! `IFCCARTESIANPOINTLIST3D`) and the owning product's type and name, and
//! emits [`bridgeview_fragment::FragMesh`] records ready for the viewer or
//! the `.frag` encoder.
//!
//! Deliberately NOT a general IFC engine: parametric representations
//! (extrusions, BReps, CSG) are skipped with a log message. Models exported
//! with pre-tessellated geometry - the common case for bridge models coming
//! out of coordination tools - import fully.

pub mod importer;
pub mod palette;
pub mod record;
pub mod scanner;

pub use importer::IfcImporter;
pub use palette::default_color;
pub use scanner::RecordScanner;
