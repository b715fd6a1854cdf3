// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC to mesh import
//!
//! Resolves `IFCTRIANGULATEDFACESET` geometry to its owning product through
//! the `IFCPRODUCTDEFINITIONSHAPE` / `IFCSHAPEREPRESENTATION` chain, so each
//! emitted mesh carries the product's id, type and name. Facesets no product
//! points at are still emitted under their own record id.

use bridgeview_fragment::{FragMesh, IDENTITY_TRANSFORM};
use bridgeview_model::{ModelError, Result};
use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::palette::default_color;
use crate::record::{all_floats, all_refs, all_uints, attr_ref, attr_string, split_attrs};
use crate::scanner::{Record, RecordScanner};

/// Entity types that anchor a component in the viewer.
const PRODUCT_TYPES: &[&str] = &[
    "IFCBEAM",
    "IFCBEARING",
    "IFCBUILDINGELEMENTPROXY",
    "IFCCOLUMN",
    "IFCCOVERING",
    "IFCFOOTING",
    "IFCMEMBER",
    "IFCPILE",
    "IFCPLATE",
    "IFCRAILING",
    "IFCSLAB",
    "IFCTENDON",
    "IFCWALL",
    "IFCWALLSTANDARDCASE",
];

pub struct IfcImporter;

impl IfcImporter {
    /// Import all triangulated geometry from STEP file content.
    pub fn import(content: &str) -> Result<Vec<FragMesh>> {
        if !content.starts_with("ISO-10303-21") {
            return Err(ModelError::ifc("not a STEP physical file"));
        }
        let scanner = RecordScanner::new(content)
            .ok_or_else(|| ModelError::ifc("no DATA section"))?;

        // Single pass: index every record, remember the products.
        let mut records: FxHashMap<u64, Record> = FxHashMap::default();
        let mut products: Vec<Record> = Vec::new();
        for record in scanner {
            if PRODUCT_TYPES.contains(&record.type_name) {
                products.push(record);
            }
            records.insert(record.id, record);
        }
        debug!(
            "scanned {} records, {} products",
            records.len(),
            products.len()
        );

        // faceset id -> owning product
        let mut owners: FxHashMap<u64, Record> = FxHashMap::default();
        for product in &products {
            for faceset in facesets_of(product, &records) {
                owners.insert(faceset, *product);
            }
        }

        // Group faceset geometry under its owner, merging multi-body products.
        let mut meshes: FxHashMap<u64, FragMesh> = FxHashMap::default();
        for (&id, record) in &records {
            if record.type_name != "IFCTRIANGULATEDFACESET" {
                continue;
            }
            let Some((positions, indices)) = faceset_geometry(record, &records) else {
                warn!("#{id}: skipping malformed faceset");
                continue;
            };

            let owner = owners.get(&id).copied();
            let (mesh_id, entity_type, name) = match owner {
                Some(p) => (p.id, p.type_name, attr_string(&split_attrs(p.args), 2)),
                None => (id, record.type_name, None),
            };

            let mesh = meshes.entry(mesh_id).or_insert_with(|| FragMesh {
                id: mesh_id,
                positions: Vec::new(),
                normals: Vec::new(),
                indices: Vec::new(),
                color: default_color(entity_type),
                transform: IDENTITY_TRANSFORM,
                entity_type: entity_type.to_string(),
                name,
            });
            let base = mesh.vertex_count() as u32;
            mesh.positions.extend_from_slice(&positions);
            mesh.indices.extend(indices.iter().map(|&i| i + base));
        }

        if meshes.is_empty() {
            return Err(ModelError::ifc(
                "no triangulated geometry (parametric representations are not supported)",
            ));
        }

        let mut out: Vec<FragMesh> = meshes.into_values().collect();
        out.sort_by_key(|m| m.id);
        Ok(out)
    }
}

/// Faceset ids reachable from a product via its definition shape.
fn facesets_of(product: &Record, records: &FxHashMap<u64, Record>) -> Vec<u64> {
    let mut facesets = Vec::new();
    for shape_id in all_refs(product.args) {
        let Some(shape) = records.get(&shape_id) else {
            continue;
        };
        if shape.type_name != "IFCPRODUCTDEFINITIONSHAPE" {
            continue;
        }
        for rep_id in all_refs(shape.args) {
            let Some(rep) = records.get(&rep_id) else {
                continue;
            };
            if rep.type_name != "IFCSHAPEREPRESENTATION" {
                continue;
            }
            for item_id in all_refs(rep.args) {
                match records.get(&item_id).map(|r| r.type_name) {
                    Some("IFCTRIANGULATEDFACESET") => facesets.push(item_id),
                    Some(other) => debug!("#{item_id}: skipping {other} representation item"),
                    None => {}
                }
            }
        }
    }
    facesets
}

/// Positions and 0-based triangle indices of one faceset, or `None` when
/// the record is inconsistent.
fn faceset_geometry(
    faceset: &Record,
    records: &FxHashMap<u64, Record>,
) -> Option<(Vec<f32>, Vec<u32>)> {
    let attrs = split_attrs(faceset.args);

    let point_list = records.get(&attr_ref(&attrs, 0)?)?;
    if point_list.type_name != "IFCCARTESIANPOINTLIST3D" {
        return None;
    }
    let coords = split_attrs(point_list.args);
    let positions = all_floats(coords.first()?);
    if positions.is_empty() || positions.len() % 3 != 0 {
        return None;
    }

    // CoordIndex is the fourth attribute; values are 1-based
    let raw = all_uints(attrs.get(3)?);
    if raw.is_empty() || raw.len() % 3 != 0 {
        return None;
    }
    let vertex_count = (positions.len() / 3) as u32;
    let mut indices = Vec::with_capacity(raw.len());
    for v in raw {
        if v == 0 || v > vertex_count {
            return None;
        }
        indices.push(v - 1);
    }

    Some((positions, indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_DESCRIPTION((''),'2;1');
FILE_NAME('bridge.ifc','2024-01-01T00:00:00',(''),(''),'','','');
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCBEAM('2O2Fr$t4X7Zf8NOew3FLOH',#9,'Main Girder',$,$,#20,#5,$,.BEAM.);
#3=IFCCARTESIANPOINTLIST3D(((0.,0.,0.),(10.,0.,0.),(0.,2.,0.),(10.,2.,0.)));
#4=IFCTRIANGULATEDFACESET(#3,$,.T.,((1,2,3),(2,4,3)),$);
#5=IFCPRODUCTDEFINITIONSHAPE($,$,(#6));
#6=IFCSHAPEREPRESENTATION(#8,'Body','Tessellation',(#4));
#7=IFCCARTESIANPOINTLIST3D(((0.,0.,5.),(1.,0.,5.),(0.,1.,5.)));
#8=IFCGEOMETRICREPRESENTATIONCONTEXT($,'Model',3,1.E-5,#9,$);
#10=IFCTRIANGULATEDFACESET(#7,$,.T.,((1,2,3)),$);
ENDSEC;
END-ISO-10303-21;
"#;

    #[test]
    fn test_product_owns_faceset() {
        let meshes = IfcImporter::import(TEST_IFC).unwrap();
        let beam = meshes.iter().find(|m| m.id == 1).unwrap();
        assert_eq!(beam.entity_type, "IFCBEAM");
        assert_eq!(beam.name.as_deref(), Some("Main Girder"));
        assert_eq!(beam.vertex_count(), 4);
        assert_eq!(beam.indices, vec![0, 1, 2, 1, 3, 2]);
    }

    #[test]
    fn test_orphan_faceset_keeps_own_id() {
        let meshes = IfcImporter::import(TEST_IFC).unwrap();
        let orphan = meshes.iter().find(|m| m.id == 10).unwrap();
        assert_eq!(orphan.entity_type, "IFCTRIANGULATEDFACESET");
        assert_eq!(orphan.name, None);
        assert_eq!(orphan.triangle_count(), 1);
    }

    #[test]
    fn test_output_sorted_by_id() {
        let meshes = IfcImporter::import(TEST_IFC).unwrap();
        let ids: Vec<_> = meshes.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 10]);
    }

    #[test]
    fn test_rejects_non_step_input() {
        let err = IfcImporter::import("{\"not\":\"ifc\"}").unwrap_err();
        assert!(matches!(err, ModelError::InvalidIfc(_)));
    }

    #[test]
    fn test_rejects_geometry_free_file() {
        let step = "ISO-10303-21;\nHEADER;\nENDSEC;\nDATA;\n#1=IFCWALL('g',$,'W',$,$,$,$,$,$);\nENDSEC;\n";
        let err = IfcImporter::import(step).unwrap_err();
        assert!(matches!(err, ModelError::InvalidIfc(_)));
    }

    #[test]
    fn test_skips_out_of_range_index() {
        let step = "ISO-10303-21;\nDATA;\n#1=IFCCARTESIANPOINTLIST3D(((0.,0.,0.),(1.,0.,0.),(0.,1.,0.)));\n#2=IFCTRIANGULATEDFACESET(#1,$,.T.,((1,2,9)),$);\nENDSEC;\n";
        assert!(IfcImporter::import(step).is_err());
    }
}
