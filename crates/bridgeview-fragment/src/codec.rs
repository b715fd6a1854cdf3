// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fragment archive encoder/decoder

use crate::mesh::FragMesh;
use crate::{FRAGMENT_MAGIC, FRAGMENT_VERSION};
use bridgeview_model::{ModelError, Result};

/// Serialize meshes into a fragment buffer.
pub fn encode(meshes: &[FragMesh]) -> Vec<u8> {
    // Header + a rough 64 bytes of fixed overhead per mesh
    let payload: usize = meshes
        .iter()
        .map(|m| (m.positions.len() + m.normals.len()) * 4 + m.indices.len() * 4 + 64)
        .sum();
    let mut out = Vec::with_capacity(12 + payload);

    out.extend_from_slice(&FRAGMENT_MAGIC.to_le_bytes());
    out.extend_from_slice(&FRAGMENT_VERSION.to_le_bytes());
    out.extend_from_slice(&(meshes.len() as u32).to_le_bytes());

    for mesh in meshes {
        out.extend_from_slice(&mesh.id.to_le_bytes());
        write_f32s(&mut out, &mesh.positions);
        write_f32s(&mut out, &mesh.normals);

        out.extend_from_slice(&(mesh.indices.len() as u32).to_le_bytes());
        for idx in &mesh.indices {
            out.extend_from_slice(&idx.to_le_bytes());
        }

        for c in &mesh.color {
            out.extend_from_slice(&c.to_le_bytes());
        }
        for t in &mesh.transform {
            out.extend_from_slice(&t.to_le_bytes());
        }

        write_str(&mut out, &mesh.entity_type);
        write_str(&mut out, mesh.name.as_deref().unwrap_or(""));
    }

    out
}

/// Deserialize a fragment buffer.
pub fn decode(data: &[u8]) -> Result<Vec<FragMesh>> {
    let mut r = Reader::new(data);

    let magic = r.u32()?;
    if magic != FRAGMENT_MAGIC {
        return Err(ModelError::fragment(format!("bad magic {magic:#010x}")));
    }
    let version = r.u32()?;
    if version != FRAGMENT_VERSION {
        return Err(ModelError::UnsupportedVersion(version));
    }

    let mesh_count = r.u32()? as usize;
    let mut meshes = Vec::with_capacity(mesh_count.min(1 << 16));

    for _ in 0..mesh_count {
        let id = r.u64()?;
        let positions = r.f32s()?;
        let normals = r.f32s()?;

        let index_count = r.u32()? as usize;
        let mut indices = Vec::with_capacity(index_count.min(1 << 20));
        for _ in 0..index_count {
            indices.push(r.u32()?);
        }

        let mut color = [0.0f32; 4];
        for c in &mut color {
            *c = r.f32()?;
        }
        let mut transform = [0.0f32; 16];
        for t in &mut transform {
            *t = r.f32()?;
        }

        let entity_type = r.str()?;
        let name = r.str()?;

        meshes.push(FragMesh {
            id,
            positions,
            normals,
            indices,
            color,
            transform,
            entity_type,
            name: if name.is_empty() { None } else { Some(name) },
        });
    }

    Ok(meshes)
}

fn write_f32s(out: &mut Vec<u8>, values: &[f32]) {
    out.extend_from_slice(&(values.len() as u32).to_le_bytes());
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

fn write_str(out: &mut Vec<u8>, s: &str) {
    // The prefix is u16; clip over-long fields at a char boundary so the
    // written bytes always match it and stay valid utf-8.
    let mut len = s.len().min(u16::MAX as usize);
    while !s.is_char_boundary(len) {
        len -= 1;
    }
    out.extend_from_slice(&(len as u16).to_le_bytes());
    out.extend_from_slice(&s.as_bytes()[..len]);
}

/// Bounds-checked little-endian cursor over the input buffer.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| {
                ModelError::fragment(format!("truncated at offset {}", self.pos))
            })?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.bytes(2)?.try_into().unwrap()))
    }

    fn u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.bytes(4)?.try_into().unwrap()))
    }

    fn u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.bytes(8)?.try_into().unwrap()))
    }

    fn f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.bytes(4)?.try_into().unwrap()))
    }

    fn f32s(&mut self) -> Result<Vec<f32>> {
        let count = self.u32()? as usize;
        let mut values = Vec::with_capacity(count.min(1 << 20));
        for _ in 0..count {
            values.push(self.f32()?);
        }
        Ok(values)
    }

    fn str(&mut self) -> Result<String> {
        let len = self.u16()? as usize;
        let bytes = self.bytes(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| ModelError::fragment("non-utf8 string field"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::IDENTITY_TRANSFORM;

    fn sample_mesh(id: u64, name: Option<&str>) -> FragMesh {
        FragMesh {
            id,
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            indices: vec![0, 1, 2],
            color: [0.9, 0.8, 0.7, 1.0],
            transform: IDENTITY_TRANSFORM,
            entity_type: "IFCBEAM".to_string(),
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_roundtrip() {
        let meshes = vec![sample_mesh(12, Some("Girder G-1")), sample_mesh(34, None)];
        let decoded = decode(&encode(&meshes)).unwrap();
        assert_eq!(decoded, meshes);
    }

    #[test]
    fn test_empty_archive() {
        let decoded = decode(&encode(&[])).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut data = encode(&[sample_mesh(1, None)]);
        data[0] ^= 0xff;
        let err = decode(&data).unwrap_err();
        assert!(matches!(err, ModelError::InvalidFragment(_)));
    }

    #[test]
    fn test_rejects_future_version() {
        let mut data = encode(&[]);
        data[4..8].copy_from_slice(&99u32.to_le_bytes());
        let err = decode(&data).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedVersion(99)));
    }

    #[test]
    fn test_clips_overlong_string_fields() {
        let mut mesh = sample_mesh(1, None);
        // 80000 bytes of 2-byte chars; the length prefix caps at 65535,
        // so the clip has to back off to the 65534 char boundary.
        mesh.name = Some("é".repeat(40_000));

        let decoded = decode(&encode(&[mesh])).unwrap();
        let name = decoded[0].name.as_deref().unwrap();
        assert_eq!(name.len(), u16::MAX as usize - 1);
        assert!(name.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_rejects_truncated_buffer() {
        let data = encode(&[sample_mesh(1, Some("x"))]);
        let err = decode(&data[..data.len() - 5]).unwrap_err();
        assert!(matches!(err, ModelError::InvalidFragment(_)));
    }
}
