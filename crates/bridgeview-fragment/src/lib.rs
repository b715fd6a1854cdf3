// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BridgeView Fragment - compact binary geometry container
//!
//! A `.frag` file is a little-endian archive of triangulated component
//! meshes, written once as a single buffer so an interrupted conversion can
//! leave no file or a previous file, never a corrupt one. Layout:
//!
//! ```text
//! u32 magic "BVFR"   u32 version   u32 mesh count
//! per mesh:
//!   u64 component id
//!   u32 n, n * f32   positions (x y z interleaved)
//!   u32 n, n * f32   normals (may be empty)
//!   u32 n, n * u32   triangle indices
//!   4  * f32         base colour rgba
//!   16 * f32         transform, column major
//!   u16 n, n bytes   entity type (utf-8)
//!   u16 n, n bytes   name (0 = unnamed)
//! ```

pub mod codec;
pub mod mesh;

pub use codec::{decode, encode};
pub use mesh::{FragMesh, IDENTITY_TRANSFORM};

/// File magic, "BVFR" in ASCII.
pub const FRAGMENT_MAGIC: u32 = 0x42564652;

/// Container version this build reads and writes.
pub const FRAGMENT_VERSION: u32 = 1;

/// Canonical file extension.
pub const FRAGMENT_EXTENSION: &str = "frag";
