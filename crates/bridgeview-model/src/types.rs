// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Colour, appearance and component metadata types

use serde::{Deserialize, Serialize};

/// Stable identifier of a renderable component within a loaded model.
///
/// For IFC-sourced models this is the STEP instance id of the owning
/// product; for raw fragment files it is whatever id the writer assigned.
pub type ComponentId = u64;

/// Linear RGB colour with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value, components divided by 255.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Linear interpolation towards `other` by factor `t`.
    ///
    /// Uses the `(1 - t) * a + t * b` form, which hits both endpoints
    /// exactly; the `a + (b - a) * t` form does not at `t = 1` in f32.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let u = 1.0 - t;
        Rgb {
            r: self.r * u + other.r * t,
            g: self.g * u + other.g * t,
            b: self.b * u + other.b * t,
        }
    }

    /// Component-wise product.
    pub fn scale(self, r: f32, g: f32, b: f32) -> Rgb {
        Rgb {
            r: self.r * r,
            g: self.g * g,
            b: self.b * b,
        }
    }
}

/// Visual appearance of a component: what the simulation overlay snapshots
/// before recolouring and restores afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub diffuse: Rgb,
    pub emissive: Rgb,
}

impl Appearance {
    pub const fn new(diffuse: Rgb, emissive: Rgb) -> Self {
        Self { diffuse, emissive }
    }

    /// Plain diffuse colour with no glow.
    pub const fn flat(diffuse: Rgb) -> Self {
        Self {
            diffuse,
            emissive: Rgb::BLACK,
        }
    }
}

/// Metadata for one component, shown in list and properties panels.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComponentInfo {
    pub id: ComponentId,
    /// IFC entity type (e.g. "IFCWALL"); "UNKNOWN" for untyped fragments.
    pub entity_type: String,
    pub name: Option<String>,
}

impl ComponentInfo {
    /// Name to display in panels, falling back to a numbered label.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("Component #{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Rgb::from_hex(0x4caf50);
        assert_eq!(c.r, 0x4c as f32 / 255.0);
        assert_eq!(c.g, 0xaf as f32 / 255.0);
        assert_eq!(c.b, 0x50 as f32 / 255.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgb::new(0.0, 0.5, 1.0);
        let b = Rgb::new(1.0, 0.0, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_lerp_endpoint_exact_for_hex_components() {
        // Components like 0xeb/255 are not representable exactly, which
        // made the a + (b - a) * t form land next to, not on, the endpoint.
        let warn = Rgb::from_hex(0xffeb3b);
        let danger = Rgb::from_hex(0xf44336);
        assert_eq!(warn.lerp(danger, 1.0), danger);
        assert_eq!(warn.lerp(danger, 0.0), warn);
    }

    #[test]
    fn test_display_name_fallback() {
        let info = ComponentInfo {
            id: 42,
            entity_type: "IFCBEAM".to_string(),
            name: None,
        };
        assert_eq!(info.display_name(), "Component #42");

        let named = ComponentInfo {
            name: Some("Girder G-1".to_string()),
            ..info
        };
        assert_eq!(named.display_name(), "Girder G-1");
    }
}
