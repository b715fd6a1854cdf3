// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stress colour mapping
//!
//! Pure functions from (force, stiffness) to a display colour and status
//! label. Same input always yields the same output, exact float equality.

use bridgeview_model::{Appearance, Rgb};

/// Deformation treated as fully saturated for colour purposes, in mm.
pub const MAX_DEFORMATION_MM: f32 = 150.0;

/// Colour stop for the safe end of the gradient (`#4caf50`).
pub const SAFE: Rgb = Rgb::from_hex(0x4caf50);
/// Colour stop for the midpoint of the gradient (`#ffeb3b`).
pub const WARN: Rgb = Rgb::from_hex(0xffeb3b);
/// Colour stop for the dangerous end of the gradient (`#f44336`).
pub const DANGER: Rgb = Rgb::from_hex(0xf44336);

/// Toy linear model: deformation = force / stiffness, scaled into mm.
///
/// `stiffness` must be nonzero; the session only ever samples it from
/// `[0.5, 2.0)` so there is no error path here.
pub fn compute_deformation(force: f32, stiffness: f32) -> f32 {
    (force / 10.0) / stiffness
}

/// Normalize a deformation to an intensity in `[0, 1]`.
pub fn normalize_intensity(deformation: f32) -> f32 {
    (deformation / MAX_DEFORMATION_MM).clamp(0.0, 1.0)
}

/// Map an intensity to the three-stop gradient.
///
/// `t < 0.5` interpolates safe→warn, `t >= 0.5` interpolates warn→danger.
/// The emissive channel is the diffuse scaled by `(0.4, 0.2, 0.1) * t`, so
/// the glow grows with intensity and is biased toward red.
pub fn stress_color(t: f32) -> Appearance {
    let diffuse = if t < 0.5 {
        SAFE.lerp(WARN, t * 2.0)
    } else {
        WARN.lerp(DANGER, (t - 0.5) * 2.0)
    };
    let emissive = diffuse.scale(0.4 * t, 0.2 * t, 0.1 * t);
    Appearance::new(diffuse, emissive)
}

/// Severity band for an intensity value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Normal,
    Caution,
    Warning,
    Danger,
}

impl Status {
    /// Panel badge colour for this band.
    pub fn badge_color(self) -> Rgb {
        match self {
            Status::Normal => Rgb::from_hex(0x4caf50),
            Status::Caution => Rgb::from_hex(0xffeb3b),
            Status::Warning => Rgb::from_hex(0xff9800),
            Status::Danger => Rgb::from_hex(0xf44336),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Normal => "Normal",
            Status::Caution => "Caution",
            Status::Warning => "Warning",
            Status::Danger => "Danger",
        }
    }
}

/// Band an intensity. Boundary values belong to the lower-severity band:
/// the comparisons are strict, so 0.4 is still `Normal` and 0.9 `Warning`.
pub fn status_label(t: f32) -> Status {
    if t > 0.9 {
        Status::Danger
    } else if t > 0.7 {
        Status::Warning
    } else if t > 0.4 {
        Status::Caution
    } else {
        Status::Normal
    }
}

/// Everything the detail panel shows for one simulated component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeformationSample {
    /// Raw deformation in mm.
    pub deformation: f32,
    /// Deformation normalized to `[0, 1]`.
    pub intensity: f32,
    pub status: Status,
}

impl DeformationSample {
    /// Evaluate the full pipeline for one component.
    pub fn evaluate(force: f32, stiffness: f32) -> Self {
        let deformation = compute_deformation(force, stiffness);
        let intensity = normalize_intensity(deformation);
        Self {
            deformation,
            intensity,
            status: status_label(intensity),
        }
    }

    /// Colour this sample maps to.
    pub fn appearance(&self) -> Appearance {
        stress_color(self.intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deformation_linear_in_force() {
        for stiffness in [0.5, 1.0, 1.7] {
            for force in [0.0, 120.0, 2750.0] {
                assert_eq!(
                    compute_deformation(2.0 * force, stiffness),
                    2.0 * compute_deformation(force, stiffness)
                );
            }
        }
    }

    #[test]
    fn test_normalize_intensity_monotone_and_bounded() {
        let mut last = 0.0;
        for step in 0..=400 {
            let deformation = step as f32;
            let t = normalize_intensity(deformation);
            assert!((0.0..=1.0).contains(&t));
            assert!(t >= last);
            last = t;
        }
        // Saturates exactly at the cap
        assert_eq!(normalize_intensity(MAX_DEFORMATION_MM), 1.0);
        assert_eq!(normalize_intensity(MAX_DEFORMATION_MM * 10.0), 1.0);
    }

    #[test]
    fn test_stress_color_stops_exact() {
        assert_eq!(stress_color(0.0).diffuse, Rgb::from_hex(0x4caf50));
        assert_eq!(stress_color(0.5).diffuse, Rgb::from_hex(0xffeb3b));
        assert_eq!(stress_color(1.0).diffuse, Rgb::from_hex(0xf44336));
    }

    #[test]
    fn test_stress_color_zero_has_no_glow() {
        assert_eq!(stress_color(0.0).emissive, Rgb::BLACK);
    }

    #[test]
    fn test_stress_color_emissive_bias() {
        let full = stress_color(1.0);
        assert_eq!(full.emissive.r, full.diffuse.r * 0.4);
        assert_eq!(full.emissive.g, full.diffuse.g * 0.2);
        assert_eq!(full.emissive.b, full.diffuse.b * 0.1);
    }

    #[test]
    fn test_status_label_boundaries() {
        assert_eq!(status_label(0.4), Status::Normal);
        assert_eq!(status_label(0.40001), Status::Caution);
        assert_eq!(status_label(0.7), Status::Caution);
        assert_eq!(status_label(0.9), Status::Warning);
        assert_eq!(status_label(0.90001), Status::Danger);
        assert_eq!(status_label(1.0), Status::Danger);
    }

    #[test]
    fn test_sample_pipeline() {
        // force 1500, stiffness 1.0 -> 150mm -> saturated red
        let sample = DeformationSample::evaluate(1500.0, 1.0);
        assert_eq!(sample.deformation, 150.0);
        assert_eq!(sample.intensity, 1.0);
        assert_eq!(sample.status, Status::Danger);
        assert_eq!(sample.appearance().diffuse, Rgb::from_hex(0xf44336));
    }
}
