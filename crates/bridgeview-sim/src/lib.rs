// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BridgeView Sim - cosmetic force simulation overlay
//!
//! Maps a user-adjustable global force and per-component random stiffness to
//! a green→yellow→red stress colour and a status label, and tracks which
//! simulated component is currently selected for detail display.
//!
//! The crate is presentation-agnostic: it never touches the renderer. The
//! hosting viewer feeds it a pool of `(component id, appearance snapshot)`
//! pairs and applies the appearances the session hands back. The numbers have
//! no engineering meaning; this is a display gimmick, documented as such.

pub mod session;
pub mod stress;

pub use session::{SimulationEntry, SimulationSession};
pub use stress::{
    compute_deformation, normalize_intensity, status_label, stress_color, DeformationSample,
    Status, MAX_DEFORMATION_MM,
};

/// Slider bounds for the global force, in kN.
pub const FORCE_MIN: f32 = 0.0;
pub const FORCE_MAX: f32 = 3000.0;

/// Force value a fresh session starts with and `reset` returns to.
pub const FORCE_DEFAULT: f32 = 500.0;

/// Upper cap on how many components a model contributes to the target pool.
pub const MAX_TARGET_POOL: usize = 30;
