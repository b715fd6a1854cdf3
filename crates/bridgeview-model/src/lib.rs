// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BridgeView Model - shared types for the viewer, simulation overlay and
//! conversion tools
//!
//! Everything that crosses a crate boundary lives here: colour/appearance
//! types, per-component metadata and the common error enum. The crate has no
//! renderer dependency so the simulation core and the codecs stay testable in
//! isolation.

pub mod error;
pub mod types;

// Re-export all public types
pub use error::*;
pub use types::*;
