// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types shared by the import and codec crates

use thiserror::Error;

/// Result type alias for model loading operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while importing or decoding model data
#[derive(Error, Debug)]
pub enum ModelError {
    /// Input is not in the expected container format
    #[error("Invalid fragment data: {0}")]
    InvalidFragment(String),

    /// Fragment container version this build cannot read
    #[error("Unsupported fragment version: {0}")]
    UnsupportedVersion(u32),

    /// Input is not a parseable IFC (STEP) file
    #[error("Invalid IFC format: {0}")]
    InvalidIfc(String),

    /// A referenced STEP instance is missing from the file
    #[error("Entity #{0} not found")]
    EntityNotFound(u64),

    /// Malformed attribute inside an otherwise valid record
    #[error("Failed to parse entity #{0}: {1}")]
    EntityParse(u64, String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModelError {
    /// Create a new fragment format error
    pub fn fragment(msg: impl Into<String>) -> Self {
        ModelError::InvalidFragment(msg.into())
    }

    /// Create a new IFC format error
    pub fn ifc(msg: impl Into<String>) -> Self {
        ModelError::InvalidIfc(msg.into())
    }

    /// Create a new entity parse error
    pub fn entity_parse(id: u64, msg: impl Into<String>) -> Self {
        ModelError::EntityParse(id, msg.into())
    }
}
