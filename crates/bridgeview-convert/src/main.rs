// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ifc2frag - convert an IFC model to the viewer's .frag container
//!
//! Usage: ifc2frag [input.ifc]
//!
//! Without an argument it converts `model.ifc` in the current directory.
//! The output lands next to the input with the extension swapped to `.frag`.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use bridgeview_fragment::{encode, FRAGMENT_EXTENSION};
use bridgeview_ifc::IfcImporter;

const DEFAULT_INPUT: &str = "model.ifc";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let input = PathBuf::from(env::args().nth(1).unwrap_or_else(|| DEFAULT_INPUT.to_string()));
    let output = input.with_extension(FRAGMENT_EXTENSION);

    println!("Reading {}", input.display());
    let content = fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    println!("  {:.1} MB", content.len() as f64 / 1_048_576.0);

    println!("Converting...");
    let start = Instant::now();
    let meshes = IfcImporter::import(&content)
        .with_context(|| format!("failed to import {}", input.display()))?;
    let triangles: usize = meshes.iter().map(|m| m.triangle_count()).sum();
    println!(
        "  {} components, {} triangles in {:.2}s",
        meshes.len(),
        triangles,
        start.elapsed().as_secs_f64()
    );

    let data = encode(&meshes);
    fs::write(&output, &data)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "Wrote {} ({:.1} MB)",
        output.display(),
        data.len() as f64 / 1_048_576.0
    );

    Ok(())
}
