// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Default colours by entity type
//!
//! Used when the source model carries no surface style, which is the norm
//! for tessellated bridge exports.

/// RGBA colour for an IFC entity type.
pub fn default_color(entity_type: &str) -> [f32; 4] {
    match entity_type {
        "IFCBEAM" | "IFCMEMBER" => [0.75, 0.65, 0.55, 1.0],
        "IFCCOLUMN" | "IFCPILE" => [0.60, 0.60, 0.65, 1.0],
        "IFCSLAB" | "IFCFOOTING" => [0.70, 0.70, 0.70, 1.0],
        "IFCWALL" | "IFCWALLSTANDARDCASE" => [0.85, 0.82, 0.75, 1.0],
        "IFCPLATE" => [0.55, 0.60, 0.70, 1.0],
        "IFCRAILING" => [0.45, 0.45, 0.50, 1.0],
        "IFCBEARING" | "IFCTENDON" => [0.50, 0.40, 0.35, 1.0],
        "IFCBUILDINGELEMENTPROXY" => [0.65, 0.68, 0.72, 1.0],
        _ => [0.78, 0.78, 0.78, 1.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_fallback() {
        assert_ne!(default_color("IFCBEAM"), default_color("IFCRAILING"));
        assert_eq!(default_color("IFCCHIMNEY"), [0.78, 0.78, 0.78, 1.0]);
    }
}
