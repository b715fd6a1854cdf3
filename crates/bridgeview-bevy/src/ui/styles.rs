// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! UI styling constants

use bevy::prelude::*;

/// Colour palette for the UI chrome.
pub struct UiColors;

impl UiColors {
    pub const PANEL_BG: Color = Color::srgba(0.14, 0.15, 0.17, 0.95);
    pub const TOOLBAR_BG: Color = Color::srgba(0.11, 0.12, 0.14, 0.98);
    pub const BUTTON_BG: Color = Color::srgba(0.24, 0.25, 0.27, 1.0);
    pub const BUTTON_HOVER: Color = Color::srgba(0.33, 0.34, 0.37, 1.0);
    pub const BUTTON_ACTIVE: Color = Color::srgba(0.2, 0.5, 0.8, 1.0);

    pub const TEXT_PRIMARY: Color = Color::srgba(0.9, 0.9, 0.9, 1.0);
    pub const TEXT_SECONDARY: Color = Color::srgba(0.6, 0.6, 0.6, 1.0);
    pub const TEXT_ACCENT: Color = Color::srgba(0.4, 0.7, 1.0, 1.0);

    pub const BORDER: Color = Color::srgba(0.3, 0.3, 0.3, 1.0);
    pub const SELECTED: Color = Color::srgba(0.2, 0.5, 0.8, 0.3);
    pub const HOVER: Color = Color::srgba(0.4, 0.4, 0.4, 0.3);

    pub const SLIDER_TRACK: Color = Color::srgba(0.22, 0.23, 0.25, 1.0);
    pub const SLIDER_FILL: Color = Color::srgba(0.25, 0.55, 0.85, 1.0);
}

/// Common sizes.
pub struct UiSizes;

impl UiSizes {
    pub const TOOLBAR_HEIGHT: f32 = 44.0;
    pub const STATUS_HEIGHT: f32 = 24.0;
    pub const PANEL_WIDTH: f32 = 280.0;
    pub const BUTTON_SIZE: f32 = 32.0;
    pub const PADDING: f32 = 8.0;
    pub const PADDING_SM: f32 = 4.0;
    pub const BORDER_RADIUS: f32 = 4.0;
    pub const FONT_SIZE: f32 = 14.0;
    pub const FONT_SIZE_SM: f32 = 12.0;
    pub const FONT_SIZE_LG: f32 = 16.0;
    pub const FORCE_PANEL_WIDTH: f32 = 280.0;
}
