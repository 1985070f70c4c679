// SPDX-License-Identifier: MPL-2.0
//! Design tokens for the viewer UI.
//!
//! Centralizes colors, spacing, sizing, and typography so panels and
//! overlays stay visually consistent. The palette follows the dark
//! slate/blue scheme of the viewer's clinical look.

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Slate scale (dark UI chrome)
    pub const SLATE_950: Color = Color::from_rgb(0.059, 0.090, 0.165);
    pub const SLATE_900: Color = Color::from_rgb(0.118, 0.161, 0.231);
    pub const SLATE_700: Color = Color::from_rgb(0.200, 0.255, 0.333);
    pub const SLATE_500: Color = Color::from_rgb(0.392, 0.455, 0.545);
    pub const SLATE_300: Color = Color::from_rgb(0.796, 0.835, 0.882);
    pub const SLATE_200: Color = Color::from_rgb(0.886, 0.910, 0.941);

    // Accent (blue scale)
    pub const BLUE_500: Color = Color::from_rgb(0.231, 0.510, 0.965);
    pub const BLUE_400: Color = Color::from_rgb(0.376, 0.647, 0.980);

    // Severity colors
    pub const SUCCESS_500: Color = Color::from_rgb(0.133, 0.773, 0.369);
    pub const INFO_500: Color = BLUE_500;
    pub const WARNING_500: Color = Color::from_rgb(0.961, 0.620, 0.043);
    pub const ERROR_500: Color = Color::from_rgb(0.937, 0.267, 0.267);

    // Viewer canvas background (near-black, like a lightbox)
    pub const CANVAS: Color = Color::from_rgb(0.039, 0.039, 0.039);
}

// ============================================================================
// Opacity
// ============================================================================

pub mod opacity {
    pub const OVERLAY_SUBTLE: f32 = 0.1;
    pub const OVERLAY_MEDIUM: f32 = 0.2;
    pub const OVERLAY_STRONG: f32 = 0.85;
}

// ============================================================================
// Spacing (8px-ish grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
}

// ============================================================================
// Sizing
// ============================================================================

pub mod sizing {
    /// Fixed width of toast cards.
    pub const TOAST_WIDTH: f32 = 320.0;
    /// Fixed width of the sidebar.
    pub const SIDEBAR_WIDTH: f32 = 300.0;
}

// ============================================================================
// Typography
// ============================================================================

pub mod typography {
    pub const CAPTION: f32 = 11.0;
    pub const BODY: f32 = 14.0;
    pub const TITLE_SM: f32 = 16.0;
    pub const TITLE: f32 = 20.0;
}

// ============================================================================
// Border
// ============================================================================

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    pub const WIDTH_MD: f32 = 1.5;
}

// ============================================================================
// Radius
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
}

// ============================================================================
// Shadow
// ============================================================================

pub mod shadow {
    use iced::{Color, Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: Color::TRANSPARENT,
        offset: Vector::new(0.0, 0.0),
        blur_radius: 0.0,
    };

    pub const MD: Shadow = Shadow {
        color: Color::from_rgba(0.0, 0.0, 0.0, 0.4),
        offset: Vector::new(0.0, 2.0),
        blur_radius: 8.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_monotonic() {
        assert!(spacing::XXS < spacing::XS);
        assert!(spacing::XS < spacing::SM);
        assert!(spacing::SM < spacing::MD);
        assert!(spacing::MD < spacing::LG);
    }

    #[test]
    fn severity_colors_are_distinct() {
        assert_ne!(palette::SUCCESS_500, palette::WARNING_500);
        assert_ne!(palette::WARNING_500, palette::ERROR_500);
        assert_ne!(palette::INFO_500, palette::ERROR_500);
    }
}
