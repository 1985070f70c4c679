// SPDX-License-Identifier: MPL-2.0
//! Viewport transform state
//!
//! Holds the display parameters of the currently shown scan: VOI window
//! (width/center), zoom scale, and pan translation. Values that must stay
//! strictly positive are wrapped in clamping newtypes so degenerate
//! transforms cannot be constructed.

// Re-export clamp bounds from centralized config
pub use crate::config::{
    FALLBACK_WINDOW_CENTER, FALLBACK_WINDOW_WIDTH, MIN_SCALE, MIN_WINDOW_WIDTH,
};

/// VOI window width, guaranteed to be at least [`MIN_WINDOW_WIDTH`].
///
/// This type ensures that window widths are always valid, eliminating
/// the need for manual clamping at usage sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowWidth(f32);

impl WindowWidth {
    /// Creates a new window width, clamping the value to the valid range.
    #[must_use]
    pub fn new(width: f32) -> Self {
        Self(width.max(MIN_WINDOW_WIDTH))
    }

    /// Returns the raw width value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Widens or narrows the window by the given delta, staying clamped.
    #[must_use]
    pub fn widen(self, delta: f32) -> Self {
        Self::new(self.0 + delta)
    }

    /// Returns whether the width sits at the minimum bound.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_WINDOW_WIDTH
    }
}

impl Default for WindowWidth {
    fn default() -> Self {
        Self(FALLBACK_WINDOW_WIDTH)
    }
}

/// Zoom scale, guaranteed to be at least [`MIN_SCALE`].
///
/// Pan deltas are divided by the scale, so a zero or negative scale would
/// poison every subsequent pan computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(f32);

impl Scale {
    /// Creates a new scale, clamping the value to the valid range.
    #[must_use]
    pub fn new(scale: f32) -> Self {
        Self(scale.max(MIN_SCALE))
    }

    /// Returns the raw scale value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Adjusts the scale by the given delta, staying clamped.
    #[must_use]
    pub fn zoom_by(self, delta: f32) -> Self {
        Self::new(self.0 + delta)
    }

    /// Returns whether the scale sits at the minimum bound.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_SCALE
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Pan offset in image-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translation {
    pub x: f32,
    pub y: f32,
}

/// Display parameters for the currently shown scan.
///
/// Owned by the active display surface; replaced wholesale on load and
/// reset, mutated incrementally during gestures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    /// VOI window width (contrast range).
    pub window_width: WindowWidth,
    /// VOI window center (brightness midpoint).
    pub window_center: f32,
    /// Zoom scale (1.0 = one image pixel per screen pixel).
    pub scale: Scale,
    /// Pan offset.
    pub translation: Translation,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            window_width: WindowWidth::default(),
            window_center: FALLBACK_WINDOW_CENTER,
            scale: Scale::default(),
            translation: Translation::default(),
        }
    }
}

impl ViewportTransform {
    /// Creates a transform with the given VOI window at identity zoom/pan.
    #[must_use]
    pub fn with_window(width: f32, center: f32) -> Self {
        Self {
            window_width: WindowWidth::new(width),
            window_center: center,
            ..Self::default()
        }
    }

    /// Applies a windowing drag delta scaled by the configured sensitivity.
    pub fn adjust_window(&mut self, delta_x: f32, delta_y: f32, sensitivity: f32) {
        self.window_width = self.window_width.widen(delta_x * sensitivity);
        self.window_center += delta_y * sensitivity;
    }

    /// Applies a pan drag delta, compensated by the current scale so the
    /// perceived drag speed is constant regardless of zoom level.
    pub fn pan_by(&mut self, delta_x: f32, delta_y: f32) {
        let scale = self.scale.value();
        self.translation.x += delta_x / scale;
        self.translation.y += delta_y / scale;
    }

    /// Applies a zoom drag delta divided by the configured sensitivity.
    pub fn zoom_by(&mut self, delta_y: f32, sensitivity: f32) {
        self.scale = self.scale.zoom_by(delta_y / sensitivity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn window_width_clamps_to_minimum() {
        let width = WindowWidth::new(-10.0);
        assert_abs_diff_eq!(width.value(), MIN_WINDOW_WIDTH);
        assert!(width.is_min());
    }

    #[test]
    fn scale_clamps_to_minimum() {
        let scale = Scale::new(0.0);
        assert_abs_diff_eq!(scale.value(), MIN_SCALE);
        assert!(scale.is_min());
    }

    #[test]
    fn default_transform_uses_fallback_window() {
        let transform = ViewportTransform::default();
        assert_abs_diff_eq!(transform.window_width.value(), FALLBACK_WINDOW_WIDTH);
        assert_abs_diff_eq!(transform.window_center, FALLBACK_WINDOW_CENTER);
        assert_abs_diff_eq!(transform.scale.value(), 1.0);
    }

    #[test]
    fn adjust_window_scales_deltas_by_sensitivity() {
        let mut transform = ViewportTransform::with_window(400.0, 40.0);
        transform.adjust_window(30.0, 15.0, 2.0);

        assert_abs_diff_eq!(transform.window_width.value(), 460.0);
        assert_abs_diff_eq!(transform.window_center, 70.0);
    }

    #[test]
    fn adjust_window_never_goes_degenerate() {
        let mut transform = ViewportTransform::with_window(10.0, 0.0);
        transform.adjust_window(-500.0, 0.0, 2.0);

        assert_abs_diff_eq!(transform.window_width.value(), MIN_WINDOW_WIDTH);
    }

    #[test]
    fn pan_is_scale_compensated() {
        let mut transform = ViewportTransform::default();
        transform.scale = Scale::new(2.0);
        transform.pan_by(10.0, -4.0);

        assert_abs_diff_eq!(transform.translation.x, 5.0);
        assert_abs_diff_eq!(transform.translation.y, -2.0);
    }

    #[test]
    fn zoom_clamps_at_minimum_scale() {
        let mut transform = ViewportTransform::default();
        // Attempted 1.0 - 1.5 = -0.5, clamped to the minimum positive bound
        transform.zoom_by(-150.0, 100.0);

        assert_abs_diff_eq!(transform.scale.value(), MIN_SCALE);
    }

    #[test]
    fn zoom_accumulates_divided_deltas() {
        let mut transform = ViewportTransform::default();
        transform.zoom_by(50.0, 100.0);
        transform.zoom_by(25.0, 100.0);

        assert_abs_diff_eq!(transform.scale.value(), 1.75);
    }
}
