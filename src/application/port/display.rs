// SPDX-License-Identifier: MPL-2.0
//! Image display adapter port definition.
//!
//! The display adapter owns the viewport transform of the currently shown
//! scan and is responsible for repainting when it changes. The viewer core
//! never decodes pixels or touches a rendering surface directly; it reads
//! and writes the transform through this boundary.
//!
//! # Design Notes
//!
//! - All operations are synchronous; they run on the UI thread inside
//!   gesture handling and must not block
//! - None of the operations can fail: degenerate transform values are
//!   clamped by [`ViewportTransform`]'s own newtypes before they get here

use crate::ui::state::viewport::ViewportTransform;

/// Port for the surface displaying the current scan.
///
/// Implemented by the DICOM-backed surface in the infrastructure layer;
/// tests substitute lightweight mocks.
pub trait ImageDisplay {
    /// Returns the current viewport transform.
    fn transform(&self) -> ViewportTransform;

    /// Replaces the viewport transform.
    ///
    /// Does not repaint by itself; callers follow up with
    /// [`request_repaint`](Self::request_repaint) once per batch of changes.
    fn set_transform(&mut self, transform: ViewportTransform);

    /// Schedules a repaint with the current transform.
    fn request_repaint(&mut self);

    /// Computes the default fit-to-window transform for the loaded image:
    /// the scan's own VOI window (or the fallback) at a scale that fits the
    /// last-known viewport bounds, with no pan.
    fn fit_to_default(&self) -> ViewportTransform;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::state::viewport::{Scale, WindowWidth};

    #[derive(Default)]
    struct MockDisplay {
        transform: ViewportTransform,
        repaints: u32,
    }

    impl ImageDisplay for MockDisplay {
        fn transform(&self) -> ViewportTransform {
            self.transform
        }

        fn set_transform(&mut self, transform: ViewportTransform) {
            self.transform = transform;
        }

        fn request_repaint(&mut self) {
            self.repaints += 1;
        }

        fn fit_to_default(&self) -> ViewportTransform {
            ViewportTransform::with_window(400.0, 40.0)
        }
    }

    #[test]
    fn set_transform_round_trips() {
        let mut display = MockDisplay::default();
        let mut transform = ViewportTransform::default();
        transform.window_width = WindowWidth::new(200.0);
        transform.scale = Scale::new(2.0);

        display.set_transform(transform);
        assert_eq!(display.transform(), transform);
    }

    #[test]
    fn repaint_is_counted_separately_from_transform_changes() {
        let mut display = MockDisplay::default();
        display.set_transform(ViewportTransform::default());
        assert_eq!(display.repaints, 0);

        display.request_repaint();
        assert_eq!(display.repaints, 1);
    }

    // Trait must stay object-safe: the viewer manipulates `&mut dyn ImageDisplay`
    fn _assert_object_safe(_: &dyn ImageDisplay) {}
}
