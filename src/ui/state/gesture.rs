// SPDX-License-Identifier: MPL-2.0
//! Gesture state management
//!
//! Converts a pointer-down/move/up sequence into viewport transform
//! updates. A gesture session exists only between pointer-down and
//! pointer-up and owns the last observed pointer position, so each move
//! computes its delta against the immediately preceding position rather
//! than the gesture's start.

use super::tool::Tool;
use super::viewport::ViewportTransform;
use crate::config::{DEFAULT_WINDOW_SENSITIVITY, DEFAULT_ZOOM_SENSITIVITY};
use iced::Point;

/// Tuning constants mapping drag deltas to transform updates.
///
/// The defaults are the values the viewer has always shipped with;
/// `settings.toml` may override them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSensitivity {
    /// Multiplier for windowing drags.
    pub window: f32,
    /// Divisor for zoom drags.
    pub zoom: f32,
}

impl Default for GestureSensitivity {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW_SENSITIVITY,
            zoom: DEFAULT_ZOOM_SENSITIVITY,
        }
    }
}

/// An in-flight drag: the tool captured at pointer-down and the last
/// observed pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GestureSession {
    tool: Tool,
    last: Point,
}

/// Manages the drag gesture lifecycle.
///
/// At most one session exists at a time; a pointer-down while a session
/// is active replaces it, since the prior drag can no longer complete.
#[derive(Debug, Clone, Default)]
pub struct GestureState {
    session: Option<GestureSession>,
}

impl GestureState {
    /// Starts a gesture at the given position with the given tool.
    ///
    /// Returns `false` (and creates no session) when the tool does not
    /// start gestures. The tool is captured here and governs the whole
    /// drag regardless of later toolbar changes.
    pub fn start(&mut self, tool: Tool, position: Point) -> bool {
        if !tool.starts_gestures() {
            return false;
        }
        self.session = Some(GestureSession {
            tool,
            last: position,
        });
        true
    }

    /// Whether a drag is currently in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The tool captured by the active session, if any.
    #[must_use]
    pub fn active_tool(&self) -> Option<Tool> {
        self.session.map(|session| session.tool)
    }

    /// Processes a pointer move, applying the session's tool rule to the
    /// transform.
    ///
    /// Returns `true` when the transform was mutated and a repaint is
    /// needed. Safe to call at arbitrary frequency; each call consumes
    /// its own delta against the session's last-recorded position.
    pub fn update(
        &mut self,
        position: Point,
        transform: &mut ViewportTransform,
        sensitivity: GestureSensitivity,
    ) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let delta_x = position.x - session.last.x;
        let delta_y = position.y - session.last.y;
        session.last = position;

        match session.tool {
            Tool::Window => transform.adjust_window(delta_x, delta_y, sensitivity.window),
            Tool::Pan => transform.pan_by(delta_x, delta_y),
            Tool::Zoom => transform.zoom_by(delta_y, sensitivity.zoom),
            // Unreachable: start() refuses Tool::None
            Tool::None => return false,
        }

        true
    }

    /// Ends the gesture, discarding the session.
    pub fn stop(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn transform() -> ViewportTransform {
        ViewportTransform::with_window(400.0, 40.0)
    }

    #[test]
    fn default_state_is_idle() {
        let state = GestureState::default();
        assert!(!state.is_dragging());
        assert!(state.active_tool().is_none());
    }

    #[test]
    fn none_tool_does_not_start_a_session() {
        let mut state = GestureState::default();
        assert!(!state.start(Tool::None, Point::new(10.0, 10.0)));
        assert!(!state.is_dragging());
    }

    #[test]
    fn update_without_session_mutates_nothing() {
        let mut state = GestureState::default();
        let mut viewport = transform();
        let before = viewport;

        let repaint = state.update(
            Point::new(50.0, 50.0),
            &mut viewport,
            GestureSensitivity::default(),
        );

        assert!(!repaint);
        assert_eq!(viewport, before);
    }

    #[test]
    fn window_drag_applies_doubled_deltas() {
        let mut state = GestureState::default();
        let mut viewport = transform();

        state.start(Tool::Window, Point::new(100.0, 100.0));
        let repaint = state.update(
            Point::new(130.0, 115.0),
            &mut viewport,
            GestureSensitivity::default(),
        );

        assert!(repaint);
        // deltaX=30, deltaY=15 at sensitivity 2 → width += 60, center += 30
        assert_abs_diff_eq!(viewport.window_width.value(), 460.0);
        assert_abs_diff_eq!(viewport.window_center, 70.0);
    }

    #[test]
    fn deltas_are_measured_against_previous_move_not_start() {
        let mut state = GestureState::default();
        let mut viewport = transform();

        state.start(Tool::Window, Point::new(0.0, 0.0));
        state.update(
            Point::new(10.0, 0.0),
            &mut viewport,
            GestureSensitivity::default(),
        );
        state.update(
            Point::new(15.0, 0.0),
            &mut viewport,
            GestureSensitivity::default(),
        );

        // Σdx = 15 at sensitivity 2 → width += 30 (not 10 + 15 against start)
        assert_abs_diff_eq!(viewport.window_width.value(), 430.0);
    }

    #[test]
    fn pan_divides_each_delta_by_current_scale() {
        let mut state = GestureState::default();
        let mut viewport = transform();
        viewport.scale = super::super::viewport::Scale::new(2.0);

        state.start(Tool::Pan, Point::new(0.0, 0.0));
        state.update(
            Point::new(8.0, 4.0),
            &mut viewport,
            GestureSensitivity::default(),
        );

        assert_abs_diff_eq!(viewport.translation.x, 4.0);
        assert_abs_diff_eq!(viewport.translation.y, 2.0);
    }

    #[test]
    fn zoom_drag_clamps_at_minimum() {
        let mut state = GestureState::default();
        let mut viewport = transform();

        state.start(Tool::Zoom, Point::new(0.0, 150.0));
        state.update(
            Point::new(0.0, 0.0),
            &mut viewport,
            GestureSensitivity::default(),
        );

        // Attempted 1.0 - 1.5 = -0.5, clamped instead of going negative
        assert_abs_diff_eq!(viewport.scale.value(), crate::config::MIN_SCALE);
    }

    #[test]
    fn tool_change_does_not_affect_gesture_in_progress() {
        let mut state = GestureState::default();
        let mut viewport = transform();

        state.start(Tool::Window, Point::new(0.0, 0.0));
        // Toolbar switches to Pan mid-drag; the session keeps windowing
        assert_eq!(state.active_tool(), Some(Tool::Window));

        state.update(
            Point::new(10.0, 0.0),
            &mut viewport,
            GestureSensitivity::default(),
        );
        assert_abs_diff_eq!(viewport.window_width.value(), 420.0);
        assert_abs_diff_eq!(viewport.translation.x, 0.0);
    }

    #[test]
    fn stop_ends_the_session_and_later_moves_do_nothing() {
        let mut state = GestureState::default();
        let mut viewport = transform();

        state.start(Tool::Window, Point::new(0.0, 0.0));
        state.stop();

        let repaint = state.update(
            Point::new(100.0, 100.0),
            &mut viewport,
            GestureSensitivity::default(),
        );
        assert!(!repaint);
        assert_abs_diff_eq!(viewport.window_width.value(), 400.0);
    }

    #[test]
    fn new_pointer_down_replaces_active_session() {
        let mut state = GestureState::default();
        let mut viewport = transform();

        state.start(Tool::Window, Point::new(0.0, 0.0));
        // A second pointer-down lands mid-session; the prior session is torn down
        state.start(Tool::Zoom, Point::new(50.0, 50.0));

        assert_eq!(state.active_tool(), Some(Tool::Zoom));
        state.update(
            Point::new(50.0, 60.0),
            &mut viewport,
            GestureSensitivity::default(),
        );
        // Only the zoom rule ran: scale moved, window untouched
        assert_abs_diff_eq!(viewport.scale.value(), 1.1, epsilon = 1e-5);
        assert_abs_diff_eq!(viewport.window_width.value(), 400.0);
    }
}
