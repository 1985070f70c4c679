// SPDX-License-Identifier: MPL-2.0
//! Cross-module flows: gestures driving a display surface, configuration
//! round trips, and persisted state.

use approx::assert_abs_diff_eq;
use dicom_lens::application::port::display::ImageDisplay;
use dicom_lens::config::{self, Config, MIN_SCALE, MIN_WINDOW_WIDTH};
use dicom_lens::ui::state::viewport::{Scale, ViewportTransform};
use dicom_lens::ui::state::{GestureSensitivity, GestureState, Tool};
use dicom_lens::ui::viewer::component::drive_gesture;
use iced::Point;
use tempfile::tempdir;

/// Minimal display adapter recording transform and repaint traffic.
#[derive(Default)]
struct TestDisplay {
    transform: ViewportTransform,
    repaints: u32,
}

impl ImageDisplay for TestDisplay {
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

fn drag(
    display: &mut TestDisplay,
    tool: Tool,
    start: Point,
    moves: &[Point],
    sensitivity: GestureSensitivity,
) {
    let mut gesture = GestureState::default();
    assert!(gesture.start(tool, start));
    for position in moves {
        drive_gesture(display, &mut gesture, *position, sensitivity);
    }
    gesture.stop();
}

#[test]
fn windowing_accumulates_doubled_deltas_across_moves() {
    let mut display = TestDisplay::default();
    display.set_transform(ViewportTransform::with_window(400.0, 40.0));

    // Σdx = 40, Σdy = 25, each delta measured against the previous move
    drag(
        &mut display,
        Tool::Window,
        Point::new(100.0, 100.0),
        &[
            Point::new(110.0, 105.0),
            Point::new(125.0, 115.0),
            Point::new(140.0, 125.0),
        ],
        GestureSensitivity::default(),
    );

    assert_abs_diff_eq!(display.transform.window_width.value(), 400.0 + 2.0 * 40.0);
    assert_abs_diff_eq!(display.transform.window_center, 40.0 + 2.0 * 25.0);
    assert_eq!(display.repaints, 3);
}

#[test]
fn single_move_scenario_matches_expected_deltas() {
    let mut display = TestDisplay::default();
    display.set_transform(ViewportTransform::with_window(400.0, 40.0));

    // Drag from (100,100) to (130,115): deltaX=30, deltaY=15
    drag(
        &mut display,
        Tool::Window,
        Point::new(100.0, 100.0),
        &[Point::new(130.0, 115.0)],
        GestureSensitivity::default(),
    );

    assert_abs_diff_eq!(display.transform.window_width.value(), 460.0);
    assert_abs_diff_eq!(display.transform.window_center, 70.0);
}

#[test]
fn pan_divides_each_delta_by_the_scale_in_effect() {
    let mut display = TestDisplay::default();
    let mut transform = ViewportTransform::default();
    transform.scale = Scale::new(2.0);
    display.set_transform(transform);

    drag(
        &mut display,
        Tool::Pan,
        Point::new(0.0, 0.0),
        &[Point::new(10.0, 6.0), Point::new(30.0, 6.0)],
        GestureSensitivity::default(),
    );

    // (10 + 20) / 2 on x, 6 / 2 on y
    assert_abs_diff_eq!(display.transform.translation.x, 15.0);
    assert_abs_diff_eq!(display.transform.translation.y, 3.0);
}

#[test]
fn pan_speed_tracks_scale_changed_by_an_earlier_zoom_gesture() {
    let mut display = TestDisplay::default();

    // Zoom drag: Σdy = 100 → scale 1.0 + 100/100 = 2.0
    drag(
        &mut display,
        Tool::Zoom,
        Point::new(0.0, 0.0),
        &[Point::new(0.0, 40.0), Point::new(0.0, 100.0)],
        GestureSensitivity::default(),
    );
    assert_abs_diff_eq!(display.transform.scale.value(), 2.0, epsilon = 1e-5);

    // Pan drag afterwards divides by the new scale
    drag(
        &mut display,
        Tool::Pan,
        Point::new(0.0, 0.0),
        &[Point::new(8.0, 0.0)],
        GestureSensitivity::default(),
    );
    assert_abs_diff_eq!(display.transform.translation.x, 4.0, epsilon = 1e-5);
}

#[test]
fn zoom_clamps_at_the_minimum_scale() {
    let mut display = TestDisplay::default();

    // Σdy = -150 → attempted 1.0 - 1.5 = -0.5, clamped to 0.01
    drag(
        &mut display,
        Tool::Zoom,
        Point::new(0.0, 150.0),
        &[Point::new(0.0, 0.0)],
        GestureSensitivity::default(),
    );

    assert_abs_diff_eq!(display.transform.scale.value(), MIN_SCALE);
}

#[test]
fn windowing_clamps_width_at_its_minimum() {
    let mut display = TestDisplay::default();
    display.set_transform(ViewportTransform::with_window(10.0, 0.0));

    drag(
        &mut display,
        Tool::Window,
        Point::new(500.0, 0.0),
        &[Point::new(0.0, 0.0)],
        GestureSensitivity::default(),
    );

    assert_abs_diff_eq!(display.transform.window_width.value(), MIN_WINDOW_WIDTH);
}

#[test]
fn none_tool_starts_no_session_and_mutates_nothing() {
    let mut display = TestDisplay::default();
    let mut gesture = GestureState::default();

    assert!(!gesture.start(Tool::None, Point::new(10.0, 10.0)));
    let changed = drive_gesture(
        &mut display,
        &mut gesture,
        Point::new(200.0, 200.0),
        GestureSensitivity::default(),
    );

    assert!(!changed);
    assert_eq!(display.repaints, 0);
    assert_eq!(display.transform, ViewportTransform::default());
}

#[test]
fn moves_after_pointer_up_mutate_nothing() {
    let mut display = TestDisplay::default();
    let mut gesture = GestureState::default();

    gesture.start(Tool::Window, Point::new(0.0, 0.0));
    drive_gesture(
        &mut display,
        &mut gesture,
        Point::new(10.0, 0.0),
        GestureSensitivity::default(),
    );
    gesture.stop();

    let before = display.transform;
    let changed = drive_gesture(
        &mut display,
        &mut gesture,
        Point::new(300.0, 300.0),
        GestureSensitivity::default(),
    );

    assert!(!changed);
    assert_eq!(display.transform, before);
    assert_eq!(display.repaints, 1);
}

#[test]
fn reset_restores_the_default_fit() {
    let mut display = TestDisplay::default();

    drag(
        &mut display,
        Tool::Window,
        Point::new(0.0, 0.0),
        &[Point::new(50.0, 50.0)],
        GestureSensitivity::default(),
    );
    assert_ne!(display.transform, ViewportTransform::with_window(400.0, 40.0));

    let fitted = display.fit_to_default();
    display.set_transform(fitted);
    display.request_repaint();

    assert_eq!(display.transform, ViewportTransform::with_window(400.0, 40.0));
}

#[test]
fn configured_sensitivities_flow_into_the_rules() {
    let dir = tempdir().expect("create temp dir");
    let config_path = dir.path().join("settings.toml");

    let config = Config {
        window_sensitivity: Some(4.0),
        zoom_sensitivity: Some(50.0),
        history_limit: Some(10),
    };
    config::save_to_path(&config, &config_path).expect("save config");
    let loaded = config::load_from_path(&config_path).expect("load config");

    let sensitivity = GestureSensitivity {
        window: loaded.window_sensitivity_or_default(),
        zoom: loaded.zoom_sensitivity_or_default(),
    };

    let mut display = TestDisplay::default();
    display.set_transform(ViewportTransform::with_window(400.0, 40.0));

    drag(
        &mut display,
        Tool::Window,
        Point::new(0.0, 0.0),
        &[Point::new(10.0, 0.0)],
        sensitivity,
    );
    assert_abs_diff_eq!(display.transform.window_width.value(), 440.0);

    drag(
        &mut display,
        Tool::Zoom,
        Point::new(0.0, 0.0),
        &[Point::new(0.0, 25.0)],
        sensitivity,
    );
    assert_abs_diff_eq!(display.transform.scale.value(), 1.5);
}

#[test]
fn persisted_state_round_trips_through_cbor() {
    use dicom_lens::app::persisted_state::AppState;

    let dir = tempdir().expect("create temp dir");
    let base = dir.path().to_path_buf();

    let mut state = AppState::default();
    state.set_last_open_directory_from_file(std::path::Path::new("/data/scans/ct.dcm"));
    state.sidebar_open = false;

    assert!(state.save_to(Some(base.clone())).is_none());
    let (loaded, warning) = AppState::load_from(Some(base));

    assert!(warning.is_none());
    assert_eq!(loaded, state);
}
