// SPDX-License-Identifier: MPL-2.0
//! Viewer component encapsulating state and update logic.
//!
//! Owns the scan surface, active tool, and the gesture session. Pointer
//! events arrive two ways: presses/releases over the pane come from the
//! pane's mouse area, while moves (and releases outside the pane) come in
//! as raw window-level events, so a drag that leaves the pane still
//! tracks and still terminates.

use crate::application::port::display::ImageDisplay;
use crate::config::Config;
use crate::domain::scan::PatientMetadata;
use crate::error::Error;
use crate::infrastructure::dicom::ScanSurface;
use crate::ui::state::{GestureSensitivity, GestureState, Tool, ToolState};
use crate::ui::viewer::{empty_state, pane};
use iced::{event, mouse, window, Element, Point, Size, Task};
use std::path::PathBuf;

/// Messages emitted by viewer-related widgets.
#[derive(Debug, Clone)]
pub enum Message {
    /// Window-level event routed in by the application subscription.
    RawEvent {
        window: window::Id,
        event: event::Event,
    },
    /// Left button pressed over the scan pane.
    PanePressed,
    /// Left button released over the scan pane.
    PaneReleased,
    /// Request to open the file dialog from the empty state.
    OpenFileRequested,
}

/// Side effects the application should perform after handling a viewer message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Request to open the file dialog.
    OpenFileDialog,
}

/// Context required to render the viewer.
pub struct ViewEnv<'a> {
    pub metadata: Option<&'a PatientMetadata>,
}

/// Viewer component state.
pub struct State {
    surface: Option<ScanSurface>,
    current_path: Option<PathBuf>,
    tool: ToolState,
    gesture: GestureState,
    sensitivity: GestureSensitivity,
    cursor_position: Option<Point>,
    pane_size: Size,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    /// Creates an empty viewer with default sensitivities.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surface: None,
            current_path: None,
            tool: ToolState::default(),
            gesture: GestureState::default(),
            sensitivity: GestureSensitivity::default(),
            cursor_position: None,
            // Refined by the first pane-size sync from the application
            pane_size: Size::new(960.0, 600.0),
        }
    }

    /// Applies the configured gesture sensitivities.
    pub fn apply_config(&mut self, config: &Config) {
        self.sensitivity = GestureSensitivity {
            window: config.window_sensitivity_or_default(),
            zoom: config.zoom_sensitivity_or_default(),
        };
    }

    /// Whether a scan is currently displayed.
    #[must_use]
    pub fn has_scan(&self) -> bool {
        self.surface.is_some()
    }

    /// Path of the displayed scan file, if any.
    #[must_use]
    pub fn current_path(&self) -> Option<&PathBuf> {
        self.current_path.as_ref()
    }

    /// The currently selected tool.
    #[must_use]
    pub fn active_tool(&self) -> Tool {
        self.tool.active()
    }

    /// Selects a tool. A gesture already in progress keeps the tool it
    /// started with.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool.set_active(tool);
    }

    /// The configured gesture sensitivities.
    #[must_use]
    pub fn sensitivity(&self) -> GestureSensitivity {
        self.sensitivity
    }

    /// Displays a freshly loaded scan at its default fit.
    pub fn set_scan(&mut self, mut surface: ScanSurface, path: PathBuf) {
        surface.set_viewport_bounds(self.pane_size);
        let fitted = surface.fit_to_default();
        surface.set_transform(fitted);
        surface.request_repaint();

        self.surface = Some(surface);
        self.current_path = Some(path);
        self.gesture.stop();
    }

    /// Restores the default fit-to-window transform.
    ///
    /// No-op when no scan is loaded.
    pub fn reset_view(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            let fitted = surface.fit_to_default();
            surface.set_transform(fitted);
            surface.request_repaint();
        }
    }

    /// Records the pane size used for fit computations.
    pub fn set_pane_size(&mut self, size: Size) {
        self.pane_size = size;
        if let Some(surface) = self.surface.as_mut() {
            surface.set_viewport_bounds(size);
        }
    }

    /// PNG snapshot of the displayed (windowed) image, for analysis.
    ///
    /// Returns `None` when no scan is loaded.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when PNG encoding fails.
    pub fn snapshot_png(&self) -> Option<Result<Vec<u8>, Error>> {
        self.surface.as_ref().map(ScanSurface::snapshot_png)
    }

    /// Handles a viewer message, returning an effect for the application.
    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::RawEvent { event, .. } => self.handle_raw_event(&event),
            Message::PanePressed => {
                if let (Some(position), true) = (self.cursor_position, self.surface.is_some()) {
                    self.gesture.start(self.tool.active(), position);
                }
                (Effect::None, Task::none())
            }
            Message::PaneReleased => {
                self.gesture.stop();
                (Effect::None, Task::none())
            }
            Message::OpenFileRequested => (Effect::OpenFileDialog, Task::none()),
        }
    }

    fn handle_raw_event(&mut self, event: &event::Event) -> (Effect, Task<Message>) {
        if let event::Event::Mouse(mouse_event) = event {
            match mouse_event {
                mouse::Event::CursorMoved { position } => {
                    self.cursor_position = Some(*position);
                    if self.gesture.is_dragging() {
                        self.apply_drag(*position);
                    }
                }
                mouse::Event::ButtonReleased(mouse::Button::Left) => {
                    // Fires even when the release lands outside the pane
                    self.gesture.stop();
                }
                mouse::Event::CursorLeft => {
                    self.cursor_position = None;
                    self.gesture.stop();
                }
                _ => {}
            }
        }
        (Effect::None, Task::none())
    }

    fn apply_drag(&mut self, position: Point) {
        if let Some(surface) = self.surface.as_mut() {
            drive_gesture(surface, &mut self.gesture, position, self.sensitivity);
        }
    }

    /// Renders the viewer pane (or the empty state).
    pub fn view<'a>(&'a self, env: &ViewEnv<'a>) -> Element<'a, Message> {
        match self.surface.as_ref() {
            Some(surface) => pane::view(surface, self.tool.active(), env.metadata),
            None => empty_state::view(),
        }
    }
}

/// Feeds one pointer move through the gesture into a display surface.
///
/// Returns `true` when the surface's transform changed. Kept free of the
/// component state so it works against any [`ImageDisplay`] implementation.
pub fn drive_gesture(
    display: &mut dyn ImageDisplay,
    gesture: &mut GestureState,
    position: Point,
    sensitivity: GestureSensitivity,
) -> bool {
    let mut transform = display.transform();
    if gesture.update(position, &mut transform, sensitivity) {
        display.set_transform(transform);
        display.request_repaint();
        true
    } else {
        false
    }
}
