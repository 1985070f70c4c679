// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct wires together the viewer, sidebar panels, store, and
//! analyzer, and translates messages into side effects like persistence
//! or scan loading. Policy decisions (window sizing, pane geometry,
//! sidebar persistence) stay close to the main update loop so user-facing
//! behavior is easy to audit.

mod message;
pub mod paths;
pub mod persisted_state;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::application::port::store::ScanStore;
use crate::config;
use crate::domain::scan::{PatientMetadata, ScanRecord};
use crate::error::Error;
use crate::infrastructure::{GeminiAnalyzer, SupabaseStore};
use crate::ui::design_tokens::sizing;
use crate::ui::notifications;
use crate::ui::sidebar::AnalysisState;
use crate::ui::viewer::component;
use iced::{window, Element, Size, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

pub const WINDOW_DEFAULT_WIDTH: u32 = 1280;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const MIN_WINDOW_WIDTH: u32 = 900;
pub const MIN_WINDOW_HEIGHT: u32 = 600;

/// Height reserved for the toolbar when computing the pane geometry.
pub const TOOLBAR_HEIGHT: f32 = 48.0;

/// Root Iced application state bridging UI components, external services,
/// and persisted preferences.
pub struct App {
    viewer: component::State,
    sidebar_open: bool,
    /// Metadata of the displayed scan, for the sidebar and pane overlays.
    metadata: Option<PatientMetadata>,
    /// Recent scan records fetched from the store.
    history: Vec<ScanRecord>,
    /// Lifecycle of the analysis request for the displayed scan.
    analysis: AnalysisState,
    /// Store id of the displayed scan, once its upload completed.
    current_scan_id: Option<String>,
    store: SupabaseStore,
    analyzer: GeminiAnalyzer,
    history_limit: u32,
    window_size: Size,
    /// Persisted application state (last open directory, sidebar).
    app_state: persisted_state::AppState,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("has_scan", &self.viewer.has_scan())
            .field("sidebar_open", &self.sidebar_open)
            .field("history_len", &self.history.len())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH as f32, MIN_WINDOW_HEIGHT as f32)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_default();
        let (app_state, state_warning) = persisted_state::AppState::load();

        let mut viewer = component::State::new();
        viewer.apply_config(&config);

        let mut notification_manager = notifications::Manager::new();
        if let Some(warning) = state_warning {
            notification_manager.push(notifications::Notification::warning(warning));
        }

        let mut app = Self {
            viewer,
            sidebar_open: app_state.sidebar_open,
            metadata: None,
            history: Vec::new(),
            analysis: AnalysisState::default(),
            current_scan_id: None,
            store: SupabaseStore::from_env(),
            analyzer: GeminiAnalyzer::from_env(),
            history_limit: config.history_limit_or_default(),
            window_size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
            app_state,
            notifications: notification_manager,
        };
        app.sync_pane_size();

        let mut startup = vec![app.refresh_history()];
        if let Some(path) = flags.file_path.as_deref() {
            startup.push(update::load_scan_task(PathBuf::from(path)));
        }

        (app, Task::batch(startup))
    }

    fn title(&self) -> String {
        match self
            .viewer
            .current_path()
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str())
        {
            Some(name) => format!("{name} — DICOM Lens"),
            None => "DICOM Lens".to_string(),
        }
    }

    fn theme(&self) -> Theme {
        crate::ui::theme::theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    /// Recomputes the scan pane geometry from the window size and sidebar
    /// visibility, so fit-to-default stays accurate.
    fn sync_pane_size(&mut self) {
        let sidebar_width = if self.sidebar_open {
            sizing::SIDEBAR_WIDTH
        } else {
            0.0
        };
        let width = (self.window_size.width - sidebar_width).max(1.0);
        let height = (self.window_size.height - TOOLBAR_HEIGHT).max(1.0);
        self.viewer.set_pane_size(Size::new(width, height));
    }

    /// Shows or hides the sidebar and persists the choice.
    fn set_sidebar_open(&mut self, open: bool) {
        self.sidebar_open = open;
        self.sync_pane_size();
        self.app_state.sidebar_open = open;
        if let Some(warning) = self.app_state.save() {
            eprintln!("{}", warning);
        }
    }

    /// Fetches the most recent scans from the store.
    fn refresh_history(&self) -> Task<Message> {
        let store = self.store.clone();
        let limit = self.history_limit;
        Task::perform(
            async move {
                store
                    .recent_scans(limit)
                    .await
                    .map_err(|e| Error::Store(e.to_string()))
            },
            Message::HistoryLoaded,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::state::Tool;
    use crate::ui::toolbar;

    fn app() -> App {
        App::new(Flags::default()).0
    }

    #[test]
    fn new_starts_without_scan_or_analysis() {
        let app = app();
        assert!(!app.viewer.has_scan());
        assert_eq!(app.analysis, AnalysisState::Idle);
        assert!(app.current_scan_id.is_none());
        assert!(app.history.is_empty());
    }

    #[test]
    fn title_without_scan_is_plain() {
        let app = app();
        assert_eq!(app.title(), "DICOM Lens");
    }

    #[test]
    fn selecting_another_tool_switches_and_reselecting_deselects() {
        let mut app = app();
        assert_eq!(app.viewer.active_tool(), Tool::Window);

        let _ = app.update(Message::Toolbar(toolbar::Message::SelectTool(Tool::Pan)));
        assert_eq!(app.viewer.active_tool(), Tool::Pan);

        let _ = app.update(Message::Toolbar(toolbar::Message::SelectTool(Tool::Pan)));
        assert_eq!(app.viewer.active_tool(), Tool::None);
    }

    #[test]
    fn window_resize_is_tracked() {
        let mut app = app();
        let _ = app.update(Message::WindowResized(Size::new(1600.0, 1000.0)));
        assert_eq!(app.window_size, Size::new(1600.0, 1000.0));
    }

    #[test]
    fn reset_view_without_scan_is_harmless() {
        let mut app = app();
        let _ = app.update(Message::Toolbar(toolbar::Message::ResetView));
        assert!(!app.viewer.has_scan());
    }

    #[test]
    fn history_load_failure_keeps_previous_history() {
        let mut app = app();
        let _ = app.update(Message::HistoryLoaded(Err(Error::Store(
            "offline".to_string(),
        ))));
        assert!(app.history.is_empty());
    }
}
