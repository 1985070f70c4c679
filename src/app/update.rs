// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! This module contains the main `update` function and the task builders
//! for loading, uploading, analyzing, and querying scans.

use super::{App, Message};
use crate::application::port::analysis::ScanAnalyzer;
use crate::application::port::store::ScanStore;
use crate::domain::scan::{AnalysisReport, PatientMetadata, ScanRecord};
use crate::error::Error;
use crate::infrastructure::dicom::{self, LoadedScan};
use crate::infrastructure::supabase::SupabaseStore;
use crate::ui::notifications::Notification;
use crate::ui::sidebar::{self, AnalysisState};
use crate::ui::state::Tool;
use crate::ui::toolbar;
use crate::ui::viewer::component;
use iced::Task;
use std::path::PathBuf;

/// Shown in the analysis panel when the request fails, mirroring the
/// notification detail with a stable, user-oriented phrasing.
const ANALYSIS_FAILED_MESSAGE: &str =
    "Analysis failed. Please check your API key or connection.";

pub fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Viewer(viewer_message) => {
            let (effect, task) = app.viewer.handle_message(viewer_message);
            let effect_task = handle_viewer_effect(app, effect);
            Task::batch([task.map(Message::Viewer), effect_task])
        }
        Message::Toolbar(toolbar_message) => handle_toolbar_message(app, toolbar_message),
        Message::Sidebar(sidebar_message) => handle_sidebar_message(app, sidebar_message),
        Message::Notification(notification_message) => {
            app.notifications.handle_message(&notification_message);
            Task::none()
        }
        Message::ScanLoaded { path, result } => handle_scan_loaded(app, path, result),
        Message::ScanUploaded(result) => handle_scan_uploaded(app, result),
        Message::HistoryLoaded(result) => {
            match result {
                Ok(history) => app.history = history,
                Err(err) => eprintln!("Failed to load history: {}", err),
            }
            Task::none()
        }
        Message::AnalysisCompleted(result) => handle_analysis_completed(app, result),
        Message::AnalysisSaved(result) => {
            match result {
                Ok(()) => app.refresh_history(),
                Err(err) => {
                    app.notifications
                        .push(Notification::warning(format!("Analysis not stored: {err}")));
                    Task::none()
                }
            }
        }
        Message::OpenFileDialogResult(path) => match path {
            Some(path) => load_scan_task(path),
            None => Task::none(),
        },
        Message::FileDropped(path) => load_scan_task(path),
        Message::WindowResized(size) => {
            app.window_size = size;
            app.sync_pane_size();
            Task::none()
        }
        Message::WindowCloseRequested(id) => {
            if let Some(warning) = app.app_state.save() {
                eprintln!("{}", warning);
            }
            iced::window::close(id)
        }
        Message::Tick(_) => {
            app.notifications.tick();
            Task::none()
        }
    }
}

fn handle_viewer_effect(app: &mut App, effect: component::Effect) -> Task<Message> {
    match effect {
        component::Effect::None => Task::none(),
        component::Effect::OpenFileDialog => {
            open_file_dialog_task(app.app_state.last_open_directory.clone())
        }
    }
}

fn handle_toolbar_message(app: &mut App, message: toolbar::Message) -> Task<Message> {
    match message {
        toolbar::Message::SelectTool(tool) => {
            // Clicking the active tool deselects it; a drag already in
            // progress keeps the tool it started with either way
            if app.viewer.active_tool() == tool {
                app.viewer.set_tool(Tool::None);
            } else {
                app.viewer.set_tool(tool);
            }
            Task::none()
        }
        toolbar::Message::ResetView => {
            app.viewer.reset_view();
            Task::none()
        }
        toolbar::Message::ToggleSidebar => {
            app.set_sidebar_open(true);
            Task::none()
        }
    }
}

fn handle_sidebar_message(app: &mut App, message: sidebar::Message) -> Task<Message> {
    match message {
        sidebar::Message::OpenFile => {
            open_file_dialog_task(app.app_state.last_open_directory.clone())
        }
        sidebar::Message::RunAnalysis => run_analysis(app),
        sidebar::Message::HistorySelected(_id) => {
            app.notifications.push(Notification::info(
                "Re-loading from history is not implemented yet.",
            ));
            Task::none()
        }
        sidebar::Message::Close => {
            app.set_sidebar_open(false);
            Task::none()
        }
    }
}

fn handle_scan_loaded(
    app: &mut App,
    path: PathBuf,
    result: Result<Box<LoadedScan>, Error>,
) -> Task<Message> {
    match result {
        Ok(scan) => {
            let LoadedScan { surface, metadata } = *scan;
            app.viewer.set_scan(surface, path.clone());
            app.metadata = Some(metadata.clone());
            app.analysis = AnalysisState::Idle;
            app.current_scan_id = None;

            app.app_state.set_last_open_directory_from_file(&path);
            if let Some(warning) = app.app_state.save() {
                eprintln!("{}", warning);
            }

            upload_scan_task(app.store.clone(), path, metadata)
        }
        Err(err) => {
            let detail = match &err {
                Error::Dicom(dicom_err) => dicom_err.user_message().to_string(),
                other => other.to_string(),
            };
            app.notifications.push(Notification::error(detail));
            Task::none()
        }
    }
}

fn handle_scan_uploaded(
    app: &mut App,
    result: Result<Option<ScanRecord>, Error>,
) -> Task<Message> {
    match result {
        Ok(Some(record)) => {
            app.current_scan_id = Some(record.id);
            app.notifications
                .push(Notification::success("Scan stored in the archive."));
            app.refresh_history()
        }
        // Store disabled: keep working without persistence
        Ok(None) => Task::none(),
        Err(err) => {
            app.notifications
                .push(Notification::warning(format!("Scan not stored: {err}")));
            Task::none()
        }
    }
}

fn handle_analysis_completed(
    app: &mut App,
    result: Result<AnalysisReport, Error>,
) -> Task<Message> {
    match result {
        Ok(report) => {
            app.analysis = AnalysisState::Completed(report.clone());
            match app.current_scan_id.as_ref() {
                Some(scan_id) => save_analysis_task(app.store.clone(), scan_id.clone(), report),
                None => Task::none(),
            }
        }
        Err(err) => {
            app.analysis = AnalysisState::Failed(ANALYSIS_FAILED_MESSAGE.to_string());
            app.notifications
                .push(Notification::error(format!("{err}")));
            Task::none()
        }
    }
}

fn run_analysis(app: &mut App) -> Task<Message> {
    let Some(snapshot) = app.viewer.snapshot_png() else {
        return Task::none();
    };

    match snapshot {
        Ok(png) => {
            app.analysis = AnalysisState::Running;
            let analyzer = app.analyzer.clone();
            Task::perform(
                async move {
                    analyzer
                        .analyze(png, None)
                        .await
                        .map_err(|e| Error::Analysis(e.to_string()))
                },
                Message::AnalysisCompleted,
            )
        }
        Err(err) => {
            app.notifications
                .push(Notification::error(format!("Snapshot failed: {err}")));
            Task::none()
        }
    }
}

/// Loads a scan off the UI thread; decoding is CPU-bound.
pub fn load_scan_task(path: PathBuf) -> Task<Message> {
    Task::perform(
        async move {
            let load_path = path.clone();
            let result = tokio::task::spawn_blocking(move || dicom::load_scan(&load_path))
                .await
                .map_err(|e| Error::Io(e.to_string()))
                .and_then(|loaded| loaded.map(Box::new).map_err(Error::from));
            (path, result)
        },
        |(path, result)| Message::ScanLoaded { path, result },
    )
}

fn upload_scan_task(store: SupabaseStore, path: PathBuf, metadata: PatientMetadata) -> Task<Message> {
    Task::perform(
        async move {
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("scan.dcm")
                .to_string();

            let read_path = path.clone();
            let bytes = tokio::task::spawn_blocking(move || std::fs::read(&read_path))
                .await
                .map_err(|e| Error::Io(e.to_string()))?
                .map_err(Error::from)?;

            store
                .upload_scan(&file_name, bytes, &metadata)
                .await
                .map_err(|e| Error::Store(e.to_string()))
        },
        Message::ScanUploaded,
    )
}

fn save_analysis_task(store: SupabaseStore, scan_id: String, report: AnalysisReport) -> Task<Message> {
    Task::perform(
        async move {
            store
                .save_analysis(&scan_id, &report)
                .await
                .map_err(|e| Error::Store(e.to_string()))
        },
        Message::AnalysisSaved,
    )
}

fn open_file_dialog_task(start_dir: Option<PathBuf>) -> Task<Message> {
    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .add_filter("DICOM scans", &["dcm", "dicom"])
                .set_title("Open DICOM scan");
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            dialog
                .pick_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        Message::OpenFileDialogResult,
    )
}
