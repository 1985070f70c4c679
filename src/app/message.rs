// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::domain::scan::{AnalysisReport, ScanRecord};
use crate::error::Error;
use crate::infrastructure::dicom::LoadedScan;
use crate::ui::notifications;
use crate::ui::sidebar;
use crate::ui::toolbar;
use crate::ui::viewer::component;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Viewer(component::Message),
    Toolbar(toolbar::Message),
    Sidebar(sidebar::Message),
    Notification(notifications::NotificationMessage),
    /// Result of loading a scan off the UI thread.
    ScanLoaded {
        path: PathBuf,
        result: Result<Box<LoadedScan>, Error>,
    },
    /// Result of uploading the scan to the store (`None` when disabled).
    ScanUploaded(Result<Option<ScanRecord>, Error>),
    /// Result of fetching the recent-scan history.
    HistoryLoaded(Result<Vec<ScanRecord>, Error>),
    /// Result of the AI analysis request.
    AnalysisCompleted(Result<AnalysisReport, Error>),
    /// Result of persisting an analysis to the store.
    AnalysisSaved(Result<(), Error>),
    /// Result from the open file dialog.
    OpenFileDialogResult(Option<PathBuf>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// The window was resized.
    WindowResized(iced::Size),
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(iced::window::Id),
    /// Periodic tick for notification auto-dismiss.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional scan path to preload on startup.
    pub file_path: Option<String>,
    /// Optional data directory override (for state files).
    /// Takes precedence over `DICOM_LENS_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `DICOM_LENS_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
