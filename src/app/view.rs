// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Lays out the sidebar, toolbar, and scan pane, with the toast overlay
//! stacked on top.

use super::{App, Message};
use crate::ui::notifications::Toast;
use crate::ui::sidebar;
use crate::ui::toolbar;
use crate::ui::viewer::component;
use iced::widget::{Column, Row, Stack};
use iced::{Element, Length};

/// Renders the application view.
pub fn view(app: &App) -> Element<'_, Message> {
    let toolbar_view = toolbar::view(toolbar::ViewContext {
        active_tool: app.viewer.active_tool(),
        file_name: app
            .viewer
            .current_path()
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str()),
        sidebar_open: app.sidebar_open,
    })
    .map(Message::Toolbar);

    let viewer_view = app
        .viewer
        .view(&component::ViewEnv {
            metadata: app.metadata.as_ref(),
        })
        .map(Message::Viewer);

    let main_column = Column::new()
        .push(toolbar_view)
        .push(viewer_view)
        .width(Length::Fill)
        .height(Length::Fill);

    let mut layout = Row::new().width(Length::Fill).height(Length::Fill);

    if app.sidebar_open {
        let sidebar_view = sidebar::view(&sidebar::ViewContext {
            metadata: app.metadata.as_ref(),
            history: &app.history,
            analysis: &app.analysis,
            has_scan: app.viewer.has_scan(),
        })
        .map(Message::Sidebar);
        layout = layout.push(sidebar_view);
    }

    layout = layout.push(main_column);

    let toasts = Toast::view_overlay(&app.notifications).map(Message::Notification);

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(layout)
        .push(toasts)
        .into()
}
