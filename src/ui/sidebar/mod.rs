// SPDX-License-Identifier: MPL-2.0
//! Sidebar: upload entry point, scan history, patient metadata, and the
//! analysis panel.

pub mod analysis_panel;
pub mod history;
pub mod metadata_panel;

pub use analysis_panel::AnalysisState;

use crate::domain::scan::{PatientMetadata, ScanRecord};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use iced::widget::{button, container, rule, scrollable, Column, Row, Space, Text};
use iced::{alignment, Element, Length, Theme};

/// Contextual data needed to render the sidebar.
pub struct ViewContext<'a> {
    pub metadata: Option<&'a PatientMetadata>,
    pub history: &'a [ScanRecord],
    pub analysis: &'a AnalysisState,
    pub has_scan: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Open the file dialog.
    OpenFile,
    /// Request an AI analysis of the displayed scan.
    RunAnalysis,
    /// A history entry was clicked.
    HistorySelected(String),
    /// Collapse the sidebar.
    Close,
}

/// Renders the full sidebar.
pub fn view<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let header = Row::new()
        .align_y(alignment::Vertical::Center)
        .push(
            Text::new("DICOM Lens")
                .size(typography::TITLE_SM)
                .color(palette::SLATE_200),
        )
        .push(Space::new().width(Length::Fill))
        .push(
            button(Text::new("‹").size(typography::BODY))
                .on_press(Message::Close)
                .padding(spacing::XXS),
        );

    let upload = button(
        Text::new("Upload DICOM")
            .size(typography::BODY)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    )
    .on_press(Message::OpenFile)
    .width(Length::Fill)
    .padding(spacing::SM);

    let content = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::MD)
        .push(header)
        .push(upload)
        .push(rule::horizontal(1))
        .push(section_title("RECENT SCANS"))
        .push(history::view(ctx.history))
        .push(rule::horizontal(1))
        .push(section_title("PATIENT DATA"))
        .push(metadata_panel::view(ctx.metadata))
        .push(rule::horizontal(1))
        .push(section_title("AI ANALYSIS"))
        .push(analysis_panel::view(ctx.analysis, ctx.has_scan));

    container(scrollable(content).width(Length::Fixed(sizing::SIDEBAR_WIDTH)))
        .width(Length::Fixed(sizing::SIDEBAR_WIDTH))
        .height(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(palette::SLATE_900)),
            ..Default::default()
        })
        .into()
}

fn section_title<'a>(title: &'a str) -> Element<'a, Message> {
    Text::new(title)
        .size(typography::CAPTION)
        .color(palette::SLATE_500)
        .into()
}
