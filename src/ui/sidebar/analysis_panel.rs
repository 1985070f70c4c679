// SPDX-License-Identifier: MPL-2.0
//! AI analysis section for the sidebar.

use super::Message;
use crate::domain::scan::AnalysisReport;
use crate::ui::design_tokens::{palette, spacing, typography};
use iced::widget::{button, Column, Text};
use iced::{Element, Length};

/// Lifecycle of the analysis request for the displayed scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AnalysisState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Running,
    /// The model answered.
    Completed(AnalysisReport),
    /// The request failed; holds the user-facing message.
    Failed(String),
}

impl AnalysisState {
    /// Whether a request is currently in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, AnalysisState::Running)
    }
}

/// Renders the analyze button and the current analysis content.
pub fn view<'a>(state: &'a AnalysisState, has_scan: bool) -> Element<'a, Message> {
    let button_label = if state.is_running() {
        "Analyzing…"
    } else {
        "Analyze"
    };

    let mut analyze = button(
        Text::new(button_label)
            .size(typography::BODY)
            .width(Length::Fill)
            .align_x(iced::alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .padding(spacing::XS);

    if has_scan && !state.is_running() {
        analyze = analyze.on_press(Message::RunAnalysis);
    }

    let content: Element<'a, Message> = match state {
        AnalysisState::Idle => Text::new("Select a scan and click 'Analyze' to generate AI insights.")
            .size(typography::CAPTION)
            .color(palette::SLATE_500)
            .into(),
        AnalysisState::Running => Text::new("Consulting the radiology assistant…")
            .size(typography::CAPTION)
            .color(palette::SLATE_500)
            .into(),
        AnalysisState::Completed(report) => report_view(report),
        AnalysisState::Failed(message) => Text::new(message.as_str())
            .size(typography::CAPTION)
            .color(palette::ERROR_500)
            .into(),
    };

    Column::new()
        .spacing(spacing::SM)
        .push(analyze)
        .push(content)
        .into()
}

fn report_view(report: &AnalysisReport) -> Element<'_, Message> {
    let mut column = Column::new().spacing(spacing::XS);

    if !report.anatomical_region.is_empty() {
        column = column.push(
            Text::new(format!(
                "Region: {} (confidence {:.0}%)",
                report.anatomical_region,
                report.confidence * 100.0
            ))
            .size(typography::CAPTION)
            .color(palette::BLUE_400),
        );
    }

    column = column.push(
        Text::new(report.summary.as_str())
            .size(typography::CAPTION)
            .color(palette::SLATE_300),
    );

    for finding in &report.findings {
        column = column.push(
            Text::new(format!("• {finding}"))
                .size(typography::CAPTION)
                .color(palette::SLATE_300),
        );
    }

    column.into()
}
