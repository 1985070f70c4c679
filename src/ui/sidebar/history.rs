// SPDX-License-Identifier: MPL-2.0
//! Recent-scans list for the sidebar.

use super::Message;
use crate::domain::scan::ScanRecord;
use crate::ui::design_tokens::{opacity, palette, radius, shadow, spacing, typography};
use iced::widget::{button, Column, Text};
use iced::{Color, Element, Length, Theme};

/// Renders the history list, newest first.
pub fn view(history: &[ScanRecord]) -> Element<'_, Message> {
    if history.is_empty() {
        return Text::new("No scans stored yet.")
            .size(typography::CAPTION)
            .color(palette::SLATE_500)
            .into();
    }

    let mut column = Column::new().spacing(spacing::XXS);
    for record in history {
        column = column.push(entry(record));
    }
    column.into()
}

fn entry(record: &ScanRecord) -> Element<'_, Message> {
    let mut label = record.label();
    if record.has_analysis() {
        label.push_str(" •");
    }

    let content = Column::new()
        .push(
            Text::new(label)
                .size(typography::CAPTION)
                .color(palette::SLATE_200),
        )
        .push(
            Text::new(record.created_at.format("%Y-%m-%d %H:%M").to_string())
                .size(typography::CAPTION)
                .color(palette::SLATE_500),
        );

    button(content)
        .on_press(Message::HistorySelected(record.id.clone()))
        .width(Length::Fill)
        .padding(spacing::XS)
        .style(entry_style)
        .into()
}

fn entry_style(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => {
            Some(iced::Background::Color(Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::SLATE_500
            }))
        }
        _ => None,
    };

    button::Style {
        background,
        text_color: palette::SLATE_200,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        ..button::Style::default()
    }
}
