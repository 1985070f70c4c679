// SPDX-License-Identifier: MPL-2.0
//! Empty-state hint shown before any scan is loaded.

use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::viewer::component::Message;
use iced::widget::{button, container, Column, Container, Text};
use iced::{alignment, Element, Length, Theme};

/// Renders the centered drop hint with an open-file button.
pub fn view<'a>() -> Element<'a, Message> {
    let title = Text::new("Empty Viewer")
        .size(typography::TITLE_SM)
        .color(palette::SLATE_300);

    let hint = Text::new("Drag and drop or select a DICOM scan to begin analysis")
        .size(typography::BODY)
        .color(palette::SLATE_500);

    let open_button = button(Text::new("Open DICOM scan…").size(typography::BODY))
        .on_press(Message::OpenFileRequested)
        .padding([spacing::XS, spacing::MD]);

    let content = Column::new()
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .push(title)
        .push(hint)
        .push(open_button);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(|_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(palette::CANVAS)),
            ..Default::default()
        })
        .into()
}
