// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering individual notifications.
//!
//! Toasts are the visual representation of notifications, appearing as
//! small cards with severity-colored accents and dismiss buttons.

use super::manager::{Manager, Message};
use super::notification::Notification;
use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, sizing, spacing, typography};
use iced::widget::{button, container, text, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Toast widget configuration.
pub struct Toast;

impl Toast {
    /// Renders a single toast notification.
    pub fn view(notification: &Notification) -> Element<'_, Message> {
        let severity = notification.severity();
        let accent_color = severity.color();

        let glyph_widget = Text::new(severity.glyph())
            .size(typography::BODY)
            .color(accent_color);

        let message_widget = Text::new(notification.message())
            .size(typography::BODY)
            .style(|theme: &Theme| text::Style {
                color: Some(theme.palette().text),
            });

        let dismiss_button = button(Text::new("×").size(typography::BODY))
            .on_press(Message::Dismiss(notification.id()))
            .padding(spacing::XXS)
            .style(dismiss_button_style);

        // Layout: [glyph] [message] [dismiss]
        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(glyph_widget).padding(spacing::XXS))
            .push(
                Container::new(message_widget)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Left),
            )
            .push(dismiss_button);

        Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent_color))
            .into()
    }

    /// Renders the toast overlay with all visible notifications.
    ///
    /// Positions toasts in the bottom-right corner, stacked vertically.
    pub fn view_overlay(manager: &Manager) -> Element<'_, Message> {
        let toasts: Vec<Element<'_, Message>> = manager.visible().map(Self::view).collect();

        if toasts.is_empty() {
            // Return an empty container that takes no space
            Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into()
        } else {
            let toast_column = Column::with_children(toasts)
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Right);

            Container::new(toast_column)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Right)
                .align_y(alignment::Vertical::Bottom)
                .padding(spacing::MD)
                .into()
        }
    }
}

/// Style function for the toast container.
fn toast_container_style(theme: &Theme, accent_color: Color) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(palette::SLATE_900)),
        border: iced::Border {
            color: accent_color,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

/// Style function for the dismiss button.
fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let text_color = theme.palette().text;

    match status {
        button::Status::Active | button::Status::Disabled => button::Style {
            background: None,
            text_color,
            border: iced::Border::default(),
            shadow: shadow::NONE,
            ..button::Style::default()
        },
        button::Status::Hovered | button::Status::Pressed => button::Style {
            background: Some(iced::Background::Color(Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::SLATE_500
            })),
            text_color,
            border: iced::Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            ..button::Style::default()
        },
    }
}
