// SPDX-License-Identifier: MPL-2.0
//! Toolbar: tool selection, reset, and the current file name.

use crate::ui::design_tokens::{opacity, palette, radius, shadow, spacing, typography};
use crate::ui::state::Tool;
use iced::widget::{button, container, Column, Container, Row, Space, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Contextual data needed to render the toolbar.
pub struct ViewContext<'a> {
    pub active_tool: Tool,
    pub file_name: Option<&'a str>,
    pub sidebar_open: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    SelectTool(Tool),
    ResetView,
    ToggleSidebar,
}

/// Renders the toolbar row.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let mut left = Row::new().spacing(spacing::XS).align_y(alignment::Vertical::Center);

    if !ctx.sidebar_open {
        left = left.push(
            button(Text::new("☰").size(typography::BODY))
                .on_press(Message::ToggleSidebar)
                .padding(spacing::XS)
                .style(plain_button_style),
        );
    }

    let tools = Row::new()
        .spacing(spacing::XXS)
        .align_y(alignment::Vertical::Center)
        .push(tool_button("Windowing", Tool::Window, ctx.active_tool))
        .push(tool_button("Zoom", Tool::Zoom, ctx.active_tool))
        .push(tool_button("Pan", Tool::Pan, ctx.active_tool))
        .push(Space::new().width(Length::Fixed(spacing::XS)))
        .push(
            button(Text::new("Reset View").size(typography::CAPTION))
                .on_press(Message::ResetView)
                .padding([spacing::XXS, spacing::SM])
                .style(plain_button_style),
        );

    left = left.push(
        Container::new(tools)
            .padding(spacing::XXS)
            .style(tool_group_style),
    );

    let mut bar = Row::new()
        .align_y(alignment::Vertical::Center)
        .push(left)
        .push(Space::new().width(Length::Fill));

    if let Some(file_name) = ctx.file_name {
        bar = bar.push(
            Column::new()
                .align_x(alignment::Horizontal::Right)
                .push(
                    Text::new("SCANNING FILE")
                        .size(typography::CAPTION)
                        .color(palette::SLATE_500),
                )
                .push(
                    Text::new(file_name)
                        .size(typography::CAPTION)
                        .color(palette::SLATE_300),
                ),
        );
    }

    container(bar)
        .width(Length::Fill)
        .padding([spacing::SM, spacing::MD])
        .style(|_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(Color {
                a: 0.4,
                ..palette::SLATE_900
            })),
            ..Default::default()
        })
        .into()
}

fn tool_button(label: &str, tool: Tool, active_tool: Tool) -> Element<'_, Message> {
    let is_active = tool == active_tool;

    button(Text::new(label).size(typography::CAPTION))
        .on_press(Message::SelectTool(tool))
        .padding([spacing::XXS, spacing::SM])
        .style(move |theme: &Theme, status| tool_button_style(theme, status, is_active))
        .into()
}

fn tool_button_style(_theme: &Theme, status: button::Status, is_active: bool) -> button::Style {
    let (background, text_color) = if is_active {
        (
            Some(iced::Background::Color(Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::BLUE_500
            })),
            palette::BLUE_400,
        )
    } else {
        match status {
            button::Status::Hovered | button::Status::Pressed => (
                Some(iced::Background::Color(Color {
                    a: opacity::OVERLAY_SUBTLE,
                    ..palette::SLATE_500
                })),
                palette::SLATE_300,
            ),
            _ => (None, palette::SLATE_500),
        }
    };

    button::Style {
        background,
        text_color,
        border: iced::Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        ..button::Style::default()
    }
}

fn plain_button_style(_theme: &Theme, status: button::Status) -> button::Style {
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
        text_color: palette::SLATE_300,
        border: iced::Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        ..button::Style::default()
    }
}

fn tool_group_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color {
            a: 0.4,
            ..palette::SLATE_950
        })),
        border: iced::Border {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..Color::WHITE
            },
            width: 1.0,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}
