// SPDX-License-Identifier: MPL-2.0
//! Scan pane: the windowed image plus its overlays.
//!
//! Zoom and pan are applied here at view time (the image widget is sized
//! by the scale and shifted through the centering padding); the VOI
//! window is baked into the surface's render. The pane clips overflow so
//! a zoomed-in scan never bleeds into the surrounding chrome.

use crate::application::port::display::ImageDisplay;
use crate::domain::scan::PatientMetadata;
use crate::infrastructure::dicom::ScanSurface;
use crate::ui::design_tokens::{border, opacity, palette, radius, spacing, typography};
use crate::ui::state::Tool;
use crate::ui::viewer::component::Message;
use iced::widget::image::Image;
use iced::widget::{container, mouse_area, responsive, Column, Container, Row, Stack, Text};
use iced::{alignment, mouse, Color, Element, Length, Padding, Size, Theme};

/// Renders the scan pane with its technical-specs and mode overlays.
pub fn view<'a>(
    surface: &'a ScanSurface,
    tool: Tool,
    metadata: Option<&'a PatientMetadata>,
) -> Element<'a, Message> {
    let canvas = responsive(move |size| scan_canvas(surface, size));

    let stack = Stack::new()
        .push(canvas)
        .push(tech_specs_overlay(surface, metadata))
        .push(tool_indicator(tool));

    let pane = Container::new(stack)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(canvas_style);

    mouse_area(pane)
        .on_press(Message::PanePressed)
        .on_release(Message::PaneReleased)
        .interaction(mouse::Interaction::Crosshair)
        .into()
}

/// Sizes and positions the image according to the surface's transform.
fn scan_canvas(surface: &ScanSurface, size: Size) -> Element<'_, Message> {
    let transform = surface.transform();
    let scale = transform.scale.value();

    #[allow(clippy::cast_precision_loss)]
    let width = surface.width() as f32 * scale;
    #[allow(clippy::cast_precision_loss)]
    let height = surface.height() as f32 * scale;

    // Pan translation rides on the centering padding; the pane clips
    // whatever ends up outside
    let offset_x = ((size.width - width) / 2.0 + transform.translation.x * scale).max(0.0);
    let offset_y = ((size.height - height) / 2.0 + transform.translation.y * scale).max(0.0);

    let image = Image::new(surface.handle())
        .width(Length::Fixed(width))
        .height(Length::Fixed(height));

    container(image)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(Padding {
            top: offset_y,
            right: 0.0,
            bottom: 0.0,
            left: offset_x,
        })
        .clip(true)
        .into()
}

/// Top-right overlay with resolution, modality, and bit depth.
fn tech_specs_overlay<'a>(
    surface: &'a ScanSurface,
    metadata: Option<&'a PatientMetadata>,
) -> Element<'a, Message> {
    let modality = metadata
        .map(|m| m.modality.as_str())
        .unwrap_or("---");

    let line = |label: &str, value: String| {
        Row::new()
            .spacing(spacing::XXS)
            .push(
                Text::new(format!("{label}:"))
                    .size(typography::CAPTION)
                    .color(palette::SLATE_500),
            )
            .push(
                Text::new(value)
                    .size(typography::CAPTION)
                    .color(palette::SLATE_200),
            )
    };

    let specs = Column::new()
        .spacing(spacing::XXS)
        .push(
            Text::new("TECHNICAL SPECS")
                .size(typography::CAPTION)
                .color(palette::BLUE_400),
        )
        .push(line("RES", format!("{}x{}", surface.width(), surface.height())))
        .push(line("TYPE", modality.to_string()))
        .push(line("DEPTH", format!("{}-BIT", surface.bits_allocated())));

    let card = Container::new(specs)
        .padding(spacing::SM)
        .style(overlay_card_style);

    Container::new(card)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .align_y(alignment::Vertical::Top)
        .padding(spacing::MD)
        .into()
}

/// Bottom-center overlay naming the active tool.
fn tool_indicator<'a>(tool: Tool) -> Element<'a, Message> {
    let label = Text::new(format!("MODE: {}", tool.label().to_uppercase()))
        .size(typography::CAPTION)
        .color(palette::SLATE_300);

    let badge = Container::new(label)
        .padding(Padding {
            top: spacing::XS,
            right: spacing::MD,
            bottom: spacing::XS,
            left: spacing::MD,
        })
        .style(overlay_card_style);

    Container::new(badge)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Bottom)
        .padding(spacing::LG)
        .into()
}

fn canvas_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(palette::CANVAS)),
        ..Default::default()
    }
}

fn overlay_card_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..palette::SLATE_900
        })),
        border: iced::Border {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..Color::WHITE
            },
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        text_color: Some(palette::SLATE_300),
        ..Default::default()
    }
}
