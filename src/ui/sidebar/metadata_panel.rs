// SPDX-License-Identifier: MPL-2.0
//! Patient metadata rows for the sidebar.

use super::Message;
use crate::domain::scan::PatientMetadata;
use crate::ui::design_tokens::{palette, spacing, typography};
use iced::widget::{Column, Row, Space, Text};
use iced::{Element, Length};

/// Renders the patient data section, or a placeholder when nothing is
/// loaded.
pub fn view(metadata: Option<&PatientMetadata>) -> Element<'_, Message> {
    let Some(metadata) = metadata else {
        return Text::new("Load a scan to see patient data.")
            .size(typography::CAPTION)
            .color(palette::SLATE_500)
            .into();
    };

    let rows = [
        ("Patient Name", metadata.name.as_str()),
        ("Patient ID", metadata.id.as_str()),
        ("Birth Date", metadata.birth_date.as_str()),
        ("Sex", metadata.sex.as_str()),
        ("Modality", metadata.modality.as_str()),
        ("Study Date", metadata.study_date.as_str()),
        ("Description", metadata.study_description.as_str()),
        ("Institution", metadata.institution.as_str()),
    ];

    let mut column = Column::new().spacing(spacing::XXS);
    for (label, value) in rows {
        column = column.push(
            Row::new()
                .push(
                    Text::new(label)
                        .size(typography::CAPTION)
                        .color(palette::SLATE_500),
                )
                .push(Space::new().width(Length::Fill))
                .push(
                    Text::new(value.to_string())
                        .size(typography::CAPTION)
                        .color(palette::SLATE_200),
                ),
        );
    }

    column.into()
}
