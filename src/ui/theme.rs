// SPDX-License-Identifier: MPL-2.0
//! Application theme built from the design-token palette.

use crate::ui::design_tokens::palette;
use iced::theme::Palette;
use iced::Theme;

/// Returns the viewer's dark clinical theme.
#[must_use]
pub fn theme() -> Theme {
    Theme::custom(
        "DicomLens".to_string(),
        Palette {
            background: palette::SLATE_950,
            text: palette::SLATE_200,
            primary: palette::BLUE_500,
            success: palette::SUCCESS_500,
            warning: palette::WARNING_500,
            danger: palette::ERROR_500,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_uses_dark_background() {
        let theme = theme();
        let background = theme.palette().background;
        assert!(background.r < 0.2 && background.g < 0.2 && background.b < 0.2);
    }
}
