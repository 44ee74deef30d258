// LinkSphere - ui/theme.rs
//
// Light/dark colour schemes and layout constants.
//
// The active theme is an explicit value owned by AppState. Views receive the
// derived `Palette` as a parameter instead of reading shared style state.

use crate::core::model::{ShortcutKind, Theme};
use egui::Color32;

/// Colours used by LinkSphere's own widgets on top of egui's visuals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub accent: Color32,
    pub muted_text: Color32,
    pub error_text: Color32,
    pub status_bg: Color32,
    pub status_text: Color32,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                accent: Color32::from_rgb(37, 99, 235),        // Blue 600
                muted_text: Color32::from_rgb(107, 114, 128),  // Gray 500
                error_text: Color32::from_rgb(185, 28, 28),    // Red 700
                status_bg: Color32::from_rgb(229, 231, 235),   // Gray 200
                status_text: Color32::from_rgb(31, 41, 55),    // Gray 800
            },
            Theme::Dark => Self {
                accent: Color32::from_rgb(96, 165, 250),       // Blue 400
                muted_text: Color32::from_rgb(156, 163, 175),  // Gray 400
                error_text: Color32::from_rgb(248, 113, 113),  // Red 400
                status_bg: Color32::from_rgb(31, 41, 55),      // Gray 800
                status_text: Color32::from_rgb(209, 213, 219), // Gray 300
            },
        }
    }

    /// Colour of the kind badge in the shortcut table.
    pub fn kind_colour(&self, kind: ShortcutKind) -> Color32 {
        match kind {
            ShortcutKind::Application => self.accent,
            ShortcutKind::Folder => Color32::from_rgb(217, 119, 6), // Amber 600
            ShortcutKind::File => self.muted_text,
        }
    }
}

/// Install `theme` and `font_size` on the egui context.
///
/// The theme preference is pinned so egui does not follow the OS theme.
pub fn apply(ctx: &egui::Context, theme: Theme, font_size: f32) {
    ctx.set_theme(match theme {
        Theme::Light => egui::Theme::Light,
        Theme::Dark => egui::Theme::Dark,
    });
    ctx.all_styles_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            font_id.size = match text_style {
                egui::TextStyle::Heading => font_size * 1.4,
                egui::TextStyle::Small => font_size * 0.8,
                egui::TextStyle::Monospace => font_size * 0.95,
                _ => font_size,
            };
        }
    });
    tracing::debug!(theme = theme.menu_label(), font_size, "Theme applied");
}

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 250.0;
pub const ROW_HEIGHT: f32 = 22.0;
pub const DIALOG_WIDTH: f32 = 400.0;
pub const SCAN_RESULTS_HEIGHT: f32 = 320.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ_per_theme() {
        let light = Palette::for_theme(Theme::Light);
        let dark = Palette::for_theme(Theme::Dark);
        assert_ne!(light, dark);
        assert_eq!(light.kind_colour(ShortcutKind::Application), light.accent);
    }
}
