//! Theme constants and one-time style application.

use super::MdvieApp;
use eframe::egui::{
    self, style::WidgetVisuals, Color32, CornerRadius, FontFamily, FontId, Margin, Stroke,
    TextStyle, Visuals,
};

pub(super) const COLOR_BG_PRIMARY: Color32 = Color32::from_rgb(0xff, 0xff, 0xff);
pub(super) const COLOR_BG_SECONDARY: Color32 = Color32::from_rgb(0xf6, 0xf8, 0xfa);
pub(super) const COLOR_BG_TERTIARY: Color32 = Color32::from_rgb(0xea, 0xee, 0xf2);
pub(super) const COLOR_TEXT_PRIMARY: Color32 = Color32::from_rgb(0x1f, 0x23, 0x28);
pub(super) const COLOR_TEXT_SECONDARY: Color32 = Color32::from_rgb(0x57, 0x60, 0x6a);
pub(super) const COLOR_TEXT_MUTED: Color32 = Color32::from_rgb(0x8c, 0x95, 0x9f);
pub(super) const COLOR_ACCENT: Color32 = Color32::from_rgb(0x25, 0x63, 0xeb);
pub(super) const COLOR_ACCENT_HOVER: Color32 = Color32::from_rgb(0x1d, 0x4e, 0xd8);
pub(super) const COLOR_SUCCESS: Color32 = Color32::from_rgb(0x16, 0xa3, 0x4a);
pub(super) const COLOR_WARNING: Color32 = Color32::from_rgb(0xb4, 0x53, 0x09);
pub(super) const COLOR_DANGER: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26);
pub(super) const COLOR_BORDER: Color32 = Color32::from_rgb(0xd0, 0xd7, 0xde);
pub(super) const COLOR_CODE_BG: Color32 = Color32::from_rgb(0xf3, 0xf4, 0xf6);

fn widget(bg: Color32, stroke: Color32, fg: Color32, expansion: f32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: bg,
        weak_bg_fill: bg,
        bg_stroke: Stroke::new(1.0, stroke),
        corner_radius: CornerRadius::same(6),
        fg_stroke: Stroke::new(1.0, fg),
        expansion,
    }
}

impl MdvieApp {
    pub(super) fn ensure_style(&mut self, ctx: &egui::Context) {
        if self.style_applied {
            return;
        }

        let mut style = (*ctx.style()).clone();
        style.visuals = Visuals::light();
        style.visuals.override_text_color = Some(COLOR_TEXT_PRIMARY);
        style.visuals.window_fill = COLOR_BG_PRIMARY;
        style.visuals.panel_fill = COLOR_BG_PRIMARY;
        style.visuals.extreme_bg_color = COLOR_BG_PRIMARY;
        style.visuals.faint_bg_color = COLOR_BG_SECONDARY;
        style.visuals.window_stroke = Stroke::new(1.0, COLOR_BORDER);
        style.visuals.hyperlink_color = COLOR_ACCENT;
        style.visuals.code_bg_color = COLOR_CODE_BG;

        style.visuals.widgets.noninteractive =
            widget(COLOR_BG_PRIMARY, COLOR_BORDER, COLOR_TEXT_SECONDARY, 0.0);
        style.visuals.widgets.inactive =
            widget(COLOR_BG_SECONDARY, COLOR_BORDER, COLOR_TEXT_PRIMARY, 0.0);
        style.visuals.widgets.hovered =
            widget(COLOR_BG_TERTIARY, COLOR_ACCENT_HOVER, COLOR_TEXT_PRIMARY, 0.5);
        style.visuals.widgets.active = widget(COLOR_ACCENT, COLOR_ACCENT, Color32::WHITE, 0.5);
        style.visuals.widgets.open = widget(COLOR_ACCENT, COLOR_ACCENT, Color32::WHITE, 0.0);

        style.spacing.window_margin = Margin::same(12);
        style.spacing.button_padding = egui::vec2(10.0, 6.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.interact_size.y = 28.0;

        style.text_styles.insert(
            TextStyle::Heading,
            FontId::new(22.0, FontFamily::Proportional),
        );
        style
            .text_styles
            .insert(TextStyle::Body, FontId::new(15.0, FontFamily::Proportional));
        style.text_styles.insert(
            TextStyle::Small,
            FontId::new(12.0, FontFamily::Proportional),
        );

        ctx.set_style(style);
        self.style_applied = true;
    }
}
