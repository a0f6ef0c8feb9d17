//! Settings page: editor font size and git identity.

use super::super::*;
use eframe::egui::{self, RichText};
use mdvie_core::{MAX_FONT_SIZE, MIN_FONT_SIZE};

impl MdvieApp {
    pub(crate) fn render_settings_panel(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let mut font_change: Option<u8> = None;
        let mut submit_git = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Settings");
            ui.add_space(12.0);

            ui.label(RichText::new("Editor").strong());
            let mut size = self.settings.font_size;
            let response = ui.add(
                egui::Slider::new(&mut size, MIN_FONT_SIZE..=MAX_FONT_SIZE)
                    .text("Font size")
                    .suffix(" px"),
            );
            if response.changed() {
                font_change = Some(size);
            }
            ui.label(
                RichText::new("# The quick brown fox")
                    .monospace()
                    .size(f32::from(size))
                    .color(COLOR_TEXT_SECONDARY),
            );

            ui.add_space(12.0);
            ui.separator();
            ui.label(RichText::new("Git identity").strong());
            egui::Grid::new("git_identity")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Username");
                    ui.text_edit_singleline(&mut self.git_username_draft);
                    ui.end_row();
                    ui.label("Email");
                    ui.text_edit_singleline(&mut self.git_email_draft);
                    ui.end_row();
                });
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    submit_git = true;
                }
                if self.git_saved_until.is_some_and(|until| now < until) {
                    ui.label(RichText::new("Saved").color(COLOR_SUCCESS));
                }
            });
        });

        if let Some(size) = font_change {
            self.set_font_size(i64::from(size));
        }
        if submit_git {
            self.submit_git_identity(now);
        }
    }
}
