//! Bottom status bar: save state, notices and the store location.

use super::super::*;
use eframe::egui;

impl MdvieApp {
    pub(crate) fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if let Some(session) = &self.session {
                        let (label, color) = if session.is_dirty() {
                            ("Unsaved changes", COLOR_WARNING)
                        } else {
                            ("All changes saved", COLOR_TEXT_SECONDARY)
                        };
                        ui.label(egui::RichText::new(label).small().color(color));
                        ui.separator();
                    }
                    if let Some(text) = self.status_text() {
                        ui.label(egui::RichText::new(text).small().color(COLOR_WARNING));
                        ui.separator();
                    }
                    let location = if self.config.ephemeral {
                        "in-memory (not persisted)".to_string()
                    } else {
                        self.config.db_path.clone()
                    };
                    ui.label(egui::RichText::new("DB:").small().color(COLOR_TEXT_MUTED));
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(location)
                                .small()
                                .monospace()
                                .color(COLOR_TEXT_SECONDARY),
                        )
                        .truncate(),
                    );
                    if let Some(session) = &self.session {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                egui::RichText::new(format!(
                                    "{} chars",
                                    session.text().chars().count()
                                ))
                                .small()
                                .color(COLOR_TEXT_MUTED),
                            );
                        });
                    }
                });
            });
    }
}
