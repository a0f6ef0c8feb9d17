//! Editor page: header, formatting toolbar and the edit/preview panes.

use super::super::*;
use super::preview::render_preview_pane;
use eframe::egui::{self, RichText};
use mdvie_core::keymap::{EditorCommand, SnippetKind};
use mdvie_core::ViewMode;

const TEXT_EDITOR_ID: &str = "markdown_editor_input";

fn render_text_pane(ui: &mut egui::Ui, session: &mut EditorSession, font_size: f32) {
    egui::ScrollArea::vertical()
        .id_salt("editor_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            let response = ui.add(
                egui::TextEdit::multiline(session.text_mut())
                    .id(egui::Id::new(TEXT_EDITOR_ID))
                    .font(egui::FontId::monospace(font_size))
                    .hint_text("Start writing markdown...")
                    .desired_width(f32::INFINITY)
                    .desired_rows(24)
                    .lock_focus(true),
            );
            if response.changed() {
                session.mark_edited();
            }
        });
}

impl MdvieApp {
    pub(crate) fn render_editor_panel(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let mut commands: Vec<EditorCommand> = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(session) = self.session.as_mut() else {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No file open").color(COLOR_TEXT_MUTED));
                });
                return;
            };

            ui.horizontal(|ui| {
                ui.heading(RichText::new(session.name()).color(COLOR_TEXT_PRIMARY));
                if session.show_save_ack(now) {
                    ui.label(RichText::new("Saved!").color(COLOR_SUCCESS));
                }
                if let Some(at) = session.last_saved_label() {
                    ui.label(
                        RichText::new(format!("Last saved {}", at))
                            .small()
                            .color(COLOR_TEXT_MUTED),
                    );
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Export").on_hover_text("Download as .md").clicked() {
                        commands.push(EditorCommand::Export);
                    }
                    if ui.button("Save").on_hover_text("Save (Ctrl+S)").clicked() {
                        commands.push(EditorCommand::Save);
                    }
                    ui.separator();
                    for mode in ViewMode::ALL.into_iter().rev() {
                        if ui
                            .selectable_label(session.view_mode() == mode, mode.label())
                            .on_hover_text(mode.tooltip())
                            .clicked()
                        {
                            commands.push(EditorCommand::SetView(mode));
                        }
                    }
                });
            });

            if session.view_mode().shows_editor() {
                ui.horizontal_wrapped(|ui| {
                    for kind in SnippetKind::ALL {
                        if ui
                            .small_button(kind.label())
                            .on_hover_text(kind.tooltip())
                            .clicked()
                        {
                            commands.push(EditorCommand::Insert(kind));
                        }
                    }
                });
            }
            ui.separator();

            let font_size = f32::from(session.font_size());
            match session.view_mode() {
                ViewMode::Edit => render_text_pane(ui, session, font_size),
                ViewMode::Preview => render_preview_pane(ui, session.text(), font_size),
                ViewMode::Split => {
                    ui.columns(2, |columns| {
                        render_text_pane(&mut columns[0], session, font_size);
                        render_preview_pane(&mut columns[1], session.text(), font_size);
                    });
                }
            }
        });

        for command in commands {
            self.run_editor_command(command, now);
        }
    }
}
