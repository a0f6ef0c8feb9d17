//! Left sidebar: file list, per-row actions and page links.

use super::super::*;
use eframe::egui::{self, RichText};
use mdvie_core::registry::RenameKey;

enum SidebarAction {
    New,
    Open(Route),
    ToggleMenu(String),
    StartRename(String),
    Download(String),
    Delete(String),
    Rename(RenameKey),
}

impl MdvieApp {
    pub(crate) fn render_sidebar(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let mut actions: Vec<SidebarAction> = Vec::new();
        egui::SidePanel::left("sidebar")
            .default_width(SIDEBAR_WIDTH)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("MDVie").color(COLOR_ACCENT));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("+").on_hover_text("New file").clicked() {
                            actions.push(SidebarAction::New);
                        }
                    });
                });
                ui.label(
                    RichText::new(format!("Files ({})", self.registry.files().len()))
                        .small()
                        .color(COLOR_TEXT_SECONDARY),
                );
                ui.separator();

                let current = self.current_file().map(str::to_string);
                let open_menu = self.registry.open_menu().map(str::to_string);
                let editing = self
                    .registry
                    .rename_draft()
                    .map(|draft| draft.original.clone());
                let files = self.registry.files().to_vec();
                let list_height = (ui.available_height() - 72.0).max(80.0);
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .max_height(list_height)
                    .show(ui, |ui| {
                        for name in &files {
                            if editing.as_deref() == Some(name.as_str()) {
                                if let Some(text) = self.registry.rename_text_mut() {
                                    let response = ui.add(
                                        egui::TextEdit::singleline(text)
                                            .id(egui::Id::new(("rename_input", name.as_str())))
                                            .desired_width(f32::INFINITY),
                                    );
                                    response.request_focus();
                                    let (enter, escape) = ui.input(|input| {
                                        (
                                            input.key_pressed(egui::Key::Enter),
                                            input.key_pressed(egui::Key::Escape),
                                        )
                                    });
                                    if enter {
                                        actions.push(SidebarAction::Rename(RenameKey::Enter));
                                    } else if escape {
                                        actions.push(SidebarAction::Rename(RenameKey::Escape));
                                    }
                                }
                                continue;
                            }

                            ui.horizontal(|ui| {
                                let selected = current.as_deref() == Some(name.as_str());
                                if ui
                                    .small_button("\u{2026}")
                                    .on_hover_text("File actions")
                                    .clicked()
                                {
                                    self.menu_clicked = true;
                                    actions.push(SidebarAction::ToggleMenu(name.clone()));
                                }
                                if ui.selectable_label(selected, name.as_str()).clicked() {
                                    actions.push(SidebarAction::Open(Route::Editor(name.clone())));
                                }
                            });
                            if open_menu.as_deref() == Some(name.as_str()) {
                                ui.indent(("file_menu", name.as_str()), |ui| {
                                    ui.horizontal(|ui| {
                                        if ui.small_button("Rename").clicked() {
                                            self.menu_clicked = true;
                                            actions.push(SidebarAction::StartRename(name.clone()));
                                        }
                                        if ui.small_button("Download").clicked() {
                                            self.menu_clicked = true;
                                            actions.push(SidebarAction::Download(name.clone()));
                                        }
                                        if ui
                                            .small_button(RichText::new("Delete").color(COLOR_DANGER))
                                            .clicked()
                                        {
                                            self.menu_clicked = true;
                                            actions.push(SidebarAction::Delete(name.clone()));
                                        }
                                    });
                                });
                            }
                        }
                    });

                ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                    let on_settings = self.route == Route::Settings;
                    if ui.selectable_label(on_settings, "Settings").clicked() {
                        actions.push(SidebarAction::Open(Route::Settings));
                    }
                    let on_template = current.as_deref() == Some(BOOTSTRAP_FILE_NAME);
                    if ui.selectable_label(on_template, "Template").clicked() {
                        actions.push(SidebarAction::Open(Route::Editor(
                            BOOTSTRAP_FILE_NAME.to_string(),
                        )));
                    }
                    ui.separator();
                });
            });

        for action in actions {
            match action {
                SidebarAction::New => self.create_file(now),
                SidebarAction::Open(route) => self.navigate(route, now),
                SidebarAction::ToggleMenu(name) => self.registry.toggle_menu(&name),
                SidebarAction::StartRename(name) => self.registry.start_rename(&name),
                SidebarAction::Download(name) => self.download_file(&name),
                SidebarAction::Delete(name) => self.delete_file(&name, now),
                SidebarAction::Rename(key) => self.handle_rename_key(key, now),
            }
        }
    }
}
