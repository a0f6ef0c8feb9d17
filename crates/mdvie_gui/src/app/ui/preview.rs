//! Preview pane: lays out parsed markdown blocks with egui widgets.

use super::super::*;
use eframe::egui::{self, RichText};
use mdvie_core::preview::{render_preview, InlineRun, ListMarker, PreviewBlock};

const HEADING_SCALE: [f32; 6] = [2.0, 1.6, 1.35, 1.2, 1.1, 1.0];
const LIST_INDENT: f32 = 18.0;

fn run_text(run: &InlineRun, size: f32) -> RichText {
    let mut text = RichText::new(&run.text).size(size);
    if run.code {
        text = text.monospace().background_color(COLOR_CODE_BG);
    }
    if run.strong {
        text = text.strong();
    }
    if run.emphasis || run.image {
        text = text.italics();
    }
    if run.strikethrough {
        text = text.strikethrough();
    }
    if run.underline {
        text = text.underline();
    }
    text
}

fn render_runs(ui: &mut egui::Ui, runs: &[InlineRun], size: f32) {
    ui.spacing_mut().item_spacing.x = 0.0;
    for run in runs {
        match &run.link {
            Some(url) if !run.image => {
                ui.hyperlink_to(run_text(run, size), url);
            }
            Some(url) => {
                ui.label(run_text(run, size).color(COLOR_TEXT_SECONDARY))
                    .on_hover_text(url);
            }
            None => {
                ui.label(run_text(run, size));
            }
        }
    }
}

fn render_block(ui: &mut egui::Ui, index: usize, block: &PreviewBlock, size: f32) {
    match block {
        PreviewBlock::Heading { level, runs } => {
            let scale = HEADING_SCALE[usize::from(level.saturating_sub(1)).min(5)];
            ui.add_space(size * 0.4);
            ui.horizontal_wrapped(|ui| {
                let strong: Vec<InlineRun> = runs
                    .iter()
                    .cloned()
                    .map(|run| InlineRun {
                        strong: true,
                        ..run
                    })
                    .collect();
                render_runs(ui, &strong, size * scale);
            });
            if *level <= 2 {
                ui.separator();
            }
        }
        PreviewBlock::Paragraph(runs) => {
            ui.horizontal_wrapped(|ui| render_runs(ui, runs, size));
        }
        PreviewBlock::ListItem {
            marker,
            depth,
            runs,
        } => {
            ui.horizontal_wrapped(|ui| {
                ui.add_space(LIST_INDENT * (*depth as f32 + 1.0));
                let marker = match marker {
                    ListMarker::Bullet => "\u{2022} ".to_string(),
                    ListMarker::Ordered(n) => format!("{}. ", n),
                };
                ui.label(RichText::new(marker).size(size).color(COLOR_TEXT_SECONDARY));
                render_runs(ui, runs, size);
            });
        }
        PreviewBlock::Quote(runs) => {
            egui::Frame::default()
                .fill(COLOR_BG_SECONDARY)
                .stroke(egui::Stroke::new(1.0, COLOR_BORDER))
                .inner_margin(egui::Margin::symmetric(10, 6))
                .corner_radius(egui::CornerRadius::same(4))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        let quoted: Vec<InlineRun> = runs
                            .iter()
                            .cloned()
                            .map(|run| InlineRun {
                                emphasis: true,
                                ..run
                            })
                            .collect();
                        render_runs(ui, &quoted, size);
                    });
                });
        }
        PreviewBlock::CodeBlock { language, text } => {
            egui::Frame::default()
                .fill(COLOR_CODE_BG)
                .inner_margin(egui::Margin::same(8))
                .corner_radius(egui::CornerRadius::same(4))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    if let Some(language) = language {
                        ui.label(RichText::new(language).small().color(COLOR_TEXT_MUTED));
                    }
                    ui.label(RichText::new(text).monospace().size(size * 0.95));
                });
        }
        PreviewBlock::Rule => {
            ui.separator();
        }
        PreviewBlock::Table { header, rows } => {
            egui::Grid::new(("preview_table", index))
                .striped(true)
                .show(ui, |ui| {
                    for cell in header {
                        ui.label(RichText::new(cell).size(size).strong());
                    }
                    ui.end_row();
                    for row in rows {
                        for cell in row {
                            ui.label(RichText::new(cell).size(size));
                        }
                        ui.end_row();
                    }
                });
        }
    }
}

/// Render `markdown` as a scrollable preview.
pub(super) fn render_preview_pane(ui: &mut egui::Ui, markdown: &str, font_size: f32) {
    let blocks = render_preview(markdown);
    egui::ScrollArea::vertical()
        .id_salt("preview_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            if blocks.is_empty() {
                ui.label(RichText::new("Nothing to preview").color(COLOR_TEXT_MUTED));
            }
            for (index, block) in blocks.iter().enumerate() {
                render_block(ui, index, block, font_size);
                ui.add_space(font_size * 0.5);
            }
        });
}
