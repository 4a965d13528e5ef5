use super::StatementUploader;
use crate::upload::{SelectedFile, ERROR_PREFIX};
use crate::utils::format_size;
use eframe::egui::{self, Align, Color32, Layout, RichText};
use rfd::FileDialog;

const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);
const ERROR_RED: Color32 = Color32::from_rgb(220, 50, 50);

impl StatementUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Upload Excel Statements");
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("Statements are posted to the backend for formatting")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(20.0);
                self.render_drop_zone(ui);
                ui.add_space(12.0);
                self.render_file_list(ui);
                ui.add_space(18.0);
                self.render_submit_button(ui);
                self.render_status_message(ui);
                ui.add_space(20.0);
            });
        });
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui) {
        let dragging = self.controller.is_dragging();
        let stroke_color = if dragging {
            ACCENT
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke.color
        };
        let fill = if dragging {
            ui.visuals().extreme_bg_color
        } else {
            ui.visuals().faint_bg_color
        };

        egui::Frame::none()
            .stroke(egui::Stroke::new(2.0, stroke_color))
            .fill(fill)
            .rounding(10.0)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label("Drag & drop Excel files here");
                    ui.label(
                        RichText::new("(.xlsx only)")
                            .small()
                            .color(ui.visuals().text_color().gamma_multiply(0.6)),
                    );
                    ui.add_space(8.0);
                    ui.label(
                        RichText::new("OR")
                            .small()
                            .color(ui.visuals().text_color().gamma_multiply(0.5)),
                    );
                    ui.add_space(8.0);
                    if ui.button("📁 Choose Files").clicked() {
                        if let Some(paths) = FileDialog::new()
                            .add_filter("Excel workbook", &["xlsx"])
                            .pick_files()
                        {
                            let candidates =
                                paths.into_iter().map(SelectedFile::from_path).collect();
                            self.controller.add_files(candidates);
                        }
                    }
                });
            });
    }

    fn render_file_list(&mut self, ui: &mut egui::Ui) {
        if self.controller.files().is_empty() {
            return;
        }

        ui.label("Selected files:");
        ui.add_space(4.0);

        let mut remove_index = None;
        egui::Frame::none()
            .fill(ui.style().visuals.extreme_bg_color)
            .rounding(6.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                for (index, file) in self.controller.files().iter().enumerate() {
                    ui.horizontal(|ui| {
                        ui.label(&file.name);
                        if let Some(size) = file.size {
                            ui.label(
                                RichText::new(format_size(size))
                                    .small()
                                    .color(ui.visuals().text_color().gamma_multiply(0.6)),
                            );
                        }
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if ui.button("✕").clicked() {
                                remove_index = Some(index);
                            }
                        });
                    });
                    ui.add_space(2.0);
                }
            });

        if let Some(index) = remove_index {
            self.controller.remove_file(index);
        }
    }

    fn render_submit_button(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let uploading = self.controller.is_uploading();
            let label = if uploading {
                "⏳ Processing..."
            } else {
                "📤 Process"
            };

            ui.add_enabled_ui(!uploading, |ui| {
                let button = egui::Button::new(label).min_size(egui::vec2(180.0, 36.0));
                if ui.add(button).clicked() {
                    self.controller.submit();
                }
            });
        });
    }

    fn render_status_message(&self, ui: &mut egui::Ui) {
        let message = self.controller.message();
        if message.is_empty() {
            return;
        }

        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            if message.starts_with(ERROR_PREFIX) {
                ui.colored_label(ERROR_RED, message);
            } else {
                ui.label(message);
            }
        });
    }
}
