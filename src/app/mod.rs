mod ui;

use crate::upload::{SelectedFile, UploadController};
use eframe::{egui, App};

pub struct StatementUploader {
    controller: UploadController,
}

impl StatementUploader {
    pub fn new(_cc: &eframe::CreationContext<'_>, controller: UploadController) -> Self {
        Self { controller }
    }

    // Window-level drag-and-drop: egui reports hovered files while the
    // cursor is over the window and hands over dropped files on release.
    // The windowing layer already suppresses the platform's default drop
    // handling, so this only mirrors the input into the controller.
    fn forward_drag_input(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if !dropped.is_empty() {
            let candidates = dropped.into_iter().map(dropped_to_selected).collect();
            self.controller.drop_files(candidates);
            return;
        }

        if ctx.input(|i| !i.raw.hovered_files.is_empty()) {
            self.controller.drag_over();
        } else {
            self.controller.drag_leave();
        }
    }
}

impl App for StatementUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.forward_drag_input(ctx);

        let changed = self.controller.poll();
        if changed || self.controller.is_uploading() {
            ctx.request_repaint();
        }

        self.render(ctx);
    }
}

fn dropped_to_selected(file: egui::DroppedFile) -> SelectedFile {
    if let Some(path) = file.path {
        SelectedFile::from_path(path)
    } else if let Some(bytes) = file.bytes {
        SelectedFile::from_bytes(file.name, bytes)
    } else {
        SelectedFile::from_bytes(file.name, Vec::<u8>::new())
    }
}
