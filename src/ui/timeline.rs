// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image sequence navigation bar.

use crate::io::media::{image_id, ImageSequence};
use crate::models::project::ProjectData;

/// Display the position in the sequence. Returns `true` when Next was clicked.
pub fn show(ui: &mut egui::Ui, sequence: &ImageSequence, project: &ProjectData) -> bool {
    let mut next = false;

    ui.horizontal(|ui| {
        match sequence.current() {
            Some(path) => {
                ui.label(format!(
                    "Image {} / {}",
                    sequence.position() + 1,
                    sequence.len()
                ));
                ui.separator();
                ui.label(image_id(path));
            }
            None => {
                ui.label("No images");
            }
        }

        ui.separator();
        ui.label(format!(
            "Saved this run: {} boxes on {} images",
            project.records.len(),
            project.annotated_image_count()
        ));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let has_next = sequence.position() + 1 < sequence.len();
            if ui
                .add_enabled(has_next, egui::Button::new("Next ▶ (N)"))
                .clicked()
            {
                next = true;
            }
        });
    });

    next
}
