// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the species label and zoom readout.

/// Text shown in the closed species picker.
fn picker_text(species: &str) -> &str {
    if species.trim().is_empty() {
        "(none)"
    } else {
        species
    }
}

/// Display the toolbar. Returns `true` when Enter was pressed in the label
/// field, which saves the current box.
pub fn show(
    ui: &mut egui::Ui,
    species: &mut String,
    choices: &[String],
    zoom_indicator: Option<String>,
) -> bool {
    let mut submitted = false;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Species:");

        egui::ComboBox::from_id_source("species_picker")
            .selected_text(picker_text(species.as_str()))
            .show_ui(ui, |ui| {
                for choice in choices {
                    ui.selectable_value(species, choice.clone(), choice.as_str());
                }
            });

        let response = ui.add(
            egui::TextEdit::singleline(species)
                .hint_text("type a label")
                .desired_width(140.0),
        );
        submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.separator();

        if let Some(text) = zoom_indicator {
            ui.label(text);
            ui.separator();
        }

        ui.label(
            egui::RichText::new(
                "Drag to draw · Enter save · C clear · N next · Shift+drag pan · Shift+wheel zoom",
            )
            .italics()
            .weak(),
        );
    });

    submitted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picker_text_placeholder() {
        assert_eq!(picker_text(""), "(none)");
        assert_eq!(picker_text("  "), "(none)");
        assert_eq!(picker_text("moose"), "moose");
    }
}
