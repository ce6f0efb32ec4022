// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation list panel.
//!
//! This module lists the boxes saved on the current image with their
//! species and image-space coordinates, and offers delete and undo/redo.

use crate::session::AnnotationSession;

/// Result of properties panel interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertiesAction {
    None,
    DeleteAnnotation(usize),
    Undo,
    Redo,
}

/// Display the annotation list for the current image.
pub fn show(ui: &mut egui::Ui, session: Option<&AnnotationSession>) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Annotations");
    ui.separator();

    let Some(session) = session else {
        ui.label(egui::RichText::new("No image loaded").weak());
        return action;
    };

    ui.label(egui::RichText::new(&session.image().id).strong());
    ui.label(format!(
        "{} x {} px",
        session.image().width,
        session.image().height
    ));
    ui.separator();

    ui.horizontal(|ui| {
        let history = session.history();
        if ui
            .add_enabled(history.can_undo(), egui::Button::new("⟲ Undo"))
            .clicked()
        {
            action = PropertiesAction::Undo;
        }
        if ui
            .add_enabled(history.can_redo(), egui::Button::new("⟳ Redo"))
            .clicked()
        {
            action = PropertiesAction::Redo;
        }
    });
    let history = session.history();
    if !history.is_empty() {
        ui.label(
            egui::RichText::new(format!(
                "History {}/{}",
                history.index().map_or(0, |i| i + 1),
                history.len()
            ))
            .small()
            .weak(),
        );
    }
    ui.separator();

    if session.annotations().is_empty() {
        ui.label(egui::RichText::new("No boxes saved yet").weak());
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (idx, annotation) in session.annotations().iter().enumerate() {
            let b = &annotation.bbox;
            ui.horizontal(|ui| {
                ui.label(format!("{}. {}", idx + 1, annotation.species));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                        action = PropertiesAction::DeleteAnnotation(idx);
                    }
                });
            });
            ui.label(
                egui::RichText::new(format!(
                    "[{:.0}, {:.0}, {:.0}, {:.0}]",
                    b.x1, b.y1, b.x2, b.y2
                ))
                .monospace()
                .weak(),
            );
        }
    });

    action
}
