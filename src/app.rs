// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the image sequence, the editing session for
//! the current image and the persistence sink, and routes keyboard and
//! pointer input between them.

use crate::config::AnnotatorConfig;
use crate::io::media::{image_id, load_image, ImageSequence, LoadedImage};
use crate::io::serialization::{self, AnnotationSink};
use crate::models::project::{ImageInfo, ProjectData};
use crate::session::AnnotationSession;
use crate::ui::{canvas, properties, timeline, toolbar};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};

/// Result of background image loading operation.
struct LoadedFrame {
    info: ImageInfo,
    image: LoadedImage,
}

/// Main application state.
pub struct RiistaApp {
    config: AnnotatorConfig,

    /// Images of the open folder
    sequence: ImageSequence,

    /// Editing state of the current image
    session: Option<AnnotationSession>,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Species label applied on save
    species: String,

    /// Where saved annotations are sent
    sink: Box<dyn AnnotationSink>,

    /// Every record acknowledged by the sink this run
    project: ProjectData,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedFrame>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Why the current image could not be shown
    load_error: Option<String>,

    /// Shift state of the previous frame
    modifier_was_held: bool,
}

impl RiistaApp {
    /// Create a new application instance.
    pub fn new(
        config: AnnotatorConfig,
        sequence: Option<ImageSequence>,
        sink: Box<dyn AnnotationSink>,
        species: String,
    ) -> Self {
        let mut app = Self {
            config,
            sequence: ImageSequence::default(),
            session: None,
            image_texture: None,
            species,
            sink,
            project: ProjectData::default(),
            image_loader: None,
            loading_message: None,
            load_error: None,
            modifier_was_held: false,
        };
        if let Some(sequence) = sequence {
            app.set_sequence(sequence);
        }
        app
    }

    fn set_sequence(&mut self, sequence: ImageSequence) {
        self.project = ProjectData::new(sequence.dir().display().to_string());
        self.sequence = sequence;
        self.session = None;
        self.image_texture = None;
        self.load_current();
    }

    fn open_folder(&mut self, dir: &Path) {
        match ImageSequence::from_dir(dir) {
            Ok(sequence) if sequence.is_empty() => {
                log::warn!("No images found in {}", dir.display());
            }
            Ok(sequence) => self.set_sequence(sequence),
            Err(e) => log::error!("{:#}", e),
        }
    }

    /// Decode the current image on a background thread.
    fn load_current(&mut self) {
        let Some(path) = self.sequence.current().map(Path::to_path_buf) else {
            return;
        };
        let index = self.sequence.position();

        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some(format!("Loading {}...", image_id(&path)));
        self.load_error = None;

        std::thread::spawn(move || {
            let result = load_image(&path).map(|image| {
                log::info!(
                    "Loaded image: {} ({}x{})",
                    path.display(),
                    image.width,
                    image.height
                );
                LoadedFrame {
                    info: ImageInfo {
                        id: image_id(&path),
                        index,
                        width: image.width,
                        height: image.height,
                    },
                    image,
                }
            });
            let _ = sender.send(result);
        });
    }

    /// Advance to the next image. The new image gets a fresh session.
    fn next_image(&mut self) {
        if self.image_loader.is_some() {
            return;
        }
        if self.sequence.advance().is_some() {
            self.load_current();
        } else {
            log::info!("Already at the last image");
        }
    }

    /// Commit the pending box and hand it to the sink.
    fn save_current(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(record) = session.save(&self.species) else {
            return;
        };

        match self.sink.save(&record) {
            Ok(()) => self.project.records.push(record),
            Err(e) => log::error!("Failed to save annotation: {:#}", e),
        }
    }

    /// Export all annotations saved this run.
    fn export_annotations(&self, path: PathBuf) {
        match serialization::export(&self.project, &path) {
            Ok(()) => log::info!(
                "Exported {} annotations to {}",
                self.project.records.len(),
                path.display()
            ),
            Err(e) => log::error!("Failed to export annotations: {:#}", e),
        }
    }

    fn apply_properties_action(&mut self, action: properties::PropertiesAction) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match action {
            properties::PropertiesAction::DeleteAnnotation(idx) => {
                session.remove_annotation(idx);
            }
            properties::PropertiesAction::Undo => {
                session.undo();
            }
            properties::PropertiesAction::Redo => {
                session.redo();
            }
            properties::PropertiesAction::None => {}
        }
    }

    fn poll_loader(&mut self, ctx: &egui::Context) {
        let Some(ref receiver) = self.image_loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.image_loader = None;
        self.loading_message = None;

        match result {
            Ok(frame) => {
                // Create egui texture from the loaded image data
                let size = [frame.image.width as usize, frame.image.height as usize];
                let color_image =
                    egui::ColorImage::from_rgba_unmultiplied(size, &frame.image.pixels);
                self.image_texture = Some(ctx.load_texture(
                    "current_image",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
                self.session = Some(AnnotationSession::new(frame.info, &self.config));
            }
            Err(e) => {
                // The previous image must not stay editable under the new cursor
                log::error!("Failed to load image: {:#}", e);
                self.session = None;
                self.image_texture = None;
                self.load_error = Some(format!("{:#}", e));
            }
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        // Single-key shortcuts stay off while a text field has focus
        if ctx.wants_keyboard_input() {
            return;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.save_current();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::N) && !i.modifiers.command) {
            self.next_image();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::C) && !i.modifiers.command) {
            if let Some(session) = self.session.as_mut() {
                session.clear_current();
            }
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };

        // Handle undo (Ctrl+Z)
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift)
        {
            session.undo();
        }

        // Handle redo (Ctrl+Shift+Z or Ctrl+Y)
        if ctx.input(|i| {
            (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        }) {
            session.redo();
        }
    }
}

impl eframe::App for RiistaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Folder...").clicked() {
                        if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                            self.open_folder(&dir);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.menu_button("Export Annotations", |ui| {
                        if ui.button("Export as YAML...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("YAML", &["yaml", "yml"])
                                .set_file_name("annotations.yaml")
                                .save_file()
                            {
                                self.export_annotations(path);
                            }
                            ui.close_menu();
                        }
                        if ui.button("Export as JSON...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .set_file_name("annotations.json")
                                .save_file()
                            {
                                self.export_annotations(path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    let (can_undo, can_redo) = self
                        .session
                        .as_ref()
                        .map(|s| (s.history().can_undo(), s.history().can_redo()))
                        .unwrap_or((false, false));

                    if ui
                        .add_enabled(can_undo, egui::Button::new("Undo (Ctrl+Z)"))
                        .clicked()
                    {
                        self.apply_properties_action(properties::PropertiesAction::Undo);
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(can_redo, egui::Button::new("Redo (Ctrl+Shift+Z)"))
                        .clicked()
                    {
                        self.apply_properties_action(properties::PropertiesAction::Redo);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Clear Current Box (C)").clicked() {
                        if let Some(session) = self.session.as_mut() {
                            session.clear_current();
                        }
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        let zoom_indicator = self.session.as_ref().map(|s| s.view().indicator());
        let label_submitted = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.species, &self.config.species, zoom_indicator)
            })
            .inner;
        if label_submitted {
            self.save_current();
        }

        // Sequence bar (bottom)
        let next_clicked = egui::TopBottomPanel::bottom("timeline")
            .show(ctx, |ui| {
                timeline::show(ui, &self.sequence, &self.project)
            })
            .inner;
        if next_clicked {
            self.next_image();
        }

        // Annotation list (right side)
        let properties_action = egui::SidePanel::right("properties")
            .default_width(250.0)
            .show(ctx, |ui| properties::show(ui, self.session.as_ref()))
            .inner;
        self.apply_properties_action(properties_action);

        self.handle_keyboard(ctx);

        // Main canvas (center)
        let canvas_output = egui::CentralPanel::default()
            .show(ctx, |ui| {
                // Show loading overlay if loading
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    None
                } else if let Some(ref error) = self.load_error {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Could not load this image:\n{}\n\nPress N to skip it.",
                                error
                            ))
                            .size(16.0)
                            .color(egui::Color32::from_rgb(230, 120, 120)),
                        );
                    });
                    None
                } else {
                    Some(canvas::show(ui, self.session.as_ref(), &self.image_texture))
                }
            })
            .inner;

        let modifier_held = ctx.input(|i| i.modifiers.shift);
        if let Some(session) = self.session.as_mut() {
            if self.modifier_was_held && !modifier_held {
                session.modifier_released();
            }

            if let Some(canvas::CanvasOutput {
                events,
                geometry: Some(geometry),
            }) = canvas_output
            {
                let mut redraw = false;
                for event in events {
                    redraw |= session.dispatch(event, modifier_held, &geometry);
                }
                if redraw {
                    ctx.request_repaint();
                }
            }
        }
        self.modifier_was_held = modifier_held;
    }
}
