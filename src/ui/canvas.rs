// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and box annotation.
//!
//! This module redraws the current image, the committed boxes and the box
//! being drawn every frame, and translates egui pointer input into
//! [`PointerEvent`]s for the session to dispatch.

use crate::input::PointerEvent;
use crate::models::annotation::{Annotation, BBox, Point};
use crate::models::view::ViewTransform;
use crate::session::AnnotationSession;
use crate::util::geometry::{fit_to_area, CanvasGeometry};

const BOX_COLOR: egui::Color32 = egui::Color32::YELLOW;
const DRAFT_COLOR: egui::Color32 = egui::Color32::LIGHT_BLUE;
const CHIP_TEXT_COLOR: egui::Color32 = egui::Color32::BLACK;

/// Result of canvas interaction.
pub struct CanvasOutput {
    /// Pointer input, relative to the canvas origin
    pub events: Vec<PointerEvent>,
    /// Geometry the events were captured with
    pub geometry: Option<CanvasGeometry>,
}

fn to_point(pos: egui::Pos2, origin: egui::Pos2) -> Point {
    Point::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64)
}

/// Screen rectangle of an image-space box.
pub fn box_rect(
    geometry: &CanvasGeometry,
    view: &ViewTransform,
    bbox: &BBox,
    origin: egui::Pos2,
) -> egui::Rect {
    let (min, max) = geometry.box_to_screen(view, &bbox.normalized());
    egui::Rect::from_min_max(
        origin + egui::vec2(min.x as f32, min.y as f32),
        origin + egui::vec2(max.x as f32, max.y as f32),
    )
}

/// Label chip sitting on top of a box, left-aligned with it.
pub fn chip_rect(box_rect: egui::Rect, text_size: egui::Vec2, padding: egui::Vec2) -> egui::Rect {
    let size = text_size + padding * 2.0;
    egui::Rect::from_min_size(box_rect.left_top() - egui::vec2(0.0, size.y), size)
}

/// Display the main canvas area and collect pointer input.
pub fn show(
    ui: &mut egui::Ui,
    session: Option<&AnnotationSession>,
    image_texture: &Option<egui::TextureHandle>,
) -> CanvasOutput {
    let mut output = CanvasOutput {
        events: Vec::new(),
        geometry: None,
    };
    // Set background color
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let (Some(session), Some(texture)) = (session, image_texture) else {
            show_placeholder(ui, session.is_some());
            return;
        };

        let canvas_rect = ui.available_rect_before_wrap();
        let image = session.image();
        let (fit_offset, display_size) = fit_to_area(
            (image.width, image.height),
            (canvas_rect.width() as f64, canvas_rect.height() as f64),
        );
        // Screen space starts at the top-left of the fitted image
        let origin = canvas_rect.min + egui::vec2(fit_offset.x as f32, fit_offset.y as f32);
        let geometry = CanvasGeometry::new((image.width, image.height), display_size);
        let view = session.view();

        let response = ui.allocate_rect(canvas_rect, egui::Sense::click_and_drag());
        let painter = ui.painter_at(canvas_rect);

        // Translate by the pan offset, then scale by the zoom
        let image_rect = box_rect(
            &geometry,
            view,
            &BBox::new(0.0, 0.0, image.width as f64, image.height as f64),
            origin,
        );
        painter.image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        for annotation in session.annotations() {
            draw_annotation(&painter, annotation, &geometry, view, origin);
        }

        if let Some(bbox) = session.current_box() {
            draw_draft(&painter, &bbox, &geometry, view, origin);
        }

        output.events = collect_events(ui, &response, origin);
        output.geometry = Some(geometry);
    });

    output
}

/// Translate this frame's pointer input on the canvas into events.
fn collect_events(
    ui: &egui::Ui,
    response: &egui::Response,
    origin: egui::Pos2,
) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    let button = egui::PointerButton::Primary;

    if response.drag_started_by(button) {
        // Drags start after a small threshold, so use where the press began
        let start = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos());
        if let Some(pos) = start {
            events.push(PointerEvent::Down(to_point(pos, origin)));
        }
    }

    if response.dragged_by(button) {
        if let Some(pos) = response.interact_pointer_pos() {
            events.push(PointerEvent::Move(to_point(pos, origin)));
        }
    }

    if response.drag_stopped_by(button) {
        let end = response
            .interact_pointer_pos()
            .or_else(|| ui.input(|i| i.pointer.latest_pos()));
        if let Some(pos) = end {
            events.push(PointerEvent::Up(to_point(pos, origin)));
        }
    }

    if !response.contains_pointer() {
        events.push(PointerEvent::Leave);
    } else if let Some(pos) = response.hover_pos() {
        // Some backends turn Shift+wheel into horizontal scrolling
        let delta = ui.input(|i| i.raw_scroll_delta.x + i.raw_scroll_delta.y);
        if delta != 0.0 {
            events.push(PointerEvent::Wheel {
                pos: to_point(pos, origin),
                delta: delta as f64,
            });
        }
    }

    events
}

/// Draw a committed annotation with its species chip.
fn draw_annotation(
    painter: &egui::Painter,
    annotation: &Annotation,
    geometry: &CanvasGeometry,
    view: &ViewTransform,
    origin: egui::Pos2,
) {
    let rect = box_rect(geometry, view, &annotation.bbox, origin);
    painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, BOX_COLOR));

    let galley = painter.layout_no_wrap(
        annotation.species.clone(),
        egui::FontId::proportional(13.0),
        CHIP_TEXT_COLOR,
    );
    let padding = egui::vec2(4.0, 2.0);
    let chip = chip_rect(rect, galley.size(), padding);
    painter.rect_filled(chip, 2.0, BOX_COLOR);
    painter.galley(chip.min + padding, galley, CHIP_TEXT_COLOR);
}

/// Draw the box being drawn or waiting to be saved.
fn draw_draft(
    painter: &egui::Painter,
    bbox: &BBox,
    geometry: &CanvasGeometry,
    view: &ViewTransform,
    origin: egui::Pos2,
) {
    let rect = box_rect(geometry, view, bbox, origin);
    let outline = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    painter.extend(egui::Shape::dashed_line(
        &outline,
        egui::Stroke::new(2.0, DRAFT_COLOR),
        6.0,
        4.0,
    ));
}

fn show_placeholder(ui: &mut egui::Ui, loading: bool) {
    if loading {
        ui.centered_and_justified(|ui| {
            ui.label(egui::RichText::new("Loading image...").color(egui::Color32::WHITE));
        });
        return;
    }

    // Show welcome message when no folder is loaded
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("RIISTA")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.label(
                egui::RichText::new("Trail-camera bounding-box annotator")
                    .size(14.0)
                    .color(egui::Color32::from_gray(150)),
            );
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("Open a folder of images to begin annotating")
                    .color(egui::Color32::from_gray(180)),
            );
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("File → Open Folder...")
                    .weak()
                    .color(egui::Color32::from_gray(130)),
            );
        });
    });
}
