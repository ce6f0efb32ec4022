// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editing session for a single image.
//!
//! The session owns everything that is scoped to one image: the view
//! transform, the box editor, the committed annotations and their undo
//! history. Loading another image replaces the whole session.

use crate::config::AnnotatorConfig;
use crate::editor::BoxEditor;
use crate::history::History;
use crate::input::{classify, DrawStep, Gesture, GestureContext, PanStep, PointerEvent};
use crate::models::annotation::{Annotation, BBox};
use crate::models::project::{AnnotationRecord, ImageInfo};
use crate::models::view::ViewTransform;
use crate::util::geometry::CanvasGeometry;

pub struct AnnotationSession {
    image: ImageInfo,
    view: ViewTransform,
    editor: BoxEditor,
    annotations: Vec<Annotation>,
    history: History,
}

impl AnnotationSession {
    /// Start a fresh session. The empty list is recorded so the first save
    /// can be undone.
    pub fn new(image: ImageInfo, config: &AnnotatorConfig) -> Self {
        let mut history = History::new(config.history_depth);
        history.record(&[]);
        Self {
            image,
            view: ViewTransform::new(config.zoom),
            editor: BoxEditor::new(config.min_box_size),
            annotations: Vec::new(),
            history,
        }
    }

    pub fn image(&self) -> &ImageInfo {
        &self.image
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Box being drawn or waiting to be saved.
    pub fn current_box(&self) -> Option<BBox> {
        self.editor.current_box()
    }

    pub fn has_pending_box(&self) -> bool {
        self.editor.pending().is_some()
    }

    /// Route a pointer event to the gesture it belongs to.
    ///
    /// Returns `true` when the canvas needs a redraw.
    pub fn dispatch(
        &mut self,
        event: PointerEvent,
        modifier_held: bool,
        geometry: &CanvasGeometry,
    ) -> bool {
        let ctx = GestureContext {
            modifier_held,
            drawing: self.editor.is_drawing(),
            panning: self.view.is_panning(),
        };

        match classify(event, ctx) {
            Gesture::Draw(step) => self.draw(step, geometry),
            Gesture::Pan(PanStep::Start(pos)) => {
                self.view.start_pan(pos);
                false
            }
            Gesture::Pan(PanStep::Move(pos)) => self.view.pan_to(pos),
            Gesture::Pan(PanStep::Stop) => {
                self.view.stop_pan();
                false
            }
            Gesture::Zoom { pos, direction } => {
                self.view.apply_zoom(pos, direction);
                true
            }
            Gesture::Ignore => false,
        }
    }

    fn draw(&mut self, step: DrawStep, geometry: &CanvasGeometry) -> bool {
        match step {
            DrawStep::Begin(pos) => {
                self.editor.begin(geometry.to_image_space(&self.view, pos));
                true
            }
            DrawStep::Extend(pos) => self
                .editor
                .update(geometry.to_image_space(&self.view, pos)),
            DrawStep::End(pos) => {
                if let Some(bbox) = self.editor.finish(geometry.to_image_space(&self.view, pos)) {
                    log::debug!(
                        "Box ready: [{:.1}, {:.1}, {:.1}, {:.1}]",
                        bbox.x1,
                        bbox.y1,
                        bbox.x2,
                        bbox.y2
                    );
                }
                true
            }
            DrawStep::Cancel => {
                log::debug!("Box cancelled, released with modifier held");
                self.editor.clear()
            }
        }
    }

    /// Releasing the modifier ends any pan in progress.
    pub fn modifier_released(&mut self) {
        if self.view.is_panning() {
            self.view.stop_pan();
        }
    }

    /// Commit the pending box with a species label.
    ///
    /// Returns the record to hand to the persistence sink, or `None` when
    /// there is no box to save or the label is blank.
    pub fn save(&mut self, species: &str) -> Option<AnnotationRecord> {
        let species = species.trim();
        if species.is_empty() {
            if self.has_pending_box() {
                log::warn!("Not saving box without a species label");
            }
            return None;
        }

        let bbox = self.editor.take_committed()?;
        let annotation = Annotation::new(bbox, species);
        let record = AnnotationRecord::new(&self.image, &annotation);

        self.annotations.push(annotation);
        self.history.record(&self.annotations);
        log::info!(
            "Saved '{}' on {}, total: {}",
            species,
            self.image.id,
            self.annotations.len()
        );
        Some(record)
    }

    /// Drop the pending box. Committed annotations are kept.
    pub fn clear_current(&mut self) -> bool {
        self.editor.clear()
    }

    /// Remove a committed annotation by position.
    pub fn remove_annotation(&mut self, index: usize) -> Option<Annotation> {
        if index >= self.annotations.len() {
            return None;
        }
        let removed = self.annotations.remove(index);
        self.history.record(&self.annotations);
        log::info!("Deleted annotation, total: {}", self.annotations.len());
        Some(removed)
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(previous) => {
                self.annotations = previous;
                log::info!("Undo, total: {}", self.annotations.len());
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(next) => {
                self.annotations = next;
                log::info!("Redo, total: {}", self.annotations.len());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::Point;

    fn session() -> AnnotationSession {
        let image = ImageInfo {
            id: "IMG_0001.JPG".to_string(),
            index: 0,
            width: 640,
            height: 480,
        };
        AnnotationSession::new(image, &AnnotatorConfig::default())
    }

    /// Display matches the image, so screen and image space coincide at zoom 1.
    fn geometry() -> CanvasGeometry {
        CanvasGeometry::new((640, 480), (640.0, 480.0))
    }

    fn drag(session: &mut AnnotationSession, from: (f64, f64), to: (f64, f64)) {
        let g = geometry();
        session.dispatch(PointerEvent::Down(Point::new(from.0, from.1)), false, &g);
        session.dispatch(PointerEvent::Move(Point::new(to.0, to.1)), false, &g);
        session.dispatch(PointerEvent::Up(Point::new(to.0, to.1)), false, &g);
    }

    #[test]
    fn test_reverse_drag_then_save() {
        let mut session = session();
        drag(&mut session, (100.0, 100.0), (50.0, 50.0));
        assert_eq!(session.current_box(), Some(BBox::new(50.0, 50.0, 100.0, 100.0)));

        let record = session.save("deer").unwrap();
        assert_eq!(record.image, "IMG_0001.JPG");
        assert_eq!(
            session.annotations(),
            &[Annotation::new(BBox::new(50.0, 50.0, 100.0, 100.0), "deer")]
        );
        assert!(session.current_box().is_none());
    }

    #[test]
    fn test_small_drag_leaves_list_and_history_unchanged() {
        let mut session = session();
        let before = (session.history().len(), session.history().index());

        drag(&mut session, (10.0, 10.0), (300.0, 15.0));
        assert!(session.save("deer").is_none());
        assert!(session.annotations().is_empty());
        assert_eq!((session.history().len(), session.history().index()), before);
    }

    #[test]
    fn test_save_without_label_keeps_pending_box() {
        let mut session = session();
        drag(&mut session, (0.0, 0.0), (40.0, 40.0));
        assert!(session.save("   ").is_none());
        assert!(session.has_pending_box());
        assert!(session.save("fox").is_some());
    }

    #[test]
    fn test_clear_keeps_committed_annotations() {
        let mut session = session();
        drag(&mut session, (0.0, 0.0), (40.0, 40.0));
        session.save("fox");
        drag(&mut session, (100.0, 100.0), (200.0, 200.0));

        assert!(session.clear_current());
        assert!(session.current_box().is_none());
        assert_eq!(session.annotations().len(), 1);
    }

    #[test]
    fn test_undo_redo_of_saves_and_removals() {
        let mut session = session();
        drag(&mut session, (0.0, 0.0), (40.0, 40.0));
        session.save("fox");
        drag(&mut session, (100.0, 100.0), (200.0, 200.0));
        session.save("moose");
        assert!(session.remove_annotation(0).is_some());
        assert_eq!(session.annotations()[0].species, "moose");

        assert!(session.undo());
        assert_eq!(session.annotations().len(), 2);
        assert!(session.undo());
        assert!(session.undo());
        assert!(session.annotations().is_empty());
        assert!(!session.undo());

        assert!(session.redo());
        assert_eq!(session.annotations()[0].species, "fox");
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut session = session();
        let len = session.history().len();
        assert!(session.remove_annotation(3).is_none());
        assert_eq!(session.history().len(), len);
    }

    #[test]
    fn test_shift_drag_pans_instead_of_drawing() {
        let mut session = session();
        let g = geometry();
        session.dispatch(PointerEvent::Down(Point::new(10.0, 10.0)), true, &g);
        assert!(session.dispatch(PointerEvent::Move(Point::new(40.0, 30.0)), true, &g));
        session.dispatch(PointerEvent::Up(Point::new(40.0, 30.0)), true, &g);

        assert_eq!(session.view().offset(), Point::new(30.0, 20.0));
        assert!(session.current_box().is_none());
        assert!(!session.view().is_panning());
    }

    #[test]
    fn test_modifier_release_and_leave_end_pan() {
        let mut session = session();
        let g = geometry();
        session.dispatch(PointerEvent::Down(Point::new(10.0, 10.0)), true, &g);
        session.modifier_released();
        assert!(!session.view().is_panning());

        session.dispatch(PointerEvent::Down(Point::new(10.0, 10.0)), true, &g);
        session.dispatch(PointerEvent::Leave, true, &g);
        assert!(!session.view().is_panning());
    }

    #[test]
    fn test_shift_pressed_mid_drag_cancels_box() {
        let mut session = session();
        let g = geometry();
        session.dispatch(PointerEvent::Down(Point::new(10.0, 10.0)), false, &g);
        session.dispatch(PointerEvent::Move(Point::new(60.0, 60.0)), false, &g);
        assert!(!session.dispatch(PointerEvent::Move(Point::new(200.0, 200.0)), true, &g));
        assert_eq!(session.current_box(), Some(BBox::new(10.0, 10.0, 60.0, 60.0)));

        assert!(session.dispatch(PointerEvent::Up(Point::new(200.0, 200.0)), true, &g));
        assert!(session.current_box().is_none());
        assert!(!session.has_pending_box());
        assert!(session.save("deer").is_none());
    }

    #[test]
    fn test_wheel_zoom_with_modifier() {
        let mut session = session();
        let g = geometry();
        let wheel = PointerEvent::Wheel {
            pos: Point::new(320.0, 240.0),
            delta: 1.0,
        };
        assert!(!session.dispatch(wheel, false, &g));
        for _ in 0..3 {
            assert!(session.dispatch(wheel, true, &g));
        }
        assert!((session.view().zoom() - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_drawing_after_zoom_maps_to_image_space() {
        let mut session = session();
        let g = geometry();
        // Zoom to 2x around the origin so the offset stays at zero
        let wheel = PointerEvent::Wheel {
            pos: Point::new(0.0, 0.0),
            delta: 1.0,
        };
        for _ in 0..10 {
            session.dispatch(wheel, true, &g);
        }
        drag(&mut session, (40.0, 40.0), (100.0, 80.0));
        let bbox = session.current_box().unwrap();
        assert!((bbox.x1 - 20.0).abs() < 1e-6);
        assert!((bbox.x2 - 50.0).abs() < 1e-6);
        assert!((bbox.y2 - 40.0).abs() < 1e-6);
    }
}
