// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Box drawing state machine.
//!
//! A drag moves the editor from `Idle` to `Drawing`. Releasing the pointer
//! either discards the box (too small) or holds it as `Committed` until the
//! user saves or clears it.

use crate::models::annotation::{BBox, Point};

/// Current state of the box editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorState {
    Idle,
    /// First corner is the drag anchor
    Drawing { bbox: BBox },
    /// Normalized box waiting for a save action
    Committed(BBox),
}

#[derive(Debug, Clone)]
pub struct BoxEditor {
    state: EditorState,
    min_size: f64,
}

impl BoxEditor {
    pub fn new(min_size: f64) -> Self {
        Self {
            state: EditorState::Idle,
            min_size,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, EditorState::Drawing { .. })
    }

    /// Start a new box at `point`, replacing any unsaved one.
    pub fn begin(&mut self, point: Point) {
        self.state = EditorState::Drawing {
            bbox: BBox::at(point),
        };
    }

    /// Move the free corner. Returns `true` when the box changed.
    pub fn update(&mut self, point: Point) -> bool {
        match &mut self.state {
            EditorState::Drawing { bbox } => {
                *bbox = bbox.with_corner(point);
                true
            }
            _ => false,
        }
    }

    /// End the drag at `point`.
    ///
    /// Returns the normalized box if it is large enough to keep.
    pub fn finish(&mut self, point: Point) -> Option<BBox> {
        let EditorState::Drawing { bbox } = self.state else {
            return None;
        };
        let bbox = bbox.with_corner(point).normalized();

        if bbox.is_at_least(self.min_size) {
            self.state = EditorState::Committed(bbox);
            Some(bbox)
        } else {
            log::debug!(
                "Discarded {:.1}x{:.1} box (minimum {})",
                bbox.width(),
                bbox.height(),
                self.min_size
            );
            self.state = EditorState::Idle;
            None
        }
    }

    /// Drop the in-progress or pending box. Returns `true` if there was one.
    pub fn clear(&mut self) -> bool {
        let had_box = self.state != EditorState::Idle;
        self.state = EditorState::Idle;
        had_box
    }

    /// Hand over the pending box for saving.
    pub fn take_committed(&mut self) -> Option<BBox> {
        match self.state {
            EditorState::Committed(bbox) => {
                self.state = EditorState::Idle;
                Some(bbox)
            }
            _ => None,
        }
    }

    /// Box waiting for a save action.
    pub fn pending(&self) -> Option<BBox> {
        match self.state {
            EditorState::Committed(bbox) => Some(bbox),
            _ => None,
        }
    }

    /// Box to draw with a dashed outline, if any.
    pub fn current_box(&self) -> Option<BBox> {
        match self.state {
            EditorState::Idle => None,
            EditorState::Drawing { bbox } | EditorState::Committed(bbox) => Some(bbox),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_drag_is_normalized() {
        let mut editor = BoxEditor::new(10.0);
        editor.begin(Point::new(100.0, 100.0));
        assert!(editor.is_drawing());
        assert!(editor.update(Point::new(70.0, 60.0)));

        let bbox = editor.finish(Point::new(50.0, 50.0)).unwrap();
        assert_eq!(bbox, BBox::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(editor.state(), EditorState::Committed(bbox));
    }

    #[test]
    fn test_small_box_is_discarded() {
        let mut editor = BoxEditor::new(10.0);
        editor.begin(Point::new(10.0, 10.0));
        assert!(editor.finish(Point::new(60.0, 19.0)).is_none());
        assert_eq!(editor.state(), EditorState::Idle);
        assert!(editor.current_box().is_none());
    }

    #[test]
    fn test_click_without_move_is_discarded() {
        let mut editor = BoxEditor::new(10.0);
        editor.begin(Point::new(5.0, 5.0));
        assert!(editor.finish(Point::new(5.0, 5.0)).is_none());
        assert_eq!(editor.state(), EditorState::Idle);
    }

    #[test]
    fn test_update_outside_drawing_is_ignored() {
        let mut editor = BoxEditor::new(10.0);
        assert!(!editor.update(Point::new(1.0, 1.0)));
        assert!(editor.finish(Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_new_drag_replaces_pending_box() {
        let mut editor = BoxEditor::new(10.0);
        editor.begin(Point::new(0.0, 0.0));
        editor.finish(Point::new(50.0, 50.0));

        editor.begin(Point::new(200.0, 200.0));
        assert_eq!(
            editor.current_box(),
            Some(BBox::new(200.0, 200.0, 200.0, 200.0))
        );
        assert!(editor.take_committed().is_none());
    }

    #[test]
    fn test_take_committed_and_clear() {
        let mut editor = BoxEditor::new(10.0);
        editor.begin(Point::new(0.0, 0.0));
        editor.finish(Point::new(40.0, 30.0));
        assert_eq!(editor.take_committed(), Some(BBox::new(0.0, 0.0, 40.0, 30.0)));
        assert!(editor.take_committed().is_none());

        editor.begin(Point::new(0.0, 0.0));
        assert!(editor.clear());
        assert!(!editor.clear());
    }
}
