// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the core data structures for representing
//! bounding boxes in image space and the species labels attached to them.

use serde::{Deserialize, Serialize};

/// A 2D point. Depending on context this is in screen or image space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box in image space, stored as two corners.
///
/// While a box is being dragged the corners may be in any order; call
/// [`BBox::normalized`] to get `x1 <= x2` and `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Degenerate box with both corners at `point`.
    pub fn at(point: Point) -> Self {
        Self::new(point.x, point.y, point.x, point.y)
    }

    /// Move the second corner, keeping the first one anchored.
    pub fn with_corner(self, point: Point) -> Self {
        Self::new(self.x1, self.y1, point.x, point.y)
    }

    /// Swap coordinates as needed so the first corner is the top-left one.
    pub fn normalized(self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    pub fn width(&self) -> f64 {
        (self.x2 - self.x1).abs()
    }

    pub fn height(&self) -> f64 {
        (self.y2 - self.y1).abs()
    }

    /// Check that both sides reach `min_size`. NaN sides never do.
    pub fn is_at_least(&self, min_size: f64) -> bool {
        self.width() >= min_size && self.height() >= min_size
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.x2, self.y2)
    }
}

impl From<[f64; 4]> for BBox {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<BBox> for [f64; 4] {
    fn from(bbox: BBox) -> Self {
        [bbox.x1, bbox.y1, bbox.x2, bbox.y2]
    }
}

/// A finalized box with its species label.
///
/// Annotations are replaced wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub bbox: BBox,
    pub species: String,
}

impl Annotation {
    /// Create a new annotation with the given box and label.
    pub fn new(bbox: BBox, species: impl Into<String>) -> Self {
        Self {
            bbox,
            species: species.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_swaps_reversed_corners() {
        let bbox = BBox::new(100.0, 100.0, 50.0, 50.0).normalized();
        assert_eq!(bbox, BBox::new(50.0, 50.0, 100.0, 100.0));
    }

    #[test]
    fn test_normalized_mixed_directions() {
        // Dragged right and up
        let bbox = BBox::new(10.0, 80.0, 40.0, 20.0).normalized();
        assert!(bbox.x1 <= bbox.x2);
        assert!(bbox.y1 <= bbox.y2);
        assert_eq!(bbox, BBox::new(10.0, 20.0, 40.0, 80.0));
    }

    #[test]
    fn test_min_size_check() {
        let bbox = BBox::new(0.0, 0.0, 10.0, 9.9);
        assert!(!bbox.is_at_least(10.0));
        assert!(BBox::new(0.0, 0.0, 10.0, 10.0).is_at_least(10.0));
        assert!(!BBox::new(0.0, 0.0, f64::NAN, 20.0).is_at_least(10.0));
    }

    #[test]
    fn test_annotation_serializes_bbox_as_array() {
        let annotation = Annotation::new(BBox::new(50.0, 50.0, 100.0, 100.0), "deer");
        let json = serde_json::to_value(&annotation).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "bbox": [50.0, 50.0, 100.0, 100.0], "species": "deer" })
        );

        let back: Annotation = serde_json::from_value(json).unwrap();
        assert_eq!(back, annotation);
    }
}
