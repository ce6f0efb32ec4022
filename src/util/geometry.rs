// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the coordinate transformations between screen space
//! (pointer positions relative to the canvas) and image space (native image
//! pixels), taking the current zoom and pan into account.

use crate::models::annotation::{BBox, Point};
use crate::models::view::ViewTransform;

/// Size of the image and of the on-screen area it is fitted into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    /// Native image size in pixels
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Size of the fitted image on screen at zoom 1
    pub display_width: f64,
    pub display_height: f64,
}

/// `numerator / denominator`, or 1 when the result would not be finite.
fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    let ratio = numerator / denominator;
    if ratio.is_finite() && ratio != 0.0 {
        ratio
    } else {
        1.0
    }
}

impl CanvasGeometry {
    pub fn new(canvas_size: (u32, u32), display_size: (f64, f64)) -> Self {
        Self {
            canvas_width: canvas_size.0 as f64,
            canvas_height: canvas_size.1 as f64,
            display_width: display_size.0,
            display_height: display_size.1,
        }
    }

    /// Image pixels per screen pixel along each axis at the current zoom.
    fn scale(&self, view: &ViewTransform) -> (f64, f64) {
        let zoom = view.zoom();
        (
            safe_ratio(safe_ratio(self.canvas_width, self.display_width), zoom),
            safe_ratio(safe_ratio(self.canvas_height, self.display_height), zoom),
        )
    }

    /// Convert a pointer position to image coordinates.
    pub fn to_image_space(&self, view: &ViewTransform, pointer: Point) -> Point {
        let (scale_x, scale_y) = self.scale(view);
        let offset = view.offset();
        Point::new(
            (pointer.x - offset.x) * scale_x,
            (pointer.y - offset.y) * scale_y,
        )
    }

    /// Convert image coordinates to a position relative to the canvas.
    pub fn to_screen_space(&self, view: &ViewTransform, image: Point) -> Point {
        let (scale_x, scale_y) = self.scale(view);
        let offset = view.offset();
        Point::new(image.x / scale_x + offset.x, image.y / scale_y + offset.y)
    }

    /// Screen-space corners of a box.
    pub fn box_to_screen(&self, view: &ViewTransform, bbox: &BBox) -> (Point, Point) {
        (
            self.to_screen_space(view, bbox.top_left()),
            self.to_screen_space(view, bbox.bottom_right()),
        )
    }
}

/// Fit an image into the available area, keeping its aspect ratio.
///
/// Returns the top-left offset that centres the image and its display size.
pub fn fit_to_area(image_size: (u32, u32), available: (f64, f64)) -> (Point, (f64, f64)) {
    let (img_width, img_height) = (image_size.0.max(1) as f64, image_size.1.max(1) as f64);
    let img_aspect = img_width / img_height;
    let available_aspect = safe_ratio(available.0, available.1);

    let (display_width, display_height) = if img_aspect > available_aspect {
        // Image is wider - fit to width
        (available.0, available.0 / img_aspect)
    } else {
        // Image is taller - fit to height
        (available.1 * img_aspect, available.1)
    };

    let offset = Point::new(
        (available.0 - display_width) / 2.0,
        (available.1 - display_height) / 2.0,
    );
    (offset, (display_width, display_height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::view::ZoomDirection;

    const EPS: f64 = 1e-9;

    fn geometry() -> CanvasGeometry {
        // 1920x1080 image shown at 960x540
        CanvasGeometry::new((1920, 1080), (960.0, 540.0))
    }

    #[test]
    fn test_identity_at_native_size() {
        let geometry = CanvasGeometry::new((800, 600), (800.0, 600.0));
        let view = ViewTransform::default();
        let p = geometry.to_image_space(&view, Point::new(100.0, 50.0));
        assert_eq!(p, Point::new(100.0, 50.0));
    }

    #[test]
    fn test_display_scale_and_offset() {
        let mut view = ViewTransform::default();
        view.start_pan(Point::new(0.0, 0.0));
        view.pan_to(Point::new(20.0, 10.0));

        let p = geometry().to_image_space(&view, Point::new(120.0, 60.0));
        assert!((p.x - 200.0).abs() < EPS);
        assert!((p.y - 100.0).abs() < EPS);
    }

    #[test]
    fn test_screen_space_inverts_image_space() {
        let mut view = ViewTransform::default();
        view.apply_zoom(Point::new(300.0, 200.0), ZoomDirection::In);
        view.apply_zoom(Point::new(300.0, 200.0), ZoomDirection::In);

        let pointer = Point::new(417.0, 233.0);
        let image = geometry().to_image_space(&view, pointer);
        let back = geometry().to_screen_space(&view, image);
        assert!((back.x - pointer.x).abs() < 1e-6);
        assert!((back.y - pointer.y).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_display_does_not_produce_nan() {
        let geometry = CanvasGeometry::new((640, 480), (0.0, 0.0));
        let p = geometry.to_image_space(&ViewTransform::default(), Point::new(10.0, 20.0));
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn test_fit_wide_image() {
        let (offset, size) = fit_to_area((1920, 1080), (800.0, 800.0));
        assert!((size.0 - 800.0).abs() < EPS);
        assert!((size.1 - 450.0).abs() < EPS);
        assert!((offset.y - 175.0).abs() < EPS);
        assert_eq!(offset.x, 0.0);
    }

    #[test]
    fn test_fit_tall_image() {
        let (offset, size) = fit_to_area((1000, 2000), (800.0, 600.0));
        assert!((size.0 - 300.0).abs() < EPS);
        assert!((size.1 - 600.0).abs() < EPS);
        assert!((offset.x - 250.0).abs() < EPS);
    }
}
