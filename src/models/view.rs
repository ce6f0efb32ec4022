// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zoom and pan state of the canvas.
//!
//! The offset is expressed in screen pixels and is applied before the zoom
//! scale, so panning adds pointer deltas to it unchanged.

use super::annotation::Point;
use crate::config::ZoomConfig;

/// Direction of a single wheel tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Scrolling up zooms in. A zero delta is not a tick.
    pub fn from_wheel_delta(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::In)
        } else if delta < 0.0 {
            Some(Self::Out)
        } else {
            None
        }
    }
}

/// Current zoom level and pan offset for one editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    zoom: f64,
    offset: Point,
    limits: ZoomConfig,
    /// Last pointer position of an active pan
    pan_anchor: Option<Point>,
}

impl ViewTransform {
    pub fn new(limits: ZoomConfig) -> Self {
        Self {
            zoom: 1.0_f64.clamp(limits.min, limits.max),
            offset: Point::default(),
            limits,
            pan_anchor: None,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Step the zoom by one tick, keeping the point under `pointer` fixed.
    ///
    /// Returns the new zoom level.
    pub fn apply_zoom(&mut self, pointer: Point, direction: ZoomDirection) -> f64 {
        let old = self.zoom;
        let step = match direction {
            ZoomDirection::In => self.limits.step,
            ZoomDirection::Out => -self.limits.step,
        };
        let new = (old + step).clamp(self.limits.min, self.limits.max);

        // A step absorbed by the clamp leaves the offset untouched
        let ratio = new / old;
        if new != old && old.is_finite() && old.abs() > f64::EPSILON && ratio.is_finite() {
            self.offset = Point::new(
                pointer.x - (pointer.x - self.offset.x) * ratio,
                pointer.y - (pointer.y - self.offset.y) * ratio,
            );
        }
        self.zoom = new;

        log::debug!(
            "Zoom {:.2} -> {:.2}, offset ({:.1}, {:.1})",
            old,
            new,
            self.offset.x,
            self.offset.y
        );
        new
    }

    pub fn start_pan(&mut self, pointer: Point) {
        self.pan_anchor = Some(pointer);
    }

    /// Move the offset by the pointer delta since the previous pan event.
    pub fn pan_to(&mut self, pointer: Point) -> bool {
        let Some(last) = self.pan_anchor else {
            return false;
        };
        self.offset.x += pointer.x - last.x;
        self.offset.y += pointer.y - last.y;
        self.pan_anchor = Some(pointer);
        true
    }

    pub fn stop_pan(&mut self) {
        self.pan_anchor = None;
    }

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    /// Zoom as a whole percentage.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    /// Text for the zoom readout.
    pub fn indicator(&self) -> String {
        format!("Zoom: {}%", self.zoom_percent())
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}
