// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer gesture classification.
//!
//! Every raw pointer event is routed to exactly one gesture. Holding the
//! pan/zoom modifier (Shift) turns drags into pans and wheel ticks into
//! zoom steps; without it drags draw boxes and the wheel is ignored.

use crate::models::annotation::Point;
use crate::models::view::ZoomDirection;

/// Raw pointer input on the canvas, in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    /// Pointer left the canvas
    Leave,
    Wheel { pos: Point, delta: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawStep {
    Begin(Point),
    Extend(Point),
    End(Point),
    /// Drop the box being drawn
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanStep {
    Start(Point),
    Move(Point),
    Stop,
}

/// What a pointer event means given the current interaction state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Draw(DrawStep),
    Pan(PanStep),
    Zoom { pos: Point, direction: ZoomDirection },
    Ignore,
}

/// Interaction state the classification depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureContext {
    pub modifier_held: bool,
    pub drawing: bool,
    pub panning: bool,
}

/// Classify a pointer event.
pub fn classify(event: PointerEvent, ctx: GestureContext) -> Gesture {
    match event {
        PointerEvent::Wheel { pos, delta } if ctx.modifier_held => {
            match ZoomDirection::from_wheel_delta(delta) {
                Some(direction) => Gesture::Zoom { pos, direction },
                None => Gesture::Ignore,
            }
        }
        PointerEvent::Wheel { .. } => Gesture::Ignore,

        PointerEvent::Down(pos) if ctx.modifier_held => Gesture::Pan(PanStep::Start(pos)),
        PointerEvent::Down(pos) => Gesture::Draw(DrawStep::Begin(pos)),

        PointerEvent::Move(pos) if ctx.panning => Gesture::Pan(PanStep::Move(pos)),
        PointerEvent::Move(pos) if ctx.drawing && !ctx.modifier_held => {
            Gesture::Draw(DrawStep::Extend(pos))
        }
        PointerEvent::Move(_) => Gesture::Ignore,

        PointerEvent::Up(_) if ctx.panning => Gesture::Pan(PanStep::Stop),
        PointerEvent::Up(_) if ctx.drawing && ctx.modifier_held => Gesture::Draw(DrawStep::Cancel),
        PointerEvent::Up(pos) if ctx.drawing => Gesture::Draw(DrawStep::End(pos)),
        PointerEvent::Up(_) => Gesture::Ignore,

        PointerEvent::Leave if ctx.panning => Gesture::Pan(PanStep::Stop),
        PointerEvent::Leave => Gesture::Ignore,
    }
}
