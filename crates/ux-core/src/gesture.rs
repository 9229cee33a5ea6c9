// src/gesture.rs
//! Touch gesture classification.
//!
//! [`TouchGesture`] consumes the raw `Pressed` / `Active` / `Released`
//! samples of one pointer and reports what they mean: a drag along exactly
//! one axis, a tap, or nothing yet.
//!
//! # State machine
//!
//! ```text
//! idle --Pressed--> pressed --Active (axis exceeds threshold)--> dragging (axis locked)
//!                      |                                            |
//!                      +--Released--> idle (Touched)                +--Released--> idle (None)
//! ```
//!
//! Once an axis locks, only that axis reports movement until the next press.

use embassy_time::{Duration, Instant};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::trace;

use crate::event::{TouchContext, TouchEventId};

/// Which axes may lock into a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragAxes {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Default for DragAxes {
    fn default() -> Self {
        Self {
            horizontal: true,
            vertical: true,
        }
    }
}

impl DragAxes {
    pub fn vertical_only() -> Self {
        Self {
            horizontal: false,
            vertical: true,
        }
    }

    pub fn horizontal_only() -> Self {
        Self {
            horizontal: true,
            vertical: false,
        }
    }
}

/// Per-pointer gesture classifier
#[derive(Debug, Clone)]
pub struct TouchGesture {
    threshold: i32,
    region: Option<Rectangle>,
    axes: DragAxes,
    pressed_at: Option<Instant>,
    last_point: Point,
    drag: Point,
    vertical_drag_active: bool,
    horizontal_drag_active: bool,
}

impl Default for TouchGesture {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TouchGesture {
    /// An axis locks once a single sample moves it by more than `threshold`
    /// pixels.
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold: threshold as i32,
            region: None,
            axes: DragAxes::default(),
            pressed_at: None,
            last_point: Point::zero(),
            drag: Point::zero(),
            vertical_drag_active: false,
            horizontal_drag_active: false,
        }
    }

    /// Ignore presses outside `region`.
    pub fn with_region(mut self, region: Rectangle) -> Self {
        self.region = Some(region);
        self
    }

    pub fn with_axes(mut self, axes: DragAxes) -> Self {
        self.axes = axes;
        self
    }

    /// Drag vector of the last sample, zero on the unlocked axis.
    pub fn drag(&self) -> Point {
        self.drag
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.vertical_drag_active || self.horizontal_drag_active
    }

    /// Time since the press, zero while released.
    pub fn hold_duration(&self, now: Instant) -> Duration {
        self.pressed_at
            .map(|at| now.saturating_duration_since(at))
            .unwrap_or(Duration::from_ticks(0))
    }

    /// Feed one raw sample and return its classification.
    pub fn process(&mut self, touch: &TouchContext, now: Instant) -> TouchEventId {
        match touch.id {
            TouchEventId::Pressed => {
                if self.region.is_some_and(|r| !r.contains(touch.point)) {
                    return TouchEventId::None;
                }
                self.vertical_drag_active = false;
                self.horizontal_drag_active = false;
                self.last_point = touch.point;
                self.drag = Point::zero();
                self.pressed_at = Some(now);
                TouchEventId::None
            }
            TouchEventId::Active if self.is_pressed() => {
                self.drag = self.process_drag(touch.point);
                if self.is_dragging() {
                    TouchEventId::DraggedPoint
                } else {
                    TouchEventId::None
                }
            }
            TouchEventId::Released if self.is_pressed() => {
                self.pressed_at = None;
                self.drag = Point::zero();
                if self.is_dragging() {
                    TouchEventId::None
                } else {
                    TouchEventId::Touched
                }
            }
            _ => TouchEventId::None,
        }
    }

    fn process_drag(&mut self, point: Point) -> Point {
        let diff = point - self.last_point;
        self.last_point = point;

        if !self.is_dragging() {
            let x = if self.axes.horizontal && diff.x.abs() > self.threshold {
                diff.x.abs()
            } else {
                0
            };
            let y = if self.axes.vertical && diff.y.abs() > self.threshold {
                diff.y.abs()
            } else {
                0
            };

            if x > 0 || y > 0 {
                if x >= y {
                    self.horizontal_drag_active = true;
                } else {
                    self.vertical_drag_active = true;
                }
                trace!(
                    "drag locked {}",
                    if self.horizontal_drag_active { "horizontal" } else { "vertical" }
                );
            }
        }

        Point::new(
            if self.horizontal_drag_active { diff.x } else { 0 },
            if self.vertical_drag_active { diff.y } else { 0 },
        )
    }
}
