//! Normalized (0..1000) drawing coordinates and device-region helpers.
//!
//! Normalized values are always relative to a parent box that has already
//! been resolved to device pixels; they never name absolute screen pixels.
//! Device regions are plain `embedded_graphics` rectangles.

use core::ops::{Add, AddAssign, Neg, Sub};

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Normalized units spanning a full parent box.
pub const SCALE: i32 = 1000;

/// Fixed-capacity name used for component identity and event sources.
pub type Name = heapless::String<32>;

/// Build a [`Name`], truncating anything past its capacity.
pub fn name(value: &str) -> Name {
    let mut name = Name::new();
    for c in value.chars() {
        if name.push(c).is_err() {
            break;
        }
    }
    name
}

/// Position in normalized units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawingPoint {
    pub x: i16,
    pub y: i16,
}

impl DrawingPoint {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }
}

impl Add for DrawingPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl AddAssign for DrawingPoint {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for DrawingPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl Neg for DrawingPoint {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(self.x.saturating_neg(), self.y.saturating_neg())
    }
}

/// Size in normalized units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawingArea {
    pub width: u16,
    pub height: u16,
}

impl DrawingArea {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// The whole parent box
    pub const fn full() -> Self {
        Self {
            width: SCALE as u16,
            height: SCALE as u16,
        }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0,
            height: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for DrawingArea {
    fn default() -> Self {
        Self::full()
    }
}

/// Normalized box: a point plus an area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawingRegion {
    pub point: DrawingPoint,
    pub area: DrawingArea,
}

impl DrawingRegion {
    pub const fn new(point: DrawingPoint, area: DrawingArea) -> Self {
        Self { point, area }
    }
}

// ---------------------------------------------------------------------------
// Device regions
// ---------------------------------------------------------------------------

/// Pixel count of a device region; zero means empty, not invalid.
pub fn region_area(region: &Rectangle) -> u32 {
    region.size.width * region.size.height
}

/// Intersection of `view` and `region`, expressed relative to `region`'s origin.
///
/// The result is in the local coordinates of whatever owns `region`, which
/// is what a child needs for its refresh region. Disjoint inputs give a zero
/// rectangle at the origin.
pub fn overlap(view: &Rectangle, region: &Rectangle) -> Rectangle {
    let intersection = view.intersection(region);
    if region_area(&intersection) == 0 {
        return Rectangle::zero();
    }
    Rectangle::new(intersection.top_left - region.top_left, intersection.size)
}

/// Smallest region covering both `a` and `b`.
pub fn bounding(a: &Rectangle, b: &Rectangle) -> Rectangle {
    if region_area(a) == 0 {
        return *b;
    }
    if region_area(b) == 0 {
        return *a;
    }
    let top_left = a.top_left.component_min(b.top_left);
    let a_end = a.top_left + a.size;
    let b_end = b.top_left + b.size;
    let end = a_end.component_max(b_end);
    Rectangle::with_corners(top_left, end - Point::new(1, 1))
}

/// Shift a region by an offset without changing its size.
pub fn offset(region: &Rectangle, by: Point) -> Rectangle {
    Rectangle::new(region.top_left + by, region.size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_relative_to_region() {
        let view = Rectangle::new(Point::new(0, 0), Size::new(100, 100));
        let child = Rectangle::new(Point::new(50, 80), Size::new(100, 40));

        let clip = overlap(&view, &child);
        assert_eq!(clip, Rectangle::new(Point::new(0, 0), Size::new(50, 20)));
    }

    #[test]
    fn test_overlap_child_starting_above_view() {
        let view = Rectangle::new(Point::new(0, 100), Size::new(100, 100));
        let child = Rectangle::new(Point::new(0, 60), Size::new(100, 80));

        let clip = overlap(&view, &child);
        assert_eq!(clip, Rectangle::new(Point::new(0, 40), Size::new(100, 40)));
    }

    #[test]
    fn test_overlap_disjoint_is_zero() {
        let view = Rectangle::new(Point::new(0, 0), Size::new(100, 100));
        let child = Rectangle::new(Point::new(0, 100), Size::new(100, 50));

        assert_eq!(region_area(&overlap(&view, &child)), 0);
    }

    #[test]
    fn test_bounding_covers_both() {
        let a = Rectangle::new(Point::new(2, 3), Size::new(1, 1));
        let b = Rectangle::new(Point::new(5, 1), Size::new(2, 4));
        assert_eq!(
            bounding(&a, &b),
            Rectangle::new(Point::new(2, 1), Size::new(5, 4))
        );
        assert_eq!(bounding(&Rectangle::zero(), &b), b);
    }

    #[test]
    fn test_name_truncates() {
        let long = "a-very-long-component-name-that-keeps-going";
        let n = name(long);
        assert_eq!(n.len(), 32);
        assert!(long.starts_with(n.as_str()));
    }

    #[test]
    fn test_drawing_point_arithmetic() {
        let p = DrawingPoint::new(100, -50) + DrawingPoint::new(20, 30);
        assert_eq!(p, DrawingPoint::new(120, -20));
        assert_eq!(-p, DrawingPoint::new(-120, 20));
    }
}
