//! Scaled drawing attributes.
//!
//! [`DrawingAttributes`] pin a normalized box onto a target bitmap. Adding a
//! [`DrawingPoint`] or [`DrawingArea`] nests a new box *inside* the current
//! one, so chains like `attrs + p1 + a1 + p2 + a2` describe a box inside a box
//! inside a box.
//!
//! Always add the point before the area: the point shift is scaled by the
//! current area, and adding an area redefines it.
//!
//! # Examples
//!
//! ```
//! use embedded_graphics::prelude::*;
//! use embedded_graphics::primitives::Rectangle;
//! use ux_core::{BitmapInfo, DrawingArea, DrawingAttributes, DrawingPoint};
//!
//! let attrs = DrawingAttributes::new(BitmapInfo::new(Size::new(1000, 1000)))
//!     + DrawingPoint::new(250, 250)
//!     + DrawingArea::new(500, 500);
//!
//! assert_eq!(
//!     attrs.calculate_region_on_bitmap(),
//!     Rectangle::new(Point::new(250, 250), Size::new(500, 500))
//! );
//! ```

use core::convert::Infallible;
use core::ops::Add;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::bitmap::{Bitmap, BitmapInfo};
use crate::geometry::{DrawingArea, DrawingPoint, DrawingRegion, SCALE};

/// `value * span / SCALE`, rounded half away from zero.
fn scale_rounded(value: i32, span: i32) -> i32 {
    let product = value as i64 * span as i64;
    let half = (SCALE / 2) as i64;
    let scaled = if product >= 0 {
        (product + half) / SCALE as i64
    } else {
        (product - half) / SCALE as i64
    };
    scaled as i32
}

/// Inverse of [`scale_rounded`]: pixels back to normalized units of `span`.
fn unscale_rounded(pixels: i32, span: u32) -> i32 {
    if span == 0 {
        return 0;
    }
    let span = span as i64;
    let product = pixels as i64 * SCALE as i64;
    let scaled = if product >= 0 {
        (product + span / 2) / span
    } else {
        (product - span / 2) / span
    };
    scaled as i32
}

fn clamp_i16(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

fn clamp_u16(value: i32) -> u16 {
    value.clamp(0, u16::MAX as i32) as u16
}

/// A normalized window onto a target bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawingAttributes {
    bitmap: BitmapInfo,
    region: DrawingRegion,
}

impl DrawingAttributes {
    /// Attributes covering the whole of `bitmap`.
    pub fn new(bitmap: BitmapInfo) -> Self {
        Self {
            bitmap,
            region: DrawingRegion::default(),
        }
    }

    pub fn with_region(mut self, region: DrawingRegion) -> Self {
        self.region = region;
        self
    }

    pub fn bitmap(&self) -> BitmapInfo {
        self.bitmap
    }

    pub fn set_bitmap(&mut self, bitmap: BitmapInfo) -> &mut Self {
        self.bitmap = bitmap;
        self
    }

    pub fn region(&self) -> DrawingRegion {
        self.region
    }

    pub fn point(&self) -> DrawingPoint {
        self.region.point
    }

    pub fn area(&self) -> DrawingArea {
        self.region.area
    }

    pub fn set_point(&mut self, point: DrawingPoint) -> &mut Self {
        self.region.point = point;
        self
    }

    pub fn set_area(&mut self, area: DrawingArea) -> &mut Self {
        self.region.area = area;
        self
    }

    // -----------------------------------------------------------------------
    // Normalized composition
    // -----------------------------------------------------------------------

    /// Scale a width inside this window into full-bitmap normalized units.
    pub fn calculate_width(&self, value: i32) -> i32 {
        scale_rounded(value, self.region.area.width as i32)
    }

    /// Scale a height inside this window into full-bitmap normalized units.
    pub fn calculate_height(&self, value: i32) -> i32 {
        scale_rounded(value, self.region.area.height as i32)
    }

    // -----------------------------------------------------------------------
    // Resolution to device pixels
    // -----------------------------------------------------------------------

    /// Resolve a full-bitmap normalized width to pixels.
    pub fn calculate_width_on_bitmap(&self, value: i32) -> i32 {
        scale_rounded(value, self.bitmap.usable_width() as i32)
    }

    /// Resolve a full-bitmap normalized height to pixels.
    pub fn calculate_height_on_bitmap(&self, value: i32) -> i32 {
        scale_rounded(value, self.bitmap.usable_height() as i32)
    }

    pub fn calculate_point_on_bitmap(&self) -> Point {
        Point::new(
            self.calculate_width_on_bitmap(self.region.point.x as i32)
                + self.bitmap.margins.left as i32,
            self.calculate_height_on_bitmap(self.region.point.y as i32)
                + self.bitmap.margins.top as i32,
        )
    }

    pub fn calculate_area_on_bitmap(&self) -> Size {
        Size::new(
            self.calculate_width_on_bitmap(self.region.area.width as i32)
                .max(0) as u32,
            self.calculate_height_on_bitmap(self.region.area.height as i32)
                .max(0) as u32,
        )
    }

    /// The device region this window occupies on its bitmap.
    pub fn calculate_region_on_bitmap(&self) -> Rectangle {
        Rectangle::new(
            self.calculate_point_on_bitmap(),
            self.calculate_area_on_bitmap(),
        )
    }

    /// Convert a pixel height into normalized units of this window.
    ///
    /// Returns 0 when the window resolves to no pixels.
    pub fn calculate_height_on_drawing(&self, pixels: i32) -> i32 {
        unscale_rounded(pixels, self.calculate_area_on_bitmap().height)
    }

    /// Convert a pixel width into normalized units of this window.
    ///
    /// Returns 0 when the window resolves to no pixels.
    pub fn calculate_width_on_drawing(&self, pixels: i32) -> i32 {
        unscale_rounded(pixels, self.calculate_area_on_bitmap().width)
    }

    /// Area with the given width and whatever height makes the resolved box square.
    pub fn calculate_square_width(&self, width: u16) -> DrawingArea {
        let pixel_width = self.calculate_area_on_bitmap().width as i64 * width as i64 / SCALE as i64;
        let denominator = self.region.area.height as i64 * self.bitmap.usable_height() as i64;
        let height = if denominator == 0 {
            0
        } else {
            pixel_width * (SCALE as i64) * (SCALE as i64) / denominator
        };
        DrawingArea::new(width, clamp_u16(height as i32))
    }

    /// Area with the given height and whatever width makes the resolved box square.
    pub fn calculate_square_height(&self, height: u16) -> DrawingArea {
        let pixel_height =
            self.calculate_area_on_bitmap().height as i64 * height as i64 / SCALE as i64;
        let denominator = self.region.area.width as i64 * self.bitmap.usable_width() as i64;
        let width = if denominator == 0 {
            0
        } else {
            pixel_height * (SCALE as i64) * (SCALE as i64) / denominator
        };
        DrawingArea::new(clamp_u16(width as i32), height)
    }

    /// Pixel-space view of this window for drawing.
    pub fn to_scaled(&self) -> ScaledAttributes {
        ScaledAttributes::new(self.calculate_region_on_bitmap())
    }
}

impl Add<DrawingPoint> for DrawingAttributes {
    type Output = DrawingAttributes;

    fn add(mut self, point: DrawingPoint) -> DrawingAttributes {
        let x = self.region.point.x as i32 + self.calculate_width(point.x as i32);
        let y = self.region.point.y as i32 + self.calculate_height(point.y as i32);
        self.region.point = DrawingPoint::new(clamp_i16(x), clamp_i16(y));
        self
    }
}

impl Add<DrawingArea> for DrawingAttributes {
    type Output = DrawingAttributes;

    fn add(mut self, area: DrawingArea) -> DrawingAttributes {
        let width = self.calculate_width(area.width as i32);
        let height = self.calculate_height(area.height as i32);
        self.region.area = DrawingArea::new(clamp_u16(width), clamp_u16(height));
        self
    }
}

impl Add<DrawingRegion> for DrawingAttributes {
    type Output = DrawingAttributes;

    fn add(self, region: DrawingRegion) -> DrawingAttributes {
        self + region.point + region.area
    }
}

// ---------------------------------------------------------------------------
// Pixel-space attributes
// ---------------------------------------------------------------------------

/// A window in device pixels, used by widget `draw` implementations.
///
/// Same composition rules as [`DrawingAttributes`] but already resolved, so
/// nothing has to be rescaled per primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScaledAttributes {
    region: Rectangle,
}

impl ScaledAttributes {
    pub fn new(region: Rectangle) -> Self {
        Self { region }
    }

    pub fn region(&self) -> Rectangle {
        self.region
    }

    pub fn point(&self) -> Point {
        self.region.top_left
    }

    pub fn size(&self) -> Size {
        self.region.size
    }

    pub fn width(&self) -> u32 {
        self.region.size.width
    }

    pub fn height(&self) -> u32 {
        self.region.size.height
    }

    /// Scale a normalized width into this window's pixels.
    pub fn calculate_width(&self, value: i32) -> i32 {
        scale_rounded(value, self.region.size.width as i32)
    }

    /// Scale a normalized height into this window's pixels.
    pub fn calculate_height(&self, value: i32) -> i32 {
        scale_rounded(value, self.region.size.height as i32)
    }

    /// Resolve a normalized sub-box of this window to device pixels.
    pub fn calculate_region(&self, region: DrawingRegion) -> Rectangle {
        Rectangle::new(
            self.region.top_left
                + Point::new(
                    self.calculate_width(region.point.x as i32),
                    self.calculate_height(region.point.y as i32),
                ),
            Size::new(
                self.calculate_width(region.area.width as i32).max(0) as u32,
                self.calculate_height(region.area.height as i32).max(0) as u32,
            ),
        )
    }

    /// Nest a normalized sub-box, mirroring `DrawingAttributes + region`.
    pub fn nested(&self, region: DrawingRegion) -> ScaledAttributes {
        ScaledAttributes::new(self.calculate_region(region))
    }
}

impl Add<Point> for ScaledAttributes {
    type Output = ScaledAttributes;

    fn add(mut self, point: Point) -> ScaledAttributes {
        self.region.top_left += point;
        self
    }
}

impl Add<Size> for ScaledAttributes {
    type Output = ScaledAttributes;

    fn add(mut self, size: Size) -> ScaledAttributes {
        self.region.size = size;
        self
    }
}

// ---------------------------------------------------------------------------
// Primitive helpers
// ---------------------------------------------------------------------------

/// Fill the region `attributes` resolve to.
pub fn draw_rectangle(
    bitmap: &mut Bitmap,
    attributes: &DrawingAttributes,
    color: Rgb565,
) -> Result<(), Infallible> {
    bitmap.fill_solid(&attributes.calculate_region_on_bitmap(), color)
}

/// Fill a pixel window.
pub fn fill(bitmap: &mut Bitmap, attributes: &ScaledAttributes, color: Rgb565) -> Result<(), Infallible> {
    bitmap.fill_solid(&attributes.region(), color)
}
