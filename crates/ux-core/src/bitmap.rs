//! Off-screen pixel buffers.
//!
//! Every visible component owns one [`Bitmap`] sized to its resolved device
//! area. Components draw into it with `embedded-graphics` and the display
//! later copies the dirty slice out of it.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Colour depth a display reports for its frame memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitsPerPixel {
    One,
    Four,
    Eight,
    #[default]
    Sixteen,
}

impl BitsPerPixel {
    pub fn bits(&self) -> u8 {
        match self {
            BitsPerPixel::One => 1,
            BitsPerPixel::Four => 4,
            BitsPerPixel::Eight => 8,
            BitsPerPixel::Sixteen => 16,
        }
    }
}

/// Pixel margins that normalized coordinates never reach into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Margins {
    pub const fn uniform(px: u32) -> Self {
        Self {
            left: px,
            top: px,
            right: px,
            bottom: px,
        }
    }
}

/// Geometry of a target bitmap: pixel size, margins and colour depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitmapInfo {
    pub size: Size,
    pub margins: Margins,
    pub bits_per_pixel: BitsPerPixel,
}

impl BitmapInfo {
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            margins: Margins {
                left: 0,
                top: 0,
                right: 0,
                bottom: 0,
            },
            bits_per_pixel: BitsPerPixel::Sixteen,
        }
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_bits_per_pixel(mut self, bits_per_pixel: BitsPerPixel) -> Self {
        self.bits_per_pixel = bits_per_pixel;
        self
    }

    /// Width available to normalized coordinates (size minus margins).
    pub fn usable_width(&self) -> u32 {
        self.size
            .width
            .saturating_sub(self.margins.left + self.margins.right)
    }

    /// Height available to normalized coordinates (size minus margins).
    pub fn usable_height(&self) -> u32 {
        self.size
            .height
            .saturating_sub(self.margins.top + self.margins.bottom)
    }

    pub fn is_empty(&self) -> bool {
        self.size.width == 0 || self.size.height == 0
    }

    /// Bytes of frame memory a bitmap of this geometry occupies.
    pub fn byte_size(&self) -> usize {
        let bits = self.size.width as usize * self.size.height as usize;
        (bits * self.bits_per_pixel.bits() as usize).div_ceil(8)
    }
}

/// Heap-allocated `Rgb565` bitmap implementing `DrawTarget`.
///
/// Drawing outside the bitmap is clipped silently.
#[derive(Debug, Clone)]
pub struct Bitmap {
    info: BitmapInfo,
    pixels: Vec<Rgb565>,
}

impl Bitmap {
    /// Allocate a bitmap filled with black pixels.
    pub fn new(size: Size, bits_per_pixel: BitsPerPixel) -> Self {
        let count = size.width as usize * size.height as usize;
        Self {
            info: BitmapInfo::new(size).with_bits_per_pixel(bits_per_pixel),
            pixels: vec![Rgb565::BLACK; count],
        }
    }

    pub fn info(&self) -> BitmapInfo {
        self.info
    }

    pub fn width(&self) -> u32 {
        self.info.size.width
    }

    pub fn height(&self) -> u32 {
        self.info.size.height
    }

    /// The whole bitmap as a device region.
    pub fn region(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.info.size)
    }

    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.index(point).map(|idx| self.pixels[idx])
    }

    pub fn set_pixel(&mut self, point: Point, color: Rgb565) {
        if let Some(idx) = self.index(point) {
            self.pixels[idx] = color;
        }
    }

    /// Iterate the pixels of `area` row by row, clipped to the bitmap.
    ///
    /// Pixels of `area` that fall outside the bitmap read as black.
    pub fn pixels_in(&self, area: Rectangle) -> impl Iterator<Item = Rgb565> + '_ {
        area.points()
            .map(move |p| self.pixel(p).unwrap_or(Rgb565::BLACK))
    }

    #[inline]
    fn index(&self, point: Point) -> Option<usize> {
        let w = self.info.size.width as i32;
        let h = self.info.size.height as i32;
        if point.x >= 0 && point.y >= 0 && point.x < w && point.y < h {
            Some(point.y as usize * w as usize + point.x as usize)
        } else {
            None
        }
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size {
        self.info.size
    }
}

impl DrawTarget for Bitmap {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set_pixel(coord, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.region());
        if clipped.is_zero_sized() {
            return Ok(());
        }
        let stride = self.info.size.width as usize;
        let x_start = clipped.top_left.x as usize;
        let x_end = x_start + clipped.size.width as usize;

        for row in 0..clipped.size.height as usize {
            let y = clipped.top_left.y as usize + row;
            self.pixels[y * stride + x_start..y * stride + x_end].fill(color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_allocation_matches_size() {
        let bitmap = Bitmap::new(Size::new(40, 25), BitsPerPixel::Sixteen);
        assert_eq!(bitmap.width(), 40);
        assert_eq!(bitmap.height(), 25);
        assert_eq!(bitmap.info().byte_size(), 40 * 25 * 2);
    }

    #[test]
    fn test_fill_solid_clips() {
        let mut bitmap = Bitmap::new(Size::new(10, 10), BitsPerPixel::Sixteen);
        bitmap
            .fill_solid(
                &Rectangle::new(Point::new(8, 8), Size::new(5, 5)),
                Rgb565::RED,
            )
            .ok();

        assert_eq!(bitmap.pixel(Point::new(9, 9)), Some(Rgb565::RED));
        assert_eq!(bitmap.pixel(Point::new(7, 7)), Some(Rgb565::BLACK));
        assert_eq!(bitmap.pixel(Point::new(10, 10)), None);
    }

    #[test]
    fn test_usable_size_excludes_margins() {
        let info = BitmapInfo::new(Size::new(100, 80)).with_margins(Margins::uniform(5));
        assert_eq!(info.usable_width(), 90);
        assert_eq!(info.usable_height(), 70);
    }

    #[test]
    fn test_one_bit_byte_size_rounds_up() {
        let info = BitmapInfo::new(Size::new(3, 3)).with_bits_per_pixel(BitsPerPixel::One);
        assert_eq!(info.byte_size(), 2);
    }
}
