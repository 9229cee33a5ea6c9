//! Display device abstraction and a RAM-backed implementation.
//!
//! Components never draw to the display directly. They draw into their own
//! bitmap and `refresh_drawing` copies the dirty slice through
//! [`DisplayDevice::set_window`] + [`DisplayDevice::write_bitmap`].
//!
//! [`FrameBufferDisplay`] keeps the whole screen in RAM and remembers the
//! region covering every pixel whose color changed. [`FrameBufferDisplay::flush`]
//! mirrors just that region onto a real panel.

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;
use thiserror_no_std::Error;

use crate::bitmap::{Bitmap, BitmapInfo, BitsPerPixel};
use crate::geometry;
use crate::theme::Palette;

/// Errors reported by a display device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DisplayError {
    /// The device is disabled and rejects pixel writes
    #[error("Display is disabled")]
    Disabled,

    /// The requested window lies entirely outside the display
    #[error("Window out of bounds")]
    WindowOutOfBounds,

    /// The transport failed while performing an operation
    #[error("Display I/O failed during {operation}")]
    Io {
        /// Operation that failed
        operation: &'static str,
    },
}

/// A sink for resolved device regions.
pub trait DisplayDevice {
    /// Geometry of the display's frame memory.
    fn info(&self) -> BitmapInfo;

    /// Select the window subsequent writes and clears apply to.
    fn set_window(&mut self, window: Rectangle) -> Result<(), DisplayError>;

    /// Copy the window-sized block of `bitmap` starting at `offset` into the window.
    fn write_bitmap(&mut self, bitmap: &Bitmap, offset: Point) -> Result<(), DisplayError>;

    /// Fill the current window with the palette background.
    fn clear(&mut self) -> Result<(), DisplayError>;

    fn enable(&mut self) -> Result<(), DisplayError>;

    fn disable(&mut self) -> Result<(), DisplayError>;

    fn set_palette(&mut self, palette: &Palette) -> Result<(), DisplayError>;

    fn is_busy(&self) -> bool {
        false
    }
}

/// RAM display implementing [`DisplayDevice`].
pub struct FrameBufferDisplay {
    info: BitmapInfo,
    pixels: Vec<Rgb565>,
    window: Rectangle,
    palette: Palette,
    enabled: bool,
    /// Pixels written since the last flush
    changed: Option<Rectangle>,
    write_count: usize,
}

impl FrameBufferDisplay {
    /// Allocate a display of `size` filled with black pixels.
    pub fn new(size: Size) -> Self {
        Self::with_info(BitmapInfo::new(size))
    }

    pub fn with_info(info: BitmapInfo) -> Self {
        let count = info.size.width as usize * info.size.height as usize;
        Self {
            info,
            pixels: vec![Rgb565::BLACK; count],
            window: Rectangle::new(Point::zero(), info.size),
            palette: Palette::default(),
            enabled: true,
            changed: None,
            write_count: 0,
        }
    }

    pub fn with_bits_per_pixel(mut self, bits_per_pixel: BitsPerPixel) -> Self {
        self.info.bits_per_pixel = bits_per_pixel;
        self
    }

    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        let w = self.info.size.width as i32;
        let h = self.info.size.height as i32;
        if point.x >= 0 && point.y >= 0 && point.x < w && point.y < h {
            Some(self.pixels[point.y as usize * w as usize + point.x as usize])
        } else {
            None
        }
    }

    /// Current window selected by `set_window`.
    pub fn window(&self) -> Rectangle {
        self.window
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of `write_bitmap` calls since creation.
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    /// Region changed since the last flush, if any.
    pub fn changed_region(&self) -> Option<Rectangle> {
        self.changed
    }

    #[inline]
    fn set_pixel(&mut self, point: Point, color: Rgb565) {
        let idx = point.y as usize * self.info.size.width as usize + point.x as usize;
        if self.pixels[idx] == color {
            return;
        }
        self.pixels[idx] = color;
        let pixel = Rectangle::new(point, Size::new(1, 1));
        self.changed = Some(match self.changed {
            Some(region) => geometry::bounding(&region, &pixel),
            None => pixel,
        });
    }

    /// Send the changed region to a panel in one `fill_contiguous` call.
    ///
    /// Does nothing when no pixel changed since the previous flush.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(region) = self.changed.take() else {
            return Ok(());
        };
        debug!(
            "flush {}x{} at {:?}",
            region.size.width, region.size.height, region.top_left
        );

        let stride = self.info.size.width as usize;
        let left = region.top_left.x as usize;
        let width = region.size.width as usize;
        let pixels = &self.pixels;
        let colors = region.rows().flat_map(move |y| {
            let start = y as usize * stride + left;
            pixels[start..start + width].iter().copied()
        });
        display.fill_contiguous(&region, colors)
    }
}

impl DisplayDevice for FrameBufferDisplay {
    fn info(&self) -> BitmapInfo {
        self.info
    }

    fn set_window(&mut self, window: Rectangle) -> Result<(), DisplayError> {
        let bounds = Rectangle::new(Point::zero(), self.info.size);
        let clipped = window.intersection(&bounds);
        if clipped.is_zero_sized() {
            return Err(DisplayError::WindowOutOfBounds);
        }
        // Keep the requested origin so bitmap offsets still line up; clipping
        // happens per pixel on write.
        self.window = window;
        Ok(())
    }

    fn write_bitmap(&mut self, bitmap: &Bitmap, offset: Point) -> Result<(), DisplayError> {
        if !self.enabled {
            return Err(DisplayError::Disabled);
        }
        self.write_count += 1;

        let w = self.info.size.width as i32;
        let h = self.info.size.height as i32;
        let window = self.window;
        for row in 0..window.size.height as i32 {
            let y = window.top_left.y + row;
            if y < 0 || y >= h {
                continue;
            }
            for col in 0..window.size.width as i32 {
                let x = window.top_left.x + col;
                if x < 0 || x >= w {
                    continue;
                }
                if let Some(color) = bitmap.pixel(offset + Point::new(col, row)) {
                    self.set_pixel(Point::new(x, y), color);
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        if !self.enabled {
            return Err(DisplayError::Disabled);
        }
        let bounds = Rectangle::new(Point::zero(), self.info.size);
        let clipped = self.window.intersection(&bounds);
        let background = self.palette.background;
        for point in clipped.points() {
            self.set_pixel(point, background);
        }
        Ok(())
    }

    fn enable(&mut self) -> Result<(), DisplayError> {
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), DisplayError> {
        self.enabled = false;
        Ok(())
    }

    fn set_palette(&mut self, palette: &Palette) -> Result<(), DisplayError> {
        self.palette = *palette;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_bitmap_uses_offset() {
        let mut display = FrameBufferDisplay::new(Size::new(20, 20));
        let mut bitmap = Bitmap::new(Size::new(10, 10), BitsPerPixel::Sixteen);
        bitmap.set_pixel(Point::new(4, 6), Rgb565::RED);

        display
            .set_window(Rectangle::new(Point::new(10, 10), Size::new(2, 2)))
            .unwrap();
        display.write_bitmap(&bitmap, Point::new(4, 6)).unwrap();

        assert_eq!(display.pixel(Point::new(10, 10)), Some(Rgb565::RED));
        assert_eq!(display.pixel(Point::new(11, 11)), Some(Rgb565::BLACK));
        assert_eq!(display.write_count(), 1);
    }

    #[test]
    fn test_window_outside_is_rejected() {
        let mut display = FrameBufferDisplay::new(Size::new(20, 20));
        let result = display.set_window(Rectangle::new(Point::new(30, 0), Size::new(5, 5)));
        assert_eq!(result, Err(DisplayError::WindowOutOfBounds));
    }

    #[test]
    fn test_disabled_display_rejects_writes() {
        let mut display = FrameBufferDisplay::new(Size::new(4, 4));
        let bitmap = Bitmap::new(Size::new(4, 4), BitsPerPixel::Sixteen);
        display.disable().unwrap();
        assert_eq!(
            display.write_bitmap(&bitmap, Point::zero()),
            Err(DisplayError::Disabled)
        );
    }

    #[test]
    fn test_clear_fills_window_with_background() {
        let mut display = FrameBufferDisplay::new(Size::new(8, 8));
        let palette = Palette {
            background: Rgb565::BLUE,
            ..Palette::default()
        };
        display.set_palette(&palette).unwrap();
        display
            .set_window(Rectangle::new(Point::new(2, 2), Size::new(2, 2)))
            .unwrap();
        display.clear().unwrap();

        assert_eq!(display.pixel(Point::new(3, 3)), Some(Rgb565::BLUE));
        assert_eq!(display.pixel(Point::new(4, 4)), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_flush_sends_only_changed_region() {
        let mut display = FrameBufferDisplay::new(Size::new(8, 8));
        let mut bitmap = Bitmap::new(Size::new(8, 8), BitsPerPixel::Sixteen);
        bitmap.set_pixel(Point::new(2, 1), Rgb565::RED);
        bitmap.set_pixel(Point::new(5, 4), Rgb565::GREEN);
        display.write_bitmap(&bitmap, Point::zero()).unwrap();
        assert_eq!(
            display.changed_region(),
            Some(Rectangle::new(Point::new(2, 1), Size::new(4, 4)))
        );

        let mut panel = Bitmap::new(Size::new(8, 8), BitsPerPixel::Sixteen);
        panel.clear(Rgb565::WHITE).unwrap();
        display.flush(&mut panel).unwrap();
        assert_eq!(panel.pixel(Point::new(2, 1)), Some(Rgb565::RED));
        assert_eq!(panel.pixel(Point::new(5, 4)), Some(Rgb565::GREEN));
        assert_eq!(panel.pixel(Point::new(3, 2)), Some(Rgb565::BLACK));
        assert_eq!(panel.pixel(Point::new(0, 0)), Some(Rgb565::WHITE));
        assert_eq!(panel.pixel(Point::new(6, 5)), Some(Rgb565::WHITE));
        assert!(display.changed_region().is_none());
    }

    #[test]
    fn test_unchanged_pixels_leave_nothing_to_flush() {
        let mut display = FrameBufferDisplay::new(Size::new(4, 4));
        let bitmap = Bitmap::new(Size::new(4, 4), BitsPerPixel::Sixteen);
        display.write_bitmap(&bitmap, Point::zero()).unwrap();
        assert!(display.changed_region().is_none());
    }
}
