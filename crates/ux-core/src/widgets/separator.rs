// src/widgets/separator.rs
//! Spacer / divider

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};

use crate::bitmap::Bitmap;
use crate::component::{DrawContext, DrawResult, Widget};
use crate::drawing::ScaledAttributes;

/// Fills its area with the background, optionally with a divider line
/// across the middle. Also used as list filler.
#[derive(Debug, Default)]
pub struct Separator {
    line: bool,
}

impl Separator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line(mut self, line: bool) -> Self {
        self.line = line;
        self
    }
}

impl Widget for Separator {
    fn draw(
        &mut self,
        cx: &DrawContext<'_>,
        attributes: ScaledAttributes,
        bitmap: &mut Bitmap,
    ) -> DrawResult {
        let palette = cx.palette();
        bitmap.clear(palette.background)?;
        if self.line {
            let region = attributes.region();
            let y = region.center().y;
            let right = region.top_left.x + region.size.width as i32 - 1;
            Line::new(Point::new(region.top_left.x, y), Point::new(right, y))
                .into_styled(PrimitiveStyle::with_stroke(palette.border, 1))
                .draw(bitmap)?;
        }
        Ok(())
    }
}
