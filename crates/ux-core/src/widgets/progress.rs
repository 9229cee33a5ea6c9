// src/widgets/progress.rs
//! Progress bar bound to a `"value/maximum"` model value

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::bitmap::Bitmap;
use crate::component::{DrawContext, DrawResult, Widget};
use crate::drawing::ScaledAttributes;
use crate::widgets::{draw_panel, inset, parse_fraction};

/// A bar filled in proportion to `value / maximum`.
///
/// A maximum of 0 is indeterminate: a fixed-width block whose position
/// follows `value % 100`, so bumping the value animates it.
#[derive(Debug)]
pub struct ProgressBar {
    indicator_percent: u32,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBar {
    pub fn new() -> Self {
        Self {
            indicator_percent: 20,
        }
    }

    /// Width of the indeterminate block, 3..=95 percent of the bar.
    pub fn with_indicator_percent(mut self, percent: u32) -> Self {
        self.indicator_percent = percent.clamp(3, 95);
        self
    }

    /// The filled part of `inner` for a `value/maximum` pair.
    pub fn filled_region(&self, inner: Rectangle, value: u32, maximum: u32) -> Rectangle {
        let full = inner.size.width;
        let (width, offset) = if maximum == 0 {
            let width = full * self.indicator_percent / 100;
            let offset = full * (value % 100) / 100;
            (width, offset.min(full - width))
        } else {
            ((full as u64 * value.min(maximum) as u64 / maximum as u64) as u32, 0)
        };
        Rectangle::new(
            inner.top_left + Point::new(offset as i32, 0),
            Size::new(width, inner.size.height),
        )
    }
}

impl Widget for ProgressBar {
    fn draw(
        &mut self,
        cx: &DrawContext<'_>,
        attributes: ScaledAttributes,
        bitmap: &mut Bitmap,
    ) -> DrawResult {
        let palette = cx.palette();
        draw_panel(bitmap, attributes.region(), &palette, 0)?;

        let (value, maximum) = parse_fraction(cx.value);
        let inner = inset(attributes.region(), attributes.height() / 5);
        self.filled_region(inner, value, maximum)
            .into_styled(PrimitiveStyle::with_fill(palette.text))
            .draw(bitmap)
    }
}
