// src/widgets/mod.rs
//! Stock widgets and the drawing helpers they share.
//!
//! Every widget draws its whole local bitmap from scratch: background first,
//! then the themed panel, then content. Text goes through the font registry
//! in [`Assets`](crate::Assets), sized to the widget's height.

mod button;
mod label;
mod list;
mod progress;
mod separator;
mod slider;
mod text_area;
mod toggle_switch;

pub use button::Button;
pub use label::Label;
pub use list::{List, ListItem};
pub use progress::ProgressBar;
pub use separator::Separator;
pub use slider::Slider;
pub use text_area::TextArea;
pub use toggle_switch::ToggleSwitch;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::assets::{FindFont, FontInfo};
use crate::bitmap::Bitmap;
use crate::component::{DrawContext, DrawResult};
use crate::theme::Palette;

/// Horizontal placement of a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Split a `"value/maximum"` model string.
///
/// A missing or malformed value reads as 0, a missing maximum as 100.
pub(crate) fn parse_fraction(value: Option<&str>) -> (u32, u32) {
    let mut parts = value.unwrap_or("").split('/');
    let value = parts
        .next()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0);
    let maximum = parts
        .next()
        .and_then(|m| m.trim().parse().ok())
        .unwrap_or(100);
    (value, maximum)
}

/// Shrink `region` by `by` pixels on every side.
pub(crate) fn inset(region: Rectangle, by: u32) -> Rectangle {
    let width = region.size.width.saturating_sub(by * 2);
    let height = region.size.height.saturating_sub(by * 2);
    Rectangle::new(
        region.top_left + Point::new(by as i32, by as i32),
        Size::new(width, height),
    )
}

/// Clear to the background and draw the themed panel.
pub(crate) fn draw_panel(
    bitmap: &mut Bitmap,
    region: Rectangle,
    palette: &Palette,
    radius: u32,
) -> DrawResult {
    bitmap.clear(palette.background)?;
    let style = PrimitiveStyleBuilder::new()
        .fill_color(palette.color)
        .stroke_color(palette.border)
        .stroke_width(1)
        .build();
    RoundedRectangle::with_equal_corners(region, Size::new(radius, radius))
        .into_styled(style)
        .draw(bitmap)
}

/// Largest registered text font that fits `height` pixels.
pub(crate) fn font_for_height<'a>(cx: &'a DrawContext<'_>, height: u32) -> Option<&'a FontInfo> {
    let point_size = (height * 6 / 10).min(u8::MAX as u32) as u8;
    cx.assets
        .find_font(FindFont::new(cx.theme.primary_font_name()).with_point_size(point_size))
        .or_else(|| cx.assets.fonts().iter().find(|f| !f.is_icon))
}

/// Draw one line of text vertically centered in `region`.
pub(crate) fn draw_text(
    bitmap: &mut Bitmap,
    cx: &DrawContext<'_>,
    text: &str,
    region: Rectangle,
    align: TextAlign,
    color: Rgb565,
) -> DrawResult {
    if text.is_empty() || region.is_zero_sized() {
        return Ok(());
    }
    let Some(font) = font_for_height(cx, region.size.height) else {
        return Ok(());
    };

    let pad = font.font.character_size.width as i32 / 2;
    let center = region.center();
    let (x, alignment) = match align {
        TextAlign::Left => (region.top_left.x + pad, Alignment::Left),
        TextAlign::Center => (center.x, Alignment::Center),
        TextAlign::Right => (
            region.top_left.x + region.size.width as i32 - 1 - pad,
            Alignment::Right,
        ),
    };

    let character_style = MonoTextStyle::new(font.font, color);
    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Middle)
        .build();
    Text::with_text_style(text, Point::new(x, center.y), character_style, text_style)
        .draw(bitmap)
        .map(|_| ())
}
