// src/widgets/slider.rs
//! Horizontal slider bound to a `"value/maximum"` model value

use core::fmt::Write;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::bitmap::Bitmap;
use crate::component::{DrawContext, DrawResult, EventContext, Widget};
use crate::drawing::ScaledAttributes;
use crate::event::{Event, SystemEvent, TouchEventId, WidgetEventId};
use crate::widgets::{inset, parse_fraction};

/// Slider that follows the pointer while pressed.
///
/// The outer 5% on either side snap to 0 and to the maximum so the ends are
/// easy to hit.
#[derive(Debug)]
pub struct Slider {
    value: u32,
    maximum: u32,
    touched: bool,
}

impl Default for Slider {
    fn default() -> Self {
        Self::new(0, 100)
    }
}

impl Slider {
    pub fn new(value: u32, maximum: u32) -> Self {
        Self {
            value: value.min(maximum),
            maximum,
            touched: false,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    /// Value for a horizontal position in 0..1000 units.
    pub fn value_at(&self, x: i16) -> u32 {
        match x {
            x if x < 50 => 0,
            x if x > 950 => self.maximum,
            x => ((x as u64 - 50) * self.maximum as u64 / 900) as u32,
        }
    }

    fn update_touch_point(&mut self, point: Point, cx: &mut EventContext<'_, '_>) {
        let value = self.value_at(cx.translate_point(point).x);
        if value == self.value {
            return;
        }
        self.value = value;

        let mut model: heapless::String<24> = heapless::String::new();
        if write!(model, "{}/{}", self.value, self.maximum).is_ok() {
            cx.set_value(&model);
        }
        cx.trigger_event(WidgetEventId::Changed);
        cx.redraw();
    }
}

impl Widget for Slider {
    fn draw(
        &mut self,
        cx: &DrawContext<'_>,
        attributes: ScaledAttributes,
        bitmap: &mut Bitmap,
    ) -> DrawResult {
        let palette = cx.palette();
        let inner = inset(attributes.region(), attributes.height() / 10);
        bitmap.clear(palette.background)?;

        let track_inset = Size::new(inner.size.width * 8 / 100, inner.size.height * 4 / 10);
        Rectangle::new(
            inner.top_left + Point::new(track_inset.width as i32, track_inset.height as i32),
            Size::new(
                inner.size.width.saturating_sub(track_inset.width * 2),
                inner.size.height.saturating_sub(track_inset.height * 2),
            ),
        )
        .into_styled(PrimitiveStyle::with_fill(palette.border))
        .draw(bitmap)?;

        let indicator = Size::new(inner.size.width / 10, inner.size.height);
        let range = inner.size.width - indicator.width;
        let position = if self.maximum == 0 {
            0
        } else {
            (self.value.min(self.maximum) as u64 * range as u64 / self.maximum as u64) as u32
        };
        Rectangle::new(inner.top_left + Point::new(position as i32, 0), indicator)
            .into_styled(PrimitiveStyle::with_fill(palette.color))
            .draw(bitmap)
    }

    fn handle_event(&mut self, event: &Event, cx: &mut EventContext<'_, '_>) {
        match event {
            Event::System(SystemEvent::Enter) => {
                if let Some(value) = cx.value() {
                    let (value, maximum) = parse_fraction(Some(value));
                    self.maximum = maximum;
                    self.value = value.min(maximum);
                    cx.redraw();
                }
            }
            Event::System(SystemEvent::Exit) => self.touched = false,
            Event::Touch(touch) => match touch.id {
                TouchEventId::Pressed if cx.contains(touch.point) => {
                    self.touched = true;
                    cx.trigger_event(WidgetEventId::Pressed);
                    self.update_touch_point(touch.point, cx);
                }
                TouchEventId::Active if self.touched => {
                    self.update_touch_point(touch.point, cx);
                    cx.trigger_event(WidgetEventId::Active);
                }
                TouchEventId::Released if self.touched => {
                    self.touched = false;
                    self.update_touch_point(touch.point, cx);
                    cx.trigger_event(WidgetEventId::Released);
                }
                _ => {}
            },
            _ => {}
        }
    }
}
