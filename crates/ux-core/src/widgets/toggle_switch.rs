// src/widgets/toggle_switch.rs
//! On/off switch bound to a boolean model value

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::bitmap::Bitmap;
use crate::component::{DrawContext, DrawResult, EventContext, Widget};
use crate::drawing::ScaledAttributes;
use crate::event::{Event, SystemEvent, TouchEventId, WidgetEventId};
use crate::widgets::inset;

/// Switch that flips on every release inside it.
///
/// The state is stored in the model as `"true"` / `"false"` under the
/// component's name and re-read on `Enter`.
#[derive(Debug, Default)]
pub struct ToggleSwitch {
    state: bool,
}

impl ToggleSwitch {
    pub fn new(state: bool) -> Self {
        Self { state }
    }

    pub fn state(&self) -> bool {
        self.state
    }
}

impl Widget for ToggleSwitch {
    fn draw(
        &mut self,
        cx: &DrawContext<'_>,
        attributes: ScaledAttributes,
        bitmap: &mut Bitmap,
    ) -> DrawResult {
        let palette = cx.palette();
        let region = attributes.region();
        let height = region.size.height;

        let border_offset = (height / 100).max(1);
        let active_offset = height / 10;
        let toggle_offset = active_offset + height / 10;
        let toggle_total_width = region.size.width.saturating_sub(toggle_offset * 2);
        let toggle_width = toggle_total_width * 60 / 100;
        let travel = toggle_total_width - toggle_width;

        bitmap.clear(palette.border)?;
        inset(region, border_offset)
            .into_styled(PrimitiveStyle::with_fill(palette.color))
            .draw(bitmap)?;

        let track = if self.state {
            palette.text
        } else {
            palette.border
        };
        inset(region, active_offset)
            .into_styled(PrimitiveStyle::with_fill(track))
            .draw(bitmap)?;

        let knob_x = if self.state { travel } else { 0 };
        Rectangle::new(
            region.top_left + Point::new((toggle_offset + knob_x) as i32, toggle_offset as i32),
            Size::new(toggle_width, height.saturating_sub(toggle_offset * 2)),
        )
        .into_styled(PrimitiveStyle::with_fill(palette.color))
        .draw(bitmap)
    }

    fn handle_event(&mut self, event: &Event, cx: &mut EventContext<'_, '_>) {
        match event {
            Event::System(SystemEvent::Enter) => {
                if let Some(value) = cx.value() {
                    let state = value == "true";
                    if state != self.state {
                        self.state = state;
                        cx.redraw();
                    }
                }
            }
            Event::Touch(touch)
                if touch.id == TouchEventId::Released && cx.contains(touch.point) =>
            {
                self.state = !self.state;
                cx.set_value_bool(self.state);
                cx.trigger_event(WidgetEventId::Changed);
                cx.redraw();
            }
            _ => {}
        }
    }
}
