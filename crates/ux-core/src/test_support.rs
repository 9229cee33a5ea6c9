//! Shared fixtures for unit tests.

use alloc::vec::Vec;

use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::assets::Assets;
use crate::bitmap::Bitmap;
use crate::component::{DrawContext, DrawResult, EventContext, Widget};
use crate::context::UxContext;
use crate::display::{DisplayDevice, FrameBufferDisplay};
use crate::drawing::ScaledAttributes;
use crate::event::{Event, EventStack};
use crate::model::Model;
use crate::theme::Theme;

/// Owns everything a [`UxContext`] borrows.
pub(crate) struct Harness {
    pub model: Model,
    pub theme: Theme,
    pub assets: Assets,
    pub display: FrameBufferDisplay,
    pub events: EventStack,
    pub now: Instant,
    has_display: bool,
}

impl Harness {
    pub fn new(size: Size) -> Self {
        Self {
            model: Model::new(),
            theme: Theme::dark(),
            assets: Assets::builtin(),
            display: FrameBufferDisplay::new(size),
            events: EventStack::new(),
            now: Instant::from_millis(0),
            has_display: true,
        }
    }

    pub fn headless() -> Self {
        Self {
            has_display: false,
            ..Self::new(Size::new(1, 1))
        }
    }

    pub fn ctx(&mut self) -> UxContext<'_> {
        let display = if self.has_display {
            Some(&mut self.display as &mut dyn DisplayDevice)
        } else {
            None
        };
        UxContext::new(
            &mut self.model,
            &self.theme,
            &self.assets,
            display,
            &mut self.events,
            self.now,
        )
    }

    /// Drain triggered events, oldest first.
    pub fn take_events(&mut self) -> Vec<Event> {
        let mut drained = Vec::new();
        self.events.swap(&mut drained);
        drained
    }
}

/// Widget that fills itself with one color and records what it sees.
///
/// `Event::Application { id: 1, value: n }` makes it trigger `n` application
/// events with ids `100..100 + n`.
pub(crate) struct Probe {
    pub color: Rgb565,
    pub seen: Vec<Event>,
    pub draws: usize,
}

impl Probe {
    pub fn new(color: Rgb565) -> Self {
        Self {
            color,
            seen: Vec::new(),
            draws: 0,
        }
    }
}

impl Widget for Probe {
    fn draw(
        &mut self,
        _cx: &DrawContext<'_>,
        _attributes: ScaledAttributes,
        bitmap: &mut Bitmap,
    ) -> DrawResult {
        self.draws += 1;
        bitmap.clear(self.color)
    }

    fn handle_event(&mut self, event: &Event, cx: &mut EventContext<'_, '_>) {
        self.seen.push(event.clone());
        if let Event::Application { id: 1, value } = event {
            for i in 0..*value {
                cx.trigger(Event::Application {
                    id: 100 + i as u32,
                    value: 0,
                });
            }
        }
    }
}
