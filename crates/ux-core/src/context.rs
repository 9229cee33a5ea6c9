//! Per-dispatch context handed down the component tree.
//!
//! Everything a component needs from the outside world (model, theme, fonts,
//! display, event queue and the current time) arrives through this struct
//! instead of a global. The event loop builds one per distributed event.

use embassy_time::Instant;

use crate::assets::Assets;
use crate::bitmap::BitmapInfo;
use crate::display::{DisplayDevice, DisplayError};
use crate::event::{Event, EventStack};
use crate::model::Model;
use crate::theme::{Theme, ThemeState, ThemeStyle};

pub struct UxContext<'a> {
    model: &'a mut Model,
    theme: &'a Theme,
    assets: &'a Assets,
    display: Option<&'a mut dyn DisplayDevice>,
    events: &'a mut EventStack,
    now: Instant,
}

impl<'a> UxContext<'a> {
    pub fn new(
        model: &'a mut Model,
        theme: &'a Theme,
        assets: &'a Assets,
        display: Option<&'a mut dyn DisplayDevice>,
        events: &'a mut EventStack,
        now: Instant,
    ) -> Self {
        Self {
            model,
            theme,
            assets,
            display,
            events,
            now,
        }
    }

    pub fn model(&self) -> &Model {
        self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        self.model
    }

    pub fn theme(&self) -> &Theme {
        self.theme
    }

    pub fn assets(&self) -> &Assets {
        self.assets
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn has_display(&self) -> bool {
        self.display.is_some()
    }

    /// Geometry of the display, if one is attached.
    pub fn display_info(&self) -> Option<BitmapInfo> {
        self.display.as_ref().map(|d| d.info())
    }

    pub fn display_mut(&mut self) -> Option<&mut (dyn DisplayDevice + 'a)> {
        self.display.as_deref_mut()
    }

    /// Load the theme palette for `style`/`state` into the display.
    pub fn set_display_palette(
        &mut self,
        style: ThemeStyle,
        state: ThemeState,
    ) -> Result<(), DisplayError> {
        match self.display.as_deref_mut() {
            Some(display) => self.theme.set_display_palette(display, style, state),
            None => Ok(()),
        }
    }

    /// Queue an event for the next pass of the event loop.
    pub fn trigger_event(&mut self, event: Event) {
        self.events.trigger(event);
    }

    pub fn events(&self) -> &EventStack {
        self.events
    }
}
