// src/widgets/button.rs
//! Push button with press, release and hold reporting

use embassy_time::Instant;

use crate::bitmap::Bitmap;
use crate::component::{DrawContext, DrawResult, EventContext, Widget};
use crate::drawing::ScaledAttributes;
use crate::event::{Event, SystemEvent, TouchEventId, WidgetEventId};
use crate::geometry::{self, Name};
use crate::theme::ThemeState;
use crate::widgets::{TextAlign, draw_panel, draw_text, inset};

/// Button with a text label
///
/// # Touch Behavior
/// - Press inside: highlights and triggers `Pressed`
/// - A drag cancels the highlight, so the release is not reported
/// - Release inside while highlighted: triggers `Released`
/// - Held past the theme's hold duration: triggers `Held` once
///
/// A model value stored under the component's name replaces the label.
/// Buttons in the `Disabled` theme state ignore touches.
///
/// # Examples
/// ```ignore
/// let ok = Component::new("ok", Button::new("OK"))
///     .with_drawing_point(100, 800)
///     .with_drawing_area(800, 150)
///     .create();
/// ```
pub struct Button {
    label: Name,
    border_radius: u32,
    pressed_at: Option<Instant>,
}

impl Button {
    pub fn new(label: &str) -> Self {
        Self {
            label: geometry::name(label),
            border_radius: 4,
            pressed_at: None,
        }
    }

    /// Default is 4 pixels.
    pub fn with_border_radius(mut self, radius: u32) -> Self {
        self.border_radius = radius;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_held(&self) -> bool {
        self.pressed_at.is_some()
    }

    fn release_highlight(&mut self, cx: &mut EventContext<'_, '_>) {
        self.pressed_at = None;
        cx.set_theme_state(ThemeState::Default);
    }
}

impl Widget for Button {
    fn draw(
        &mut self,
        cx: &DrawContext<'_>,
        attributes: ScaledAttributes,
        bitmap: &mut Bitmap,
    ) -> DrawResult {
        let palette = cx.palette();
        draw_panel(bitmap, attributes.region(), &palette, self.border_radius)?;

        let text = cx.value.unwrap_or(&self.label);
        let padding = attributes.height() / 10;
        draw_text(
            bitmap,
            cx,
            text,
            inset(attributes.region(), padding),
            TextAlign::Center,
            palette.text,
        )
    }

    fn handle_event(&mut self, event: &Event, cx: &mut EventContext<'_, '_>) {
        match event {
            Event::Touch(touch) if cx.theme_state() != ThemeState::Disabled => match touch.id {
                TouchEventId::DraggedPoint if cx.theme_state() == ThemeState::Highlighted => {
                    self.release_highlight(cx);
                }
                TouchEventId::Released if cx.theme_state() == ThemeState::Highlighted => {
                    if cx.contains(touch.point) {
                        cx.trigger_event(WidgetEventId::Released);
                    }
                    self.release_highlight(cx);
                }
                TouchEventId::Pressed if cx.contains(touch.point) => {
                    cx.trigger_event(WidgetEventId::Pressed);
                    self.pressed_at = Some(cx.now());
                    cx.set_theme_state(ThemeState::Highlighted);
                }
                _ => {}
            },
            Event::System(SystemEvent::Exit) => self.release_highlight(cx),
            Event::System(SystemEvent::Periodic) => {
                if let Some(at) = self.pressed_at
                    && cx.now().saturating_duration_since(at) >= cx.theme().button_hold_duration()
                {
                    self.pressed_at = None;
                    cx.trigger_event(WidgetEventId::Held);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::event::{ComponentEvent, TouchContext};
    use crate::geometry;
    use crate::test_support::Harness;
    use alloc::boxed::Box;
    use alloc::vec::Vec;
    use embassy_time::Duration;
    use embedded_graphics::prelude::*;

    fn button(harness: &mut Harness) -> Box<Component> {
        let mut button = Component::new("ok", Button::new("OK"))
            .with_drawing_point(0, 0)
            .with_drawing_area(500, 500)
            .create();
        button.set_visible_examine(true, &mut harness.ctx());
        harness.take_events();
        button
    }

    fn touch(id: TouchEventId, x: i32, y: i32) -> Event {
        Event::Touch(TouchContext::new(id, Point::new(x, y)))
    }

    fn ids(harness: &mut Harness) -> Vec<WidgetEventId> {
        harness
            .take_events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Component(ComponentEvent { source, id }) => {
                    assert_eq!(source, geometry::name("ok"));
                    Some(id)
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_press_and_release_inside() {
        let mut harness = Harness::new(Size::new(100, 100));
        let mut button = button(&mut harness);

        button.handle_event(&touch(TouchEventId::Pressed, 10, 10), &mut harness.ctx());
        assert_eq!(button.theme_state(), ThemeState::Highlighted);
        button.handle_event(&touch(TouchEventId::Released, 12, 12), &mut harness.ctx());
        assert_eq!(button.theme_state(), ThemeState::Default);

        assert_eq!(
            ids(&mut harness),
            [WidgetEventId::Pressed, WidgetEventId::Released]
        );
    }

    #[test]
    fn test_release_outside_only_clears_highlight() {
        let mut harness = Harness::new(Size::new(100, 100));
        let mut button = button(&mut harness);

        button.handle_event(&touch(TouchEventId::Pressed, 10, 10), &mut harness.ctx());
        button.handle_event(&touch(TouchEventId::Released, 90, 90), &mut harness.ctx());
        assert_eq!(button.theme_state(), ThemeState::Default);
        assert_eq!(ids(&mut harness), [WidgetEventId::Pressed]);
    }

    #[test]
    fn test_drag_cancels_press() {
        let mut harness = Harness::new(Size::new(100, 100));
        let mut button = button(&mut harness);

        button.handle_event(&touch(TouchEventId::Pressed, 10, 10), &mut harness.ctx());
        button.handle_event(&touch(TouchEventId::DraggedPoint, 10, 20), &mut harness.ctx());
        button.handle_event(&touch(TouchEventId::Released, 10, 20), &mut harness.ctx());
        assert_eq!(ids(&mut harness), [WidgetEventId::Pressed]);
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut harness = Harness::new(Size::new(100, 100));
        let mut button = button(&mut harness);

        button.handle_event(&touch(TouchEventId::Pressed, 80, 80), &mut harness.ctx());
        assert_eq!(button.theme_state(), ThemeState::Default);
        assert!(ids(&mut harness).is_empty());
    }

    #[test]
    fn test_hold_reports_once_after_duration() {
        let mut harness = Harness::new(Size::new(100, 100));
        let mut button = button(&mut harness);
        let periodic = Event::System(SystemEvent::Periodic);

        button.handle_event(&touch(TouchEventId::Pressed, 10, 10), &mut harness.ctx());
        harness.now += Duration::from_millis(700);
        button.handle_event(&periodic, &mut harness.ctx());
        harness.now += Duration::from_millis(50);
        button.handle_event(&periodic, &mut harness.ctx());
        harness.now += Duration::from_millis(200);
        button.handle_event(&periodic, &mut harness.ctx());

        assert_eq!(ids(&mut harness), [WidgetEventId::Pressed, WidgetEventId::Held]);
        assert_eq!(button.theme_state(), ThemeState::Highlighted);
    }

    #[test]
    fn test_exit_resets_state() {
        let mut harness = Harness::new(Size::new(100, 100));
        let mut button = button(&mut harness);

        button.handle_event(&touch(TouchEventId::Pressed, 10, 10), &mut harness.ctx());
        button.handle_event(&Event::System(SystemEvent::Exit), &mut harness.ctx());
        assert_eq!(button.theme_state(), ThemeState::Default);
        assert!(!button.widget::<Button>().unwrap().is_held());
    }

    #[test]
    fn test_disabled_ignores_touch() {
        let mut harness = Harness::new(Size::new(100, 100));
        let mut button = button(&mut harness);
        button.set_theme_state(ThemeState::Disabled);

        button.handle_event(&touch(TouchEventId::Pressed, 10, 10), &mut harness.ctx());
        assert_eq!(button.theme_state(), ThemeState::Disabled);
        assert!(ids(&mut harness).is_empty());
    }

    #[test]
    fn test_highlight_redraws_with_highlight_palette() {
        let mut harness = Harness::new(Size::new(100, 100));
        let mut button = button(&mut harness);
        let center = Point::new(25, 3);
        let before = button.local_bitmap().unwrap().pixel(center);

        button.handle_event(&touch(TouchEventId::Pressed, 10, 10), &mut harness.ctx());
        let after = button.local_bitmap().unwrap().pixel(center);
        assert_ne!(before, after);
        assert!(button.is_refresh_drawing_pending());
    }

    #[test]
    fn test_long_label_is_truncated() {
        let label = "a label that is much longer than thirty-two characters";
        assert_eq!(Button::new(label).label().len(), 32);
    }
}
