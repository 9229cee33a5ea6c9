// src/widgets/list.rs
//! Scrollable list of selectable rows

use alloc::boxed::Box;

use crate::bitmap::Bitmap;
use crate::component::{Component, DrawContext, DrawResult, EventContext, Widget};
use crate::drawing::ScaledAttributes;
use crate::event::{Event, SystemEvent, TouchEventId, WidgetEventId};
use crate::geometry::{self, Name, SCALE};
use crate::layout::{Flow, Layout};
use crate::theme::{ThemeState, ThemeStyle};
use crate::widgets::{Separator, TextAlign, draw_panel, draw_text, inset};

/// Row of a [`List`]: a label on the left and the model value on the right.
///
/// A press highlights the row, any drag cancels it, and a release inside a
/// highlighted row triggers `Selected`.
pub struct ListItem {
    label: Name,
}

impl ListItem {
    pub fn new(label: &str) -> Self {
        Self {
            label: geometry::name(label),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Widget for ListItem {
    fn draw(
        &mut self,
        cx: &DrawContext<'_>,
        attributes: ScaledAttributes,
        bitmap: &mut Bitmap,
    ) -> DrawResult {
        let palette = cx.palette();
        draw_panel(bitmap, attributes.region(), &palette, 0)?;

        let text_region = inset(attributes.region(), attributes.height() / 8);
        draw_text(
            bitmap,
            cx,
            &self.label,
            text_region,
            TextAlign::Left,
            palette.text,
        )?;
        match cx.value {
            Some(value) => draw_text(
                bitmap,
                cx,
                value,
                text_region,
                TextAlign::Right,
                palette.text,
            ),
            None => Ok(()),
        }
    }

    fn handle_event(&mut self, event: &Event, cx: &mut EventContext<'_, '_>) {
        let highlighted = cx.theme_state() == ThemeState::Highlighted;
        match event {
            Event::Touch(touch) => match touch.id {
                TouchEventId::Pressed if cx.contains(touch.point) => {
                    cx.set_theme_state(ThemeState::Highlighted);
                }
                TouchEventId::DraggedPoint if highlighted => {
                    cx.set_theme_state(ThemeState::Default);
                }
                TouchEventId::Released if highlighted => {
                    if cx.contains(touch.point) {
                        cx.trigger_event(WidgetEventId::Selected);
                    }
                    cx.set_theme_state(ThemeState::Default);
                }
                _ => {}
            },
            Event::System(SystemEvent::Exit) if highlighted => {
                cx.set_theme_state(ThemeState::Default);
            }
            _ => {}
        }
    }
}

// ============================================================================
// List builder
// ============================================================================

/// Builds a vertically scrolling layout of rows.
///
/// Each row takes its height plus a 4% gap. With `with_filler`, a list shorter
/// than its viewport is padded with a [`Separator`] and does not scroll.
///
/// # Examples
/// ```ignore
/// let menu = List::new("menu")
///     .with_item(Component::new("wifi", ListItem::new("Wi-Fi")))
///     .with_item(Component::new("about", ListItem::new("About")))
///     .with_filler(ThemeStyle::BrandPrimary)
///     .build();
/// ```
pub struct List {
    name: Name,
    item_height: u16,
    layout: Layout,
    total_height: u32,
    filler: Option<ThemeStyle>,
}

impl List {
    pub fn new(name: &str) -> Self {
        Self {
            name: geometry::name(name),
            item_height: 250,
            layout: Layout::new(Flow::Vertical),
            total_height: 0,
            filler: None,
        }
    }

    /// Row height in units of the list's height. Default is 250.
    pub fn with_item_height(mut self, height: u16) -> Self {
        self.item_height = height;
        self
    }

    /// Append a row. Its drawing area is replaced by the list's row size.
    pub fn with_item(mut self, item: Component) -> Self {
        let height = self.item_height.saturating_add(self.item_height / 25);
        self.total_height += height as u32;
        self.layout
            .add_component(item.with_drawing_area(SCALE as u16, height).create());
        self
    }

    /// Pad a short list so the rows below the last item are painted.
    pub fn with_filler(mut self, style: ThemeStyle) -> Self {
        self.filler = Some(style);
        self
    }

    pub fn build(mut self) -> Box<Component> {
        let viewport = SCALE as u32 + 10;
        let mut scroll = true;
        if let Some(style) = self.filler
            && self.total_height < viewport
        {
            let gap = (viewport - self.total_height) as u16;
            self.layout.add_component(
                Component::new("filler", Separator::new())
                    .with_drawing_area(SCALE as u16, gap)
                    .with_theme_style(style)
                    .create(),
            );
            scroll = false;
        }

        Component::new_layout(&self.name, self.layout)
            .with_vertical_scroll(scroll)
            .create()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TouchContext;
    use crate::test_support::Harness;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;
    use embedded_graphics::prelude::*;

    fn menu(harness: &mut Harness, count: usize, filler: bool) -> Box<Component> {
        let mut list = List::new("menu");
        for i in 0..count {
            let name = format!("item{i}");
            list = list.with_item(Component::new(&name, ListItem::new(&name)));
        }
        if filler {
            list = list.with_filler(ThemeStyle::BrandPrimary);
        }
        let mut root = list.build();
        root.set_visible_examine(true, &mut harness.ctx());
        root
    }

    fn selected(harness: &mut Harness) -> Vec<String> {
        harness
            .take_events()
            .iter()
            .filter_map(|e| e.component())
            .filter(|c| c.id == WidgetEventId::Selected)
            .map(|c| String::from(c.source.as_str()))
            .collect()
    }

    #[test]
    fn test_rows_include_gap() {
        let mut harness = Harness::new(Size::new(100, 300));
        let root = menu(&mut harness, 3, false);
        let layout = root.as_layout().unwrap();
        assert_eq!(layout.len(), 3);
        assert!(layout.items().iter().all(|i| i.drawing_area().height == 260));
        assert!(root.is_vertical_scroll_enabled());
    }

    #[test]
    fn test_short_list_gets_filler_and_no_scroll() {
        let mut harness = Harness::new(Size::new(100, 300));
        let root = menu(&mut harness, 3, true);
        let layout = root.as_layout().unwrap();
        assert_eq!(layout.len(), 4);
        assert_eq!(layout.items()[3].drawing_area().height, 1010 - 780);
        assert!(layout.find("filler").unwrap().is_visible());
        assert!(!root.is_vertical_scroll_enabled());
    }

    #[test]
    fn test_long_list_has_no_filler() {
        let mut harness = Harness::new(Size::new(100, 300));
        let root = menu(&mut harness, 5, true);
        assert_eq!(root.as_layout().unwrap().len(), 5);
        assert!(root.is_vertical_scroll_enabled());
    }

    #[test]
    fn test_long_labels_truncate() {
        let long = "a-row-label-that-is-far-too-long-to-keep";
        let item = ListItem::new(long);
        assert_eq!(item.label().len(), 32);
        assert!(long.starts_with(item.label()));

        let root = List::new(long).build();
        assert_eq!(root.name(), &long[..32]);
    }

    #[test]
    fn test_tap_selects_row() {
        let mut harness = Harness::new(Size::new(100, 300));
        let mut root = menu(&mut harness, 3, false);

        let press = Event::Touch(TouchContext::pressed(Point::new(50, 100)));
        root.distribute_event(&press, &mut harness.ctx());
        assert_eq!(
            root.search("item1").unwrap().theme_state(),
            ThemeState::Highlighted
        );

        let release = Event::Touch(TouchContext::released(Point::new(50, 100)));
        root.distribute_event(&release, &mut harness.ctx());
        assert_eq!(selected(&mut harness), ["item1"]);
        assert_eq!(
            root.search("item1").unwrap().theme_state(),
            ThemeState::Default
        );
    }

    #[test]
    fn test_drag_cancels_selection() {
        let mut harness = Harness::new(Size::new(100, 300));
        let mut root = menu(&mut harness, 3, false);

        let press = Event::Touch(TouchContext::pressed(Point::new(50, 20)));
        root.distribute_event(&press, &mut harness.ctx());
        let drag = Event::Touch(
            TouchContext::new(TouchEventId::DraggedPoint, Point::new(50, 40))
                .with_drag(Point::new(0, 20)),
        );
        root.distribute_event(&drag, &mut harness.ctx());
        let release = Event::Touch(TouchContext::released(Point::new(50, 40)));
        root.distribute_event(&release, &mut harness.ctx());

        assert!(selected(&mut harness).is_empty());
    }
}
