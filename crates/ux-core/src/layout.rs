// src/layout.rs
//! Layouts: components that own, position and clip children.
//!
//! A layout keeps an ordered list of [`Item`]s. Each item records where its
//! child sits in the layout's normalized space; the child itself only learns
//! its resolved reference attributes when [`Component::shift_origin`] runs.
//!
//! `shift_origin` is the invalidation routine. It regenerates positions for
//! the flow, recomputes every child's reference attributes against the
//! scrolled origin, clips each child to the layout's visible refresh region
//! and hides children that fall entirely outside it. Off-screen rows of a
//! long list therefore cost nothing, and partly visible rows only push their
//! visible slice.

use alloc::boxed::Box;
use alloc::vec::Vec;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::component::{Body, Component, ComponentFlags};
use crate::context::UxContext;
use crate::drawing::DrawingAttributes;
use crate::error::UxResult;
use crate::event::{Event, SystemEvent, TouchContext, TouchEventId};
use crate::geometry::{self, DrawingArea, DrawingPoint, DrawingRegion, SCALE};

/// How a layout positions its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Children keep the positions they were given
    #[default]
    Free,
    /// Stack top to bottom through device pixels; the stack height scrolls
    Vertical,
    /// Stack left to right through device pixels
    Horizontal,
    /// Stack top to bottom in normalized units only
    VerticalNoScroll,
}

/// A child slot and its position in the layout's normalized space
#[derive(Debug)]
pub struct Item {
    component: Option<Box<Component>>,
    drawing_point: DrawingPoint,
    drawing_area: DrawingArea,
}

impl Item {
    fn new(component: Box<Component>) -> Self {
        let attributes = component.reference_drawing_attributes();
        Self {
            drawing_point: attributes.point(),
            drawing_area: attributes.area(),
            component: Some(component),
        }
    }

    pub fn component(&self) -> Option<&Component> {
        self.component.as_deref()
    }

    pub fn drawing_point(&self) -> DrawingPoint {
        self.drawing_point
    }

    pub fn drawing_area(&self) -> DrawingArea {
        self.drawing_area
    }
}

fn clamp_i16(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

fn clamp_u16(value: i32) -> u16 {
    value.clamp(0, u16::MAX as i32) as u16
}

/// Children plus flow, scroll origin and content extent
#[derive(Debug, Default)]
pub struct Layout {
    items: Vec<Item>,
    flow: Flow,
    origin: DrawingPoint,
    area: DrawingArea,
}

impl Layout {
    pub fn new(flow: Flow) -> Self {
        Self {
            items: Vec::new(),
            flow,
            origin: DrawingPoint::zero(),
            area: DrawingArea::full(),
        }
    }

    pub fn with_component(mut self, component: Box<Component>) -> Self {
        self.add_component(component);
        self
    }

    /// Add a child, reusing the first slot emptied by a deletion.
    ///
    /// The component must have gone through [`Component::create`].
    pub fn add_component(&mut self, component: Box<Component>) {
        if !component.is_created() {
            fatal!(
                "{} must be created with Component::create() before it is added",
                component.name()
            );
        }

        match self.items.iter_mut().find(|item| item.component.is_none()) {
            Some(slot) => *slot = Item::new(component),
            None => self.items.push(Item::new(component)),
        }
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn set_flow(&mut self, flow: Flow) {
        self.flow = flow;
    }

    /// Accumulated scroll offset
    pub fn origin(&self) -> DrawingPoint {
        self.origin
    }

    /// Extent of the children, as computed by the last position pass
    pub fn content_area(&self) -> DrawingArea {
        self.area
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.items.iter().filter_map(|item| item.component.as_deref())
    }

    pub fn components_mut(&mut self) -> impl Iterator<Item = &mut Component> {
        self.items
            .iter_mut()
            .filter_map(|item| item.component.as_deref_mut())
    }

    pub fn len(&self) -> usize {
        self.components().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First direct child named `name`.
    pub fn find(&self, name: &str) -> Option<&Component> {
        self.components().find(|c| c.name() == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Component> {
        self.components_mut().find(|c| c.name() == name)
    }

    /// First component named `name` anywhere below this layout, depth first.
    pub fn search(&self, name: &str) -> Option<&Component> {
        for child in self.components() {
            if child.name() == name {
                return Some(child);
            }
            if let Some(found) = child.as_layout().and_then(|l| l.search(name)) {
                return Some(found);
            }
        }
        None
    }

    pub fn search_mut(&mut self, name: &str) -> Option<&mut Component> {
        for child in self.components_mut() {
            if child.name() == name {
                return Some(child);
            }
            if let Some(found) = child.as_layout_mut().and_then(|l| l.search_mut(name)) {
                return Some(found);
            }
        }
        None
    }

    /// Whether `name` is a component anywhere below this layout.
    pub fn owns(&self, name: &str) -> bool {
        self.search(name).is_some()
    }

    fn item_mut(&mut self, name: &str) -> Option<&mut Item> {
        self.items
            .iter_mut()
            .find(|item| item.component.as_ref().is_some_and(|c| c.name() == name))
    }

    // ------------------------------------------------------------------------
    // Flow
    // ------------------------------------------------------------------------

    /// Recompute child positions and the content extent for the flow.
    ///
    /// `reference` is the layout's own resolved attributes.
    pub fn generate_layout_positions(&mut self, reference: &DrawingAttributes) {
        match self.flow {
            Flow::Free => self.generate_free_positions(),
            Flow::Vertical => self.generate_vertical_positions(reference),
            Flow::Horizontal => self.generate_horizontal_positions(reference),
            Flow::VerticalNoScroll => self.generate_vertical_no_scroll_positions(),
        }
    }

    fn generate_free_positions(&mut self) {
        let mut x_max = 0i32;
        let mut y_max = 0i32;
        for item in self.items.iter().filter(|item| item.component.is_some()) {
            x_max = x_max.max(item.drawing_point.x as i32 + item.drawing_area.width as i32);
            y_max = y_max.max(item.drawing_point.y as i32 + item.drawing_area.height as i32);
        }
        self.area = DrawingArea::new(clamp_u16(x_max), clamp_u16(y_max));
    }

    // Consecutive children share one pixel row, so rounding in the
    // normalized round trip never opens a gap between them.
    fn generate_vertical_positions(&mut self, reference: &DrawingAttributes) {
        let mut drawing_cursor = 0i32;
        let mut bitmap_cursor = 0i32;
        for item in self.items.iter_mut().filter(|item| item.component.is_some()) {
            let point = DrawingPoint::new(0, clamp_i16(drawing_cursor));
            let area = DrawingArea::new(SCALE as u16, item.drawing_area.height);
            item.drawing_point = point;

            let attributes = *reference + self.origin + point + area;
            let height = attributes.calculate_area_on_bitmap().height as i32;
            bitmap_cursor += (height - 1).max(0);
            drawing_cursor = reference.calculate_height_on_drawing(bitmap_cursor);
        }
        self.area.height = clamp_u16(drawing_cursor);
    }

    fn generate_horizontal_positions(&mut self, reference: &DrawingAttributes) {
        let mut drawing_cursor = 0i32;
        let mut bitmap_cursor = 0i32;
        for item in self.items.iter_mut().filter(|item| item.component.is_some()) {
            let point = DrawingPoint::new(clamp_i16(drawing_cursor), 0);
            let area = DrawingArea::new(item.drawing_area.width, SCALE as u16);
            item.drawing_point = point;

            let attributes = *reference + area;
            let width = attributes.calculate_area_on_bitmap().width as i32;
            bitmap_cursor += (width - 1).max(0);
            drawing_cursor = reference.calculate_width_on_drawing(bitmap_cursor);
        }
        self.area.width = clamp_u16(drawing_cursor);
    }

    fn generate_vertical_no_scroll_positions(&mut self) {
        let mut drawing_cursor = 0i32;
        for item in self.items.iter_mut().filter(|item| item.component.is_some()) {
            item.drawing_point = DrawingPoint::new(0, clamp_i16(drawing_cursor));
            drawing_cursor += item.drawing_area.height as i32;
        }
        self.area.height = clamp_u16(drawing_cursor);
    }

    // ------------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------------

    pub(crate) fn redraw_children(&mut self, ctx: &mut UxContext<'_>) {
        for child in self.components_mut().filter(|c| c.has_focus()) {
            child.redraw(ctx);
        }
    }

    /// Refresh every pending child, returning the first failure.
    pub(crate) fn refresh_children(&mut self, ctx: &mut UxContext<'_>) -> UxResult<()> {
        let mut result = Ok(());
        for child in self.components_mut() {
            if child.is_refresh_drawing_pending()
                && let Err(err) = child.refresh_drawing(ctx)
                && result.is_ok()
            {
                result = Err(err);
            }
        }
        result
    }
}

// ============================================================================
// Layout behaviour on Component
// ============================================================================

impl Component {
    pub(crate) fn examine_layout_visibility(&mut self, ctx: &mut UxContext<'_>) {
        if self.is_ready_to_draw() {
            if !self.is_created() {
                fatal!("{} was not created using Component::create()", self.name());
            }

            let Some(info) = ctx.display_info() else {
                self.set_visible_examine(false, ctx);
                return;
            };

            self.state.reference.set_bitmap(info);
            let size = self.state.reference.calculate_area_on_bitmap();
            self.state.refresh_region = Rectangle::new(Point::zero(), size);
            debug!(
                "{}: layout visible at {}x{}",
                self.state.name, size.width, size.height
            );

            self.shift_origin(DrawingPoint::zero(), ctx);
            self.handle_event(&Event::System(SystemEvent::Enter), ctx);
        } else {
            if let Some(layout) = self.as_layout_mut() {
                for child in layout.components_mut() {
                    child.set_visible_examine(false, ctx);
                }
            }
            self.handle_event(&Event::System(SystemEvent::Exit), ctx);
        }
    }

    pub(crate) fn set_layout_refresh_region(&mut self, region: Rectangle, ctx: &mut UxContext<'_>) {
        let Component { state, body } = self;
        if state.is_ready_to_draw()
            && let Body::Layout(layout) = body
        {
            let layout_region =
                geometry::offset(&region, state.reference.calculate_point_on_bitmap());
            for child in layout.components_mut() {
                let clip = geometry::overlap(&layout_region, &child.region_on_bitmap());
                child.set_refresh_region(clip, ctx);
            }
        }
        state.refresh_region = region;
    }

    /// Add a child to a live layout and position it immediately.
    pub fn insert_component(&mut self, component: Box<Component>, ctx: &mut UxContext<'_>) {
        let Some(layout) = self.as_layout_mut() else {
            fatal!("{} is not a layout", self.name());
        };
        layout.add_component(component);
        self.shift_origin(DrawingPoint::zero(), ctx);
    }

    /// Disable, then drop, the first child named `name`.
    ///
    /// Returns whether a child was deleted. Deleting a busy child is fatal.
    pub fn delete_component(&mut self, name: &str, ctx: &mut UxContext<'_>) -> bool {
        let Some(item) = self.as_layout_mut().and_then(|l| l.item_mut(name)) else {
            return false;
        };
        let Some(mut child) = item.component.take() else {
            return false;
        };

        child.set_enabled(false, ctx);
        if child.is_busy() {
            fatal!("{} deleted while busy", child.name());
        }
        debug!("{}: deleted", child.name());
        true
    }

    /// Move a direct child and re-run the layout.
    pub fn update_drawing_point(
        &mut self,
        name: &str,
        point: DrawingPoint,
        ctx: &mut UxContext<'_>,
    ) -> bool {
        let Some(item) = self.as_layout_mut().and_then(|l| l.item_mut(name)) else {
            return false;
        };
        item.drawing_point = point;
        self.shift_origin(DrawingPoint::zero(), ctx);
        true
    }

    /// Resize a direct child and re-run the layout.
    pub fn update_drawing_area(
        &mut self,
        name: &str,
        area: DrawingArea,
        ctx: &mut UxContext<'_>,
    ) -> bool {
        let Some(item) = self.as_layout_mut().and_then(|l| l.item_mut(name)) else {
            return false;
        };
        item.drawing_area = area;
        self.shift_origin(DrawingPoint::zero(), ctx);
        true
    }

    /// First component named `name` below this one, depth first.
    pub fn search(&self, name: &str) -> Option<&Component> {
        self.as_layout().and_then(|l| l.search(name))
    }

    pub fn search_mut(&mut self, name: &str) -> Option<&mut Component> {
        self.as_layout_mut().and_then(|l| l.search_mut(name))
    }

    /// Add `shift` to the scroll origin and re-clip every child.
    pub fn shift_origin(&mut self, shift: DrawingPoint, ctx: &mut UxContext<'_>) {
        let Component { state, body } = self;
        let Body::Layout(layout) = body else {
            return;
        };

        layout.origin += shift;
        if !state.is_ready_to_draw() {
            return;
        }

        layout.generate_layout_positions(&state.reference);
        let layout_region = state.refresh_window();
        let base = state.reference + layout.origin;

        for item in layout.items.iter_mut() {
            let Some(child) = item.component.as_deref_mut() else {
                continue;
            };

            child.state.reference = base + item.drawing_point + item.drawing_area;
            let clip = geometry::overlap(&layout_region, &child.region_on_bitmap());

            if geometry::region_area(&clip) == 0 {
                child.set_visible_examine(false, ctx);
                continue;
            }

            child.set_refresh_drawing_pending();
            if !child.is_visible() {
                child.set_visible_examine(true, ctx);
                child.set_refresh_region(clip, ctx);
            } else if child.is_layout() {
                child.set_refresh_region(clip, ctx);
                child.touch_drawing_attributes(ctx);
            } else {
                child.touch_drawing_attributes(ctx);
                child.set_refresh_region(clip, ctx);
            }
        }
    }

    /// Scroll a visible layout by `value` normalized units.
    pub fn scroll(&mut self, value: DrawingPoint, ctx: &mut UxContext<'_>) {
        if self.is_ready_to_draw() {
            self.shift_origin(value, ctx);
        }
    }

    /// Set focus on this component and, for layouts, every descendant.
    pub fn set_focus(&mut self, focus: bool) {
        self.set_focus_internal(focus);
        if let Some(layout) = self.as_layout_mut() {
            for child in layout.components_mut() {
                child.set_focus(focus);
            }
        }
    }

    /// Clear a normalized sub-region of the layout on the display.
    pub fn erase_region(&mut self, region: DrawingRegion, ctx: &mut UxContext<'_>) -> UxResult<()> {
        let attributes = self.state.reference + region.point + region.area;
        let window = attributes.calculate_region_on_bitmap();

        ctx.set_display_palette(self.state.theme_style, self.state.theme_state)?;
        if geometry::region_area(&window) > 0
            && let Some(display) = ctx.display_mut()
        {
            display.set_window(window)?;
            display.clear()?;
        }
        Ok(())
    }

    /// Convert a vertical drag in pixels into a clamped scroll delta.
    ///
    /// The result never moves the content's top edge below the viewport's top
    /// (`origin.y <= 0`) or its bottom edge above the viewport's bottom
    /// (`origin.y + content_height >= 1000`).
    pub fn handle_vertical_scroll(&self, scroll: i32) -> i16 {
        let Some(layout) = self.as_layout() else {
            return 0;
        };
        if !self.is_vertical_scroll_enabled() {
            return 0;
        }

        let height = self.state.reference.calculate_area_on_bitmap().height as i64;
        if height == 0 {
            return 0;
        }

        let origin = layout.origin.y as i64;
        let content = layout.area.height as i64;
        let mut delta = scroll as i64 * SCALE as i64 / height;

        if delta < 0 {
            let max_scroll = content - SCALE as i64 + origin;
            if -delta > max_scroll {
                delta = -max_scroll;
            }
            if origin + content <= SCALE as i64 {
                delta = 0;
            }
        } else if delta > -origin {
            delta = -origin;
        }

        clamp_i16(delta as i32)
    }

    /// Horizontal scrolling is not supported; always 0.
    pub fn handle_horizontal_scroll(&self, _scroll: i32) -> i16 {
        0
    }

    pub(crate) fn distribute_layout_event(&mut self, event: &Event, ctx: &mut UxContext<'_>) {
        self.set_busy(true);

        if self.has_focus() {
            let mut scrolled = None;
            if let Event::Touch(touch) = event {
                match touch.id {
                    TouchEventId::Pressed if self.contains(touch.point) => {
                        self.state.flags.insert(ComponentFlags::TOUCH_FOCUS);
                    }
                    TouchEventId::Released => {
                        self.state.flags.remove(ComponentFlags::TOUCH_FOCUS);
                    }
                    TouchEventId::DraggedPoint if self.is_touch_focus() => {
                        let horizontal = self.handle_horizontal_scroll(touch.drag.x);
                        let vertical = self.handle_vertical_scroll(touch.drag.y);
                        if horizontal != 0 || vertical != 0 {
                            scrolled = Some(Event::Touch(TouchContext {
                                point: Point::new(vertical as i32, horizontal as i32),
                                ..*touch
                            }));
                            self.scroll(DrawingPoint::new(horizontal, vertical), ctx);
                        }
                    }
                    _ => {}
                }
            }

            let event = scrolled.as_ref().unwrap_or(event);
            self.handle_event(event, ctx);
            if let Some(layout) = self.as_layout_mut() {
                for child in layout
                    .components_mut()
                    .filter(|c| c.is_enabled() && c.has_focus())
                {
                    child.distribute_event(event, ctx);
                }
            }
        }

        if event.is_system(SystemEvent::Exit)
            && let Some(layout) = self.as_layout_mut()
        {
            for child in layout.components_mut() {
                child.set_visible_examine(false, ctx);
            }
        }

        self.set_busy(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Harness, Probe};
    use alloc::format;
    use embedded_graphics::pixelcolor::Rgb565;

    fn row(name: &str, height: u16) -> Box<Component> {
        Component::new(name, Probe::new(Rgb565::GREEN))
            .with_drawing_area(1000, height)
            .create()
    }

    /// 100x300 display, vertical list of `count` rows of `height` units.
    fn list(harness: &mut Harness, count: usize, height: u16) -> Box<Component> {
        let mut layout = Layout::new(Flow::Vertical);
        for i in 0..count {
            layout.add_component(row(&format!("row{i}"), height));
        }
        let mut root = Component::new_layout("list", layout).create();
        root.set_visible_examine(true, &mut harness.ctx());
        root
    }

    fn visible_rows(root: &Component) -> usize {
        root.as_layout()
            .unwrap()
            .components()
            .filter(|c| c.is_visible())
            .count()
    }

    fn drag(drag_y: i32) -> Event {
        Event::Touch(
            TouchContext::new(TouchEventId::DraggedPoint, Point::new(50, 150))
                .with_drag(Point::new(0, drag_y)),
        )
    }

    #[test]
    fn test_three_of_ten_rows_visible() {
        let mut harness = Harness::new(Size::new(100, 300));
        let root = list(&mut harness, 10, 338);

        assert_eq!(visible_rows(&root), 3);
        let layout = root.as_layout().unwrap();
        for (index, child) in layout.components().enumerate() {
            if index < 3 {
                assert!(child.is_visible(), "row{index}");
                assert!(geometry::region_area(&child.refresh_region()) > 0);
                assert!(child.local_bitmap().is_some());
            } else {
                assert!(!child.is_visible(), "row{index}");
                assert!(child.local_bitmap().is_none());
            }
        }
    }

    #[test]
    fn test_rows_tile_with_shared_edge() {
        let mut harness = Harness::new(Size::new(100, 300));
        let root = list(&mut harness, 10, 338);
        let layout = root.as_layout().unwrap();

        let tops: Vec<i32> = layout
            .components()
            .take(3)
            .map(|c| c.region_on_bitmap().top_left.y)
            .collect();
        assert_eq!(tops, [0, 100, 200]);
        assert_eq!(layout.content_area().height, 3333);

        // the last visible row is clipped to the viewport
        let third = layout.find("row2").unwrap();
        assert_eq!(
            third.refresh_region(),
            Rectangle::new(Point::zero(), Size::new(100, 100))
        );
    }

    #[test]
    fn test_scroll_clamping_holds_for_any_delta() {
        let mut harness = Harness::new(Size::new(100, 300));
        let mut root = list(&mut harness, 10, 338);

        for scroll in [-50, -2000, 40, -100_000, 100_000, -299, 7, 0, -1, 3000, -450] {
            let delta = root.handle_vertical_scroll(scroll);
            root.scroll(DrawingPoint::new(0, delta), &mut harness.ctx());

            let layout = root.as_layout().unwrap();
            let origin = layout.origin().y as i32;
            assert!(origin <= 0, "origin {origin} after {scroll}");
            assert!(
                origin + layout.content_area().height as i32 >= SCALE,
                "content end {} after {scroll}",
                origin + layout.content_area().height as i32
            );
        }
    }

    #[test]
    fn test_scroll_to_bottom_and_top() {
        let mut harness = Harness::new(Size::new(100, 300));
        let mut root = list(&mut harness, 10, 338);

        let delta = root.handle_vertical_scroll(-100_000);
        assert_eq!(delta, -2333);
        root.scroll(DrawingPoint::new(0, delta), &mut harness.ctx());
        assert_eq!(root.handle_vertical_scroll(-10), 0);
        assert!(root.as_layout().unwrap().find("row9").unwrap().is_visible());

        assert_eq!(root.handle_vertical_scroll(100_000), 2333);
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut harness = Harness::new(Size::new(100, 300));
        let root = list(&mut harness, 2, 338);
        assert_eq!(root.handle_vertical_scroll(-100), 0);
        assert_eq!(root.handle_vertical_scroll(100), 0);
    }

    #[test]
    fn test_disabled_vertical_scroll() {
        let mut harness = Harness::new(Size::new(100, 300));
        let mut layout = Layout::new(Flow::Vertical);
        for i in 0..10 {
            layout.add_component(row(&format!("row{i}"), 338));
        }
        let mut root = Component::new_layout("list", layout)
            .with_vertical_scroll(false)
            .create();
        root.set_visible_examine(true, &mut harness.ctx());
        assert_eq!(root.handle_vertical_scroll(-100), 0);
    }

    #[test]
    fn test_drag_scrolls_and_rewrites_point() {
        let mut harness = Harness::new(Size::new(100, 300));
        let mut root = list(&mut harness, 10, 338);

        let press = Event::Touch(TouchContext::pressed(Point::new(50, 150)));
        root.distribute_event(&press, &mut harness.ctx());
        assert!(root.is_touch_focus());

        root.distribute_event(&drag(-150), &mut harness.ctx());

        let layout = root.as_layout().unwrap();
        assert_eq!(layout.origin(), DrawingPoint::new(0, -500));
        assert!(!layout.find("row0").unwrap().is_visible());
        assert!(layout.find("row1").unwrap().is_visible());
        assert!(layout.find("row4").unwrap().is_visible());
        assert!(!layout.find("row5").unwrap().is_visible());

        let probe = layout.find("row1").unwrap().widget::<Probe>().unwrap();
        let last = probe.seen.last().and_then(Event::touch).unwrap();
        assert_eq!(last.id, TouchEventId::DraggedPoint);
        assert_eq!(last.point, Point::new(-500, 0));
    }

    #[test]
    fn test_drag_without_touch_focus_does_not_scroll() {
        let mut harness = Harness::new(Size::new(100, 300));
        let mut root = list(&mut harness, 10, 338);

        root.distribute_event(&drag(-150), &mut harness.ctx());
        assert_eq!(root.as_layout().unwrap().origin(), DrawingPoint::zero());

        let release = Event::Touch(TouchContext::released(Point::new(50, 150)));
        root.distribute_event(&release, &mut harness.ctx());
        assert!(!root.is_touch_focus());
    }

    #[test]
    fn test_refresh_only_writes_visible_rows() {
        let mut harness = Harness::new(Size::new(100, 300));
        let mut root = list(&mut harness, 10, 338);
        assert!(root.is_refresh_drawing_pending());

        root.refresh_drawing(&mut harness.ctx()).unwrap();
        assert_eq!(harness.display.write_count(), 3);
        assert!(!root.is_refresh_drawing_pending());
        assert_eq!(harness.display.pixel(Point::new(50, 299)), Some(Rgb565::GREEN));
    }

    #[test]
    fn test_leaf_pending_reaches_root() {
        let mut harness = Harness::new(Size::new(100, 300));
        let mut root = list(&mut harness, 3, 338);
        root.refresh_drawing(&mut harness.ctx()).unwrap();
        assert!(!root.is_refresh_drawing_pending());

        root.search_mut("row1")
            .unwrap()
            .redraw(&mut harness.ctx());
        assert!(root.is_refresh_drawing_pending());

        root.refresh_drawing(&mut harness.ctx()).unwrap();
        assert_eq!(harness.display.write_count(), 4);
    }

    #[test]
    fn test_free_flow_area_is_children_extent() {
        let mut harness = Harness::new(Size::new(100, 100));
        let layout = Layout::new(Flow::Free)
            .with_component(
                Component::new("a", Probe::new(Rgb565::RED))
                    .with_drawing_point(100, 200)
                    .with_drawing_area(300, 300)
                    .create(),
            )
            .with_component(
                Component::new("b", Probe::new(Rgb565::RED))
                    .with_drawing_point(600, 0)
                    .with_drawing_area(200, 100)
                    .create(),
            );
        let mut root = Component::new_layout("root", layout).create();
        root.set_visible_examine(true, &mut harness.ctx());

        let layout = root.as_layout().unwrap();
        assert_eq!(layout.content_area(), DrawingArea::new(800, 500));
        assert_eq!(
            layout.find("a").unwrap().region_on_bitmap(),
            Rectangle::new(Point::new(10, 20), Size::new(30, 30))
        );
    }

    #[test]
    fn test_horizontal_flow_positions() {
        let mut harness = Harness::new(Size::new(300, 100));
        let mut layout = Layout::new(Flow::Horizontal);
        for name in ["a", "b", "c"] {
            layout.add_component(
                Component::new(name, Probe::new(Rgb565::RED))
                    .with_drawing_area(338, 1000)
                    .create(),
            );
        }
        let mut root = Component::new_layout("row", layout).create();
        root.set_visible_examine(true, &mut harness.ctx());

        let layout = root.as_layout().unwrap();
        let lefts: Vec<i32> = layout
            .components()
            .map(|c| c.region_on_bitmap().top_left.x)
            .collect();
        assert_eq!(lefts, [0, 100, 200]);
        assert_eq!(
            root.handle_horizontal_scroll(-50),
            0,
            "horizontal scrolling is not supported"
        );
    }

    #[test]
    fn test_vertical_no_scroll_uses_normalized_sums() {
        let mut harness = Harness::new(Size::new(100, 300));
        let layout = Layout::new(Flow::VerticalNoScroll)
            .with_component(row("a", 250))
            .with_component(row("b", 250));
        let mut root = Component::new_layout("root", layout).create();
        root.set_visible_examine(true, &mut harness.ctx());

        let layout = root.as_layout().unwrap();
        assert_eq!(layout.items()[1].drawing_point(), DrawingPoint::new(0, 250));
        assert_eq!(layout.content_area().height, 500);
    }

    #[test]
    fn test_nested_layout_clips_grandchildren() {
        let mut harness = Harness::new(Size::new(100, 200));
        let inner = Layout::new(Flow::VerticalNoScroll)
            .with_component(row("top", 500))
            .with_component(row("bottom", 500));
        let outer = Layout::new(Flow::Free).with_component(
            Component::new_layout("inner", inner)
                .with_drawing_point(0, 750)
                .with_drawing_area(1000, 500)
                .create(),
        );
        let mut root = Component::new_layout("root", outer).create();
        root.set_visible_examine(true, &mut harness.ctx());

        let inner = root.search("inner").unwrap();
        assert!(inner.is_visible());
        assert_eq!(
            inner.refresh_region(),
            Rectangle::new(Point::zero(), Size::new(100, 50))
        );
        assert!(root.search("top").unwrap().is_visible());
        assert!(!root.search("bottom").unwrap().is_visible());
    }

    #[test]
    fn test_exit_forces_children_invisible() {
        let mut harness = Harness::new(Size::new(100, 300));
        let mut root = list(&mut harness, 3, 338);

        root.distribute_event(&Event::System(SystemEvent::Exit), &mut harness.ctx());
        assert_eq!(visible_rows(&root), 0);
        let probe = root.search("row0").unwrap().widget::<Probe>().unwrap();
        assert_eq!(probe.seen.last(), Some(&Event::System(SystemEvent::Exit)));
    }

    #[test]
    fn test_unfocused_children_skip_events() {
        let mut harness = Harness::new(Size::new(100, 300));
        let mut root = list(&mut harness, 2, 338);
        root.search_mut("row0").unwrap().set_focus(false);

        let event = Event::Application { id: 9, value: 0 };
        root.distribute_event(&event, &mut harness.ctx());
        let seen = |name: &str| {
            root.search(name)
                .unwrap()
                .widget::<Probe>()
                .unwrap()
                .seen
                .contains(&event)
        };
        assert!(!seen("row0"));
        assert!(seen("row1"));

        root.set_focus(false);
        assert!(!root.search("row1").unwrap().has_focus());
    }

    #[test]
    fn test_delete_component_reuses_slot() {
        let mut harness = Harness::new(Size::new(100, 300));
        let mut root = list(&mut harness, 3, 338);

        assert!(root.delete_component("row1", &mut harness.ctx()));
        assert!(!root.delete_component("row1", &mut harness.ctx()));
        assert_eq!(root.as_layout().unwrap().len(), 2);

        root.insert_component(row("fresh", 338), &mut harness.ctx());
        let layout = root.as_layout().unwrap();
        assert_eq!(layout.items().len(), 3);
        assert_eq!(layout.items()[1].component().unwrap().name(), "fresh");
        assert!(layout.find("fresh").unwrap().is_visible());
    }

    #[test]
    fn test_find_returns_first_match() {
        let layout = Layout::new(Flow::Free)
            .with_component(
                Component::new("twin", Probe::new(Rgb565::RED))
                    .with_theme_state(crate::theme::ThemeState::Highlighted)
                    .create(),
            )
            .with_component(row("twin", 200));
        let found = layout.find("twin").unwrap();
        assert_eq!(found.theme_state(), crate::theme::ThemeState::Highlighted);
        assert!(layout.find("missing").is_none());
    }

    #[test]
    fn test_update_drawing_area_reallocates() {
        let mut harness = Harness::new(Size::new(100, 100));
        let layout = Layout::new(Flow::Free).with_component(
            Component::new("a", Probe::new(Rgb565::RED))
                .with_drawing_area(500, 500)
                .create(),
        );
        let mut root = Component::new_layout("root", layout).create();
        root.set_visible_examine(true, &mut harness.ctx());
        let bitmap = root.search("a").unwrap().local_bitmap().unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (50, 50));

        assert!(root.update_drawing_area("a", DrawingArea::new(250, 500), &mut harness.ctx()));
        let bitmap = root.search("a").unwrap().local_bitmap().unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (25, 50));

        assert!(root.update_drawing_point("a", DrawingPoint::new(0, 1000), &mut harness.ctx()));
        assert!(!root.search("a").unwrap().is_visible());
    }

    #[test]
    #[should_panic(expected = "must be created")]
    fn test_adding_uncreated_component_is_fatal() {
        let raw = Box::new(Component::new("raw", Probe::new(Rgb565::RED)));
        Layout::new(Flow::Free).add_component(raw);
    }

    #[test]
    #[should_panic(expected = "deleted while busy")]
    fn test_deleting_busy_component_is_fatal() {
        let mut harness = Harness::new(Size::new(100, 300));
        let mut root = list(&mut harness, 1, 338);
        root.search_mut("row0").unwrap().set_busy(true);
        root.delete_component("row0", &mut harness.ctx());
    }
}
