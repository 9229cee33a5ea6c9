// src/component.rs
//! Components: the nodes of the scene tree.
//!
//! A [`Component`] is either a leaf wrapping a [`Widget`] or a [`Layout`]
//! owning children. Both share [`ComponentState`]: flags, the reference
//! attributes assigned by the parent, a private local bitmap and the refresh
//! region that still has to reach the display.
//!
//! # Lifecycle
//!
//! 1. Construct with [`Component::new`] / [`Component::new_layout`]
//! 2. Box it with [`Component::create`] (required before adding to a layout)
//! 3. The parent layout positions it and toggles its visibility
//! 4. [`Component::examine_visibility`] allocates the local bitmap, sends
//!    `Enter` and draws when the component becomes enabled and visible, and
//!    sends `Exit` and frees the bitmap otherwise
//! 5. [`Component::refresh_drawing`] copies the refresh region to the display

use alloc::boxed::Box;
use core::any::Any;
use core::convert::Infallible;

use bitflags::bitflags;
use embassy_time::Instant;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, trace};

use crate::assets::Assets;
use crate::bitmap::Bitmap;
use crate::context::UxContext;
use crate::drawing::{DrawingAttributes, ScaledAttributes};
use crate::error::UxResult;
use crate::event::{ComponentEvent, Event, SystemEvent, WidgetEventId};
use crate::geometry::{self, DrawingArea, DrawingPoint, Name, SCALE};
use crate::layout::Layout;
use crate::theme::{Palette, Theme, ThemeState, ThemeStyle};

bitflags! {
    /// Independent component flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ComponentFlags: u16 {
        const VISIBLE = 1 << 0;
        const ENABLED = 1 << 1;
        const CREATED = 1 << 2;
        const BUSY = 1 << 3;
        const LAYOUT = 1 << 4;
        const REFRESH_PENDING = 1 << 5;
        const ANTIALIAS = 1 << 6;
        const FOCUS = 1 << 7;
        const HORIZONTAL_SCROLL = 1 << 8;
        const VERTICAL_SCROLL = 1 << 9;
        const TOUCH_FOCUS = 1 << 10;
        const AUTO_DISABLE = 1 << 11;
    }
}

/// Result of drawing into a local bitmap; bitmaps never fail.
pub type DrawResult = Result<(), Infallible>;

// ============================================================================
// Widget
// ============================================================================

/// Leaf behaviour: how a component draws and reacts to events.
pub trait Widget: Any {
    /// Draw into `bitmap`. `attributes` covers the whole bitmap.
    fn draw(
        &mut self,
        cx: &DrawContext<'_>,
        attributes: ScaledAttributes,
        bitmap: &mut Bitmap,
    ) -> DrawResult;

    fn handle_event(&mut self, _event: &Event, _cx: &mut EventContext<'_, '_>) {}
}

/// What a widget may read while drawing
pub struct DrawContext<'a> {
    pub name: &'a str,
    /// Model value stored under the component's name
    pub value: Option<&'a str>,
    pub theme: &'a Theme,
    pub assets: &'a Assets,
    pub style: ThemeStyle,
    pub state: ThemeState,
    pub antialias: bool,
}

impl DrawContext<'_> {
    pub fn palette(&self) -> Palette {
        self.theme.palette(self.style, self.state)
    }
}

/// A widget's handle on its component and the outside world during an event.
pub struct EventContext<'s, 'c> {
    state: &'s mut ComponentState,
    ctx: &'s mut UxContext<'c>,
    redraw: bool,
}

impl<'s, 'c> EventContext<'s, 'c> {
    pub fn name(&self) -> &str {
        &self.state.name
    }

    /// Whether a device point falls inside the visible part of the component.
    pub fn contains(&self, point: Point) -> bool {
        self.state.contains(point)
    }

    pub fn translate_point(&self, point: Point) -> DrawingPoint {
        self.state.translate_point(point)
    }

    pub fn is_visible(&self) -> bool {
        self.state.flags.contains(ComponentFlags::VISIBLE)
    }

    pub fn theme_state(&self) -> ThemeState {
        self.state.theme_state
    }

    /// Change the interaction state; a change schedules a redraw.
    pub fn set_theme_state(&mut self, state: ThemeState) {
        if self.state.theme_state != state {
            self.state.theme_state = state;
            self.redraw = true;
        }
    }

    /// Redraw once the handler returns.
    pub fn redraw(&mut self) {
        self.redraw = true;
    }

    pub fn value(&self) -> Option<&str> {
        self.ctx.model().get(&self.state.name)
    }

    pub fn set_value(&mut self, value: &str) {
        self.ctx.model_mut().set(&self.state.name, value);
    }

    pub fn set_value_bool(&mut self, value: bool) {
        self.ctx.model_mut().set_bool(&self.state.name, value);
    }

    /// Queue a [`ComponentEvent`] with this component as the source.
    pub fn trigger_event(&mut self, id: WidgetEventId) {
        let source = self.state.name.clone();
        self.ctx
            .trigger_event(Event::Component(ComponentEvent { source, id }));
    }

    /// Queue an arbitrary non-system event.
    pub fn trigger(&mut self, event: Event) {
        self.ctx.trigger_event(event);
    }

    pub fn now(&self) -> Instant {
        self.ctx.now()
    }

    pub fn theme(&self) -> &Theme {
        self.ctx.theme()
    }
}

// ============================================================================
// Component
// ============================================================================

/// State every component carries regardless of its body
#[derive(Debug)]
pub(crate) struct ComponentState {
    pub(crate) name: Name,
    pub(crate) flags: ComponentFlags,
    pub(crate) reference: DrawingAttributes,
    pub(crate) local_bitmap: Option<Bitmap>,
    pub(crate) refresh_region: Rectangle,
    pub(crate) theme_style: ThemeStyle,
    pub(crate) theme_state: ThemeState,
}

impl ComponentState {
    fn new(name: &str, flags: ComponentFlags) -> Self {
        Self {
            name: geometry::name(name),
            flags,
            reference: DrawingAttributes::default(),
            local_bitmap: None,
            refresh_region: Rectangle::zero(),
            theme_style: ThemeStyle::default(),
            theme_state: ThemeState::default(),
        }
    }

    pub(crate) fn is_ready_to_draw(&self) -> bool {
        self.flags
            .contains(ComponentFlags::ENABLED | ComponentFlags::VISIBLE)
    }

    /// Device window the refresh region maps to.
    pub(crate) fn refresh_window(&self) -> Rectangle {
        let origin = self.reference.calculate_point_on_bitmap();
        geometry::offset(&self.refresh_region, origin)
    }

    fn contains(&self, point: Point) -> bool {
        self.is_ready_to_draw() && self.refresh_window().contains(point)
    }

    fn translate_point(&self, point: Point) -> DrawingPoint {
        let region = self.reference.calculate_region_on_bitmap();
        let relative = point - region.top_left;
        let scale = |value: i32, span: u32| {
            if span == 0 {
                0
            } else {
                (value * SCALE / span as i32).clamp(i16::MIN as i32, i16::MAX as i32) as i16
            }
        };
        DrawingPoint::new(
            scale(relative.x, region.size.width),
            scale(relative.y, region.size.height),
        )
    }
}

pub(crate) enum Body {
    Widget(Box<dyn Widget>),
    Layout(Layout),
}

/// A node of the scene tree
pub struct Component {
    pub(crate) state: ComponentState,
    pub(crate) body: Body,
}

impl core::fmt::Debug for Component {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.state.name)
            .field("flags", &self.state.flags)
            .field("refresh_region", &self.state.refresh_region)
            .finish()
    }
}

impl Component {
    /// A leaf component driven by `widget`.
    pub fn new<W: Widget>(name: &str, widget: W) -> Self {
        Self {
            state: ComponentState::new(name, ComponentFlags::ENABLED | ComponentFlags::FOCUS),
            body: Body::Widget(Box::new(widget)),
        }
    }

    /// A component that owns and positions children.
    pub fn new_layout(name: &str, layout: Layout) -> Self {
        Self {
            state: ComponentState::new(
                name,
                ComponentFlags::ENABLED
                    | ComponentFlags::FOCUS
                    | ComponentFlags::LAYOUT
                    | ComponentFlags::VERTICAL_SCROLL,
            ),
            body: Body::Layout(layout),
        }
    }

    /// Box the component and mark it created.
    ///
    /// Layouts only accept created components.
    pub fn create(mut self) -> Box<Self> {
        self.state.flags.insert(ComponentFlags::CREATED);
        Box::new(self)
    }

    pub fn with_drawing_point(mut self, x: i16, y: i16) -> Self {
        self.state.reference.set_point(DrawingPoint::new(x, y));
        self
    }

    pub fn with_drawing_area(mut self, width: u16, height: u16) -> Self {
        self.state.reference.set_area(DrawingArea::new(width, height));
        self
    }

    pub fn with_theme_style(mut self, style: ThemeStyle) -> Self {
        self.state.theme_style = style;
        self
    }

    pub fn with_theme_state(mut self, state: ThemeState) -> Self {
        self.state.theme_state = state;
        self
    }

    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.state.flags.set(ComponentFlags::ANTIALIAS, antialias);
        self
    }

    pub fn with_auto_disable(mut self, auto_disable: bool) -> Self {
        self.state.flags.set(ComponentFlags::AUTO_DISABLE, auto_disable);
        self
    }

    /// Set the enabled flag without examining visibility.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.state.flags.set(ComponentFlags::ENABLED, enabled);
        self
    }

    /// Enable or disable vertical scrolling of a layout.
    pub fn with_vertical_scroll(mut self, enabled: bool) -> Self {
        self.state
            .flags
            .set(ComponentFlags::VERTICAL_SCROLL, enabled);
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.state.name
    }

    pub fn flags(&self) -> ComponentFlags {
        self.state.flags
    }

    pub fn is_visible(&self) -> bool {
        self.state.flags.contains(ComponentFlags::VISIBLE)
    }

    pub fn is_enabled(&self) -> bool {
        self.state.flags.contains(ComponentFlags::ENABLED)
    }

    pub fn is_created(&self) -> bool {
        self.state.flags.contains(ComponentFlags::CREATED)
    }

    pub fn is_busy(&self) -> bool {
        self.state.flags.contains(ComponentFlags::BUSY)
    }

    pub fn is_layout(&self) -> bool {
        matches!(self.body, Body::Layout(_))
    }

    pub fn has_focus(&self) -> bool {
        self.state.flags.contains(ComponentFlags::FOCUS)
    }

    pub fn is_touch_focus(&self) -> bool {
        self.state.flags.contains(ComponentFlags::TOUCH_FOCUS)
    }

    pub fn is_vertical_scroll_enabled(&self) -> bool {
        self.state.flags.contains(ComponentFlags::VERTICAL_SCROLL)
    }

    pub fn is_ready_to_draw(&self) -> bool {
        self.state.is_ready_to_draw()
    }

    pub fn theme_style(&self) -> ThemeStyle {
        self.state.theme_style
    }

    pub fn theme_state(&self) -> ThemeState {
        self.state.theme_state
    }

    pub fn set_theme_style(&mut self, style: ThemeStyle) {
        self.state.theme_style = style;
    }

    pub fn set_theme_state(&mut self, state: ThemeState) {
        self.state.theme_state = state;
    }

    /// Attributes assigned by the parent layout
    pub fn reference_drawing_attributes(&self) -> &DrawingAttributes {
        &self.state.reference
    }

    pub fn set_reference_drawing_attributes(&mut self, attributes: DrawingAttributes) {
        self.state.reference = attributes;
    }

    /// Device region the component occupies on the display bitmap.
    pub fn region_on_bitmap(&self) -> Rectangle {
        self.state.reference.calculate_region_on_bitmap()
    }

    /// Part of the local bitmap that still has to reach the display.
    pub fn refresh_region(&self) -> Rectangle {
        self.state.refresh_region
    }

    pub fn local_bitmap(&self) -> Option<&Bitmap> {
        self.state.local_bitmap.as_ref()
    }

    pub fn as_layout(&self) -> Option<&Layout> {
        match &self.body {
            Body::Layout(layout) => Some(layout),
            Body::Widget(_) => None,
        }
    }

    pub fn as_layout_mut(&mut self) -> Option<&mut Layout> {
        match &mut self.body {
            Body::Layout(layout) => Some(layout),
            Body::Widget(_) => None,
        }
    }

    /// Downcast the widget of a leaf component.
    pub fn widget<T: Widget>(&self) -> Option<&T> {
        match &self.body {
            Body::Widget(widget) => (widget.as_ref() as &dyn Any).downcast_ref::<T>(),
            Body::Layout(_) => None,
        }
    }

    pub fn widget_mut<T: Widget>(&mut self) -> Option<&mut T> {
        match &mut self.body {
            Body::Widget(widget) => (widget.as_mut() as &mut dyn Any).downcast_mut::<T>(),
            Body::Layout(_) => None,
        }
    }

    // ------------------------------------------------------------------------
    // Visibility
    // ------------------------------------------------------------------------

    /// Set the enabled flag and re-examine visibility if it changed.
    pub fn set_enabled(&mut self, enabled: bool, ctx: &mut UxContext<'_>) {
        if self.is_enabled() != enabled {
            self.state.flags.set(ComponentFlags::ENABLED, enabled);
            self.examine_visibility(ctx);
        }
    }

    /// Set the visible flag and re-examine visibility if it changed.
    pub fn set_visible_examine(&mut self, visible: bool, ctx: &mut UxContext<'_>) {
        if self.is_visible() != visible {
            self.state.flags.set(ComponentFlags::VISIBLE, visible);
            self.examine_visibility(ctx);
        }
    }

    pub(crate) fn set_focus_internal(&mut self, focus: bool) {
        self.state.flags.set(ComponentFlags::FOCUS, focus);
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.state.flags.set(ComponentFlags::BUSY, busy);
    }

    /// Apply the enabled and visible flags.
    ///
    /// When both are set the component resolves against the display, gets a
    /// fresh local bitmap, receives `Enter` and draws. Otherwise it receives
    /// `Exit` and its local bitmap is freed.
    pub fn examine_visibility(&mut self, ctx: &mut UxContext<'_>) {
        if self.is_layout() {
            self.examine_layout_visibility(ctx);
            return;
        }

        if self.is_ready_to_draw() {
            if !self.is_created() {
                fatal!("{} was not created using Component::create()", self.name());
            }

            let Some(info) = ctx.display_info() else {
                self.set_visible_examine(false, ctx);
                return;
            };

            self.state.reference.set_bitmap(info);
            self.allocate_local_bitmap();
            self.handle_event(&Event::System(SystemEvent::Enter), ctx);
            self.redraw(ctx);
        } else {
            self.handle_event(&Event::System(SystemEvent::Exit), ctx);
            if self.state.local_bitmap.take().is_some() {
                debug!("{}: local bitmap freed", self.state.name);
            }
        }
    }

    fn allocate_local_bitmap(&mut self) {
        let info = self.state.reference.bitmap();
        let size = self.state.reference.calculate_area_on_bitmap();
        debug!(
            "{}: local bitmap {}x{} at {} bpp",
            self.state.name,
            size.width,
            size.height,
            info.bits_per_pixel.bits()
        );
        self.state.local_bitmap = Some(Bitmap::new(size, info.bits_per_pixel));
        self.state.refresh_region = Rectangle::new(Point::zero(), size);
    }

    /// Called by the parent when an already visible child moved or resized.
    pub(crate) fn touch_drawing_attributes(&mut self, ctx: &mut UxContext<'_>) {
        if self.is_layout() {
            self.shift_origin(DrawingPoint::zero(), ctx);
            return;
        }

        if self.is_ready_to_draw() {
            let size = self.state.reference.calculate_area_on_bitmap();
            let stale = self
                .state
                .local_bitmap
                .as_ref()
                .is_none_or(|bitmap| bitmap.size() != size);
            if stale {
                self.allocate_local_bitmap();
                self.redraw(ctx);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------------

    /// Draw into the local bitmap and mark the component pending.
    ///
    /// Does nothing unless the component is enabled and visible.
    pub fn redraw(&mut self, ctx: &mut UxContext<'_>) {
        if !self.is_ready_to_draw() {
            return;
        }

        if let Body::Layout(layout) = &mut self.body {
            layout.redraw_children(ctx);
            self.set_refresh_drawing_pending();
            return;
        }

        self.set_busy(true);
        let Component { state, body } = self;
        if let (Body::Widget(widget), Some(bitmap)) = (body, state.local_bitmap.as_mut()) {
            let cx = DrawContext {
                name: &state.name,
                value: ctx.model().get(&state.name),
                theme: ctx.theme(),
                assets: ctx.assets(),
                style: state.theme_style,
                state: state.theme_state,
                antialias: state.flags.contains(ComponentFlags::ANTIALIAS),
            };
            let attributes = ScaledAttributes::new(bitmap.region());
            let _ = widget.draw(&cx, attributes, bitmap);
        }
        self.set_busy(false);
        self.set_refresh_drawing_pending();
    }

    pub fn set_refresh_drawing_pending(&mut self) {
        self.state.flags.insert(ComponentFlags::REFRESH_PENDING);
    }

    /// Whether this component or, for a layout, any descendant is pending.
    ///
    /// Pending state therefore always reaches every ancestor.
    pub fn is_refresh_drawing_pending(&self) -> bool {
        if self.state.flags.contains(ComponentFlags::REFRESH_PENDING) {
            return true;
        }
        match &self.body {
            Body::Layout(layout) => layout
                .components()
                .any(|child| child.is_refresh_drawing_pending()),
            Body::Widget(_) => false,
        }
    }

    /// Restrict the part of the component that reaches the display.
    ///
    /// `region` is in the component's local coordinates. A zero-area region
    /// makes a leaf invisible.
    pub fn set_refresh_region(&mut self, region: Rectangle, ctx: &mut UxContext<'_>) {
        if self.is_layout() {
            self.set_layout_refresh_region(region, ctx);
            return;
        }

        self.state.refresh_region = region;
        if geometry::region_area(&region) == 0 {
            self.set_visible_examine(false, ctx);
        }
    }

    /// Push pending pixels to the display.
    ///
    /// Leaves copy their refresh region, layouts recurse into pending
    /// children. Pending is cleared even when the display fails; the write is
    /// not retried.
    pub fn refresh_drawing(&mut self, ctx: &mut UxContext<'_>) -> UxResult<()> {
        let result = match self.as_layout_mut() {
            Some(layout) => layout.refresh_children(ctx),
            None => self.write_refresh_region(ctx),
        };
        self.state.flags.remove(ComponentFlags::REFRESH_PENDING);
        result
    }

    fn write_refresh_region(&self, ctx: &mut UxContext<'_>) -> UxResult<()> {
        if !self.is_ready_to_draw() {
            return Ok(());
        }
        let Some(bitmap) = self.state.local_bitmap.as_ref() else {
            return Ok(());
        };

        ctx.set_display_palette(self.state.theme_style, self.state.theme_state)?;

        let window = self.state.refresh_window();
        if geometry::region_area(&window) == 0 {
            return Ok(());
        }

        if let Some(display) = ctx.display_mut() {
            display.set_window(window)?;
            display.write_bitmap(bitmap, self.state.refresh_region.top_left)?;
        }
        Ok(())
    }

    /// Clear the component's visible window on the display.
    pub fn erase(&mut self, ctx: &mut UxContext<'_>) -> UxResult<()> {
        if !self.is_ready_to_draw() {
            return Ok(());
        }

        ctx.set_display_palette(self.state.theme_style, self.state.theme_state)?;

        let window = self.state.refresh_window();
        if geometry::region_area(&window) == 0 {
            return Ok(());
        }

        if let Some(display) = ctx.display_mut() {
            display.set_window(window)?;
            display.clear()?;
        }
        Ok(())
    }

    /// Device point to 0..1000 units inside the component.
    pub fn translate_point(&self, point: Point) -> DrawingPoint {
        self.state.translate_point(point)
    }

    /// Whether a device point falls inside the visible part of the component.
    pub fn contains(&self, point: Point) -> bool {
        self.state.contains(point)
    }

    // ------------------------------------------------------------------------
    // Model binding
    // ------------------------------------------------------------------------

    pub fn value<'c>(&self, ctx: &'c UxContext<'_>) -> Option<&'c str> {
        ctx.model().get(&self.state.name)
    }

    pub fn set_value(&self, ctx: &mut UxContext<'_>, value: &str) {
        ctx.model_mut().set(&self.state.name, value);
    }

    pub fn set_value_bool(&self, ctx: &mut UxContext<'_>, value: bool) {
        ctx.model_mut().set_bool(&self.state.name, value);
    }

    /// Queue a [`ComponentEvent`] with this component as the source.
    pub fn trigger_event(&self, ctx: &mut UxContext<'_>, id: WidgetEventId) {
        ctx.trigger_event(Event::Component(ComponentEvent {
            source: self.state.name.clone(),
            id,
        }));
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// Run this component's own handler.
    pub fn handle_event(&mut self, event: &Event, ctx: &mut UxContext<'_>) {
        let redraw = {
            let Component { state, body } = self;
            let Body::Widget(widget) = body else {
                return;
            };
            let mut cx = EventContext {
                state,
                ctx: &mut *ctx,
                redraw: false,
            };
            widget.handle_event(event, &mut cx);
            cx.redraw
        };

        if redraw {
            self.redraw(ctx);
        }
    }

    /// Deliver an event to this component and, for layouts, its subtree.
    pub fn distribute_event(&mut self, event: &Event, ctx: &mut UxContext<'_>) {
        trace!("{} <- {:?}", self.state.name, event);
        if self.is_layout() {
            self.distribute_layout_event(event, ctx);
        } else {
            self.handle_event(event, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplayDevice;
    use crate::test_support::{Harness, Probe};
    use embedded_graphics::pixelcolor::Rgb565;

    fn probe(name: &str) -> Box<Component> {
        Component::new(name, Probe::new(Rgb565::RED)).create()
    }

    #[test]
    fn test_new_component_defaults() {
        let component = Component::new("probe", Probe::new(Rgb565::RED));
        assert!(component.is_enabled());
        assert!(component.has_focus());
        assert!(!component.is_visible());
        assert!(!component.is_created());
        assert_eq!(component.theme_style(), ThemeStyle::BrandPrimary);
        assert_eq!(
            component.reference_drawing_attributes().area(),
            DrawingArea::full()
        );
    }

    #[test]
    fn test_visible_allocates_enters_and_draws() {
        let mut harness = Harness::new(Size::new(100, 50));
        let mut component = probe("probe");

        component.set_visible_examine(true, &mut harness.ctx());

        assert_eq!(
            component.local_bitmap().map(|b| b.size()),
            Some(Size::new(100, 50))
        );
        assert_eq!(
            component.refresh_region(),
            Rectangle::new(Point::zero(), Size::new(100, 50))
        );
        let probe = component.widget::<Probe>().unwrap();
        assert_eq!(probe.seen[0], Event::System(SystemEvent::Enter));
        assert_eq!(probe.draws, 1);
        assert!(component.is_refresh_drawing_pending());
    }

    #[test]
    fn test_visibility_toggle_reclaims_bitmap() {
        let mut harness = Harness::new(Size::new(200, 100));
        let mut component = probe("probe");
        component.set_visible_examine(true, &mut harness.ctx());
        assert_eq!(component.local_bitmap().unwrap().size(), Size::new(200, 100));

        component.set_visible_examine(false, &mut harness.ctx());
        assert!(component.local_bitmap().is_none());
        assert_eq!(
            component.widget::<Probe>().unwrap().seen.last(),
            Some(&Event::System(SystemEvent::Exit))
        );

        component.set_reference_drawing_attributes(
            DrawingAttributes::default()
                + DrawingPoint::zero()
                + DrawingArea::new(500, 250),
        );
        component.set_visible_examine(true, &mut harness.ctx());
        assert_eq!(component.local_bitmap().unwrap().size(), Size::new(100, 25));
    }

    #[test]
    fn test_no_display_keeps_component_invisible() {
        let mut harness = Harness::headless();
        let mut component = probe("probe");
        component.set_visible_examine(true, &mut harness.ctx());
        assert!(!component.is_visible());
        assert!(component.local_bitmap().is_none());
    }

    #[test]
    #[should_panic(expected = "was not created")]
    fn test_uncreated_component_is_fatal() {
        let mut harness = Harness::new(Size::new(10, 10));
        let mut component = Component::new("raw", Probe::new(Rgb565::RED));
        component.set_visible_examine(true, &mut harness.ctx());
    }

    #[test]
    fn test_refresh_drawing_writes_refresh_region() {
        let mut harness = Harness::new(Size::new(40, 40));
        let mut component = Component::new("probe", Probe::new(Rgb565::GREEN))
            .with_drawing_point(500, 500)
            .with_drawing_area(500, 500)
            .create();
        component.set_visible_examine(true, &mut harness.ctx());
        component.refresh_drawing(&mut harness.ctx()).unwrap();

        assert!(!component.is_refresh_drawing_pending());
        assert_eq!(harness.display.write_count(), 1);
        assert_eq!(
            harness.display.window(),
            Rectangle::new(Point::new(20, 20), Size::new(20, 20))
        );
        assert_eq!(harness.display.pixel(Point::new(25, 25)), Some(Rgb565::GREEN));
        assert_eq!(harness.display.pixel(Point::new(5, 5)), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_zero_refresh_region_is_silent_and_hides() {
        let mut harness = Harness::new(Size::new(40, 40));
        let mut component = probe("probe");
        component.set_visible_examine(true, &mut harness.ctx());

        component.set_refresh_region(Rectangle::zero(), &mut harness.ctx());
        assert!(!component.is_visible());
        component.refresh_drawing(&mut harness.ctx()).unwrap();
        assert_eq!(harness.display.write_count(), 0);
    }

    #[test]
    fn test_refresh_drawing_failure_clears_pending() {
        let mut harness = Harness::new(Size::new(40, 40));
        let mut component = probe("probe");
        component.set_visible_examine(true, &mut harness.ctx());
        harness.display.disable().unwrap();

        assert!(component.refresh_drawing(&mut harness.ctx()).is_err());
        assert!(!component.is_refresh_drawing_pending());
    }

    #[test]
    fn test_translate_point_and_contains() {
        let mut harness = Harness::new(Size::new(200, 100));
        let mut component = Component::new("probe", Probe::new(Rgb565::RED))
            .with_drawing_point(500, 0)
            .with_drawing_area(500, 1000)
            .create();
        component.set_visible_examine(true, &mut harness.ctx());

        assert_eq!(
            component.translate_point(Point::new(150, 50)),
            DrawingPoint::new(500, 500)
        );
        assert!(component.contains(Point::new(150, 50)));
        assert!(!component.contains(Point::new(50, 50)));
    }

    #[test]
    fn test_model_binding_uses_name() {
        let mut harness = Harness::new(Size::new(10, 10));
        let component = probe("volume");
        component.set_value(&mut harness.ctx(), "11");
        assert_eq!(harness.model.get("volume"), Some("11"));
        component.set_value_bool(&mut harness.ctx(), true);
        assert_eq!(component.value(&harness.ctx()), Some("true"));
    }

    #[test]
    fn test_trigger_event_names_source() {
        let mut harness = Harness::new(Size::new(10, 10));
        let component = probe("ok");
        component.trigger_event(&mut harness.ctx(), WidgetEventId::Released);

        let events = harness.take_events();
        assert_eq!(events.len(), 1);
        let event = events[0].component().unwrap();
        assert_eq!(event.source.as_str(), "ok");
        assert_eq!(event.id, WidgetEventId::Released);
    }

    #[test]
    fn test_disable_frees_bitmap() {
        let mut harness = Harness::new(Size::new(10, 10));
        let mut component = probe("probe");
        component.set_visible_examine(true, &mut harness.ctx());
        component.set_enabled(false, &mut harness.ctx());
        assert!(component.local_bitmap().is_none());
        assert!(component.is_visible());
    }
}
