//! Event types and the event accumulation stack.

use alloc::vec::Vec;

use embedded_graphics::prelude::*;

use crate::geometry::Name;

/// Events injected by the event loop itself.
///
/// These are never queued by components; see [`EventStack::trigger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemEvent {
    None,
    Enter,
    Exit,
    Periodic,
    Transition,
}

/// Raw and classified touch event identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchEventId {
    #[default]
    None,
    /// Raw sample while the pointer is down
    Active,
    /// Raw sample when the pointer goes down
    Pressed,
    /// Raw sample when the pointer goes up
    Released,
    /// Classified: the pointer moved along the locked axis
    DraggedPoint,
    /// Classified: press and release without a drag
    Touched,
    Completed,
}

/// A touch sample plus the drag vector along the locked axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchContext {
    pub id: TouchEventId,
    pub point: Point,
    pub drag: Point,
}

impl TouchContext {
    pub fn new(id: TouchEventId, point: Point) -> Self {
        Self {
            id,
            point,
            drag: Point::zero(),
        }
    }

    pub fn pressed(point: Point) -> Self {
        Self::new(TouchEventId::Pressed, point)
    }

    pub fn active(point: Point) -> Self {
        Self::new(TouchEventId::Active, point)
    }

    pub fn released(point: Point) -> Self {
        Self::new(TouchEventId::Released, point)
    }

    pub fn with_drag(mut self, drag: Point) -> Self {
        self.drag = drag;
        self
    }

    /// Whether this is a raw sample the gesture classifier consumes.
    pub fn is_raw(&self) -> bool {
        matches!(
            self.id,
            TouchEventId::Active | TouchEventId::Pressed | TouchEventId::Released
        )
    }
}

/// What a widget reports about itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEventId {
    None,
    Active,
    Pressed,
    Released,
    Held,
    Changed,
    Selected,
}

/// Event raised by a component, carrying its name as the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentEvent {
    pub source: Name,
    pub id: WidgetEventId,
}

/// Everything that flows through `distribute_event`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    System(SystemEvent),
    Touch(TouchContext),
    Component(ComponentEvent),
    /// Free-form application event
    Application { id: u32, value: i32 },
}

impl Event {
    pub fn is_system(&self, id: SystemEvent) -> bool {
        matches!(self, Event::System(event) if *event == id)
    }

    pub fn touch(&self) -> Option<&TouchContext> {
        match self {
            Event::Touch(context) => Some(context),
            _ => None,
        }
    }

    pub fn component(&self) -> Option<&ComponentEvent> {
        match self {
            Event::Component(event) => Some(event),
            _ => None,
        }
    }
}

impl From<TouchContext> for Event {
    fn from(context: TouchContext) -> Self {
        Event::Touch(context)
    }
}

/// Events triggered since the last drain.
///
/// Triggers land here and are only dispatched on the next pass of the event
/// loop, so a handler that triggers events never recurses into itself.
#[derive(Debug, Default)]
pub struct EventStack {
    events: Vec<Event>,
}

impl EventStack {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Queue an event for the next drain.
    ///
    /// System events are injected by the loop only; queueing one is fatal.
    pub fn trigger(&mut self, event: Event) {
        if let Event::System(system) = event {
            fatal!("cannot trigger system event {:?}", system);
        }
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Queued events, oldest first.
    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub(crate) fn swap(&mut self, other: &mut Vec<Event>) {
        core::mem::swap(&mut self.events, other);
    }
}
