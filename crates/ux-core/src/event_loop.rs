// src/event_loop.rs
//! The event loop: input polling, periodic ticks and queued dispatch.
//!
//! Each iteration:
//!
//! 1. The [`EventSource`] pushes raw input through an [`EventLoopHandle`]
//! 2. A `Periodic` event is distributed if the update period elapsed,
//!    otherwise the loop waits for the remainder of the period
//! 3. The event stack is swapped into a temporary stack and drained
//!    newest-first
//!
//! Events triggered while the temporary stack drains land on the (now
//! empty) event stack and wait for the next iteration, so dispatch never
//! recurses into itself.

use alloc::vec::Vec;

use embassy_time::{Duration, Instant};
use log::{info, trace};

use crate::assets::Assets;
use crate::config::UxConfig;
use crate::context::UxContext;
use crate::controller::Controller;
use crate::display::DisplayDevice;
use crate::event::{Event, EventStack, SystemEvent, TouchContext, TouchEventId};
use crate::gesture::TouchGesture;
use crate::model::Model;
use crate::theme::Theme;

// ============================================================================
// Time
// ============================================================================

/// Time source for the loop
pub trait Clock {
    fn now(&self) -> Instant;

    /// Block (or advance) for `duration`.
    fn wait(&mut self, duration: Duration);
}

/// A clock that only moves when told to. `wait` advances it exactly.
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    now: Instant,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::from_ticks(0))
    }

    pub fn starting_at(now: Instant) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now
    }

    fn wait(&mut self, duration: Duration) {
        self.advance(duration);
    }
}

// ============================================================================
// Input
// ============================================================================

/// What an [`EventSource`] may do to the loop
pub struct EventLoopHandle<'a> {
    events: &'a mut EventStack,
    stopped: &'a mut bool,
    now: Instant,
}

impl EventLoopHandle<'_> {
    /// Queue an event for this iteration's drain.
    pub fn trigger_event(&mut self, event: Event) {
        self.events.trigger(event);
    }

    pub fn stop(&mut self) {
        *self.stopped = true;
    }

    pub fn now(&self) -> Instant {
        self.now
    }
}

/// Polled once per iteration for raw input
pub trait EventSource {
    fn process_events(&mut self, handle: &mut EventLoopHandle<'_>);
}

impl<F> EventSource for F
where
    F: FnMut(&mut EventLoopHandle<'_>),
{
    fn process_events(&mut self, handle: &mut EventLoopHandle<'_>) {
        self(handle)
    }
}

// ============================================================================
// Loop
// ============================================================================

/// Owns the controller and everything its components borrow while handling
/// events.
pub struct EventLoop<D: DisplayDevice, C: Clock> {
    controller: Controller,
    model: Model,
    theme: Theme,
    assets: Assets,
    display: Option<D>,
    config: UxConfig,
    gesture: TouchGesture,
    event_stack: EventStack,
    temporary: Vec<Event>,
    update_timer: Instant,
    stopped: bool,
    clock: C,
}

impl<D: DisplayDevice, C: Clock> EventLoop<D, C> {
    pub fn new(config: UxConfig, controller: Controller, display: Option<D>, clock: C) -> Self {
        let update_timer = clock.now();
        Self {
            controller,
            model: Model::new(),
            theme: Theme::dark().with_button_hold_duration(config.button_hold_duration()),
            assets: Assets::builtin(),
            display,
            gesture: TouchGesture::new(config.drag_threshold_px),
            config,
            event_stack: EventStack::new(),
            temporary: Vec::new(),
            update_timer,
            stopped: false,
            clock,
        }
    }

    /// Replace the theme. Its hold duration is overridden by the config.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme.with_button_hold_duration(self.config.button_hold_duration());
        self
    }

    pub fn with_assets(mut self, assets: Assets) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_gesture(mut self, gesture: TouchGesture) -> Self {
        self.gesture = gesture;
        self
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn display(&self) -> Option<&D> {
        self.display.as_ref()
    }

    pub fn display_mut(&mut self) -> Option<&mut D> {
        self.display.as_mut()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn config(&self) -> &UxConfig {
        &self.config
    }

    /// Queue an event for the next drain. System events are fatal here.
    pub fn trigger_event(&mut self, event: Event) {
        self.event_stack.trigger(event);
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Show the first scene and restart the update timer.
    pub fn start(&mut self) {
        info!("event loop starting, update period {} ms", self.config.update_period_ms);
        self.distribute_event(&Event::System(SystemEvent::Enter));
        self.update_timer = self.clock.now();
    }

    /// One iteration: poll `source`, then tick and drain.
    pub fn step<S: EventSource + ?Sized>(&mut self, source: &mut S) {
        let mut handle = EventLoopHandle {
            events: &mut self.event_stack,
            stopped: &mut self.stopped,
            now: self.clock.now(),
        };
        source.process_events(&mut handle);
        self.process_update_event();
    }

    /// `start`, then `step` until something calls `stop`.
    pub fn run<S: EventSource + ?Sized>(&mut self, source: &mut S) {
        self.start();
        while !self.stopped {
            self.step(source);
        }
        info!("event loop stopped");
    }

    /// Emit `Periodic` if due (otherwise wait out the period), then drain
    /// the queued events newest-first.
    pub fn process_update_event(&mut self) {
        let period = self.config.update_period();
        let elapsed = self.clock.now().saturating_duration_since(self.update_timer);

        if elapsed >= period {
            self.distribute_event(&Event::System(SystemEvent::Periodic));
            self.update_timer = self.clock.now();
        } else {
            self.clock.wait(period - elapsed);
        }

        self.event_stack.swap(&mut self.temporary);
        if !self.temporary.is_empty() {
            trace!("draining {} events", self.temporary.len());
        }
        while let Some(event) = self.temporary.pop() {
            self.distribute_event(&event);
        }
    }

    /// Hand one event to the controller.
    ///
    /// Raw touch samples go through the gesture classifier: the raw sample
    /// is distributed first, then the classified event if there is one.
    pub fn distribute_event(&mut self, event: &Event) {
        let now = self.clock.now();

        let classified = match event {
            Event::Touch(touch) if touch.is_raw() => {
                let id = self.gesture.process(touch, now);
                (id != TouchEventId::None).then(|| {
                    Event::Touch(TouchContext {
                        id,
                        point: touch.point,
                        drag: self.gesture.drag(),
                    })
                })
            }
            _ => None,
        };

        let mut ctx = UxContext::new(
            &mut self.model,
            &self.theme,
            &self.assets,
            self.display.as_mut().map(|d| d as &mut dyn DisplayDevice),
            &mut self.event_stack,
            now,
        );
        self.controller.distribute_event(event, &mut ctx);
        if let Some(classified) = classified {
            self.controller.distribute_event(&classified, &mut ctx);
        }
    }
}
