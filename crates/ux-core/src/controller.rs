// src/controller.rs
//! Scene management with navigation and event dispatching.
//!
//! The [`Controller`] owns every scene (a root [`Component`], normally a
//! layout) and shows exactly one of them. Transitions are requested at any
//! time and applied at the start of the next [`Controller::distribute_event`],
//! so a scene never disappears while one of its components is handling an
//! event.

use alloc::boxed::Box;
use alloc::vec::Vec;

use log::{debug, warn};

use crate::component::Component;
use crate::context::UxContext;
use crate::event::{Event, SystemEvent};
use crate::geometry::{self, Name};

/// Navigation requested by a [`SceneHandler`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneRequest {
    Transition(Name),
    GoBack,
}

/// Application hook that sees every event before the active scene does.
pub trait SceneHandler {
    fn handle_event(
        &mut self,
        scene: &str,
        event: &Event,
        ctx: &mut UxContext<'_>,
    ) -> Option<SceneRequest>;
}

impl<F> SceneHandler for F
where
    F: FnMut(&str, &Event, &mut UxContext<'_>) -> Option<SceneRequest>,
{
    fn handle_event(
        &mut self,
        scene: &str,
        event: &Event,
        ctx: &mut UxContext<'_>,
    ) -> Option<SceneRequest> {
        self(scene, event, ctx)
    }
}

#[derive(Debug, Clone)]
struct PendingTransition {
    scene: Name,
    remember: bool,
}

/// Owns the scenes and routes events to the active one.
pub struct Controller {
    scenes: Vec<Box<Component>>,
    current: Option<usize>,
    next: Option<PendingTransition>,
    navigation_stack: heapless::Vec<usize, 8>,
    handler: Option<Box<dyn SceneHandler>>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            scenes: Vec::new(),
            current: None,
            next: None,
            navigation_stack: heapless::Vec::new(),
            handler: None,
        }
    }

    pub fn with_scene(mut self, scene: Box<Component>) -> Self {
        self.register_scene(scene);
        self
    }

    pub fn with_handler<H: SceneHandler + 'static>(mut self, handler: H) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Register a scene. The first one registered is shown first.
    pub fn register_scene(&mut self, scene: Box<Component>) {
        if !scene.is_created() {
            fatal!(
                "{} must be created with Component::create() before it is registered",
                scene.name()
            );
        }
        if self.current.is_none() && self.next.is_none() {
            self.next = Some(PendingTransition {
                scene: geometry::name(scene.name()),
                remember: false,
            });
        }
        self.scenes.push(scene);
    }

    /// Show `scene` from the next distributed event on.
    pub fn transition(&mut self, scene: &str) {
        self.next = Some(PendingTransition {
            scene: geometry::name(scene),
            remember: true,
        });
    }

    /// Return to the previously shown scene.
    ///
    /// Returns false if there is nothing to go back to.
    pub fn go_back(&mut self) -> bool {
        let Some(previous) = self.navigation_stack.pop() else {
            return false;
        };
        self.next = Some(PendingTransition {
            scene: geometry::name(self.scenes[previous].name()),
            remember: false,
        });
        true
    }

    pub fn current(&self) -> Option<&Component> {
        self.current.map(|index| &*self.scenes[index])
    }

    pub fn current_mut(&mut self) -> Option<&mut Component> {
        self.current.map(|index| &mut *self.scenes[index])
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current().map(Component::name)
    }

    pub fn scene(&self, name: &str) -> Option<&Component> {
        self.scenes.iter().map(|s| &**s).find(|s| s.name() == name)
    }

    pub fn scene_mut(&mut self, name: &str) -> Option<&mut Component> {
        self.scenes
            .iter_mut()
            .map(|s| &mut **s)
            .find(|s| s.name() == name)
    }

    pub fn has_pending_transition(&self) -> bool {
        self.next.is_some()
    }

    /// Apply any pending transition, then deliver `event` to the handler and
    /// the active scene and push whatever became pending to the display.
    pub fn distribute_event(&mut self, event: &Event, ctx: &mut UxContext<'_>) {
        self.apply_transition(ctx);
        let Some(index) = self.current else {
            return;
        };

        if let Some(handler) = self.handler.as_mut() {
            let scene = self.scenes[index].name();
            match handler.handle_event(scene, event, ctx) {
                Some(SceneRequest::Transition(name)) => self.transition(&name),
                Some(SceneRequest::GoBack) => {
                    self.go_back();
                }
                None => {}
            }
        }

        let scene = &mut self.scenes[index];
        scene.distribute_event(event, ctx);

        if scene.is_refresh_drawing_pending()
            && let Err(err) = scene.refresh_drawing(ctx)
        {
            warn!("{}: refresh failed: {}", scene.name(), err);
        }
    }

    fn apply_transition(&mut self, ctx: &mut UxContext<'_>) {
        let Some(next) = self.next.take() else {
            return;
        };
        let Some(index) = self.scenes.iter().position(|s| s.name() == next.scene) else {
            warn!("no scene named {}", next.scene);
            return;
        };
        if self.current == Some(index) {
            return;
        }

        if let Some(previous) = self.current {
            let scene = &mut self.scenes[previous];
            scene.distribute_event(&Event::System(SystemEvent::Exit), ctx);
            scene.set_visible_examine(false, ctx);
            if next.remember && self.navigation_stack.push(previous).is_err() {
                self.navigation_stack.remove(0);
                self.navigation_stack.push(previous).ok();
            }
        }

        debug!(
            "transition {} -> {}",
            self.current_name().unwrap_or("none"),
            next.scene
        );
        self.current = Some(index);

        let scene = &mut self.scenes[index];
        scene.set_focus(true);
        scene.set_visible_examine(true, ctx);
        if let Err(err) = scene.erase(ctx) {
            warn!("{}: erase failed: {}", scene.name(), err);
        }
    }
}
