//! Desktop simulator for the ux-core retained-mode UI.
//!
//! Runs the real event loop against a RAM frame buffer and mirrors it into an
//! SDL2 window via `embedded-graphics-simulator`.
//!
//! # Controls
//!
//! | Input        | Action                           |
//! |--------------|----------------------------------|
//! | Mouse drag   | Scroll the list                  |
//! | Click a row  | Open the controls scene          |
//! | Back button  | Return to the list               |
//! | Drag notes   | Scroll the text area             |
//! | Q / Esc      | Quit                             |

use std::time::Instant as HostInstant;

use embassy_time::{Duration, Instant};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info};

use ux_core::widgets::{
    Button, Label, List, ListItem, ProgressBar, Separator, Slider, TextArea, ToggleSwitch,
};
use ux_core::{
    Clock, Component, Controller, Event, EventLoop, EventLoopHandle, Flow, FrameBufferDisplay,
    Layout, Model, SceneRequest, ThemeStyle, TouchContext, UxConfig, UxContext, WidgetEventId,
    geometry,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH_PX: u32 = 240;
const DISPLAY_HEIGHT_PX: u32 = 320;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

// ---------------------------------------------------------------------------
// Host clock
// ---------------------------------------------------------------------------

/// Wall clock backed by `std::time`, sleeping the thread on `wait`.
struct HostClock {
    start: HostInstant,
}

impl HostClock {
    fn new() -> Self {
        Self {
            start: HostInstant::now(),
        }
    }
}

impl Clock for HostClock {
    fn now(&self) -> Instant {
        Instant::from_micros(self.start.elapsed().as_micros() as u64)
    }

    fn wait(&mut self, duration: Duration) {
        std::thread::sleep(std::time::Duration::from_micros(duration.as_micros()));
    }
}

// ---------------------------------------------------------------------------
// Scenes
// ---------------------------------------------------------------------------

fn list_scene() -> Box<Component> {
    let mut list = List::new("menu").with_item_height(160);
    for i in 0..20 {
        let name = format!("item{i}");
        let label = format!("Item {}", i + 1);
        list = list.with_item(Component::new(&name, ListItem::new(&label)));
    }
    list.with_filler(ThemeStyle::BrandPrimary).build()
}

fn controls_scene() -> Box<Component> {
    let row = |component: Component, height: u16| component.with_drawing_area(1000, height).create();

    let layout = Layout::new(Flow::VerticalNoScroll)
        .with_component(row(Component::new("selected", Label::new("Controls")), 150))
        .with_component(row(Component::new("gap", Separator::new().with_line(true)), 50))
        .with_component(row(Component::new("wifi", ToggleSwitch::default()), 150))
        .with_component(row(Component::new("volume", Slider::default()), 150))
        .with_component(row(
            Component::new("download", ProgressBar::new()).with_theme_style(ThemeStyle::Success),
            100,
        ))
        .with_component(row(
            Component::new(
                "notes",
                TextArea::new(
                    "Drag this text up or down to scroll it. Each half line of travel moves one line.\nThe slider and toggle write their values into the model.",
                )
                .with_text_height(250),
            ),
            200,
        ))
        .with_component(row(
            Component::new("back", Button::new("Back")).with_theme_style(ThemeStyle::BrandSecondary),
            200,
        ));
    Component::new_layout("controls", layout).create()
}

fn handle_scene_event(scene: &str, event: &Event, ctx: &mut UxContext<'_>) -> Option<SceneRequest> {
    let component = event.component()?;
    info!("{scene}: {} {:?}", component.source, component.id);

    match (scene, component.id) {
        ("menu", WidgetEventId::Selected) => {
            let label = format!("Row {}", component.source.trim_start_matches("item"));
            ctx.model_mut().set("selected", &label);
            Some(SceneRequest::Transition(geometry::name("controls")))
        }
        ("controls", WidgetEventId::Released) if component.source.as_str() == "back" => {
            Some(SceneRequest::GoBack)
        }
        ("controls", WidgetEventId::Held) if component.source.as_str() == "back" => {
            info!("back held");
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting ux simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );

    let size = Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX);
    let mut display = SimulatorDisplay::<Rgb565>::new(size);
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("UX Simulator", &output_settings);

    let mut model = Model::new();
    model.set("download", "35/100");
    model.set_bool("wifi", true);

    let controller = Controller::new()
        .with_scene(list_scene())
        .with_scene(controls_scene())
        .with_handler(handle_scene_event);
    let mut app = EventLoop::new(
        UxConfig::default(),
        controller,
        Some(FrameBufferDisplay::new(size)),
        HostClock::new(),
    )
    .with_model(model);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = display.clear(Rgb565::BLACK);
    window.update(&display);
    app.start();

    let mut touches: Vec<TouchContext> = Vec::new();
    let mut mouse_down = false;

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. }
                    if keycode == Keycode::Q || keycode == Keycode::Escape =>
                {
                    break 'running;
                }
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    mouse_down = true;
                    touches.push(TouchContext::pressed(point));
                }
                SimulatorEvent::MouseMove { point } if mouse_down => {
                    touches.push(TouchContext::active(point));
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    mouse_down = false;
                    touches.push(TouchContext::released(point));
                }
                _ => {}
            }
        }

        app.step(&mut |handle: &mut EventLoopHandle<'_>| {
            // Queued LIFO, so push newest first to deliver in order.
            for touch in touches.drain(..).rev() {
                handle.trigger_event(Event::Touch(touch));
            }
        });

        if let Some(frame) = app.display_mut()
            && let Err(e) = frame.flush(&mut display)
        {
            error!("Flush error: {:?}", e);
        }
        window.update(&display);
    }

    info!("Simulator exiting");
}
