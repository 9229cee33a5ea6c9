//! Hardware-independent core of a retained-mode UI toolkit for small displays.
//!
//! Widgets are composed into layouts, positioned in a resolution independent
//! 0..1000 coordinate space, and drawn into private off-screen bitmaps. Only
//! the regions that changed are pushed to the display. An event loop feeds
//! raw touch samples through a gesture classifier and dispatches the result
//! through the active scene.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
mod error;

pub mod assets;
pub mod bitmap;
pub mod component;
pub mod config;
pub mod context;
pub mod controller;
pub mod display;
pub mod drawing;
pub mod event;
pub mod event_loop;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod model;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_support;

pub use assets::{Assets, FindFont, FontInfo, FontStyle};
pub use bitmap::{Bitmap, BitmapInfo, BitsPerPixel, Margins};
pub use component::{Component, ComponentFlags, DrawContext, EventContext, Widget};
pub use config::UxConfig;
pub use context::UxContext;
pub use controller::{Controller, SceneHandler, SceneRequest};
pub use display::{DisplayDevice, DisplayError, FrameBufferDisplay};
pub use drawing::{DrawingAttributes, ScaledAttributes};
pub use error::{UxError, UxResult};
pub use event::{
    ComponentEvent, Event, EventStack, SystemEvent, TouchContext, TouchEventId, WidgetEventId,
};
pub use event_loop::{Clock, EventLoop, EventLoopHandle, EventSource, ManualClock};
pub use geometry::{DrawingArea, DrawingPoint, DrawingRegion, Name, SCALE};
pub use gesture::{DragAxes, TouchGesture};
pub use layout::{Flow, Item, Layout};
pub use model::Model;
pub use theme::{Palette, Theme, ThemeState, ThemeStyle};
