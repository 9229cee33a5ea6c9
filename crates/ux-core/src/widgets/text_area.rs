// src/widgets/text_area.rs
//! Multi-line wrapped text that scrolls by dragging

use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::assets::FindFont;
use crate::bitmap::Bitmap;
use crate::component::{DrawContext, DrawResult, EventContext, Widget};
use crate::drawing::ScaledAttributes;
use crate::event::{Event, SystemEvent, TouchEventId};
use crate::geometry::SCALE;
use crate::widgets::inset;

/// Block of text wrapped at word boundaries, showing the model value stored
/// under the component's name when there is one.
///
/// Dragging scrolls one line for every half line height travelled. Dragging
/// up reveals later lines.
pub struct TextArea {
    text: String,
    max_length: usize,
    text_height: u16,
    scroll: usize,
    max_scroll: usize,
    line_height: u32,
    drag_accumulator: i32,
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextArea {
    pub fn new(text: &str) -> Self {
        let mut area = Self {
            text: String::new(),
            max_length: 256,
            text_height: 150,
            scroll: 0,
            max_scroll: 0,
            line_height: 0,
            drag_accumulator: 0,
        };
        area.append(text);
        area
    }

    /// Keep at most `length` bytes, dropping the oldest text first.
    pub fn with_max_length(mut self, length: usize) -> Self {
        self.max_length = length;
        self.trim_front();
        self
    }

    /// Line height in units of the component's height. Default is 150.
    pub fn with_text_height(mut self, height: u16) -> Self {
        self.text_height = height;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// First visible line.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn append(&mut self, input: &str) {
        self.text.push_str(input);
        self.trim_front();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.scroll = 0;
    }

    pub fn scroll_top(&mut self) {
        self.scroll = 0;
    }

    /// Show the last lines. Resolved against the wrapped text on the next draw.
    pub fn scroll_bottom(&mut self) {
        self.scroll = usize::MAX;
    }

    fn trim_front(&mut self) {
        if self.text.len() <= self.max_length {
            return;
        }
        let mut cut = self.text.len() - self.max_length;
        while !self.text.is_char_boundary(cut) {
            cut += 1;
        }
        self.text.drain(..cut);
    }

    fn scroll_by_drag(&mut self, dy: i32, cx: &mut EventContext<'_, '_>) {
        if self.line_height == 0 {
            return;
        }
        let step = (self.line_height as i32 / 2).max(1);
        let before = self.scroll.min(self.max_scroll);
        let mut scroll = before;

        self.drag_accumulator += dy;
        while self.drag_accumulator > step {
            self.drag_accumulator -= step;
            scroll = scroll.saturating_sub(1);
        }
        while self.drag_accumulator < -step {
            self.drag_accumulator += step;
            scroll = (scroll + 1).min(self.max_scroll);
        }

        self.scroll = scroll;
        if scroll != before {
            cx.redraw();
        }
    }
}

/// Split `text` into lines of at most `columns` characters.
///
/// Breaks at the last space that fits, or mid-word when a word is longer than
/// a line. Newlines always start a new line.
pub(crate) fn wrap_lines(text: &str, columns: usize) -> Vec<&str> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut rest = paragraph;
        while let Some((end, _)) = rest.char_indices().nth(columns) {
            let split = if rest[end..].starts_with(' ') {
                Some(end)
            } else {
                rest[..end].rfind(' ')
            };
            match split {
                Some(at) if at > 0 => {
                    lines.push(&rest[..at]);
                    rest = &rest[at + 1..];
                }
                _ => {
                    lines.push(&rest[..end]);
                    rest = &rest[end..];
                }
            }
        }
        if !rest.is_empty() || paragraph.is_empty() {
            lines.push(rest);
        }
    }
    lines
}

impl Widget for TextArea {
    fn draw(
        &mut self,
        cx: &DrawContext<'_>,
        attributes: ScaledAttributes,
        bitmap: &mut Bitmap,
    ) -> DrawResult {
        let palette = cx.palette();
        bitmap.clear(palette.background)?;

        let inner = inset(attributes.region(), attributes.height() / 20);
        let line_px = attributes.height() * self.text_height as u32 / SCALE as u32;
        let point_size = line_px.min(u8::MAX as u32) as u8;
        let Some(font) = cx
            .assets
            .find_font(FindFont::new(cx.theme.primary_font_name()).with_point_size(point_size))
            .or_else(|| cx.assets.fonts().iter().find(|f| !f.is_icon))
        else {
            self.line_height = 0;
            return Ok(());
        };

        let glyph = font.font.character_size;
        let advance = glyph.width + font.font.character_spacing;
        self.line_height = glyph.height;

        let columns = (inner.size.width / advance.max(1)) as usize;
        let visible = (inner.size.height / glyph.height.max(1)) as usize;
        let text = cx.value.unwrap_or(&self.text);
        let lines = wrap_lines(text, columns);
        self.max_scroll = lines.len().saturating_sub(visible);
        self.scroll = self.scroll.min(self.max_scroll);

        let style = MonoTextStyle::new(font.font, palette.text);
        for (row, line) in lines.into_iter().skip(self.scroll).take(visible).enumerate() {
            let origin = inner.top_left + Point::new(0, (row as u32 * glyph.height) as i32);
            Text::with_baseline(line, origin, style, Baseline::Top).draw(bitmap)?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: &Event, cx: &mut EventContext<'_, '_>) {
        match event {
            Event::Touch(touch) => match touch.id {
                TouchEventId::DraggedPoint if cx.contains(touch.point) => {
                    self.scroll_by_drag(touch.drag.y, cx);
                }
                TouchEventId::Released => self.drag_accumulator = 0,
                _ => {}
            },
            Event::System(SystemEvent::Exit) => self.drag_accumulator = 0,
            _ => {}
        }
    }
}
