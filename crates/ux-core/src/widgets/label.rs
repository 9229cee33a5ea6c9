// src/widgets/label.rs
//! Single line of text

use embedded_graphics::prelude::*;

use crate::bitmap::Bitmap;
use crate::component::{DrawContext, DrawResult, Widget};
use crate::drawing::ScaledAttributes;
use crate::geometry::{self, Name};
use crate::widgets::{TextAlign, draw_text};

/// Static text, replaced by the model value stored under the component's
/// name when there is one.
pub struct Label {
    text: Name,
    align: TextAlign,
}

impl Label {
    pub fn new(text: &str) -> Self {
        Self {
            text: geometry::name(text),
            align: TextAlign::default(),
        }
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, truncating to 32 bytes. Takes effect on the next draw.
    pub fn set_text(&mut self, text: &str) {
        self.text = geometry::name(text);
    }
}

impl Widget for Label {
    fn draw(
        &mut self,
        cx: &DrawContext<'_>,
        attributes: ScaledAttributes,
        bitmap: &mut Bitmap,
    ) -> DrawResult {
        let palette = cx.palette();
        bitmap.clear(palette.background)?;
        let text = cx.value.unwrap_or(&self.text);
        draw_text(
            bitmap,
            cx,
            text,
            attributes.region(),
            self.align,
            palette.text,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::test_support::Harness;
    use crate::theme::{ThemeState, ThemeStyle};

    fn text_pixels(harness: &mut Harness, text: &str) -> usize {
        let mut label = Component::new("title", Label::new(text))
            .with_drawing_area(1000, 1000)
            .create();
        label.set_visible_examine(true, &mut harness.ctx());

        let color = harness
            .theme
            .palette(ThemeStyle::default(), ThemeState::Default)
            .text;
        let bitmap = label.local_bitmap().unwrap();
        bitmap
            .pixels_in(bitmap.region())
            .filter(|p| *p == color)
            .count()
    }

    #[test]
    fn test_draws_text() {
        let mut harness = Harness::new(Size::new(100, 20));
        assert!(text_pixels(&mut harness, "HELLO") > 0);
    }

    #[test]
    fn test_empty_text_draws_background_only() {
        let mut harness = Harness::new(Size::new(100, 20));
        assert_eq!(text_pixels(&mut harness, ""), 0);
    }

    #[test]
    fn test_model_value_replaces_text() {
        let mut harness = Harness::new(Size::new(100, 20));
        harness.model.set("title", "WORLD");
        assert!(text_pixels(&mut harness, "") > 0);
    }

    #[test]
    fn test_set_text_truncates() {
        let mut label = Label::new("short");
        label.set_text("0123456789012345678901234567890123456789");
        assert_eq!(label.text().len(), 32);
    }
}
