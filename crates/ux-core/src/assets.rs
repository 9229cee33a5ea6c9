// src/assets.rs
//! Font registry and lookup.
//!
//! Font files are not parsed here; the registry holds handles to fonts that
//! are already drawable (`embedded-graphics` mono fonts). What matters is the
//! lookup contract: nearest point size at or below the request, preferring
//! the requested style, ties broken by name, and no fallback at all when an
//! exact match was requested.

use alloc::vec::Vec;
use core::cmp::Ordering;

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{
    FONT_4X6, FONT_5X8, FONT_6X10, FONT_6X13_BOLD, FONT_7X13, FONT_8X13_BOLD, FONT_9X15,
    FONT_9X18_BOLD, FONT_10X20,
};

/// Weight/slant of a registered font
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FontStyle {
    Thin,
    #[default]
    Regular,
    Bold,
    Italic,
    Icon,
}

/// A drawable font plus the metadata it is looked up by
#[derive(Clone, Copy)]
pub struct FontInfo {
    pub name: &'static str,
    pub point_size: u8,
    pub style: FontStyle,
    pub is_icon: bool,
    pub font: &'static MonoFont<'static>,
}

impl core::fmt::Debug for FontInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FontInfo")
            .field("name", &self.name)
            .field("point_size", &self.point_size)
            .field("style", &self.style)
            .field("is_icon", &self.is_icon)
            .finish()
    }
}

impl FontInfo {
    pub const fn new(
        name: &'static str,
        point_size: u8,
        style: FontStyle,
        font: &'static MonoFont<'static>,
    ) -> Self {
        Self {
            name,
            point_size,
            style,
            is_icon: false,
            font,
        }
    }

    pub const fn icon(name: &'static str, point_size: u8, font: &'static MonoFont<'static>) -> Self {
        Self {
            name,
            point_size,
            style: FontStyle::Icon,
            is_icon: true,
            font,
        }
    }
}

/// Font lookup request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FindFont<'a> {
    pub name: &'a str,
    pub point_size: u8,
    pub style: FontStyle,
    pub exact_match: bool,
}

impl<'a> FindFont<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    pub fn with_point_size(mut self, point_size: u8) -> Self {
        self.point_size = point_size;
        self
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_exact_match(mut self, exact_match: bool) -> Self {
        self.exact_match = exact_match;
        self
    }
}

/// Registered fonts, kept sorted by style then point size.
#[derive(Debug, Clone, Default)]
pub struct Assets {
    fonts: Vec<FontInfo>,
}

impl Assets {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Registry of the `embedded-graphics` ASCII mono fonts under the name `mono`.
    pub fn builtin() -> Self {
        Self::new()
            .with_font(FontInfo::new("mono", 6, FontStyle::Regular, &FONT_4X6))
            .with_font(FontInfo::new("mono", 8, FontStyle::Regular, &FONT_5X8))
            .with_font(FontInfo::new("mono", 10, FontStyle::Regular, &FONT_6X10))
            .with_font(FontInfo::new("mono", 13, FontStyle::Regular, &FONT_7X13))
            .with_font(FontInfo::new("mono", 15, FontStyle::Regular, &FONT_9X15))
            .with_font(FontInfo::new("mono", 20, FontStyle::Regular, &FONT_10X20))
            .with_font(FontInfo::new("mono", 13, FontStyle::Bold, &FONT_6X13_BOLD))
            .with_font(FontInfo::new("mono", 14, FontStyle::Bold, &FONT_8X13_BOLD))
            .with_font(FontInfo::new("mono", 18, FontStyle::Bold, &FONT_9X18_BOLD))
    }

    pub fn with_font(mut self, font: FontInfo) -> Self {
        self.add_font(font);
        self
    }

    pub fn add_font(&mut self, font: FontInfo) {
        let at = self
            .fonts
            .partition_point(|f| (f.style, f.point_size) <= (font.style, font.point_size));
        self.fonts.insert(at, font);
    }

    pub fn fonts(&self) -> &[FontInfo] {
        &self.fonts
    }

    pub fn find_font(&self, request: FindFont<'_>) -> Option<&FontInfo> {
        self.find(request, false)
    }

    pub fn find_icon_font(&self, request: FindFont<'_>) -> Option<&FontInfo> {
        self.find(request, true)
    }

    fn find(&self, request: FindFont<'_>, is_icon: bool) -> Option<&FontInfo> {
        let candidates = self
            .fonts
            .iter()
            .filter(|f| f.is_icon == is_icon)
            .filter(|f| request.name.is_empty() || f.name == request.name);

        let mut best: Option<&FontInfo> = None;
        for font in candidates {
            if font.point_size == request.point_size && font.style == request.style {
                return Some(font);
            }
            if request.exact_match || font.point_size > request.point_size {
                continue;
            }
            best = match best {
                None => Some(font),
                Some(current) => match Self::rank(font, current, request.style) {
                    Ordering::Greater => Some(font),
                    _ => Some(current),
                },
            };
        }

        if request.exact_match { None } else { best }
    }

    /// Larger size wins, then the requested style, then the earlier name.
    fn rank(a: &FontInfo, b: &FontInfo, style: FontStyle) -> Ordering {
        a.point_size
            .cmp(&b.point_size)
            .then_with(|| (a.style == style).cmp(&(b.style == style)))
            .then_with(|| b.name.cmp(a.name))
    }
}
