//! Theme styles, interaction states and the palettes they select.
//!
//! All colors are RGB565. To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embassy_time::Duration;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::display::{DisplayDevice, DisplayError};

// ============================================================================
// Base Colors
// ============================================================================

const DARK_BACKGROUND: Rgb565 = Rgb565::new(18 >> 3, 23 >> 2, 24 >> 3);
const DARK_TEXT: Rgb565 = Rgb565::new(31, 63, 31);
const DARK_BORDER: Rgb565 = Rgb565::new(43 >> 3, 55 >> 2, 57 >> 3);

const LIGHT_BACKGROUND: Rgb565 = Rgb565::new(245 >> 3, 246 >> 2, 248 >> 3);
const LIGHT_TEXT: Rgb565 = Rgb565::new(20 >> 3, 24 >> 2, 28 >> 3);
const LIGHT_BORDER: Rgb565 = Rgb565::new(200 >> 3, 204 >> 2, 208 >> 3);

const DISABLED_COLOR: Rgb565 = Rgb565::new(16, 32, 16);
const DISABLED_TEXT: Rgb565 = Rgb565::new(10, 20, 10);

const ACCENT_DARK: Rgb565 = Rgb565::new(52 >> 3, 58 >> 2, 64 >> 3);
const ACCENT_LIGHT: Rgb565 = Rgb565::new(222 >> 3, 226 >> 2, 230 >> 3);
const ACCENT_BRAND_PRIMARY: Rgb565 = Rgb565::new(0, 123 >> 2, 255 >> 3);
const ACCENT_BRAND_SECONDARY: Rgb565 = Rgb565::new(108 >> 3, 117 >> 2, 125 >> 3);
const ACCENT_INFO: Rgb565 = Rgb565::new(23 >> 3, 162 >> 2, 184 >> 3);
const ACCENT_SUCCESS: Rgb565 = Rgb565::new(76 >> 3, 154 >> 2, 113 >> 3);
const ACCENT_WARNING: Rgb565 = Rgb565::new(200 >> 3, 145 >> 2, 85 >> 3);
const ACCENT_DANGER: Rgb565 = Rgb565::new(190 >> 3, 95 >> 2, 95 >> 3);

/// Visual variant of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeStyle {
    Dark,
    Light,
    #[default]
    BrandPrimary,
    BrandSecondary,
    Info,
    Success,
    Warning,
    Danger,
    OutlineDark,
    OutlineLight,
    OutlineBrandPrimary,
    OutlineBrandSecondary,
    OutlineInfo,
    OutlineSuccess,
    OutlineWarning,
    OutlineDanger,
}

impl ThemeStyle {
    pub const ALL: [ThemeStyle; 16] = [
        ThemeStyle::Dark,
        ThemeStyle::Light,
        ThemeStyle::BrandPrimary,
        ThemeStyle::BrandSecondary,
        ThemeStyle::Info,
        ThemeStyle::Success,
        ThemeStyle::Warning,
        ThemeStyle::Danger,
        ThemeStyle::OutlineDark,
        ThemeStyle::OutlineLight,
        ThemeStyle::OutlineBrandPrimary,
        ThemeStyle::OutlineBrandSecondary,
        ThemeStyle::OutlineInfo,
        ThemeStyle::OutlineSuccess,
        ThemeStyle::OutlineWarning,
        ThemeStyle::OutlineDanger,
    ];

    pub fn is_outline(&self) -> bool {
        (*self as u8) >= ThemeStyle::OutlineDark as u8
    }

    /// The solid style an outline style is drawn from.
    pub fn solid(&self) -> ThemeStyle {
        if self.is_outline() {
            ThemeStyle::ALL[*self as usize - ThemeStyle::OutlineDark as usize]
        } else {
            *self
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeStyle::Dark => "dark",
            ThemeStyle::Light => "light",
            ThemeStyle::BrandPrimary => "brandPrimary",
            ThemeStyle::BrandSecondary => "brandSecondary",
            ThemeStyle::Info => "info",
            ThemeStyle::Success => "success",
            ThemeStyle::Warning => "warning",
            ThemeStyle::Danger => "danger",
            ThemeStyle::OutlineDark => "outlineDark",
            ThemeStyle::OutlineLight => "outlineLight",
            ThemeStyle::OutlineBrandPrimary => "outlineBrandPrimary",
            ThemeStyle::OutlineBrandSecondary => "outlineBrandSecondary",
            ThemeStyle::OutlineInfo => "outlineInfo",
            ThemeStyle::OutlineSuccess => "outlineSuccess",
            ThemeStyle::OutlineWarning => "outlineWarning",
            ThemeStyle::OutlineDanger => "outlineDanger",
        }
    }
}

/// Interaction state of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeState {
    #[default]
    Default,
    Highlighted,
    Disabled,
}

impl ThemeState {
    pub fn name(&self) -> &'static str {
        match self {
            ThemeState::Default => "default",
            ThemeState::Highlighted => "highlighted",
            ThemeState::Disabled => "disabled",
        }
    }
}

/// The four colors a component is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb565,
    pub color: Rgb565,
    pub border: Rgb565,
    pub text: Rgb565,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb565::BLACK,
            color: Rgb565::WHITE,
            border: Rgb565::WHITE,
            text: Rgb565::WHITE,
        }
    }
}

fn darken(color: Rgb565) -> Rgb565 {
    Rgb565::new(
        color.r().saturating_sub(4),
        color.g().saturating_sub(8),
        color.b().saturating_sub(4),
    )
}

fn lighten(color: Rgb565) -> Rgb565 {
    Rgb565::new(
        (color.r() + 4).min(31),
        (color.g() + 8).min(63),
        (color.b() + 4).min(31),
    )
}

// ============================================================================
// Theme
// ============================================================================

/// Application-wide colors, fonts and interaction timing.
///
/// # Examples
///
/// ```ignore
/// let theme = Theme::dark();
/// let palette = theme.palette(ThemeStyle::OutlineSuccess, ThemeState::Highlighted);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    background: Rgb565,
    text_color: Rgb565,
    border_color: Rgb565,
    is_dark: bool,
    button_hold_duration: Duration,
    primary_font_name: &'static str,
    icon_font_name: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: DARK_BACKGROUND,
            text_color: DARK_TEXT,
            border_color: DARK_BORDER,
            is_dark: true,
            button_hold_duration: Duration::from_millis(750),
            primary_font_name: "mono",
            icon_font_name: "icons",
        }
    }

    pub fn light() -> Self {
        Self {
            background: LIGHT_BACKGROUND,
            text_color: LIGHT_TEXT,
            border_color: LIGHT_BORDER,
            is_dark: false,
            button_hold_duration: Duration::from_millis(750),
            primary_font_name: "mono",
            icon_font_name: "icons",
        }
    }

    pub fn with_button_hold_duration(mut self, duration: Duration) -> Self {
        self.button_hold_duration = duration;
        self
    }

    pub fn with_primary_font_name(mut self, name: &'static str) -> Self {
        self.primary_font_name = name;
        self
    }

    pub fn button_hold_duration(&self) -> Duration {
        self.button_hold_duration
    }

    pub fn primary_font_name(&self) -> &'static str {
        self.primary_font_name
    }

    pub fn icon_font_name(&self) -> &'static str {
        self.icon_font_name
    }

    pub fn background(&self) -> Rgb565 {
        self.background
    }

    pub fn text_color(&self) -> Rgb565 {
        self.text_color
    }

    pub fn border_color(&self) -> Rgb565 {
        self.border_color
    }

    fn accent(&self, style: ThemeStyle) -> Rgb565 {
        match style.solid() {
            ThemeStyle::Dark => ACCENT_DARK,
            ThemeStyle::Light => ACCENT_LIGHT,
            ThemeStyle::BrandSecondary => ACCENT_BRAND_SECONDARY,
            ThemeStyle::Info => ACCENT_INFO,
            ThemeStyle::Success => ACCENT_SUCCESS,
            ThemeStyle::Warning => ACCENT_WARNING,
            ThemeStyle::Danger => ACCENT_DANGER,
            _ => ACCENT_BRAND_PRIMARY,
        }
    }

    /// Palette for a style in a given interaction state.
    pub fn palette(&self, style: ThemeStyle, state: ThemeState) -> Palette {
        let accent = self.accent(style);
        let on_accent = if style.solid() == ThemeStyle::Light {
            LIGHT_TEXT
        } else {
            DARK_TEXT
        };

        let palette = if style.is_outline() {
            Palette {
                background: self.background,
                color: self.background,
                border: accent,
                text: accent,
            }
        } else {
            Palette {
                background: self.background,
                color: accent,
                border: self.border_color,
                text: on_accent,
            }
        };

        match state {
            ThemeState::Default => palette,
            ThemeState::Highlighted if style.is_outline() => Palette {
                color: accent,
                text: on_accent,
                ..palette
            },
            ThemeState::Highlighted => Palette {
                color: if self.is_dark {
                    lighten(accent)
                } else {
                    darken(accent)
                },
                ..palette
            },
            ThemeState::Disabled => Palette {
                color: if style.is_outline() {
                    self.background
                } else {
                    DISABLED_COLOR
                },
                border: DISABLED_COLOR,
                text: DISABLED_TEXT,
                ..palette
            },
        }
    }

    /// Load the palette for `style`/`state` into the display.
    pub fn set_display_palette(
        &self,
        display: &mut dyn DisplayDevice,
        style: ThemeStyle,
        state: ThemeState,
    ) -> Result<(), DisplayError> {
        display.set_palette(&self.palette(style, state))
    }
}
