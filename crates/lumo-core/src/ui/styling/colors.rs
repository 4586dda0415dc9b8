//! Color definitions and palette management
//!
//! RGB565 format: 5 bits red, 6 bits green, 5 bits blue.
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

/// Page background - the warm off-white of the dice table
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(0xFF >> 3, 0xE9 >> 2, 0xE7 >> 3);

/// Card and panel surface - pure white
pub const COLOR_SURFACE: Rgb565 = Rgb565::new(31, 63, 31);

/// Border/stroke color - medium gray
pub const COLOR_STROKE: Rgb565 = Rgb565::new(120 >> 3, 120 >> 2, 120 >> 3);

/// Accent used for primary buttons - deep teal
pub const COLOR_ACCENT: Rgb565 = Rgb565::new(0 >> 3, 105 >> 2, 92 >> 3);

/// Near-black for body text
pub const COLOR_TEXT: Rgb565 = Rgb565::new(2, 4, 2);

/// Gray for captions and placeholders
pub const COLOR_TEXT_MUTED: Rgb565 = Rgb565::new(12, 24, 12);

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// A cohesive color palette for consistent UI theming.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPalette {
    /// Primary accent color - used for key interactive elements
    pub primary: Rgb565,

    /// Main background color
    pub background: Rgb565,

    /// Surface color for cards and panels
    pub surface: Rgb565,

    /// Primary text color - high contrast
    pub text_primary: Rgb565,

    /// Secondary text color - lower contrast for less important information
    pub text_secondary: Rgb565,

    /// Border color for separators and outlines
    pub border: Rgb565,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::light()
    }
}

impl ColorPalette {
    /// Dark text on a warm light background.
    pub fn light() -> Self {
        Self {
            primary: COLOR_ACCENT,
            background: COLOR_BACKGROUND,
            surface: COLOR_SURFACE,
            text_primary: COLOR_TEXT,
            text_secondary: COLOR_TEXT_MUTED,
            border: COLOR_STROKE,
        }
    }
}
