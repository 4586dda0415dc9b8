//! Style configuration for UI elements
//!
//! Provides the core `Style` struct and builder methods for defining the
//! visual appearance of UI components (colors and borders).

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder};

use super::colors::{ColorPalette, WHITE};

/// Visual appearance of a UI element
///
/// Defines colors and borders. Use the builder pattern to construct styles
/// incrementally.
///
/// # Examples
///
/// ```ignore
/// use lumo_core::ui::styling::*;
///
/// // Plain text
/// let text_style = Style::new().with_foreground(COLOR_TEXT);
///
/// // Card surface with a border
/// let card_style = Style::new()
///     .with_background(COLOR_SURFACE)
///     .with_border(COLOR_STROKE, 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Style {
    /// Background fill color (if any)
    pub background_color: Option<Rgb565>,

    /// Foreground/text color (if any)
    pub foreground_color: Option<Rgb565>,

    /// Border color (if any)
    pub border_color: Option<Rgb565>,

    /// Border width in pixels (0 = no border)
    pub border_width: u32,
}

impl Default for Style {
    /// Returns a minimal default style with white text and no background or border
    fn default() -> Self {
        Self {
            background_color: None,
            foreground_color: Some(WHITE),
            border_color: None,
            border_width: 0,
        }
    }
}

impl Style {
    /// Creates a new empty style with defaults
    ///
    /// Prefer using builder methods to configure:
    ///
    /// ```ignore
    /// Style::new()
    ///     .with_background(COLOR_SURFACE)
    ///     .with_border(COLOR_STROKE, 2)
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the background color
    ///
    /// # Arguments
    /// * `color` - RGB565 color value for the background
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let style = Style::new().with_background(COLOR_SURFACE);
    /// ```
    pub fn with_background(mut self, color: Rgb565) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Sets the foreground (text) color
    ///
    /// # Arguments
    /// * `color` - RGB565 color value for text/foreground elements
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let style = Style::new().with_foreground(WHITE);
    /// ```
    pub fn with_foreground(mut self, color: Rgb565) -> Self {
        self.foreground_color = Some(color);
        self
    }

    /// Sets the border color and width
    ///
    /// A width of 0 effectively disables the border.
    ///
    /// # Arguments
    /// * `color` - RGB565 color value for the border
    /// * `width` - Border width in pixels
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // 2px border
    /// let style = Style::new().with_border(COLOR_STROKE, 2);
    /// ```
    pub fn with_border(mut self, color: Rgb565, width: u32) -> Self {
        self.border_color = Some(color);
        self.border_width = width;
        self
    }

    /// Converts this style to a `PrimitiveStyle` for embedded-graphics drawing
    ///
    /// # Returns
    ///
    /// A `PrimitiveStyle<Rgb565>` with the fill and stroke set from this
    /// style. The stroke is only set when both a border color and a non-zero
    /// width are present.
    pub fn to_primitive_style(&self) -> PrimitiveStyle<Rgb565> {
        let mut builder = PrimitiveStyleBuilder::new();

        if let Some(bg) = self.background_color {
            builder = builder.fill_color(bg);
        }

        if let Some(border) = self.border_color
            && self.border_width > 0
        {
            builder = builder.stroke_color(border).stroke_width(self.border_width);
        }

        builder.build()
    }
}

/// Predefined button looks
///
/// Each variant adapts to the color palette it is given.
///
/// # Examples
///
/// ```ignore
/// let palette = ColorPalette::default();
///
/// // Main action on the business card
/// let primary_style = ButtonVariant::Primary.to_style(&palette);
///
/// // Back button on the sensor page
/// let outline_style = ButtonVariant::Outline.to_style(&palette);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonVariant {
    /// Filled with the primary accent
    Primary,
    /// Surface fill with a border
    Outline,
}

impl ButtonVariant {
    /// Converts the variant to a concrete style based on a color palette
    ///
    /// # Arguments
    /// * `palette` - The color palette to derive colors from
    ///
    /// # Returns
    ///
    /// A `Style` configured according to the variant.
    pub fn to_style(&self, palette: &ColorPalette) -> Style {
        match self {
            ButtonVariant::Primary => Style::new()
                .with_background(palette.primary)
                .with_foreground(WHITE),

            ButtonVariant::Outline => Style::new()
                .with_background(palette.surface)
                .with_foreground(palette.text_primary)
                .with_border(palette.border, 2),
        }
    }
}
