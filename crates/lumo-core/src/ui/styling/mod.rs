//! Styling for UI elements
//!
//! - [`colors`] - Color constants and palette management
//! - [`style`] - Style configuration and button variants

pub mod colors;
pub mod style;

pub use colors::{
    COLOR_ACCENT, COLOR_BACKGROUND, COLOR_STROKE, COLOR_SURFACE, COLOR_TEXT, COLOR_TEXT_MUTED,
    ColorPalette, WHITE,
};
pub use style::{ButtonVariant, Style};
