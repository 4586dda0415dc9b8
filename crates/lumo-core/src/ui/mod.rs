// src/ui/mod.rs
//! lumo UI system for embedded-graphics displays
//!
//! - Core traits for drawable and touchable elements
//! - Styled components (buttons, text lines)
//! - Events carrying state snapshots to pages

pub mod components;
pub mod core;
pub mod styling;

// Re-export commonly used items
pub use components::{Button, TextLine, TextSize};
pub use self::core::{
    Action, DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, Drawable, PageEvent, PageId, TouchEvent,
    TouchPoint, TouchResult, Touchable, screen_bounds,
};
pub use styling::{ButtonVariant, ColorPalette, Style};
