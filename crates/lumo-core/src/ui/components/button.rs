// src/ui/components/button.rs
//! Button component with various styles and states

use crate::ui::core::{Action, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};
use crate::ui::styling::{ButtonVariant, ColorPalette, Style};
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment as TextAlignment, Baseline, Text, TextStyleBuilder};

/// Button state
#[derive(Debug, Clone, Copy, PartialEq)]
enum ButtonState {
    Normal,
    Pressed,
}

/// Button component with label and action
///
/// An interactive button that responds to touch events and triggers an
/// [`Action`]. Comes in two visual variants (Primary, Outline) and two states
/// (Normal, Pressed).
///
/// # Visual Features
/// - Rounded corners (8 pixel radius)
/// - Colors derived from the ColorPalette
/// - Visual feedback on press (darkened background)
///
/// # Touch Behavior
/// - Triggers its action immediately on press
/// - Updates state during drag (pressed if over button, normal if dragged away)
/// - Returns to normal on release, or on [`reset`](Self::reset) when the
///   owning page is left mid-press
///
/// # Examples
/// ```ignore
/// let button = Button::new(
///     Rectangle::new(Point::new(60, 180), Size::new(200, 40)),
///     "View Sensor Data",
///     Action::NavigateToPage(PageId::Sensors),
/// )
/// .with_variant(ButtonVariant::Primary)
/// .with_palette(ColorPalette::default());
/// ```
pub struct Button {
    bounds: Rectangle,
    label: heapless::String<32>,
    action: Action,
    state: ButtonState,
    variant: ButtonVariant,
    palette: ColorPalette,
    border_radius: u32,
    dirty: bool,
}

impl Button {
    /// Create a new button with the specified bounds, label, and action.
    ///
    /// # Parameters
    /// - `bounds`: Position and size of the button
    /// - `label`: Text displayed on the button (max 32 characters, longer
    ///   labels are cut off)
    /// - `action`: Action returned when the button is pressed
    ///
    /// By default, buttons use the Primary variant with the default ColorPalette.
    pub fn new(bounds: Rectangle, label: &str, action: Action) -> Self {
        let mut label_string = heapless::String::new();
        label_string.push_str(label).ok();

        Self {
            bounds,
            label: label_string,
            action,
            state: ButtonState::Normal,
            variant: ButtonVariant::Primary,
            palette: ColorPalette::default(),
            border_radius: 8,
            dirty: true,
        }
    }

    /// Set the button's visual variant.
    ///
    /// Variants control the button's color scheme (Primary, Outline).
    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self.dirty = true;
        self
    }

    /// Set the button's color palette.
    ///
    /// The palette defines the base colors used for rendering.
    pub fn with_palette(mut self, palette: ColorPalette) -> Self {
        self.palette = palette;
        self.dirty = true;
        self
    }

    /// Check if a touch is currently held on the button.
    pub fn is_pressed(&self) -> bool {
        self.state == ButtonState::Pressed
    }

    /// Drop a press whose release will never arrive here.
    ///
    /// Pages call this from `on_deactivate`, since the release that ends a
    /// navigating press is delivered to the next page.
    pub fn reset(&mut self) {
        self.set_state(ButtonState::Normal);
    }

    fn get_style(&self) -> Style {
        let base_style = self.variant.to_style(&self.palette);

        match self.state {
            ButtonState::Normal => base_style,
            ButtonState::Pressed => {
                // Darken the background for pressed state
                let bg = base_style.background_color.unwrap_or(self.palette.primary);
                let darkened = Rgb565::new(
                    bg.r().saturating_sub(4),
                    bg.g().saturating_sub(8),
                    bg.b().saturating_sub(4),
                );
                base_style.with_background(darkened)
            }
        }
    }

    fn set_state(&mut self, state: ButtonState) {
        if self.state != state {
            self.state = state;
            self.dirty = true;
        }
    }
}

impl Drawable for Button {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let style = self.get_style();

        let corner_radius = Size::new(self.border_radius, self.border_radius);
        RoundedRectangle::with_equal_corners(self.bounds, corner_radius)
            .into_styled(style.to_primitive_style())
            .draw(display)?;

        let text_color = style.foreground_color.unwrap_or(Rgb565::WHITE);
        let character_style = MonoTextStyle::new(&FONT_6X10, text_color);
        let text_style = TextStyleBuilder::new()
            .alignment(TextAlignment::Center)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(&self.label, self.bounds.center(), character_style, text_style)
            .draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl Touchable for Button {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match event {
            TouchEvent::Press(point) if self.contains_point(point) => {
                self.set_state(ButtonState::Pressed);

                // Trigger action immediately on press
                TouchResult::Action(self.action)
            }
            TouchEvent::Drag(point) => {
                let new_state = if self.contains_point(point) {
                    ButtonState::Pressed
                } else {
                    ButtonState::Normal
                };
                self.set_state(new_state);
                TouchResult::Handled
            }
            TouchEvent::Release(_) if self.is_pressed() => {
                self.set_state(ButtonState::Normal);
                TouchResult::Handled
            }
            _ => TouchResult::NotHandled,
        }
    }
}
