// src/ui/components/text.rs
//! Single line of text

use crate::app_state::DisplayText;
use crate::ui::core::Drawable;
use crate::ui::styling::COLOR_TEXT;
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

/// Text size variants
///
/// - `Medium`: 6x10 font (default), body text
/// - `Large`: 10x20 font, titles and the dice value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TextSize {
    #[default]
    Medium,
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Medium => &FONT_6X10,
            TextSize::Large => &embedded_graphics::mono_font::ascii::FONT_10X20,
        }
    }
}

/// One line of text, centred in its bounds.
pub struct TextLine {
    bounds: Rectangle,
    text: DisplayText,
    size: TextSize,
    color: Rgb565,
    dirty: bool,
}

impl TextLine {
    pub fn new(bounds: Rectangle, text: &str, size: TextSize) -> Self {
        Self {
            bounds,
            text: crate::app_state::display_text(text),
            size,
            color: COLOR_TEXT,
            dirty: true,
        }
    }

    pub fn with_color(mut self, color: Rgb565) -> Self {
        self.color = color;
        self
    }

    /// Update the displayed text, marking the line dirty if it changed.
    pub fn set_text(&mut self, text: &str) {
        if self.text.as_str() != text {
            self.text = crate::app_state::display_text(text);
            self.dirty = true;
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Drawable for TextLine {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let character_style = MonoTextStyle::new(self.size.font(), self.color);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(&self.text, self.bounds.center(), character_style, text_style)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_text_only_dirties_on_change() {
        let mut line = TextLine::new(
            Rectangle::new(Point::zero(), Size::new(100, 20)),
            "Light Level: 1.0",
            TextSize::Medium,
        );
        line.mark_clean();

        line.set_text("Light Level: 1.0");
        assert!(!line.is_dirty());

        line.set_text("Light Level: 2.0");
        assert!(line.is_dirty());
        assert_eq!(line.text(), "Light Level: 2.0");
    }
}
