//! Business card page
//!
//! Static contact details plus a button leading to the sensor page.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle,
};

use crate::config::CardDetails;
use crate::pages::constants::{
    BUTTON_GAP_PX, BUTTON_HEIGHT_PX, PAGE_MARGIN_PX, TEXT_ROW_HEIGHT_PX, TITLE_ROW_HEIGHT_PX,
};
use crate::pages::page::Page;
use crate::ui::styling::ButtonVariant;
use crate::ui::{
    Action, Button, ColorPalette, Drawable, PageEvent, PageId, TextLine, TextSize, TouchEvent,
    TouchResult, Touchable,
};

/// Height of the card panel in pixels
const CARD_HEIGHT_PX: u32 = 150;

pub struct BusinessCardPage {
    bounds: Rectangle,
    palette: ColorPalette,
    card_bounds: Rectangle,
    lines: [TextLine; 4],
    view_sensors: Button,
    dirty: bool,
}

impl BusinessCardPage {
    pub fn new(bounds: Rectangle, details: &CardDetails) -> Self {
        let palette = ColorPalette::default();
        let card_width = bounds.size.width - 2 * PAGE_MARGIN_PX;
        let card_bounds = Rectangle::new(
            bounds.top_left + Point::new(PAGE_MARGIN_PX as i32, 15),
            Size::new(card_width, CARD_HEIGHT_PX),
        );

        let row = |y: i32, height: u32| {
            Rectangle::new(
                Point::new(card_bounds.top_left.x, card_bounds.top_left.y + y),
                Size::new(card_width, height),
            )
        };

        let lines = [
            TextLine::new(row(15, TITLE_ROW_HEIGHT_PX), &details.name, TextSize::Large),
            TextLine::new(row(45, TEXT_ROW_HEIGHT_PX), &details.title, TextSize::Medium)
                .with_color(palette.text_secondary),
            TextLine::new(row(85, TEXT_ROW_HEIGHT_PX), &details.phone, TextSize::Medium),
            TextLine::new(row(110, TEXT_ROW_HEIGHT_PX), &details.email, TextSize::Medium),
        ];

        let button_width = card_width - 2 * PAGE_MARGIN_PX;
        let button_bounds = Rectangle::new(
            Point::new(
                bounds.center().x - button_width as i32 / 2,
                card_bounds.top_left.y + CARD_HEIGHT_PX as i32 + BUTTON_GAP_PX as i32,
            ),
            Size::new(button_width, BUTTON_HEIGHT_PX),
        );
        let view_sensors = Button::new(
            button_bounds,
            "View Sensor Data",
            Action::NavigateToPage(PageId::Sensors),
        )
        .with_palette(palette)
        .with_variant(ButtonVariant::Primary);

        Self {
            bounds,
            palette,
            card_bounds,
            lines,
            view_sensors,
            dirty: true,
        }
    }

    /// The "View Sensor Data" button, for hosts that map keys to taps.
    pub fn view_sensors_button(&self) -> &Button {
        &self.view_sensors
    }

    pub fn name(&self) -> &str {
        self.lines[0].text()
    }
}

impl Page for BusinessCardPage {
    fn id(&self) -> PageId {
        PageId::BusinessCard
    }

    fn title(&self) -> &str {
        "Business Card"
    }

    fn on_deactivate(&mut self) {
        self.view_sensors.reset();
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        match self.view_sensors.handle_touch(event) {
            TouchResult::Action(action) => Some(action),
            TouchResult::Handled | TouchResult::NotHandled => None,
        }
    }

    fn on_event(&mut self, _event: &PageEvent) -> bool {
        false
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(self.palette.background))
            .draw(display)?;

        let card_style = PrimitiveStyleBuilder::new()
            .fill_color(self.palette.surface)
            .stroke_color(self.palette.border)
            .stroke_width(1)
            .build();
        RoundedRectangle::with_equal_corners(self.card_bounds, Size::new(10, 10))
            .into_styled(card_style)
            .draw(display)?;

        for line in &self.lines {
            line.draw(display)?;
        }
        self.view_sensors.draw(display)?;
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.view_sensors.is_dirty() || self.lines.iter().any(|l| l.is_dirty())
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.view_sensors.mark_clean();
        for line in &mut self.lines {
            line.mark_clean();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{TouchPoint, screen_bounds};

    #[test]
    fn view_sensors_button_navigates() {
        let mut page = BusinessCardPage::new(screen_bounds(), &CardDetails::default());
        let center = page.view_sensors_button().bounds().center();
        let touch = TouchEvent::Press(TouchPoint::new(center.x as u16, center.y as u16));

        assert_eq!(
            page.handle_touch(touch),
            Some(Action::NavigateToPage(PageId::Sensors))
        );
    }

    #[test]
    fn leaving_the_page_releases_the_button() {
        let mut page = BusinessCardPage::new(screen_bounds(), &CardDetails::default());
        let center = page.view_sensors_button().bounds().center();
        page.handle_touch(TouchEvent::Press(TouchPoint::new(center.x as u16, center.y as u16)));
        assert!(page.view_sensors_button().is_pressed());

        page.on_deactivate();
        assert!(!page.view_sensors_button().is_pressed());
    }

    #[test]
    fn touch_on_card_does_nothing() {
        let mut page = BusinessCardPage::new(screen_bounds(), &CardDetails::default());
        let touch = TouchEvent::Press(TouchPoint::new(40, 40));
        assert_eq!(page.handle_touch(touch), None);
    }

    #[test]
    fn shows_configured_name() {
        let page = BusinessCardPage::new(screen_bounds(), &CardDetails::default());
        assert_eq!(page.name(), CardDetails::default().name.as_str());
    }
}
