//! Sensor detail page
//!
//! Light level, proximity and magnetometer availability, one per line, with
//! a button back to the business card.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::app_state::SensorPanelSnapshot;
use crate::pages::constants::{
    BUTTON_HEIGHT_PX, PAGE_HEADER_HEIGHT_PX, TEXT_ROW_HEIGHT_PX, TITLE_ROW_HEIGHT_PX,
};
use crate::pages::page::Page;
use crate::ui::styling::ButtonVariant;
use crate::ui::{
    Action, Button, ColorPalette, Drawable, PageEvent, PageId, TextLine, TextSize, TouchEvent,
    TouchResult, Touchable,
};

/// Vertical distance between two reading rows in pixels
const ROW_PITCH_PX: i32 = 30;

/// Width of the back button in pixels
const BACK_BUTTON_WIDTH_PX: u32 = 100;

pub struct SensorsPage {
    bounds: Rectangle,
    palette: ColorPalette,
    title: TextLine,
    light_level: TextLine,
    proximity: TextLine,
    magnetometer: TextLine,
    back: Button,
    dirty: bool,
}

impl SensorsPage {
    pub fn new(bounds: Rectangle) -> Self {
        let palette = ColorPalette::default();
        let width = bounds.size.width;
        let x = bounds.top_left.x;
        let top = bounds.top_left.y;

        let title = TextLine::new(
            Rectangle::new(Point::new(x, top + 10), Size::new(width, TITLE_ROW_HEIGHT_PX)),
            "Sensor Data",
            TextSize::Large,
        );

        let first_row = top + PAGE_HEADER_HEIGHT_PX as i32 + 20;
        let row = |index: i32| {
            Rectangle::new(
                Point::new(x, first_row + index * ROW_PITCH_PX),
                Size::new(width, TEXT_ROW_HEIGHT_PX),
            )
        };

        let snapshot = SensorPanelSnapshot::default();
        let light_level = TextLine::new(row(0), &snapshot.light_level, TextSize::Medium);
        let proximity = TextLine::new(row(1), &snapshot.proximity, TextSize::Medium);
        let magnetometer = TextLine::new(row(2), &snapshot.magnetometer, TextSize::Medium);

        let back_bounds = Rectangle::new(
            Point::new(
                bounds.center().x - BACK_BUTTON_WIDTH_PX as i32 / 2,
                top + bounds.size.height as i32 - BUTTON_HEIGHT_PX as i32 - 15,
            ),
            Size::new(BACK_BUTTON_WIDTH_PX, BUTTON_HEIGHT_PX),
        );
        let back = Button::new(back_bounds, "Back", Action::GoBack)
            .with_palette(palette)
            .with_variant(ButtonVariant::Outline);

        Self {
            bounds,
            palette,
            title,
            light_level,
            proximity,
            magnetometer,
            back,
            dirty: true,
        }
    }

    pub fn back_button(&self) -> &Button {
        &self.back
    }

    /// Lines currently shown: light level, proximity, magnetometer.
    pub fn lines(&self) -> [&str; 3] {
        [
            self.light_level.text(),
            self.proximity.text(),
            self.magnetometer.text(),
        ]
    }

    fn show(&mut self, snapshot: &SensorPanelSnapshot) {
        self.light_level.set_text(&snapshot.light_level);
        self.proximity.set_text(&snapshot.proximity);
        self.magnetometer.set_text(&snapshot.magnetometer);
    }
}

impl Page for SensorsPage {
    fn id(&self) -> PageId {
        PageId::Sensors
    }

    fn title(&self) -> &str {
        "Sensors"
    }

    fn on_deactivate(&mut self) {
        self.back.reset();
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        match self.back.handle_touch(event) {
            TouchResult::Action(action) => Some(action),
            TouchResult::Handled | TouchResult::NotHandled => None,
        }
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        match event {
            PageEvent::SensorPanel(snapshot) => {
                self.show(snapshot);
                self.is_dirty()
            }
            PageEvent::DiceUpdate(_) => false,
        }
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(self.palette.background))
            .draw(display)?;

        self.title.draw(display)?;
        self.light_level.draw(display)?;
        self.proximity.draw(display)?;
        self.magnetometer.draw(display)?;
        self.back.draw(display)?;
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
            || self.title.is_dirty()
            || self.light_level.is_dirty()
            || self.proximity.is_dirty()
            || self.magnetometer.is_dirty()
            || self.back.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.title.mark_clean();
        self.light_level.mark_clean();
        self.proximity.mark_clean();
        self.magnetometer.mark_clean();
        self.back.mark_clean();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::display_text;
    use crate::ui::{TouchPoint, screen_bounds};

    #[test]
    fn back_button_goes_back() {
        let mut page = SensorsPage::new(screen_bounds());
        let center = page.back_button().bounds().center();
        let touch = TouchEvent::Press(TouchPoint::new(center.x as u16, center.y as u16));
        assert_eq!(page.handle_touch(touch), Some(Action::GoBack));
    }

    #[test]
    fn panel_update_changes_only_new_lines() {
        let mut page = SensorsPage::new(screen_bounds());
        page.mark_clean();

        let mut snapshot = SensorPanelSnapshot::default();
        snapshot.proximity = display_text("Proximity: 3.0 cm");
        assert!(page.on_event(&PageEvent::SensorPanel(snapshot.clone())));

        let [light, proximity, _] = page.lines();
        assert_eq!(light, "Fetching Light Level...");
        assert_eq!(proximity, "Proximity: 3.0 cm");

        page.mark_clean();
        assert!(!page.on_event(&PageEvent::SensorPanel(snapshot)));
    }
}
