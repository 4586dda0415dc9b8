//! Dice roller page
//!
//! Shows the latest light level, a die whose face follows it, and the face
//! value as text. There is nothing to press: the light sensor rolls the die.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle,
};
use embedded_graphics::Drawable as EgDrawable;

use crate::app_state::{DiceSnapshot, DisplayText};
use crate::dice::DiceFace;
use crate::pages::constants::{PAGE_HEADER_HEIGHT_PX, TEXT_ROW_HEIGHT_PX, TITLE_ROW_HEIGHT_PX};
use crate::pages::page::Page;
use crate::ui::styling::{COLOR_STROKE, COLOR_SURFACE, COLOR_TEXT, ColorPalette};
use crate::ui::{Action, Drawable, PageEvent, PageId, TextLine, TextSize, TouchEvent};

/// Edge length of the drawn die in pixels
const DIE_SIZE_PX: u32 = 90;

/// Corner radius of the die in pixels
const DIE_CORNER_RADIUS_PX: u32 = 12;

/// Diameter of a single pip in pixels
const PIP_DIAMETER_PX: u32 = 14;

/// Distance from the die edge to the centre of an outer pip in pixels
const PIP_INSET_PX: i32 = 22;

/// Pip positions on a 3x3 grid, as (column, row), for each face.
const PIPS: [&[(u8, u8)]; 6] = [
    &[(1, 1)],
    &[(0, 0), (2, 2)],
    &[(0, 0), (1, 1), (2, 2)],
    &[(0, 0), (2, 0), (0, 2), (2, 2)],
    &[(0, 0), (2, 0), (1, 1), (0, 2), (2, 2)],
    &[(0, 0), (2, 0), (0, 1), (2, 1), (0, 2), (2, 2)],
];

/// Grid cells holding a pip for `face`.
pub fn pip_cells(face: DiceFace) -> &'static [(u8, u8)] {
    PIPS[(face.value() - 1) as usize]
}

fn dice_value_text(face: DiceFace) -> DisplayText {
    let mut text = DisplayText::new();
    write!(text, "Dice Value: {}", face).ok();
    text
}

pub struct DicePage {
    bounds: Rectangle,
    palette: ColorPalette,
    title: TextLine,
    light_level: TextLine,
    die_bounds: Rectangle,
    face: DiceFace,
    value_line: TextLine,
    dirty: bool,
}

impl DicePage {
    pub fn new(bounds: Rectangle) -> Self {
        let width = bounds.size.width;
        let top = bounds.top_left.y;
        let x = bounds.top_left.x;

        let title = TextLine::new(
            Rectangle::new(
                Point::new(x, top + 10),
                Size::new(width, TITLE_ROW_HEIGHT_PX),
            ),
            "Interactive Dice Roller",
            TextSize::Large,
        );

        let light_level = TextLine::new(
            Rectangle::new(
                Point::new(x, top + PAGE_HEADER_HEIGHT_PX as i32 + 5),
                Size::new(width, TEXT_ROW_HEIGHT_PX),
            ),
            "",
            TextSize::Medium,
        );

        let die_top = top + PAGE_HEADER_HEIGHT_PX as i32 + TEXT_ROW_HEIGHT_PX as i32 + 15;
        let die_bounds = Rectangle::new(
            Point::new(
                bounds.center().x - DIE_SIZE_PX as i32 / 2,
                die_top,
            ),
            Size::new(DIE_SIZE_PX, DIE_SIZE_PX),
        );

        let value_line = TextLine::new(
            Rectangle::new(
                Point::new(x, die_top + DIE_SIZE_PX as i32 + 15),
                Size::new(width, TITLE_ROW_HEIGHT_PX),
            ),
            "",
            TextSize::Large,
        );

        let mut page = Self {
            bounds,
            palette: ColorPalette::default(),
            title,
            light_level,
            die_bounds,
            face: DiceFace::ONE,
            value_line,
            dirty: true,
        };
        page.show(&DiceSnapshot::default());
        page
    }

    /// Face currently shown.
    pub fn face(&self) -> DiceFace {
        self.face
    }

    pub fn light_level(&self) -> &str {
        self.light_level.text()
    }

    pub fn value_text(&self) -> &str {
        self.value_line.text()
    }

    fn show(&mut self, snapshot: &DiceSnapshot) {
        self.light_level.set_text(&snapshot.light_level);
        if self.face != snapshot.dice {
            self.face = snapshot.dice;
            self.dirty = true;
        }
        self.value_line.set_text(&dice_value_text(snapshot.dice));
    }

    fn draw_die<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let die_style = PrimitiveStyleBuilder::new()
            .fill_color(COLOR_SURFACE)
            .stroke_color(COLOR_STROKE)
            .stroke_width(3)
            .build();

        RoundedRectangle::with_equal_corners(
            self.die_bounds,
            Size::new(DIE_CORNER_RADIUS_PX, DIE_CORNER_RADIUS_PX),
        )
        .into_styled(die_style)
        .draw(display)?;

        let origin = self.die_bounds.top_left;
        let step = DIE_SIZE_PX as i32 / 2 - PIP_INSET_PX;
        for &(col, row) in pip_cells(self.face) {
            let center = origin
                + Point::new(
                    PIP_INSET_PX + col as i32 * step,
                    PIP_INSET_PX + row as i32 * step,
                );
            Circle::with_center(center, PIP_DIAMETER_PX)
                .into_styled(PrimitiveStyle::with_fill(COLOR_TEXT))
                .draw(display)?;
        }

        Ok(())
    }
}

impl Page for DicePage {
    fn id(&self) -> PageId {
        PageId::DiceRoller
    }

    fn title(&self) -> &str {
        "Dice Roller"
    }

    fn handle_touch(&mut self, _event: TouchEvent) -> Option<Action> {
        None
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        match event {
            PageEvent::DiceUpdate(snapshot) => {
                self.show(snapshot);
                self.is_dirty()
            }
            PageEvent::SensorPanel(_) => false,
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
        self.draw_die(display)?;
        self.value_line.draw(display)?;
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
            || self.title.is_dirty()
            || self.light_level.is_dirty()
            || self.value_line.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.title.mark_clean();
        self.light_level.mark_clean();
        self.value_line.mark_clean();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
