//! State of the light-driven dice roller

use log::{debug, warn};

use super::{DisplayText, Observed, display_text, reading_text};
use crate::dice::DiceFace;
use crate::sensors::SensorEvent;

/// Shown until the first light reading arrives.
pub const LIGHT_PLACEHOLDER: &str = "Fetching Light Level...";

/// Copy of the dice roller state handed to pages for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct DiceSnapshot {
    pub light_level: DisplayText,
    pub dice: DiceFace,
}

impl Default for DiceSnapshot {
    fn default() -> Self {
        Self {
            light_level: display_text(LIGHT_PLACEHOLDER),
            dice: DiceFace::ONE,
        }
    }
}

/// Maps ambient light readings to a die face.
pub struct DiceRollerState {
    light_level: Observed<DisplayText>,
    dice: Observed<DiceFace>,
    revision: u32,
}

impl DiceRollerState {
    pub fn new() -> Self {
        Self {
            light_level: Observed::new(display_text(LIGHT_PLACEHOLDER)),
            dice: Observed::new(DiceFace::ONE),
            revision: 0,
        }
    }

    /// Apply one reading. Returns `true` if anything visible changed.
    pub fn apply(&mut self, event: &SensorEvent) -> bool {
        let changed = match *event {
            SensorEvent::Light(lux) => self.on_light(lux),
            SensorEvent::Proximity(_) | SensorEvent::Magnetic(_) => {
                debug!("Dice roller ignoring {:?}", event);
                false
            }
        };

        if changed {
            self.revision = self.revision.wrapping_add(1);
        }
        changed
    }

    fn on_light(&mut self, lux: f32) -> bool {
        let text_changed = self
            .light_level
            .set(reading_text("Light Level: ", lux, ""));

        let dice_changed = match DiceFace::from_lux(lux) {
            Some(face) => self.dice.set(face),
            None => {
                warn!("Light reading {} has no die face, keeping {}", lux, self.dice());
                false
            }
        };

        text_changed || dice_changed
    }

    pub fn light_level(&self) -> &str {
        self.light_level.get().as_str()
    }

    pub fn dice(&self) -> DiceFace {
        *self.dice.get()
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn is_dirty(&self) -> bool {
        self.light_level.is_dirty() || self.dice.is_dirty()
    }

    pub fn mark_clean(&mut self) {
        self.light_level.mark_clean();
        self.dice.mark_clean();
    }

    pub fn snapshot(&self) -> DiceSnapshot {
        DiceSnapshot {
            light_level: self.light_level.get().clone(),
            dice: self.dice(),
        }
    }
}

impl Default for DiceRollerState {
    fn default() -> Self {
        Self::new()
    }
}
