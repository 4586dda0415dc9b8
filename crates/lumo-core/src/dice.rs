//! Light level to die face mapping.

use core::fmt;

/// Number of faces on the die.
pub const DICE_FACES: u8 = 6;

/// A die face, always in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiceFace(u8);

impl DiceFace {
    pub const ONE: DiceFace = DiceFace(1);

    /// Construct a face from its pip count, rejecting anything outside `1..=6`.
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= DICE_FACES {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Map an ambient light reading to a face: `(floor(lux) mod 6) + 1`.
    ///
    /// Returns `None` for negative, NaN or infinite readings. These are not
    /// clamped; the caller decides what an unusable reading means.
    pub fn from_lux(lux: f32) -> Option<Self> {
        if !lux.is_finite() || lux < 0.0 {
            return None;
        }

        // `%` is an exact remainder for floats, so this is floor() without libm.
        let floored = lux - lux % 1.0;
        let face = (floored % DICE_FACES as f32) as u8 + 1;
        Self::new(face)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for DiceFace {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for DiceFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
