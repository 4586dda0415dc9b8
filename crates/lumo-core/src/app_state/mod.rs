//! Observable display state for both app variants and the sensor lifecycle
//! that feeds it.
//!
//! State containers own independently mutable [`Observed`] fields. Each
//! field tracks its own dirty flag and the container bumps a revision
//! counter on every real change, so a render loop can either poll
//! `is_dirty()` or compare revisions.

mod dice_roller;
mod lifecycle;
mod sensor_panel;

pub use dice_roller::*;
pub use lifecycle::*;
pub use sensor_panel::*;

use core::fmt::Write;

use log::warn;

/// Capacity of a single line of on-screen text.
pub const DISPLAY_TEXT_CAPACITY: usize = 48;

/// One line of on-screen text.
pub type DisplayText = heapless::String<DISPLAY_TEXT_CAPACITY>;

/// A value plus a dirty flag that is raised whenever the value changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Observed<T> {
    value: T,
    dirty: bool,
}

impl<T: PartialEq> Observed<T> {
    /// New fields start dirty so the first frame draws them.
    pub const fn new(value: T) -> Self {
        Self { value, dirty: true }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value. Returns `true` if it actually changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.dirty = true;
        true
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

/// Build a line of text from a static string.
///
/// Text longer than [`DISPLAY_TEXT_CAPACITY`] is cut at a character boundary.
pub fn display_text(text: &str) -> DisplayText {
    let mut out = DisplayText::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            warn!("Display text truncated: {}", text);
            break;
        }
    }
    out
}

/// Format `"{prefix}{value}{suffix}"`, printing the value with at least one
/// fractional digit (`8.0`, not `8`).
pub(crate) fn reading_text(prefix: &str, value: f32, suffix: &str) -> DisplayText {
    let mut out = DisplayText::new();
    if write!(out, "{prefix}{value:?}{suffix}").is_err() {
        warn!("Reading text truncated for value {}", value);
    }
    out
}
