//! Application controllers
//!
//! An app ties together a display state container, the screen lifecycle
//! that keeps its sensors subscribed, and the page manager that renders it.
//! The host drives it: `resume`/`pause` on visibility changes, `pump` once
//! per frame, `draw` when `is_dirty`.

mod card;
mod dice;

pub use card::CardApp;
pub use dice::DiceApp;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::debug;

use crate::sensors::{SensorEvent, SensorEventChannel};
use crate::ui::{PageId, TouchEvent};

/// Operations a host needs to run either app variant.
pub trait SensorApp {
    /// The screen became visible: subscribe and schedule a full redraw.
    fn resume(&mut self);

    /// The screen was hidden: release every sensor subscription.
    fn pause(&mut self);

    /// Drain pending readings into the display state.
    ///
    /// Returns `true` if the current page needs a redraw.
    fn pump(&mut self, channel: &SensorEventChannel) -> bool;

    /// Route a touch to the current page and apply any resulting action.
    ///
    /// Returns `true` if the current page changed.
    fn handle_touch(&mut self, event: TouchEvent) -> bool;

    /// Open the sensor page. Returns `false` if there is none to open.
    fn view_sensors(&mut self) -> bool;

    /// Return to the previous page. Returns `false` at the root page.
    fn go_back(&mut self) -> bool;

    fn current_page(&self) -> PageId;

    fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error>;

    fn is_dirty(&self) -> bool;
}

/// Empty `channel`, feeding each reading to `apply` while `active`.
///
/// Readings that were queued while the screen was paused are discarded.
/// Returns `true` if any call to `apply` reported a change.
pub(crate) fn drain_events(
    channel: &SensorEventChannel,
    active: bool,
    mut apply: impl FnMut(&SensorEvent) -> bool,
) -> bool {
    let mut changed = false;
    let mut discarded = 0u32;

    while let Ok(event) = channel.try_receive() {
        if active {
            changed |= apply(&event);
        } else {
            discarded += 1;
        }
    }

    if discarded > 0 {
        debug!("Discarded {} readings received while paused", discarded);
    }
    changed
}
