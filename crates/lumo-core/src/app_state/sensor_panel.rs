//! State behind the business card's sensor screen

use log::{debug, info};

use super::{DisplayText, LIGHT_PLACEHOLDER, Observed, display_text, reading_text};
use crate::sensors::{SensorEvent, SensorKind, SensorService};

/// Shown until the first proximity reading arrives.
pub const PROXIMITY_PLACEHOLDER: &str = "Fetching Proximity...";
pub const MAGNETOMETER_AVAILABLE: &str = "Magnetometer: Available";
pub const MAGNETOMETER_MISSING: &str = "Magnetometer: Not Available";

/// Copy of the sensor panel handed to pages for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorPanelSnapshot {
    pub light_level: DisplayText,
    pub proximity: DisplayText,
    pub magnetometer: DisplayText,
}

impl Default for SensorPanelSnapshot {
    fn default() -> Self {
        Self {
            light_level: display_text(LIGHT_PLACEHOLDER),
            proximity: display_text(PROXIMITY_PLACEHOLDER),
            magnetometer: display_text(MAGNETOMETER_MISSING),
        }
    }
}

/// Three independent lines fed by the light and proximity sensors.
///
/// The magnetometer line is decided once, at construction, from the sensor
/// service's presence check and is never touched again.
pub struct SensorPanelState {
    light_level: Observed<DisplayText>,
    proximity: Observed<DisplayText>,
    magnetometer: DisplayText,
    revision: u32,
}

impl SensorPanelState {
    pub fn new<S: SensorService + ?Sized>(service: &S) -> Self {
        let has_magnetometer = service.has_sensor(SensorKind::MagneticField);
        info!("Magnetometer present: {}", has_magnetometer);

        let magnetometer = if has_magnetometer {
            MAGNETOMETER_AVAILABLE
        } else {
            MAGNETOMETER_MISSING
        };

        Self {
            light_level: Observed::new(display_text(LIGHT_PLACEHOLDER)),
            proximity: Observed::new(display_text(PROXIMITY_PLACEHOLDER)),
            magnetometer: display_text(magnetometer),
            revision: 0,
        }
    }

    /// Apply one reading to the field matching its kind.
    ///
    /// Returns `true` if that field changed.
    pub fn apply(&mut self, event: &SensorEvent) -> bool {
        let changed = match *event {
            SensorEvent::Light(lux) => self
                .light_level
                .set(reading_text("Light Level: ", lux, " lx")),
            SensorEvent::Proximity(cm) => {
                self.proximity.set(reading_text("Proximity: ", cm, " cm"))
            }
            SensorEvent::Magnetic(_) => {
                debug!("Magnetometer readings are not displayed");
                false
            }
        };

        if changed {
            self.revision = self.revision.wrapping_add(1);
        }
        changed
    }

    pub fn light_level(&self) -> &str {
        self.light_level.get().as_str()
    }

    pub fn proximity(&self) -> &str {
        self.proximity.get().as_str()
    }

    pub fn magnetometer(&self) -> &str {
        self.magnetometer.as_str()
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn is_dirty(&self) -> bool {
        self.light_level.is_dirty() || self.proximity.is_dirty()
    }

    pub fn mark_clean(&mut self) {
        self.light_level.mark_clean();
        self.proximity.mark_clean();
    }

    pub fn snapshot(&self) -> SensorPanelSnapshot {
        SensorPanelSnapshot {
            light_level: self.light_level.get().clone(),
            proximity: self.proximity.get().clone(),
            magnetometer: self.magnetometer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{ChannelSensorService, CountingService, SensorEventChannel, SensorSet};

    fn panel(present: SensorSet) -> SensorPanelState {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, present);
        SensorPanelState::new(&service)
    }

    #[test]
    fn magnetometer_presence_is_reported() {
        assert_eq!(panel(SensorSet::ALL).magnetometer(), MAGNETOMETER_AVAILABLE);
        let without = SensorSet::EMPTY.with(SensorKind::Light);
        assert_eq!(panel(without).magnetometer(), MAGNETOMETER_MISSING);
    }

    #[test]
    fn fields_update_independently() {
        let mut state = panel(SensorSet::ALL);

        assert!(state.apply(&SensorEvent::Light(250.0)));
        assert_eq!(state.light_level(), "Light Level: 250.0 lx");
        assert_eq!(state.proximity(), PROXIMITY_PLACEHOLDER);

        assert!(state.apply(&SensorEvent::Proximity(5.0)));
        assert_eq!(state.proximity(), "Proximity: 5.0 cm");
        assert_eq!(state.light_level(), "Light Level: 250.0 lx");

        assert!(state.apply(&SensorEvent::Light(3.5)));
        assert_eq!(state.proximity(), "Proximity: 5.0 cm");
        assert_eq!(state.revision(), 3);
    }

    #[test]
    fn magnetometer_presence_is_checked_once() {
        let service = CountingService::new(SensorSet::ALL);
        let mut state = SensorPanelState::new(&service);
        assert_eq!(service.presence_checks(SensorKind::MagneticField), 1);

        for i in 0..20 {
            state.apply(&SensorEvent::Light(i as f32));
            state.apply(&SensorEvent::Proximity((i % 2) as f32 * 5.0));
            state.apply(&SensorEvent::Magnetic(40.0 + i as f32));
        }

        assert_eq!(service.presence_checks(SensorKind::MagneticField), 1);
        assert_eq!(state.magnetometer(), MAGNETOMETER_AVAILABLE);
    }

    #[test]
    fn magnetometer_line_never_changes() {
        let mut state = panel(SensorSet::ALL);
        let before = state.snapshot().magnetometer;

        assert!(!state.apply(&SensorEvent::Magnetic(48.0)));
        state.apply(&SensorEvent::Light(1.0));
        state.apply(&SensorEvent::Proximity(0.0));

        assert_eq!(state.snapshot().magnetometer, before);
    }
}
