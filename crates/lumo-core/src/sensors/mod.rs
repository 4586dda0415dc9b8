//! Sensor event model and the host sensor service abstraction.
//!
//! Hardware readings arrive as [`SensorEvent`]s, a tagged union keyed by the
//! kind of sensor that produced them. Producers (a hardware thread, an
//! interrupt handler, the simulator) publish events into a
//! [`SensorEventChannel`]; the UI thread drains it once per frame.

mod service;

pub use service::ChannelSensorService;

use core::time::Duration;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use thiserror_no_std::Error;

/// Number of readings that can be queued before producers start dropping them.
pub const SENSOR_CHANNEL_CAPACITY: usize = 16;

/// Bounded queue carrying readings from producer threads to the UI thread.
pub type SensorEventChannel =
    Channel<CriticalSectionRawMutex, SensorEvent, SENSOR_CHANNEL_CAPACITY>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    #[error("{kind:?} sensor is not present")]
    NotPresent { kind: SensorKind },
}

/// Kind of hardware sensor a reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Ambient light, in lux
    Light,
    /// Proximity, in centimetres
    Proximity,
    /// Magnetic field strength, in microtesla
    MagneticField,
}

impl SensorKind {
    pub const ALL: [SensorKind; 3] = [
        SensorKind::Light,
        SensorKind::Proximity,
        SensorKind::MagneticField,
    ];

    /// Single-bit mask identifying this kind in a [`SensorSet`].
    pub const fn mask(self) -> u8 {
        match self {
            SensorKind::Light => 1 << 0,
            SensorKind::Proximity => 1 << 1,
            SensorKind::MagneticField => 1 << 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SensorKind::Light => "light",
            SensorKind::Proximity => "proximity",
            SensorKind::MagneticField => "magnetic",
        }
    }
}

/// One hardware reading, tagged by the sensor that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorEvent {
    Light(f32),
    Proximity(f32),
    Magnetic(f32),
}

impl SensorEvent {
    pub const fn kind(&self) -> SensorKind {
        match self {
            SensorEvent::Light(_) => SensorKind::Light,
            SensorEvent::Proximity(_) => SensorKind::Proximity,
            SensorEvent::Magnetic(_) => SensorKind::MagneticField,
        }
    }

    pub const fn value(&self) -> f32 {
        match *self {
            SensorEvent::Light(v) | SensorEvent::Proximity(v) | SensorEvent::Magnetic(v) => v,
        }
    }
}

/// Untagged form of a reading, as most host sensor APIs hand them out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub kind: SensorKind,
    pub value: f32,
}

impl From<SensorReading> for SensorEvent {
    fn from(reading: SensorReading) -> Self {
        match reading.kind {
            SensorKind::Light => SensorEvent::Light(reading.value),
            SensorKind::Proximity => SensorEvent::Proximity(reading.value),
            SensorKind::MagneticField => SensorEvent::Magnetic(reading.value),
        }
    }
}

impl From<SensorEvent> for SensorReading {
    fn from(event: SensorEvent) -> Self {
        Self {
            kind: event.kind(),
            value: event.value(),
        }
    }
}

/// Delay class requested when subscribing to a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingRate {
    #[default]
    Normal,
    Ui,
    Game,
    Fastest,
}

impl SamplingRate {
    /// Nominal delay between two readings of the same sensor.
    pub const fn period(self) -> Duration {
        match self {
            SamplingRate::Normal => Duration::from_millis(200),
            SamplingRate::Ui => Duration::from_millis(66),
            SamplingRate::Game => Duration::from_millis(20),
            SamplingRate::Fastest => Duration::ZERO,
        }
    }
}

/// Small bit set of sensor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorSet(u8);

impl SensorSet {
    pub const EMPTY: SensorSet = SensorSet(0);
    pub const ALL: SensorSet = SensorSet(
        SensorKind::Light.mask() | SensorKind::Proximity.mask() | SensorKind::MagneticField.mask(),
    );

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn with(self, kind: SensorKind) -> Self {
        Self(self.0 | kind.mask())
    }

    pub const fn contains(self, kind: SensorKind) -> bool {
        self.0 & kind.mask() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = SensorKind> {
        SensorKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl FromIterator<SensorKind> for SensorSet {
    fn from_iter<T: IntoIterator<Item = SensorKind>>(iter: T) -> Self {
        iter.into_iter().fold(SensorSet::EMPTY, SensorSet::with)
    }
}

/// Host-provided sensor subscription service.
///
/// Readings for subscribed kinds are delivered asynchronously; the service
/// decides where they go (see [`ChannelSensorService`]). Implementations use
/// interior mutability so a handle can be shared with the producer side.
pub trait SensorService {
    /// Whether the device has a sensor of this kind at all.
    fn has_sensor(&self, kind: SensorKind) -> bool;

    /// Start delivering readings of `kind` at roughly `rate`.
    fn subscribe(&self, kind: SensorKind, rate: SamplingRate) -> Result<(), SensorError>;

    /// Stop delivering readings of every kind.
    ///
    /// Must be safe to call when nothing is subscribed.
    fn unsubscribe_all(&self);
}

impl<T: SensorService + ?Sized> SensorService for &T {
    fn has_sensor(&self, kind: SensorKind) -> bool {
        (**self).has_sensor(kind)
    }

    fn subscribe(&self, kind: SensorKind, rate: SamplingRate) -> Result<(), SensorError> {
        (**self).subscribe(kind, rate)
    }

    fn unsubscribe_all(&self) {
        (**self).unsubscribe_all()
    }
}

/// Service that records every call made to it.
#[cfg(test)]
pub(crate) struct CountingService {
    pub present: SensorSet,
    pub presence_checks: [core::cell::Cell<u32>; 3],
    pub subscribes: core::cell::Cell<u32>,
    pub unsubscribes: core::cell::Cell<u32>,
}

#[cfg(test)]
impl CountingService {
    pub fn new(present: SensorSet) -> Self {
        Self {
            present,
            presence_checks: Default::default(),
            subscribes: Default::default(),
            unsubscribes: Default::default(),
        }
    }

    pub fn presence_checks(&self, kind: SensorKind) -> u32 {
        self.presence_checks[kind as usize].get()
    }
}

#[cfg(test)]
impl SensorService for CountingService {
    fn has_sensor(&self, kind: SensorKind) -> bool {
        let count = &self.presence_checks[kind as usize];
        count.set(count.get() + 1);
        self.present.contains(kind)
    }

    fn subscribe(&self, kind: SensorKind, _rate: SamplingRate) -> Result<(), SensorError> {
        if !self.present.contains(kind) {
            return Err(SensorError::NotPresent { kind });
        }
        self.subscribes.set(self.subscribes.get() + 1);
        Ok(())
    }

    fn unsubscribe_all(&self) {
        self.unsubscribes.set(self.unsubscribes.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_and_value() {
        let event = SensorEvent::Proximity(4.5);
        assert_eq!(event.kind(), SensorKind::Proximity);
        assert_eq!(event.value(), 4.5);
        assert_eq!(SensorEvent::Magnetic(1.0).kind(), SensorKind::MagneticField);
    }

    #[test]
    fn reading_converts_to_tagged_event() {
        let reading = SensorReading {
            kind: SensorKind::Light,
            value: 120.0,
        };
        assert_eq!(SensorEvent::from(reading), SensorEvent::Light(120.0));
        assert_eq!(SensorReading::from(SensorEvent::Light(120.0)), reading);
    }

    #[test]
    fn sensor_set_membership() {
        let set: SensorSet = [SensorKind::Light, SensorKind::MagneticField]
            .into_iter()
            .collect();
        assert!(set.contains(SensorKind::Light));
        assert!(!set.contains(SensorKind::Proximity));
        assert!(set.contains(SensorKind::MagneticField));
        assert_eq!(set.iter().count(), 2);
        assert!(SensorSet::EMPTY.is_empty());
        assert_eq!(SensorSet::from_bits(0xFF), SensorSet::ALL);
    }

    #[test]
    fn normal_rate_is_slowest() {
        assert!(SamplingRate::Normal.period() > SamplingRate::Ui.period());
        assert_eq!(SamplingRate::Fastest.period(), Duration::ZERO);
    }
}
