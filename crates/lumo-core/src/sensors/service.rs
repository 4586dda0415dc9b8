use core::sync::atomic::{AtomicU8, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use log::{debug, info, trace};

use super::{
    SamplingRate, SensorError, SensorEvent, SensorEventChannel, SensorKind, SensorService,
    SensorSet,
};

/// [`SensorService`] that forwards readings into a [`SensorEventChannel`].
///
/// The producer side (hardware thread, driver task, simulator) calls
/// [`publish`](Self::publish) for every reading it takes. Only readings for
/// sensors that are present *and* currently subscribed reach the channel.
/// Subscription state is an atomic bitmask that anyone can read. The
/// check-and-send in `publish` and the clear-and-drain in `unsubscribe_all`
/// share one short critical section, so no reading can slip into the queue
/// after an unsubscribe.
pub struct ChannelSensorService<'a> {
    channel: &'a SensorEventChannel,
    present: SensorSet,
    subscribed: AtomicU8,
    rate: AtomicU8,
    delivery: Mutex<CriticalSectionRawMutex, ()>,
}

impl<'a> ChannelSensorService<'a> {
    pub const fn new(channel: &'a SensorEventChannel, present: SensorSet) -> Self {
        Self {
            channel,
            present,
            subscribed: AtomicU8::new(0),
            rate: AtomicU8::new(0),
            delivery: Mutex::new(()),
        }
    }

    /// Kinds that currently receive readings.
    pub fn subscribed(&self) -> SensorSet {
        SensorSet::from_bits(self.subscribed.load(Ordering::Acquire))
    }

    pub fn is_subscribed(&self, kind: SensorKind) -> bool {
        self.subscribed().contains(kind)
    }

    /// Delay class of the most recent subscription.
    pub fn rate(&self) -> SamplingRate {
        match self.rate.load(Ordering::Relaxed) {
            1 => SamplingRate::Ui,
            2 => SamplingRate::Game,
            3 => SamplingRate::Fastest,
            _ => SamplingRate::Normal,
        }
    }

    pub fn present(&self) -> SensorSet {
        self.present
    }

    /// Deliver one reading.
    ///
    /// Returns `true` if the reading was queued. Readings for unsubscribed
    /// kinds, and readings that arrive while the queue is full, are dropped.
    pub fn publish(&self, event: SensorEvent) -> bool {
        self.delivery.lock(|_| {
            if !self.is_subscribed(event.kind()) {
                return false;
            }

            match self.channel.try_send(event) {
                Ok(()) => true,
                Err(_) => {
                    trace!("Sensor queue full, dropping {:?}", event);
                    false
                }
            }
        })
    }
}

impl SensorService for ChannelSensorService<'_> {
    fn has_sensor(&self, kind: SensorKind) -> bool {
        self.present.contains(kind)
    }

    fn subscribe(&self, kind: SensorKind, rate: SamplingRate) -> Result<(), SensorError> {
        if !self.has_sensor(kind) {
            return Err(SensorError::NotPresent { kind });
        }

        let rate_bits = match rate {
            SamplingRate::Normal => 0,
            SamplingRate::Ui => 1,
            SamplingRate::Game => 2,
            SamplingRate::Fastest => 3,
        };
        self.rate.store(rate_bits, Ordering::Relaxed);
        self.subscribed.fetch_or(kind.mask(), Ordering::AcqRel);
        info!("Subscribed to {} sensor ({:?})", kind.label(), rate);
        Ok(())
    }

    /// Stop delivery and drop every reading still queued, so a screen that
    /// resumes later never sees readings taken for its previous visit.
    fn unsubscribe_all(&self) {
        let (previous, stale) = self.delivery.lock(|_| {
            let previous = self.subscribed.swap(0, Ordering::AcqRel);
            let mut stale = 0usize;
            while self.channel.try_receive().is_ok() {
                stale += 1;
            }
            (previous, stale)
        });

        if previous != 0 {
            info!("Unsubscribed from all sensors, dropped {} queued readings", stale);
        } else {
            debug!("unsubscribe_all with no active subscriptions");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_requires_subscription() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);

        assert!(!service.publish(SensorEvent::Light(10.0)));
        service
            .subscribe(SensorKind::Light, SamplingRate::Normal)
            .unwrap();
        assert!(service.publish(SensorEvent::Light(10.0)));
        assert!(!service.publish(SensorEvent::Proximity(3.0)));

        assert_eq!(channel.try_receive().ok(), Some(SensorEvent::Light(10.0)));
        assert!(channel.try_receive().is_err());
    }

    #[test]
    fn subscribing_to_missing_sensor_fails() {
        let channel = SensorEventChannel::new();
        let service =
            ChannelSensorService::new(&channel, SensorSet::EMPTY.with(SensorKind::Light));

        assert!(!service.has_sensor(SensorKind::MagneticField));
        assert_eq!(
            service.subscribe(SensorKind::Proximity, SamplingRate::Normal),
            Err(SensorError::NotPresent {
                kind: SensorKind::Proximity
            })
        );
    }

    #[test]
    fn unsubscribe_without_subscription_is_harmless() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);

        service.unsubscribe_all();
        service.unsubscribe_all();
        assert!(service.subscribed().is_empty());
    }

    #[test]
    fn unsubscribe_drops_queued_readings() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        service.subscribe(SensorKind::Light, SamplingRate::Normal).unwrap();
        assert!(service.publish(SensorEvent::Light(8.0)));
        assert!(service.publish(SensorEvent::Light(9.0)));

        service.unsubscribe_all();
        assert!(channel.is_empty());
    }

    #[test]
    fn full_queue_drops_readings() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        service.subscribe(SensorKind::Light, SamplingRate::Game).unwrap();

        for i in 0..crate::sensors::SENSOR_CHANNEL_CAPACITY {
            assert!(service.publish(SensorEvent::Light(i as f32)));
        }
        assert!(!service.publish(SensorEvent::Light(99.0)));
        assert_eq!(service.rate(), SamplingRate::Game);
    }
}
