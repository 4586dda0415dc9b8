//! Sensor subscriptions tied to screen visibility

use log::{debug, info, warn};

use crate::sensors::{SamplingRate, SensorKind, SensorService, SensorSet};

/// An active set of sensor subscriptions.
///
/// Acquired with [`acquire`](Self::acquire); released either explicitly with
/// [`release`](Self::release) or when dropped. Release always ends with
/// `unsubscribe_all()` on the service, exactly once.
pub struct SensorSubscription<'a, S: SensorService + ?Sized> {
    service: &'a S,
    kinds: SensorSet,
    released: bool,
}

impl<'a, S: SensorService + ?Sized> SensorSubscription<'a, S> {
    /// Subscribe to every kind in `wanted` that the device actually has.
    ///
    /// Missing sensors are skipped; their fields simply keep their
    /// placeholder text. Failed subscriptions are logged and skipped too.
    pub fn acquire(service: &'a S, wanted: SensorSet, rate: SamplingRate) -> Self {
        let mut kinds = SensorSet::EMPTY;

        for kind in wanted.iter() {
            if !service.has_sensor(kind) {
                debug!("No {} sensor, skipping subscription", kind.label());
                continue;
            }

            match service.subscribe(kind, rate) {
                Ok(()) => kinds = kinds.with(kind),
                Err(e) => warn!("Could not subscribe to {} sensor: {}", kind.label(), e),
            }
        }

        Self {
            service,
            kinds,
            released: false,
        }
    }

    /// Kinds this subscription actually holds.
    pub fn kinds(&self) -> SensorSet {
        self.kinds
    }

    pub fn contains(&self, kind: SensorKind) -> bool {
        self.kinds.contains(kind)
    }

    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if !self.released {
            self.released = true;
            self.service.unsubscribe_all();
        }
    }
}

impl<S: SensorService + ?Sized> Drop for SensorSubscription<'_, S> {
    fn drop(&mut self) {
        self.release_inner();
    }
}

/// Subscribes while a screen is visible and unsubscribes when it is not.
///
/// Every [`resume`](Self::resume) after a [`pause`](Self::pause) takes a
/// fresh subscription.
pub struct ScreenLifecycle<'a, S: SensorService + ?Sized> {
    service: &'a S,
    wanted: SensorSet,
    rate: SamplingRate,
    active: Option<SensorSubscription<'a, S>>,
    activations: u32,
}

impl<'a, S: SensorService + ?Sized> ScreenLifecycle<'a, S> {
    pub fn new(service: &'a S, wanted: SensorSet, rate: SamplingRate) -> Self {
        Self {
            service,
            wanted,
            rate,
            active: None,
            activations: 0,
        }
    }

    /// The screen became visible. Returns `true` if a new subscription was taken.
    pub fn resume(&mut self) -> bool {
        if self.active.is_some() {
            return false;
        }

        let subscription = SensorSubscription::acquire(self.service, self.wanted, self.rate);
        self.activations = self.activations.wrapping_add(1);
        info!(
            "Screen resumed (activation {}), subscribed to {:#05b}",
            self.activations,
            subscription.kinds().bits()
        );
        self.active = Some(subscription);
        true
    }

    /// The screen was hidden.
    ///
    /// Always unsubscribes, whether or not `resume` was ever called. Returns
    /// `true` if an active subscription was released.
    pub fn pause(&mut self) -> bool {
        match self.active.take() {
            Some(subscription) => {
                subscription.release();
                info!("Screen paused, sensors released");
                true
            }
            None => {
                self.service.unsubscribe_all();
                false
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// How many times a subscription has been taken.
    pub fn activations(&self) -> u32 {
        self.activations
    }

    pub fn subscribed_kinds(&self) -> SensorSet {
        self.active
            .as_ref()
            .map(SensorSubscription::kinds)
            .unwrap_or(SensorSet::EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{ChannelSensorService, SensorEvent, SensorEventChannel};

    #[test]
    fn drop_releases_subscription() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);

        {
            let subscription =
                SensorSubscription::acquire(&service, SensorSet::ALL, SamplingRate::Normal);
            assert_eq!(subscription.kinds(), SensorSet::ALL);
            assert!(service.is_subscribed(SensorKind::Proximity));
        }

        assert!(service.subscribed().is_empty());
    }

    #[test]
    fn missing_sensors_are_skipped() {
        let channel = SensorEventChannel::new();
        let present = SensorSet::EMPTY.with(SensorKind::Proximity);
        let service = ChannelSensorService::new(&channel, present);

        let subscription =
            SensorSubscription::acquire(&service, SensorSet::ALL, SamplingRate::Normal);
        assert!(subscription.contains(SensorKind::Proximity));
        assert!(!subscription.contains(SensorKind::Light));
        subscription.release();
        assert!(service.subscribed().is_empty());
    }

    #[test]
    fn pause_without_resume_is_harmless() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        let mut lifecycle = ScreenLifecycle::new(&service, SensorSet::ALL, SamplingRate::Normal);

        assert!(!lifecycle.pause());
        assert!(!lifecycle.pause());
        assert!(!lifecycle.is_active());
    }

    #[test]
    fn every_resume_resubscribes() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        let wanted = SensorSet::EMPTY.with(SensorKind::Light);
        let mut lifecycle = ScreenLifecycle::new(&service, wanted, SamplingRate::Ui);

        for round in 1..=3 {
            assert!(lifecycle.resume());
            assert!(!lifecycle.resume());
            assert_eq!(lifecycle.activations(), round);
            assert!(service.publish(SensorEvent::Light(round as f32)));

            assert!(lifecycle.pause());
            assert!(!service.publish(SensorEvent::Light(0.0)));
        }
        assert_eq!(lifecycle.subscribed_kinds(), SensorSet::EMPTY);
    }
}
