//! Simulated sensor hardware.
//!
//! A background thread plays the role of the device's sensor drivers: it
//! produces a reading for every present sensor once per sampling period and
//! hands it to [`ChannelSensorService::publish`], which drops readings for
//! sensors nobody is subscribed to.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info};
use lumo_core::sensors::{ChannelSensorService, SensorEvent, SensorKind};

/// Lower bound on the producer period, so `fastest` does not spin a core.
const MIN_PERIOD: Duration = Duration::from_millis(5);

/// Synthetic waveforms for each sensor kind.
struct Waveforms {
    started: Instant,
}

impl Waveforms {
    fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    fn sample(&self, kind: SensorKind) -> SensorEvent {
        let t = self.started.elapsed().as_secs_f32();

        match kind {
            // 5–55 lx, slow swell with a faster flicker on top
            SensorKind::Light => {
                let lux = 30.0 + 22.0 * (t / 6.0).sin() + 3.0 * (t * 1.7).cos();
                SensorEvent::Light(round_tenths(lux.max(0.0)))
            }
            // Binary near/far like most phone proximity sensors
            SensorKind::Proximity => {
                let cm = if (t / 4.0).sin() > 0.0 { 0.0 } else { 5.0 };
                SensorEvent::Proximity(cm)
            }
            // Earth's field with a little wobble, in µT
            SensorKind::MagneticField => {
                SensorEvent::Magnetic(round_tenths(45.0 + 2.0 * (t * 0.9).sin()))
            }
        }
    }
}

fn round_tenths(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Handle to the running producer thread. Stops and joins on drop.
pub struct SimulatedSensors {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SimulatedSensors {
    pub fn spawn(service: Arc<ChannelSensorService<'static>>, period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        info!(
            "Simulated sensors: {:#05b} every {:?}",
            service.present().bits(),
            period
        );

        let handle = thread::Builder::new()
            .name("sensors".into())
            .spawn(move || {
                let waves = Waveforms::new();
                while !thread_stop.load(Ordering::Relaxed) {
                    for kind in service.present().iter() {
                        service.publish(waves.sample(kind));
                    }
                    thread::sleep(period);
                }
                debug!("Sensor thread exiting");
            })
            .map_err(|e| log::error!("Could not start sensor thread: {}", e))
            .ok();

        Self { stop, handle }
    }
}

impl Drop for SimulatedSensors {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            log::error!("Sensor thread panicked");
        }
    }
}
