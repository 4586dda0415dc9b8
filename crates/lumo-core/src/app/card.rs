use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::{SensorApp, drain_events};
use crate::app_state::{ScreenLifecycle, SensorPanelState};
use crate::config::CardDetails;
use crate::pages::{BusinessCardPage, PageManager, SensorsPage};
use crate::sensors::{SamplingRate, SensorEventChannel, SensorKind, SensorService, SensorSet};
use crate::ui::{PageEvent, PageId, TouchEvent, screen_bounds};

/// Business card with a sensor detail page behind it.
///
/// Light and proximity stay subscribed for as long as the app is resumed,
/// whichever page is showing, so the sensor page is current the moment it
/// opens.
pub struct CardApp<'a, S: SensorService + ?Sized> {
    state: SensorPanelState,
    lifecycle: ScreenLifecycle<'a, S>,
    pages: PageManager,
}

impl<'a, S: SensorService + ?Sized> CardApp<'a, S> {
    pub fn new(service: &'a S, rate: SamplingRate, details: &CardDetails) -> Self {
        let mut pages = PageManager::new(PageId::BusinessCard);
        pages.register_page(BusinessCardPage::new(screen_bounds(), details));
        pages.register_page(SensorsPage::new(screen_bounds()));

        let mut state = SensorPanelState::new(service);
        pages.broadcast_event(&PageEvent::SensorPanel(state.snapshot()));
        state.mark_clean();

        let wanted = SensorSet::EMPTY
            .with(SensorKind::Light)
            .with(SensorKind::Proximity);

        Self {
            state,
            lifecycle: ScreenLifecycle::new(service, wanted, rate),
            pages,
        }
    }

    pub fn state(&self) -> &SensorPanelState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }
}

impl<S: SensorService + ?Sized> SensorApp for CardApp<'_, S> {
    fn resume(&mut self) {
        if self.lifecycle.resume() {
            self.pages.mark_dirty();
        }
    }

    fn pause(&mut self) {
        self.lifecycle.pause();
    }

    fn pump(&mut self, channel: &SensorEventChannel) -> bool {
        let state = &mut self.state;
        drain_events(channel, self.lifecycle.is_active(), |event| state.apply(event));

        if !self.state.is_dirty() {
            return false;
        }

        let event = PageEvent::SensorPanel(self.state.snapshot());
        self.state.mark_clean();
        self.pages.broadcast_event(&event)
    }

    fn handle_touch(&mut self, event: TouchEvent) -> bool {
        self.pages
            .handle_touch(event)
            .is_some_and(|action| self.pages.apply_action(action))
    }

    fn view_sensors(&mut self) -> bool {
        self.pages.navigate_to(PageId::Sensors)
    }

    fn go_back(&mut self) -> bool {
        self.pages.go_back()
    }

    fn current_page(&self) -> PageId {
        self.pages.current_page_id()
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error> {
        self.pages.draw(display)
    }

    fn is_dirty(&self) -> bool {
        self.pages.is_dirty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{ChannelSensorService, CountingService, SensorEvent};
    use crate::ui::{Drawable, TouchPoint};

    #[test]
    fn navigation_round_trip() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        let mut app = CardApp::new(&service, SamplingRate::Normal, &CardDetails::default());

        assert_eq!(app.current_page(), PageId::BusinessCard);
        assert!(app.view_sensors());
        assert_eq!(app.current_page(), PageId::Sensors);
        assert!(app.go_back());
        assert_eq!(app.current_page(), PageId::BusinessCard);
        assert!(!app.go_back());
        assert_eq!(app.current_page(), PageId::BusinessCard);
    }

    #[test]
    fn view_sensors_twice_pushes_once() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        let mut app = CardApp::new(&service, SamplingRate::Normal, &CardDetails::default());

        assert!(app.view_sensors());
        assert!(!app.view_sensors());
        assert!(app.go_back());
        assert_eq!(app.current_page(), PageId::BusinessCard);
    }

    #[test]
    fn tapping_buttons_navigates() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        let mut app = CardApp::new(&service, SamplingRate::Normal, &CardDetails::default());

        let card = BusinessCardPage::new(screen_bounds(), &CardDetails::default());
        let view = card.view_sensors_button().bounds().center();
        let sensors = SensorsPage::new(screen_bounds());
        let back = sensors.back_button().bounds().center();

        let press = |p: Point| TouchEvent::Press(TouchPoint::new(p.x as u16, p.y as u16));

        assert!(app.handle_touch(press(view)));
        assert_eq!(app.current_page(), PageId::Sensors);
        assert!(app.handle_touch(press(back)));
        assert_eq!(app.current_page(), PageId::BusinessCard);
    }

    #[test]
    fn readings_update_independent_fields() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        let mut app = CardApp::new(&service, SamplingRate::Ui, &CardDetails::default());
        app.resume();
        app.view_sensors();

        service.publish(SensorEvent::Proximity(5.0));
        assert!(app.pump(&channel));
        assert_eq!(app.state().proximity(), "Proximity: 5.0 cm");
        assert_eq!(app.state().light_level(), "Fetching Light Level...");

        service.publish(SensorEvent::Light(120.5));
        assert!(app.pump(&channel));
        assert_eq!(app.state().light_level(), "Light Level: 120.5 lx");
        assert_eq!(app.state().proximity(), "Proximity: 5.0 cm");
    }

    #[test]
    fn magnetometer_is_not_subscribed() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        let mut app = CardApp::new(&service, SamplingRate::Normal, &CardDetails::default());
        app.resume();

        assert!(!service.is_subscribed(SensorKind::MagneticField));
        assert!(!service.publish(SensorEvent::Magnetic(42.0)));
        assert_eq!(app.state().magnetometer(), "Magnetometer: Available");
    }

    #[test]
    fn missing_magnetometer_is_reported() {
        let channel = SensorEventChannel::new();
        let present = SensorSet::EMPTY
            .with(SensorKind::Light)
            .with(SensorKind::Proximity);
        let service = ChannelSensorService::new(&channel, present);
        let app = CardApp::new(&service, SamplingRate::Normal, &CardDetails::default());

        assert_eq!(app.state().magnetometer(), "Magnetometer: Not Available");
    }

    #[test]
    fn stale_proximity_is_dropped_across_pause() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        let mut app = CardApp::new(&service, SamplingRate::Normal, &CardDetails::default());

        app.resume();
        assert!(service.publish(SensorEvent::Proximity(5.0)));
        app.pause();
        app.resume();

        assert!(!app.pump(&channel));
        assert_eq!(app.state().proximity(), "Fetching Proximity...");
    }

    #[test]
    fn magnetometer_checked_once_over_app_lifetime() {
        let channel = SensorEventChannel::new();
        let service = CountingService::new(SensorSet::ALL);
        let mut app = CardApp::new(&service, SamplingRate::Normal, &CardDetails::default());

        for round in 0..3 {
            app.resume();
            for i in 0..4 {
                assert!(channel.try_send(SensorEvent::Light((round * 4 + i) as f32)).is_ok());
            }
            assert!(app.pump(&channel));
            app.view_sensors();
            app.go_back();
            app.pause();
        }

        assert_eq!(service.presence_checks(SensorKind::MagneticField), 1);
        assert_eq!(service.subscribes.get(), 6);
    }

    #[test]
    fn pause_twice_and_resume_again() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        let mut app = CardApp::new(&service, SamplingRate::Normal, &CardDetails::default());

        app.pause();
        app.resume();
        app.pause();
        app.pause();
        assert!(service.subscribed().is_empty());

        app.resume();
        assert!(service.is_subscribed(SensorKind::Light));
        assert!(service.is_subscribed(SensorKind::Proximity));
    }

    #[test]
    fn hidden_page_still_receives_updates() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        let mut app = CardApp::new(&service, SamplingRate::Normal, &CardDetails::default());
        app.resume();

        service.publish(SensorEvent::Light(3.0));
        // The card page is showing and does not render readings.
        assert!(!app.pump(&channel));
        assert_eq!(app.state().light_level(), "Light Level: 3.0 lx");
    }
}
