use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::debug;

use super::{SensorApp, drain_events};
use crate::app_state::{DiceRollerState, ScreenLifecycle};
use crate::pages::{DicePage, PageManager};
use crate::sensors::{SamplingRate, SensorEventChannel, SensorKind, SensorService, SensorSet};
use crate::ui::{PageEvent, PageId, TouchEvent, screen_bounds};

/// Light-driven dice roller: one page, one sensor.
pub struct DiceApp<'a, S: SensorService + ?Sized> {
    state: DiceRollerState,
    lifecycle: ScreenLifecycle<'a, S>,
    pages: PageManager,
}

impl<'a, S: SensorService + ?Sized> DiceApp<'a, S> {
    pub fn new(service: &'a S, rate: SamplingRate) -> Self {
        let mut pages = PageManager::new(PageId::DiceRoller);
        pages.register_page(DicePage::new(screen_bounds()));

        let mut state = DiceRollerState::new();
        pages.broadcast_event(&PageEvent::DiceUpdate(state.snapshot()));
        state.mark_clean();

        Self {
            state,
            lifecycle: ScreenLifecycle::new(
                service,
                SensorSet::EMPTY.with(SensorKind::Light),
                rate,
            ),
            pages,
        }
    }

    pub fn state(&self) -> &DiceRollerState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }
}

impl<S: SensorService + ?Sized> SensorApp for DiceApp<'_, S> {
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

        let event = PageEvent::DiceUpdate(self.state.snapshot());
        self.state.mark_clean();
        self.pages.broadcast_event(&event)
    }

    fn handle_touch(&mut self, event: TouchEvent) -> bool {
        self.pages
            .handle_touch(event)
            .is_some_and(|action| self.pages.apply_action(action))
    }

    fn view_sensors(&mut self) -> bool {
        debug!("Dice roller has no sensor page");
        false
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
    use crate::sensors::{ChannelSensorService, SensorEvent};
    use embedded_graphics::mock_display::MockDisplay;

    #[test]
    fn light_reading_rolls_the_die() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        let mut app = DiceApp::new(&service, SamplingRate::Normal);

        app.resume();
        assert!(service.is_subscribed(SensorKind::Light));
        assert!(!service.is_subscribed(SensorKind::Proximity));

        assert!(service.publish(SensorEvent::Light(8.0)));
        assert!(app.pump(&channel));
        assert_eq!(app.state().light_level(), "Light Level: 8.0");
        assert_eq!(app.state().dice().value(), 3);
    }

    #[test]
    fn readings_queued_while_paused_are_dropped() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        let mut app = DiceApp::new(&service, SamplingRate::Normal);

        app.resume();
        service.publish(SensorEvent::Light(8.0));
        app.pause();

        assert!(!app.pump(&channel));
        assert_eq!(app.state().light_level(), "Fetching Light Level...");
        assert_eq!(app.state().dice().value(), 1);
    }

    #[test]
    fn resume_never_sees_readings_from_before_pause() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        let mut app = DiceApp::new(&service, SamplingRate::Normal);

        app.resume();
        assert!(service.publish(SensorEvent::Light(8.0)));
        app.pause();
        app.resume();

        assert!(!app.pump(&channel));
        assert_eq!(app.state().light_level(), "Fetching Light Level...");
        assert_eq!(app.state().dice().value(), 1);

        assert!(service.publish(SensorEvent::Light(11.0)));
        assert!(app.pump(&channel));
        assert_eq!(app.state().dice().value(), 6);
    }

    #[test]
    fn resume_after_pause_resubscribes() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        let mut app = DiceApp::new(&service, SamplingRate::Game);

        app.resume();
        app.pause();
        assert!(!service.is_subscribed(SensorKind::Light));

        app.resume();
        assert!(app.is_active());
        assert!(service.is_subscribed(SensorKind::Light));
        assert_eq!(service.rate(), SamplingRate::Game);
    }

    #[test]
    fn no_light_sensor_keeps_placeholder() {
        let channel = SensorEventChannel::new();
        let present = SensorSet::EMPTY.with(SensorKind::Proximity);
        let service = ChannelSensorService::new(&channel, present);
        let mut app = DiceApp::new(&service, SamplingRate::Normal);

        app.resume();
        assert!(!service.publish(SensorEvent::Light(4.0)));
        assert!(!app.pump(&channel));
        assert_eq!(app.state().light_level(), "Fetching Light Level...");
    }

    #[test]
    fn has_nowhere_to_navigate() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        let mut app = DiceApp::new(&service, SamplingRate::Normal);

        assert!(!app.view_sensors());
        assert!(!app.go_back());
        assert_eq!(app.current_page(), PageId::DiceRoller);
    }

    #[test]
    fn draw_clears_dirty_flag() {
        let channel = SensorEventChannel::new();
        let service = ChannelSensorService::new(&channel, SensorSet::ALL);
        let mut app = DiceApp::new(&service, SamplingRate::Normal);
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);

        assert!(app.is_dirty());
        app.draw(&mut display).unwrap();
        assert!(!app.is_dirty());
    }
}
