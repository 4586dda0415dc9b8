//! Desktop simulator for the lumo dice roller and business card apps.
//!
//! Renders lumo-core pages in an SDL2 window via `embedded-graphics-simulator`.
//! A background thread stands in for the sensor hardware so both apps can be
//! exercised without a device.
//!
//! Configuration comes from the environment or a `.env` file:
//! `LUMO_VARIANT`, `LUMO_SAMPLING`, `LUMO_SENSORS` and `LUMO_CARD_*`.
//!
//! # Key bindings
//!
//! | Key           | Action                         |
//! |---------------|--------------------------------|
//! | V             | View sensor data (card app)    |
//! | B / Backspace | Back                           |
//! | P             | Pause / resume the screen      |
//! | Q / Esc       | Quit                           |
//!
//! Mouse presses, drags and releases are forwarded as touch events.

mod hardware;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info};

use lumo_core::app::{CardApp, DiceApp, SensorApp};
use lumo_core::config::{AppVariant, Config};
use lumo_core::sensors::{ChannelSensorService, SensorEventChannel};
use lumo_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, TouchEvent, TouchPoint};

use crate::hardware::SimulatedSensors;

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Readings from the simulated hardware to the UI thread.
static SENSOR_EVENTS: SensorEventChannel = SensorEventChannel::new();

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// What a key press asks the simulator to do.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    ViewSensors,
    Back,
    TogglePause,
    Quit,
}

fn keycode_to_command(keycode: Keycode) -> Option<Command> {
    match keycode {
        Keycode::V => Some(Command::ViewSensors),
        Keycode::B | Keycode::Backspace => Some(Command::Back),
        Keycode::P => Some(Command::TogglePause),
        Keycode::Q | Keycode::Escape => Some(Command::Quit),
        _ => None,
    }
}

fn touch_point(point: Point) -> TouchPoint {
    TouchPoint::new(point.x.max(0) as u16, point.y.max(0) as u16)
}

// ---------------------------------------------------------------------------
// Main loop
// ---------------------------------------------------------------------------

fn run<A: SensorApp>(mut app: A, title: &str) {
    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new(title, &output_settings);

    app.resume();
    let mut paused = false;

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = display.clear(Rgb565::BLACK);
    if let Err(e) = app.draw(&mut display) {
        error!("Draw error: {:?}", e);
    }
    window.update(&display);
    let mut needs_redraw = false;
    let mut mouse_down = false;

    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => match keycode_to_command(keycode) {
                    Some(Command::Quit) => break 'running,
                    Some(Command::ViewSensors) => needs_redraw |= app.view_sensors(),
                    Some(Command::Back) => needs_redraw |= app.go_back(),
                    Some(Command::TogglePause) => {
                        if paused {
                            app.resume();
                            info!("Screen visible");
                        } else {
                            app.pause();
                            info!("Screen hidden");
                        }
                        paused = !paused;
                    }
                    None => {}
                },

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    mouse_down = true;
                    needs_redraw |= app.handle_touch(TouchEvent::Press(touch_point(point)));
                }

                SimulatorEvent::MouseMove { point } if mouse_down => {
                    needs_redraw |= app.handle_touch(TouchEvent::Drag(touch_point(point)));
                }

                SimulatorEvent::MouseButtonUp { point, .. } => {
                    mouse_down = false;
                    needs_redraw |= app.handle_touch(TouchEvent::Release(touch_point(point)));
                }

                _ => {}
            }
        }

        // --- Sensor readings ----------------------------------------------
        needs_redraw |= app.pump(&SENSOR_EVENTS);

        // --- Render -------------------------------------------------------
        if needs_redraw || app.is_dirty() {
            let _ = display.clear(Rgb565::BLACK);
            if let Err(e) = app.draw(&mut display) {
                error!("Draw error: {:?}", e);
            }
            needs_redraw = false;
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    app.pause();
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();

    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => error!("Could not read .env: {}", e),
    }

    let vars: HashMap<String, String> = std::env::vars().collect();
    let config = Config::from_lookup(|key: &str| vars.get(key).map(String::as_str));

    info!("Starting lumo simulator: {:?}", config.variant);
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: V=View sensors  B=Back  P=Pause/resume  Q=Quit");

    let service = Arc::new(ChannelSensorService::new(&SENSOR_EVENTS, config.sensors));
    let _hardware = SimulatedSensors::spawn(Arc::clone(&service), config.sampling.period());

    match config.variant {
        AppVariant::DiceRoller => run(
            DiceApp::new(&*service, config.sampling),
            "Lumo Dice Roller",
        ),
        AppVariant::BusinessCard => run(
            CardApp::new(&*service, config.sampling, &config.card),
            "Lumo Business Card",
        ),
    }

    info!("Simulator exiting");
}
