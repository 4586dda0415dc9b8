//! Hardware-independent core library for lumo
//!
//! This crate contains the platform-agnostic logic of the two lumo apps: a
//! dice roller driven by the ambient light sensor and a business card with a
//! sensor detail page. It holds the sensor service abstraction, the
//! observable display state, the screen lifecycle that ties sensor
//! subscriptions to visibility, and the pages that render it all.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod app;
pub mod app_state;
pub mod config;
pub mod dice;
pub mod pages;
pub mod sensors;
pub mod ui;
