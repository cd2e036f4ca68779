//! Hardware-independent slide carousel engine
//!
//! This crate contains all platform-agnostic logic for the vitrine carousel:
//! the transition lock, swipe gesture classification, the auto-advance
//! scheduler, indicator projection, and the composition root that wires
//! buttons, indicators, touch input and timers together. An
//! `embedded-graphics` renderer is included so the same engine drives
//! small touch displays and the desktop simulator.
//!
//! The engine never reads a clock. Every entry point takes `now` as an
//! [`embassy_time::Instant`] and the host loop sleeps until
//! [`SliderController::next_deadline`](carousel::SliderController::next_deadline).
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod carousel;
pub mod config;
pub mod geometry;
pub mod ui;

pub use carousel::{
    CarouselError, CarouselInput, CarouselState, CarouselView, Direction, Lifecycle,
    NavigationError, SliderController, SlideVisual, Transitioned,
};
pub use config::{CarouselConfig, ConfigError, TransitionStyle};
pub use geometry::{Geometry, GeometryProbe};
