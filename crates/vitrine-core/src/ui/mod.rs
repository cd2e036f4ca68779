// src/ui/mod.rs
//! Carousel rendering for embedded displays
//!
//! This module provides:
//! - Touch input types shared with the carousel engine
//! - The drawable element trait used by every widget
//! - A color palette tuned for RGB565 panels
//! - [`CarouselWidget`], an `embedded-graphics` implementation of the
//!   carousel view

pub mod components;
pub mod core;
pub mod styling;

pub use components::{CarouselWidget, MAX_SLIDES, SlideCard};
pub use self::core::{Drawable, TouchEvent, TouchPoint};
pub use styling::ColorPalette;
