// src/ui/components/mod.rs
//! UI components library

pub mod carousel_widget;

pub use carousel_widget::{CarouselWidget, MAX_SLIDES, SlideCard};
