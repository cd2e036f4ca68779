// src/carousel/test_support.rs
//! Recording collaborator shared by the carousel unit tests.

use alloc::vec;
use alloc::vec::Vec;
use embassy_time::Instant;
use embedded_graphics::prelude::Size;

use super::view::{CarouselView, NavAvailability, SlideVisual};
use crate::geometry::GeometryProbe;

pub(crate) fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

/// Keeps the last value written for every slot and counts every write.
pub(crate) struct RecordingView {
    pub slides: Vec<SlideVisual>,
    pub indicators: Vec<bool>,
    pub counter: Option<usize>,
    pub total_text: Option<usize>,
    pub nav: Option<NavAvailability>,
    pub container: Size,
    pub writes: usize,
}

impl RecordingView {
    pub fn new(slides: usize, indicators: usize) -> Self {
        Self {
            slides: vec![SlideVisual::Hidden; slides],
            indicators: vec![false; indicators],
            counter: None,
            total_text: None,
            nav: None,
            container: Size::new(320, 180),
            writes: 0,
        }
    }

    pub fn active_slides(&self) -> Vec<usize> {
        self.slides
            .iter()
            .enumerate()
            .filter(|(_, visual)| visual.is_active())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn visible_slides(&self) -> usize {
        self.slides.iter().filter(|visual| visual.is_visible()).count()
    }

    pub fn active_indicators(&self) -> Vec<usize> {
        self.indicators
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .map(|(index, _)| index)
            .collect()
    }
}

impl GeometryProbe for RecordingView {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn container_size(&self) -> Size {
        self.container
    }
}

impl CarouselView for RecordingView {
    fn apply_slide(&mut self, index: usize, visual: SlideVisual) {
        self.writes += 1;
        if let Some(slot) = self.slides.get_mut(index) {
            *slot = visual;
        }
    }

    fn indicator_count(&self) -> usize {
        self.indicators.len()
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        self.writes += 1;
        if let Some(slot) = self.indicators.get_mut(index) {
            *slot = active;
        }
    }

    fn set_counter(&mut self, current: usize) {
        self.writes += 1;
        self.counter = Some(current);
    }

    fn set_total(&mut self, total: usize) {
        self.writes += 1;
        self.total_text = Some(total);
    }

    fn set_nav_availability(&mut self, nav: NavAvailability) {
        self.writes += 1;
        self.nav = Some(nav);
    }

    fn relayout(&mut self, container: Size) {
        self.writes += 1;
        self.container = container;
    }
}
