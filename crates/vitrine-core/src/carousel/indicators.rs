// src/carousel/indicators.rs
//! Indicator, counter and button projection.

use log::trace;

use super::Transitioned;
use super::view::{CarouselView, NavAvailability};

/// Stateless mirror of the current index onto the container chrome.
///
/// Everything written here is derived from the index handed in; nothing is
/// remembered between calls. Missing indicators are skipped silently.
pub struct IndicatorSync {
    wrap: bool,
}

impl IndicatorSync {
    pub fn new(wrap: bool) -> Self {
        Self { wrap }
    }

    /// Button availability at `index`.
    pub fn nav_availability(&self, index: usize, total: usize) -> NavAvailability {
        if total <= 1 {
            return NavAvailability {
                prev: false,
                next: false,
            };
        }
        if self.wrap {
            return NavAvailability {
                prev: true,
                next: true,
            };
        }
        NavAvailability {
            prev: index > 0,
            next: index + 1 < total,
        }
    }

    /// Initial projection for a carousel resting on slide 0.
    pub fn show_initial<V: CarouselView + ?Sized>(&self, total: usize, view: &mut V) {
        view.set_total(total);
        for index in 0..view.indicator_count().min(total) {
            view.set_indicator_active(index, index == 0);
        }
        view.set_counter(1);
        view.set_nav_availability(self.nav_availability(0, total));
    }

    pub fn on_transitioned<V: CarouselView + ?Sized>(
        &self,
        transitioned: &Transitioned,
        total: usize,
        view: &mut V,
    ) {
        let indicators = view.indicator_count();
        if transitioned.from < indicators {
            view.set_indicator_active(transitioned.from, false);
        }
        if transitioned.to < indicators {
            view.set_indicator_active(transitioned.to, true);
        } else {
            trace!("No indicator for slide {}", transitioned.to);
        }
        view.set_counter(transitioned.to + 1);
        view.set_nav_availability(self.nav_availability(transitioned.to, total));
    }
}
