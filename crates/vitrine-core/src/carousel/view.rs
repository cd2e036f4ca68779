// src/carousel/view.rs
//! Collaborator interface between the engine and whatever displays it.

use embedded_graphics::prelude::Size;

use super::Direction;
use crate::config::TransitionStyle;
use crate::geometry::GeometryProbe;

/// Interpolation state of a slide taking part in a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub direction: Direction,
    /// Linear progress in `[0, 1]`.
    pub progress: f32,
    pub style: TransitionStyle,
}

/// Visual state written for a single slide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlideVisual {
    /// The one slide shown at rest.
    Active,
    /// Not visible.
    Hidden,
    /// Leaving the viewport during a transition.
    Outgoing(Motion),
    /// Entering the viewport during a transition.
    Incoming(Motion),
    /// Following the finger during a drag.
    Dragged { offset_px: f32 },
}

impl SlideVisual {
    /// Whether the slide carries the "active" marker at rest.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active | Self::Dragged { .. })
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Whether the previous/next buttons can navigate from the current slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavAvailability {
    pub prev: bool,
    pub next: bool,
}

/// Surface that renders the carousel.
///
/// A page backend maps these writes onto slide classes and transforms; the
/// bundled [`CarouselWidget`](crate::ui::CarouselWidget) draws them with
/// `embedded-graphics`. Only the slide writes are mandatory: indicators,
/// counter, total text and buttons are optional parts of a container and
/// default to no-ops.
pub trait CarouselView: GeometryProbe {
    /// Set the visual state of slide `index`.
    fn apply_slide(&mut self, index: usize, visual: SlideVisual);

    /// Number of indicator widgets (0 when the container has none).
    fn indicator_count(&self) -> usize {
        0
    }

    fn set_indicator_active(&mut self, _index: usize, _active: bool) {}

    /// Write the 1-based current slide number.
    fn set_counter(&mut self, _current: usize) {}

    /// Write the total slide count.
    fn set_total(&mut self, _total: usize) {}

    fn set_nav_availability(&mut self, _nav: NavAvailability) {}

    /// Container was resized; re-layout without touching the index.
    fn relayout(&mut self, _container: Size) {}
}

impl<T: CarouselView + ?Sized> CarouselView for alloc::boxed::Box<T> {
    fn apply_slide(&mut self, index: usize, visual: SlideVisual) {
        (**self).apply_slide(index, visual)
    }

    fn indicator_count(&self) -> usize {
        (**self).indicator_count()
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        (**self).set_indicator_active(index, active)
    }

    fn set_counter(&mut self, current: usize) {
        (**self).set_counter(current)
    }

    fn set_total(&mut self, total: usize) {
        (**self).set_total(total)
    }

    fn set_nav_availability(&mut self, nav: NavAvailability) {
        (**self).set_nav_availability(nav)
    }

    fn relayout(&mut self, container: Size) {
        (**self).relayout(container)
    }
}
