// src/geometry.rs
//! Read-only queries against the surface hosting the carousel.

use embedded_graphics::prelude::Size;

/// Pure query for the slide set and container dimensions.
///
/// Implemented by every carousel collaborator. Nothing here mutates state;
/// the engine samples it once at initialization and again on resize.
pub trait GeometryProbe {
    /// Number of slides discovered in the container.
    fn slide_count(&self) -> usize;

    /// Size of the visible slide area in pixels.
    fn container_size(&self) -> Size;
}

impl<T: GeometryProbe + ?Sized> GeometryProbe for alloc::boxed::Box<T> {
    fn slide_count(&self) -> usize {
        (**self).slide_count()
    }

    fn container_size(&self) -> Size {
        (**self).container_size()
    }
}

/// Snapshot of a [`GeometryProbe`] taken at a single point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub total: usize,
    pub container: Size,
}

impl Geometry {
    pub fn probe<P: GeometryProbe + ?Sized>(probe: &P) -> Self {
        Self {
            total: probe.slide_count(),
            container: probe.container_size(),
        }
    }

    /// No slides were found; the carousel must run disabled.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
