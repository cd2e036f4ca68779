// src/carousel/state.rs
//! The single mutable carousel record and its limited-write capability.

use embassy_time::Instant;

use super::Direction;

/// Animation lock as an explicit tagged state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Animating {
        from: usize,
        to: usize,
        direction: Direction,
        started_at: Instant,
        deadline: Instant,
    },
}

/// Authoritative carousel state.
///
/// Owned by [`TransitionController`](super::TransitionController), which is
/// the only writer of the index and phase. The drag fields are written
/// through a [`DragGrant`] handed to the gesture tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselState {
    current_index: usize,
    total: usize,
    phase: TransitionPhase,
    drag_offset_px: f32,
    is_dragging: bool,
}

impl CarouselState {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            current_index: 0,
            total,
            phase: TransitionPhase::Idle,
            drag_offset_px: 0.0,
            is_dragging: false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, TransitionPhase::Animating { .. })
    }

    pub fn drag_offset_px(&self) -> f32 {
        self.drag_offset_px
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub(crate) fn set_phase(&mut self, phase: TransitionPhase) {
        self.phase = phase;
    }

    pub(crate) fn set_current_index(&mut self, index: usize) {
        debug_assert!(index < self.total);
        self.current_index = index;
    }

    pub(crate) fn clear_drag_offset(&mut self) {
        self.drag_offset_px = 0.0;
    }
}

/// Write access to the drag fields of a [`CarouselState`], nothing else.
pub struct DragGrant<'a> {
    state: &'a mut CarouselState,
}

impl<'a> DragGrant<'a> {
    pub(crate) fn new(state: &'a mut CarouselState) -> Self {
        Self { state }
    }

    pub fn begin(&mut self) {
        self.state.is_dragging = true;
        self.state.drag_offset_px = 0.0;
    }

    pub fn set_offset(&mut self, offset_px: f32) {
        self.state.drag_offset_px = offset_px;
    }

    /// End the drag and revert the visual offset.
    pub fn release(&mut self) {
        self.state.is_dragging = false;
        self.state.drag_offset_px = 0.0;
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn total(&self) -> usize {
        self.state.total
    }

    pub fn offset_px(&self) -> f32 {
        self.state.drag_offset_px
    }
}
