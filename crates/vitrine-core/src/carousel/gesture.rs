// src/carousel/gesture.rs
//! Swipe gesture classification
//!
//! A gesture is a `Press`, any number of `Drag`s and a `Release`. The
//! tracker records where it started, feeds a damped offset back for live
//! feedback, and on release decides whether the swipe commits a navigation.
//! It never touches the current index: a committed swipe is returned to the
//! caller, which issues the navigation request itself.
//!
//! ```text
//! Idle ──press──► Tracking ──release──► Committed | Cancelled ──► Idle
//!                    │
//!                    └── timeout / new press ──► Cancelled ──► Idle
//! ```

use embassy_time::{Duration, Instant};
use log::{debug, trace};

use super::Direction;
use super::state::DragGrant;
use crate::config::CarouselConfig;

/// Tracking state between dispatched touch events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Tracking {
        start_x: i32,
        current_x: i32,
        started_at: Instant,
    },
}

/// Result of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Swipe passed the threshold toward an existing slide.
    Committed(Direction),
    /// Too short, blocked by an edge, or interrupted. Offset reverted.
    Cancelled,
}

pub struct GestureTracker {
    phase: GesturePhase,
    swipe_threshold_px: i32,
    dead_zone_px: i32,
    damping: f32,
    timeout: Duration,
    wrap: bool,
}

impl GestureTracker {
    pub fn new(config: &CarouselConfig) -> Self {
        Self {
            phase: GesturePhase::Idle,
            swipe_threshold_px: i32::from(config.swipe_threshold_px),
            dead_zone_px: i32::from(config.drag_dead_zone_px),
            damping: config.drag_damping_factor,
            timeout: config.gesture_timeout(),
            wrap: config.wrap,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.phase, GesturePhase::Tracking { .. })
    }

    /// Instant at which an unfinished gesture is force-cancelled.
    pub fn deadline(&self) -> Option<Instant> {
        match self.phase {
            GesturePhase::Tracking { started_at, .. } => Some(started_at + self.timeout),
            GesturePhase::Idle => None,
        }
    }

    /// Begin tracking at `x`.
    ///
    /// A press while already tracking means the previous release never
    /// arrived; that gesture is reported as cancelled and replaced.
    pub fn on_start(
        &mut self,
        x: i32,
        now: Instant,
        grant: &mut DragGrant<'_>,
    ) -> Option<GestureOutcome> {
        let replaced = if self.is_tracking() {
            debug!("Gesture restarted before release; cancelling stale gesture");
            Some(GestureOutcome::Cancelled)
        } else {
            None
        };

        self.phase = GesturePhase::Tracking {
            start_x: x,
            current_x: x,
            started_at: now,
        };
        grant.begin();
        trace!("Gesture start at x={}", x);
        replaced
    }

    /// Follow the pointer. Returns `true` when the drag offset changed.
    pub fn on_move(&mut self, x: i32, grant: &mut DragGrant<'_>) -> bool {
        let GesturePhase::Tracking {
            start_x,
            ref mut current_x,
            ..
        } = self.phase
        else {
            trace!("Ignoring move at x={} while idle", x);
            return false;
        };
        *current_x = x;

        let offset = self.damped_offset(x - start_x);
        if offset == grant.offset_px() {
            return false;
        }
        grant.set_offset(offset);
        trace!("Gesture move delta={} offset={}", x - start_x, offset);
        true
    }

    /// Finish the gesture at `x` and classify it.
    ///
    /// Returns `None` when no gesture was being tracked.
    pub fn on_end(&mut self, x: i32, grant: &mut DragGrant<'_>) -> Option<GestureOutcome> {
        let GesturePhase::Tracking { start_x, .. } = self.phase else {
            trace!("Ignoring release at x={} while idle", x);
            return None;
        };
        self.phase = GesturePhase::Idle;

        let outcome = self.classify(x - start_x, grant.current_index(), grant.total());
        grant.release();
        debug!("Gesture end delta={} -> {:?}", x - start_x, outcome);
        Some(outcome)
    }

    /// Cancel a gesture whose release never arrived.
    pub fn check_timeout(
        &mut self,
        now: Instant,
        grant: &mut DragGrant<'_>,
    ) -> Option<GestureOutcome> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        debug!("Gesture timed out without release; reverting offset");
        self.abort(grant);
        Some(GestureOutcome::Cancelled)
    }

    /// Drop any tracked gesture and revert the offset.
    pub fn abort(&mut self, grant: &mut DragGrant<'_>) {
        self.phase = GesturePhase::Idle;
        grant.release();
    }

    /// Commit decision for a finished drag of `delta` pixels.
    ///
    /// Dragging left (`delta < 0`) reveals the next slide, dragging right
    /// the previous one. Edges only commit when wrapping is enabled.
    pub fn classify(&self, delta: i32, current: usize, total: usize) -> GestureOutcome {
        if delta.abs() <= self.swipe_threshold_px || total <= 1 {
            return GestureOutcome::Cancelled;
        }

        let direction = if delta < 0 {
            Direction::Next
        } else {
            Direction::Prev
        };
        let has_neighbor = match direction {
            Direction::Next => current + 1 < total,
            Direction::Prev => current > 0,
        };

        if has_neighbor || self.wrap {
            GestureOutcome::Committed(direction)
        } else {
            GestureOutcome::Cancelled
        }
    }

    fn damped_offset(&self, delta: i32) -> f32 {
        if delta.abs() > self.dead_zone_px {
            delta as f32 * self.damping
        } else {
            0.0
        }
    }
}
