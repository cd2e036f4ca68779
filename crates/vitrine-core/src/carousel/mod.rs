// src/carousel/mod.rs
//! Slide carousel engine
//!
//! The carousel reconciles five trigger sources (prev/next buttons,
//! indicator clicks, swipe gestures, the auto-advance timer, and
//! hover/visibility/resize notifications) into one consistent
//! presentation with exactly one active slide.
//!
//! # Components
//!
//! - [`TransitionController`]: sole writer of the current index and the
//!   animation lock. Concurrent requests are dropped, never queued.
//! - [`GestureTracker`]: turns a press/drag/release sequence into a swipe
//!   decision. Writes only the drag fields, through a [`DragGrant`].
//! - [`AutoAdvanceScheduler`]: single periodic timer with independent
//!   pause reasons and a post-gesture cooldown.
//! - [`IndicatorSync`]: projects [`Transitioned`] notifications onto
//!   indicators, the counter and button availability.
//! - [`SliderController`]: composition root and lifecycle.
//!
//! All components run on one cooperative loop. Time is passed in as an
//! [`embassy_time::Instant`]; nothing in this module reads a clock.

use thiserror_no_std::Error;

use crate::config::ConfigError;

mod controller;
mod gesture;
mod indicators;
mod input;
mod scheduler;
mod state;
mod transition;
mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use controller::{Lifecycle, SliderController};
pub use gesture::{GestureOutcome, GesturePhase, GestureTracker};
pub use indicators::IndicatorSync;
pub use input::{
    CarouselInput, INPUT_CHANNEL_CAPACITY, InputChannel, InputReceiver, InputSender, submit,
};
pub use scheduler::{AutoAdvanceScheduler, PauseReason, TimerHandle};
pub use state::{CarouselState, DragGrant, TransitionPhase};
pub use transition::TransitionController;
pub use view::{CarouselView, Motion, NavAvailability, SlideVisual};

/// Navigation direction. Selects the exit vector of the outgoing slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    /// Horizontal sign the outgoing slide travels in (-1 = left).
    pub const fn exit_sign(self) -> i32 {
        match self {
            Self::Next => -1,
            Self::Prev => 1,
        }
    }

    /// Direction implied by moving from `from` to `to` without wrapping.
    pub fn between(from: usize, to: usize) -> Self {
        if to > from { Self::Next } else { Self::Prev }
    }
}

/// Emitted exactly once per completed transition, after the index moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transitioned {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

/// Why a navigation request did not start a transition.
///
/// None of these reach the page; the controller logs them at debug level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Carousel has no slides")]
    Disabled,
    #[error("Carousel has been destroyed")]
    Destroyed,
    #[error("Transition in progress")]
    Busy,
    #[error("Slide {index} is already active")]
    AlreadyActive { index: usize },
    #[error("Slide index {index} out of range (total: {total})")]
    OutOfRange { index: usize, total: usize },
    #[error("No slide beyond the {edge} edge")]
    AtBoundary { edge: &'static str },
}

/// Lifecycle misuse errors
#[derive(Debug, Error)]
pub enum CarouselError {
    #[error("Carousel is still running; destroy it before reinitializing")]
    AlreadyRunning,
    #[error("Carousel container has no slides")]
    Disabled,
    #[error("Invalid carousel configuration: {0}")]
    Config(ConfigError),
}

impl From<ConfigError> for CarouselError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}
