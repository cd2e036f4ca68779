// src/carousel/transition.rs
//! Single-flight slide transitions.

use embassy_time::{Duration, Instant};
use log::{debug, trace};

use super::state::{CarouselState, DragGrant, TransitionPhase};
use super::view::{CarouselView, Motion, SlideVisual};
use super::{Direction, NavigationError, Transitioned};
use crate::config::{CarouselConfig, TransitionStyle};

/// Owns [`CarouselState`] and serializes every navigation through the
/// animation lock.
///
/// A request made while a transition is running is rejected with
/// [`NavigationError::Busy`]; it is not queued. Callers retry on their own
/// cadence (the timer simply fires again next period).
pub struct TransitionController {
    state: CarouselState,
    duration: Duration,
    wrap: bool,
    style: TransitionStyle,
}

impl TransitionController {
    pub fn new(total: usize, config: &CarouselConfig) -> Self {
        Self {
            state: CarouselState::new(total),
            duration: config.transition_duration(),
            wrap: config.wrap,
            style: config.transition_style,
        }
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    /// Hand out write access to the drag fields only.
    pub fn drag_grant(&mut self) -> DragGrant<'_> {
        DragGrant::new(&mut self.state)
    }

    /// Deadline of the running transition, if any.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state.phase() {
            TransitionPhase::Animating { deadline, .. } => Some(deadline),
            TransitionPhase::Idle => None,
        }
    }

    /// Render the resting layout: current slide active, all others hidden.
    pub fn show_initial<V: CarouselView + ?Sized>(&self, view: &mut V) {
        for index in 0..self.state.total() {
            let visual = if index == self.state.current_index() {
                SlideVisual::Active
            } else {
                SlideVisual::Hidden
            };
            view.apply_slide(index, visual);
        }
    }

    /// Target of a forward step, honoring the wrap setting.
    pub fn next_index(&self) -> Result<usize, NavigationError> {
        let total = self.state.total();
        if total == 0 {
            return Err(NavigationError::Disabled);
        }
        let current = self.state.current_index();
        if current + 1 < total {
            Ok(current + 1)
        } else if self.wrap {
            Ok((current + 1) % total)
        } else {
            Err(NavigationError::AtBoundary { edge: "last" })
        }
    }

    /// Target of a backward step, honoring the wrap setting.
    pub fn prev_index(&self) -> Result<usize, NavigationError> {
        let total = self.state.total();
        if total == 0 {
            return Err(NavigationError::Disabled);
        }
        let current = self.state.current_index();
        if current > 0 {
            Ok(current - 1)
        } else if self.wrap {
            Ok((current + total - 1) % total)
        } else {
            Err(NavigationError::AtBoundary { edge: "first" })
        }
    }

    pub fn request_next<V: CarouselView + ?Sized>(
        &mut self,
        now: Instant,
        view: &mut V,
    ) -> Result<(), NavigationError> {
        let target = self.next_index()?;
        self.request_go_to(target, Direction::Next, now, view)
    }

    pub fn request_prev<V: CarouselView + ?Sized>(
        &mut self,
        now: Instant,
        view: &mut V,
    ) -> Result<(), NavigationError> {
        let target = self.prev_index()?;
        self.request_go_to(target, Direction::Prev, now, view)
    }

    /// Start a transition to `target` if the lock is free.
    ///
    /// On success the current slide is marked outgoing and the target
    /// incoming; the index itself only moves when [`poll`](Self::poll)
    /// observes the deadline.
    pub fn request_go_to<V: CarouselView + ?Sized>(
        &mut self,
        target: usize,
        direction: Direction,
        now: Instant,
        view: &mut V,
    ) -> Result<(), NavigationError> {
        let total = self.state.total();
        if total == 0 {
            return Err(NavigationError::Disabled);
        }
        if target >= total {
            return Err(NavigationError::OutOfRange {
                index: target,
                total,
            });
        }
        if self.state.is_animating() {
            return Err(NavigationError::Busy);
        }
        let from = self.state.current_index();
        if target == from {
            return Err(NavigationError::AlreadyActive { index: target });
        }

        let deadline = now + self.duration;
        self.state.set_phase(TransitionPhase::Animating {
            from,
            to: target,
            direction,
            started_at: now,
            deadline,
        });
        debug!(
            "Transition {} -> {} ({:?}) until {}ms",
            from,
            target,
            direction,
            deadline.as_millis()
        );

        view.apply_slide(from, SlideVisual::Outgoing(self.motion(direction, 0.0)));
        view.apply_slide(target, SlideVisual::Incoming(self.motion(direction, 0.0)));
        Ok(())
    }

    /// Advance the running transition.
    ///
    /// Emits interpolated frames while the lock is held and completes the
    /// transition once `now` reaches the deadline, returning the single
    /// [`Transitioned`] notification for it.
    pub fn poll<V: CarouselView + ?Sized>(
        &mut self,
        now: Instant,
        view: &mut V,
    ) -> Option<Transitioned> {
        let TransitionPhase::Animating {
            from,
            to,
            direction,
            started_at,
            ..
        } = self.state.phase()
        else {
            return None;
        };

        if let Some(done) = self.complete_if_due(now) {
            view.apply_slide(done.from, SlideVisual::Hidden);
            let resting = if self.state.is_dragging() {
                SlideVisual::Dragged {
                    offset_px: self.state.drag_offset_px(),
                }
            } else {
                SlideVisual::Active
            };
            view.apply_slide(done.to, resting);
            return Some(done);
        }

        let progress = self.progress(started_at, now);
        trace!("Transition {} -> {} at {}", from, to, progress);
        view.apply_slide(from, SlideVisual::Outgoing(self.motion(direction, progress)));
        view.apply_slide(to, SlideVisual::Incoming(self.motion(direction, progress)));
        None
    }

    /// Complete a due transition without touching any view.
    ///
    /// Used after teardown: the lock is still released by the transition's
    /// own deadline, but nothing is rendered or announced.
    pub fn release(&mut self, now: Instant) -> Option<Transitioned> {
        self.complete_if_due(now)
    }

    /// Mirror the drag fields onto the current slide while at rest.
    pub fn apply_drag_visual<V: CarouselView + ?Sized>(&self, view: &mut V) {
        if self.state.total() == 0 || self.state.is_animating() {
            return;
        }
        let visual = if self.state.is_dragging() {
            SlideVisual::Dragged {
                offset_px: self.state.drag_offset_px(),
            }
        } else {
            SlideVisual::Active
        };
        view.apply_slide(self.state.current_index(), visual);
    }

    fn complete_if_due(&mut self, now: Instant) -> Option<Transitioned> {
        let TransitionPhase::Animating {
            from,
            to,
            direction,
            deadline,
            ..
        } = self.state.phase()
        else {
            return None;
        };
        if now < deadline {
            return None;
        }

        self.state.set_current_index(to);
        self.state.set_phase(TransitionPhase::Idle);
        if !self.state.is_dragging() {
            self.state.clear_drag_offset();
        }
        debug!("Transition {} -> {} complete", from, to);
        Some(Transitioned {
            from,
            to,
            direction,
        })
    }

    fn progress(&self, started_at: Instant, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(started_at).as_micros() as f32;
        let total = self.duration.as_micros().max(1) as f32;
        let progress = elapsed / total;
        if progress > 1.0 { 1.0 } else { progress }
    }

    fn motion(&self, direction: Direction, progress: f32) -> Motion {
        Motion {
            direction,
            progress,
            style: self.style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::test_support::{RecordingView, at};

    fn controller(total: usize, wrap: bool) -> (TransitionController, RecordingView) {
        let config = CarouselConfig::default().with_loop(wrap);
        let controller = TransitionController::new(total, &config);
        let mut view = RecordingView::new(total, total);
        controller.show_initial(&mut view);
        (controller, view)
    }

    /// Drive the controller to `target` and let the transition finish.
    fn settle_on(controller: &mut TransitionController, view: &mut RecordingView, target: usize) {
        let direction = Direction::between(controller.state().current_index(), target);
        controller
            .request_go_to(target, direction, at(0), view)
            .unwrap();
        assert!(controller.poll(at(500), view).is_some());
    }

    #[test]
    fn test_initial_layout_has_single_active_slide() {
        let (controller, view) = controller(4, true);
        assert_eq!(controller.state().current_index(), 0);
        assert_eq!(view.active_slides(), [0]);
        assert_eq!(view.visible_slides(), 1);
    }

    #[test]
    fn test_index_changes_only_on_completion() {
        let (mut controller, mut view) = controller(4, true);
        controller.request_next(at(1000), &mut view).unwrap();
        assert!(controller.state().is_animating());
        assert_eq!(controller.state().current_index(), 0);
        assert!(view.visible_slides() <= 2);

        assert!(controller.poll(at(1499), &mut view).is_none());
        assert_eq!(controller.state().current_index(), 0);

        let done = controller.poll(at(1500), &mut view).unwrap();
        assert_eq!(
            done,
            Transitioned {
                from: 0,
                to: 1,
                direction: Direction::Next
            }
        );
        assert_eq!(controller.state().current_index(), 1);
        assert!(!controller.state().is_animating());
        assert_eq!(view.active_slides(), [1]);
        assert_eq!(view.visible_slides(), 1);
    }

    #[test]
    fn test_completion_is_reported_once() {
        let (mut controller, mut view) = controller(3, true);
        controller.request_next(at(0), &mut view).unwrap();
        assert!(controller.poll(at(600), &mut view).is_some());
        assert!(controller.poll(at(700), &mut view).is_none());
    }

    #[test]
    fn test_second_request_inside_lock_window_is_rejected() {
        let (mut controller, mut view) = controller(4, true);
        controller.request_next(at(0), &mut view).unwrap();
        assert_eq!(
            controller.request_next(at(100), &mut view),
            Err(NavigationError::Busy)
        );
        controller.poll(at(500), &mut view);
        assert_eq!(controller.state().current_index(), 1);
    }

    #[test]
    fn test_wraparound_with_loop() {
        let (mut controller, mut view) = controller(4, true);
        settle_on(&mut controller, &mut view, 3);
        controller.request_next(at(1000), &mut view).unwrap();
        controller.poll(at(1500), &mut view);
        assert_eq!(controller.state().current_index(), 0);
    }

    #[test]
    fn test_no_wraparound_without_loop() {
        let (mut controller, mut view) = controller(4, false);
        settle_on(&mut controller, &mut view, 3);
        assert_eq!(
            controller.request_next(at(1000), &mut view),
            Err(NavigationError::AtBoundary { edge: "last" })
        );
        assert_eq!(controller.state().current_index(), 3);
        assert!(!controller.state().is_animating());
    }

    #[test]
    fn test_prev_wraps_from_first_slide() {
        let (mut controller, mut view) = controller(4, true);
        controller.request_prev(at(0), &mut view).unwrap();
        controller.poll(at(500), &mut view);
        assert_eq!(controller.state().current_index(), 3);
    }

    #[test]
    fn test_out_of_range_and_same_index_rejected() {
        let (mut controller, mut view) = controller(4, true);
        let writes = view.writes;
        assert_eq!(
            controller.request_go_to(4, Direction::Next, at(0), &mut view),
            Err(NavigationError::OutOfRange { index: 4, total: 4 })
        );
        assert_eq!(
            controller.request_go_to(0, Direction::Next, at(0), &mut view),
            Err(NavigationError::AlreadyActive { index: 0 })
        );
        assert_eq!(view.writes, writes);
        assert_eq!(controller.state().current_index(), 0);
    }

    #[test]
    fn test_single_and_empty_carousels_never_move() {
        let (mut single, mut view) = controller(1, true);
        assert!(single.request_next(at(0), &mut view).is_err());
        assert!(single.request_prev(at(0), &mut view).is_err());
        assert!(!single.state().is_animating());

        let (mut empty, mut view) = controller(0, true);
        assert_eq!(
            empty.request_next(at(0), &mut view),
            Err(NavigationError::Disabled)
        );
    }

    #[test]
    fn test_progress_frames_are_linear() {
        let (mut controller, mut view) = controller(3, true);
        controller.request_next(at(0), &mut view).unwrap();
        controller.poll(at(250), &mut view);
        match view.slides[1] {
            SlideVisual::Incoming(motion) => {
                let error = motion.progress - 0.5;
                assert!(error < 1e-3 && error > -1e-3);
                assert_eq!(motion.direction, Direction::Next);
            }
            other => panic!("unexpected visual {:?}", other),
        }
    }

    #[test]
    fn test_release_completes_without_view_writes() {
        let (mut controller, mut view) = controller(3, true);
        controller.request_next(at(0), &mut view).unwrap();
        assert!(controller.release(at(100)).is_none());
        assert!(controller.state().is_animating());
        let done = controller.release(at(500)).unwrap();
        assert_eq!(done.to, 1);
        assert!(!controller.state().is_animating());
    }
}
