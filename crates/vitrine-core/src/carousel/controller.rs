// src/carousel/controller.rs
//! Composition root for one carousel instance.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Instant;
use embedded_graphics::prelude::Size;
use log::{debug, info, trace, warn};

use super::gesture::{GestureOutcome, GesturePhase, GestureTracker};
use super::indicators::IndicatorSync;
use super::input::{CarouselInput, InputReceiver};
use super::scheduler::{AutoAdvanceScheduler, PauseReason};
use super::state::CarouselState;
use super::transition::TransitionController;
use super::view::CarouselView;
use super::{CarouselError, Direction, NavigationError, Transitioned};
use crate::config::CarouselConfig;
use crate::geometry::Geometry;
use crate::ui::TouchEvent;

/// Where an instance is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Accepting input and driving the view.
    Running,
    /// No slides were found. Every call is a no-op.
    Disabled,
    /// Torn down. Only an in-flight transition is still allowed to finish.
    Destroyed,
}

#[derive(Debug, Clone, Copy)]
enum NavRequest {
    Next,
    Prev,
    GoTo(usize),
}

/// Owns the view and every carousel component, and routes input to them.
///
/// The host loop feeds inputs through [`handle`](Self::handle) or
/// [`drain`](Self::drain), calls [`poll`](Self::poll) every frame and may
/// sleep until [`next_deadline`](Self::next_deadline) between frames.
pub struct SliderController<V: CarouselView> {
    view: V,
    config: CarouselConfig,
    geometry: Geometry,
    lifecycle: Lifecycle,
    transition: TransitionController,
    gesture: GestureTracker,
    scheduler: AutoAdvanceScheduler,
    indicators: IndicatorSync,
}

impl<V: CarouselView> SliderController<V> {
    /// Build and start a carousel over `view`.
    ///
    /// An invalid configuration is replaced with the defaults. A view
    /// without slides yields a [`Lifecycle::Disabled`] handle.
    pub fn initialize(view: V, config: CarouselConfig, now: Instant) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!(" {}; falling back to default carousel config", err);
                CarouselConfig::default()
            }
        };
        Self::assemble(view, config, now)
    }

    /// Like [`initialize`](Self::initialize) but rejects an invalid
    /// configuration instead of replacing it.
    pub fn try_initialize(
        view: V,
        config: CarouselConfig,
        now: Instant,
    ) -> Result<Self, CarouselError> {
        config.validate()?;
        Ok(Self::assemble(view, config, now))
    }

    fn assemble(view: V, config: CarouselConfig, now: Instant) -> Self {
        let geometry = Geometry::probe(&view);
        let mut this = Self {
            view,
            config,
            geometry,
            lifecycle: Lifecycle::Disabled,
            transition: TransitionController::new(geometry.total, &config),
            gesture: GestureTracker::new(&config),
            scheduler: AutoAdvanceScheduler::disabled(&config),
            indicators: IndicatorSync::new(config.wrap),
        };
        this.boot(now);
        this
    }

    fn boot(&mut self, now: Instant) {
        self.geometry = Geometry::probe(&self.view);
        let total = self.geometry.total;
        self.transition = TransitionController::new(total, &self.config);
        self.gesture = GestureTracker::new(&self.config);

        if self.geometry.is_empty() {
            warn!(" Carousel container has no slides; running disabled");
            self.scheduler = AutoAdvanceScheduler::disabled(&self.config);
            self.lifecycle = Lifecycle::Disabled;
            return;
        }

        self.scheduler = if self.config.auto_advance && total > 1 {
            AutoAdvanceScheduler::new(&self.config)
        } else {
            AutoAdvanceScheduler::disabled(&self.config)
        };
        self.lifecycle = Lifecycle::Running;

        self.transition.show_initial(&mut self.view);
        self.indicators.show_initial(total, &mut self.view);
        self.scheduler.start(now);
        info!(
            " Carousel initialized: {} slides, {}x{}",
            total, self.geometry.container.width, self.geometry.container.height
        );
    }

    /// Start again from slide 0 after [`destroy`](Self::destroy).
    pub fn reinitialize(&mut self, now: Instant) -> Result<(), CarouselError> {
        match self.lifecycle {
            Lifecycle::Destroyed => {
                self.boot(now);
                Ok(())
            }
            Lifecycle::Running => Err(CarouselError::AlreadyRunning),
            Lifecycle::Disabled => Err(CarouselError::Disabled),
        }
    }

    /// Stop the timer, drop gesture state and detach from the view.
    ///
    /// A transition already in flight still releases its lock on a later
    /// [`poll`](Self::poll), without writing to the view.
    ///
    /// A disabled handle stays disabled.
    pub fn destroy(&mut self) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        self.scheduler.shutdown();
        let mut grant = self.transition.drag_grant();
        self.gesture.abort(&mut grant);
        self.lifecycle = Lifecycle::Destroyed;
        info!(" Carousel destroyed");
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    pub fn handle(&mut self, input: CarouselInput, now: Instant) {
        if self.lifecycle != Lifecycle::Running {
            trace!("Dropping {:?} while {:?}", input, self.lifecycle);
            return;
        }

        match input {
            CarouselInput::PrevButton => {
                self.navigate_manual(NavRequest::Prev, now).ok();
            }
            CarouselInput::NextButton => {
                self.navigate_manual(NavRequest::Next, now).ok();
            }
            CarouselInput::Indicator(index) => {
                self.navigate_manual(NavRequest::GoTo(index), now).ok();
            }
            CarouselInput::Touch(event) => self.handle_touch(event, now),
            CarouselInput::PointerEnter => self.scheduler.pause(PauseReason::Hover),
            CarouselInput::PointerLeave => self.scheduler.resume(PauseReason::Hover, now),
            CarouselInput::VisibilityChanged { visible: true } => {
                self.scheduler.resume(PauseReason::Hidden, now)
            }
            CarouselInput::VisibilityChanged { visible: false } => {
                self.scheduler.pause(PauseReason::Hidden)
            }
            CarouselInput::Resized(size) => self.on_resize(size, now),
            CarouselInput::Pause => self.pause(),
            CarouselInput::Resume => self.resume(now),
        }
    }

    /// Apply every queued input in arrival order. Returns how many there were.
    pub fn drain<M: RawMutex>(&mut self, receiver: &InputReceiver<'_, M>, now: Instant) -> usize {
        let mut handled = 0;
        while let Ok(input) = receiver.try_receive() {
            self.handle(input, now);
            handled += 1;
        }
        handled
    }

    fn handle_touch(&mut self, event: TouchEvent, now: Instant) {
        let x = i32::from(event.point().x);
        match event {
            TouchEvent::Press(_) => {
                let mut grant = self.transition.drag_grant();
                if self.gesture.on_start(x, now, &mut grant).is_some() {
                    debug!(" Stale gesture replaced by new press");
                }
                self.scheduler.pause(PauseReason::Drag);
                self.transition.apply_drag_visual(&mut self.view);
            }
            TouchEvent::Drag(_) => {
                let mut grant = self.transition.drag_grant();
                if self.gesture.on_move(x, &mut grant) {
                    self.transition.apply_drag_visual(&mut self.view);
                }
            }
            TouchEvent::Release(_) => {
                let mut grant = self.transition.drag_grant();
                if let Some(outcome) = self.gesture.on_end(x, &mut grant) {
                    self.finish_gesture(outcome, now);
                }
            }
        }
    }

    fn finish_gesture(&mut self, outcome: GestureOutcome, now: Instant) {
        self.scheduler.resume_after_cooldown(PauseReason::Drag, now);
        if let GestureOutcome::Committed(direction) = outcome {
            let request = match direction {
                Direction::Next => NavRequest::Next,
                Direction::Prev => NavRequest::Prev,
            };
            self.navigate_manual(request, now).ok();
        }
        self.transition.apply_drag_visual(&mut self.view);
    }

    fn on_resize(&mut self, container: Size, now: Instant) {
        debug!(
            " Carousel resized to {}x{}",
            container.width, container.height
        );
        self.geometry.container = container;
        self.view.relayout(container);
        self.scheduler.reset(now);
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn next(&mut self, now: Instant) -> Result<(), NavigationError> {
        self.ensure_running()?;
        self.navigate_manual(NavRequest::Next, now)
    }

    pub fn prev(&mut self, now: Instant) -> Result<(), NavigationError> {
        self.ensure_running()?;
        self.navigate_manual(NavRequest::Prev, now)
    }

    pub fn go_to(&mut self, index: usize, now: Instant) -> Result<(), NavigationError> {
        self.ensure_running()?;
        self.navigate_manual(NavRequest::GoTo(index), now)
    }

    pub fn pause(&mut self) {
        if self.lifecycle == Lifecycle::Running {
            self.scheduler.pause(PauseReason::Explicit);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if self.lifecycle == Lifecycle::Running {
            self.scheduler.resume(PauseReason::Explicit, now);
        }
    }

    fn ensure_running(&self) -> Result<(), NavigationError> {
        match self.lifecycle {
            Lifecycle::Running => Ok(()),
            Lifecycle::Disabled => Err(NavigationError::Disabled),
            Lifecycle::Destroyed => Err(NavigationError::Destroyed),
        }
    }

    /// User-initiated navigation: holds the timer until the transition lands.
    fn navigate_manual(&mut self, request: NavRequest, now: Instant) -> Result<(), NavigationError> {
        let result = self.request(request, now);
        match result {
            Ok(()) => self.scheduler.defer_until_transitioned(),
            Err(err) => debug!(" Navigation {:?} rejected: {}", request, err),
        }
        result
    }

    fn request(&mut self, request: NavRequest, now: Instant) -> Result<(), NavigationError> {
        match request {
            NavRequest::Next => self.transition.request_next(now, &mut self.view),
            NavRequest::Prev => self.transition.request_prev(now, &mut self.view),
            NavRequest::GoTo(index) => {
                let direction = Direction::between(self.current_index(), index);
                self.transition
                    .request_go_to(index, direction, now, &mut self.view)
            }
        }
    }

    fn auto_advance(&mut self, now: Instant) {
        let result = match self.transition.next_index() {
            Ok(_) => self.transition.request_next(now, &mut self.view),
            Err(NavigationError::AtBoundary { .. }) => {
                debug!(" Auto-advance reached the last slide; rewinding");
                self.transition
                    .request_go_to(0, Direction::Prev, now, &mut self.view)
            }
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            debug!(" Auto-advance skipped: {}", err);
        }
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Advance every timed component to `now`.
    ///
    /// Completion of a transition is announced to the indicators first and
    /// then to the scheduler; the notification is also returned.
    pub fn poll(&mut self, now: Instant) -> Option<Transitioned> {
        match self.lifecycle {
            Lifecycle::Running => {}
            Lifecycle::Disabled => return None,
            Lifecycle::Destroyed => {
                if let Some(done) = self.transition.release(now) {
                    debug!(" Transition {} -> {} settled after teardown", done.from, done.to);
                }
                return None;
            }
        }

        let transitioned = self.transition.poll(now, &mut self.view);
        if let Some(done) = &transitioned {
            self.indicators
                .on_transitioned(done, self.geometry.total, &mut self.view);
            self.scheduler.on_transitioned(now);
        }

        let mut grant = self.transition.drag_grant();
        if self.gesture.check_timeout(now, &mut grant).is_some() {
            self.scheduler.resume_after_cooldown(PauseReason::Drag, now);
            self.transition.apply_drag_visual(&mut self.view);
        }

        if self.scheduler.poll(now) {
            self.auto_advance(now);
        }

        transitioned
    }

    /// Earliest instant at which [`poll`](Self::poll) has work to do.
    ///
    /// Interpolated transition frames are not deadlines; hosts that animate
    /// keep polling at their frame rate while [`is_animating`](Self::is_animating).
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.lifecycle {
            Lifecycle::Disabled => None,
            Lifecycle::Destroyed => self.transition.deadline(),
            Lifecycle::Running => [
                self.transition.deadline(),
                self.gesture.deadline(),
                self.scheduler.deadline(),
            ]
            .into_iter()
            .flatten()
            .min(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn current_index(&self) -> usize {
        self.transition.state().current_index()
    }

    pub fn total(&self) -> usize {
        self.transition.state().total()
    }

    pub fn is_animating(&self) -> bool {
        self.transition.state().is_animating()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn state(&self) -> &CarouselState {
        self.transition.state()
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    pub fn scheduler(&self) -> &AutoAdvanceScheduler {
        &self.scheduler
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access for drawing. Carousel state cannot be changed through it.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }
}
