// src/carousel/scheduler.rs
//! Auto-advance timer
//!
//! One periodic timer per carousel instance. It only runs while no pause
//! reason is set and no post-gesture cooldown is pending. The handle is
//! replaced on every start, so a reset always restarts from a full interval
//! instead of inheriting the previous schedule.

use embassy_time::{Duration, Instant};
use log::{debug, trace, warn};

use crate::config::CarouselConfig;

/// Independent reasons for holding the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseReason {
    /// Pointer is over the carousel region.
    Hover,
    /// A touch gesture is being tracked.
    Drag,
    /// The page is not visible.
    Hidden,
    /// Paused through the public API.
    Explicit,
}

impl PauseReason {
    const fn bit(self) -> u8 {
        match self {
            Self::Hover => 1 << 0,
            Self::Drag => 1 << 1,
            Self::Hidden => 1 << 2,
            Self::Explicit => 1 << 3,
        }
    }
}

/// Live timer. At most one exists per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    id: u32,
    next_fire: Instant,
}

impl TimerHandle {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn next_fire(&self) -> Instant {
        self.next_fire
    }
}

pub struct AutoAdvanceScheduler {
    interval: Duration,
    cooldown: Duration,
    timer: Option<TimerHandle>,
    paused: u8,
    resume_at: Option<Instant>,
    restart_pending: bool,
    next_id: u32,
    enabled: bool,
}

impl AutoAdvanceScheduler {
    /// A zero interval yields a disabled scheduler.
    pub fn new(config: &CarouselConfig) -> Self {
        let interval = config.auto_advance_interval();
        if interval == Duration::from_ticks(0) {
            warn!("Auto-advance interval is zero, timer disabled");
        }
        Self {
            interval,
            cooldown: config.resume_cooldown(),
            timer: None,
            paused: 0,
            resume_at: None,
            restart_pending: false,
            next_id: 0,
            enabled: interval > Duration::from_ticks(0),
        }
    }

    /// A scheduler on which every call is a no-op.
    pub fn disabled(config: &CarouselConfig) -> Self {
        Self {
            enabled: false,
            ..Self::new(config)
        }
    }

    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether a pause reason or a pending cooldown keeps the timer off.
    pub fn is_blocked(&self) -> bool {
        self.paused != 0 || self.resume_at.is_some()
    }

    /// Earliest instant at which [`poll`](Self::poll) has work to do.
    pub fn deadline(&self) -> Option<Instant> {
        let fire = self.timer.map(|timer| timer.next_fire);
        match (fire, self.resume_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Create the timer, first firing one interval after `now`.
    ///
    /// No-op when already running or blocked. Returns whether a new handle
    /// was created.
    pub fn start(&mut self, now: Instant) -> bool {
        if !self.enabled || self.timer.is_some() {
            return false;
        }
        if self.is_blocked() {
            trace!("Auto-advance start deferred (paused={:#06b})", self.paused);
            return false;
        }
        self.next_id = self.next_id.wrapping_add(1);
        let handle = TimerHandle {
            id: self.next_id,
            next_fire: now + self.interval,
        };
        debug!(
            "Auto-advance timer #{} armed for {}ms",
            handle.id,
            handle.next_fire.as_millis()
        );
        self.timer = Some(handle);
        true
    }

    /// Cancel the timer if present.
    pub fn stop(&mut self) {
        if let Some(handle) = self.timer.take() {
            debug!("Auto-advance timer #{} cancelled", handle.id);
        }
    }

    /// Restart from a full interval.
    pub fn reset(&mut self, now: Instant) {
        self.stop();
        self.start(now);
    }

    pub fn pause(&mut self, reason: PauseReason) {
        if !self.enabled {
            return;
        }
        self.paused |= reason.bit();
        self.stop();
    }

    /// Clear `reason` and restart immediately if nothing else blocks.
    pub fn resume(&mut self, reason: PauseReason, now: Instant) {
        if !self.enabled {
            return;
        }
        self.paused &= !reason.bit();
        self.start(now);
    }

    /// Clear `reason` but hold the timer for the cooldown period.
    pub fn resume_after_cooldown(&mut self, reason: PauseReason, now: Instant) {
        if !self.enabled {
            return;
        }
        self.paused &= !reason.bit();
        self.stop();
        let resume_at = now + self.cooldown;
        debug!("Auto-advance resumes at {}ms", resume_at.as_millis());
        self.resume_at = Some(resume_at);
    }

    /// Stop now and restart once the matching transition has completed.
    pub fn defer_until_transitioned(&mut self) {
        if !self.enabled {
            return;
        }
        self.stop();
        self.restart_pending = true;
    }

    /// Honor a deferred restart. Called after the indicators were synced.
    pub fn on_transitioned(&mut self, now: Instant) {
        if self.restart_pending {
            self.restart_pending = false;
            self.start(now);
        }
    }

    /// Expire the cooldown and fire the timer. Returns `true` on a firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }

        if let Some(resume_at) = self.resume_at {
            if now >= resume_at {
                self.resume_at = None;
                self.start(now);
            }
        }

        let Some(handle) = self.timer.as_mut() else {
            return false;
        };
        if now < handle.next_fire {
            return false;
        }

        let missed = (now - handle.next_fire).as_ticks() / self.interval.as_ticks();
        handle.next_fire =
            handle.next_fire + Duration::from_ticks(self.interval.as_ticks() * (missed + 1));
        trace!("Auto-advance timer #{} fired", handle.id);
        true
    }

    /// Cancel everything and ignore all further calls.
    pub fn shutdown(&mut self) {
        self.stop();
        self.resume_at = None;
        self.restart_pending = false;
        self.enabled = false;
    }
}
