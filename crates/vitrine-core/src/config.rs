// src/config.rs
//! Carousel configuration
//!
//! [`CarouselConfig`] carries every tunable of the engine. It is plain data
//! with serde derives so a device can keep a postcard blob in flash and the
//! simulator can build one with the `with_*` setters.

use alloc::vec::Vec;
use embassy_time::Duration;
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

/// Period between automatic advances.
pub const DEFAULT_AUTO_ADVANCE_INTERVAL_MS: u32 = 5000;
/// Lock-hold duration of a single transition.
pub const DEFAULT_TRANSITION_DURATION_MS: u32 = 500;
/// Minimum horizontal drag distance that commits a swipe.
pub const DEFAULT_SWIPE_THRESHOLD_PX: u16 = 50;
/// Scale applied to the raw drag distance for live feedback.
pub const DEFAULT_DRAG_DAMPING_FACTOR: f32 = 0.5;
/// Delay before auto-advance resumes after a gesture.
pub const DEFAULT_RESUME_COOLDOWN_MS: u32 = 3000;
/// Drag distance below which the slide does not follow the finger.
pub const DEFAULT_DRAG_DEAD_ZONE_PX: u16 = 10;
/// Gestures tracked longer than this without a release are cancelled.
pub const DEFAULT_GESTURE_TIMEOUT_MS: u32 = 4000;

/// How a transition moves the outgoing and incoming slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransitionStyle {
    /// Translate the slides horizontally along the exit vector.
    #[default]
    Slide,
    /// Cross-fade opacity in place.
    Fade,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Auto-advance interval must be non-zero")]
    ZeroInterval,
    #[error("Transition duration must be non-zero")]
    ZeroDuration,
    #[error("Drag damping factor must be in (0, 1]")]
    InvalidDamping,
    #[error("Gesture timeout must be non-zero")]
    ZeroTimeout,
    #[error("Config decode failed: {0}")]
    Decode(postcard::Error),
    #[error("Config encode failed: {0}")]
    Encode(postcard::Error),
}

/// Tunables for one carousel instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub auto_advance_interval_ms: u32,
    pub transition_duration_ms: u32,
    pub swipe_threshold_px: u16,
    pub drag_damping_factor: f32,
    pub resume_cooldown_ms: u32,
    /// Whether navigation wraps past the last/first slide.
    #[serde(rename = "loop")]
    pub wrap: bool,
    pub drag_dead_zone_px: u16,
    pub gesture_timeout_ms: u32,
    /// Start the auto-advance timer at initialization.
    pub auto_advance: bool,
    pub transition_style: TransitionStyle,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_advance_interval_ms: DEFAULT_AUTO_ADVANCE_INTERVAL_MS,
            transition_duration_ms: DEFAULT_TRANSITION_DURATION_MS,
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            drag_damping_factor: DEFAULT_DRAG_DAMPING_FACTOR,
            resume_cooldown_ms: DEFAULT_RESUME_COOLDOWN_MS,
            wrap: true,
            drag_dead_zone_px: DEFAULT_DRAG_DEAD_ZONE_PX,
            gesture_timeout_ms: DEFAULT_GESTURE_TIMEOUT_MS,
            auto_advance: true,
            transition_style: TransitionStyle::Slide,
        }
    }
}

impl CarouselConfig {
    pub fn with_auto_advance_interval_ms(mut self, ms: u32) -> Self {
        self.auto_advance_interval_ms = ms;
        self
    }

    pub fn with_transition_duration_ms(mut self, ms: u32) -> Self {
        self.transition_duration_ms = ms;
        self
    }

    pub fn with_swipe_threshold_px(mut self, px: u16) -> Self {
        self.swipe_threshold_px = px;
        self
    }

    pub fn with_drag_damping_factor(mut self, factor: f32) -> Self {
        self.drag_damping_factor = factor;
        self
    }

    pub fn with_resume_cooldown_ms(mut self, ms: u32) -> Self {
        self.resume_cooldown_ms = ms;
        self
    }

    /// Enable or disable wraparound navigation.
    pub fn with_loop(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_gesture_timeout_ms(mut self, ms: u32) -> Self {
        self.gesture_timeout_ms = ms;
        self
    }

    pub fn with_auto_advance(mut self, enabled: bool) -> Self {
        self.auto_advance = enabled;
        self
    }

    pub fn with_transition_style(mut self, style: TransitionStyle) -> Self {
        self.transition_style = style;
        self
    }

    pub fn auto_advance_interval(&self) -> Duration {
        Duration::from_millis(self.auto_advance_interval_ms as u64)
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms as u64)
    }

    pub fn resume_cooldown(&self) -> Duration {
        Duration::from_millis(self.resume_cooldown_ms as u64)
    }

    pub fn gesture_timeout(&self) -> Duration {
        Duration::from_millis(self.gesture_timeout_ms as u64)
    }

    /// Check that every option is usable by the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auto_advance_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.transition_duration_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        // Written so that NaN is rejected as well.
        if !(self.drag_damping_factor > 0.0 && self.drag_damping_factor <= 1.0) {
            return Err(ConfigError::InvalidDamping);
        }
        if self.gesture_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Decode and validate a postcard-encoded configuration blob.
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }

    /// Encode this configuration as a postcard blob.
    pub fn to_postcard(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(ConfigError::Encode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = CarouselConfig::default();
        assert_eq!(config.auto_advance_interval_ms, 5000);
        assert_eq!(config.transition_duration_ms, 500);
        assert_eq!(config.swipe_threshold_px, 50);
        assert_eq!(config.drag_damping_factor, 0.5);
        assert_eq!(config.resume_cooldown_ms, 3000);
        assert!(config.wrap);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unusable_values() {
        let base = CarouselConfig::default();
        assert!(matches!(
            base.with_auto_advance_interval_ms(0).validate(),
            Err(ConfigError::ZeroInterval)
        ));
        assert!(matches!(
            base.with_transition_duration_ms(0).validate(),
            Err(ConfigError::ZeroDuration)
        ));
        assert!(matches!(
            base.with_drag_damping_factor(0.0).validate(),
            Err(ConfigError::InvalidDamping)
        ));
        assert!(matches!(
            base.with_drag_damping_factor(f32::NAN).validate(),
            Err(ConfigError::InvalidDamping)
        ));
        assert!(matches!(
            base.with_gesture_timeout_ms(0).validate(),
            Err(ConfigError::ZeroTimeout)
        ));
    }

    #[test]
    fn test_postcard_blob_preserves_loop_and_style() {
        let config = CarouselConfig::default()
            .with_loop(false)
            .with_transition_style(TransitionStyle::Fade)
            .with_auto_advance_interval_ms(8000);
        let bytes = config.to_postcard().unwrap();
        let decoded = CarouselConfig::from_postcard(&bytes).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_postcard_rejects_invalid_blob() {
        let bytes = CarouselConfig::default()
            .with_transition_duration_ms(0)
            .to_postcard()
            .unwrap();
        assert!(matches!(
            CarouselConfig::from_postcard(&bytes),
            Err(ConfigError::ZeroDuration)
        ));
        assert!(matches!(
            CarouselConfig::from_postcard(&[0xff]),
            Err(ConfigError::Decode(_))
        ));
    }
}
