//! Flicker frame pacing.
//!
//! Decides when the next regular flicker frame is due, with a random
//! interval between frames. The caller is responsible for sleeping between
//! ticks.

use embassy_time::{Duration, Instant};

use crate::config::ConfigError;
use crate::entropy::Entropy;

/// Interval range between two flicker frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlickerTimings {
    /// Shortest gap between frames
    pub min_interval: Duration,
    /// Longest gap between frames
    pub max_interval: Duration,
}

impl FlickerTimings {
    /// Restless flicker, 50-200 ms between frames
    pub const DEFAULT: Self = Self {
        min_interval: Duration::from_millis(50),
        max_interval: Duration::from_millis(200),
    };

    /// Slow glow, one frame per second
    pub const STEADY: Self = Self {
        min_interval: Duration::from_millis(1000),
        max_interval: Duration::from_millis(1000),
    };

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_interval.as_ticks() == 0 {
            return Err(ConfigError::ZeroFlickerInterval);
        }
        if self.min_interval.as_ticks() > self.max_interval.as_ticks() {
            return Err(ConfigError::InvertedFlickerInterval {
                min_ms: self.min_interval.as_millis(),
                max_ms: self.max_interval.as_millis(),
            });
        }
        Ok(())
    }
}

impl Default for FlickerTimings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

impl FrameResult {
    fn until(next_deadline: Instant, now: Instant) -> Self {
        Self {
            next_deadline,
            sleep_duration: next_deadline.saturating_duration_since(now),
        }
    }
}

/// Tracks the deadline of the next flicker frame
///
/// If the loop falls behind by more than two maximum intervals (for example
/// after a long flame-up), the backlog is skipped instead of rendered in a
/// burst.
#[derive(Debug, Clone)]
pub struct FlickerScheduler {
    timings: FlickerTimings,
    next_frame: Instant,
}

impl FlickerScheduler {
    /// The first frame is due immediately
    pub const fn new(timings: FlickerTimings) -> Self {
        Self {
            timings,
            next_frame: Instant::from_millis(0),
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    pub fn next_deadline(&self) -> Instant {
        self.next_frame
    }

    /// Timing info without scheduling anything
    pub fn pending(&self, now: Instant) -> FrameResult {
        FrameResult::until(self.next_frame, now)
    }

    /// Book the next frame after one was rendered at `now`
    pub fn advance<E: Entropy>(&mut self, now: Instant, entropy: &mut E) -> FrameResult {
        // Drift correction: if we've fallen too far behind, reset to now
        let max_drift = self.timings.max_interval + self.timings.max_interval;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        let interval =
            entropy.next_duration_in(self.timings.min_interval, self.timings.max_interval);
        self.next_frame += interval;

        // Still behind after one interval: render again right away
        FrameResult::until(self.next_frame, now)
    }

    pub fn timings(&self) -> FlickerTimings {
        self.timings
    }
}
