//! Flame-up trigger policy
//!
//! Decides what a settled sensor trigger (or an ambient roll) turns into:
//! maybe a big flame, followed by a short random pause.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, block_for};
use log::{debug, info};

use crate::StripDriver;
use crate::color::{BIG_FLAME, Rgb};
use crate::config::ConfigError;
use crate::entropy::Entropy;
use crate::renderer::{FireRenderer, FlameEffectRequest};
use crate::shared::SharedRenderer;

/// Probability, look and timing of a flame-up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlameUpPolicy {
    /// Chance that a roll plays the flame (0.0..=1.0)
    pub probability: f32,
    /// Base color of the flame frame
    pub color: Rgb,
    /// How long the flame frame is held
    pub duration: Duration,
    /// Shortest pause after the flame
    pub pause_min: Duration,
    /// Longest pause after the flame
    pub pause_max: Duration,
}

/// A flame that won its roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlameUpPlan {
    pub request: FlameEffectRequest,
    pub pause: Duration,
}

/// What [`flame_up`] ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlameUpOutcome {
    /// The flame was shown, then the caller paused for `pause`
    Played { pause: Duration },
    /// The roll lost, nothing was drawn
    Skipped,
}

impl FlameUpPolicy {
    /// Reaction to the vibration sensor: 95 %, 0.9 s, 50-200 ms pause
    pub const SENSOR: Self = Self {
        probability: 0.95,
        color: BIG_FLAME,
        duration: Duration::from_millis(900),
        pause_min: Duration::from_millis(50),
        pause_max: Duration::from_millis(200),
    };

    /// Occasional unprompted flare: 10 % per frame, 0.2 s, no pause
    pub const AMBIENT: Self = Self {
        probability: 0.10,
        color: BIG_FLAME,
        duration: Duration::from_millis(200),
        pause_min: Duration::from_millis(0),
        pause_max: Duration::from_millis(0),
    };

    pub const fn request(&self) -> FlameEffectRequest {
        FlameEffectRequest {
            color: self.color,
            duration: self.duration,
        }
    }

    /// Roll the dice; `Some` if the flame should play
    pub fn roll<E: Entropy>(&self, entropy: &mut E) -> Option<FlameUpPlan> {
        if !entropy.chance(self.probability) {
            return None;
        }
        Some(FlameUpPlan {
            request: self.request(),
            pause: entropy.next_duration_in(self.pause_min, self.pause_max),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(ConfigError::ProbabilityOutOfRange(self.probability));
        }
        if self.duration.as_ticks() == 0 {
            return Err(ConfigError::ZeroFlameDuration);
        }
        if self.pause_min > self.pause_max {
            return Err(ConfigError::InvertedPause {
                min_ms: self.pause_min.as_millis(),
                max_ms: self.pause_max.as_millis(),
            });
        }
        Ok(())
    }
}

impl Default for FlameUpPolicy {
    fn default() -> Self {
        Self::SENSOR
    }
}

/// Maybe play a big flame, then pause before returning
///
/// Blocks for the flame duration plus the pause when the roll wins.
pub fn flame_up<D, E, const MAX_LEDS: usize>(
    renderer: &mut FireRenderer<D, E, MAX_LEDS>,
    policy: &FlameUpPolicy,
) -> FlameUpOutcome
where
    D: StripDriver,
    E: Entropy,
{
    let Some(plan) = policy.roll(renderer.entropy_mut()) else {
        debug!("flame-up roll lost");
        return FlameUpOutcome::Skipped;
    };
    info!("big flame for {} ms", plan.request.duration.as_millis());
    // Failed writes are logged by the renderer
    let _ = renderer.big_flame(plan.request);
    block_for(plan.pause);
    FlameUpOutcome::Played { pause: plan.pause }
}

/// [`flame_up`] for a renderer shared with other contexts
///
/// The roll and the flame run under one lock; the pause does not hold it.
pub fn flame_up_shared<M, D, E, const MAX_LEDS: usize>(
    shared: &SharedRenderer<M, D, E, MAX_LEDS>,
    policy: &FlameUpPolicy,
) -> FlameUpOutcome
where
    M: RawMutex,
    D: StripDriver,
    E: Entropy,
{
    let plan = shared.lock(|renderer| {
        let plan = policy.roll(renderer.entropy_mut())?;
        info!("big flame for {} ms", plan.request.duration.as_millis());
        let _ = renderer.big_flame(plan.request);
        Some(plan)
    });

    match plan {
        Some(plan) => {
            block_for(plan.pause);
            FlameUpOutcome::Played { pause: plan.pause }
        }
        None => {
            debug!("flame-up roll lost");
            FlameUpOutcome::Skipped
        }
    }
}
