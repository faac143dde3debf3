//! Startup configuration
//!
//! Everything is validated once, before any hardware is touched. A
//! [`ConfigError`] is fatal: the caller is expected to abort startup.

use embassy_time::Duration;

use crate::color::Rgb;
use crate::debounce::DebounceConfig;
use crate::ember::{EmberDamping, EmberVariant};
use crate::frame_scheduler::FlickerTimings;
use crate::trigger::FlameUpPolicy;

/// Highest GPIO number accepted for the sensor input
pub const MAX_SIGNAL_PIN: u8 = 53;

/// Invalid startup configuration
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("strip length must be at least 1")]
    EmptyStrip,
    #[error("strip length {length} exceeds the capacity of {max} LEDs")]
    StripTooLong { length: usize, max: usize },
    #[error("signal pin {0} is out of range (max {max})", max = MAX_SIGNAL_PIN)]
    InvalidPin(u8),
    #[error("debounce window must be longer than zero")]
    ZeroDebounceWindow,
    #[error("flame-up probability {0} is outside 0.0..=1.0")]
    ProbabilityOutOfRange(f32),
    #[error("flame-up duration must be longer than zero")]
    ZeroFlameDuration,
    #[error("pause range is inverted ({min_ms} ms > {max_ms} ms)")]
    InvertedPause { min_ms: u64, max_ms: u64 },
    #[error("flicker interval range is inverted ({min_ms} ms > {max_ms} ms)")]
    InvertedFlickerInterval { min_ms: u64, max_ms: u64 },
    #[error("flicker interval must be longer than zero")]
    ZeroFlickerInterval,
    #[error("ember red range is inverted ({min} > {max})")]
    InvertedEmberRange { min: u8, max: u8 },
    #[error("ember green/blue divisors must be non-zero")]
    ZeroEmberDivisor,
}

/// Complete configuration of a fire installation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireConfig {
    /// Number of LEDs on the strip
    pub strip_length: usize,
    /// Global brightness applied at flush time
    pub brightness: u8,
    /// GPIO number of the vibration sensor
    pub signal_pin: u8,
    /// Base color of regular flicker frames
    pub base_color: Rgb,
    /// Ember damping model of every frame
    pub ember: EmberDamping,
    /// Pacing of regular flicker frames
    pub flicker: FlickerTimings,
    /// Software debounce of the sensor input
    pub debounce: DebounceConfig,
    /// What happens on a settled sensor trigger
    pub flame_up: FlameUpPolicy,
    /// Unprompted flame-ups rolled after each flicker frame
    pub ambient_flare: Option<FlameUpPolicy>,
}

impl FireConfig {
    /// 144 LEDs at brightness 200, sensor on GPIO 23, flicker ember model
    pub const DEFAULT: Self = Self {
        strip_length: 144,
        brightness: 200,
        signal_pin: 23,
        base_color: EmberVariant::Flicker.base_color(),
        ember: EmberDamping::FLICKER,
        flicker: FlickerTimings::DEFAULT,
        debounce: DebounceConfig::DEFAULT,
        flame_up: FlameUpPolicy::SENSOR,
        ambient_flare: None,
    };

    /// Use the ember model and base color of a named variant
    #[must_use]
    pub const fn with_variant(mut self, variant: EmberVariant) -> Self {
        self.ember = variant.damping();
        self.base_color = variant.base_color();
        self
    }

    #[must_use]
    pub const fn with_strip_length(mut self, strip_length: usize) -> Self {
        self.strip_length = strip_length;
        self
    }

    /// Probability that a settled trigger plays a big flame
    pub const fn big_flame_probability(&self) -> f32 {
        self.flame_up.probability
    }

    pub const fn big_flame_duration(&self) -> Duration {
        self.flame_up.duration
    }

    pub const fn debounce_window(&self) -> Duration {
        self.debounce.window
    }

    /// Check every option; `max_leds` is the buffer capacity of the renderer
    pub fn validate(&self, max_leds: usize) -> Result<(), ConfigError> {
        if self.strip_length == 0 {
            return Err(ConfigError::EmptyStrip);
        }
        if self.strip_length > max_leds {
            return Err(ConfigError::StripTooLong {
                length: self.strip_length,
                max: max_leds,
            });
        }
        if self.signal_pin > MAX_SIGNAL_PIN {
            return Err(ConfigError::InvalidPin(self.signal_pin));
        }
        self.ember.validate()?;
        self.flicker.validate()?;
        self.debounce.validate()?;
        self.flame_up.validate()?;
        if let Some(flare) = &self.ambient_flare {
            flare.validate()?;
        }
        Ok(())
    }
}

impl Default for FireConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
