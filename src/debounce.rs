//! Software debounce of the vibration sensor
//!
//! A call to [`SensorDebouncer::debounce`] samples the pin until it has kept
//! the same level for the whole debounce window, then reports the settled
//! level. Any edge while watching restarts the window.

use core::fmt::Debug;

use embassy_time::{Duration, Instant};
use log::debug;

use crate::config::ConfigError;

/// Digital input the debouncer samples
///
/// `true` means the pin reads high.
pub trait SignalPin {
    type Error: Debug;

    fn read(&mut self) -> Result<bool, Self::Error>;
}

/// Debounce parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    /// How long the level must stay unchanged to count as settled
    pub window: Duration,
    /// Give up after this long without settling (`None` waits forever)
    pub timeout: Option<Duration>,
    /// The sensor pulls the line low when triggered
    pub active_low: bool,
}

impl DebounceConfig {
    /// 50 ms window, no timeout, active low (pull-up wiring)
    pub const DEFAULT: Self = Self {
        window: Duration::from_millis(50),
        timeout: None,
        active_low: true,
    };

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.window.as_ticks() == 0 {
            return Err(ConfigError::ZeroDebounceWindow);
        }
        Ok(())
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Debounce timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceState {
    /// Last level reported as settled
    pub stable_state: bool,
    /// Level seen by the most recent sample
    pub last_observed: bool,
    /// When `last_observed` last changed
    pub state_since: Instant,
}

impl DebounceState {
    pub const fn new(level: bool, now: Instant) -> Self {
        Self {
            stable_state: level,
            last_observed: level,
            state_since: now,
        }
    }
}

/// Result of a single sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebouncePhase {
    /// The window has not elapsed since the last edge
    Watching,
    /// The level held for the whole window
    Settled(bool),
}

/// Debouncing stopped before the signal settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DebounceError {
    #[error("signal did not settle within {waited_ms} ms")]
    Unsettled { waited_ms: u64, last_observed: bool },
}

/// Turns a bouncing digital input into clean, settled levels
pub struct SensorDebouncer<P: SignalPin> {
    pin: P,
    config: DebounceConfig,
    state: DebounceState,
}

impl<P: SignalPin> SensorDebouncer<P> {
    /// Create a debouncer, seeding its state from an initial pin read
    ///
    /// A failed initial read assumes the idle level.
    pub fn new(mut pin: P, config: DebounceConfig, now: Instant) -> Result<Self, ConfigError> {
        config.validate()?;
        let idle = config.active_low;
        let level = read_or(&mut pin, idle);
        Ok(Self {
            pin,
            config,
            state: DebounceState::new(level, now),
        })
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    pub fn config(&self) -> DebounceConfig {
        self.config
    }

    /// Whether a settled level means "triggered"
    ///
    /// With the default `active_low` a settled low level triggers, matching
    /// a pull-up sensor. Set `active_low = false` for sensors that drive the
    /// line high on vibration.
    pub fn is_active(&self, level: bool) -> bool {
        level != self.config.active_low
    }

    /// Start a new debounce round from a fresh pin read
    pub fn begin(&mut self, now: Instant) {
        let level = read_or(&mut self.pin, self.state.last_observed);
        self.state = DebounceState::new(level, now);
    }

    /// Take one sample and advance the state machine
    ///
    /// A failed read counts as "no transition".
    pub fn sample(&mut self, now: Instant) -> DebouncePhase {
        let current = read_or(&mut self.pin, self.state.last_observed);

        if current != self.state.last_observed {
            self.state.last_observed = current;
            self.state.state_since = now;
            return DebouncePhase::Watching;
        }

        if now.saturating_duration_since(self.state.state_since) < self.config.window {
            return DebouncePhase::Watching;
        }

        if current != self.state.stable_state {
            self.state.stable_state = current;
        }
        DebouncePhase::Settled(self.state.stable_state)
    }

    /// Busy-poll the pin until the level settles
    ///
    /// Without a configured timeout this only returns once the signal has
    /// been quiet for a full window.
    pub fn debounce(&mut self) -> Result<bool, DebounceError> {
        self.debounce_with(Instant::now)
    }

    /// [`Self::debounce`] driven by a custom clock
    pub fn debounce_with<C>(&mut self, mut clock: C) -> Result<bool, DebounceError>
    where
        C: FnMut() -> Instant,
    {
        let started = clock();
        self.begin(started);

        loop {
            let now = clock();
            if let DebouncePhase::Settled(level) = self.sample(now) {
                return Ok(level);
            }

            if let Some(timeout) = self.config.timeout {
                let waited = now.saturating_duration_since(started);
                if waited >= timeout {
                    return Err(DebounceError::Unsettled {
                        waited_ms: waited.as_millis(),
                        last_observed: self.state.last_observed,
                    });
                }
            }

            core::hint::spin_loop();
        }
    }

    pub fn into_pin(self) -> P {
        self.pin
    }
}

fn read_or<P: SignalPin>(pin: &mut P, fallback: bool) -> bool {
    match pin.read() {
        Ok(level) => level,
        Err(err) => {
            debug!("sensor read failed, keeping level {}: {:?}", fallback, err);
            fallback
        }
    }
}
