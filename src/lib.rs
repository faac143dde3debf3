#![no_std]

pub mod buffer;
pub mod channel;
pub mod color;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod ember;
pub mod entropy;
pub mod filter;
pub mod frame_scheduler;
pub mod math8;
pub mod renderer;
pub mod shared;
pub mod trigger;

pub use buffer::PixelBuffer;
pub use channel::{EdgeEvent, EdgeQueue, EdgeReceiver, EdgeSender, QueueFull};
pub use config::{ConfigError, FireConfig, MAX_SIGNAL_PIN};
pub use controller::{ControllerStats, EdgeOutcome, FireController};
pub use debounce::{
    DebounceConfig, DebounceError, DebouncePhase, DebounceState, SensorDebouncer, SignalPin,
};
pub use ember::{EmberDamping, EmberVariant};
pub use entropy::{Entropy, RngEntropy};
pub use frame_scheduler::{FlickerScheduler, FlickerTimings, FrameResult};
pub use renderer::{FireRenderer, FlameEffectRequest, FlushError};
pub use shared::SharedRenderer;
pub use trigger::{FlameUpOutcome, FlameUpPlan, FlameUpPolicy, flame_up, flame_up_shared};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED strip driver
///
/// Implement this trait to support different hardware platforms.
/// One call to [`StripDriver::write`] pushes one complete frame.
pub trait StripDriver {
    type Error: core::fmt::Debug;

    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error>;

    /// Give the hardware handle back; called once on shutdown
    fn release(&mut self) {}
}
