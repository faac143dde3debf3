use core::fmt::Debug;

use embassy_time::{Duration, block_for};
use log::{info, warn};

use crate::StripDriver;
use crate::buffer::PixelBuffer;
use crate::color::{Rgb, blend, subtract};
use crate::config::{ConfigError, FireConfig};
use crate::ember::EmberDamping;
use crate::entropy::Entropy;
use crate::filter::{BrightnessFilter, Filter};

/// One-shot overlay: show `color` for `duration`, then go dark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlameEffectRequest {
    pub color: Rgb,
    pub duration: Duration,
}

/// The strip driver refused a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("strip write failed: {0:?}")]
pub struct FlushError<E: Debug>(pub E);

/// Fire renderer - owns the frame buffer, the random stream and the strip
///
/// Every public drawing operation computes a whole frame and flushes it with
/// a single driver write. Dropping the renderer clears the strip and releases
/// the driver.
pub struct FireRenderer<D: StripDriver, E: Entropy, const MAX_LEDS: usize> {
    // External dependencies
    driver: D,
    entropy: E,

    // Configuration
    damping: EmberDamping,
    brightness: BrightnessFilter,

    // Internal state
    buffer: PixelBuffer<MAX_LEDS>,
    output: PixelBuffer<MAX_LEDS>,
    flushes: u32,
    failed_flushes: u32,
    released: bool,
}

impl<D: StripDriver, E: Entropy, const MAX_LEDS: usize> FireRenderer<D, E, MAX_LEDS> {
    /// Create a renderer for `config.strip_length` LEDs
    ///
    /// Nothing is written to the strip until the first draw.
    pub fn new(driver: D, entropy: E, config: &FireConfig) -> Result<Self, ConfigError> {
        config.validate(MAX_LEDS)?;
        Ok(Self {
            driver,
            entropy,
            damping: config.ember,
            brightness: BrightnessFilter::new(config.brightness),
            buffer: PixelBuffer::new(config.strip_length)?,
            output: PixelBuffer::new(config.strip_length)?,
            flushes: 0,
            failed_flushes: 0,
            released: false,
        })
    }

    /// Render one flicker frame on top of `base` and flush it
    ///
    /// Each pixel starts dark, gets `base` added and a freshly sampled ember
    /// color subtracted, both saturating per channel.
    pub fn draw(&mut self, base: Rgb) -> Result<(), FlushError<D::Error>> {
        self.buffer.clear();
        for pixel in self.buffer.as_mut_slice() {
            let damping = self.damping.sample(&mut self.entropy);
            *pixel = subtract(blend(*pixel, base), damping);
        }
        self.flush()
    }

    /// Turn every pixel off and flush
    pub fn clear(&mut self) -> Result<(), FlushError<D::Error>> {
        self.buffer.clear();
        self.flush()
    }

    /// Show an intensified frame, hold it, then clear the strip
    ///
    /// Blocks the caller for `request.duration`. Always flushes twice and
    /// always ends dark, even if the first write failed; the first error is
    /// returned.
    pub fn big_flame(&mut self, request: FlameEffectRequest) -> Result<(), FlushError<D::Error>> {
        let flame = self.draw(request.color);
        block_for(request.duration);
        let cleared = self.clear();
        flame.and(cleared)
    }

    /// Clear the strip and release the driver
    ///
    /// Runs at most once; also called when the renderer is dropped.
    pub fn shutdown(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        // Failures are already logged by flush
        let _ = self.clear();
        self.driver.release();
        info!("strip cleared and released after {} frames", self.flushes);
    }

    fn flush(&mut self) -> Result<(), FlushError<D::Error>> {
        let frame = if self.brightness.is_identity() {
            self.buffer.as_slice()
        } else {
            self.output.copy_from(&self.buffer);
            self.brightness.apply(self.output.as_mut_slice());
            self.output.as_slice()
        };

        self.flushes = self.flushes.wrapping_add(1);
        self.driver.write(frame).map_err(|err| {
            self.failed_flushes = self.failed_flushes.wrapping_add(1);
            warn!("frame {} dropped, strip write failed: {:?}", self.flushes, err);
            FlushError(err)
        })
    }

    /// Current (unscaled) frame contents
    pub fn buffer(&self) -> &PixelBuffer<MAX_LEDS> {
        &self.buffer
    }

    /// Color of one pixel, or `None` past the end of the strip
    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.buffer.pixel(index)
    }

    pub fn strip_length(&self) -> usize {
        self.buffer.len()
    }

    pub fn damping(&self) -> EmberDamping {
        self.damping
    }

    /// Switch the ember model used by subsequent frames
    pub fn set_damping(&mut self, damping: EmberDamping) -> Result<(), ConfigError> {
        damping.validate()?;
        self.damping = damping;
        Ok(())
    }

    pub fn brightness(&self) -> u8 {
        self.brightness.brightness()
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness.set(brightness);
    }

    /// Number of driver writes attempted so far
    pub fn flush_count(&self) -> u32 {
        self.flushes
    }

    /// Number of driver writes that failed
    pub fn failed_flushes(&self) -> u32 {
        self.failed_flushes
    }

    /// The random stream, shared with trigger policies
    pub fn entropy_mut(&mut self) -> &mut E {
        &mut self.entropy
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}

impl<D: StripDriver, E: Entropy, const MAX_LEDS: usize> Drop for FireRenderer<D, E, MAX_LEDS> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
