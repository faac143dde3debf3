//! Fixed-capacity pixel buffer
//!
//! Holds one frame worth of colors for a strip of `len` LEDs. The length is
//! chosen at configuration time and never changes afterwards.

use heapless::Vec;

use crate::color::{OFF, Rgb, blend, subtract};
use crate::config::ConfigError;

/// Ordered per-LED colors, written to the strip as one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer<const MAX_LEDS: usize> {
    pixels: Vec<Rgb, MAX_LEDS>,
}

impl<const MAX_LEDS: usize> PixelBuffer<MAX_LEDS> {
    /// Create a buffer of `len` dark pixels
    pub fn new(len: usize) -> Result<Self, ConfigError> {
        if len == 0 {
            return Err(ConfigError::EmptyStrip);
        }
        let mut pixels = Vec::new();
        pixels.resize(len, OFF).map_err(|()| ConfigError::StripTooLong {
            length: len,
            max: MAX_LEDS,
        })?;
        Ok(Self { pixels })
    }

    /// Number of LEDs in the strip
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Color at `index`, or `None` past the end of the strip
    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    /// Set the color at `index`
    ///
    /// Returns `false` if the index is past the end of the strip.
    pub fn set_pixel(&mut self, index: usize, color: Rgb) -> bool {
        match self.pixels.get_mut(index) {
            Some(pixel) => {
                *pixel = color;
                true
            }
            None => false,
        }
    }

    /// Blend `color` into the pixel at `index`
    pub fn add_color(&mut self, index: usize, color: Rgb) -> bool {
        self.pixel(index)
            .is_some_and(|current| self.set_pixel(index, blend(current, color)))
    }

    /// Subtract `color` from the pixel at `index`
    pub fn subtract_color(&mut self, index: usize, color: Rgb) -> bool {
        self.pixel(index)
            .is_some_and(|current| self.set_pixel(index, subtract(current, color)))
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: Rgb) {
        for pixel in &mut self.pixels {
            *pixel = color;
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.fill(OFF);
    }

    /// Copy the contents of a buffer of the same length
    pub(crate) fn copy_from(&mut self, other: &Self) {
        self.pixels.clone_from(&other.pixels);
    }

    pub fn as_slice(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn as_mut_slice(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }
}
