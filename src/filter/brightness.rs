//! Global strip brightness
//!
//! Scales every channel at flush time, the way the strip hardware library
//! does. The pixel buffer itself keeps the unscaled values.

use super::Filter;
use crate::{color::Rgb, math8::scale8};

/// Brightness applied to outgoing frames (255 = unchanged)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessFilter {
    brightness: u8,
}

impl BrightnessFilter {
    pub const fn new(brightness: u8) -> Self {
        Self { brightness }
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn set(&mut self, brightness: u8) {
        self.brightness = brightness;
    }
}

impl Filter for BrightnessFilter {
    fn apply(&self, frame: &mut [Rgb]) {
        match self.brightness {
            255 => {}
            0 => {
                for pixel in frame.iter_mut() {
                    *pixel = Rgb { r: 0, g: 0, b: 0 };
                }
            }
            current => {
                for pixel in frame.iter_mut() {
                    pixel.r = scale8(pixel.r, current);
                    pixel.g = scale8(pixel.g, current);
                    pixel.b = scale8(pixel.b, current);
                }
            }
        }
    }

    fn is_identity(&self) -> bool {
        self.brightness == 255
    }
}
