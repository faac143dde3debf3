//! Ember damping policies
//!
//! Each flicker frame subtracts a random "ember" color from every pixel.
//! The red channel is drawn uniformly from a bounded range, green and blue
//! are fixed fractions of it.

use crate::color::{EMBER, FLICKER, Rgb};
use crate::config::ConfigError;
use crate::entropy::Entropy;

const VARIANT_NAME_PLAIN: &str = "plain";
const VARIANT_NAME_FLICKER: &str = "flicker";

const VARIANT_ID_PLAIN: u8 = 0;
const VARIANT_ID_FLICKER: u8 = 1;

/// Parameters of the subtractive ember color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmberDamping {
    /// Lowest red value (inclusive)
    pub min_red: u8,
    /// Highest red value (inclusive)
    pub max_red: u8,
    /// Green is `red / green_divisor`
    pub green_divisor: u8,
    /// Blue is `red / blue_divisor`
    pub blue_divisor: u8,
}

impl EmberDamping {
    /// Red in `[0, 80]`, green and blue at half of it
    pub const PLAIN: Self = Self {
        min_red: 0,
        max_red: 80,
        green_divisor: 2,
        blue_divisor: 2,
    };

    /// Red in `[50, 80]`, green at a third and blue at a quarter of it
    pub const FLICKER: Self = Self {
        min_red: 50,
        max_red: 80,
        green_divisor: 3,
        blue_divisor: 4,
    };

    /// Damping color for a given red value
    pub const fn for_red(&self, red: u8) -> Rgb {
        Rgb {
            r: red,
            g: red / self.green_divisor,
            b: red / self.blue_divisor,
        }
    }

    /// Draw a damping color from the random stream
    pub fn sample<E: Entropy>(&self, entropy: &mut E) -> Rgb {
        let red = entropy.next_u8_in(self.min_red, self.max_red);
        self.for_red(red)
    }

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.min_red > self.max_red {
            return Err(ConfigError::InvertedEmberRange {
                min: self.min_red,
                max: self.max_red,
            });
        }
        if self.green_divisor == 0 || self.blue_divisor == 0 {
            return Err(ConfigError::ZeroEmberDivisor);
        }
        Ok(())
    }
}

impl Default for EmberDamping {
    fn default() -> Self {
        Self::FLICKER
    }
}

/// Named ember models that can be selected from configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EmberVariant {
    Plain = VARIANT_ID_PLAIN,
    Flicker = VARIANT_ID_FLICKER,
}

impl EmberVariant {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            VARIANT_ID_PLAIN => Self::Plain,
            VARIANT_ID_FLICKER => Self::Flicker,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => VARIANT_NAME_PLAIN,
            Self::Flicker => VARIANT_NAME_FLICKER,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            VARIANT_NAME_PLAIN => Some(Self::Plain),
            VARIANT_NAME_FLICKER => Some(Self::Flicker),
            _ => None,
        }
    }

    pub const fn damping(self) -> EmberDamping {
        match self {
            Self::Plain => EmberDamping::PLAIN,
            Self::Flicker => EmberDamping::FLICKER,
        }
    }

    /// Base color the variant was tuned for
    pub const fn base_color(self) -> Rgb {
        match self {
            Self::Plain => EMBER,
            Self::Flicker => FLICKER,
        }
    }
}
