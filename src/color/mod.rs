mod utils;

use smart_leds::RGB8;
pub use utils::{blend, rgb_from_u32, rgb_to_u32, subtract};

pub type Rgb = RGB8;

/// All channels off
pub const OFF: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Base color of the plain ember model
pub const EMBER: Rgb = Rgb { r: 80, g: 35, b: 0 };

/// Base color of the flicker ember model
pub const FLICKER: Rgb = Rgb { r: 100, g: 30, b: 0 };

/// Intensified color used by flame-ups
pub const BIG_FLAME: Rgb = Rgb { r: 220, g: 80, b: 0 };
