use crate::{
    color::Rgb,
    math8::{qadd8, qsub8},
};

/// Add two colors channel by channel, saturating at 255
#[inline]
pub const fn blend(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: qadd8(a.r, b.r),
        g: qadd8(a.g, b.g),
        b: qadd8(a.b, b.b),
    }
}

/// Subtract `b` from `a` channel by channel, flooring at 0
#[inline]
pub const fn subtract(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: qsub8(a.r, b.r),
        g: qsub8(a.g, b.g),
        b: qsub8(a.b, b.b),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
///
/// Bits above the low 24 are ignored.
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
#[allow(clippy::cast_lossless)]
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}
