//! Packed color arithmetic.
//!
//! Stateless helpers operating on [`PackedRgb`] words: scaling, dimming,
//! merging, HSV conversion and the final brightness/channel-order conversion
//! applied before pixels reach the strip. The arithmetic is integer-truncating
//! on purpose so results match the firmware frame-for-frame.

use crate::packed::PackedRgb;

/// Scales each channel of `color` by `fraction`.
///
/// Each channel is multiplied, truncated toward zero and masked to 8 bits.
/// A `fraction` above 1.0 therefore wraps instead of saturating
/// (`scale_color(0xFF0000, 2.0)` yields `0xFE0000`). The fade stepper only ever
/// passes fractions in `[0.0, 1.0]`, where wrapping cannot happen; use
/// [`scale_color_saturating`] for caller-supplied brightness values.
#[inline]
pub fn scale_color(color: PackedRgb, fraction: f64) -> PackedRgb {
    let r = (f64::from(color.red()) * fraction) as u32;
    let g = (f64::from(color.green()) * fraction) as u32;
    let b = (f64::from(color.blue()) * fraction) as u32;
    PackedRgb(((r & 0xff) << 16) | ((g & 0xff) << 8) | (b & 0xff))
}

/// Scales `color` by `fraction` clamped to `[0.0, 1.0]`.
#[inline]
pub fn scale_color_saturating(color: PackedRgb, fraction: f64) -> PackedRgb {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    scale_color(color, fraction)
}

/// Subtracts `amount` from each channel, flooring at zero.
#[inline]
pub fn dim_color(color: PackedRgb, amount: u8) -> PackedRgb {
    PackedRgb::new(
        color.red().saturating_sub(amount),
        color.green().saturating_sub(amount),
        color.blue().saturating_sub(amount),
    )
}

/// Dims the pixels in `start..=end` by `amount`, in place.
///
/// Returns `true` if every pixel in the range is black afterwards.
///
/// # Panics
/// Panics if `end` is out of bounds for `pixels`.
pub fn dim_range(pixels: &mut [PackedRgb], start: usize, end: usize, amount: u8) -> bool {
    if start > end {
        return true;
    }

    let mut all_off = true;
    for pixel in &mut pixels[start..=end] {
        *pixel = dim_color(*pixel, amount);
        if !pixel.is_black() {
            all_off = false;
        }
    }
    all_off
}

/// Blends `first` and `second`, weighting `first` by `amount` and `second` by `1 - amount`.
///
/// Channels are weighted in place (without shifting them down first), summed,
/// capped at the channel maximum and masked back into position.
pub fn merge_and_scale(amount: f64, first: PackedRgb, second: PackedRgb) -> PackedRgb {
    const R: u32 = 0xff_0000;
    const G: u32 = 0x00_ff00;
    const B: u32 = 0x00_00ff;

    let weigh = |color: PackedRgb, mask: u32, weight: f64| (f64::from(color.0 & mask) * weight) as i32;

    let inverse = 1.0 - amount;
    let r = weigh(first, R, amount).wrapping_add(weigh(second, R, inverse)).min(R as i32);
    let g = weigh(first, G, amount).wrapping_add(weigh(second, G, inverse)).min(G as i32);
    let b = weigh(first, B, amount).wrapping_add(weigh(second, B, inverse)).min(B as i32);

    PackedRgb((r as u32 & R) | (g as u32 & G) | (b as u32 & B))
}

/// Converts HSV (each component in `0.0..=1.0`) to a packed RGB color.
///
/// Uses the six-sector formula. A hue of exactly 1.0 wraps around to the
/// red sector.
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> PackedRgb {
    let scaled = hue * 6.0;
    let sector = scaled as i32;
    let f = scaled - f64::from(sector);

    let p = value * (1.0 - saturation);
    let q = value * (1.0 - f * saturation);
    let t = value * (1.0 - (1.0 - f) * saturation);

    let (r, g, b) = match sector.rem_euclid(6) {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };

    let channel = |c: f64| ((c * 255.0) as i32 & 0xff) as u32;
    PackedRgb((channel(r) << 16) | (channel(g) << 8) | channel(b))
}

/// Distance of `(x, y)` from the origin, as a fraction of `span`.
///
/// Used to map a pixel's position to a hue for radial rainbows.
#[inline]
pub fn hue_dist(x: f64, y: f64, span: f64) -> f64 {
    libm::sqrt(x * x + y * y) / span
}

/// Wire order of color channels expected by an LED strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelOrder {
    /// Red, green, blue in the low 24 bits.
    #[default]
    Rgb,

    /// Green, red, blue in the low 24 bits (WS2812).
    Grb,

    /// Red, green, blue in the high 24 bits, white byte left at zero.
    Rgbw,
}

impl ChannelOrder {
    /// Resolves a strip order name such as `"GRB"`.
    ///
    /// Unknown names fall back to [`ChannelOrder::Rgb`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "GRB" => ChannelOrder::Grb,
            "RGBW" => ChannelOrder::Rgbw,
            _ => ChannelOrder::Rgb,
        }
    }

    /// Canonical name of this order.
    pub fn name(self) -> &'static str {
        match self {
            ChannelOrder::Rgb => "RGB",
            ChannelOrder::Grb => "GRB",
            ChannelOrder::Rgbw => "RGBW",
        }
    }
}

/// Applies `brightness` (0-255, where 255 is just under full) and reorders
/// channels for the strip.
#[inline]
pub fn brighten_and_convert(color: PackedRgb, brightness: u8, order: ChannelOrder) -> u32 {
    let brightness = u32::from(brightness);
    let r = ((color.0 & 0xff_0000) * brightness) >> 24;
    let g = ((color.0 & 0x00_ff00) * brightness) >> 16;
    let b = ((color.0 & 0x00_00ff) * brightness) >> 8;

    match order {
        ChannelOrder::Rgb => (r << 16) | (g << 8) | b,
        ChannelOrder::Grb => (g << 16) | (r << 8) | b,
        ChannelOrder::Rgbw => (r << 24) | (g << 16) | (b << 8),
    }
}
