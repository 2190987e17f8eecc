//! Packed 24-bit colors as stored in LED pixel buffers.

use palette::Srgb;

/// A 24-bit RGB color packed as `0x00RRGGBB`.
///
/// This is the per-pixel word the fade buffers hold. It is `repr(transparent)`
/// so a `&[u32]` handed over by a host can be reinterpreted as `&[PackedRgb]`
/// without copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct PackedRgb(pub u32);

impl PackedRgb {
    /// Creates a packed color from 8-bit channels.
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        PackedRgb(((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    /// Red channel.
    #[inline]
    pub const fn red(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn blue(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Returns the raw packed word.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns true if all three channels are zero.
    ///
    /// Bits above the 24-bit color are ignored.
    #[inline]
    pub const fn is_black(self) -> bool {
        self.0 & 0x00ff_ffff == 0
    }

    /// Converts to a floating point `Srgb` (0.0-1.0 per channel).
    pub fn to_srgb(self) -> Srgb {
        Srgb::<u8>::from(self).into_format()
    }

    /// Converts from a floating point `Srgb`, rounding to the nearest 8-bit value.
    ///
    /// Out-of-range components are clamped.
    pub fn from_srgb(color: Srgb) -> Self {
        let clamped = Srgb::new(
            color.red.clamp(0.0, 1.0),
            color.green.clamp(0.0, 1.0),
            color.blue.clamp(0.0, 1.0),
        );
        PackedRgb::from(clamped.into_format::<u8>())
    }
}

impl From<u32> for PackedRgb {
    fn from(word: u32) -> Self {
        PackedRgb(word)
    }
}

impl From<PackedRgb> for u32 {
    fn from(color: PackedRgb) -> Self {
        color.0
    }
}

impl From<Srgb<u8>> for PackedRgb {
    fn from(color: Srgb<u8>) -> Self {
        PackedRgb::new(color.red, color.green, color.blue)
    }
}

impl From<PackedRgb> for Srgb<u8> {
    fn from(color: PackedRgb) -> Self {
        Srgb::new(color.red(), color.green(), color.blue())
    }
}
