//! Command-based control for displays.

use crate::packed::PackedRgb;

/// Actions for controlling a [`WreathDisplay`](crate::display::WreathDisplay).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayAction {
    /// Set a pixel and start its fade.
    SetPixel {
        index: usize,
        color: PackedRgb,
        rate_per_ms: f64,
        duration_ms: u32,
    },
    /// Set a pixel with no fade.
    SetStatic { index: usize, color: PackedRgb },
    /// Set every pixel to one color with no fade.
    Fill(PackedRgb),
    /// Subtract a flat amount from an inclusive pixel range.
    Dim { start: usize, end: usize, amount: u8 },
    /// Change the default brightness.
    SetBrightness(u8),
    /// Change animation speed as a percentage of real time.
    SetSpeed(u32),
    /// Turn off every pixel outside `keep_lit` segments, or restore them.
    Blank(bool),
    /// Set every pixel to black and cancel all fades.
    Clear,
}
