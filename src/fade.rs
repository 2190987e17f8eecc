//! Time-based per-pixel fade stepping.
//!
//! Each pixel carries a signed fade rate (fraction of brightness per
//! millisecond) and a remaining duration. Every tick, [`apply_dimming`] moves
//! the remaining durations forward by the elapsed time and writes the scaled
//! source colors into the output buffer.
//!
//! The buffers belong to the caller and live for the whole animation session;
//! nothing here allocates. [`crate::frame::FadeFrame`] bundles them for callers
//! that do not already own raw buffers.

use crate::colors::scale_color;
use crate::packed::PackedRgb;

/// Direction of a pixel's fade, derived from the sign of its rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FadeDirection {
    /// Rate is zero. The pixel is copied through unchanged.
    Static,

    /// Positive rate. Brightness falls toward black.
    Down,

    /// Negative rate. Brightness rises toward the source color.
    Up,
}

impl FadeDirection {
    /// Classifies a fade rate.
    #[inline]
    pub fn of(rate: f64) -> Self {
        if rate == 0.0 {
            FadeDirection::Static
        } else if rate < 0.0 {
            FadeDirection::Up
        } else {
            FadeDirection::Down
        }
    }

    /// The scale fraction a finished fade settles on.
    #[inline]
    pub fn target(self) -> f64 {
        match self {
            FadeDirection::Up | FadeDirection::Static => 1.0,
            FadeDirection::Down => 0.0,
        }
    }
}

/// One pixel written by a fade during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FadeEvent {
    pub index: usize,
    pub elapsed_ms: u32,
    pub remaining_ms: u32,
    pub rate: f64,
    pub fraction: f64,
    pub before: PackedRgb,
    pub after: PackedRgb,
}

/// Receiver for per-pixel fade diagnostics.
///
/// Only [`apply_dimming_traced`] reports events; the plain stepper never
/// touches a trace.
pub trait FadeTrace {
    /// Called once for every pixel a fade wrote this tick.
    fn pixel_stepped(&mut self, event: &FadeEvent);
}

/// Trace that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl FadeTrace for NoTrace {
    #[inline(always)]
    fn pixel_stepped(&mut self, _event: &FadeEvent) {}
}

/// Forwards an event only when its output color differs from the last one forwarded.
#[derive(Debug)]
pub struct ChangedOnly<T: FadeTrace> {
    inner: T,
    last: Option<PackedRgb>,
}

impl<T: FadeTrace> ChangedOnly<T> {
    pub fn new(inner: T) -> Self {
        Self { inner, last: None }
    }

    /// Returns the wrapped trace.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: FadeTrace> FadeTrace for ChangedOnly<T> {
    fn pixel_stepped(&mut self, event: &FadeEvent) {
        if self.last != Some(event.after) {
            self.last = Some(event.after);
            self.inner.pixel_stepped(event);
        }
    }
}

/// Logs every event at trace level through `defmt`.
#[cfg(feature = "defmt")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefmtTrace;

#[cfg(feature = "defmt")]
impl FadeTrace for DefmtTrace {
    fn pixel_stepped(&mut self, event: &FadeEvent) {
        defmt::trace!(
            "px {=usize} el:{=u32} rem:{=u32} rate:{=f64} amt:{=f64} {=u32:#x} -> {=u32:#x}",
            event.index,
            event.elapsed_ms,
            event.remaining_ms,
            event.rate,
            event.fraction,
            event.before.0,
            event.after.0
        );
    }
}

/// Advances one pixel's remaining duration and returns the scale fraction for this tick.
///
/// Returns `None` when the fade has already finished (`remaining == 0`), in
/// which case the caller must leave the pixel's output alone. `rate` must be
/// non-zero.
///
/// If the fade ends inside this tick, `remaining` becomes zero and the fraction
/// is exactly 1.0 (fading up) or 0.0 (fading down). Otherwise a fraction that
/// falls outside `[0.0, 1.0]` snaps to that same end value rather than to the
/// nearer bound.
#[inline]
pub fn fade_fraction(rate: f64, remaining: &mut u32, elapsed_ms: u32) -> Option<f64> {
    debug_assert!(rate != 0.0, "static pixels have no fade fraction");

    if *remaining == 0 {
        return None;
    }

    let direction = FadeDirection::of(rate);
    if *remaining < elapsed_ms {
        *remaining = 0;
        return Some(direction.target());
    }

    *remaining -= elapsed_ms;
    let left = f64::from(*remaining);
    let fraction = match direction {
        FadeDirection::Up => 1.0 - (-rate * left),
        _ => rate * left,
    };

    if (0.0..=1.0).contains(&fraction) {
        Some(fraction)
    } else {
        Some(direction.target())
    }
}

/// Steps every pixel's fade forward by `elapsed_ms`.
///
/// `fade_rate_per_ms.len()` sets the number of pixels processed; `source`,
/// `dest` and `remaining_ms` must be at least that long. For each pixel:
///
/// - a zero rate copies `source[i]` to `dest[i]` and ignores `remaining_ms[i]`;
/// - a finished fade (`remaining_ms[i] == 0`) leaves `dest[i]` as it was;
/// - otherwise `dest[i]` is `source[i]` scaled by [`fade_fraction`].
///
/// Buffer lengths are only checked in debug builds.
pub fn apply_dimming(
    elapsed_ms: u32,
    source: &[PackedRgb],
    dest: &mut [PackedRgb],
    fade_rate_per_ms: &[f64],
    remaining_ms: &mut [u32],
) {
    apply_dimming_traced(
        elapsed_ms,
        source,
        dest,
        fade_rate_per_ms,
        remaining_ms,
        &mut NoTrace,
    );
}

/// [`apply_dimming`] that reports each faded pixel to `trace`.
pub fn apply_dimming_traced<T: FadeTrace + ?Sized>(
    elapsed_ms: u32,
    source: &[PackedRgb],
    dest: &mut [PackedRgb],
    fade_rate_per_ms: &[f64],
    remaining_ms: &mut [u32],
    trace: &mut T,
) {
    let len = fade_rate_per_ms.len();
    debug_assert!(source.len() >= len, "source buffer shorter than fade rates");
    debug_assert!(dest.len() >= len, "output buffer shorter than fade rates");
    debug_assert!(remaining_ms.len() >= len, "duration buffer shorter than fade rates");

    for (i, &rate) in fade_rate_per_ms.iter().enumerate() {
        if rate == 0.0 {
            dest[i] = source[i];
            continue;
        }

        let Some(fraction) = fade_fraction(rate, &mut remaining_ms[i], elapsed_ms) else {
            continue;
        };

        let color = scale_color(source[i], fraction);
        trace.pixel_stepped(&FadeEvent {
            index: i,
            elapsed_ms,
            remaining_ms: remaining_ms[i],
            rate,
            fraction,
            before: source[i],
            after: color,
        });
        dest[i] = color;
    }
}
