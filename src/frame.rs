//! Session-owned fade buffers.

use crate::colors::dim_range;
use crate::fade::{FadeTrace, apply_dimming, apply_dimming_traced};
use crate::packed::PackedRgb;
use crate::types::FadeError;
use heapless::Vec;

/// Fade duration used when a pixel is set without one.
pub const DEFAULT_FADE_DURATION_MS: u32 = 1000;

/// The four per-pixel buffers of one animation session.
///
/// Holds the source colors, the rendered output, each pixel's fade rate and
/// its remaining fade time. Pixels are written with [`set_pixel`](Self::set_pixel)
/// and the whole frame advanced with [`step`](Self::step).
///
/// # Type Parameters
/// * `N` - Maximum number of pixels
#[derive(Debug, Clone)]
pub struct FadeFrame<const N: usize> {
    source: Vec<PackedRgb, N>,
    output: Vec<PackedRgb, N>,
    rates: Vec<f64, N>,
    remaining: Vec<u32, N>,
}

impl<const N: usize> FadeFrame<N> {
    /// Creates a frame of `len` black, static pixels.
    ///
    /// # Errors
    /// * `CapacityExceeded` - `len` is larger than `N`
    pub fn with_len(len: usize) -> Result<Self, FadeError> {
        if len > N {
            return Err(FadeError::CapacityExceeded {
                requested: len,
                capacity: N,
            });
        }

        let mut frame = Self {
            source: Vec::new(),
            output: Vec::new(),
            rates: Vec::new(),
            remaining: Vec::new(),
        };
        // Capacity was checked above, so these cannot fail.
        let _ = frame.source.resize(len, PackedRgb(0));
        let _ = frame.output.resize(len, PackedRgb(0));
        let _ = frame.rates.resize(len, 0.0);
        let _ = frame.remaining.resize(len, 0);
        Ok(frame)
    }

    /// Number of pixels in the frame.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Returns true if the frame has no pixels.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<(), FadeError> {
        if index >= self.len() {
            return Err(FadeError::PixelOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// Sets a pixel's color and starts (or cancels) its fade.
    ///
    /// A positive `rate_per_ms` fades toward black, a negative one fades up
    /// to `color`, and zero shows `color` unchanged. `duration_ms` is the
    /// time the fade runs for.
    pub fn set_pixel(
        &mut self,
        index: usize,
        color: PackedRgb,
        rate_per_ms: f64,
        duration_ms: u32,
    ) -> Result<(), FadeError> {
        self.check_index(index)?;
        self.source[index] = color;
        self.rates[index] = rate_per_ms;
        self.remaining[index] = duration_ms;
        Ok(())
    }

    /// Shows `color` at `index` without fading.
    pub fn set_static(&mut self, index: usize, color: PackedRgb) -> Result<(), FadeError> {
        self.set_pixel(index, color, 0.0, DEFAULT_FADE_DURATION_MS)
    }

    /// Fades `color` at `index` from full brightness to black over `duration_ms`.
    ///
    /// A zero duration is treated as 1ms, so the next non-zero step lands on black.
    pub fn fade_out(
        &mut self,
        index: usize,
        color: PackedRgb,
        duration_ms: u32,
    ) -> Result<(), FadeError> {
        let duration_ms = duration_ms.max(1);
        self.set_pixel(index, color, linear_rate(duration_ms), duration_ms)
    }

    /// Fades `color` at `index` from black to full brightness over `duration_ms`.
    ///
    /// A zero duration is treated as 1ms, so the next non-zero step lands on `color`.
    pub fn fade_in(
        &mut self,
        index: usize,
        color: PackedRgb,
        duration_ms: u32,
    ) -> Result<(), FadeError> {
        let duration_ms = duration_ms.max(1);
        self.set_pixel(index, color, -linear_rate(duration_ms), duration_ms)
    }

    /// Sets every pixel to `color` with no fade.
    pub fn fill(&mut self, color: PackedRgb) {
        self.source.fill(color);
        self.rates.fill(0.0);
    }

    /// Sets every pixel to black with no fade.
    pub fn clear(&mut self) {
        self.fill(PackedRgb(0));
        self.output.fill(PackedRgb(0));
        self.remaining.fill(0);
    }

    /// Subtracts `amount` from each channel of the source pixels in `start..=end`.
    ///
    /// Returns `true` if the whole range is black afterwards.
    ///
    /// # Errors
    /// * `InvalidRange` - `start > end` or `end` is past the last pixel
    pub fn dim(&mut self, start: usize, end: usize, amount: u8) -> Result<bool, FadeError> {
        if start > end || end >= self.len() {
            return Err(FadeError::InvalidRange { start, end });
        }
        Ok(dim_range(&mut self.source, start, end, amount))
    }

    /// Advances all fades by `elapsed_ms` and refreshes the output buffer.
    pub fn step(&mut self, elapsed_ms: u32) {
        apply_dimming(
            elapsed_ms,
            &self.source,
            &mut self.output,
            &self.rates,
            &mut self.remaining,
        );
    }

    /// Like [`step`](Self::step), reporting each faded pixel to `trace`.
    pub fn step_traced<T: FadeTrace + ?Sized>(&mut self, elapsed_ms: u32, trace: &mut T) {
        apply_dimming_traced(
            elapsed_ms,
            &self.source,
            &mut self.output,
            &self.rates,
            &mut self.remaining,
            trace,
        );
    }

    /// Returns true if the pixel has a fade that has not finished.
    pub fn is_fading(&self, index: usize) -> bool {
        index < self.len() && self.rates[index] != 0.0 && self.remaining[index] != 0
    }

    /// Number of pixels whose fade is still running.
    pub fn active_fades(&self) -> usize {
        self.rates
            .iter()
            .zip(self.remaining.iter())
            .filter(|&(&rate, &left)| rate != 0.0 && left != 0)
            .count()
    }

    /// Source colors as last set.
    pub fn source(&self) -> &[PackedRgb] {
        &self.source
    }

    /// Colors produced by the most recent step.
    pub fn output(&self) -> &[PackedRgb] {
        &self.output
    }

    /// Per-pixel fade rates.
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Per-pixel remaining fade time in milliseconds.
    pub fn remaining(&self) -> &[u32] {
        &self.remaining
    }
}

/// Rate that takes a fade from one end of the brightness range to the other in `duration_ms`.
///
/// `duration_ms` must be non-zero.
fn linear_rate(duration_ms: u32) -> f64 {
    1.0 / f64::from(duration_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_len_rejects_more_than_capacity() {
        let result = FadeFrame::<4>::with_len(5);
        assert_eq!(
            result.unwrap_err(),
            FadeError::CapacityExceeded {
                requested: 5,
                capacity: 4
            }
        );
    }

    #[test]
    fn set_pixel_rejects_out_of_range_index() {
        let mut frame = FadeFrame::<4>::with_len(2).unwrap();
        let result = frame.set_pixel(2, PackedRgb(0xFF), 0.0, 0);
        assert_eq!(
            result,
            Err(FadeError::PixelOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn fade_out_reaches_black_at_duration() {
        let mut frame = FadeFrame::<1>::with_len(1).unwrap();
        frame.fade_out(0, PackedRgb(0xFFFFFF), 1000).unwrap();

        frame.step(0);
        assert_eq!(frame.output()[0], PackedRgb(0xFFFFFF));

        frame.step(500);
        assert_eq!(frame.output()[0], PackedRgb(0x7F7F7F));

        frame.step(500);
        assert_eq!(frame.output()[0], PackedRgb(0));
        assert!(!frame.is_fading(0));
    }

    #[test]
    fn fade_in_reaches_source_at_duration() {
        let mut frame = FadeFrame::<1>::with_len(1).unwrap();
        frame.fade_in(0, PackedRgb(0xFFFFFF), 1000).unwrap();

        frame.step(0);
        assert_eq!(frame.output()[0], PackedRgb(0));

        frame.step(1000);
        assert_eq!(frame.output()[0], PackedRgb(0xFFFFFF));
        assert_eq!(frame.active_fades(), 0);
    }

    #[test]
    fn zero_duration_fades_snap_on_next_step() {
        let mut frame = FadeFrame::<1>::with_len(1).unwrap();
        frame.set_static(0, PackedRgb(0xFFFFFF)).unwrap();
        frame.step(10);
        assert_eq!(frame.output()[0], PackedRgb(0xFFFFFF));

        frame.fade_out(0, PackedRgb(0x00FF00), 0).unwrap();
        assert!(frame.is_fading(0));
        frame.step(10);
        assert_eq!(frame.output()[0], PackedRgb(0));
        assert_eq!(frame.remaining()[0], 0);

        frame.fade_in(0, PackedRgb(0x00FF00), 0).unwrap();
        frame.step(10);
        assert_eq!(frame.output()[0], PackedRgb(0x00FF00));
        assert!(!frame.is_fading(0));
    }

    #[test]
    fn dim_validates_range() {
        let mut frame = FadeFrame::<4>::with_len(4).unwrap();
        assert_eq!(
            frame.dim(3, 1, 10),
            Err(FadeError::InvalidRange { start: 3, end: 1 })
        );
        assert_eq!(
            frame.dim(0, 4, 10),
            Err(FadeError::InvalidRange { start: 0, end: 4 })
        );
    }
}
